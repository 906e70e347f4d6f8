//! The single access point UI code uses to reach operator permissions.

use crate::host_api::{FallbackPermissions, PermissionsApi};
use crate::store::PermissionStore;
use fleetdash_core::{CoreConfig, CoreResult};
use std::sync::Arc;

/// Render scope that may or may not carry a mounted store.
///
/// Cloning shares the mounted store.
#[derive(Clone, Default)]
pub struct PermissionsProvider {
    store: Option<Arc<PermissionStore>>,
}

impl PermissionsProvider {
    pub fn mount(store: Arc<PermissionStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A scope with nothing mounted, as during pre-rendering.
    pub fn unmounted() -> Self {
        Self::default()
    }

    /// Opens the configured backend, mounts a store on it and hydrates it.
    ///
    /// Only configuration errors surface here. Storage and decode failures
    /// during hydration are logged and the store keeps its defaults.
    pub fn mount_from_config(cfg: &CoreConfig) -> CoreResult<Self> {
        let store = PermissionStore::from_config(&cfg.storage)?;
        store.hydrate();
        Ok(Self::mount(Arc::new(store)))
    }

    pub fn is_mounted(&self) -> bool {
        self.store.is_some()
    }

    pub fn use_permissions(&self) -> Arc<dyn PermissionsApi> {
        if let Some(store) = &self.store {
            return store.clone();
        }
        Arc::new(FallbackPermissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{PermissionConfig, PermissionFlag, PermissionPatch};
    use fleetdash_core::{StorageConfig, StorageMode};

    #[test]
    fn unmounted_scope_serves_fallback() {
        let provider = PermissionsProvider::unmounted();
        assert!(!provider.is_mounted());
        let api = provider.use_permissions();
        api.update_operator_permissions(
            PermissionPatch::default().with(PermissionFlag::CanDelete, true),
        );
        api.reset_to_defaults();
        assert_eq!(api.operator_permissions(), PermissionConfig::default());
        assert!(api.can_configure_permissions("coordenador"));
        assert!(!api.can_configure_permissions("Coordenador"));
    }

    #[test]
    fn mounted_scope_shares_one_store() {
        let provider = PermissionsProvider::mount(Arc::new(PermissionStore::new(None)));
        let panel = provider.use_permissions();
        let toolbar = provider.clone().use_permissions();
        panel.update_operator_permissions(
            PermissionPatch::default().with(PermissionFlag::CanEdit, true),
        );
        assert!(toolbar.operator_permissions().can_edit);
        toolbar.reset_to_defaults();
        assert_eq!(panel.operator_permissions(), PermissionConfig::default());
    }

    #[test]
    fn mount_from_disabled_storage() {
        let cfg = CoreConfig {
            storage: StorageConfig {
                mode: StorageMode::Disabled,
                ..StorageConfig::default()
            },
            ..CoreConfig::default()
        };
        let provider = PermissionsProvider::mount_from_config(&cfg).unwrap();
        assert!(provider.is_mounted());
        let api = provider.use_permissions();
        api.update_operator_permissions(
            PermissionPatch::default().with(PermissionFlag::CanImport, true),
        );
        assert!(api.operator_permissions().can_import);
    }

    #[test]
    fn mount_from_file_without_root_fails() {
        let cfg = CoreConfig {
            storage: StorageConfig {
                mode: StorageMode::File,
                ..StorageConfig::default()
            },
            ..CoreConfig::default()
        };
        assert!(PermissionsProvider::mount_from_config(&cfg).is_err());
    }
}
