use crate::permissions::{PermissionConfig, PermissionPatch};
use crate::roles;
use crate::store::PermissionStore;

/// What UI code is allowed to do with operator permissions.
pub trait PermissionsApi: Send + Sync {
    fn operator_permissions(&self) -> PermissionConfig;
    fn update_operator_permissions(&self, patch: PermissionPatch);
    fn reset_to_defaults(&self);

    fn can_configure_permissions(&self, role: &str) -> bool {
        roles::can_configure_permissions(role)
    }
}

impl PermissionsApi for PermissionStore {
    fn operator_permissions(&self) -> PermissionConfig {
        self.snapshot()
    }

    fn update_operator_permissions(&self, patch: PermissionPatch) {
        self.update(&patch);
    }

    fn reset_to_defaults(&self) {
        self.reset();
    }
}

/// Served when no store is mounted: defaults, inert mutations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPermissions;

impl PermissionsApi for FallbackPermissions {
    fn operator_permissions(&self) -> PermissionConfig {
        PermissionConfig::default()
    }

    fn update_operator_permissions(&self, _patch: PermissionPatch) {}

    fn reset_to_defaults(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::PermissionFlag;

    #[test]
    fn fallback_ignores_mutations() {
        let api = FallbackPermissions;
        api.update_operator_permissions(
            PermissionPatch::default().with(PermissionFlag::CanEdit, true),
        );
        api.reset_to_defaults();
        assert_eq!(api.operator_permissions(), PermissionConfig::default());
    }

    #[test]
    fn fallback_and_store_share_role_check() {
        let store = PermissionStore::new(None);
        for role in ["admin", "coordenador", "", "Admin", "viewer"] {
            assert_eq!(
                FallbackPermissions.can_configure_permissions(role),
                store.can_configure_permissions(role),
                "{role:?}"
            );
        }
        assert!(FallbackPermissions.can_configure_permissions("admin"));
    }
}
