pub mod bus;
pub mod host_api;
pub mod permissions;
pub mod provider;
pub mod roles;
pub mod store;

pub use bus::{PermissionEvent, PermissionObserver};
pub use host_api::{FallbackPermissions, PermissionsApi};
pub use permissions::{PermissionConfig, PermissionFlag, PermissionPatch, UnknownFlag};
pub use provider::PermissionsProvider;
pub use roles::{can_configure_permissions, PrivilegedRole, ADMIN_ROLE, COORDINATOR_ROLE};
pub use store::{LoadOutcome, PermissionStore, SubscriptionId};
