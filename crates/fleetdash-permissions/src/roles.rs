use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";
pub const COORDINATOR_ROLE: &str = "coordenador";

/// Roles allowed to change the operator permission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivilegedRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "coordenador")]
    Coordinator,
}

impl PrivilegedRole {
    /// Exact, case-sensitive match against the known role names.
    pub fn from_role(role: &str) -> Option<Self> {
        match role {
            ADMIN_ROLE => Some(PrivilegedRole::Admin),
            COORDINATOR_ROLE => Some(PrivilegedRole::Coordinator),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivilegedRole::Admin => ADMIN_ROLE,
            PrivilegedRole::Coordinator => COORDINATOR_ROLE,
        }
    }
}

pub fn can_configure_permissions(role: &str) -> bool {
    PrivilegedRole::from_role(role).is_some()
}
