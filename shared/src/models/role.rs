//! Role Model

use serde::{Deserialize, Serialize};

/// Permission granting every action
pub const ALL_PERMISSIONS: &str = "*";

/// Role entity (RBAC)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Permission strings (e.g. ["*"], ["citas:*", "caja:close"])
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Role {
    /// Whether this role grants `permission`
    ///
    /// `"*"` grants everything, `"citas:*"` every action on `citas`.
    /// Inactive roles grant nothing.
    pub fn allows(&self, permission: &str) -> bool {
        if !self.is_active {
            return false;
        }
        let resource = permission.split(':').next().unwrap_or(permission);
        self.permissions.iter().any(|granted| {
            granted == ALL_PERMISSIONS
                || granted == permission
                || granted
                    .strip_suffix(":*")
                    .is_some_and(|prefix| prefix == resource)
        })
    }
}
