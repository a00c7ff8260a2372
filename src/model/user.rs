use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Manager,
    Employee,
}

/// Pre-authenticated caller identity, supplied by the auth collaborator.
/// The core never sees credentials, only the resolved id and role.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: u64,
    pub role: Role,
}

impl Actor {
    pub fn manager(user_id: u64) -> Self {
        Self { user_id, role: Role::Manager }
    }

    pub fn employee(user_id: u64) -> Self {
        Self { user_id, role: Role::Employee }
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }
}
