use core::str::FromStr;

use serde::{Deserialize, Serialize};

use workhub_core::DomainError;

/// Role of a user within its company.
///
/// Closed on purpose: every policy rule matches on it exhaustively, so a new
/// role cannot slip past a check that was written for two.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Employee => "employee",
        }
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "employee" => Ok(Role::Employee),
            _ => Err(DomainError::validation("role must be one of: owner, employee")),
        }
    }
}
