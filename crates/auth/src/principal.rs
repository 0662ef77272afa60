use serde::Serialize;

use workhub_core::{CompanyId, UserId};

use crate::Role;

/// A fully resolved caller for authorization decisions.
///
/// Built from a verified token plus the stored user row; never from token
/// claims alone, so a deleted user cannot keep acting on a live token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    #[serde(rename = "id")]
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub company_id: CompanyId,
}

impl Principal {
    pub fn is_owner(&self) -> bool {
        self.role.is_owner()
    }
}
