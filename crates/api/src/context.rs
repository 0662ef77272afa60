use workhub_auth::{Principal, Role};
use workhub_core::{CompanyId, UserId};

/// Authenticated caller for a request.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn user_id(&self) -> UserId {
        self.principal.user_id
    }

    pub fn company_id(&self) -> CompanyId {
        self.principal.company_id
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }
}
