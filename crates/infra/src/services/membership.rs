use tracing::{info, warn};

use workhub_access::{Action, MemberScope};
use workhub_auth::{
    Company, CompanyCode, Principal, Role, User, hash_password, normalize_email, verify_password,
};
use workhub_core::{DomainError, DomainResult, require_text};

use super::{HubServices, guard};
use crate::store::{HubStore, StoreError};

/// Upper bound on fresh company-code draws before signup gives up.
pub const MAX_CODE_ATTEMPTS: usize = 16;

const BAD_CREDENTIALS: &str = "Incorrect email or password";
const BAD_TOKEN: &str = "Could not validate credentials";
const EMAIL_TAKEN: &str = "Email already registered";

#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    /// Required for owners.
    pub company_name: Option<String>,
    /// Required for employees; matched case-insensitively.
    pub company_code: Option<String>,
}

/// A freshly issued credential.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub principal: Principal,
}

impl<S: HubStore> HubServices<S> {
    /// Register a user. Owners found a new company; employees join one by code.
    pub async fn signup(&self, req: SignupRequest) -> DomainResult<User> {
        let email = normalize_email(&req.email)?;
        let role: Role = req.role.parse()?;
        if req.password.is_empty() {
            return Err(DomainError::validation("password must not be empty"));
        }
        if self.store.user_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict(EMAIL_TAKEN));
        }

        let user = match role {
            Role::Owner => {
                let name = req
                    .company_name
                    .as_deref()
                    .ok_or_else(|| DomainError::validation("Company name is required for owners"))?;
                let name = require_text("company name", name)?;
                let code = self.allocate_company_code().await?;
                let company = Company::new(name, code);
                let owner = User::new(email, self.hash(&req.password)?, Role::Owner, company.id);
                self.store
                    .create_company_with_owner(&company, &owner)
                    .await
                    .map_err(signup_conflict)?;
                info!(user_id = %owner.id, company_id = %company.id, "company created");
                owner
            }
            Role::Employee => {
                let raw = req
                    .company_code
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .ok_or_else(|| DomainError::validation("Company code is required for employees"))?;
                let code = CompanyCode::from_input(raw);
                let company = self
                    .store
                    .company_by_code(&code)
                    .await?
                    .ok_or_else(|| DomainError::conflict("Invalid company code"))?;
                let employee = User::new(email, self.hash(&req.password)?, Role::Employee, company.id);
                self.store.insert_user(&employee).await.map_err(signup_conflict)?;
                info!(user_id = %employee.id, company_id = %company.id, "employee joined company");
                employee
            }
        };
        Ok(user)
    }

    /// Draw company codes until one is unused.
    pub async fn allocate_company_code(&self) -> DomainResult<CompanyCode> {
        self.allocate_company_code_from(CompanyCode::generate).await
    }

    /// Same as [`Self::allocate_company_code`] with an explicit code source.
    pub async fn allocate_company_code_from(
        &self,
        mut draw: impl FnMut() -> CompanyCode + Send,
    ) -> DomainResult<CompanyCode> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = draw();
            if !self.store.company_code_exists(&code).await? {
                return Ok(code);
            }
            warn!(attempt, "company code collision; drawing again");
        }
        Err(DomainError::conflict("could not allocate a unique company code"))
    }

    /// Check credentials. Unknown email and wrong password are indistinguishable.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let found = match normalize_email(email) {
            Ok(email) => self.store.user_by_email(&email).await?,
            Err(_) => None,
        };
        match found {
            Some(user) if verify_password(password, &user.hashed_password) => Ok(user),
            _ => {
                warn!("login rejected");
                Err(DomainError::unauthenticated(BAD_CREDENTIALS))
            }
        }
    }

    /// Authenticate and issue a session token with the default lifetime.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Session> {
        let user = self.authenticate(email, password).await?;
        let principal = user.principal();
        let access_token = self
            .tokens
            .issue(&principal, None)
            .map_err(|e| DomainError::storage(e.to_string()))?;
        info!(user_id = %principal.user_id, company_id = %principal.company_id, "login succeeded");
        Ok(Session { access_token, principal })
    }

    /// Turn a presented token into the principal it names.
    ///
    /// The user is re-read from the store so deleted accounts stop working
    /// before their tokens expire.
    pub async fn resolve_principal(&self, token: &str) -> DomainResult<Principal> {
        let claims = self
            .tokens
            .verify(token)
            .ok_or_else(|| DomainError::unauthenticated(BAD_TOKEN))?;
        match self.store.user(claims.id).await? {
            Some(user) if user.email == claims.sub => Ok(user.principal()),
            _ => Err(DomainError::unauthenticated(BAD_TOKEN)),
        }
    }

    /// Employees of the caller's company. Owners only.
    pub async fn employees(&self, principal: &Principal) -> DomainResult<Vec<User>> {
        guard(principal, &Action::ListEmployees)?;
        Ok(self.store.members(MemberScope::employees_of(principal)).await?)
    }

    pub async fn company(&self, principal: &Principal) -> DomainResult<Company> {
        self.store
            .company(principal.company_id)
            .await?
            .ok_or(DomainError::not_found("company"))
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password).map_err(|e| DomainError::storage(e.to_string()))
    }
}

fn signup_conflict(err: StoreError) -> DomainError {
    match err {
        StoreError::UniqueViolation("email") => DomainError::conflict(EMAIL_TAKEN),
        other => other.into(),
    }
}
