//! Feature services.
//!
//! Each operation follows the same shape:
//!
//! ```text
//! Principal + request
//!   ↓
//! 1. validate input (domain constructors)
//!   ↓
//! 2. load the target, if any
//!   ↓
//! 3. policy check (writes) / scope check (reads)
//!   ↓
//! 4. store call
//! ```
//!
//! Services hold no state besides the store and the token service.

use tracing::warn;

use workhub_access::{Action, authorize};
use workhub_auth::{Principal, TokenService};
use workhub_core::DomainResult;

use crate::store::HubStore;

mod calendar;
mod finance;
mod membership;
mod notebooks;

pub use calendar::CalendarFeed;
pub use membership::{MAX_CODE_ATTEMPTS, Session, SignupRequest};
pub use notebooks::NotebookView;

pub struct HubServices<S> {
    store: S,
    tokens: TokenService,
}

impl<S: HubStore> HubServices<S> {
    pub fn new(store: S, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}

/// Run the policy and log denials.
fn guard(principal: &Principal, action: &Action<'_>) -> DomainResult<()> {
    authorize(principal, action).map_err(|denial| {
        warn!(
            user_id = %principal.user_id,
            company_id = %principal.company_id,
            role = %principal.role,
            %denial,
            "policy denied request"
        );
        denial.into()
    })
}
