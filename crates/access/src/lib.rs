//! `workhub-access` — the authorization and tenant-scoping rules of the hub.
//!
//! Two halves, both pure (no IO, no hidden state):
//! - [`policy`]: given a principal and an action, allow or deny.
//! - [`scope`]: for each readable resource, the predicate that defines what a
//!   principal may see. List and single-item reads share the same predicate.

pub mod policy;
pub mod scope;

pub use policy::{Action, AuthzError, authorize};
pub use scope::{EventScope, MemberScope, NotebookScope, TaskScope, TransactionScope};
