//! `workhub-core` — identifiers and the error taxonomy shared by every hub crate.
//!
//! This crate contains no IO and no policy.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult, require_text};
pub use id::{CompanyId, EventId, NoteId, NotebookId, TaskId, TransactionId, UserId};
