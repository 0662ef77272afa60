//! Domain error model.

use thiserror::Error;

/// Result type used across the hub crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// Caller-visible failure taxonomy.
///
/// Every operation fails with exactly one of these, once. Nothing is retried
/// and nothing is swallowed on the way to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input (unknown enumeration value, blank name, bad window).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Missing, invalid or expired credential.
    ///
    /// The message never says whether the email existed or the token expired.
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated, inside the caller's tenant, but the role does not allow it.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Absent, or outside the caller's visible scope.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Duplicate email, unknown company code, exhausted code allocation.
    #[error("{0}")]
    Conflict(String),

    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(what: &'static str) -> Self {
        Self::NotFound(what)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Reject blank text fields, returning the trimmed value.
pub fn require_text(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
