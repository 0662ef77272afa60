//! Tenant entities: companies and their users.
//!
//! # Invariants
//! - A user belongs to exactly one company once created.
//! - A user's role never changes after creation.
//! - Email addresses are unique across all companies.

use serde::{Deserialize, Serialize};

use workhub_core::{CompanyId, DomainError, DomainResult, UserId};

use crate::{CompanyCode, Principal, Role};

/// A tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub company_code: CompanyCode,
}

impl Company {
    pub fn new(name: String, company_code: CompanyCode) -> Self {
        Self {
            id: CompanyId::new(),
            name,
            company_code,
        }
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub role: Role,
    pub company_id: CompanyId,
}

impl User {
    pub fn new(email: String, hashed_password: String, role: Role, company_id: CompanyId) -> Self {
        Self {
            id: UserId::new(),
            email,
            hashed_password,
            role,
            company_id,
        }
    }

    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.id,
            email: self.email.clone(),
            role: self.role,
            company_id: self.company_id,
        }
    }
}

/// Canonical form of an email address for storage and lookup.
///
/// Only a structural sanity check is made: one `@` with text on both sides.
pub fn normalize_email(input: &str) -> DomainResult<String> {
    let email = input.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(DomainError::validation("email address is malformed")),
    }
}
