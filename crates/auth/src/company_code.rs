//! Company join-codes.
//!
//! A code is a capability: anyone holding it can sign up into the company, so
//! it is drawn from the OS random source, never from a seeded PRNG.

use rand::Rng;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

pub const COMPANY_CODE_LENGTH: usize = 6;

pub const COMPANY_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Uppercase alphanumeric join-code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyCode(String);

impl CompanyCode {
    /// Draw a fresh 6-character code.
    pub fn generate() -> Self {
        Self::generate_with_length(COMPANY_CODE_LENGTH)
    }

    /// Draw each character uniformly from `[A-Z0-9]`.
    pub fn generate_with_length(length: usize) -> Self {
        let mut rng = OsRng;
        let code = (0..length)
            .map(|_| COMPANY_CODE_ALPHABET[rng.gen_range(0..COMPANY_CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Normalise user input for lookup: surrounding whitespace dropped, uppercased.
    pub fn from_input(input: &str) -> Self {
        Self(input.trim().to_ascii_uppercase())
    }

    /// Wrap a code loaded from storage as-is.
    pub fn from_stored(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for CompanyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
