//! `workhub-auth` — identity and credentials, decoupled from HTTP and storage.
//!
//! - password hashing (`argon2`)
//! - signed session tokens (`jsonwebtoken`, HS256)
//! - company join-codes (OS randomness)
//! - the tenant entities (`Company`, `User`) and the authenticated `Principal`

pub mod company_code;
pub mod password;
pub mod principal;
pub mod roles;
pub mod token;
pub mod user;

pub use company_code::CompanyCode;
pub use password::{PasswordError, hash_password, verify_password};
pub use principal::Principal;
pub use roles::Role;
pub use token::{DEFAULT_TOKEN_TTL_MINUTES, TokenClaims, TokenError, TokenService};
pub use user::{Company, User, normalize_email};
