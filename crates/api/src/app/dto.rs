use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use workhub_auth::{Company, Principal, Role, User};
use workhub_core::{CompanyId, DomainResult, UserId};
use workhub_notebooks::NotePatch;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(default, rename = "companyName", alias = "company_name")]
    pub company_name: Option<String>,
    #[serde(default, rename = "companyCode", alias = "company_code")]
    pub company_code: Option<String>,
}

impl From<SignupRequest> for workhub_infra::SignupRequest {
    fn from(r: SignupRequest) -> Self {
        Self {
            email: r.email,
            password: r.password,
            role: r.role,
            company_name: r.company_name,
            company_code: r.company_code,
        }
    }
}

/// OAuth2 password-form shape; `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn general() -> String {
    "general".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "general")]
    pub calendar_type: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<String>,
    pub assignee_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusQuery {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateNotebookRequest {
    pub name: String,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl From<UpdateNoteRequest> for NotePatch {
    fn from(r: UpdateNoteRequest) -> Self {
        Self {
            title: r.title,
            content: r.content,
            color: r.color,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub company_id: CompanyId,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            role: u.role,
            company_id: u.company_id,
        }
    }
}

impl From<&Principal> for UserResponse {
    fn from(p: &Principal) -> Self {
        Self {
            id: p.user_id,
            email: p.email.clone(),
            role: p.role,
            company_id: p.company_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: UserId,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: CompanyId,
    pub name: String,
    /// Join code; disclosed to owners only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_code: Option<String>,
}

impl CompanyResponse {
    pub fn for_viewer(company: Company, viewer: &Principal) -> Self {
        Self {
            id: company.id,
            name: company.name,
            company_code: viewer.is_owner().then(|| company.company_code.into_inner()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub fn message(message: &'static str) -> MessageResponse {
    MessageResponse { message }
}

/// Used by handlers to turn a trimmed request string into an enum or id.
pub fn parse_field<T>(raw: &str) -> DomainResult<T>
where
    T: core::str::FromStr<Err = workhub_core::DomainError>,
{
    raw.parse()
}
