use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workhub_core::{CompanyId, DomainError, DomainResult, EventId, UserId, require_text};

/// Which calendar an event lives on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    /// Company-wide; owned by no user.
    General,
    /// Visible to its owner only.
    Personal,
}

impl CalendarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarType::General => "general",
            CalendarType::Personal => "personal",
        }
    }
}

impl FromStr for CalendarType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(CalendarType::General),
            "personal" => Ok(CalendarType::Personal),
            _ => Err(DomainError::validation("calendar_type must be one of: general, personal")),
        }
    }
}

/// A calendar event.
///
/// # Invariants
/// - `Personal` ⇒ `owner_id` is the creating user.
/// - `General` ⇒ `owner_id` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub place: Option<String>,
    pub notes: Option<String>,
    pub calendar_type: CalendarType,
    pub company_id: CompanyId,
    pub owner_id: Option<UserId>,
}

/// Validated event input, not yet bound to a tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub place: Option<String>,
    pub notes: Option<String>,
    pub calendar_type: CalendarType,
}

impl NewEvent {
    pub fn new(
        title: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        place: Option<String>,
        notes: Option<String>,
        calendar_type: &str,
    ) -> DomainResult<Self> {
        let calendar_type = calendar_type.parse()?;
        let title = require_text("title", title)?;
        if end_time < start_time {
            return Err(DomainError::validation("end_time must not precede start_time"));
        }
        Ok(Self {
            title,
            start_time,
            end_time,
            place,
            notes,
            calendar_type,
        })
    }

    /// Bind to the creator's company; personal events are owned by the creator.
    pub fn into_event(self, company_id: CompanyId, creator: UserId) -> Event {
        let owner_id = match self.calendar_type {
            CalendarType::General => None,
            CalendarType::Personal => Some(creator),
        };
        Event {
            id: EventId::new(),
            title: self.title,
            start_time: self.start_time,
            end_time: self.end_time,
            place: self.place,
            notes: self.notes,
            calendar_type: self.calendar_type,
            company_id,
            owner_id,
        }
    }
}
