use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workhub_core::{DomainError, DomainResult, NoteId, NotebookId};

pub const DEFAULT_COLOR: &str = "white";

/// How the presentation layer should render `content`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    #[default]
    Text,
    Checklist,
    Photo,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Text => "text",
            NoteType::Checklist => "checklist",
            NoteType::Photo => "photo",
        }
    }
}

impl FromStr for NoteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(NoteType::Text),
            "checklist" => Ok(NoteType::Checklist),
            "photo" => Ok(NoteType::Photo),
            _ => Err(DomainError::validation("type must be one of: text, checklist, photo")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: NoteType,
    /// Opaque payload (plain text, or a JSON document for checklists).
    pub content: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub notebook_id: NotebookId,
}

impl Note {
    /// Apply a partial update. `updated_at` moves even when nothing else does.
    pub fn apply(&mut self, patch: NotePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(content) = patch.content {
            self.content = Some(content);
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        self.updated_at = now.max(self.created_at);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: Option<String>,
    pub kind: NoteType,
    pub content: Option<String>,
    pub color: String,
}

impl NewNote {
    pub fn new(
        title: Option<String>,
        kind: Option<&str>,
        content: Option<String>,
        color: Option<String>,
    ) -> DomainResult<Self> {
        let kind = match kind {
            Some(k) => k.parse()?,
            None => NoteType::default(),
        };
        Ok(Self {
            title,
            kind,
            content,
            color: color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        })
    }

    pub fn into_note(self, notebook_id: NotebookId, now: DateTime<Utc>) -> Note {
        Note {
            id: NoteId::new(),
            title: self.title,
            kind: self.kind,
            content: self.content,
            color: self.color,
            created_at: now,
            updated_at: now,
            notebook_id,
        }
    }
}

/// Partial note update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub color: Option<String>,
}
