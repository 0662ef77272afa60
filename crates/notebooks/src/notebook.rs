use serde::{Deserialize, Serialize};

use workhub_core::{CompanyId, DomainResult, NotebookId, UserId, require_text};

pub const DEFAULT_COVER: &str = "blue";

/// A notebook shared by everyone in its company.
///
/// `owner_id` records the creator; it grants nothing beyond what the rest of
/// the company already has, and is cleared when the creator is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: NotebookId,
    pub name: String,
    /// Display tag (CSS class or hex colour); opaque here.
    pub cover: String,
    pub company_id: CompanyId,
    pub owner_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotebook {
    pub name: String,
    pub cover: String,
}

impl NewNotebook {
    pub fn new(name: &str, cover: Option<String>) -> DomainResult<Self> {
        Ok(Self {
            name: require_text("name", name)?,
            cover: cover
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COVER.to_string()),
        })
    }

    pub fn into_notebook(self, company_id: CompanyId, creator: UserId) -> Notebook {
        Notebook {
            id: NotebookId::new(),
            name: self.name,
            cover: self.cover,
            company_id,
            owner_id: Some(creator),
        }
    }
}
