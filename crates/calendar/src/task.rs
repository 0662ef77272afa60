use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workhub_core::{CompanyId, DomainError, DomainResult, TaskId, UserId, require_text};

/// Task progress.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To-Do")]
    ToDo,
    #[serde(rename = "Ongoing")]
    Ongoing,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To-Do",
            TaskStatus::Ongoing => "Ongoing",
            TaskStatus::Done => "Done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To-Do" => Ok(TaskStatus::ToDo),
            "Ongoing" => Ok(TaskStatus::Ongoing),
            "Done" => Ok(TaskStatus::Done),
            _ => Err(DomainError::validation("status must be one of: To-Do, Ongoing, Done")),
        }
    }
}

/// A task an owner assigned to a member of the same company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    /// Creator; always an owner.
    pub owner_id: UserId,
    pub assignee_id: UserId,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub assignee_id: UserId,
}

impl NewTask {
    pub fn new(
        title: &str,
        due_date: DateTime<Utc>,
        status: Option<&str>,
        assignee_id: UserId,
    ) -> DomainResult<Self> {
        let status = match status {
            Some(s) => s.parse()?,
            None => TaskStatus::default(),
        };
        Ok(Self {
            title: require_text("title", title)?,
            due_date,
            status,
            assignee_id,
        })
    }

    pub fn into_task(self, company_id: CompanyId, creator: UserId) -> Task {
        Task {
            id: TaskId::new(),
            title: self.title,
            status: self.status,
            due_date: self.due_date,
            owner_id: creator,
            assignee_id: self.assignee_id,
            company_id,
        }
    }
}
