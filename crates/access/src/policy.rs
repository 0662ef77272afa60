//! Authorization policy.
//!
//! Denials come in two kinds and the split is the uniform-denial convention
//! of the hub:
//! - [`AuthzError::OutOfScope`]: the target is in another tenant, or is a
//!   same-tenant record the caller cannot even see. Reported as not-found.
//! - [`AuthzError::Forbidden`]: the caller can see the target (or the action
//!   is tenant-local) but its role does not allow the action.

use thiserror::Error;

use workhub_auth::{Principal, Role, User};
use workhub_calendar::{CalendarType, Event, Task};
use workhub_core::DomainError;
use workhub_finance::TransactionType;
use workhub_notebooks::Notebook;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("{0} is outside the caller's scope")]
    OutOfScope(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),
}

impl From<AuthzError> for DomainError {
    fn from(value: AuthzError) -> Self {
        match value {
            AuthzError::OutOfScope(what) => DomainError::not_found(what),
            AuthzError::Forbidden(reason) => DomainError::forbidden(reason),
        }
    }
}

/// Everything a principal can ask to do, with the facts the decision needs.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    CreateEvent(CalendarType),
    DeleteEvent(&'a Event),
    /// `None` when the requested assignee does not exist.
    CreateTask { assignee: Option<&'a User> },
    UpdateTaskStatus(&'a Task),
    CreateTransaction(TransactionType),
    ViewDashboard,
    ListEmployees,
    /// Create, read, update or delete a notebook or any note inside it.
    AccessNotebook(&'a Notebook),
}

/// Decide whether `principal` may perform `action`.
pub fn authorize(principal: &Principal, action: &Action<'_>) -> Result<(), AuthzError> {
    match *action {
        Action::CreateEvent(CalendarType::Personal) => Ok(()),
        Action::CreateEvent(CalendarType::General) => match principal.role {
            Role::Owner => Ok(()),
            Role::Employee => Err(AuthzError::Forbidden("only owners can create general events")),
        },

        Action::DeleteEvent(event) => match event.calendar_type {
            CalendarType::Personal => {
                if event.owner_id == Some(principal.user_id) {
                    Ok(())
                } else {
                    Err(AuthzError::OutOfScope("event"))
                }
            }
            CalendarType::General => {
                if event.company_id != principal.company_id {
                    return Err(AuthzError::OutOfScope("event"));
                }
                match principal.role {
                    Role::Owner => Ok(()),
                    Role::Employee => Err(AuthzError::Forbidden("only owners can delete general events")),
                }
            }
        },

        // Assignee role is unchecked; owners can be assigned tasks too.
        Action::CreateTask { assignee } => match principal.role {
            Role::Employee => Err(AuthzError::Forbidden("only owners can create tasks")),
            Role::Owner => match assignee {
                Some(a) if a.company_id == principal.company_id => Ok(()),
                _ => Err(AuthzError::OutOfScope("assignee")),
            },
        },

        Action::UpdateTaskStatus(task) => {
            if task.company_id != principal.company_id {
                return Err(AuthzError::OutOfScope("task"));
            }
            match principal.role {
                Role::Owner => Ok(()),
                Role::Employee if task.assignee_id == principal.user_id => Ok(()),
                Role::Employee => Err(AuthzError::OutOfScope("task")),
            }
        }

        Action::CreateTransaction(TransactionType::Expense) => Ok(()),
        Action::CreateTransaction(TransactionType::Income) => match principal.role {
            Role::Owner => Ok(()),
            Role::Employee => Err(AuthzError::Forbidden("only owners can add income")),
        },

        Action::ViewDashboard => match principal.role {
            Role::Owner => Ok(()),
            Role::Employee => Err(AuthzError::Forbidden("only owners can view company financials")),
        },

        Action::ListEmployees => match principal.role {
            Role::Owner => Ok(()),
            Role::Employee => Err(AuthzError::Forbidden("only owners can list employees")),
        },

        Action::AccessNotebook(notebook) => {
            if notebook.company_id == principal.company_id {
                Ok(())
            } else {
                Err(AuthzError::OutOfScope("notebook"))
            }
        }
    }
}
