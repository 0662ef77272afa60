//! Persistence for the hub.
//!
//! [`HubStore`] is the only way services touch data. Read methods take a
//! scope from `workhub-access` rather than raw ids, so every backend filters
//! with the same predicates the policy layer reasons about.
//!
//! Multi-row writes (signup pair, cascade deletes) are atomic in every
//! implementation.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use workhub_access::{EventScope, MemberScope, NotebookScope, TaskScope, TransactionScope};
use workhub_auth::{Company, CompanyCode, User};
use workhub_calendar::{Event, Task, TaskStatus};
use workhub_core::{CompanyId, DomainError, EventId, NoteId, NotebookId, TaskId, UserId};
use workhub_finance::{DateWindow, Transaction};
use workhub_notebooks::{Note, Notebook};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryHubStore;
pub use postgres::PostgresHubStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique index rejected the write; carries the conflicting field.
    #[error("{0} already exists")]
    UniqueViolation(&'static str),

    #[error("store backend failure: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::UniqueViolation(field) => DomainError::conflict(format!("{field} already exists")),
            StoreError::Backend(msg) => DomainError::storage(msg),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait HubStore: Send + Sync {
    // --- companies & users ---

    async fn company_code_exists(&self, code: &CompanyCode) -> StoreResult<bool>;
    async fn company_by_code(&self, code: &CompanyCode) -> StoreResult<Option<Company>>;
    async fn company(&self, id: CompanyId) -> StoreResult<Option<Company>>;
    /// Insert a company and its first owner; both rows or neither.
    async fn create_company_with_owner(&self, company: &Company, owner: &User) -> StoreResult<()>;
    async fn insert_user(&self, user: &User) -> StoreResult<()>;
    async fn user(&self, id: UserId) -> StoreResult<Option<User>>;
    /// Lookup by already-normalized email.
    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn members(&self, scope: MemberScope) -> StoreResult<Vec<User>>;
    /// Remove a user and everything it owns. Returns `false` when absent.
    async fn delete_user(&self, id: UserId) -> StoreResult<bool>;
    /// Remove a company, its members and every company-scoped row.
    async fn delete_company(&self, id: CompanyId) -> StoreResult<bool>;

    // --- calendar ---

    async fn insert_event(&self, event: &Event) -> StoreResult<()>;
    async fn event(&self, id: EventId) -> StoreResult<Option<Event>>;
    /// Ordered by start time.
    async fn events(&self, scope: EventScope) -> StoreResult<Vec<Event>>;
    async fn delete_event(&self, id: EventId) -> StoreResult<bool>;

    async fn insert_task(&self, task: &Task) -> StoreResult<()>;
    async fn task(&self, id: TaskId) -> StoreResult<Option<Task>>;
    /// Ordered by due date.
    async fn tasks(&self, scope: TaskScope) -> StoreResult<Vec<Task>>;
    async fn set_task_status(&self, id: TaskId, status: TaskStatus) -> StoreResult<Option<Task>>;

    // --- finance ---

    async fn insert_transaction(&self, tx: &Transaction) -> StoreResult<()>;
    /// Newest date first; `window` narrows to whole calendar days.
    async fn transactions(
        &self,
        scope: TransactionScope,
        window: Option<DateWindow>,
    ) -> StoreResult<Vec<Transaction>>;

    // --- notebooks ---

    async fn insert_notebook(&self, notebook: &Notebook) -> StoreResult<()>;
    async fn notebook(&self, id: NotebookId) -> StoreResult<Option<Notebook>>;
    async fn notebooks(&self, scope: NotebookScope) -> StoreResult<Vec<Notebook>>;
    /// Remove a notebook together with its notes.
    async fn delete_notebook(&self, id: NotebookId) -> StoreResult<bool>;

    async fn insert_note(&self, note: &Note) -> StoreResult<()>;
    async fn note(&self, id: NoteId) -> StoreResult<Option<Note>>;
    /// Newest first.
    async fn notes(&self, notebook_id: NotebookId) -> StoreResult<Vec<Note>>;
    async fn update_note(&self, note: &Note) -> StoreResult<bool>;
    async fn delete_note(&self, id: NoteId) -> StoreResult<bool>;
}

#[async_trait]
impl<S> HubStore for Arc<S>
where
    S: HubStore + ?Sized,
{
    async fn company_code_exists(&self, code: &CompanyCode) -> StoreResult<bool> {
        (**self).company_code_exists(code).await
    }

    async fn company_by_code(&self, code: &CompanyCode) -> StoreResult<Option<Company>> {
        (**self).company_by_code(code).await
    }

    async fn company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        (**self).company(id).await
    }

    async fn create_company_with_owner(&self, company: &Company, owner: &User) -> StoreResult<()> {
        (**self).create_company_with_owner(company, owner).await
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        (**self).insert_user(user).await
    }

    async fn user(&self, id: UserId) -> StoreResult<Option<User>> {
        (**self).user(id).await
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        (**self).user_by_email(email).await
    }

    async fn members(&self, scope: MemberScope) -> StoreResult<Vec<User>> {
        (**self).members(scope).await
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<bool> {
        (**self).delete_user(id).await
    }

    async fn delete_company(&self, id: CompanyId) -> StoreResult<bool> {
        (**self).delete_company(id).await
    }

    async fn insert_event(&self, event: &Event) -> StoreResult<()> {
        (**self).insert_event(event).await
    }

    async fn event(&self, id: EventId) -> StoreResult<Option<Event>> {
        (**self).event(id).await
    }

    async fn events(&self, scope: EventScope) -> StoreResult<Vec<Event>> {
        (**self).events(scope).await
    }

    async fn delete_event(&self, id: EventId) -> StoreResult<bool> {
        (**self).delete_event(id).await
    }

    async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        (**self).insert_task(task).await
    }

    async fn task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        (**self).task(id).await
    }

    async fn tasks(&self, scope: TaskScope) -> StoreResult<Vec<Task>> {
        (**self).tasks(scope).await
    }

    async fn set_task_status(&self, id: TaskId, status: TaskStatus) -> StoreResult<Option<Task>> {
        (**self).set_task_status(id, status).await
    }

    async fn insert_transaction(&self, tx: &Transaction) -> StoreResult<()> {
        (**self).insert_transaction(tx).await
    }

    async fn transactions(
        &self,
        scope: TransactionScope,
        window: Option<DateWindow>,
    ) -> StoreResult<Vec<Transaction>> {
        (**self).transactions(scope, window).await
    }

    async fn insert_notebook(&self, notebook: &Notebook) -> StoreResult<()> {
        (**self).insert_notebook(notebook).await
    }

    async fn notebook(&self, id: NotebookId) -> StoreResult<Option<Notebook>> {
        (**self).notebook(id).await
    }

    async fn notebooks(&self, scope: NotebookScope) -> StoreResult<Vec<Notebook>> {
        (**self).notebooks(scope).await
    }

    async fn delete_notebook(&self, id: NotebookId) -> StoreResult<bool> {
        (**self).delete_notebook(id).await
    }

    async fn insert_note(&self, note: &Note) -> StoreResult<()> {
        (**self).insert_note(note).await
    }

    async fn note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        (**self).note(id).await
    }

    async fn notes(&self, notebook_id: NotebookId) -> StoreResult<Vec<Note>> {
        (**self).notes(notebook_id).await
    }

    async fn update_note(&self, note: &Note) -> StoreResult<bool> {
        (**self).update_note(note).await
    }

    async fn delete_note(&self, id: NoteId) -> StoreResult<bool> {
        (**self).delete_note(id).await
    }
}
