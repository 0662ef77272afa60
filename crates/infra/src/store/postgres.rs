//! Postgres-backed hub store.
//!
//! ## Error Mapping
//!
//! | SQLx error | PostgreSQL code | `StoreError` |
//! |---|---|---|
//! | Database (unique violation) | `23505` | `UniqueViolation(field)` |
//! | anything else | any | `Backend` |
//!
//! ## Tenant Isolation
//!
//! List queries are generated from the access scopes; there is no unscoped
//! list method. Single-row reads return the row as stored and the service
//! layer applies the same scope predicate before handing it out.
//!
//! ## Atomicity
//!
//! The signup pair and every cascade delete run inside one SQL transaction.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use workhub_access::{EventScope, MemberScope, NotebookScope, TaskScope, TransactionScope};
use workhub_auth::{Company, CompanyCode, User};
use workhub_calendar::{Event, Task, TaskStatus};
use workhub_core::{CompanyId, EventId, NoteId, NotebookId, TaskId, TransactionId, UserId};
use workhub_finance::{Amount, DateWindow, Transaction};
use workhub_notebooks::{Note, Notebook};

use super::{HubStore, StoreError, StoreResult};

const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

/// Children first; every statement binds the user id as `$1`. Company
/// notebooks are kept and lose their creator.
const DELETE_USER_TREE: &[&str] = &[
    "UPDATE notebooks SET owner_id = NULL WHERE owner_id = $1",
    "DELETE FROM events WHERE owner_id = $1",
    "DELETE FROM tasks WHERE owner_id = $1 OR assignee_id = $1",
    "DELETE FROM transactions WHERE user_id = $1",
    "DELETE FROM users WHERE id = $1",
];

/// Children first; every statement binds the company id as `$1`.
const DELETE_COMPANY_TREE: &[&str] = &[
    "DELETE FROM notes WHERE notebook_id IN (SELECT id FROM notebooks WHERE company_id = $1)",
    "DELETE FROM notebooks WHERE company_id = $1",
    "DELETE FROM events WHERE company_id = $1",
    "DELETE FROM tasks WHERE company_id = $1",
    "DELETE FROM transactions WHERE company_id = $1",
    "DELETE FROM users WHERE company_id = $1",
    "DELETE FROM companies WHERE id = $1",
];

#[derive(Debug, Clone)]
pub struct PostgresHubStore {
    pool: Arc<PgPool>,
}

impl PostgresHubStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    /// Open a pool against `url`.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Apply the schema. Idempotent.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }

    async fn delete_tree(&self, operation: &str, statements: &[&str], id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error(operation, e))?;
        let mut last = 0;
        for sql in statements {
            last = sqlx::query(sql)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error(operation, e))?
                .rows_affected();
        }
        tx.commit().await.map_err(|e| map_sqlx_error(operation, e))?;
        Ok(last > 0)
    }
}

#[async_trait]
impl HubStore for PostgresHubStore {
    async fn company_code_exists(&self, code: &CompanyCode) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM companies WHERE company_code = $1)")
            .bind(code.as_str())
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("company_code_exists", e))
    }

    async fn company_by_code(&self, code: &CompanyCode) -> StoreResult<Option<Company>> {
        let row = sqlx::query("SELECT id, name, company_code FROM companies WHERE company_code = $1")
            .bind(code.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("company_by_code", e))?;
        row.as_ref().map(company_from_row).transpose()
    }

    async fn company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        let row = sqlx::query("SELECT id, name, company_code FROM companies WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("company", e))?;
        row.as_ref().map(company_from_row).transpose()
    }

    #[instrument(skip(self, company, owner), fields(company_id = %company.id, user_id = %owner.id), err)]
    async fn create_company_with_owner(&self, company: &Company, owner: &User) -> StoreResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("create_company_with_owner", e))?;

        sqlx::query("INSERT INTO companies (id, name, company_code) VALUES ($1, $2, $3)")
            .bind(company.id.as_uuid())
            .bind(&company.name)
            .bind(company.company_code.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("create_company_with_owner", e))?;

        insert_user_query(owner)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("create_company_with_owner", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("create_company_with_owner", e))
    }

    #[instrument(skip(self, user), fields(company_id = %user.company_id, user_id = %user.id), err)]
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        insert_user_query(user)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_user", e))?;
        Ok(())
    }

    async fn user(&self, id: UserId) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, hashed_password, role, company_id FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("user", e))?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, hashed_password, role, company_id FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("user_by_email", e))?;
        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip(self), fields(company_id = %scope.company_id), err)]
    async fn members(&self, scope: MemberScope) -> StoreResult<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, hashed_password, role, company_id
            FROM users
            WHERE company_id = $1 AND ($2::TEXT IS NULL OR role = $2)
            ORDER BY email
            "#,
        )
        .bind(scope.company_id.as_uuid())
        .bind(scope.role.map(|r| r.as_str()))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("members", e))?;
        rows.iter().map(user_from_row).collect()
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn delete_user(&self, id: UserId) -> StoreResult<bool> {
        self.delete_tree("delete_user", DELETE_USER_TREE, id.into()).await
    }

    #[instrument(skip(self), fields(company_id = %id), err)]
    async fn delete_company(&self, id: CompanyId) -> StoreResult<bool> {
        self.delete_tree("delete_company", DELETE_COMPANY_TREE, id.into()).await
    }

    #[instrument(skip(self, event), fields(company_id = %event.company_id, event_id = %event.id), err)]
    async fn insert_event(&self, event: &Event) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, start_time, end_time, place, notes, calendar_type, company_id, owner_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.place.as_deref())
        .bind(event.notes.as_deref())
        .bind(event.calendar_type.as_str())
        .bind(event.company_id.as_uuid())
        .bind(event.owner_id.map(Uuid::from))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_event", e))?;
        Ok(())
    }

    async fn event(&self, id: EventId) -> StoreResult<Option<Event>> {
        let row = sqlx::query(&format!("{EVENT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("event", e))?;
        row.as_ref().map(event_from_row).transpose()
    }

    #[instrument(skip(self), fields(company_id = %scope.company_id, user_id = %scope.user_id), err)]
    async fn events(&self, scope: EventScope) -> StoreResult<Vec<Event>> {
        let rows = sqlx::query(&format!(
            r#"{EVENT_COLUMNS}
            WHERE (calendar_type = 'general' AND company_id = $1)
               OR (calendar_type = 'personal' AND owner_id = $2)
            ORDER BY start_time, id"#
        ))
        .bind(scope.company_id.as_uuid())
        .bind(scope.user_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("events", e))?;
        rows.iter().map(event_from_row).collect()
    }

    #[instrument(skip(self), fields(event_id = %id), err)]
    async fn delete_event(&self, id: EventId) -> StoreResult<bool> {
        let done = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_event", e))?;
        Ok(done.rows_affected() > 0)
    }

    #[instrument(skip(self, task), fields(company_id = %task.company_id, task_id = %task.id), err)]
    async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, status, due_date, owner_id, assignee_id, company_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task.id.as_uuid())
        .bind(&task.title)
        .bind(task.status.as_str())
        .bind(task.due_date)
        .bind(task.owner_id.as_uuid())
        .bind(task.assignee_id.as_uuid())
        .bind(task.company_id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_task", e))?;
        Ok(())
    }

    async fn task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let row = sqlx::query(&format!("{TASK_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("task", e))?;
        row.as_ref().map(task_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn tasks(&self, scope: TaskScope) -> StoreResult<Vec<Task>> {
        let (company_id, assignee_id) = match scope {
            TaskScope::Company(company_id) => (company_id, None),
            TaskScope::Assignee { company_id, user_id } => (company_id, Some(user_id)),
        };
        let rows = sqlx::query(&format!(
            "{TASK_COLUMNS} WHERE company_id = $1 AND ($2::UUID IS NULL OR assignee_id = $2) ORDER BY due_date, id"
        ))
        .bind(company_id.as_uuid())
        .bind(assignee_id.map(Uuid::from))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("tasks", e))?;
        rows.iter().map(task_from_row).collect()
    }

    #[instrument(skip(self), fields(task_id = %id), err)]
    async fn set_task_status(&self, id: TaskId, status: TaskStatus) -> StoreResult<Option<Task>> {
        let row = sqlx::query(
            r#"
            UPDATE tasks SET status = $2
            WHERE id = $1
            RETURNING id, title, status, due_date, owner_id, assignee_id, company_id
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("set_task_status", e))?;
        row.as_ref().map(task_from_row).transpose()
    }

    #[instrument(skip(self, tx), fields(company_id = %tx.company_id, user_id = %tx.user_id), err)]
    async fn insert_transaction(&self, tx: &Transaction) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, amount, type, category, date, notes, user_id, company_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(tx.id.as_uuid())
        .bind(tx.amount.value())
        .bind(tx.kind.as_str())
        .bind(&tx.category)
        .bind(tx.date)
        .bind(tx.notes.as_deref())
        .bind(tx.user_id.as_uuid())
        .bind(tx.company_id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_transaction", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn transactions(
        &self,
        scope: TransactionScope,
        window: Option<DateWindow>,
    ) -> StoreResult<Vec<Transaction>> {
        let (company_id, user_id) = match scope {
            TransactionScope::Company(company_id) => (company_id, None),
            TransactionScope::Recorder { company_id, user_id } => (company_id, Some(user_id)),
        };
        let rows = sqlx::query(
            r#"
            SELECT id, amount, type, category, date, notes, user_id, company_id
            FROM transactions
            WHERE company_id = $1
              AND ($2::UUID IS NULL OR user_id = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR date >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR date < $4)
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(company_id.as_uuid())
        .bind(user_id.map(Uuid::from))
        .bind(window.map(|w| w.starts_at()))
        .bind(window.map(|w| w.ends_before()))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("transactions", e))?;
        rows.iter().map(transaction_from_row).collect()
    }

    #[instrument(skip(self, notebook), fields(company_id = %notebook.company_id, notebook_id = %notebook.id), err)]
    async fn insert_notebook(&self, notebook: &Notebook) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO notebooks (id, name, cover, company_id, owner_id) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(notebook.id.as_uuid())
        .bind(&notebook.name)
        .bind(&notebook.cover)
        .bind(notebook.company_id.as_uuid())
        .bind(notebook.owner_id.map(Uuid::from))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_notebook", e))?;
        Ok(())
    }

    async fn notebook(&self, id: NotebookId) -> StoreResult<Option<Notebook>> {
        let row = sqlx::query("SELECT id, name, cover, company_id, owner_id FROM notebooks WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("notebook", e))?;
        row.as_ref().map(notebook_from_row).transpose()
    }

    #[instrument(skip(self), fields(company_id = %scope.company_id), err)]
    async fn notebooks(&self, scope: NotebookScope) -> StoreResult<Vec<Notebook>> {
        let rows = sqlx::query(
            "SELECT id, name, cover, company_id, owner_id FROM notebooks WHERE company_id = $1 ORDER BY id",
        )
        .bind(scope.company_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("notebooks", e))?;
        rows.iter().map(notebook_from_row).collect()
    }

    #[instrument(skip(self), fields(notebook_id = %id), err)]
    async fn delete_notebook(&self, id: NotebookId) -> StoreResult<bool> {
        const STATEMENTS: &[&str] = &[
            "DELETE FROM notes WHERE notebook_id = $1",
            "DELETE FROM notebooks WHERE id = $1",
        ];
        self.delete_tree("delete_notebook", STATEMENTS, id.into()).await
    }

    #[instrument(skip(self, note), fields(notebook_id = %note.notebook_id, note_id = %note.id), err)]
    async fn insert_note(&self, note: &Note) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, title, type, content, color, created_at, updated_at, notebook_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(note.id.as_uuid())
        .bind(note.title.as_deref())
        .bind(note.kind.as_str())
        .bind(note.content.as_deref())
        .bind(&note.color)
        .bind(note.created_at)
        .bind(note.updated_at)
        .bind(note.notebook_id.as_uuid())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_note", e))?;
        Ok(())
    }

    async fn note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let row = sqlx::query(&format!("{NOTE_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("note", e))?;
        row.as_ref().map(note_from_row).transpose()
    }

    async fn notes(&self, notebook_id: NotebookId) -> StoreResult<Vec<Note>> {
        let rows = sqlx::query(&format!(
            "{NOTE_COLUMNS} WHERE notebook_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(notebook_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("notes", e))?;
        rows.iter().map(note_from_row).collect()
    }

    #[instrument(skip(self, note), fields(note_id = %note.id), err)]
    async fn update_note(&self, note: &Note) -> StoreResult<bool> {
        let done = sqlx::query(
            r#"
            UPDATE notes
            SET title = $2, content = $3, color = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(note.id.as_uuid())
        .bind(note.title.as_deref())
        .bind(note.content.as_deref())
        .bind(&note.color)
        .bind(note.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_note", e))?;
        Ok(done.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(note_id = %id), err)]
    async fn delete_note(&self, id: NoteId) -> StoreResult<bool> {
        let done = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_note", e))?;
        Ok(done.rows_affected() > 0)
    }
}

const EVENT_COLUMNS: &str = "SELECT id, title, start_time, end_time, place, notes, calendar_type, company_id, owner_id FROM events";
const TASK_COLUMNS: &str = "SELECT id, title, status, due_date, owner_id, assignee_id, company_id FROM tasks";
const NOTE_COLUMNS: &str = "SELECT id, title, type, content, color, created_at, updated_at, notebook_id FROM notes";

fn insert_user_query(user: &User) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
    sqlx::query(
        "INSERT INTO users (id, email, hashed_password, role, company_id) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user.id.as_uuid())
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.role.as_str())
    .bind(user.company_id.as_uuid())
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> StoreResult<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| StoreError::Backend(format!("failed to read column {name}: {e}")))
}

fn parsed<T>(row: &PgRow, name: &str) -> StoreResult<T>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    let raw: String = column(row, name)?;
    raw.parse()
        .map_err(|e| StoreError::Backend(format!("corrupt {name} value {raw:?}: {e}")))
}

fn company_from_row(row: &PgRow) -> StoreResult<Company> {
    Ok(Company {
        id: CompanyId::from_uuid(column(row, "id")?),
        name: column(row, "name")?,
        company_code: CompanyCode::from_stored(column(row, "company_code")?),
    })
}

fn user_from_row(row: &PgRow) -> StoreResult<User> {
    Ok(User {
        id: UserId::from_uuid(column(row, "id")?),
        email: column(row, "email")?,
        hashed_password: column(row, "hashed_password")?,
        role: parsed(row, "role")?,
        company_id: CompanyId::from_uuid(column(row, "company_id")?),
    })
}

fn event_from_row(row: &PgRow) -> StoreResult<Event> {
    let owner_id: Option<Uuid> = column(row, "owner_id")?;
    Ok(Event {
        id: EventId::from_uuid(column(row, "id")?),
        title: column(row, "title")?,
        start_time: column::<DateTime<Utc>>(row, "start_time")?,
        end_time: column::<DateTime<Utc>>(row, "end_time")?,
        place: column(row, "place")?,
        notes: column(row, "notes")?,
        calendar_type: parsed(row, "calendar_type")?,
        company_id: CompanyId::from_uuid(column(row, "company_id")?),
        owner_id: owner_id.map(UserId::from_uuid),
    })
}

fn task_from_row(row: &PgRow) -> StoreResult<Task> {
    Ok(Task {
        id: TaskId::from_uuid(column(row, "id")?),
        title: column(row, "title")?,
        status: parsed(row, "status")?,
        due_date: column::<DateTime<Utc>>(row, "due_date")?,
        owner_id: UserId::from_uuid(column(row, "owner_id")?),
        assignee_id: UserId::from_uuid(column(row, "assignee_id")?),
        company_id: CompanyId::from_uuid(column(row, "company_id")?),
    })
}

fn transaction_from_row(row: &PgRow) -> StoreResult<Transaction> {
    Ok(Transaction {
        id: TransactionId::from_uuid(column(row, "id")?),
        amount: Amount::from_stored(column::<Decimal>(row, "amount")?),
        kind: parsed(row, "type")?,
        category: column(row, "category")?,
        date: column::<DateTime<Utc>>(row, "date")?,
        notes: column(row, "notes")?,
        user_id: UserId::from_uuid(column(row, "user_id")?),
        company_id: CompanyId::from_uuid(column(row, "company_id")?),
    })
}

fn notebook_from_row(row: &PgRow) -> StoreResult<Notebook> {
    Ok(Notebook {
        id: NotebookId::from_uuid(column(row, "id")?),
        name: column(row, "name")?,
        cover: column(row, "cover")?,
        company_id: CompanyId::from_uuid(column(row, "company_id")?),
        owner_id: column::<Option<Uuid>>(row, "owner_id")?.map(UserId::from_uuid),
    })
}

fn note_from_row(row: &PgRow) -> StoreResult<Note> {
    Ok(Note {
        id: NoteId::from_uuid(column(row, "id")?),
        title: column(row, "title")?,
        kind: parsed(row, "type")?,
        content: column(row, "content")?,
        color: column(row, "color")?,
        created_at: column::<DateTime<Utc>>(row, "created_at")?,
        updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        notebook_id: NotebookId::from_uuid(column(row, "notebook_id")?),
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let field = match db_err.constraint() {
                Some("users_email_key") => "email",
                Some("companies_company_code_key") => "company_code",
                _ => "record",
            };
            return StoreError::UniqueViolation(field);
        }
    }
    StoreError::Backend(format!("{operation}: {err}"))
}
