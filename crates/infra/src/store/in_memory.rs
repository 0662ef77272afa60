use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use workhub_access::{EventScope, MemberScope, NotebookScope, TaskScope, TransactionScope};
use workhub_auth::{Company, CompanyCode, User};
use workhub_calendar::{CalendarType, Event, Task, TaskStatus};
use workhub_core::{CompanyId, EventId, NoteId, NotebookId, TaskId, TransactionId, UserId};
use workhub_finance::{DateWindow, Transaction};
use workhub_notebooks::{Note, Notebook};

use super::{HubStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    companies: HashMap<CompanyId, Company>,
    users: HashMap<UserId, User>,
    events: HashMap<EventId, Event>,
    tasks: HashMap<TaskId, Task>,
    transactions: HashMap<TransactionId, Transaction>,
    notebooks: HashMap<NotebookId, Notebook>,
    notes: HashMap<NoteId, Note>,
}

impl Tables {
    fn email_taken(&self, email: &str) -> bool {
        self.users.values().any(|u| u.email == email)
    }

    fn code_taken(&self, code: &CompanyCode) -> bool {
        self.companies.values().any(|c| &c.company_code == code)
    }

    fn remove_notebooks_where(&mut self, pred: impl Fn(&Notebook) -> bool) {
        let doomed: Vec<NotebookId> = self
            .notebooks
            .values()
            .filter(|nb| pred(*nb))
            .map(|nb| nb.id)
            .collect();
        self.notes.retain(|_, n| !doomed.contains(&n.notebook_id));
        self.notebooks.retain(|id, _| !doomed.contains(id));
    }

    fn remove_user_tree(&mut self, id: UserId) {
        self.events.retain(|_, e| e.owner_id != Some(id));
        self.tasks.retain(|_, t| t.owner_id != id && t.assignee_id != id);
        self.transactions.retain(|_, tx| tx.user_id != id);
        for nb in self.notebooks.values_mut().filter(|nb| nb.owner_id == Some(id)) {
            nb.owner_id = None;
        }
        self.users.remove(&id);
    }
}

/// In-memory hub store for tests/dev.
///
/// One lock guards every table, so a multi-row write is atomic with respect
/// to all readers.
#[derive(Debug, Default)]
pub struct InMemoryHubStore {
    inner: RwLock<Tables>,
}

impl InMemoryHubStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl HubStore for InMemoryHubStore {
    async fn company_code_exists(&self, code: &CompanyCode) -> StoreResult<bool> {
        Ok(self.read()?.code_taken(code))
    }

    async fn company_by_code(&self, code: &CompanyCode) -> StoreResult<Option<Company>> {
        let t = self.read()?;
        Ok(t.companies.values().find(|c| &c.company_code == code).cloned())
    }

    async fn company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        Ok(self.read()?.companies.get(&id).cloned())
    }

    async fn create_company_with_owner(&self, company: &Company, owner: &User) -> StoreResult<()> {
        let mut t = self.write()?;
        if t.code_taken(&company.company_code) {
            return Err(StoreError::UniqueViolation("company_code"));
        }
        if t.email_taken(&owner.email) {
            return Err(StoreError::UniqueViolation("email"));
        }
        t.companies.insert(company.id, company.clone());
        t.users.insert(owner.id, owner.clone());
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut t = self.write()?;
        if t.email_taken(&user.email) {
            return Err(StoreError::UniqueViolation("email"));
        }
        if !t.companies.contains_key(&user.company_id) {
            return Err(StoreError::Backend("user references an unknown company".to_string()));
        }
        t.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.values().find(|u| u.email == email).cloned())
    }

    async fn members(&self, scope: MemberScope) -> StoreResult<Vec<User>> {
        let t = self.read()?;
        let mut out: Vec<User> = t.users.values().filter(|u| scope.admits(u)).cloned().collect();
        out.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(out)
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<bool> {
        let mut t = self.write()?;
        if !t.users.contains_key(&id) {
            return Ok(false);
        }
        t.remove_user_tree(id);
        Ok(true)
    }

    async fn delete_company(&self, id: CompanyId) -> StoreResult<bool> {
        let mut t = self.write()?;
        if !t.companies.contains_key(&id) {
            return Ok(false);
        }
        let members: Vec<UserId> = t.users.values().filter(|u| u.company_id == id).map(|u| u.id).collect();
        for member in members {
            t.remove_user_tree(member);
        }
        t.events.retain(|_, e| e.company_id != id);
        t.tasks.retain(|_, task| task.company_id != id);
        t.transactions.retain(|_, tx| tx.company_id != id);
        t.remove_notebooks_where(|nb| nb.company_id == id);
        t.companies.remove(&id);
        Ok(true)
    }

    async fn insert_event(&self, event: &Event) -> StoreResult<()> {
        self.write()?.events.insert(event.id, event.clone());
        Ok(())
    }

    async fn event(&self, id: EventId) -> StoreResult<Option<Event>> {
        Ok(self.read()?.events.get(&id).cloned())
    }

    async fn events(&self, scope: EventScope) -> StoreResult<Vec<Event>> {
        let t = self.read()?;
        let mut out: Vec<Event> = t.events.values().filter(|e| scope.admits(e)).cloned().collect();
        out.sort_by_key(|e| (e.start_time, e.id));
        Ok(out)
    }

    async fn delete_event(&self, id: EventId) -> StoreResult<bool> {
        Ok(self.write()?.events.remove(&id).is_some())
    }

    async fn insert_task(&self, task: &Task) -> StoreResult<()> {
        self.write()?.tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn tasks(&self, scope: TaskScope) -> StoreResult<Vec<Task>> {
        let t = self.read()?;
        let mut out: Vec<Task> = t.tasks.values().filter(|task| scope.admits(task)).cloned().collect();
        out.sort_by_key(|task| (task.due_date, task.id));
        Ok(out)
    }

    async fn set_task_status(&self, id: TaskId, status: TaskStatus) -> StoreResult<Option<Task>> {
        let mut t = self.write()?;
        Ok(t.tasks.get_mut(&id).map(|task| {
            task.status = status;
            task.clone()
        }))
    }

    async fn insert_transaction(&self, tx: &Transaction) -> StoreResult<()> {
        self.write()?.transactions.insert(tx.id, tx.clone());
        Ok(())
    }

    async fn transactions(
        &self,
        scope: TransactionScope,
        window: Option<DateWindow>,
    ) -> StoreResult<Vec<Transaction>> {
        let t = self.read()?;
        let mut out: Vec<Transaction> = t
            .transactions
            .values()
            .filter(|tx| scope.admits(tx))
            .filter(|tx| window.is_none_or(|w| w.contains(&tx.date)))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn insert_notebook(&self, notebook: &Notebook) -> StoreResult<()> {
        self.write()?.notebooks.insert(notebook.id, notebook.clone());
        Ok(())
    }

    async fn notebook(&self, id: NotebookId) -> StoreResult<Option<Notebook>> {
        Ok(self.read()?.notebooks.get(&id).cloned())
    }

    async fn notebooks(&self, scope: NotebookScope) -> StoreResult<Vec<Notebook>> {
        let t = self.read()?;
        let mut out: Vec<Notebook> = t.notebooks.values().filter(|nb| scope.admits(nb)).cloned().collect();
        out.sort_by_key(|nb| nb.id);
        Ok(out)
    }

    async fn delete_notebook(&self, id: NotebookId) -> StoreResult<bool> {
        let mut t = self.write()?;
        if !t.notebooks.contains_key(&id) {
            return Ok(false);
        }
        t.remove_notebooks_where(|nb| nb.id == id);
        Ok(true)
    }

    async fn insert_note(&self, note: &Note) -> StoreResult<()> {
        let mut t = self.write()?;
        if !t.notebooks.contains_key(&note.notebook_id) {
            return Err(StoreError::Backend("note references an unknown notebook".to_string()));
        }
        t.notes.insert(note.id, note.clone());
        Ok(())
    }

    async fn note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        Ok(self.read()?.notes.get(&id).cloned())
    }

    async fn notes(&self, notebook_id: NotebookId) -> StoreResult<Vec<Note>> {
        let t = self.read()?;
        let mut out: Vec<Note> = t.notes.values().filter(|n| n.notebook_id == notebook_id).cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn update_note(&self, note: &Note) -> StoreResult<bool> {
        let mut t = self.write()?;
        match t.notes.get_mut(&note.id) {
            Some(slot) => {
                *slot = note.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_note(&self, id: NoteId) -> StoreResult<bool> {
        Ok(self.write()?.notes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use workhub_auth::Role;
    use workhub_calendar::{NewEvent, NewTask};
    use workhub_finance::NewTransaction;
    use workhub_notebooks::{NewNote, NewNotebook};

    use super::*;

    struct Seed {
        store: InMemoryHubStore,
        company: Company,
        owner: User,
        alice: User,
    }

    async fn seed() -> Seed {
        let store = InMemoryHubStore::new();
        let company = Company::new("Acme".into(), CompanyCode::generate());
        let owner = User::new("owner@acme.test".into(), "h".into(), Role::Owner, company.id);
        let alice = User::new("alice@acme.test".into(), "h".into(), Role::Employee, company.id);
        store.create_company_with_owner(&company, &owner).await.unwrap();
        store.insert_user(&alice).await.unwrap();
        Seed { store, company, owner, alice }
    }

    #[tokio::test]
    async fn signup_pair_is_all_or_nothing() {
        let s = seed().await;
        let other = Company::new("Globex".into(), CompanyCode::generate());
        let dup = User::new("owner@acme.test".into(), "h".into(), Role::Owner, other.id);

        let err = s.store.create_company_with_owner(&other, &dup).await.unwrap_err();
        assert_eq!(err, StoreError::UniqueViolation("email"));
        assert!(s.store.company(other.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_company_code_is_rejected() {
        let s = seed().await;
        let clash = Company::new("Clone".into(), s.company.company_code.clone());
        let owner = User::new("clone@x.test".into(), "h".into(), Role::Owner, clash.id);
        assert_eq!(
            s.store.create_company_with_owner(&clash, &owner).await.unwrap_err(),
            StoreError::UniqueViolation("company_code")
        );
        assert!(s.store.company_code_exists(&s.company.company_code).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_a_notebook_removes_its_notes() {
        let s = seed().await;
        let nb = NewNotebook::new("Ops", None).unwrap().into_notebook(s.company.id, s.owner.id);
        s.store.insert_notebook(&nb).await.unwrap();
        let note = NewNote::new(None, None, Some("hi".into()), None).unwrap().into_note(nb.id, Utc::now());
        s.store.insert_note(&note).await.unwrap();

        assert!(s.store.delete_notebook(nb.id).await.unwrap());
        assert!(s.store.note(note.id).await.unwrap().is_none());
        assert!(!s.store.delete_notebook(nb.id).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_a_user_removes_what_it_owns() {
        let s = seed().await;
        let start = Utc::now();
        let personal = NewEvent::new("Dentist", start, start, None, None, "personal")
            .unwrap()
            .into_event(s.company.id, s.alice.id);
        let general = NewEvent::new("All hands", start, start, None, None, "general")
            .unwrap()
            .into_event(s.company.id, s.owner.id);
        let task = NewTask::new("Count", start, None, s.alice.id).unwrap().into_task(s.company.id, s.owner.id);
        let tx = NewTransaction::new(Decimal::new(500, 2), "expense", "Taxi", start, None)
            .unwrap()
            .into_transaction(s.company.id, s.alice.id);
        for e in [&personal, &general] {
            s.store.insert_event(e).await.unwrap();
        }
        s.store.insert_task(&task).await.unwrap();
        s.store.insert_transaction(&tx).await.unwrap();
        let nb = NewNotebook::new("Shift notes", None).unwrap().into_notebook(s.company.id, s.alice.id);
        s.store.insert_notebook(&nb).await.unwrap();
        let owners_note = NewNote::new(None, None, Some("cover me".into()), None)
            .unwrap()
            .into_note(nb.id, start);
        s.store.insert_note(&owners_note).await.unwrap();

        assert!(s.store.delete_user(s.alice.id).await.unwrap());
        assert!(s.store.user(s.alice.id).await.unwrap().is_none());
        assert!(s.store.event(personal.id).await.unwrap().is_none());
        assert!(s.store.event(general.id).await.unwrap().is_some());
        assert!(s.store.task(task.id).await.unwrap().is_none());
        let scope = TransactionScope::Company(s.company.id);
        assert!(s.store.transactions(scope, None).await.unwrap().is_empty());

        // Company notebooks outlive their creator.
        let kept = s.store.notebook(nb.id).await.unwrap().unwrap();
        assert_eq!(kept.owner_id, None);
        assert!(s.store.note(owners_note.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_a_company_leaves_nothing_behind() {
        let s = seed().await;
        let nb = NewNotebook::new("Ops", None).unwrap().into_notebook(s.company.id, s.alice.id);
        s.store.insert_notebook(&nb).await.unwrap();
        let task = NewTask::new("Count", Utc::now(), None, s.alice.id)
            .unwrap()
            .into_task(s.company.id, s.owner.id);
        s.store.insert_task(&task).await.unwrap();

        assert!(s.store.delete_company(s.company.id).await.unwrap());
        assert!(s.store.company(s.company.id).await.unwrap().is_none());
        assert!(s.store.user(s.owner.id).await.unwrap().is_none());
        assert!(s.store.user(s.alice.id).await.unwrap().is_none());
        assert!(s.store.task(task.id).await.unwrap().is_none());
        assert!(s.store.notebook(nb.id).await.unwrap().is_none());
        assert!(!s.store.delete_company(s.company.id).await.unwrap());
    }

    #[tokio::test]
    async fn transactions_are_newest_first_and_windowed_by_day() {
        let s = seed().await;
        let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2026, 1, d, h, 0, 0).unwrap();
        for at in [day(1, 9), day(3, 23), day(2, 12), day(4, 0)] {
            let tx = NewTransaction::new(Decimal::ONE, "expense", "Misc", at, None)
                .unwrap()
                .into_transaction(s.company.id, s.owner.id);
            s.store.insert_transaction(&tx).await.unwrap();
        }
        let scope = TransactionScope::Company(s.company.id);

        let all = s.store.transactions(scope, None).await.unwrap();
        let dates: Vec<_> = all.iter().map(|tx| tx.date).collect();
        assert_eq!(dates, vec![day(4, 0), day(3, 23), day(2, 12), day(1, 9)]);

        let window = DateWindow::new(day(2, 0).date_naive(), day(3, 0).date_naive()).unwrap();
        let within = s.store.transactions(scope, Some(window)).await.unwrap();
        assert_eq!(within.len(), 2);
    }

    #[tokio::test]
    async fn notes_are_listed_newest_first() {
        let s = seed().await;
        let nb = NewNotebook::new("Ops", None).unwrap().into_notebook(s.company.id, s.owner.id);
        s.store.insert_notebook(&nb).await.unwrap();
        let t0 = Utc::now();
        let older = NewNote::new(Some("a".into()), None, None, None).unwrap().into_note(nb.id, t0);
        let newer = NewNote::new(Some("b".into()), None, None, None)
            .unwrap()
            .into_note(nb.id, t0 + Duration::seconds(5));
        s.store.insert_note(&older).await.unwrap();
        s.store.insert_note(&newer).await.unwrap();

        let ids: Vec<_> = s.store.notes(nb.id).await.unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }
}
