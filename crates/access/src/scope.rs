//! Read scopes.
//!
//! A scope is derived from the principal alone and is the single definition
//! of "what this caller can see" for one resource kind. Stores translate it
//! into a filter; services apply [`admits`](EventScope::admits) to records
//! fetched by id, so a list and a single-item read can never disagree.

use workhub_auth::{Principal, Role, User};
use workhub_calendar::{CalendarType, Event, Task};
use workhub_core::{CompanyId, UserId};
use workhub_finance::Transaction;
use workhub_notebooks::Notebook;

/// General events of the company, plus the caller's own personal events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EventScope {
    pub company_id: CompanyId,
    pub user_id: UserId,
}

impl EventScope {
    pub fn for_principal(principal: &Principal) -> Self {
        Self {
            company_id: principal.company_id,
            user_id: principal.user_id,
        }
    }

    pub fn admits(&self, event: &Event) -> bool {
        match event.calendar_type {
            CalendarType::General => event.company_id == self.company_id,
            CalendarType::Personal => event.owner_id == Some(self.user_id),
        }
    }
}

/// Owners see every task of the company; employees only tasks assigned to them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TaskScope {
    Company(CompanyId),
    Assignee { company_id: CompanyId, user_id: UserId },
}

impl TaskScope {
    pub fn for_principal(principal: &Principal) -> Self {
        match principal.role {
            Role::Owner => Self::Company(principal.company_id),
            Role::Employee => Self::Assignee {
                company_id: principal.company_id,
                user_id: principal.user_id,
            },
        }
    }

    pub fn admits(&self, task: &Task) -> bool {
        match *self {
            Self::Company(company_id) => task.company_id == company_id,
            Self::Assignee { company_id, user_id } => {
                task.company_id == company_id && task.assignee_id == user_id
            }
        }
    }
}

/// Owners see every transaction of the company; employees only their own.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransactionScope {
    Company(CompanyId),
    Recorder { company_id: CompanyId, user_id: UserId },
}

impl TransactionScope {
    pub fn for_principal(principal: &Principal) -> Self {
        match principal.role {
            Role::Owner => Self::Company(principal.company_id),
            Role::Employee => Self::Recorder {
                company_id: principal.company_id,
                user_id: principal.user_id,
            },
        }
    }

    pub fn admits(&self, tx: &Transaction) -> bool {
        match *self {
            Self::Company(company_id) => tx.company_id == company_id,
            Self::Recorder { company_id, user_id } => {
                tx.company_id == company_id && tx.user_id == user_id
            }
        }
    }
}

/// Every notebook (and therefore every note) of the caller's company.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NotebookScope {
    pub company_id: CompanyId,
}

impl NotebookScope {
    pub fn for_principal(principal: &Principal) -> Self {
        Self {
            company_id: principal.company_id,
        }
    }

    pub fn admits(&self, notebook: &Notebook) -> bool {
        notebook.company_id == self.company_id
    }
}

/// Members of the caller's company, optionally narrowed to one role.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MemberScope {
    pub company_id: CompanyId,
    pub role: Option<Role>,
}

impl MemberScope {
    /// The whole company.
    pub fn for_principal(principal: &Principal) -> Self {
        Self {
            company_id: principal.company_id,
            role: None,
        }
    }

    /// The employee roster, as listed to owners.
    pub fn employees_of(principal: &Principal) -> Self {
        Self {
            company_id: principal.company_id,
            role: Some(Role::Employee),
        }
    }

    pub fn admits(&self, user: &User) -> bool {
        user.company_id == self.company_id && self.role.is_none_or(|r| r == user.role)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use workhub_calendar::{NewEvent, NewTask};
    use workhub_finance::NewTransaction;

    use super::*;

    fn member(role: Role, company_id: CompanyId) -> User {
        User::new(format!("{}@hub.test", UserId::new()), "hash".into(), role, company_id)
    }

    fn event(kind: &str, creator: &User) -> Event {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        NewEvent::new("Standup", start, start + Duration::minutes(15), None, None, kind)
            .unwrap()
            .into_event(creator.company_id, creator.id)
    }

    #[test]
    fn owner_does_not_see_employee_personal_events() {
        let acme = CompanyId::new();
        let owner = member(Role::Owner, acme);
        let alice = member(Role::Employee, acme);

        let scope = EventScope::for_principal(&owner.principal());
        assert!(scope.admits(&event("general", &owner)));
        assert!(scope.admits(&event("personal", &owner)));
        assert!(!scope.admits(&event("personal", &alice)));
    }

    #[test]
    fn general_events_do_not_leak_across_companies() {
        let acme = member(Role::Owner, CompanyId::new());
        let globex = member(Role::Employee, CompanyId::new());
        let scope = EventScope::for_principal(&globex.principal());
        assert!(!scope.admits(&event("general", &acme)));
    }

    #[test]
    fn employee_task_scope_is_assignee_only() {
        let acme = CompanyId::new();
        let owner = member(Role::Owner, acme);
        let alice = member(Role::Employee, acme);
        let bob = member(Role::Employee, acme);
        let task = NewTask::new("Restock", Utc::now(), None, alice.id)
            .unwrap()
            .into_task(acme, owner.id);

        assert!(TaskScope::for_principal(&owner.principal()).admits(&task));
        assert!(TaskScope::for_principal(&alice.principal()).admits(&task));
        assert!(!TaskScope::for_principal(&bob.principal()).admits(&task));
    }

    #[test]
    fn employee_transaction_scope_is_recorder_only() {
        let acme = CompanyId::new();
        let owner = member(Role::Owner, acme);
        let alice = member(Role::Employee, acme);
        let tx = NewTransaction::new(Decimal::new(1250, 2), "expense", "Travel", Utc::now(), None)
            .unwrap()
            .into_transaction(acme, owner.id);

        assert!(TransactionScope::for_principal(&owner.principal()).admits(&tx));
        assert!(!TransactionScope::for_principal(&alice.principal()).admits(&tx));
    }

    #[test]
    fn employee_roster_excludes_owners_and_outsiders() {
        let acme = CompanyId::new();
        let owner = member(Role::Owner, acme);
        let alice = member(Role::Employee, acme);
        let outsider = member(Role::Employee, CompanyId::new());

        let scope = MemberScope::employees_of(&owner.principal());
        assert!(scope.admits(&alice));
        assert!(!scope.admits(&owner));
        assert!(!scope.admits(&outsider));
        assert!(MemberScope::for_principal(&owner.principal()).admits(&owner));
    }

    #[derive(Debug, Clone)]
    struct Population {
        users: Vec<User>,
        // (creator index, personal?)
        events: Vec<(usize, bool)>,
    }

    fn population() -> impl Strategy<Value = Population> {
        let companies = [CompanyId::new(), CompanyId::new(), CompanyId::new()];
        prop::collection::vec((0usize..3, any::<bool>()), 1..12)
            .prop_flat_map(move |members| {
                let users: Vec<User> = members
                    .into_iter()
                    .map(|(c, owner)| {
                        let role = if owner { Role::Owner } else { Role::Employee };
                        member(role, companies[c])
                    })
                    .collect();
                let n = users.len();
                let events = prop::collection::vec((0..n, any::<bool>()), 0..24);
                (Just(users), events)
            })
            .prop_map(|(users, events)| Population { users, events })
    }

    proptest! {
        #[test]
        fn feed_is_company_general_plus_own_personal(pop in population()) {
            let events: Vec<Event> = pop
                .events
                .iter()
                .map(|&(creator, personal)| {
                    event(if personal { "personal" } else { "general" }, &pop.users[creator])
                })
                .collect();

            for viewer in &pop.users {
                let scope = EventScope::for_principal(&viewer.principal());
                for (e, &(creator, personal)) in events.iter().zip(&pop.events) {
                    let creator = &pop.users[creator];
                    let expected = if personal {
                        creator.id == viewer.id
                    } else {
                        creator.company_id == viewer.company_id
                    };
                    prop_assert_eq!(scope.admits(e), expected);
                }
            }
        }
    }
}
