use serde::Serialize;
use tracing::info;

use workhub_access::{Action, EventScope, TaskScope};
use workhub_auth::Principal;
use workhub_calendar::{Event, NewEvent, NewTask, Task, TaskStatus};
use workhub_core::{DomainError, DomainResult, EventId, TaskId};

use super::{HubServices, guard};
use crate::store::HubStore;

/// Everything on the caller's calendar.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarFeed {
    pub events: Vec<Event>,
    pub tasks: Vec<Task>,
}

impl<S: HubStore> HubServices<S> {
    pub async fn create_event(&self, principal: &Principal, input: NewEvent) -> DomainResult<Event> {
        guard(principal, &Action::CreateEvent(input.calendar_type))?;
        let event = input.into_event(principal.company_id, principal.user_id);
        self.store.insert_event(&event).await?;
        info!(event_id = %event.id, calendar_type = event.calendar_type.as_str(), "event created");
        Ok(event)
    }

    /// Single event, visible under the same rule as the feed.
    pub async fn event(&self, principal: &Principal, id: EventId) -> DomainResult<Event> {
        self.store
            .event(id)
            .await?
            .filter(|e| EventScope::for_principal(principal).admits(e))
            .ok_or(DomainError::not_found("event"))
    }

    pub async fn delete_event(&self, principal: &Principal, id: EventId) -> DomainResult<()> {
        let event = self.store.event(id).await?.ok_or(DomainError::not_found("event"))?;
        guard(principal, &Action::DeleteEvent(&event))?;
        if !self.store.delete_event(id).await? {
            return Err(DomainError::not_found("event"));
        }
        info!(event_id = %id, user_id = %principal.user_id, "event deleted");
        Ok(())
    }

    pub async fn feed(&self, principal: &Principal) -> DomainResult<CalendarFeed> {
        let events = self.store.events(EventScope::for_principal(principal)).await?;
        let tasks = self.store.tasks(TaskScope::for_principal(principal)).await?;
        Ok(CalendarFeed { events, tasks })
    }

    pub async fn create_task(&self, principal: &Principal, input: NewTask) -> DomainResult<Task> {
        let assignee = self.store.user(input.assignee_id).await?;
        guard(principal, &Action::CreateTask { assignee: assignee.as_ref() })?;
        let task = input.into_task(principal.company_id, principal.user_id);
        self.store.insert_task(&task).await?;
        info!(task_id = %task.id, assignee_id = %task.assignee_id, "task created");
        Ok(task)
    }

    pub async fn update_task_status(
        &self,
        principal: &Principal,
        id: TaskId,
        status: TaskStatus,
    ) -> DomainResult<Task> {
        let task = self.store.task(id).await?.ok_or(DomainError::not_found("task"))?;
        guard(principal, &Action::UpdateTaskStatus(&task))?;
        self.store
            .set_task_status(id, status)
            .await?
            .ok_or(DomainError::not_found("task"))
    }

    pub async fn tasks(&self, principal: &Principal) -> DomainResult<Vec<Task>> {
        Ok(self.store.tasks(TaskScope::for_principal(principal)).await?)
    }
}
