use chrono::Utc;
use serde::Serialize;
use tracing::info;

use workhub_access::{Action, NotebookScope};
use workhub_auth::Principal;
use workhub_core::{DomainError, DomainResult, NoteId, NotebookId};
use workhub_notebooks::{NewNote, NewNotebook, Note, NotePatch, Notebook};

use super::{HubServices, guard};
use crate::store::HubStore;

/// A notebook with its notes embedded, newest note first.
#[derive(Debug, Clone, Serialize)]
pub struct NotebookView {
    #[serde(flatten)]
    pub notebook: Notebook,
    pub notes: Vec<Note>,
}

impl<S: HubStore> HubServices<S> {
    pub async fn create_notebook(&self, principal: &Principal, input: NewNotebook) -> DomainResult<NotebookView> {
        let notebook = input.into_notebook(principal.company_id, principal.user_id);
        self.store.insert_notebook(&notebook).await?;
        info!(notebook_id = %notebook.id, company_id = %notebook.company_id, "notebook created");
        Ok(NotebookView { notebook, notes: Vec::new() })
    }

    pub async fn notebooks(&self, principal: &Principal) -> DomainResult<Vec<NotebookView>> {
        let notebooks = self.store.notebooks(NotebookScope::for_principal(principal)).await?;
        let mut out = Vec::with_capacity(notebooks.len());
        for notebook in notebooks {
            let notes = self.store.notes(notebook.id).await?;
            out.push(NotebookView { notebook, notes });
        }
        Ok(out)
    }

    pub async fn notebook(&self, principal: &Principal, id: NotebookId) -> DomainResult<NotebookView> {
        let notebook = self.scoped_notebook(principal, id).await?;
        let notes = self.store.notes(notebook.id).await?;
        Ok(NotebookView { notebook, notes })
    }

    /// Remove a notebook and every note in it.
    pub async fn delete_notebook(&self, principal: &Principal, id: NotebookId) -> DomainResult<()> {
        self.scoped_notebook(principal, id).await?;
        if !self.store.delete_notebook(id).await? {
            return Err(DomainError::not_found("notebook"));
        }
        info!(notebook_id = %id, user_id = %principal.user_id, "notebook deleted");
        Ok(())
    }

    pub async fn create_note(
        &self,
        principal: &Principal,
        notebook_id: NotebookId,
        input: NewNote,
    ) -> DomainResult<Note> {
        self.scoped_notebook(principal, notebook_id).await?;
        let note = input.into_note(notebook_id, Utc::now());
        self.store.insert_note(&note).await?;
        Ok(note)
    }

    pub async fn notes(&self, principal: &Principal, notebook_id: NotebookId) -> DomainResult<Vec<Note>> {
        self.scoped_notebook(principal, notebook_id).await?;
        Ok(self.store.notes(notebook_id).await?)
    }

    pub async fn note(&self, principal: &Principal, id: NoteId) -> DomainResult<Note> {
        self.scoped_note(principal, id).await
    }

    pub async fn update_note(&self, principal: &Principal, id: NoteId, patch: NotePatch) -> DomainResult<Note> {
        let mut note = self.scoped_note(principal, id).await?;
        note.apply(patch, Utc::now());
        if !self.store.update_note(&note).await? {
            return Err(DomainError::not_found("note"));
        }
        Ok(note)
    }

    pub async fn delete_note(&self, principal: &Principal, id: NoteId) -> DomainResult<()> {
        self.scoped_note(principal, id).await?;
        if !self.store.delete_note(id).await? {
            return Err(DomainError::not_found("note"));
        }
        info!(note_id = %id, user_id = %principal.user_id, "note deleted");
        Ok(())
    }

    async fn scoped_notebook(&self, principal: &Principal, id: NotebookId) -> DomainResult<Notebook> {
        let notebook = self
            .store
            .notebook(id)
            .await?
            .ok_or(DomainError::not_found("notebook"))?;
        guard(principal, &Action::AccessNotebook(&notebook))?;
        Ok(notebook)
    }

    /// A note is reachable iff its notebook is.
    async fn scoped_note(&self, principal: &Principal, id: NoteId) -> DomainResult<Note> {
        let note = self.store.note(id).await?.ok_or(DomainError::not_found("note"))?;
        let notebook = self
            .store
            .notebook(note.notebook_id)
            .await?
            .ok_or(DomainError::not_found("note"))?;
        guard(principal, &Action::AccessNotebook(&notebook)).map_err(|_| DomainError::not_found("note"))?;
        Ok(note)
    }
}
