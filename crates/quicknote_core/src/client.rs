//! Notes API client.
//!
//! # Responsibility
//! - Provide raw list/create/delete calls against the configured endpoint.
//! - Provide UI-level operations that refresh the list view and report
//!   outcomes through the notifier.
//!
//! # Invariants
//! - Create never reaches the transport with an empty title or content.
//! - A successful create or delete is followed by exactly one list fetch.
//! - UI-level operations never return an error; each failure is logged and
//!   reported as exactly one failure notice.
//! - A failed load leaves the rendered list untouched.

use crate::config::{ClientConfig, StatusPolicy};
use crate::error::{ClientError, ClientResult, TransportError};
use crate::model::note::{NewNote, Note, NoteDraft, NoteId};
use crate::notify::{Notice, Notifier, Operation};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::view::{render_notes, NoteListView};
use log::{error, info, warn};
use std::sync::Arc;

pub const LOAD_FAILED_MESSAGE: &str = "Could not load notes. Check the API URL.";
pub const SAVE_FAILED_MESSAGE: &str = "Could not save note.";
pub const DELETE_FAILED_MESSAGE: &str = "Could not delete note.";
pub const EMPTY_DRAFT_MESSAGE: &str = "Title and content cannot be empty.";
pub const SAVED_MESSAGE: &str = "Note saved.";
pub const DELETED_MESSAGE: &str = "Note deleted.";

const MAX_ERROR_BODY_CHARS: usize = 200;
const NOT_FOUND: u16 = 404;

/// Result of one UI-level operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Request succeeded (and the follow-up refresh was issued).
    Completed,
    /// Input was rejected locally; nothing was sent.
    Rejected,
    /// Request failed; a failure notice was emitted.
    Failed,
}

impl Outcome {
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

/// Client bound to one notes endpoint, one view and one notifier.
pub struct NotesClient<T: Transport> {
    config: ClientConfig,
    transport: T,
    notifier: Arc<dyn Notifier>,
    view: Arc<dyn NoteListView>,
}

impl<T: Transport> NotesClient<T> {
    pub fn new(
        config: ClientConfig,
        transport: T,
        notifier: Arc<dyn Notifier>,
        view: Arc<dyn NoteListView>,
    ) -> Self {
        Self {
            config,
            transport,
            notifier,
            view,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the full collection in server order.
    ///
    /// Non-2xx listings fail regardless of status policy: their body is not
    /// a note array.
    pub async fn fetch_notes(&self) -> ClientResult<Vec<Note>> {
        let response = self
            .transport
            .send(ApiRequest::get(self.config.collection_url()))
            .await?;
        if !response.is_success() {
            return Err(status_error(&response));
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Sends one create request with the exact field values.
    pub async fn create(&self, note: &NewNote) -> ClientResult<()> {
        note.validate()?;
        let body = serde_json::to_value(note).map_err(TransportError::Encode)?;
        let response = self
            .transport
            .send(ApiRequest::post(self.config.collection_url(), body))
            .await?;
        self.check_mutation_status(&response, Operation::Save)
    }

    /// Sends one delete request addressed by `id`.
    ///
    /// A 404 means the note is already gone, which is the requested end
    /// state, so it succeeds under either policy.
    pub async fn delete(&self, id: &NoteId) -> ClientResult<()> {
        let response = self
            .transport
            .send(ApiRequest::delete(self.config.note_url(id.as_str())))
            .await?;
        if response.status == NOT_FOUND {
            info!("event=note_delete module=client status=already_absent id={id}");
            return Ok(());
        }
        self.check_mutation_status(&response, Operation::Delete)
    }

    /// Refresh: fetches all notes and replaces the rendered list.
    pub async fn load_notes(&self) -> Outcome {
        match self.fetch_notes().await {
            Ok(notes) => {
                info!(
                    "event=notes_load module=client status=ok count={}",
                    notes.len()
                );
                self.view.replace_all(render_notes(&notes));
                Outcome::Completed
            }
            Err(err) => {
                error!(
                    "event=notes_load module=client status=error kind={} error={}",
                    err.kind(),
                    err
                );
                self.notifier
                    .notify(Notice::failure(Operation::Load, LOAD_FAILED_MESSAGE));
                Outcome::Failed
            }
        }
    }

    /// Creates a note from the draft fields, then clears them and refreshes.
    ///
    /// The draft is left unchanged when validation or the request fails.
    pub async fn save_note(&self, draft: &mut NoteDraft) -> Outcome {
        let note = draft.to_new_note();
        if let Err(err) = note.validate() {
            warn!("event=note_save module=client status=rejected reason={err}");
            self.notifier
                .notify(Notice::failure(Operation::Save, EMPTY_DRAFT_MESSAGE));
            return Outcome::Rejected;
        }

        match self.create(&note).await {
            Ok(()) => {
                info!("event=note_save module=client status=ok");
                draft.clear();
                self.notifier
                    .notify(Notice::success(Operation::Save, SAVED_MESSAGE));
                self.load_notes().await;
                Outcome::Completed
            }
            Err(err) => {
                error!(
                    "event=note_save module=client status=error kind={} error={}",
                    err.kind(),
                    err
                );
                self.notifier
                    .notify(Notice::failure(Operation::Save, SAVE_FAILED_MESSAGE));
                Outcome::Failed
            }
        }
    }

    /// Deletes a note by id, then refreshes.
    pub async fn delete_note(&self, id: &NoteId) -> Outcome {
        match self.delete(id).await {
            Ok(()) => {
                info!("event=note_delete module=client status=ok id={id}");
                self.notifier
                    .notify(Notice::success(Operation::Delete, DELETED_MESSAGE));
                self.load_notes().await;
                Outcome::Completed
            }
            Err(err) => {
                error!(
                    "event=note_delete module=client status=error id={id} kind={} error={}",
                    err.kind(),
                    err
                );
                self.notifier
                    .notify(Notice::failure(Operation::Delete, DELETE_FAILED_MESSAGE));
                Outcome::Failed
            }
        }
    }

    fn check_mutation_status(
        &self,
        response: &ApiResponse,
        operation: Operation,
    ) -> ClientResult<()> {
        if response.is_success() {
            return Ok(());
        }
        match self.config.status_policy() {
            StatusPolicy::Strict => Err(status_error(response)),
            StatusPolicy::Lenient => {
                warn!(
                    "event=status_ignored module=client operation={} status={} policy=lenient",
                    operation.as_str(),
                    response.status
                );
                Ok(())
            }
        }
    }
}

fn status_error(response: &ApiResponse) -> ClientError {
    ClientError::Status {
        status: response.status,
        body: response.body_excerpt(MAX_ERROR_BODY_CHARS),
    }
}
