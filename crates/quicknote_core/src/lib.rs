//! Core client logic for quicknote.
//! This crate is the single source of truth for how notes are listed,
//! created and deleted against the remote notes API.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod notify;
pub mod transport;
pub mod view;

pub use client::{NotesClient, Outcome};
pub use config::{ClientConfig, ConfigError, StatusPolicy};
pub use error::{ClientError, ClientResult, TransportError};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingError,
};
pub use model::note::{NewNote, Note, NoteDraft, NoteId, NoteValidationError};
pub use notify::{Notice, NoticeLevel, Notifier, Operation, RecordingNotifier};
pub use transport::http::HttpTransport;
pub use transport::memory::InMemoryNotesApi;
pub use transport::{ApiMethod, ApiRequest, ApiResponse, Transport};
pub use view::{render_notes, DeleteControl, ListItem, MemoryListView, NoteListView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
