//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical `Note` record returned by list fetches.
//! - Define the `NewNote` creation payload and the `NoteDraft` input state.
//!
//! # Invariants
//! - `NoteId` is opaque; its text is never parsed or normalized.
//! - Title and content are sent exactly as typed. No trimming.
//! - A `NewNote` with an empty title or content must not reach the wire.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque note identifier assigned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One note as listed by the remote API.
///
/// Extra fields sent by the server (category, timestamps) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

/// Validation error for create payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
            Self::EmptyContent => write!(f, "note content cannot be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Creation payload serialized as `{"title": ..., "content": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks presence of both fields.
    ///
    /// Only the empty string is rejected; whitespace-only values pass.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if self.content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }
}

/// The two input fields a user types a new note into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Snapshot of the field values at call time.
    pub fn to_new_note(&self) -> NewNote {
        NewNote::new(self.title.clone(), self.content.clone())
    }

    /// Empties both fields.
    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}
