//! Client error taxonomy.
//!
//! # Invariants
//! - Errors returned by raw API calls never cross a UI operation boundary;
//!   `NotesClient` converts them into notices.

use crate::model::note::NoteValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ClientResult<T> = Result<T, ClientError>;

/// Transport-level failure: the request produced no HTTP response.
#[derive(Debug)]
pub enum TransportError {
    /// Failure reported by the HTTP stack (connect, TLS, reset, body read).
    Http(reqwest::Error),
    /// Remote endpoint could not be reached.
    Unreachable(String),
    /// Request body could not be encoded.
    Encode(serde_json::Error),
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "http transport error: {err}"),
            Self::Unreachable(target) => write!(f, "endpoint unreachable: {target}"),
            Self::Encode(err) => write!(f, "request encode error: {err}"),
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Unreachable(_) => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Error for raw notes API calls.
#[derive(Debug)]
pub enum ClientError {
    Validation(NoteValidationError),
    Transport(TransportError),
    /// Listing body is not a JSON array of notes.
    Decode(serde_json::Error),
    /// Non-2xx response rejected by the status policy.
    Status { status: u16, body: String },
}

impl ClientError {
    /// Short stable label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
            Self::Status { .. } => "status",
        }
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Transport(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "malformed notes response: {err}"),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "notes API returned status {status}")
                } else {
                    write!(f, "notes API returned status {status}: {body}")
                }
            }
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Status { .. } => None,
        }
    }
}

impl From<NoteValidationError> for ClientError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<TransportError> for ClientError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}
