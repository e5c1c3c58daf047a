//! User-facing notification seam.
//!
//! # Responsibility
//! - Decouple operation outcomes from how they are shown (alert, stderr,
//!   toast).
//!
//! # Invariants
//! - A failed operation emits exactly one `Failure` notice.
//! - Loads emit no notice on success.

use std::fmt::{Display, Formatter};
use std::sync::Mutex;

/// Operation that produced a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Save => "save",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Failure,
}

/// One user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub operation: Operation,
    pub message: String,
}

impl Notice {
    pub fn success(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            operation,
            message: message.into(),
        }
    }

    pub fn failure(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Failure,
            operation,
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.level == NoticeLevel::Failure
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Observer invoked by `NotesClient` for every notice.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn failures(&self) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(Notice::is_failure)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }
}
