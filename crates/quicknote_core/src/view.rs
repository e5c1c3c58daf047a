//! Structured list rendering.
//!
//! # Responsibility
//! - Map fetched notes to list items without touching any UI toolkit.
//! - Define the list container contract used by refreshes.
//!
//! # Invariants
//! - `render_notes` preserves input order and length.
//! - A refresh replaces the whole list in one `replace_all` call.

use crate::model::note::{Note, NoteId};
use std::sync::Mutex;

/// Delete control attached to one rendered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    pub note_id: NoteId,
}

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Shown emphasized (bold).
    pub title: String,
    /// Shown as a paragraph under the title.
    pub content: String,
    pub delete: DeleteControl,
}

/// Maps notes to list items, one per note, in the given order.
pub fn render_notes(notes: &[Note]) -> Vec<ListItem> {
    notes
        .iter()
        .map(|note| ListItem {
            title: note.title.clone(),
            content: note.content.clone(),
            delete: DeleteControl {
                note_id: note.id.clone(),
            },
        })
        .collect()
}

/// The rendered list container.
pub trait NoteListView: Send + Sync {
    /// Discards all current items and shows `items` instead.
    fn replace_all(&self, items: Vec<ListItem>);
}

/// List container kept in memory.
#[derive(Debug, Default)]
pub struct MemoryListView {
    items: Mutex<Vec<ListItem>>,
    replacements: Mutex<usize>,
}

impl MemoryListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<ListItem> {
        self.items
            .lock()
            .map(|items| items.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// How many refreshes reached the view.
    pub fn replacements(&self) -> usize {
        *self
            .replacements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NoteListView for MemoryListView {
    fn replace_all(&self, items: Vec<ListItem>) {
        *self
            .items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = items;
        *self
            .replacements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;
    }
}
