//! Terminal rendering of the notes list and notices.

use quicknote_core::{ListItem, Notice, NoteListView, Notifier};
use std::io::Write;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Writes each refresh to stdout as a fresh block.
pub struct TerminalView {
    color: bool,
}

impl TerminalView {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl NoteListView for TerminalView {
    fn replace_all(&self, items: Vec<ListItem>) {
        let block = format_list(&items, self.color);
        let mut stdout = std::io::stdout().lock();
        // stdout closed (e.g. broken pipe) leaves nothing else to report to.
        let _ = stdout.write_all(block.as_bytes());
        let _ = stdout.flush();
    }
}

/// Prints notices to stderr, mirroring a blocking alert.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_failure() {
            eprintln!("error: {notice}");
        } else {
            eprintln!("{notice}");
        }
    }
}

pub fn format_list(items: &[ListItem], color: bool) -> String {
    if items.is_empty() {
        return "(no notes)\n".to_string();
    }
    items
        .iter()
        .map(|item| format_item(item, color))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_item(item: &ListItem, color: bool) -> String {
    let title = if color {
        format!("{BOLD}{}{RESET}", item.title)
    } else {
        item.title.clone()
    };
    format!(
        "{title}\n  {}\n  [delete: {}]\n",
        item.content.replace('\n', "\n  "),
        item.delete.note_id
    )
}
