use quicknote_core::{
    ApiMethod, ClientConfig, InMemoryNotesApi, MemoryListView, NoteId, NoteListView,
    NotesClient, Notifier, Operation, Outcome, RecordingNotifier,
};
use std::sync::Arc;

const BASE: &str = "http://notes.test/api/notes";

fn setup() -> (
    NotesClient<InMemoryNotesApi>,
    InMemoryNotesApi,
    Arc<MemoryListView>,
    Arc<RecordingNotifier>,
) {
    let api = InMemoryNotesApi::new(url::Url::parse(BASE).unwrap());
    let view = Arc::new(MemoryListView::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let client = NotesClient::new(
        ClientConfig::new(BASE).unwrap(),
        api.clone(),
        notifier.clone() as Arc<dyn Notifier>,
        view.clone() as Arc<dyn NoteListView>,
    );
    (client, api, view, notifier)
}

#[tokio::test]
async fn delete_issues_one_delete_then_one_get() {
    let (client, api, view, notifier) = setup();
    api.insert("42", "answer", "life");
    api.insert("7", "keep", "me");

    assert_eq!(client.delete_note(&NoteId::from("42")).await, Outcome::Completed);

    let requests = api.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, ApiMethod::Delete);
    assert_eq!(requests[0].url.as_str(), "http://notes.test/api/notes/42");
    assert_eq!(requests[1].method, ApiMethod::Get);

    let items = view.snapshot();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].delete.note_id.as_str(), "7");
    assert!(notifier.failures().is_empty());
}

#[tokio::test]
async fn delete_control_from_rendered_list_targets_its_note() {
    let (client, api, view, _notifier) = setup();
    api.insert("a", "A", "a");
    api.insert("b", "B", "b");
    client.load_notes().await;

    let control = view.snapshot()[1].delete.clone();
    client.delete_note(&control.note_id).await;

    let remaining = api.notes();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id.as_str(), "a");
}

#[tokio::test]
async fn transport_failure_on_delete_reports_once_and_skips_refresh() {
    let (client, api, _view, notifier) = setup();
    api.insert("1", "A", "a");
    api.set_unreachable(true);

    assert_eq!(client.delete_note(&NoteId::from("1")).await, Outcome::Failed);

    assert_eq!(api.count(ApiMethod::Get), 0);
    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].operation, Operation::Delete);
    assert_eq!(notices[0].message, "Could not delete note.");
}
