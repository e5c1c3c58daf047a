use async_trait::async_trait;
use quicknote_core::{
    ApiMethod, ApiRequest, ApiResponse, ClientConfig, InMemoryNotesApi, MemoryListView,
    NoteListView, NotesClient, Notifier, Operation, Outcome, RecordingNotifier, Transport,
    TransportError,
};
use std::sync::{Arc, Mutex};

const BASE: &str = "http://notes.test/api/notes";

struct Harness<T: Transport> {
    client: NotesClient<T>,
    view: Arc<MemoryListView>,
    notifier: Arc<RecordingNotifier>,
}

fn harness<T: Transport>(transport: T) -> Harness<T> {
    let view = Arc::new(MemoryListView::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let client = NotesClient::new(
        ClientConfig::new(BASE).unwrap(),
        transport,
        notifier.clone() as Arc<dyn Notifier>,
        view.clone() as Arc<dyn NoteListView>,
    );
    Harness {
        client,
        view,
        notifier,
    }
}

fn memory_api() -> InMemoryNotesApi {
    InMemoryNotesApi::new(url::Url::parse(BASE).unwrap())
}

/// Answers every request with one canned response.
struct CannedTransport {
    status: u16,
    body: &'static str,
    seen: Mutex<Vec<ApiRequest>>,
}

#[async_trait]
impl Transport for CannedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        Ok(ApiResponse::new(self.status, self.body))
    }
}

#[tokio::test]
async fn single_note_listing_renders_one_item_with_delete_control() {
    let transport = CannedTransport {
        status: 200,
        body: r#"[{"id":"1","title":"A","content":"B"}]"#,
        seen: Mutex::new(Vec::new()),
    };
    let h = harness(transport);

    assert_eq!(h.client.load_notes().await, Outcome::Completed);

    let items = h.view.snapshot();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "A");
    assert_eq!(items[0].content, "B");
    assert_eq!(items[0].delete.note_id.as_str(), "1");
    assert!(h.notifier.notices().is_empty());

    let seen = h.client.transport().seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, ApiMethod::Get);
    assert_eq!(seen[0].url.as_str(), BASE);
    assert!(seen[0].body.is_none());
}

#[tokio::test]
async fn listing_keeps_server_order_and_length() {
    let api = memory_api();
    api.insert("c", "third-first", "x");
    api.insert("a", "alpha", "y");
    api.insert("b", "bravo", "z");
    let h = harness(api.clone());

    assert!(h.client.load_notes().await.is_completed());

    let ids = h
        .view
        .snapshot()
        .into_iter()
        .map(|item| item.delete.note_id.to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn repeated_loads_fully_replace_the_view() {
    let api = memory_api();
    api.insert("1", "A", "a");
    api.insert("2", "B", "b");
    let h = harness(api.clone());

    h.client.load_notes().await;
    assert_eq!(h.view.snapshot().len(), 2);

    api.insert("3", "C", "c");
    h.client.load_notes().await;
    h.client.load_notes().await;

    assert_eq!(h.view.snapshot().len(), 3);
    assert_eq!(h.view.replacements(), 3);
    assert_eq!(api.count(ApiMethod::Get), 3);
}

#[tokio::test]
async fn transport_failure_emits_exactly_one_notice_and_keeps_view() {
    let api = memory_api();
    api.insert("1", "A", "a");
    let h = harness(api.clone());
    h.client.load_notes().await;

    api.set_unreachable(true);
    let outcome = h.client.load_notes().await;

    assert_eq!(outcome, Outcome::Failed);
    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_failure());
    assert_eq!(notices[0].operation, Operation::Load);
    assert_eq!(notices[0].message, "Could not load notes. Check the API URL.");
    assert_eq!(h.view.snapshot().len(), 1);
}

#[tokio::test]
async fn malformed_listing_is_reported_as_load_failure() {
    let api = memory_api();
    api.set_corrupt_listing(true);
    let h = harness(api);

    assert_eq!(h.client.load_notes().await, Outcome::Failed);
    assert_eq!(h.notifier.failures().len(), 1);
    assert_eq!(h.view.replacements(), 0);
}

#[tokio::test]
async fn non_success_listing_fails_and_fetch_reports_status() {
    let transport = CannedTransport {
        status: 500,
        body: "An error occurred",
        seen: Mutex::new(Vec::new()),
    };
    let h = harness(transport);

    let err = h.client.fetch_notes().await.expect_err("500 must fail");
    assert_eq!(err.kind(), "status");
    assert!(err.to_string().contains("500"));

    assert_eq!(h.client.load_notes().await, Outcome::Failed);
    assert_eq!(h.notifier.failures().len(), 1);
}
