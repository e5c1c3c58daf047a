//! In-process notes API.
//!
//! # Responsibility
//! - Answer list/create/delete requests the way the hosted notes function
//!   does, without a network.
//! - Record every received request so callers can assert on traffic.
//!
//! # Invariants
//! - Listing order is insertion order.
//! - Ids are fresh UUID v4 strings assigned on create.
//! - Create requires non-empty `title` and `content` (400 otherwise).
//! - Deleting an unknown id answers 404.

use crate::error::TransportError;
use crate::model::note::{Note, NoteId};
use crate::transport::{ApiMethod, ApiRequest, ApiResponse, Transport};
use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use url::Url;
use uuid::Uuid;

#[derive(Debug, Default)]
struct ApiState {
    notes: Vec<Note>,
    requests: Vec<ApiRequest>,
    unreachable: bool,
    corrupt_listing: bool,
    forced_status: Option<u16>,
}

/// Shared handle to an in-memory notes collection.
///
/// Clones share state, so a test can hand one clone to the client and keep
/// another for assertions.
#[derive(Debug, Clone)]
pub struct InMemoryNotesApi {
    base: Url,
    state: Arc<Mutex<ApiState>>,
}

impl InMemoryNotesApi {
    /// Serves the collection at `base` and items directly beneath it.
    pub fn new(base: Url) -> Self {
        Self {
            base,
            state: Arc::new(Mutex::new(ApiState::default())),
        }
    }

    /// Seeds one note with a caller-chosen id.
    pub fn insert(&self, id: impl Into<String>, title: &str, content: &str) {
        self.lock().notes.push(Note {
            id: NoteId::new(id),
            title: title.to_string(),
            content: content.to_string(),
        });
    }

    /// Current server-side collection.
    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Number of received requests using `method`.
    pub fn count(&self, method: ApiMethod) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.method == method)
            .count()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Fails every subsequent request at the transport level.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    /// Makes listings answer 200 with a body that is not a note array.
    pub fn set_corrupt_listing(&self, corrupt: bool) {
        self.lock().corrupt_listing = corrupt;
    }

    /// Answers every mutation with `status` and no state change.
    pub fn force_mutation_status(&self, status: Option<u16>) {
        self.lock().forced_status = status;
    }

    fn lock(&self) -> MutexGuard<'_, ApiState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn item_id(&self, url: &Url) -> Option<String> {
        let base_segments = segments(&self.base);
        let target_segments = segments(url);
        if target_segments.len() != base_segments.len() + 1
            || target_segments[..base_segments.len()] != base_segments[..]
        {
            return None;
        }
        target_segments.last().map(|raw| percent_decode(raw))
    }

    fn is_collection(&self, url: &Url) -> bool {
        segments(url) == segments(&self.base)
    }
}

#[async_trait]
impl Transport for InMemoryNotesApi {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        if state.unreachable {
            return Err(TransportError::Unreachable(request.url.to_string()));
        }

        let response = match request.method {
            ApiMethod::Get if self.is_collection(&request.url) => {
                if state.corrupt_listing {
                    ApiResponse::new(200, "<html>gateway error</html>")
                } else {
                    let body = serde_json::to_vec(&state.notes).map_err(TransportError::Encode)?;
                    ApiResponse::new(200, body)
                }
            }
            ApiMethod::Post if self.is_collection(&request.url) => match state.forced_status {
                Some(status) => ApiResponse::new(status, "forced status"),
                None => create(&mut state, request.body.as_ref()),
            },
            ApiMethod::Delete => match (state.forced_status, self.item_id(&request.url)) {
                (Some(status), _) => ApiResponse::new(status, "forced status"),
                (None, Some(id)) => delete(&mut state, &id),
                (None, None) => ApiResponse::new(
                    400,
                    "Please pass a note 'id' in the URL path for deletion.",
                ),
            },
            _ => ApiResponse::new(405, "Method not supported."),
        };
        Ok(response)
    }
}

fn create(state: &mut ApiState, body: Option<&Value>) -> ApiResponse {
    let Some(body) = body else {
        return ApiResponse::new(400, "Request body is not valid JSON.");
    };
    let title = body.get("title").and_then(Value::as_str).unwrap_or_default();
    let content = body.get("content").and_then(Value::as_str).unwrap_or_default();
    if title.is_empty() || content.is_empty() {
        return ApiResponse::new(400, "Please pass a title and content in the request body.");
    }

    state.notes.push(Note {
        id: NoteId::new(Uuid::new_v4().to_string()),
        title: title.to_string(),
        content: content.to_string(),
    });
    ApiResponse::new(201, "Note created successfully.")
}

fn delete(state: &mut ApiState, id: &str) -> ApiResponse {
    let before = state.notes.len();
    state.notes.retain(|note| note.id.as_str() != id);
    if state.notes.len() == before {
        ApiResponse::new(404, "Note not found.")
    } else {
        ApiResponse::new(200, format!("Note with id '{id}' deleted."))
    }
}

fn segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|parts| {
            parts
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn percent_decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
