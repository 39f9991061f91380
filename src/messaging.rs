//! Request router between page-side callers and the bookmark store
//!
//! Requests are JSON objects discriminated by `action`, mirroring what a
//! browser extension's background worker receives. Every request gets a
//! response; storage failures are reported in it, never raised.

use crate::bookmark::{Bookmark, BookmarkStore, NewBookmark};
use crate::session::PageEvent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    SavePrompt {
        prompt: NewBookmark,
    },
    GetSavedPrompts,
    DeletePrompt {
        #[serde(rename = "promptId")]
        prompt_id: String,
    },
    ToggleOverlay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Prompts {
        prompts: Vec<Bookmark>,
    },
    Status {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl Response {
    pub fn ok() -> Self {
        Response::Status {
            success: true,
            id: None,
            error: None,
        }
    }

    pub fn saved(id: String) -> Self {
        Response::Status {
            success: true,
            id: Some(id),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Response::Status {
            success: false,
            id: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Response::Prompts { .. } => true,
            Response::Status { success, .. } => *success,
        }
    }
}

/// Dispatches requests to the store and, for overlay toggles, to the page
/// session.
pub struct MessageRouter {
    store: Arc<dyn BookmarkStore>,
    overlay: Option<mpsc::Sender<PageEvent>>,
}

impl MessageRouter {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self {
            store,
            overlay: None,
        }
    }

    /// Forward `toggleOverlay` requests to a running session.
    pub fn with_overlay(mut self, events: mpsc::Sender<PageEvent>) -> Self {
        self.overlay = Some(events);
        self
    }

    pub fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::SavePrompt { prompt } => self.store.save(&prompt).map(Response::saved),
            Request::GetSavedPrompts => self.store.list().map(|prompts| Response::Prompts { prompts }),
            Request::DeletePrompt { prompt_id } => self.store.delete(&prompt_id).map(|deleted| {
                if deleted {
                    Response::ok()
                } else {
                    Response::failed(format!("prompt not found: {}", prompt_id))
                }
            }),
            Request::ToggleOverlay => return self.toggle_overlay(),
        };
        result.unwrap_or_else(|e| {
            warn!(error = %e, "bookmark storage failed");
            Response::failed(e.to_string())
        })
    }

    /// Decode a JSON request, handle it, and encode the response.
    pub fn handle_json(&self, raw: &str) -> String {
        let response = match serde_json::from_str::<Request>(raw) {
            Ok(request) => self.handle(request),
            Err(e) => Response::failed(format!("invalid request: {}", e)),
        };
        serde_json::to_string(&response)
            .unwrap_or_else(|_| r#"{"success":false,"error":"unencodable response"}"#.to_string())
    }

    fn toggle_overlay(&self) -> Response {
        match &self.overlay {
            Some(events) => match events.try_send(PageEvent::ToggleOverlay) {
                Ok(()) => Response::ok(),
                Err(e) => Response::failed(format!("overlay unavailable: {}", e)),
            },
            None => Response::failed("no overlay attached"),
        }
    }
}
