//! Core adapter layer types
//!
//! - PromptRecord: one detected user prompt
//! - AdapterError: construction-time failures of an adapter definition

use super::sanitize::preview;
use ego_tree::NodeId;
use serde::Serialize;
use thiserror::Error;

/// A user-authored prompt found on the page.
///
/// `element` is a handle into the page the record was detected on. It is
/// never serialized; resolve it with `Page::element()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptRecord {
    /// 0-based position among the prompts that survived filtering
    pub index: usize,
    #[serde(skip)]
    pub element: NodeId,
    /// Sanitized, trimmed, never empty
    pub text: String,
    pub preview: String,
}

impl PromptRecord {
    pub fn new(index: usize, element: NodeId, text: impl Into<String>) -> Self {
        let text = text.into();
        let preview = preview(&text);
        Self {
            index,
            element,
            text,
            preview,
        }
    }
}

/// Errors from building an adapter.
///
/// Detection itself never fails; everything that can go wrong with an adapter
/// definition is reported here, when the adapter is constructed.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("cannot instantiate incomplete adapter '{site}': missing {missing}")]
    Incomplete { site: String, missing: &'static str },

    #[error("invalid selector '{selector}' for '{site}': {reason}")]
    InvalidSelector {
        site: String,
        selector: String,
        reason: String,
    },

    #[error("invalid chat id pattern '{pattern}' for '{site}': {source}")]
    InvalidPattern {
        site: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("chat id pattern '{pattern}' for '{site}' has no capture group")]
    MissingCaptureGroup { site: String, pattern: String },
}

/// Result type for adapter construction
pub type AdapterResult<T> = Result<T, AdapterError>;
