//! Page session — owns the active adapter for one page and keeps its prompt
//! list current
//!
//! The host feeds `PageEvent`s in; DOM mutations are debounced before a
//! re-scan so bursts of churn cost one detection pass. Results are published
//! on a watch channel.

mod controller;
mod source;

pub use controller::{PromptSession, SessionState, DEFAULT_DEBOUNCE};
pub use source::{DocumentSource, FileSource, HtmlSource};

use crate::page::Location;

/// Notifications from the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The document changed
    Mutated,
    /// The URL changed without a document reload
    Navigated(Location),
    /// Show or hide the overlay
    ToggleOverlay,
    /// Open the prompt list
    Expand,
    /// Collapse the prompt list to its button
    Collapse,
    /// Bring the prompt with this index into view
    ScrollTo(usize),
    /// The page is going away
    Teardown,
}
