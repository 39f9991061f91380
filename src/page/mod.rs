//! Host page model
//!
//! A `Page` is a parsed snapshot of a chat web page plus the location it was
//! loaded from. Detection reads it; only the host (or a test) mutates it.

mod document;
mod location;

pub use document::Page;
pub use location::Location;

use thiserror::Error;

/// Errors raised while building a page snapshot
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL has no host: {0}")]
    MissingHost(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for page operations
pub type PageResult<T> = Result<T, PageError>;
