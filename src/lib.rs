//! ChatHop: prompt navigation for AI chat pages
//!
//! Finds the prompts a user typed into ChatGPT, Claude, Gemini, Grok and
//! Deepseek conversations, and keeps bookmarks of the ones worth revisiting.
//!
//! # Core Concepts
//!
//! - **Page**: a parsed snapshot of a chat page plus its URL
//! - **SiteAdapter**: per-site rules for finding user prompts and chat ids
//! - **AdapterFactory**: picks the adapter for a URL
//! - **Bookmarks**: saved prompts behind a `BookmarkStore`
//!
//! # Example
//!
//! ```
//! use chathop::{AdapterFactory, Location, Page, SiteAdapter};
//!
//! let factory = AdapterFactory::builtin().unwrap();
//! let location = Location::parse("https://chatgpt.com/c/abc123").unwrap();
//! let adapter = factory.select_location(&location).unwrap();
//!
//! let page = Page::parse(
//!     location,
//!     r#"<div data-message-author-role="user">Hello there</div>"#,
//! );
//! let prompts = adapter.detect_prompts(&page);
//! assert_eq!(prompts[0].text, "Hello there");
//! ```

pub mod adapter;
pub mod bookmark;
pub mod config;
pub mod messaging;
pub mod page;
pub mod session;

pub use adapter::{
    AdapterError, AdapterFactory, AdapterResult, DeclarativeSiteAdapter, PromptRecord, SiteAdapter,
    SiteProfile, Viewport,
};
pub use bookmark::{
    Bookmark, BookmarkStore, MemoryBookmarkStore, NewBookmark, OpenBookmarkStore, SqliteBookmarkStore,
    StorageError, StorageResult,
};
pub use config::{Config, ConfigError};
pub use messaging::{MessageRouter, Request, Response};
pub use page::{Location, Page, PageError};
pub use session::{PageEvent, PromptSession, SessionState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
