//! Site adapter layer
//!
//! Each supported chat site is described by a `SiteProfile` and served by a
//! `SiteAdapter`. The `AdapterFactory` picks the adapter for a page URL.

mod chat_id;
mod declarative;
mod factory;
pub mod profiles;
mod sanitize;
mod selector;
mod traits;
mod types;

pub use chat_id::{ChatIdMatcher, ChatIdPattern, UrlPart};
pub use declarative::DeclarativeSiteAdapter;
pub use factory::{AdapterFactory, HostRule};
pub use profiles::SiteProfile;
pub use sanitize::{preview, TextExtractor, COMMON_STRIP, ELLIPSIS, PREVIEW_CHARS};
pub use selector::{FallbackSpec, SelectorChain};
pub use traits::{Highlight, ScrollAlign, SiteAdapter, TracingViewport, Viewport};
pub use types::{AdapterError, AdapterResult, PromptRecord};
