//! SiteAdapter trait — the capability contract every site implements
//!
//! An adapter knows how to recognise a chat view from its URL, how to find
//! the user's prompts in the page, and how to bring one of them into view.

use super::types::PromptRecord;
use crate::page::{Location, Page};
use ego_tree::NodeId;
use scraper::ElementRef;
use std::time::Duration;
use tracing::{debug, info};

/// Where a scrolled element should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Start,
    Center,
    Nearest,
}

/// A transient background highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub color: String,
    /// How long the color is held before fading back
    pub hold: Duration,
    /// Length of the fade transition
    pub fade: Duration,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            color: "rgba(59, 130, 246, 0.2)".to_string(),
            hold: Duration::from_millis(1500),
            fade: Duration::from_millis(300),
        }
    }
}

/// The host surface that actually scrolls and paints.
pub trait Viewport {
    fn scroll_into_view(&mut self, element: ElementRef<'_>, align: ScrollAlign);

    fn highlight(&mut self, element: ElementRef<'_>, highlight: &Highlight);
}

/// Viewport for headless hosts: reports scroll requests through tracing.
#[derive(Debug, Default)]
pub struct TracingViewport;

impl Viewport for TracingViewport {
    fn scroll_into_view(&mut self, element: ElementRef<'_>, align: ScrollAlign) {
        info!(element = %describe(element), ?align, "scroll into view");
    }

    fn highlight(&mut self, element: ElementRef<'_>, highlight: &Highlight) {
        info!(
            element = %describe(element),
            color = %highlight.color,
            hold_ms = highlight.hold.as_millis() as u64,
            "highlight"
        );
    }
}

fn describe(element: ElementRef<'_>) -> String {
    let el = element.value();
    match el.attr("id") {
        Some(id) => format!("{}#{}", el.name(), id),
        None => el.name().to_string(),
    }
}

/// The contract site adapters implement.
///
/// Adapters hold no per-page state: every call reads the page it is given.
pub trait SiteAdapter: Send + Sync {
    /// Display name, also used to tag saved prompts
    fn site_name(&self) -> &str;

    /// Conversation id derived from the URL, `None` off a chat view.
    fn chat_id(&self, location: &Location) -> Option<String>;

    /// User prompts in document order.
    ///
    /// Never fails: a page that is not a chat view, or has no prompts,
    /// yields an empty list.
    fn detect_prompts(&self, page: &Page) -> Vec<PromptRecord>;

    fn is_on_chat_page(&self, location: &Location) -> bool {
        self.chat_id(location).is_some()
    }

    /// Center the element in the viewport and flash a highlight on it.
    ///
    /// A handle whose node has since left the document is ignored.
    fn scroll_to_prompt(&self, page: &Page, element: NodeId, viewport: &mut dyn Viewport) {
        let Some(el) = page.element(element) else {
            debug!(site = self.site_name(), ?element, "scroll target no longer attached");
            return;
        };
        viewport.scroll_into_view(el, ScrollAlign::Center);
        viewport.highlight(el, &Highlight::default());
    }
}
