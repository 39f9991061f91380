//! PromptSession: the explicit owner of one page's adapter and prompts

use super::source::DocumentSource;
use super::PageEvent;
use crate::adapter::{AdapterFactory, PromptRecord, SiteAdapter, TracingViewport, Viewport};
use crate::page::{Location, Page};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

/// Quiet period after the last mutation before the page is re-scanned.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// What the overlay renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// `None` on unsupported sites
    pub site: Option<String>,
    pub chat_id: Option<String>,
    /// Overlay shown at all; flipped by `ToggleOverlay`
    pub visible: bool,
    /// Prompt list open rather than collapsed to its button
    pub expanded: bool,
    pub prompts: Vec<PromptRecord>,
    /// Completed detection passes
    pub refreshes: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            site: None,
            chat_id: None,
            visible: true,
            expanded: false,
            prompts: Vec::new(),
            refreshes: 0,
        }
    }
}

pub struct PromptSession<S> {
    factory: Arc<AdapterFactory>,
    source: S,
    location: Location,
    adapter: Option<Arc<dyn SiteAdapter>>,
    page: Option<Page>,
    viewport: Box<dyn Viewport>,
    debounce: Duration,
    state: SessionState,
    publisher: watch::Sender<SessionState>,
}

impl<S: DocumentSource> PromptSession<S> {
    pub fn new(
        factory: Arc<AdapterFactory>,
        source: S,
        location: Location,
    ) -> (Self, watch::Receiver<SessionState>) {
        let adapter = factory.select_location(&location);
        let state = SessionState {
            site: adapter.as_ref().map(|a| a.site_name().to_string()),
            ..SessionState::default()
        };
        let (publisher, receiver) = watch::channel(state.clone());
        let session = Self {
            factory,
            source,
            location,
            adapter,
            page: None,
            viewport: Box::new(TracingViewport),
            debounce: DEFAULT_DEBOUNCE,
            state,
            publisher,
        };
        (session, receiver)
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_viewport(mut self, viewport: Box<dyn Viewport>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn adapter(&self) -> Option<&Arc<dyn SiteAdapter>> {
        self.adapter.as_ref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn on_chat_page(&self) -> bool {
        self.adapter
            .as_ref()
            .is_some_and(|a| a.is_on_chat_page(&self.location))
    }

    /// Take a fresh snapshot and re-run detection.
    pub fn refresh(&mut self) {
        if let Some(adapter) = self.adapter.clone() {
            match self.source.snapshot(&self.location) {
                Ok(page) => {
                    self.state.prompts = adapter.detect_prompts(&page);
                    self.state.chat_id = adapter.chat_id(&self.location);
                    self.page = Some(page);
                    info!(
                        site = adapter.site_name(),
                        prompts = self.state.prompts.len(),
                        "prompts refreshed"
                    );
                }
                Err(e) => warn!(error = %e, url = %self.location, "snapshot failed"),
            }
        } else {
            self.page = None;
            self.state.prompts.clear();
            self.state.chat_id = None;
        }
        self.state.refreshes += 1;
        self.publish();
    }

    /// Adopt a new URL. The adapter is re-selected; the caller schedules
    /// the refresh.
    pub fn navigate(&mut self, location: Location) {
        debug!(url = %location, "navigated");
        self.adapter = self.factory.select_location(&location);
        self.state.site = self.adapter.as_ref().map(|a| a.site_name().to_string());
        self.location = location;
    }

    /// Show or hide the overlay.
    pub fn toggle_visibility(&mut self) {
        self.state.visible = !self.state.visible;
        self.publish();
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        if self.state.expanded != expanded {
            self.state.expanded = expanded;
            self.publish();
        }
    }

    /// Scroll to a prompt from the latest refresh; unknown indices are ignored.
    pub fn scroll_to(&mut self, index: usize) {
        let (Some(adapter), Some(page)) = (self.adapter.as_ref(), self.page.as_ref()) else {
            return;
        };
        match self.state.prompts.iter().find(|p| p.index == index) {
            Some(prompt) => adapter.scroll_to_prompt(page, prompt.element, self.viewport.as_mut()),
            None => debug!(index, "no such prompt"),
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }

    /// Process events until `Teardown` or until every sender is dropped.
    pub async fn run(mut self, mut events: mpsc::Receiver<PageEvent>) {
        self.refresh();
        let mut deadline: Option<Instant> = None;

        loop {
            let wake = deadline.unwrap_or_else(Instant::now);
            tokio::select! {
                event = events.recv() => match event {
                    None | Some(PageEvent::Teardown) => break,
                    Some(PageEvent::Mutated) => {
                        if self.on_chat_page() {
                            deadline = Some(Instant::now() + self.debounce);
                        }
                    }
                    Some(PageEvent::Navigated(location)) => {
                        self.navigate(location);
                        deadline = Some(Instant::now() + self.debounce);
                    }
                    Some(PageEvent::ToggleOverlay) => self.toggle_visibility(),
                    Some(PageEvent::Expand) => self.set_expanded(true),
                    Some(PageEvent::Collapse) => self.set_expanded(false),
                    Some(PageEvent::ScrollTo(index)) => self.scroll_to(index),
                },
                _ = sleep_until(wake), if deadline.is_some() => {
                    deadline = None;
                    self.refresh();
                }
            }
        }

        debug!(url = %self.location, "session torn down");
    }
}
