//! Page: a parsed document snapshot tied to its location

use super::Location;
use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use std::path::Path;

/// A parsed chat page.
///
/// Element handles returned by detection are `NodeId`s into this tree. A
/// handle stays valid for lookups after the host removes its node, but the
/// node is then no longer attached and `element()` returns `None`.
pub struct Page {
    location: Location,
    html: Html,
}

impl Page {
    /// Parse a full HTML document.
    pub fn parse(location: Location, html: &str) -> Self {
        Self {
            location,
            html: Html::parse_document(html),
        }
    }

    /// Read and parse an HTML snapshot from disk.
    pub fn load(location: Location, path: impl AsRef<Path>) -> super::PageResult<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::parse(location, &html))
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Single-page apps change the URL without reloading the document.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn document(&self) -> &Html {
        &self.html
    }

    /// Whether the node is still reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let root = self.html.tree.root().id();
        match self.html.tree.get(id) {
            Some(node) if node.id() == root => true,
            Some(node) => node.ancestors().last().map(|a| a.id()) == Some(root),
            None => false,
        }
    }

    /// Resolve a handle to an attached element.
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        if !self.is_attached(id) {
            return None;
        }
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    /// Remove a node (and its subtree) from the document.
    ///
    /// Returns false when the node is unknown, already detached, or the root.
    pub fn detach(&mut self, id: NodeId) -> bool {
        if id == self.html.tree.root().id() || !self.is_attached(id) {
            return false;
        }
        match self.html.tree.get_mut(id) {
            Some(mut node) => {
                node.detach();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
