//! Where page snapshots come from

use crate::page::{Location, Page, PageResult};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Produces a fresh snapshot of the current document.
pub trait DocumentSource {
    fn snapshot(&mut self, location: &Location) -> PageResult<Page>;
}

/// Re-reads an HTML file on every snapshot.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileSource {
    fn snapshot(&mut self, location: &Location) -> PageResult<Page> {
        Page::load(location.clone(), &self.path)
    }
}

/// Shared in-memory HTML; clones see each other's updates.
#[derive(Debug, Clone, Default)]
pub struct HtmlSource {
    html: Arc<Mutex<String>>,
}

impl HtmlSource {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: Arc::new(Mutex::new(html.into())),
        }
    }

    pub fn set(&self, html: impl Into<String>) {
        *self.html.lock().unwrap_or_else(|e| e.into_inner()) = html.into();
    }
}

impl DocumentSource for HtmlSource {
    fn snapshot(&mut self, location: &Location) -> PageResult<Page> {
        let html = self.html.lock().unwrap_or_else(|e| e.into_inner());
        Ok(Page::parse(location.clone(), &html))
    }
}
