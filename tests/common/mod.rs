//! Common test utilities: HTML snapshots of chat pages
//!
//! Snapshots live in `tests/fixtures/` and are paired with the URL they
//! pretend to have been captured from.

#![allow(dead_code)]

use chathop::{AdapterFactory, Location, Page, PromptRecord, SiteAdapter};
use std::path::PathBuf;
use std::sync::Arc;

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_root().join(format!("{}.html", name))
}

/// Load a fixture as if it had been captured from `url`.
pub fn load(name: &str, url: &str) -> Page {
    let location = Location::parse(url).expect("fixture URL must parse");
    Page::load(location, fixture_path(name)).expect("fixture must exist")
}

pub fn adapter_for(url: &str) -> Arc<dyn SiteAdapter> {
    let factory = AdapterFactory::builtin().expect("built-in profiles are valid");
    let location = Location::parse(url).expect("fixture URL must parse");
    factory
        .select_location(&location)
        .unwrap_or_else(|| panic!("no adapter for {}", url))
}

/// Detect prompts in a fixture with the adapter the factory picks for `url`.
pub fn detect(name: &str, url: &str) -> (Arc<dyn SiteAdapter>, Page, Vec<PromptRecord>) {
    let adapter = adapter_for(url);
    let page = load(name, url);
    let prompts = adapter.detect_prompts(&page);
    (adapter, page, prompts)
}

pub fn texts(prompts: &[PromptRecord]) -> Vec<&str> {
    prompts.iter().map(|p| p.text.as_str()).collect()
}

pub fn element_id<'a>(page: &'a Page, prompt: &PromptRecord) -> Option<&'a str> {
    page.element(prompt.element).and_then(|el| el.value().attr("id"))
}
