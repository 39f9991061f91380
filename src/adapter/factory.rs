//! Adapter factory — picks the site adapter for a page URL
//!
//! Rules are `(host substring, optional path substring)` pairs evaluated
//! top to bottom; the first match wins. No match is the ordinary
//! "unsupported site" outcome and yields `None`.

use super::declarative::DeclarativeSiteAdapter;
use super::profiles::{self, SiteProfile};
use super::traits::SiteAdapter;
use super::types::{AdapterError, AdapterResult};
use crate::page::Location;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// One host predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRule {
    /// Substring the hostname must contain
    pub host: String,
    /// Substring the pathname must contain, if set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl HostRule {
    pub fn host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: None,
        }
    }

    pub fn host_and_path(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: Some(path.into()),
        }
    }

    pub fn matches(&self, hostname: &str, pathname: &str) -> bool {
        hostname.contains(self.host.as_str())
            && self
                .path
                .as_deref()
                .map_or(true, |path| pathname.contains(path))
    }
}

impl std::fmt::Display for HostRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} (path contains '{}')", self.host, path),
            None => write!(f, "{}", self.host),
        }
    }
}

struct Entry {
    rules: Vec<HostRule>,
    adapter: Arc<dyn SiteAdapter>,
}

/// Ordered registry of site adapters.
pub struct AdapterFactory {
    entries: Vec<Entry>,
}

impl AdapterFactory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Factory over the built-in sites.
    pub fn builtin() -> AdapterResult<Self> {
        Self::with_profiles(Vec::new())
    }

    /// Built-in sites plus `extra` profiles.
    ///
    /// An extra profile named like a built-in replaces it in place; any
    /// other profile is appended after the built-ins.
    pub fn with_profiles(extra: Vec<SiteProfile>) -> AdapterResult<Self> {
        let mut merged = profiles::builtin();
        for profile in extra {
            match merged.iter_mut().find(|p| p.site_name == profile.site_name) {
                Some(slot) => *slot = profile,
                None => merged.push(profile),
            }
        }

        let mut factory = Self::new();
        for profile in &merged {
            factory.register_profile(profile)?;
        }
        Ok(factory)
    }

    /// Compile a profile and register it after the existing entries.
    pub fn register_profile(&mut self, profile: &SiteProfile) -> AdapterResult<()> {
        if profile.matches.is_empty() {
            return Err(AdapterError::Incomplete {
                site: profile.site_name.clone(),
                missing: "host rules",
            });
        }
        let adapter = DeclarativeSiteAdapter::from_profile(profile)?;
        self.register(profile.matches.clone(), Arc::new(adapter));
        Ok(())
    }

    /// Register any adapter implementation under the given host rules.
    pub fn register(&mut self, rules: Vec<HostRule>, adapter: Arc<dyn SiteAdapter>) {
        self.entries.push(Entry { rules, adapter });
    }

    pub fn select(&self, hostname: &str, pathname: &str) -> Option<Arc<dyn SiteAdapter>> {
        let found = self
            .entries
            .iter()
            .find(|entry| entry.rules.iter().any(|r| r.matches(hostname, pathname)))
            .map(|entry| entry.adapter.clone());
        if found.is_none() {
            debug!(hostname, "unsupported site");
        }
        found
    }

    pub fn select_location(&self, location: &Location) -> Option<Arc<dyn SiteAdapter>> {
        self.select(&location.hostname, &location.pathname)
    }

    pub fn is_supported(&self, location: &Location) -> bool {
        self.select_location(location).is_some()
    }

    /// Registered sites with their host rules, in matching order.
    pub fn sites(&self) -> Vec<(&str, &[HostRule])> {
        self.entries
            .iter()
            .map(|e| (e.adapter.site_name(), e.rules.as_slice()))
            .collect()
    }
}

impl Default for AdapterFactory {
    fn default() -> Self {
        Self::new()
    }
}
