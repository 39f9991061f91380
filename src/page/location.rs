//! Location: the navigation context a page snapshot was taken from

use super::{PageError, PageResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// The parts of a page URL that adapters inspect.
///
/// `hash` keeps its leading `#` (or is empty), matching what a browser
/// reports for `location.hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub href: String,
    pub hostname: String,
    pub pathname: String,
    pub hash: String,
}

impl Location {
    /// Parse an absolute URL.
    pub fn parse(input: &str) -> PageResult<Self> {
        let url = Url::parse(input).map_err(|source| PageError::InvalidUrl {
            url: input.to_string(),
            source,
        })?;
        let hostname = url
            .host_str()
            .ok_or_else(|| PageError::MissingHost(input.to_string()))?
            .to_string();
        let hash = url
            .fragment()
            .map(|f| format!("#{}", f))
            .unwrap_or_default();

        Ok(Self {
            href: url.to_string(),
            hostname,
            pathname: url.path().to_string(),
            hash,
        })
    }

    /// Build a location from a hostname and pathname (no query, no hash).
    pub fn new(hostname: impl Into<String>, pathname: impl Into<String>) -> Self {
        let hostname = hostname.into();
        let pathname = pathname.into();
        let href = format!("https://{}{}", hostname, pathname);
        Self {
            href,
            hostname,
            pathname,
            hash: String::new(),
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        let hash = hash.into();
        self.hash = if hash.is_empty() || hash.starts_with('#') {
            hash
        } else {
            format!("#{}", hash)
        };
        self.href = match self.href.split_once('#') {
            Some((base, _)) => format!("{}{}", base, self.hash),
            None => format!("{}{}", self.href, self.hash),
        };
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.href)
    }
}
