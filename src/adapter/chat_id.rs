//! Chat identity extraction from the page URL

use super::types::{AdapterError, AdapterResult};
use crate::page::Location;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Which part of the URL a pattern is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlPart {
    /// `location.pathname`
    #[default]
    Path,
    /// `location.hash`, including the leading `#`
    Hash,
}

/// A chat id pattern as written in a site profile.
///
/// The first capture group of `pattern` is the chat id. Patterns are
/// unanchored, so `/c/([a-z0-9]+)` also matches `/g/x/c/abc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatIdPattern {
    #[serde(default)]
    pub source: UrlPart,
    pub pattern: String,
}

impl ChatIdPattern {
    pub fn path(pattern: impl Into<String>) -> Self {
        Self {
            source: UrlPart::Path,
            pattern: pattern.into(),
        }
    }

    pub fn hash(pattern: impl Into<String>) -> Self {
        Self {
            source: UrlPart::Hash,
            pattern: pattern.into(),
        }
    }
}

/// Compiled, ordered chat id patterns. First match wins.
#[derive(Debug)]
pub struct ChatIdMatcher {
    patterns: Vec<(UrlPart, Regex)>,
}

impl ChatIdMatcher {
    pub fn compile(site: &str, patterns: &[ChatIdPattern]) -> AdapterResult<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for p in patterns {
            let regex = Regex::new(&p.pattern).map_err(|source| AdapterError::InvalidPattern {
                site: site.to_string(),
                pattern: p.pattern.clone(),
                source,
            })?;
            // captures_len() counts the implicit whole-match group
            if regex.captures_len() < 2 {
                return Err(AdapterError::MissingCaptureGroup {
                    site: site.to_string(),
                    pattern: p.pattern.clone(),
                });
            }
            compiled.push((p.source, regex));
        }
        Ok(Self { patterns: compiled })
    }

    /// The chat id for `location`, or `None` when this is not a chat view.
    pub fn extract(&self, location: &Location) -> Option<String> {
        self.patterns.iter().find_map(|(part, regex)| {
            let haystack = match part {
                UrlPart::Path => location.pathname.as_str(),
                UrlPart::Hash => location.hash.as_str(),
            };
            regex
                .captures(haystack)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[ChatIdPattern]) -> ChatIdMatcher {
        ChatIdMatcher::compile("test", patterns).unwrap()
    }

    #[test]
    fn first_matching_pattern_wins() {
        let m = matcher(&[
            ChatIdPattern::path(r"/app/([a-zA-Z0-9-]+)"),
            ChatIdPattern::path(r"/([a-zA-Z0-9-]+)"),
        ]);
        let loc = Location::new("gemini.google.com", "/app/abc");
        assert_eq!(m.extract(&loc).as_deref(), Some("abc"));
    }

    #[test]
    fn hash_pattern_reads_fragment() {
        let m = matcher(&[
            ChatIdPattern::path(r"/app/([a-zA-Z0-9-]+)"),
            ChatIdPattern::hash(r"#/([a-zA-Z0-9-]+)"),
        ]);
        let loc = Location::new("gemini.google.com", "/").with_hash("#/h1");
        assert_eq!(m.extract(&loc).as_deref(), Some("h1"));
    }

    #[test]
    fn no_match_is_none() {
        let m = matcher(&[ChatIdPattern::path(r"/c/([a-zA-Z0-9-]+)")]);
        assert_eq!(m.extract(&Location::new("chatgpt.com", "/")), None);
    }

    #[test]
    fn pattern_without_group_is_rejected() {
        let err = ChatIdMatcher::compile("test", &[ChatIdPattern::path(r"/c/[a-z]+")]).unwrap_err();
        assert!(matches!(err, AdapterError::MissingCaptureGroup { .. }));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = ChatIdMatcher::compile("test", &[ChatIdPattern::path(r"/c/(")]).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidPattern { .. }));
    }

    #[test]
    fn source_defaults_to_path_in_yaml() {
        let p: ChatIdPattern = serde_yaml::from_str("pattern: '/c/(x)'").unwrap();
        assert_eq!(p.source, UrlPart::Path);
    }
}
