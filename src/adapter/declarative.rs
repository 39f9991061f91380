//! DeclarativeSiteAdapter — a SiteAdapter driven entirely by a SiteProfile
//!
//! Every built-in site is one of these. The profile is validated and
//! compiled up front, so an incomplete or malformed definition fails here
//! and never during detection.

use super::chat_id::ChatIdMatcher;
use super::profiles::SiteProfile;
use super::sanitize::TextExtractor;
use super::selector::SelectorChain;
use super::traits::SiteAdapter;
use super::types::{AdapterError, AdapterResult, PromptRecord};
use crate::page::{Location, Page};
use tracing::debug;

#[derive(Debug)]
pub struct DeclarativeSiteAdapter {
    site_name: String,
    chat_id: ChatIdMatcher,
    chain: SelectorChain,
    extractor: TextExtractor,
}

impl DeclarativeSiteAdapter {
    pub fn from_profile(profile: &SiteProfile) -> AdapterResult<Self> {
        let site = profile.site_name.trim();
        if site.is_empty() {
            return Err(AdapterError::Incomplete {
                site: "<unnamed>".to_string(),
                missing: "site_name",
            });
        }
        if profile.chat_id.is_empty() {
            return Err(AdapterError::Incomplete {
                site: site.to_string(),
                missing: "chat_id patterns",
            });
        }
        if profile.selectors.is_empty() && profile.fallback.is_none() {
            return Err(AdapterError::Incomplete {
                site: site.to_string(),
                missing: "selectors",
            });
        }

        Ok(Self {
            site_name: site.to_string(),
            chat_id: ChatIdMatcher::compile(site, &profile.chat_id)?,
            chain: SelectorChain::new(site, &profile.selectors, profile.fallback.as_ref())?,
            extractor: TextExtractor::new(site, &profile.strip)?,
        })
    }
}

impl SiteAdapter for DeclarativeSiteAdapter {
    fn site_name(&self) -> &str {
        &self.site_name
    }

    fn chat_id(&self, location: &Location) -> Option<String> {
        self.chat_id.extract(location)
    }

    fn detect_prompts(&self, page: &Page) -> Vec<PromptRecord> {
        if !self.is_on_chat_page(page.location()) {
            debug!(site = %self.site_name, url = %page.location(), "not a chat page, skipping scan");
            return Vec::new();
        }

        self.chain
            .select(page.document())
            .into_iter()
            .filter_map(|el| {
                let text = self.extractor.extract(el);
                (!text.is_empty()).then(|| (el.id(), text))
            })
            .enumerate()
            .map(|(index, (element, text))| PromptRecord::new(index, element, text))
            .collect()
    }
}
