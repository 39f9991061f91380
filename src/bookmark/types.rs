//! Bookmark records

use crate::adapter::{PromptRecord, SiteAdapter};
use crate::page::Location;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A prompt the user asked to save. Serializes with camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub title: String,
    pub site: String,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub prompt_index: usize,
    pub url: String,
    pub text: String,
}

impl NewBookmark {
    /// Capture a detected prompt together with its page metadata.
    ///
    /// A blank title becomes `Prompt #N` (1-based).
    pub fn from_prompt(
        adapter: &dyn SiteAdapter,
        location: &Location,
        prompt: &PromptRecord,
        title: Option<&str>,
    ) -> Self {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Prompt #{}", prompt.index + 1));
        Self {
            title,
            site: adapter.site_name().to_string(),
            chat_id: adapter.chat_id(location),
            prompt_index: prompt.index,
            url: location.href.clone(),
            text: prompt.text.clone(),
        }
    }

    /// Assign an id and timestamp.
    pub fn into_bookmark(self, timestamp: DateTime<Utc>) -> Bookmark {
        Bookmark {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            site: self.site,
            chat_id: self.chat_id,
            prompt_index: self.prompt_index,
            url: self.url,
            text: self.text,
            timestamp,
        }
    }
}

/// A stored prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub site: String,
    pub chat_id: Option<String>,
    pub prompt_index: usize,
    pub url: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Case-insensitive search over title, text and site. A blank term keeps all.
pub fn filter_bookmarks<'a>(bookmarks: &'a [Bookmark], term: &str) -> Vec<&'a Bookmark> {
    let term = term.trim().to_lowercase();
    bookmarks
        .iter()
        .filter(|b| {
            term.is_empty()
                || b.title.to_lowercase().contains(&term)
                || b.text.to_lowercase().contains(&term)
                || b.site.to_lowercase().contains(&term)
        })
        .collect()
}

/// Human label for when a bookmark was saved.
pub fn relative_date(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match (now - timestamp).num_days() {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days @ 2..=6 => format!("{} days ago", days),
        _ => timestamp.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{profiles, DeclarativeSiteAdapter};
    use crate::page::Page;
    use chrono::{Duration, TimeZone};

    fn bookmark(title: &str, site: &str, text: &str) -> Bookmark {
        NewBookmark {
            title: title.to_string(),
            site: site.to_string(),
            chat_id: None,
            prompt_index: 0,
            url: "https://claude.ai/chat/1".to_string(),
            text: text.to_string(),
        }
        .into_bookmark(Utc::now())
    }

    #[test]
    fn from_prompt_captures_page_metadata() {
        let adapter = DeclarativeSiteAdapter::from_profile(&profiles::chatgpt()).unwrap();
        let location = Location::parse("https://chatgpt.com/c/abc-1").unwrap();
        let page = Page::parse(
            location.clone(),
            r#"<div data-message-author-role="user">a</div><div data-message-author-role="user">b</div>"#,
        );
        let prompts = adapter.detect_prompts(&page);

        let saved = NewBookmark::from_prompt(&adapter, &location, &prompts[1], Some("  "));
        assert_eq!(saved.title, "Prompt #2");
        assert_eq!(saved.site, "ChatGPT");
        assert_eq!(saved.chat_id.as_deref(), Some("abc-1"));
        assert_eq!(saved.prompt_index, 1);
        assert_eq!(saved.url, "https://chatgpt.com/c/abc-1");
        assert_eq!(saved.text, "b");

        let named = NewBookmark::from_prompt(&adapter, &location, &prompts[0], Some(" Intro "));
        assert_eq!(named.title, "Intro");
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let value = serde_json::to_value(bookmark("t", "Claude", "x")).unwrap();
        assert!(value.get("chatId").is_some());
        assert!(value.get("promptIndex").is_some());
    }

    #[test]
    fn filter_matches_title_text_and_site_case_insensitively() {
        let list = vec![
            bookmark("Rust lifetimes", "Claude", "explain borrowck"),
            bookmark("Dinner", "ChatGPT", "RECIPE for soup"),
            bookmark("Misc", "Gemini", "hello"),
        ];
        let titles = |term: &str| -> Vec<String> {
            filter_bookmarks(&list, term).iter().map(|b| b.title.clone()).collect()
        };
        assert_eq!(titles("rust"), vec!["Rust lifetimes"]);
        assert_eq!(titles("recipe"), vec!["Dinner"]);
        assert_eq!(titles("gemini"), vec!["Misc"]);
        assert_eq!(titles("  ").len(), 3);
        assert!(titles("nothing").is_empty());
    }

    #[test]
    fn relative_dates() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_date(now - Duration::hours(3), now), "Today");
        assert_eq!(relative_date(now - Duration::hours(30), now), "Yesterday");
        assert_eq!(relative_date(now - Duration::days(4), now), "4 days ago");
        assert_eq!(relative_date(now - Duration::days(9), now), "2025-03-01");
    }
}
