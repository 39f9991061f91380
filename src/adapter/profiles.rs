//! Site profiles — the data that defines each supported chat site
//!
//! Selector order in each profile is significant: later selectors cover DOM
//! drift on the same site, they are not alternative readings of the page.

use super::chat_id::ChatIdPattern;
use super::factory::HostRule;
use super::selector::FallbackSpec;
use serde::{Deserialize, Serialize};

/// Declarative description of one site adapter.
///
/// Built-in profiles are defined below; more can be supplied through the
/// `sites` list of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub site_name: String,
    /// Host rules the factory matches, in order
    #[serde(default)]
    pub matches: Vec<HostRule>,
    #[serde(default)]
    pub chat_id: Vec<ChatIdPattern>,
    /// Structural selectors in priority order
    #[serde(default)]
    pub selectors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackSpec>,
    /// Site-specific decorative elements removed from prompt text
    #[serde(default)]
    pub strip: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn chatgpt() -> SiteProfile {
    SiteProfile {
        site_name: "ChatGPT".to_string(),
        matches: vec![HostRule::host("chatgpt.com"), HostRule::host("chat.openai.com")],
        chat_id: vec![ChatIdPattern::path(r"/c/([a-zA-Z0-9-]+)")],
        selectors: strings(&[r#"[data-message-author-role="user"]"#]),
        fallback: None,
        strip: strings(&[".copy-button", ".edit-button"]),
    }
}

pub fn claude() -> SiteProfile {
    SiteProfile {
        site_name: "Claude".to_string(),
        matches: vec![HostRule::host("claude.ai")],
        chat_id: vec![ChatIdPattern::path(r"/chat/([a-zA-Z0-9-]+)")],
        selectors: strings(&[
            r#"[data-is-streaming="false"] .font-user-message"#,
            ".font-user-message",
            r#"[class*="user"] [class*="message"]"#,
            r#"div[class*="Human"]"#,
        ]),
        fallback: Some(FallbackSpec {
            query: r#"[class*="message"], [data-test*="message"]"#.to_string(),
            exclude: strings(&[r#"[class*="assistant"]"#, r#"[class*="claude"]"#]),
            require_class: Vec::new(),
        }),
        strip: strings(&[".copy-icon", ".edit-icon"]),
    }
}

pub fn gemini() -> SiteProfile {
    SiteProfile {
        site_name: "Gemini".to_string(),
        matches: vec![HostRule::host("gemini.google.com")],
        chat_id: vec![
            ChatIdPattern::path(r"/app/([a-zA-Z0-9-]+)"),
            ChatIdPattern::path(r"/chat/([a-zA-Z0-9-]+)"),
            ChatIdPattern::path(r"/c/([a-zA-Z0-9-]+)"),
            // hash routing
            ChatIdPattern::hash(r"#/([a-zA-Z0-9-]+)"),
        ],
        selectors: strings(&[
            r#"[data-message-author-role="user"]"#,
            ".user-message",
            r#"[class*="user-query"]"#,
            "message-content.user-query",
            ".query-content",
        ]),
        fallback: Some(FallbackSpec {
            query: r#"[class*="message"], [class*="query"]"#.to_string(),
            exclude: Vec::new(),
            require_class: strings(&["user", "query"]),
        }),
        strip: strings(&["mat-icon", ".action-buttons"]),
    }
}

pub fn grok() -> SiteProfile {
    SiteProfile {
        site_name: "Grok".to_string(),
        matches: vec![HostRule::host("grok.x.ai"), HostRule::host_and_path("x.com", "grok")],
        chat_id: vec![
            ChatIdPattern::path(r"/chat/([a-zA-Z0-9_-]+)"),
            ChatIdPattern::path(r"/conversation/([a-zA-Z0-9_-]+)"),
            ChatIdPattern::path(r"/grok/([a-zA-Z0-9_-]+)"),
        ],
        selectors: strings(&[
            r#"[data-role="user-message"]"#,
            ".user-prompt",
            r#"[class*="UserMessage"]"#,
            r#"[data-message-type="user"]"#,
        ]),
        fallback: Some(FallbackSpec {
            query: r#"[class*="message"], [data-testid*="message"]"#.to_string(),
            exclude: strings(&[r#"[class*="grok"]"#, r#"[class*="ai"]"#, r#"[class*="assistant"]"#]),
            require_class: Vec::new(),
        }),
        strip: strings(&[r#"[data-testid*="button"]"#]),
    }
}

pub fn deepseek() -> SiteProfile {
    SiteProfile {
        site_name: "Deepseek".to_string(),
        matches: vec![HostRule::host("deepseek.com")],
        chat_id: vec![
            ChatIdPattern::path(r"/c/([a-zA-Z0-9_-]+)"),
            ChatIdPattern::path(r"/chat/([a-zA-Z0-9_-]+)"),
            ChatIdPattern::path(r"/conversation/([a-zA-Z0-9_-]+)"),
        ],
        selectors: strings(&[
            r#"[data-message-author-role="user"]"#,
            r#"[data-role="user"]"#,
            ".user-message",
            r#"[class*="UserMessage"]"#,
            r#"[class*="user-prompt"]"#,
        ]),
        fallback: Some(FallbackSpec {
            query: r#"[class*="message"], [class*="chat-item"]"#.to_string(),
            exclude: strings(&[r#"[class*="assistant"]"#, r#"[class*="deepseek"]"#, r#"[class*="ai"]"#]),
            require_class: Vec::new(),
        }),
        strip: strings(&[".icon", ".action-btn"]),
    }
}

/// All built-in profiles, in factory matching order.
pub fn builtin() -> Vec<SiteProfile> {
    vec![chatgpt(), claude(), gemini(), grok(), deepseek()]
}
