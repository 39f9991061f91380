//! Prompt text extraction
//!
//! Text is read from the live element while skipping decorative subtrees
//! (buttons, icons, svg). The document itself is never modified.

use super::types::{AdapterError, AdapterResult};
use ego_tree::NodeRef;
use scraper::{ElementRef, Node, Selector};

/// Previews keep at most this many characters of the prompt text.
pub const PREVIEW_CHARS: usize = 100;

/// Appended to a truncated preview.
pub const ELLIPSIS: char = '\u{2026}';

/// Sub-elements stripped from every site's prompts.
pub const COMMON_STRIP: &[&str] = &["button", "svg", r#"[role="button"]"#];

/// Shorten `text` to `PREVIEW_CHARS` characters plus an ellipsis.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut short = String::with_capacity(cut + ELLIPSIS.len_utf8());
            short.push_str(&text[..cut]);
            short.push(ELLIPSIS);
            short
        }
    }
}

/// Collects the text of a prompt element minus its stripped descendants.
#[derive(Debug)]
pub struct TextExtractor {
    strip: Vec<Selector>,
}

impl TextExtractor {
    /// Build an extractor from `COMMON_STRIP` plus site-specific selectors.
    pub fn new(site: &str, extra: &[String]) -> AdapterResult<Self> {
        let strip = COMMON_STRIP
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str))
            .map(|css| parse_selector(site, css))
            .collect::<AdapterResult<Vec<_>>>()?;
        Ok(Self { strip })
    }

    /// Trimmed text content of `element`, skipping stripped subtrees.
    ///
    /// The element itself is never stripped, only its descendants.
    pub fn extract(&self, element: ElementRef<'_>) -> String {
        let mut out = String::new();
        self.collect(*element, &mut out);
        out.trim().to_string()
    }

    fn collect(&self, node: NodeRef<'_, Node>, out: &mut String) {
        for child in node.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(_) => {
                    let stripped = ElementRef::wrap(child)
                        .map(|el| self.strip.iter().any(|sel| sel.matches(&el)))
                        .unwrap_or(false);
                    if !stripped {
                        self.collect(child, out);
                    }
                }
                _ => {}
            }
        }
    }
}

pub(crate) fn parse_selector(site: &str, css: &str) -> AdapterResult<Selector> {
    Selector::parse(css).map_err(|e| AdapterError::InvalidSelector {
        site: site.to_string(),
        selector: css.to_string(),
        reason: format!("{:?}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn short_text_preview_is_identity() {
        assert_eq!(preview("hello"), "hello");
        let exact = "x".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);
    }

    #[test]
    fn long_text_preview_is_truncated_with_ellipsis() {
        let long = "y".repeat(PREVIEW_CHARS + 1);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 1);
        assert!(p.ends_with(ELLIPSIS));
        assert_eq!(&p[..PREVIEW_CHARS], &long[..PREVIEW_CHARS]);
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "é".repeat(150);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 1);
        assert!(p.starts_with(&"é".repeat(PREVIEW_CHARS)));
    }

    #[test]
    fn preview_is_idempotent() {
        let samples = vec![String::new(), "short".to_string(), "z".repeat(100), "z".repeat(250)];
        for text in &samples {
            let once = preview(text);
            assert_eq!(preview(&once), once);
            assert!(once.chars().count() <= PREVIEW_CHARS + 1);
        }
    }

    #[test]
    fn extract_skips_buttons_icons_and_role_buttons() {
        let doc = Html::parse_fragment(
            r#"<div id="m"> Explain <b>lifetimes</b><button>Copy</button>
               <svg><text>icon</text></svg><span role="button">Edit</span> </div>"#,
        );
        let extractor = TextExtractor::new("test", &[]).unwrap();
        assert_eq!(extractor.extract(first(&doc, "#m")), "Explain lifetimes");
    }

    #[test]
    fn extract_applies_site_specific_strip_selectors() {
        let doc = Html::parse_fragment(
            r#"<div id="m">Prompt<div class="action-buttons">Share</div></div>"#,
        );
        let plain = TextExtractor::new("test", &[]).unwrap();
        let site = TextExtractor::new("test", &[".action-buttons".to_string()]).unwrap();
        assert_eq!(plain.extract(first(&doc, "#m")), "PromptShare");
        assert_eq!(site.extract(first(&doc, "#m")), "Prompt");
    }

    #[test]
    fn extract_does_not_strip_the_element_itself() {
        let doc = Html::parse_fragment(r#"<button id="m">Send this</button>"#);
        let extractor = TextExtractor::new("test", &[]).unwrap();
        assert_eq!(extractor.extract(first(&doc, "#m")), "Send this");
    }

    #[test]
    fn extract_leaves_document_untouched() {
        let doc = Html::parse_fragment(r#"<div id="m">a<button>b</button></div>"#);
        let extractor = TextExtractor::new("test", &[]).unwrap();
        extractor.extract(first(&doc, "#m"));
        let raw: String = first(&doc, "#m").text().collect();
        assert_eq!(raw, "ab");
    }

    #[test]
    fn unparsable_strip_selector_is_rejected() {
        let err = TextExtractor::new("test", &["[[".to_string()]).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidSelector { .. }));
    }
}
