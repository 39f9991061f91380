//! Selector chain: ordered structural queries with a heuristic fallback
//!
//! Stages run lazily in priority order. The first stage that yields at least
//! one element decides the candidate set; later stages are never consulted
//! and results from different stages are never merged.

use super::sanitize::parse_selector;
use super::types::AdapterResult;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Heuristic fallback as written in a site profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackSpec {
    /// Broad query for anything that looks like a message
    pub query: String,
    /// Candidates with a descendant matching any of these are assistant turns
    #[serde(default)]
    pub exclude: Vec<String>,
    /// When non-empty, the candidate's own `class` must contain one of these
    #[serde(default)]
    pub require_class: Vec<String>,
}

#[derive(Debug)]
struct Heuristic {
    query: Selector,
    exclude: Vec<Selector>,
    require_class: Vec<String>,
}

impl Heuristic {
    fn accepts(&self, el: ElementRef<'_>) -> bool {
        if !self.require_class.is_empty() {
            let class = el.value().attr("class").unwrap_or("");
            if !self.require_class.iter().any(|token| class.contains(token.as_str())) {
                return false;
            }
        }

        let own_id = el.id();
        let assistant = self
            .exclude
            .iter()
            .any(|marker| el.select(marker).any(|m| m.id() != own_id));
        if assistant {
            return false;
        }

        el.text().any(|t| !t.trim().is_empty())
    }
}

#[derive(Debug)]
enum Stage {
    Structural { css: String, selector: Selector },
    Heuristic { css: String, heuristic: Heuristic },
}

impl Stage {
    /// Walks the tree from the root, so nodes the host removed are never
    /// visited and results come back in document order.
    fn run<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        let root = doc.root_element();
        match self {
            Stage::Structural { selector, .. } => root.select(selector).collect(),
            Stage::Heuristic { heuristic, .. } => root
                .select(&heuristic.query)
                .filter(|el| heuristic.accepts(*el))
                .collect(),
        }
    }

    fn css(&self) -> &str {
        match self {
            Stage::Structural { css, .. } | Stage::Heuristic { css, .. } => css,
        }
    }
}

/// Immutable, per-adapter ordered selector chain.
#[derive(Debug)]
pub struct SelectorChain {
    stages: Vec<Stage>,
}

impl SelectorChain {
    pub fn new(site: &str, selectors: &[String], fallback: Option<&FallbackSpec>) -> AdapterResult<Self> {
        let mut stages = Vec::with_capacity(selectors.len() + 1);
        for css in selectors {
            stages.push(Stage::Structural {
                css: css.clone(),
                selector: parse_selector(site, css)?,
            });
        }
        if let Some(spec) = fallback {
            let exclude = spec
                .exclude
                .iter()
                .map(|css| parse_selector(site, css))
                .collect::<AdapterResult<Vec<_>>>()?;
            stages.push(Stage::Heuristic {
                css: spec.query.clone(),
                heuristic: Heuristic {
                    query: parse_selector(site, &spec.query)?,
                    exclude,
                    require_class: spec.require_class.clone(),
                },
            });
        }
        Ok(Self { stages })
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Candidates from the first stage with a non-empty result, in document order.
    pub fn select<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        self.stages
            .iter()
            .map(|stage| (stage, stage.run(doc)))
            .find(|(_, found)| !found.is_empty())
            .map(|(stage, found)| {
                debug!(selector = stage.css(), count = found.len(), "selector matched");
                found
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(selectors: &[&str], fallback: Option<FallbackSpec>) -> SelectorChain {
        let selectors: Vec<String> = selectors.iter().map(|s| s.to_string()).collect();
        SelectorChain::new("test", &selectors, fallback.as_ref()).unwrap()
    }

    fn ids(found: &[ElementRef<'_>]) -> Vec<String> {
        found
            .iter()
            .map(|el| el.value().attr("id").unwrap_or("").to_string())
            .collect()
    }

    fn fallback(query: &str, exclude: &[&str], require_class: &[&str]) -> FallbackSpec {
        FallbackSpec {
            query: query.to_string(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            require_class: require_class.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn first_non_empty_stage_wins_without_merging() {
        let doc = Html::parse_document(
            r#"<div class="b" id="b1"></div><div class="a" id="a1"></div><div class="b" id="b2"></div>"#,
        );
        let c = chain(&[".missing", ".a", ".b"], None);
        assert_eq!(ids(&c.select(&doc)), vec!["a1"]);
    }

    #[test]
    fn structural_results_are_in_document_order() {
        let doc = Html::parse_document(
            r#"<p class="u" id="1"></p><section><p class="u" id="2"></p></section><p class="u" id="3"></p>"#,
        );
        let c = chain(&[".u"], None);
        assert_eq!(ids(&c.select(&doc)), vec!["1", "2", "3"]);
    }

    #[test]
    fn foster_parented_content_keeps_document_order() {
        // html5ever moves the stray div in front of the table while parsing
        let doc = Html::parse_document(
            r#"<table><tr><td><div class="u" id="second">b</div></td></tr><div class="u" id="first">a</div></table>"#,
        );
        let c = chain(&[".u"], None);
        assert_eq!(ids(&c.select(&doc)), vec!["first", "second"]);

        let h = chain(&[], Some(fallback(".u", &[], &[])));
        assert_eq!(ids(&h.select(&doc)), vec!["first", "second"]);
    }

    #[test]
    fn heuristic_runs_only_when_structural_stages_are_empty() {
        let doc = Html::parse_document(
            r#"<div class="message" id="m1">hi</div><div class="user" id="u1">me</div>"#,
        );
        let fb = fallback(r#"[class*="message"]"#, &[], &[]);

        let with_hit = chain(&[".user"], Some(fb.clone()));
        assert_eq!(ids(&with_hit.select(&doc)), vec!["u1"]);

        let without_hit = chain(&[".nothing"], Some(fb));
        assert_eq!(ids(&without_hit.select(&doc)), vec!["m1"]);
    }

    #[test]
    fn heuristic_excludes_candidates_with_assistant_descendants() {
        let doc = Html::parse_document(
            r#"<div class="message" id="user">question</div>
               <div class="message" id="bot"><span class="assistant-avatar"></span>answer</div>"#,
        );
        let c = chain(&[], Some(fallback(r#"[class*="message"]"#, &[r#"[class*="assistant"]"#], &[])));
        assert_eq!(ids(&c.select(&doc)), vec!["user"]);
    }

    #[test]
    fn exclude_marker_on_candidate_itself_does_not_exclude() {
        let doc = Html::parse_document(r#"<div class="message assistant" id="m">text</div>"#);
        let c = chain(&[], Some(fallback(r#"[class*="message"]"#, &[r#"[class*="assistant"]"#], &[])));
        assert_eq!(ids(&c.select(&doc)), vec!["m"]);
    }

    #[test]
    fn heuristic_requires_non_empty_text() {
        let doc = Html::parse_document(
            r#"<div class="message" id="blank">   </div><div class="message" id="full">x</div>"#,
        );
        let c = chain(&[], Some(fallback(r#"[class*="message"]"#, &[], &[])));
        assert_eq!(ids(&c.select(&doc)), vec!["full"]);
    }

    #[test]
    fn heuristic_class_requirement() {
        let doc = Html::parse_document(
            r#"<div class="message model" id="model">a</div><div class="message user-turn" id="user">b</div>"#,
        );
        let c = chain(&[], Some(fallback(r#"[class*="message"]"#, &[], &["user", "query"])));
        assert_eq!(ids(&c.select(&doc)), vec!["user"]);
    }

    #[test]
    fn nothing_found_is_empty() {
        let doc = Html::parse_document("<p>plain</p>");
        let c = chain(&[".a"], Some(fallback(".message", &[], &[])));
        assert!(c.select(&doc).is_empty());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn bad_selector_fails_at_construction() {
        let bad = vec!["div[".to_string()];
        assert!(SelectorChain::new("test", &bad, None).is_err());
    }
}
