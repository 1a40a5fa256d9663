//! Markup patterns for Cambridge Dictionary entry pages.
//!
//! Each field is described from the strictest pattern to the most permissive one.

use std::sync::LazyLock;

use regex::Regex;

/// Body of a strict capture: plain text with at most one level of inline markup.
const STRICT_BODY: &str = r"([^<]*(?:<[^/>]+>[^<]*</[^>]+>[^<]*)*)";

/// Any markup tag, opening or closing.
pub(crate) static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));

/// The pattern set used for Cambridge Dictionary pages.
pub static CAMBRIDGE: LazyLock<MarkupPatterns> = LazyLock::new(MarkupPatterns::cambridge);

/// Strict and permissive capture patterns for one list field.
#[derive(Debug, Clone)]
pub struct ListPatterns {
    /// Requires the literal marker and well-formed inline markup.
    pub strict: Regex,
    /// Non-greedy capture up to the first closing marker.
    pub permissive: Regex,
}

impl ListPatterns {
    /// Captures every marker occurrence in `text`, in document order.
    ///
    /// The permissive pattern finds the occurrences; the strict capture is used for an
    /// occurrence whenever the strict pattern matches at the same position.
    pub fn captures<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.permissive.captures_iter(text).filter_map(|loose| {
            let start = loose.get(0)?.start();

            let strict = self
                .strict
                .captures_at(text, start)
                .filter(|strict| strict.get(0).is_some_and(|m| m.start() == start))
                .and_then(|strict| strict.get(1));

            strict.or_else(|| loose.get(1)).map(|m| m.as_str())
        })
    }
}

/// Every pattern needed to assemble a record from one kind of dictionary page.
#[derive(Debug, Clone)]
pub struct MarkupPatterns {
    pub pronunciation: Vec<Regex>,
    pub part_of_speech: Vec<Regex>,
    /// Captures the body of one part-of-speech entry.
    pub block: Regex,
    pub definition: ListPatterns,
    pub example: ListPatterns,
}

impl MarkupPatterns {
    fn cambridge() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("cambridge markup pattern");

        Self {
            pronunciation: vec![
                compile(r#"<span class="ipa dipa lpr-2 lpl-1">([^<]+)</span>"#),
                compile(r#"<span class="ipa dipa[^>]*">([^<]+)</span>"#),
                compile(r#"<span class="pron dpron[^>]*">.*?<span class="ipa[^>]*">([^<]+)</span>"#),
            ],
            part_of_speech: vec![
                compile(r#"<span class="pos dpos">([^<]+)</span>"#),
                compile(r#"<span class="pos[^>]*">([^<]+)</span>"#),
            ],
            block: compile(r#"(?s)<div class="pos-body">(.*?)</div>\s*</div>\s*</div>"#),
            definition: ListPatterns {
                strict: compile(&format!(
                    r#"<div class="def ddef_d db">{STRICT_BODY}</div>"#
                )),
                permissive: compile(r#"(?s)<div class="def ddef_d db">(.*?)</div>"#),
            },
            example: ListPatterns {
                strict: compile(&format!(r#"<span class="eg deg">{STRICT_BODY}</span>"#)),
                permissive: compile(r#"(?s)<span class="eg deg">(.*?)</span>"#),
            },
        }
    }
}
