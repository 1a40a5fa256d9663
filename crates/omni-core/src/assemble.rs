//! Assembly of a [`DictionaryRecord`] from a fetched dictionary page.
//!
//! Every step degrades to "absent" instead of failing: scalar fields fall back to empty
//! strings, lists fall back from strict to permissive patterns and from per-block to
//! whole-document extraction. The only failure is a record without definitions.

use std::collections::HashSet;

use crate::dictionary::DictionaryRecord;
use crate::extract::extract_first;
use crate::patterns::{CAMBRIDGE, ListPatterns, MarkupPatterns, TAG_RE};

/// Maximum number of definitions and of examples kept on a record.
pub const MAX_ENTRIES: usize = 3;
/// Cleaned captures of this many characters or fewer are discarded.
pub const MIN_ENTRY_CHARS: usize = 3;

/// Builds dictionary records from raw page markup.
#[derive(Debug, Clone, Copy)]
pub struct RecordAssembler {
    patterns: &'static MarkupPatterns,
}

impl RecordAssembler {
    /// Assembler for Cambridge Dictionary pages.
    pub fn cambridge() -> Self {
        Self {
            patterns: &CAMBRIDGE,
        }
    }

    /// Extracts a record for `term` from `document`.
    ///
    /// Returns `None` when no definition could be recovered.
    pub fn assemble(&self, document: &str, term: &str) -> Option<DictionaryRecord> {
        let patterns = self.patterns;

        let pronunciation = extract_first(document, &patterns.pronunciation).unwrap_or_default();
        let part_of_speech = extract_first(document, &patterns.part_of_speech).unwrap_or_default();

        let blocks = self.segment(document);
        tracing::debug!("'{}': {} content blocks", term, blocks.len());

        let definitions = extract_list(document, &blocks, &patterns.definition);
        let examples = extract_list(document, &blocks, &patterns.example);

        tracing::debug!(
            "'{}': {} definitions, {} examples",
            term,
            definitions.len(),
            examples.len()
        );

        if definitions.is_empty() {
            return None;
        }

        Some(DictionaryRecord {
            term: term.to_string(),
            pronunciation,
            part_of_speech,
            definitions,
            examples,
        })
    }

    /// Splits the document into part-of-speech bodies, or returns it whole when none are found.
    fn segment<'d>(&self, document: &'d str) -> Vec<&'d str> {
        let blocks: Vec<&str> = self
            .patterns
            .block
            .captures_iter(document)
            .filter_map(|captures| captures.get(1))
            .map(|m| m.as_str())
            .collect();

        if blocks.is_empty() {
            vec![document]
        } else {
            blocks
        }
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::cambridge()
    }
}

/// Assembles a record from a Cambridge Dictionary page.
pub fn assemble(document: &str, term: &str) -> Option<DictionaryRecord> {
    RecordAssembler::cambridge().assemble(document, term)
}

/// Removes markup tags and surrounding whitespace, keeping the text content.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").trim().to_string()
}

fn extract_list(document: &str, blocks: &[&str], patterns: &ListPatterns) -> Vec<String> {
    let mut entries: Vec<String> = blocks
        .iter()
        .flat_map(|block| patterns.captures(block))
        .filter_map(clean)
        .collect();

    if entries.is_empty() {
        entries = patterns
            .permissive
            .captures_iter(document)
            .filter_map(|captures| captures.get(1))
            .filter_map(|m| clean(m.as_str()))
            .collect();
    }

    dedup_bounded(entries)
}

fn clean(capture: &str) -> Option<String> {
    let text = strip_tags(capture);

    (text.chars().count() > MIN_ENTRY_CHARS).then_some(text)
}

fn dedup_bounded(entries: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();

    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .take(MAX_ENTRIES)
        .collect()
}
