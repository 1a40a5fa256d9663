//! First-match-wins extraction of scalar fields from raw markup.
//!
//! Dictionary pages are not consistent about attribute order or class names, so a field is
//! described by an ordered list of patterns, strictest first. The first pattern that matches
//! anywhere in the document decides the value; later patterns are never consulted.

use regex::Regex;

/// A single matcher strategy that can pull one capture out of a document.
pub trait FieldPattern {
    /// Returns the captured region of the first match in `document`, if any.
    fn capture<'d>(&self, document: &'d str) -> Option<&'d str>;
}

/// Regular expressions capture their first group, or the whole match when they have none.
impl FieldPattern for Regex {
    fn capture<'d>(&self, document: &'d str) -> Option<&'d str> {
        let captures = self.captures(document)?;

        captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|m| m.as_str())
    }
}

/// A plain function used as a matcher.
#[derive(Clone, Copy)]
pub struct FnPattern(pub fn(&str) -> Option<&str>);

impl FieldPattern for FnPattern {
    fn capture<'d>(&self, document: &'d str) -> Option<&'d str> {
        (self.0)(document)
    }
}

impl<P: FieldPattern + ?Sized> FieldPattern for &P {
    fn capture<'d>(&self, document: &'d str) -> Option<&'d str> {
        (**self).capture(document)
    }
}

/// Evaluates `patterns` in order and returns the trimmed capture of the first one that matches.
///
/// Returns `None` when no pattern matches. An absent field is an expected outcome, not an error.
pub fn extract_first<P: FieldPattern>(document: &str, patterns: &[P]) -> Option<String> {
    patterns
        .iter()
        .find_map(|pattern| pattern.capture(document))
        .map(|captured| captured.trim().to_string())
}
