//! Search keys for locating markers.

use std::ops::Range;

use regex::Regex;

/// Trait for anything that can locate a marker in a document.
///
/// Implementations must return the first match that starts at or after
/// `from`. `from` is always a character boundary of `haystack`.
pub trait KeyMatcher {
    /// Find the first match at or after `from`.
    fn find_from(&self, haystack: &str, from: usize) -> Option<Range<usize>>;

    /// Human-readable description used in logs.
    fn describe(&self) -> String;
}

impl KeyMatcher for str {
    fn find_from(&self, haystack: &str, from: usize) -> Option<Range<usize>> {
        let start = from + haystack.get(from..)?.find(self)?;
        Some(start..start + self.len())
    }

    fn describe(&self) -> String {
        format!("literal {self:?}")
    }
}

impl KeyMatcher for Regex {
    fn find_from(&self, haystack: &str, from: usize) -> Option<Range<usize>> {
        // find_at keeps the text before `from` as context, so `^` under (?m)
        // still only matches at real line starts.
        self.find_at(haystack, from).map(|m| m.range())
    }

    fn describe(&self) -> String {
        format!("pattern /{}/", self.as_str())
    }
}

/// Literal text that only matches at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePrefix(pub String);

impl KeyMatcher for LinePrefix {
    fn find_from(&self, haystack: &str, from: usize) -> Option<Range<usize>> {
        let tail = haystack.get(from..)?;
        tail.match_indices(self.0.as_str())
            .map(|(i, _)| from + i)
            .find(|&start| start == 0 || haystack.as_bytes()[start - 1] == b'\n')
            .map(|start| start..start + self.0.len())
    }

    fn describe(&self) -> String {
        format!("line prefix {:?}", self.0)
    }
}

/// Search key of a marker.
#[derive(Debug, Clone)]
pub enum MarkerKey {
    /// Exact substring anywhere in the document.
    Literal(String),

    /// Exact substring at the start of a line.
    LinePrefix(LinePrefix),

    /// Regular expression; the structural-predicate form of a key.
    Pattern(Regex),
}

impl MarkerKey {
    /// Text used as the marker's name when none is declared.
    #[must_use]
    pub fn default_name(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::LinePrefix(prefix) => prefix.0.clone(),
            Self::Pattern(regex) => regex.as_str().to_string(),
        }
    }
}

impl KeyMatcher for MarkerKey {
    fn find_from(&self, haystack: &str, from: usize) -> Option<Range<usize>> {
        match self {
            Self::Literal(text) => text.as_str().find_from(haystack, from),
            Self::LinePrefix(prefix) => prefix.find_from(haystack, from),
            Self::Pattern(regex) => regex.find_from(haystack, from),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Literal(text) => text.as_str().describe(),
            Self::LinePrefix(prefix) => prefix.describe(),
            Self::Pattern(regex) => regex.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_find_from() {
        let text = "ab--ab--ab";
        assert_eq!("ab".find_from(text, 0), Some(0..2));
        assert_eq!("ab".find_from(text, 1), Some(4..6));
        assert_eq!("ab".find_from(text, 9), None);
        assert_eq!("zz".find_from(text, 0), None);
    }

    #[test]
    fn test_literal_find_from_past_end() {
        assert_eq!("a".find_from("abc", 10), None);
    }

    #[test]
    fn test_line_prefix_only_matches_line_start() {
        let text = "let x = fn_clamp;\nfn clamp_time() {}\n";
        let key = LinePrefix("fn clamp".to_string());
        assert_eq!(key.find_from(text, 0), Some(18..26));
    }

    #[test]
    fn test_line_prefix_at_document_start() {
        let key = LinePrefix("use ".to_string());
        assert_eq!(key.find_from("use std::fmt;\n", 0), Some(0..4));
    }

    #[test]
    fn test_line_prefix_skips_indented() {
        let text = "impl X {\n    fn plate() {}\n}\nfn plate() {}\n";
        let key = LinePrefix("fn plate".to_string());
        let found = key.find_from(text, 0).unwrap();
        assert_eq!(&text[found.clone()], "fn plate");
        assert_eq!(found.start, text.rfind("fn plate").unwrap());
    }

    #[test]
    fn test_pattern_find_from_respects_line_anchor() {
        let text = "xconst A: u8 = 1;\nconst B: u8 = 2;\n";
        let key = Regex::new(r"(?m)^const ").unwrap();
        // Starting the search mid-line must not make `^` match there.
        assert_eq!(key.find_from(text, 1), Some(18..24));
    }

    #[test]
    fn test_pattern_structural_predicate() {
        let text = "#[derive(Debug)]\npub struct Other;\n#[derive(Clone)]\npub struct PreviewStats;\n";
        let key = Regex::new(r"(?m)^#\[derive.*\n.*PreviewStats").unwrap();
        let found = key.find_from(text, 0).unwrap();
        assert_eq!(found.start, text.find("#[derive(Clone)]").unwrap());
    }

    #[test]
    fn test_marker_key_default_name() {
        assert_eq!(
            MarkerKey::Literal("struct FrameCache".to_string()).default_name(),
            "struct FrameCache"
        );
        assert_eq!(
            MarkerKey::Pattern(Regex::new("^a").unwrap()).default_name(),
            "^a"
        );
    }
}
