//! Outline output types.

use serde::{Deserialize, Serialize};

/// Heading level of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Subsection heading
    H2,
    /// Sub-subsection heading
    H3,
}

impl HeadingLevel {
    /// Priority rank; H1 outranks H2 outranks H3.
    pub fn rank(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 3,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 1,
        }
    }

    /// The level label as it appears in output ("H1", "H2", "H3").
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Heading level
    pub level: HeadingLevel,

    /// Trimmed heading text
    pub text: String,

    /// Page index (0-based) the source fragment appears on
    pub page: usize,
}

impl HeadingEntry {
    /// Create a new heading entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: usize) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The extracted outline of one document: a title plus ordered headings.
///
/// Serializes to the output contract:
/// `{ "title": "...", "outline": [ { "level": "H1", "text": "...", "page": 0 }, ... ] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title; empty when no candidate survived exclusion
    pub title: String,

    /// Headings in document reading order
    #[serde(rename = "outline")]
    pub headings: Vec<HeadingEntry>,
}

impl Outline {
    /// Create a new outline.
    pub fn new(title: impl Into<String>, headings: Vec<HeadingEntry>) -> Self {
        Self {
            title: title.into(),
            headings,
        }
    }

    /// An outline with no title and no headings, the output for a document
    /// that yields zero fragments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the outline carries neither title nor headings.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.headings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_rank() {
        assert!(HeadingLevel::H1.rank() > HeadingLevel::H2.rank());
        assert!(HeadingLevel::H2.rank() > HeadingLevel::H3.rank());
    }

    #[test]
    fn test_level_serializes_as_label() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");
    }

    #[test]
    fn test_outline_field_names() {
        let outline = Outline::new(
            "Sample",
            vec![HeadingEntry::new(HeadingLevel::H1, "Introduction", 0)],
        );
        let json = serde_json::to_string(&outline).unwrap();
        assert!(json.contains("\"outline\""));
        assert!(json.contains("\"level\":\"H1\""));
        assert!(json.contains("\"page\":0"));
    }

    #[test]
    fn test_empty_outline() {
        let outline = Outline::empty();
        assert!(outline.is_empty());
        assert_eq!(
            serde_json::to_string(&outline).unwrap(),
            "{\"title\":\"\",\"outline\":[]}"
        );
    }
}
