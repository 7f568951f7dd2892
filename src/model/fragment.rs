//! Text fragment type produced by the extraction adapter.

use serde::{Deserialize, Serialize};

/// A contiguous run of text sharing one font size and weight on one page.
///
/// Fragments are produced by a [`FragmentSource`](crate::extract::FragmentSource)
/// in extraction order, which is not necessarily reading order; sorting into
/// reading order is the assembler's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content
    pub text: String,

    /// Font size in points
    pub font_size: f32,

    /// Whether the font appears to be bold
    pub is_bold: bool,

    /// Page index (0-based)
    pub page: usize,

    /// Vertical position, measured from the top of the page (smaller = higher)
    pub y: f32,

    /// Horizontal position (left edge)
    pub x: f32,

    /// Original extraction order index within the document
    pub order_index: usize,
}

impl TextFragment {
    /// Create a new text fragment.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        is_bold: bool,
        page: usize,
        y: f32,
        x: f32,
        order_index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            is_bold,
            page,
            y,
            x,
            order_index,
        }
    }

    /// Number of whitespace-separated words in the fragment.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Number of characters in the trimmed text.
    pub fn char_count(&self) -> usize {
        self.text.trim().chars().count()
    }

    /// Check if every alphabetic character is uppercase.
    ///
    /// Returns false for text with no alphabetic characters at all, so
    /// numeric strings do not read as "all caps".
    pub fn is_all_caps(&self) -> bool {
        let mut has_alpha = false;
        for c in self.text.chars().filter(|c| c.is_alphabetic()) {
            has_alpha = true;
            if !c.is_uppercase() {
                return false;
            }
        }
        has_alpha
    }

    /// Check if the fragment reads as a title-cased line: the first word
    /// starts uppercase and at least half of all words do.
    pub fn is_title_case(&self) -> bool {
        let words: Vec<&str> = self.text.split_whitespace().collect();
        if words.is_empty() {
            return false;
        }

        let starts_upper = |w: &&str| {
            w.chars()
                .find(|c| c.is_alphabetic())
                .is_some_and(|c| c.is_uppercase())
        };

        if !starts_upper(&words[0]) {
            return false;
        }

        let upper = words.iter().filter(|w| starts_upper(w)).count();
        upper * 2 >= words.len()
    }
}
