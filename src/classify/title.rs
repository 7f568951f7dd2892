//! Document title extraction.
//!
//! The title is taken from the first page: the largest-font run near the top,
//! with boilerplate and heading-marker lines excluded. Finding no usable
//! candidate is a normal outcome and yields an empty title.

use unicode_normalization::UnicodeNormalization;

use crate::classify::patterns::PatternTable;
use crate::model::TextFragment;

/// Tunable constants for title selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleConfig {
    /// Fraction of the first page's vertical extent considered (from the top)
    pub top_fraction: f32,

    /// Fragments within this many points of the maximal size join the title
    pub size_tolerance: f32,

    /// Two candidate lines are vertically adjacent when their y gap is at
    /// most this multiple of the title font size
    pub line_gap_factor: f32,

    /// Minimum character count for a meaningful title
    pub min_chars: usize,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            top_fraction: 0.4,
            size_tolerance: 0.5,
            line_gap_factor: 2.0,
            min_chars: 3,
        }
    }
}

/// Extract the document title from the first page's fragments.
///
/// Selection: restrict to the top window of page 0, drop candidates matching
/// exclusion rules (noise, heading markers, too-short strings), pick the
/// maximal font size, and join the leading run of vertically adjacent
/// fragments sharing that size in reading order. Internal Unicode content
/// passes through unaltered; only surrounding whitespace is normalized.
pub fn extract_title(
    fragments: &[TextFragment],
    patterns: &PatternTable,
    config: &TitleConfig,
) -> String {
    let page0: Vec<&TextFragment> = fragments
        .iter()
        .filter(|f| f.page == 0 && !f.text.trim().is_empty())
        .collect();
    if page0.is_empty() {
        return String::new();
    }

    // Vertical extent of the first page, approximated by the lowest fragment.
    let max_y = page0.iter().map(|f| f.y).fold(0.0_f32, f32::max);
    let window = config.top_fraction * max_y;

    let mut candidates: Vec<&TextFragment> = page0
        .iter()
        .copied()
        .filter(|f| max_y <= 0.0 || f.y <= window)
        .filter(|f| !is_excluded(f, patterns, config))
        .collect();
    if candidates.is_empty() {
        return String::new();
    }

    let max_size = candidates
        .iter()
        .map(|f| f.font_size)
        .fold(0.0_f32, f32::max);
    candidates.retain(|f| f.font_size >= max_size - config.size_tolerance);
    candidates.sort_by(|a, b| {
        a.y.partial_cmp(&b.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    // Keep the leading run of vertically adjacent lines; a large gap means
    // the next same-sized text belongs to something else.
    let max_gap = config.line_gap_factor * max_size;
    let mut parts: Vec<&str> = vec![candidates[0].text.trim()];
    let mut last_y = candidates[0].y;
    for fragment in &candidates[1..] {
        if fragment.y - last_y > max_gap {
            break;
        }
        parts.push(fragment.text.trim());
        last_y = fragment.y;
    }

    let title = parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if title.chars().count() < config.min_chars {
        return String::new();
    }
    title
}

/// Exclusion rules: strings that cannot be titles.
fn is_excluded(fragment: &TextFragment, patterns: &PatternTable, config: &TitleConfig) -> bool {
    let text: String = fragment.text.trim().nfc().collect();
    text.chars().count() < config.min_chars
        || patterns.is_noise(&text)
        || patterns.find_match(&text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, size: f32, page: usize, y: f32) -> TextFragment {
        TextFragment::new(text, size, true, page, y, 72.0, 0)
    }

    fn extract(fragments: &[TextFragment]) -> String {
        extract_title(fragments, &PatternTable::builtin(), &TitleConfig::default())
    }

    #[test]
    fn test_largest_font_on_first_page() {
        let fragments = vec![
            fragment("Understanding Neural Networks", 24.0, 0, 80.0),
            fragment("A body paragraph under the title.", 12.0, 0, 160.0),
            fragment("A footer line near the page bottom.", 9.0, 0, 720.0),
            fragment("Bigger text on a later page", 32.0, 1, 80.0),
        ];
        assert_eq!(extract(&fragments), "Understanding Neural Networks");
    }

    #[test]
    fn test_adjacent_lines_merge_in_reading_order() {
        let fragments = vec![
            fragment("Request for Proposal:", 22.0, 0, 100.0),
            fragment("Library Digitization Services", 22.0, 0, 128.0),
            fragment("Issued by the City", 12.0, 0, 200.0),
            fragment("page footer text down low", 9.0, 0, 720.0),
        ];
        assert_eq!(
            extract(&fragments),
            "Request for Proposal: Library Digitization Services"
        );
    }

    #[test]
    fn test_distant_same_size_text_not_merged() {
        let fragments = vec![
            fragment("Annual Report", 20.0, 0, 60.0),
            fragment("Confidential", 20.0, 0, 700.0),
            fragment("body body body body", 11.0, 0, 300.0),
        ];
        // Same size but far down the page: outside the top window entirely.
        assert_eq!(extract(&fragments), "Annual Report");
    }

    #[test]
    fn test_boilerplate_excluded() {
        let fragments = vec![
            fragment("Page 1 of 9", 26.0, 0, 40.0),
            fragment("Actual Title Here", 18.0, 0, 90.0),
            fragment("long body text to fill the page out", 11.0, 0, 400.0),
        ];
        assert_eq!(extract(&fragments), "Actual Title Here");
    }

    #[test]
    fn test_heading_markers_excluded_from_title() {
        let fragments = vec![
            fragment("Chapter 1 Getting Started", 20.0, 0, 70.0),
            fragment("body text body text body text", 11.0, 0, 300.0),
        ];
        // The only large line is a heading, not a title.
        assert_eq!(extract(&fragments), "");
    }

    #[test]
    fn test_empty_first_page() {
        assert_eq!(extract(&[]), "");
        let later_only = vec![fragment("Text on page 2", 20.0, 1, 50.0)];
        assert_eq!(extract(&later_only), "");
    }

    #[test]
    fn test_unicode_passes_through_unaltered() {
        let title = "संयुक्त राष्ट्र सतत विकास रिपोर्ट";
        let fragments = vec![
            fragment(title, 22.0, 0, 60.0),
            fragment("और यह सामान्य पाठ है", 11.0, 0, 300.0),
        ];
        assert_eq!(extract(&fragments), title);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let fragments = vec![
            fragment("  Spaced   Out\tTitle  ", 20.0, 0, 60.0),
            fragment("body text goes here", 11.0, 0, 400.0),
        ];
        assert_eq!(extract(&fragments), "Spaced Out Title");
    }
}
