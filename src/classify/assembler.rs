//! Outline assembly.
//!
//! Merges scored candidates from all pages into the final outline: sorts into
//! document reading order, collapses adjacent duplicates, and pairs the
//! result with the extracted title.

use std::cmp::Ordering;

use crate::classify::scorer::ScoredCandidate;
use crate::model::{HeadingEntry, Outline};

/// Assemble the final outline from scored candidates.
///
/// Candidates without a level are dropped; the rest are sorted by page, then
/// vertical position, then extraction order. Consecutive entries with
/// identical trimmed text on the same page collapse into one, keeping the
/// higher-scoring candidate's level. Heading hierarchy is not renormalized
/// across pages.
pub fn assemble(candidates: Vec<ScoredCandidate>, title: impl Into<String>) -> Outline {
    let mut headings: Vec<ScoredCandidate> =
        candidates.into_iter().filter(|c| c.is_heading()).collect();

    headings.sort_by(|a, b| {
        a.fragment
            .page
            .cmp(&b.fragment.page)
            .then(
                a.fragment
                    .y
                    .partial_cmp(&b.fragment.y)
                    .unwrap_or(Ordering::Equal),
            )
            .then(a.fragment.order_index.cmp(&b.fragment.order_index))
    });

    let mut entries: Vec<(HeadingEntry, f32)> = Vec::new();
    for candidate in headings {
        let text = collapse_whitespace(&candidate.fragment.text);
        let Some(level) = candidate.level else {
            continue;
        };
        if text.is_empty() {
            continue;
        }

        if let Some((last, last_score)) = entries.last_mut() {
            if last.text == text && last.page == candidate.fragment.page {
                if candidate.score > *last_score {
                    last.level = level;
                    *last_score = candidate.score;
                }
                continue;
            }
        }

        entries.push((
            HeadingEntry::new(level, text, candidate.fragment.page),
            candidate.score,
        ));
    }

    Outline::new(title, entries.into_iter().map(|(entry, _)| entry).collect())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, TextFragment};

    fn candidate(
        text: &str,
        page: usize,
        y: f32,
        order: usize,
        level: Option<HeadingLevel>,
        score: f32,
    ) -> ScoredCandidate {
        ScoredCandidate {
            fragment: TextFragment::new(text, 16.0, true, page, y, 72.0, order),
            score,
            level,
        }
    }

    #[test]
    fn test_sorted_by_page_then_position() {
        let candidates = vec![
            candidate("Later", 2, 100.0, 7, Some(HeadingLevel::H2), 0.5),
            candidate("First", 0, 90.0, 3, Some(HeadingLevel::H1), 0.6),
            candidate("Lower on page two", 2, 400.0, 6, Some(HeadingLevel::H3), 0.4),
        ];
        let outline = assemble(candidates, "Doc");
        let texts: Vec<&str> = outline.headings.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Later", "Lower on page two"]);

        for pair in outline.headings.windows(2) {
            assert!(pair[0].page <= pair[1].page);
        }
    }

    #[test]
    fn test_order_index_breaks_y_ties() {
        let candidates = vec![
            candidate("Second", 0, 100.0, 5, Some(HeadingLevel::H2), 0.5),
            candidate("First", 0, 100.0, 4, Some(HeadingLevel::H2), 0.5),
        ];
        let outline = assemble(candidates, "");
        assert_eq!(outline.headings[0].text, "First");
        assert_eq!(outline.headings[1].text, "Second");
    }

    #[test]
    fn test_unleveled_candidates_dropped() {
        let candidates = vec![
            candidate("Heading", 0, 50.0, 0, Some(HeadingLevel::H1), 0.7),
            candidate("not a heading", 0, 60.0, 1, None, 0.1),
        ];
        let outline = assemble(candidates, "");
        assert_eq!(outline.headings.len(), 1);
    }

    #[test]
    fn test_adjacent_duplicates_collapse_to_one() {
        let candidates = vec![
            candidate("Overview", 1, 100.0, 2, Some(HeadingLevel::H2), 0.4),
            candidate("Overview", 1, 102.0, 3, Some(HeadingLevel::H1), 0.6),
        ];
        let outline = assemble(candidates, "");
        assert_eq!(outline.headings.len(), 1);
        // The higher-scoring duplicate's level wins.
        assert_eq!(outline.headings[0].level, HeadingLevel::H1);
    }

    #[test]
    fn test_same_text_on_different_pages_kept() {
        let candidates = vec![
            candidate("Summary", 1, 100.0, 2, Some(HeadingLevel::H2), 0.5),
            candidate("Summary", 3, 100.0, 9, Some(HeadingLevel::H2), 0.5),
        ];
        let outline = assemble(candidates, "");
        assert_eq!(outline.headings.len(), 2);
    }

    #[test]
    fn test_whitespace_collapsed_in_entries() {
        let candidates = vec![candidate(
            "  1.  Introduction \t ",
            0,
            50.0,
            0,
            Some(HeadingLevel::H1),
            0.7,
        )];
        let outline = assemble(candidates, "");
        assert_eq!(outline.headings[0].text, "1. Introduction");
    }

    #[test]
    fn test_empty_input() {
        let outline = assemble(Vec::new(), "");
        assert!(outline.is_empty());
    }
}
