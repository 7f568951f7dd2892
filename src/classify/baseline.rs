//! Font baseline analysis.
//!
//! The baseline is the body-text font size of a document, used as the
//! reference point for the font-ratio heading signal.

use std::collections::BTreeMap;

use crate::model::TextFragment;

/// The inferred body-text font size of one document.
///
/// `body_size` is always a size actually observed among the fragments, never
/// an interpolated or averaged value. An empty document yields the 0.0
/// sentinel, which disables font-ratio scoring downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontBaseline {
    /// Most frequent font size, weighted by character count
    pub body_size: f32,

    /// Number of distinct (bucketed) font sizes observed
    pub distinct_sizes: usize,
}

impl FontBaseline {
    /// Baseline for a document with no fragments.
    pub fn sentinel() -> Self {
        Self {
            body_size: 0.0,
            distinct_sizes: 0,
        }
    }

    /// Whether the font-ratio signal can be used at all.
    ///
    /// A document with zero fragments or a single font size carries no font
    /// information; scoring falls back to the non-font signals.
    pub fn font_signal_enabled(&self) -> bool {
        self.body_size > 0.0 && self.distinct_sizes > 1
    }

    /// Ratio of a fragment's size to the body size, or `None` when the font
    /// signal is disabled.
    pub fn ratio(&self, font_size: f32) -> Option<f32> {
        if self.font_signal_enabled() {
            Some(font_size / self.body_size)
        } else {
            None
        }
    }
}

/// Bucket key at 0.1pt precision, merging floating-point jitter
/// (11.98 and 12.01 land in the same bucket).
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// Compute the body-text font baseline for a document.
///
/// Builds a frequency table of font sizes bucketed at 0.1pt, weighted by
/// character count rather than fragment count so that short boilerplate
/// runs cannot outvote substantial body paragraphs. Ties prefer the smaller
/// size. Never fails: an empty fragment sequence yields the sentinel.
pub fn compute_baseline(fragments: &[TextFragment]) -> FontBaseline {
    // BTreeMap keeps bucket iteration ordered so tie-breaking is deterministic.
    let mut buckets: BTreeMap<i32, (usize, f32)> = BTreeMap::new();

    for fragment in fragments {
        let chars = fragment.char_count();
        if chars == 0 {
            continue;
        }
        let entry = buckets
            .entry(size_key(fragment.font_size))
            .or_insert((0, fragment.font_size));
        entry.0 += chars;
    }

    if buckets.is_empty() {
        return FontBaseline::sentinel();
    }

    let distinct_sizes = buckets.len();
    let mut body_size = 0.0;
    let mut best_weight = 0;
    for (weight, observed) in buckets.values() {
        // Strict comparison plus ascending key order: equal weights keep the
        // smaller size, since body text runs smaller than display text.
        if *weight > best_weight {
            best_weight = *weight;
            body_size = *observed;
        }
    }

    FontBaseline {
        body_size,
        distinct_sizes,
    }
}
