//! Heading scoring.
//!
//! Scoring is an explicit table of named signals. Each signal inspects one
//! fragment and returns a bounded contribution in `[0, 1]`; the final score
//! is the weighted sum. Weights and thresholds live in [`ScoreConfig`] so
//! they can be tuned and tested independently of the control flow. No single
//! signal's maximum weighted contribution reaches the heading threshold, so
//! no signal alone can make a fragment a heading.

use unicode_normalization::UnicodeNormalization;

use crate::classify::baseline::FontBaseline;
use crate::classify::patterns::{MarkerPattern, PatternTable};
use crate::model::{HeadingLevel, TextFragment};

/// Per-signal weights. Defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Font size relative to the document baseline
    pub font_ratio: f32,
    /// Bold font bonus
    pub bold: f32,
    /// Heading-marker pattern match bonus
    pub pattern: f32,
    /// Short title-case or all-caps shape bonus
    pub shape: f32,
    /// Near-top-of-page bonus
    pub position: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            font_ratio: 0.30,
            bold: 0.20,
            pattern: 0.25,
            shape: 0.15,
            position: 0.10,
        }
    }
}

/// Tunable constants for scoring and level assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    /// Signal weights
    pub weights: ScoreWeights,

    /// Minimum total score for a fragment to be a heading at all
    pub heading_threshold: f32,

    /// Font-ratio cut point for H1
    pub h1_ratio: f32,
    /// Font-ratio cut point for H2
    pub h2_ratio: f32,
    /// Font-ratio cut point for H3; slightly below 1.0 to absorb size jitter
    pub h3_ratio: f32,

    /// Fragments with more words than this are never headings
    pub max_heading_words: usize,
    /// Fragments with more characters than this are never headings
    pub max_heading_chars: usize,
    /// Fragments with fewer characters than this are never headings
    pub min_heading_chars: usize,

    /// Maximum word count for the shape signal to fire
    pub max_shape_words: usize,

    /// Fragments with `y` at or above the page top within this many points
    /// receive the position bonus
    pub top_region_y: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            heading_threshold: 0.35,
            h1_ratio: 1.5,
            h2_ratio: 1.2,
            h3_ratio: 0.98,
            max_heading_words: 20,
            max_heading_chars: 120,
            min_heading_chars: 3,
            max_shape_words: 10,
            top_region_y: 150.0,
        }
    }
}

/// A fragment together with its score and assigned level.
///
/// `level` is `None` for fragments below the heading threshold or vetoed
/// outright; only `Some` candidates reach the assembler.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// The source fragment
    pub fragment: TextFragment,
    /// Weighted sum of signal contributions
    pub score: f32,
    /// Assigned heading level, or `None`
    pub level: Option<HeadingLevel>,
}

impl ScoredCandidate {
    /// Whether this candidate surfaced as a heading.
    pub fn is_heading(&self) -> bool {
        self.level.is_some()
    }
}

/// Everything a signal function may inspect.
pub struct SignalInput<'a> {
    /// The fragment under evaluation
    pub fragment: &'a TextFragment,
    /// Trimmed, NFC-normalized text
    pub text: &'a str,
    /// Document font baseline
    pub baseline: &'a FontBaseline,
    /// Scoring constants
    pub config: &'a ScoreConfig,
    /// Marker rule matched against the text, if any
    pub marker: Option<&'a MarkerPattern>,
}

/// One named scoring signal.
pub struct Signal {
    /// Signal name, used in logs
    pub name: &'static str,
    /// Weight lookup into [`ScoreWeights`]
    pub weight: fn(&ScoreWeights) -> f32,
    /// Bounded contribution in `[0, 1]`
    pub eval: fn(&SignalInput) -> f32,
}

fn eval_font_ratio(input: &SignalInput) -> f32 {
    match input.baseline.ratio(input.fragment.font_size) {
        Some(ratio) => (ratio - 1.0).clamp(0.0, 1.0),
        None => 0.0,
    }
}

fn eval_bold(input: &SignalInput) -> f32 {
    if input.fragment.is_bold {
        1.0
    } else {
        0.0
    }
}

fn eval_pattern(input: &SignalInput) -> f32 {
    if input.marker.is_some() {
        1.0
    } else {
        0.0
    }
}

fn eval_shape(input: &SignalInput) -> f32 {
    let short = input.fragment.word_count() <= input.config.max_shape_words;
    if short && (input.fragment.is_all_caps() || input.fragment.is_title_case()) {
        1.0
    } else {
        0.0
    }
}

fn eval_position(input: &SignalInput) -> f32 {
    if input.fragment.y <= input.config.top_region_y {
        1.0
    } else {
        0.0
    }
}

/// The signal table. Order is presentation order only; contributions are
/// additive and independent.
pub fn signals() -> &'static [Signal] {
    static SIGNALS: [Signal; 5] = [
        Signal {
            name: "font-ratio",
            weight: |w| w.font_ratio,
            eval: eval_font_ratio,
        },
        Signal {
            name: "bold",
            weight: |w| w.bold,
            eval: eval_bold,
        },
        Signal {
            name: "pattern",
            weight: |w| w.pattern,
            eval: eval_pattern,
        },
        Signal {
            name: "shape",
            weight: |w| w.shape,
            eval: eval_shape,
        },
        Signal {
            name: "position",
            weight: |w| w.position,
            eval: eval_position,
        },
    ];
    &SIGNALS
}

/// Scores fragments against a document baseline and pattern table.
pub struct HeadingScorer<'a> {
    config: &'a ScoreConfig,
    patterns: &'a PatternTable,
    baseline: FontBaseline,
}

impl<'a> HeadingScorer<'a> {
    /// Create a scorer for one document. The baseline must be computed before
    /// any scoring begins.
    pub fn new(config: &'a ScoreConfig, patterns: &'a PatternTable, baseline: FontBaseline) -> Self {
        Self {
            config,
            patterns,
            baseline,
        }
    }

    /// Score one fragment and assign its level.
    pub fn score(&self, fragment: TextFragment) -> ScoredCandidate {
        let text: String = fragment.text.trim().nfc().collect();
        let chars = text.chars().count();

        // Hard vetoes. Body-length prose is never a heading regardless of
        // font size, and noise lines never surface.
        if chars < self.config.min_heading_chars
            || chars > self.config.max_heading_chars
            || fragment.word_count() > self.config.max_heading_words
            || self.patterns.is_noise(&text)
        {
            return ScoredCandidate {
                fragment,
                score: 0.0,
                level: None,
            };
        }

        let marker = self.patterns.find_match(&text);
        let input = SignalInput {
            fragment: &fragment,
            text: &text,
            baseline: &self.baseline,
            config: self.config,
            marker,
        };

        let score: f32 = signals()
            .iter()
            .map(|s| (s.weight)(&self.config.weights) * (s.eval)(&input))
            .sum();

        let level = if score >= self.config.heading_threshold {
            let hint = marker.and_then(|m| m.hint);
            Some(self.assign_level(fragment.font_size, hint, fragment.is_bold))
        } else {
            None
        };

        log::trace!(
            "scored {:?} page={} score={:.3} level={:?}",
            text,
            fragment.page,
            score,
            level
        );

        ScoredCandidate {
            fragment,
            score,
            level,
        }
    }

    /// Level assignment for a fragment that cleared the heading threshold.
    ///
    /// The final level is the higher-priority of the font-ratio band and the
    /// pattern hint: the font band can raise a hinted level but never lower
    /// it, which keeps assignment monotonic in the ratio and lets markers
    /// like "अध्याय 1" win at a band boundary. With no usable font signal the
    /// hint decides; with neither, bold fragments fall back to H2 and the
    /// rest to H3.
    fn assign_level(
        &self,
        font_size: f32,
        hint: Option<HeadingLevel>,
        is_bold: bool,
    ) -> HeadingLevel {
        let c = self.config;
        let fallback = || {
            hint.unwrap_or(if is_bold {
                HeadingLevel::H2
            } else {
                HeadingLevel::H3
            })
        };

        let Some(ratio) = self.baseline.ratio(font_size) else {
            return fallback();
        };

        let band = if ratio >= c.h1_ratio {
            Some(HeadingLevel::H1)
        } else if ratio >= c.h2_ratio {
            Some(HeadingLevel::H2)
        } else if ratio >= c.h3_ratio {
            Some(HeadingLevel::H3)
        } else {
            None
        };

        match (band, hint) {
            (Some(band), Some(hint)) => {
                if hint.rank() > band.rank() {
                    hint
                } else {
                    band
                }
            }
            (Some(band), None) => band,
            (None, _) => fallback(),
        }
    }
}
