//! # pdfoutline
//!
//! Heuristic outline extraction for PDF documents.
//!
//! This library classifies the formatted text of a paginated document into a
//! hierarchical outline: a document title plus H1/H2/H3 headings with page
//! numbers. No machine learning is involved; classification is driven by a
//! document-specific font baseline, boldness, multilingual heading-marker
//! patterns, text shape, and page position.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{outline_file, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = outline_file("document.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Font baseline analysis**: body size inferred per document, resistant
//!   to boilerplate skew
//! - **Multilingual markers**: Latin, Devanagari, and CJK heading patterns,
//!   extensible as data
//! - **Graceful degradation**: image-only and single-font documents produce
//!   valid (possibly empty) outlines instead of errors
//! - **Batch processing**: one JSON file per input document, parse failures
//!   never abort the run

pub mod batch;
pub mod classify;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use batch::{process_dir, BatchOptions, BatchSummary, DocumentFailure};
pub use classify::{
    compute_baseline, FontBaseline, MarkerPattern, PatternTable, ScoreConfig, ScoreWeights,
    ScoredCandidate, TitleConfig,
};
pub use error::{Error, Result};
pub use extract::{FragmentSource, PdfFragmentSource};
pub use model::{HeadingEntry, HeadingLevel, Outline, TextFragment};
pub use render::JsonFormat;

use std::path::Path;

/// Extract an outline from fragments using the default configuration.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline, TextFragment};
///
/// let fragments = vec![
///     TextFragment::new("Introduction", 18.0, true, 0, 72.0, 72.0, 0),
///     TextFragment::new("Plenty of body text under the heading.", 12.0, false, 0, 120.0, 72.0, 1),
/// ];
/// let outline = extract_outline(fragments);
/// assert_eq!(outline.headings.len(), 1);
/// ```
pub fn extract_outline(fragments: Vec<TextFragment>) -> Outline {
    OutlineExtractor::new().extract(fragments)
}

/// Extract an outline from a PDF file using the default configuration.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::outline_file;
///
/// let outline = outline_file("document.pdf").unwrap();
/// println!("{} ({} headings)", outline.title, outline.headings.len());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    OutlineExtractor::new().extract_file(path)
}

/// Configurable outline extraction pipeline.
///
/// Runs the full per-document sequence: font baseline, title extraction,
/// fragment scoring, outline assembly. The baseline is always computed
/// before any scoring begins.
///
/// # Example
///
/// ```
/// use pdfoutline::{HeadingLevel, OutlineExtractor};
///
/// let extractor = OutlineExtractor::new()
///     .with_marker("korean-chapter", r"^제\d+장", Some(HeadingLevel::H1))
///     .unwrap();
/// let outline = extractor.extract(Vec::new());
/// assert!(outline.is_empty());
/// ```
pub struct OutlineExtractor {
    config: ScoreConfig,
    title_config: TitleConfig,
    patterns: PatternTable,
}

impl OutlineExtractor {
    /// Create an extractor with the default configuration and the built-in
    /// pattern table.
    pub fn new() -> Self {
        Self {
            config: ScoreConfig::default(),
            title_config: TitleConfig::default(),
            patterns: PatternTable::builtin(),
        }
    }

    /// Replace the scoring configuration.
    pub fn with_config(mut self, config: ScoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the title-extraction configuration.
    pub fn with_title_config(mut self, config: TitleConfig) -> Self {
        self.title_config = config;
        self
    }

    /// Replace the pattern table entirely.
    pub fn with_patterns(mut self, patterns: PatternTable) -> Self {
        self.patterns = patterns;
        self
    }

    /// Add one marker pattern to the current table.
    pub fn with_marker(
        mut self,
        name: impl Into<String>,
        pattern: &str,
        hint: Option<HeadingLevel>,
    ) -> Result<Self> {
        self.patterns = self.patterns.with_marker(name, pattern, hint)?;
        Ok(self)
    }

    /// The active scoring configuration.
    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Run the pipeline over a document's fragments.
    ///
    /// Zero fragments yield an empty outline; a single-font document falls
    /// back to non-font signals. This method never fails.
    pub fn extract(&self, fragments: Vec<TextFragment>) -> Outline {
        if fragments.is_empty() {
            return Outline::empty();
        }

        let baseline = compute_baseline(&fragments);
        log::debug!(
            "baseline {:.1}pt over {} fragment(s), {} distinct size(s)",
            baseline.body_size,
            fragments.len(),
            baseline.distinct_sizes
        );

        let title = classify::extract_title(&fragments, &self.patterns, &self.title_config);

        let scorer = classify::HeadingScorer::new(&self.config, &self.patterns, baseline);
        let candidates: Vec<ScoredCandidate> =
            fragments.into_iter().map(|f| scorer.score(f)).collect();

        classify::assemble(candidates, title)
    }

    /// Extract fragments from a PDF file, then run the pipeline.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let source = PdfFragmentSource::new();
        let fragments = FragmentSource::extract(&source, path.as_ref())?;
        Ok(self.extract(fragments))
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new()
    }
}
