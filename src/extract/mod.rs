//! Fragment extraction boundary.
//!
//! The classification engine never talks to a document parser directly; it
//! consumes [`TextFragment`] sequences from a [`FragmentSource`]. The crate
//! ships one implementation, [`PdfFragmentSource`], a thin adapter over the
//! `lopdf` parser. Alternative sources (other formats, pre-extracted dumps,
//! test fixtures) implement the same trait.

mod pdf;

pub use pdf::PdfFragmentSource;

use std::path::Path;

use crate::error::Result;
use crate::model::TextFragment;

/// A producer of text fragments for one document.
///
/// Implementations must yield fragments per page in ascending page order;
/// order within a page reflects extraction order, not reading order —
/// sorting into reading order is the outline assembler's responsibility.
pub trait FragmentSource: Send + Sync {
    /// Short name for logs and diagnostics.
    fn name(&self) -> &str;

    /// File extensions this source handles (lowercase, without the dot).
    fn extensions(&self) -> &[&str];

    /// Extract all fragments from the document at `path`.
    ///
    /// A failure here means the whole document could not be read; page-level
    /// anomalies inside a readable document must degrade to missing
    /// fragments instead of an error.
    fn extract(&self, path: &Path) -> Result<Vec<TextFragment>>;

    /// Check whether this source handles the given path, by extension.
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.extensions().contains(&e.as_str()))
    }
}
