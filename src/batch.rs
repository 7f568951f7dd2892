//! Batch processing over a directory of documents.
//!
//! Each document is processed in isolation: a parse failure is recorded and
//! the run continues, an empty document still produces an output file with an
//! empty outline. Documents may be processed in parallel; per-document
//! semantics do not change either way.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::FragmentSource;
use crate::render::{write_outline, JsonFormat};
use crate::OutlineExtractor;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process documents in parallel
    pub parallel: bool,

    /// JSON output format
    pub format: JsonFormat,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the JSON output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            format: JsonFormat::Pretty,
        }
    }
}

/// A document that could not be processed.
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    /// Input path of the failed document
    pub path: PathBuf,
    /// Failure description
    pub error: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Output files written, in input order
    pub written: Vec<PathBuf>,
    /// Documents skipped because they could not be parsed
    pub failures: Vec<DocumentFailure>,
}

impl BatchSummary {
    /// Total number of documents attempted.
    pub fn total(&self) -> usize {
        self.written.len() + self.failures.len()
    }
}

/// Process every supported document in `input_dir`, writing one `.json` file
/// per document into `output_dir` (same base name).
///
/// A document that fails to parse is recorded in the summary and does not
/// affect its siblings. A readable document always yields an output file,
/// even when no structure was found.
pub fn process_dir(
    input_dir: &Path,
    output_dir: &Path,
    source: &dyn FragmentSource,
    extractor: &OutlineExtractor,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    if !input_dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "not a directory: {}",
            input_dir.display()
        )));
    }
    fs::create_dir_all(output_dir)?;

    let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && source.supports(path))
        .collect();
    inputs.sort();

    log::info!(
        "processing {} document(s) from {}",
        inputs.len(),
        input_dir.display()
    );

    let results: Vec<std::result::Result<PathBuf, DocumentFailure>> = if options.parallel {
        inputs
            .par_iter()
            .map(|path| process_one(path, output_dir, source, extractor, options))
            .collect()
    } else {
        inputs
            .iter()
            .map(|path| process_one(path, output_dir, source, extractor, options))
            .collect()
    };

    let mut summary = BatchSummary::default();
    for result in results {
        match result {
            Ok(path) => summary.written.push(path),
            Err(failure) => summary.failures.push(failure),
        }
    }
    Ok(summary)
}

fn process_one(
    input: &Path,
    output_dir: &Path,
    source: &dyn FragmentSource,
    extractor: &OutlineExtractor,
    options: &BatchOptions,
) -> std::result::Result<PathBuf, DocumentFailure> {
    let failure = |error: &Error| DocumentFailure {
        path: input.to_path_buf(),
        error: error.to_string(),
    };

    let fragments = match source.extract(input) {
        Ok(fragments) => fragments,
        Err(e) => {
            log::warn!("skipping {}: {}", input.display(), e);
            return Err(failure(&e));
        }
    };

    // Zero fragments is a valid document (image-only pages); it still gets
    // an output file with an empty outline.
    let outline = extractor.extract(fragments);

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let output_path = output_dir.join(format!("{}.json", stem));

    match write_outline(&outline, &output_path, options.format) {
        Ok(()) => {
            log::debug!(
                "{} -> {} ({} headings)",
                input.display(),
                output_path.display(),
                outline.headings.len()
            );
            Ok(output_path)
        }
        Err(e) => Err(failure(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_dir_rejected() {
        let source = crate::extract::PdfFragmentSource::new();
        let extractor = OutlineExtractor::new();
        let result = process_dir(
            Path::new("/nonexistent/input"),
            Path::new("/nonexistent/output"),
            &source,
            &extractor,
            &BatchOptions::default(),
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_batch_options_builder() {
        let options = BatchOptions::new()
            .sequential()
            .with_format(JsonFormat::Compact);
        assert!(!options.parallel);
        assert_eq!(options.format, JsonFormat::Compact);
    }
}
