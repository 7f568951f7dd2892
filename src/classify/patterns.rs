//! Multilingual heading-marker patterns.
//!
//! The pattern table is data, not code: each row pairs a compiled regex with
//! an optional level hint, and new script or marker rows can be added at
//! runtime without touching the scoring logic. The built-in table covers
//! Latin, Devanagari (Hindi), and CJK (Japanese/Chinese) markers plus
//! numeric section prefixes in ASCII, fullwidth, and Devanagari digits.
//!
//! Matching is exact regex matching on decoded, NFC-normalized Unicode text;
//! no transliteration is performed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::HeadingLevel;

/// One heading-marker rule: a named pattern and the level it suggests.
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    /// Identifier used in logs and tests (e.g. "cjk-chapter")
    pub name: String,

    /// Compiled pattern, matched against the start of the trimmed text
    pub regex: Regex,

    /// Level the marker suggests, if any
    pub hint: Option<HeadingLevel>,
}

impl MarkerPattern {
    /// Compile a new marker rule.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        hint: Option<HeadingLevel>,
    ) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::InvalidInput(format!("invalid marker pattern: {}", e)))?;
        Ok(Self {
            name: name.into(),
            regex,
            hint,
        })
    }
}

/// The table of marker and noise patterns consulted by the scorer and the
/// title extractor.
#[derive(Debug, Clone)]
pub struct PatternTable {
    markers: Vec<MarkerPattern>,
    noise: Vec<Regex>,
}

// Digit classes. The numeric prefixes accept ASCII, fullwidth, and Devanagari
// digits in one class; CJK markers additionally accept ideographic numerals.
const DIGITS: &str = "[0-9０-９०-९]";
const CJK_NUM: &str = "[0-9０-９〇零一二三四五六七八九十百千]";

static BUILTIN: Lazy<PatternTable> = Lazy::new(|| {
    let mut table = PatternTable {
        markers: Vec::new(),
        noise: Vec::new(),
    };

    // Most specific numeric prefixes first; find_match returns the first hit.
    let markers: &[(&str, String, Option<HeadingLevel>)] = &[
        (
            "numbered-h3",
            format!(r"^{d}+(?:[.．]{d}+){{2}}[.．]?\s+\S", d = DIGITS),
            Some(HeadingLevel::H3),
        ),
        (
            "numbered-h2",
            format!(r"^{d}+[.．]{d}+[.．]?\s+\S", d = DIGITS),
            Some(HeadingLevel::H2),
        ),
        (
            "numbered-h1",
            format!(r"^{d}+[.．、]\s+\S", d = DIGITS),
            Some(HeadingLevel::H1),
        ),
        (
            "latin-chapter",
            r"(?i)^chapter\s+[0-9ivxlcdm]+\b".to_string(),
            Some(HeadingLevel::H1),
        ),
        (
            "latin-part",
            r"(?i)^part\s+[0-9ivxlcdm]+\b".to_string(),
            Some(HeadingLevel::H1),
        ),
        (
            "latin-section",
            r"(?i)^section\s+\d+\b".to_string(),
            Some(HeadingLevel::H2),
        ),
        (
            "latin-appendix",
            r"(?i)^appendix\s+[a-z0-9]+\b".to_string(),
            Some(HeadingLevel::H1),
        ),
        (
            "devanagari-chapter",
            format!(r"^अध्याय\s+{d}+", d = DIGITS),
            Some(HeadingLevel::H1),
        ),
        (
            "devanagari-part",
            format!(r"^भाग\s+{d}+", d = DIGITS),
            Some(HeadingLevel::H1),
        ),
        (
            "devanagari-section",
            format!(r"^प्रकरण\s+{d}+", d = DIGITS),
            Some(HeadingLevel::H2),
        ),
        (
            "cjk-chapter",
            format!(r"^第{n}+章", n = CJK_NUM),
            Some(HeadingLevel::H1),
        ),
        (
            "cjk-section",
            format!(r"^第{n}+[節节]", n = CJK_NUM),
            Some(HeadingLevel::H2),
        ),
    ];

    for (name, pattern, hint) in markers {
        table.markers.push(
            MarkerPattern::new(*name, pattern, *hint).expect("built-in marker pattern compiles"),
        );
    }

    // Negative filters: strings that are never headings and never titles.
    let noise = [
        r"(?i)^page\s+\d+\s+of\s+\d+".to_string(), // page footers
        format!(r"^{d}+$", d = DIGITS),            // bare page numbers
        r"\.{4,}".to_string(),                     // dot leaders (TOC rows)
        r"^\d{1,2}\s+[A-Z]{3,}".to_string(),       // date cells like "18 JUN"
        r"^\d+(\.\d+)*\s+\d{1,2}\s+[A-Z]{3,}".to_string(), // revision-table rows
        r"(?i)copyright|©|all rights reserved".to_string(), // boilerplate
    ];
    for pattern in &noise {
        table
            .noise
            .push(Regex::new(pattern).expect("built-in noise pattern compiles"));
    }

    table
});

impl PatternTable {
    /// A table with no rows at all; useful for tests and custom setups.
    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
            noise: Vec::new(),
        }
    }

    /// The built-in multilingual table.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Add a marker rule, keeping existing rows.
    pub fn with_marker(
        mut self,
        name: impl Into<String>,
        pattern: &str,
        hint: Option<HeadingLevel>,
    ) -> Result<Self> {
        self.markers.push(MarkerPattern::new(name, pattern, hint)?);
        Ok(self)
    }

    /// Add a noise rule, keeping existing rows.
    pub fn with_noise(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::InvalidInput(format!("invalid noise pattern: {}", e)))?;
        self.noise.push(regex);
        Ok(self)
    }

    /// Find the first marker rule matching the given (trimmed, normalized)
    /// text.
    pub fn find_match(&self, text: &str) -> Option<&MarkerPattern> {
        self.markers.iter().find(|m| m.regex.is_match(text))
    }

    /// Check whether the text matches any negative filter.
    pub fn is_noise(&self, text: &str) -> bool {
        self.noise.iter().any(|n| n.is_match(text))
    }

    /// The marker rows, in match order.
    pub fn markers(&self) -> &[MarkerPattern] {
        &self.markers
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::builtin()
    }
}
