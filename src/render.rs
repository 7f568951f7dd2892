//! JSON rendering for extracted outlines.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Outline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
///
/// Output is valid UTF-8 with non-ASCII content preserved verbatim;
/// serde_json does not escape it.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline),
        JsonFormat::Compact => serde_json::to_string(outline),
    };

    result.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
}

/// Serialize an outline and write it to `path`.
pub fn write_outline(outline: &Outline, path: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(outline, format)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingEntry, HeadingLevel};

    fn sample() -> Outline {
        Outline::new(
            "सतत विकास रिपोर्ट",
            vec![
                HeadingEntry::new(HeadingLevel::H1, "अध्याय 1: परिचय", 0),
                HeadingEntry::new(HeadingLevel::H2, "第2節 方法", 3),
            ],
        )
    }

    #[test]
    fn test_pretty_and_compact() {
        let outline = sample();
        let pretty = to_json(&outline, JsonFormat::Pretty).unwrap();
        assert!(pretty.contains('\n'));

        let compact = to_json(&outline, JsonFormat::Compact).unwrap();
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_non_ascii_preserved() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(json.contains("अध्याय 1: परिचय"));
        assert!(json.contains("第2節 方法"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_round_trip() {
        let outline = sample();
        let json = to_json(&outline, JsonFormat::Pretty).unwrap();
        let parsed: Outline = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, outline);
    }
}
