//! JSON rendering for reports and outlines.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any output record to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize to JSON and write the result to `path`, with a trailing newline.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(
    value: &T,
    path: P,
    format: JsonFormat,
) -> Result<()> {
    let mut json = to_json(value, format)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, Outline, OutlineEntry};

    fn outline() -> Outline {
        Outline::new(
            "Test",
            vec![OutlineEntry {
                level: HeadingLevel::H1,
                text: "Hello".to_string(),
                page: 0,
            }],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&outline(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&outline(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        write_json(&outline(), &path, JsonFormat::Compact).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let back: Outline = serde_json::from_str(&written).unwrap();
        assert_eq!(back, outline());
    }
}
