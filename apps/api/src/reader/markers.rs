//! Boilerplate marker configuration for the text cleaner.
//!
//! Project Gutenberg e-texts wrap the actual book in license banners:
//!
//! ```text
//! *** START OF THE PROJECT GUTENBERG EBOOK MOBY DICK ***
//! <book text>
//! *** END OF THE PROJECT GUTENBERG EBOOK MOBY DICK ***
//! ```
//!
//! The exact phrasing drifts across the archive ("THE" vs "THIS", missing
//! spaces around the asterisks), so the marker set is data, not code. The
//! defaults cover the variants we have seen in the wild; deployments serving
//! other corpora can point `MARKERS_PATH` at a JSON file with their own set.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Start/end banner phrases plus the delimiter sequence that closes a banner
/// line. All matching is case-sensitive, exactly as the phrases appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSet {
    pub start_markers: Vec<String>,
    pub end_markers: Vec<String>,
    pub delimiter: String,
}

impl Default for MarkerSet {
    fn default() -> Self {
        MarkerSet {
            start_markers: vec![
                "*** START OF THE PROJECT GUTENBERG EBOOK".to_string(),
                "*** START OF THIS PROJECT GUTENBERG EBOOK".to_string(),
                "***START OF THE PROJECT GUTENBERG EBOOK".to_string(),
            ],
            end_markers: vec![
                "*** END OF THE PROJECT GUTENBERG EBOOK".to_string(),
                "*** END OF THIS PROJECT GUTENBERG EBOOK".to_string(),
                "***END OF THE PROJECT GUTENBERG EBOOK".to_string(),
            ],
            delimiter: "***".to_string(),
        }
    }
}

impl MarkerSet {
    /// Loads a marker set from a JSON file.
    pub fn from_json_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read marker file '{path}'"))?;
        let markers: MarkerSet = serde_json::from_str(&raw)
            .with_context(|| format!("Marker file '{path}' is not valid marker JSON"))?;
        Ok(markers)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_covers_gutenberg_phrasing_variants() {
        let markers = MarkerSet::default();
        assert!(
            markers
                .start_markers
                .iter()
                .any(|m| m.contains("START OF THE PROJECT GUTENBERG")),
            "defaults should cover the common START banner"
        );
        assert!(
            markers
                .start_markers
                .iter()
                .any(|m| m.contains("THIS PROJECT GUTENBERG")),
            "defaults should cover the THIS variant"
        );
        assert_eq!(markers.delimiter, "***");
    }

    #[test]
    fn test_from_json_file_round_trip() {
        let custom = MarkerSet {
            start_markers: vec!["--- BEGIN BOOK".to_string()],
            end_markers: vec!["--- END BOOK".to_string()],
            delimiter: "---".to_string(),
        };

        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        let json = serde_json::to_string(&custom).expect("serialize marker set");
        file.write_all(json.as_bytes()).expect("write marker json");

        let path = file.path().to_str().expect("temp path is utf-8");
        let loaded = MarkerSet::from_json_file(path).expect("load marker file");
        assert_eq!(loaded, custom);
    }

    #[test]
    fn test_from_json_file_missing_path_errors() {
        let result = MarkerSet::from_json_file("/nonexistent/markers.json");
        assert!(result.is_err(), "missing file should error, not default");
    }

    #[test]
    fn test_from_json_file_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(b"{\"start_markers\": 42}")
            .expect("write bad json");

        let path = file.path().to_str().expect("temp path is utf-8");
        assert!(MarkerSet::from_json_file(path).is_err());
    }
}
