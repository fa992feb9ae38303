//! Error types for the structurer.
//!
//! The outline parser itself is total over any text input; everything that
//! can fail lives at the edges (reading pages, compiling user patterns,
//! writing output) or is an opt-in strictness check.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the structurer library.
#[derive(Debug, Error)]
pub enum StructureError {
    /// Page limit out of range.
    #[error("Invalid page limit: {0}. Expected a positive number of pages")]
    InvalidMaxPages(usize),

    /// Input document does not exist or is not a file.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A boilerplate pattern failed to compile.
    #[error("Invalid strip pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The external text extractor could not be started.
    #[error("Could not run {program}: {source}")]
    ExtractorUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external text extractor ran but reported a failure.
    #[error("Text extraction failed for {}: {message}", .path.display())]
    Extraction { path: PathBuf, message: String },

    /// A heading had no enclosing parent and the orphan policy rejects it.
    #[error("Heading '{title}' on line {line} has no enclosing parent")]
    OrphanHeading { line: usize, title: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for structurer operations.
pub type Result<T> = std::result::Result<T, StructureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StructureError::InvalidMaxPages(0);
        assert!(err.to_string().contains('0'));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_orphan_heading_display() {
        let err = StructureError::OrphanHeading {
            line: 12,
            title: "第1節 仮設の定義".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Heading '第1節 仮設の定義' on line 12 has no enclosing parent"
        );
    }

    #[test]
    fn test_extraction_display() {
        let err = StructureError::Extraction {
            path: PathBuf::from("kijun.pdf"),
            message: "Syntax Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Text extraction failed for kijun.pdf: Syntax Error"
        );
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = StructureError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid strip pattern '('"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
