//! Configuration constants, input validation and parser settings.

use std::path::Path;

use crate::error::{Result, StructureError};

/// Marker line inserted between pages when assembling the document text.
pub const PAGE_BREAK_MARKER: &str = "--- PAGE_BREAK ---";

/// Key under which a node's prose is emitted in the serialized tree.
pub const CONTENT_KEY: &str = "content";

/// Text wrap width for the plain-text outline output.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Program used to pull page text out of PDF files.
pub const PDFTOTEXT_PROGRAM: &str = "pdftotext";

/// What to do with a heading that has no enclosing parent.
///
/// A heading is an orphan when it has to be opened directly under the
/// document root although its level says something should enclose it,
/// e.g. a `第1節` before any `第1章`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Open the heading under the root without comment.
    #[default]
    Accept,
    /// Open the heading under the root and record a warning.
    Warn,
    /// Abort the parse.
    Reject,
}

/// What to do when a heading repeats a title already present among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Start a fresh node in the old node's position, discarding the old one.
    #[default]
    Replace,
    /// Re-open the existing node and keep accumulating into it.
    Reopen,
}

/// Settings for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Orphan heading handling.
    pub orphans: OrphanPolicy,

    /// Duplicate sibling title handling.
    pub duplicates: DuplicatePolicy,
}

impl ParserConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the orphan policy.
    #[must_use]
    pub fn with_orphans(mut self, policy: OrphanPolicy) -> Self {
        self.orphans = policy;
        self
    }

    /// Set the duplicate title policy.
    #[must_use]
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

/// Validate a page limit.
///
/// # Examples
/// ```
/// use kijun_structurer::config::validate_max_pages;
///
/// assert!(validate_max_pages(5).is_ok());
/// assert!(validate_max_pages(0).is_err());
/// ```
pub fn validate_max_pages(max_pages: usize) -> Result<()> {
    if max_pages == 0 {
        return Err(StructureError::InvalidMaxPages(max_pages));
    }
    Ok(())
}

/// Validate that the input document exists and is a regular file.
pub fn validate_input_path(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(StructureError::InputNotFound(path.to_path_buf()))
    }
}
