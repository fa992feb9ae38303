//! Page text providers.
//!
//! A provider yields one text blob per page, in page order. The pipeline
//! cleans each page and joins them with [`PAGE_BREAK_MARKER`] lines, which
//! the outline parser discards.

mod pdftotext;
mod text_file;

use std::path::Path;

pub use pdftotext::PdftotextSource;
pub use text_file::TextFileSource;

use crate::config::PAGE_BREAK_MARKER;
use crate::error::Result;
use crate::normalize::LineNormalizer;

/// Page separator written by `pdftotext` and most text dumpers.
pub const FORM_FEED: char = '\u{0C}';

/// Source of per-page document text.
pub trait PageTextProvider {
    /// Text of the first `max_pages` pages (all pages when `None`), in order.
    fn page_texts(&self, max_pages: Option<usize>) -> Result<Vec<String>>;
}

/// Pick a provider for a file: PDFs go through `pdftotext`, everything
/// else is read as UTF-8 text.
#[must_use]
pub fn source_for_path(path: &Path) -> Box<dyn PageTextProvider> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Box::new(PdftotextSource::new(path))
    } else {
        Box::new(TextFileSource::new(path))
    }
}

/// Split form-feed separated text into pages.
///
/// A trailing form feed does not start an extra page.
#[must_use]
pub fn split_pages(text: &str, max_pages: Option<usize>) -> Vec<String> {
    let text = text.strip_suffix(FORM_FEED).unwrap_or(text);
    let limit = max_pages.unwrap_or(usize::MAX);
    text.split(FORM_FEED)
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Clean every page and join them, each followed by a page-break marker line.
#[must_use]
pub fn assemble_pages(pages: &[String], normalizer: &LineNormalizer) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&normalizer.clean(page));
        text.push('\n');
        text.push_str(PAGE_BREAK_MARKER);
        text.push('\n');
    }
    text
}
