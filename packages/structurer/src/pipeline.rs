//! End-to-end processing: page source to finalized outline.

use crate::config::{validate_max_pages, ParserConfig};
use crate::error::Result;
use crate::normalize::LineNormalizer;
use crate::outline::{OutlineParser, ParsedDocument};
use crate::source::{assemble_pages, PageTextProvider};

/// Extract, clean and parse one document.
///
/// # Arguments
/// * `source` - Provider of the document's page text
/// * `normalizer` - Boilerplate patterns applied to every page
/// * `config` - Parser settings
/// * `max_pages` - Only read the first N pages (must be at least 1)
///
/// # Returns
/// The finalized outline with warnings and statistics.
pub fn process_document(
    source: &dyn PageTextProvider,
    normalizer: &LineNormalizer,
    config: ParserConfig,
    max_pages: Option<usize>,
) -> Result<ParsedDocument> {
    if let Some(max) = max_pages {
        validate_max_pages(max)?;
    }

    let pages = source.page_texts(max_pages)?;
    tracing::info!(pages = pages.len(), "Extracted page text");

    let text = assemble_pages(&pages, normalizer);
    tracing::info!(
        patterns = normalizer.len(),
        chars = text.chars().count(),
        "Removed page boilerplate"
    );

    let document = OutlineParser::new(config).parse_text(&text)?;
    tracing::info!(
        nodes = document.tree.len(),
        headings = document.stats.headings,
        warnings = document.warnings.len(),
        "Built outline"
    );

    Ok(document)
}
