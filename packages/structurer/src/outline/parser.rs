//! Whole-document parsing entry point.

use crate::config::ParserConfig;
use crate::error::Result;

use super::builder::{HierarchyBuilder, ParsedDocument};

/// Parses complete line sequences into finalized outlines.
///
/// The parser holds configuration only; every call runs on a fresh
/// [`HierarchyBuilder`], so one parser can be reused across documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineParser {
    config: ParserConfig,
}

impl OutlineParser {
    /// Create a parser with the given settings.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The settings this parser runs with.
    #[must_use]
    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Parse an ordered sequence of lines.
    ///
    /// # Examples
    /// ```
    /// use kijun_structurer::outline::OutlineParser;
    ///
    /// let doc = OutlineParser::default()
    ///     .parse_lines(["第1編 総則", "1 適用", "この基準は、", "適用する。"])
    ///     .unwrap();
    ///
    /// let item = doc.tree.get(&["第1編 総則", "1 適用"]).unwrap();
    /// assert_eq!(item.content(), Some("この基準は、適用する。"));
    /// ```
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<ParsedDocument>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = HierarchyBuilder::new(self.config);
        for line in lines {
            builder.push_line(line.as_ref())?;
        }
        Ok(builder.finish())
    }

    /// Parse a text blob, one line per `\n`.
    pub fn parse_text(&self, text: &str) -> Result<ParsedDocument> {
        self.parse_lines(text.lines())
    }
}
