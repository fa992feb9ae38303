//! Page-level boilerplate removal.
//!
//! Extracted page text carries running headers, page numbers and the
//! publisher's notice block. None of it belongs to the outline, and some of
//! it would be misread as headings, so it is stripped per page before the
//! pages are joined.

use regex::Regex;

use crate::error::{Result, StructureError};

/// Boilerplate of the 公共建築数量積算基準 as extracted from the published PDF.
pub const DEFAULT_STRIP_PATTERNS: &[&str] = &[
    // Page footer, e.g. "- 12 -"
    r"-\s*\d+\s*-",
    // Running title
    r"公共建築数量積算基準\(令和\d+年改定\)",
    r"(?m)^\s*最終改定令和\d+年\d+月\d+日国営積第\d+号\s*$",
    r"(?m)^\s*平成\d+年\d+月\d+日国営計第\d+号\s*$",
    r"(?ms)^\s*この基準は、国土交通省官庁営繕部及び地方整備局等営繕部が官庁施設の営繕を実施.*?\s*統一基準です。\s*$",
    r"(?ms)^\s*利用にあたっては、国土交通省ホームページのリンク・著作権・免責事項に関する利.*?\s*ご確認ください。\s*$",
    r"(?m)^\s*国土交通省大臣官房官庁営繕部\s*$",
    r"(?ms)^\s*技術基準トップページはこちら.*?\s*html\s*$",
];

/// Removes boilerplate from page text with an ordered list of patterns.
#[derive(Debug, Clone)]
pub struct LineNormalizer {
    patterns: Vec<Regex>,
}

impl LineNormalizer {
    /// A normalizer that leaves text untouched.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Compile a list of patterns.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::empty().with_patterns(patterns)
    }

    /// Add patterns, applied after the existing ones.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let compiled = Regex::new(pattern).map_err(|source| StructureError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            self.patterns.push(compiled);
        }
        Ok(self)
    }

    /// Number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no pattern is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Remove every match of every pattern, in order.
    ///
    /// # Examples
    /// ```
    /// use kijun_structurer::normalize::LineNormalizer;
    ///
    /// let normalizer = LineNormalizer::default();
    /// assert_eq!(normalizer.clean("第1編 総則\n- 3 -\n"), "第1編 総則\n\n");
    /// ```
    #[must_use]
    pub fn clean(&self, page: &str) -> String {
        let mut text = page.to_string();
        for pattern in &self.patterns {
            text = pattern.replace_all(&text, "").into_owned();
        }
        text
    }
}

impl Default for LineNormalizer {
    /// The 公共建築数量積算基準 boilerplate set.
    fn default() -> Self {
        let mut patterns = Vec::with_capacity(DEFAULT_STRIP_PATTERNS.len());
        for pattern in DEFAULT_STRIP_PATTERNS {
            match Regex::new(pattern) {
                Ok(compiled) => patterns.push(compiled),
                Err(e) => tracing::error!(pattern, error = %e, "Built-in strip pattern failed to compile"),
            }
        }
        Self { patterns }
    }
}
