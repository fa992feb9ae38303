//! Line classification: heading recognition and canonical titles.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

use super::family::HeadingFamily;

// `\d` and `\s` are Unicode-aware: full-width digits and the ideographic
// space (U+3000) match without extra classes.

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PART_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^第\d+編\s+.*$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CHAPTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^第\d+章\s+.*$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^第\d+節\s+.*$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUB_SUB_SUB_ITEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([アイウエオカキクケコ])[)）]\s*(.*)$").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUB_SUB_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([①-⑳])\s+(.*)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FULL_WIDTH_SUB_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([０-９]+）)\s*(.*)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUB_NUMBERED_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\))\s*(.*)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARENTHESIZED_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[（(](\d+)[）)]\s*(.*)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s+(.*)$").expect("valid regex"));

/// Lines dropped before classification: the table-of-contents marker and
/// page separators.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EXCLUSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[（(]目次[）)]|--- PAGE(?:_BREAK| \d+) ---)$").expect("valid regex")
});

/// A line recognized as a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Enumeration family the line belongs to.
    pub family: HeadingFamily,

    /// Nominal level of the family. The builder may nest the heading
    /// deeper depending on what is open above it.
    pub level: usize,

    /// Canonical title, used as the node key.
    pub title: String,
}

fn pattern(family: HeadingFamily) -> &'static Regex {
    match family {
        HeadingFamily::Part => &PART_PATTERN,
        HeadingFamily::Chapter => &CHAPTER_PATTERN,
        HeadingFamily::Section => &SECTION_PATTERN,
        HeadingFamily::NumberedItem => &NUMBERED_ITEM_PATTERN,
        HeadingFamily::ParenthesizedItem => &PARENTHESIZED_ITEM_PATTERN,
        HeadingFamily::SubNumberedItem => &SUB_NUMBERED_ITEM_PATTERN,
        HeadingFamily::FullWidthSubItem => &FULL_WIDTH_SUB_ITEM_PATTERN,
        HeadingFamily::SubSubItem => &SUB_SUB_ITEM_PATTERN,
        HeadingFamily::SubSubSubItem => &SUB_SUB_SUB_ITEM_PATTERN,
    }
}

/// Build the canonical title from a successful match.
fn format_title(family: HeadingFamily, line: &str, caps: &Captures<'_>) -> String {
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let rest = group(2).trim();

    match family {
        HeadingFamily::Part | HeadingFamily::Chapter | HeadingFamily::Section => {
            line.trim().to_string()
        }
        HeadingFamily::NumberedItem => format!("{} {rest}", group(1)),
        HeadingFamily::ParenthesizedItem => {
            let digits: String = group(1).nfkc().collect();
            format!("({digits}){rest}")
        }
        HeadingFamily::SubNumberedItem | HeadingFamily::FullWidthSubItem => {
            format!("{}{rest}", group(1))
        }
        HeadingFamily::SubSubItem => format!("{} {rest}", group(1)),
        HeadingFamily::SubSubSubItem => format!("{}){rest}", group(1)),
    }
}

/// Check whether a line is a marker that must never reach the tree.
///
/// # Examples
/// ```
/// use kijun_structurer::outline::is_excluded;
///
/// assert!(is_excluded("(目次)"));
/// assert!(is_excluded("--- PAGE_BREAK ---"));
/// assert!(!is_excluded("1 通則"));
/// ```
#[must_use]
pub fn is_excluded(line: &str) -> bool {
    EXCLUSION_PATTERN.is_match(line.trim())
}

/// Classify a single line.
///
/// Families are tried in [`HeadingFamily::PRIORITY`] order and the first
/// match wins. Returns `None` for prose.
///
/// # Examples
/// ```
/// use kijun_structurer::outline::{classify_line, HeadingFamily};
///
/// let heading = classify_line("（１） 仮囲い").unwrap();
/// assert_eq!(heading.family, HeadingFamily::ParenthesizedItem);
/// assert_eq!(heading.title, "(1)仮囲い");
///
/// assert!(classify_line("仮設は、工事期間中に必要なものとする。").is_none());
/// ```
#[must_use]
pub fn classify_line(line: &str) -> Option<Heading> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    HeadingFamily::PRIORITY.iter().find_map(|&family| {
        pattern(family).captures(line).map(|caps| Heading {
            family,
            level: family.nominal_level(),
            title: format_title(family, line, &caps),
        })
    })
}
