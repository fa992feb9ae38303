//! Heading families recognized in the outline.

use std::fmt;

/// One enumeration style used for headings.
///
/// Declared shallow to deep. The nesting rules that depend on the
/// surrounding headings live in the builder; this type only knows the
/// default ("nominal") depth of each family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingFamily {
    /// 編, e.g. "第1編 総則".
    Part,
    /// 章, e.g. "第1章 仮設".
    Chapter,
    /// 節, e.g. "第1節 仮設の定義".
    Section,
    /// Bare number followed by a space, e.g. "1 通則".
    NumberedItem,
    /// Number in parentheses, e.g. "（1）仮囲い".
    ParenthesizedItem,
    /// Number with a closing half-width parenthesis, e.g. "1) 本文".
    SubNumberedItem,
    /// Full-width number with a full-width closing parenthesis, e.g. "１）本文".
    FullWidthSubItem,
    /// Circled number bullet, e.g. "① 本文".
    SubSubItem,
    /// Iroha katakana bullet, e.g. "ア) 本文".
    SubSubSubItem,
}

impl HeadingFamily {
    /// Classification order. Specific bullet forms come before the generic
    /// numeric ones so "1) ..." is never read as a numbered item.
    pub const PRIORITY: [HeadingFamily; 9] = [
        Self::Part,
        Self::Chapter,
        Self::Section,
        Self::SubSubSubItem,
        Self::SubSubItem,
        Self::FullWidthSubItem,
        Self::SubNumberedItem,
        Self::ParenthesizedItem,
        Self::NumberedItem,
    ];

    /// Default nesting depth, 0 being the shallowest.
    #[must_use]
    pub fn nominal_level(self) -> usize {
        match self {
            Self::Part => 0,
            Self::Chapter => 1,
            Self::Section => 2,
            Self::NumberedItem | Self::ParenthesizedItem => 3,
            Self::SubNumberedItem | Self::FullWidthSubItem => 4,
            Self::SubSubItem => 5,
            Self::SubSubSubItem => 6,
        }
    }

    /// Short identifier used in diagnostics and the `classify` command.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Part => "part",
            Self::Chapter => "chapter",
            Self::Section => "section",
            Self::NumberedItem => "numbered_item",
            Self::ParenthesizedItem => "parenthesized_item",
            Self::SubNumberedItem => "sub_numbered_item",
            Self::FullWidthSubItem => "full_width_sub_item",
            Self::SubSubItem => "sub_sub_item",
            Self::SubSubSubItem => "sub_sub_sub_item",
        }
    }
}

impl fmt::Display for HeadingFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_levels() {
        assert_eq!(HeadingFamily::Part.nominal_level(), 0);
        assert_eq!(HeadingFamily::Chapter.nominal_level(), 1);
        assert_eq!(HeadingFamily::Section.nominal_level(), 2);
        assert_eq!(HeadingFamily::NumberedItem.nominal_level(), 3);
        assert_eq!(HeadingFamily::ParenthesizedItem.nominal_level(), 3);
        assert_eq!(HeadingFamily::SubNumberedItem.nominal_level(), 4);
        assert_eq!(HeadingFamily::FullWidthSubItem.nominal_level(), 4);
        assert_eq!(HeadingFamily::SubSubItem.nominal_level(), 5);
        assert_eq!(HeadingFamily::SubSubSubItem.nominal_level(), 6);
    }

    #[test]
    fn test_priority_covers_every_family_once() {
        let mut seen = std::collections::HashSet::new();
        for family in HeadingFamily::PRIORITY {
            assert!(seen.insert(family), "{family} listed twice");
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_priority_puts_bullets_before_generic_numbers() {
        let position = |f: HeadingFamily| {
            HeadingFamily::PRIORITY
                .iter()
                .position(|p| *p == f)
                .unwrap()
        };
        assert!(position(HeadingFamily::SubNumberedItem) < position(HeadingFamily::NumberedItem));
        assert!(
            position(HeadingFamily::ParenthesizedItem) < position(HeadingFamily::NumberedItem)
        );
        assert!(position(HeadingFamily::SubSubSubItem) < position(HeadingFamily::SubSubItem));
    }

    #[test]
    fn test_display() {
        assert_eq!(HeadingFamily::FullWidthSubItem.to_string(), "full_width_sub_item");
    }
}
