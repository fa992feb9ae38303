//! Hierarchy builder: turns classified lines into a document tree.
//!
//! The builder keeps the chain of open headings from the root to the
//! innermost one. Each new heading resolves an *effective* level from its
//! family and the family of the innermost open heading, closes every open
//! heading at that level or deeper, and opens under whatever remains.

use crate::config::{DuplicatePolicy, OrphanPolicy, ParserConfig};
use crate::error::{Result, StructureError};

use super::classifier::{classify_line, is_excluded, Heading};
use super::family::HeadingFamily;
use super::finalize::finalize;
use super::tree::{DocumentTree, NodeId};

/// An open heading on the path stack.
#[derive(Debug, Clone)]
struct OpenHeading {
    title: String,
    family: HeadingFamily,
    level: usize,
    node: NodeId,
}

/// Where a heading goes relative to the innermost open heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Nest directly under the innermost open heading.
    ChildOfTip,
    /// Use the family's nominal level.
    Nominal,
}

/// Predecessor-dependent promotion rules.
///
/// An enumeration that directly follows the enumeration it usually lives
/// under nests as its child, e.g. "（1）" right after "1 通則".
fn placement(new: HeadingFamily, tip: Option<HeadingFamily>) -> Placement {
    use HeadingFamily::{
        FullWidthSubItem, NumberedItem, ParenthesizedItem, SubNumberedItem, SubSubItem,
        SubSubSubItem,
    };

    match (new, tip) {
        (ParenthesizedItem, Some(NumberedItem))
        | (SubNumberedItem | FullWidthSubItem, Some(NumberedItem | ParenthesizedItem))
        | (SubSubItem, Some(SubNumberedItem | FullWidthSubItem))
        | (SubSubSubItem, Some(SubSubItem)) => Placement::ChildOfTip,
        _ => Placement::Nominal,
    }
}

/// Counters collected while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines fed to the builder, blank ones included.
    pub lines: usize,
    /// Headings opened.
    pub headings: usize,
    /// Prose lines dropped because no heading was open yet.
    pub dropped_lines: usize,
    /// Page-break and table-of-contents marker lines skipped.
    pub excluded_lines: usize,
}

/// Result of a parse: the finalized tree plus non-fatal diagnostics.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// The finalized outline.
    pub tree: DocumentTree,
    /// Non-fatal issues, e.g. orphan headings under [`OrphanPolicy::Warn`].
    pub warnings: Vec<String>,
    /// Parse counters.
    pub stats: ParseStats,
}

/// Incremental line-to-tree builder.
///
/// One builder serves exactly one document; create a new one per parse.
#[derive(Debug)]
pub struct HierarchyBuilder {
    config: ParserConfig,
    tree: DocumentTree,
    path: Vec<OpenHeading>,
    warnings: Vec<String>,
    stats: ParseStats,
}

impl HierarchyBuilder {
    /// Create a builder holding only the document root.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            tree: DocumentTree::new(),
            path: Vec::new(),
            warnings: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    /// Number of open headings, the root not counted.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Titles of the open headings from the outermost to the innermost.
    #[must_use]
    pub fn open_titles(&self) -> Vec<&str> {
        self.path.iter().map(|h| h.title.as_str()).collect()
    }

    /// The tree built so far, not yet finalized.
    #[must_use]
    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    /// Resolve the level a heading will actually be opened at.
    ///
    /// Promotion rules win; otherwise a heading whose family is already
    /// open continues that enumeration as a sibling of the nearest open
    /// entry; otherwise the nominal level applies.
    #[must_use]
    pub fn effective_level(&self, heading: &Heading) -> usize {
        let tip = self.path.last();

        match placement(heading.family, tip.map(|t| t.family)) {
            Placement::ChildOfTip => tip.map_or(heading.level, |t| t.level + 1),
            Placement::Nominal => self
                .path
                .iter()
                .rev()
                .find(|open| open.family == heading.family)
                .map_or(heading.level, |open| open.level),
        }
    }

    /// Feed one raw line.
    ///
    /// Fails only when the orphan policy is [`OrphanPolicy::Reject`] and
    /// the line is a heading without an enclosing parent.
    pub fn push_line(&mut self, raw: &str) -> Result<()> {
        self.stats.lines += 1;

        let line = raw.trim();
        if line.is_empty() {
            return Ok(());
        }
        if is_excluded(line) {
            self.stats.excluded_lines += 1;
            return Ok(());
        }

        match classify_line(line) {
            Some(heading) => self.open_heading(heading),
            None => {
                self.push_prose(line);
                Ok(())
            }
        }
    }

    fn push_prose(&mut self, line: &str) {
        match self.path.last() {
            Some(open) => self.tree.push_line(open.node, line),
            None => {
                self.stats.dropped_lines += 1;
                tracing::debug!(
                    line_number = self.stats.lines,
                    text = %line,
                    "Dropping text before first heading"
                );
            }
        }
    }

    fn open_heading(&mut self, heading: Heading) -> Result<()> {
        let level = self.effective_level(&heading);

        // Close everything at this level or deeper; the root is never closed
        while self.path.last().is_some_and(|open| open.level >= level) {
            self.path.pop();
        }

        if self.path.is_empty() && level > 0 {
            self.handle_orphan(&heading)?;
        }

        let parent = self.path.last().map_or(NodeId::ROOT, |open| open.node);
        let node = match self.tree.find_child(parent, &heading.title) {
            Some(existing) => match self.config.duplicates {
                DuplicatePolicy::Replace => self.tree.replace_child(parent, existing),
                DuplicatePolicy::Reopen => existing,
            },
            None => self.tree.add_child(parent, heading.title.as_str()),
        };

        tracing::debug!(
            title = %heading.title,
            family = %heading.family,
            nominal = heading.level,
            level,
            "Opened heading"
        );

        self.stats.headings += 1;
        self.path.push(OpenHeading {
            title: heading.title,
            family: heading.family,
            level,
            node,
        });
        Ok(())
    }

    fn handle_orphan(&mut self, heading: &Heading) -> Result<()> {
        match self.config.orphans {
            OrphanPolicy::Accept => Ok(()),
            OrphanPolicy::Warn => {
                tracing::warn!(
                    line_number = self.stats.lines,
                    title = %heading.title,
                    family = %heading.family,
                    "Heading has no enclosing parent, placing it under the root"
                );
                self.warnings.push(format!(
                    "Line {}: {} '{}' has no enclosing parent",
                    self.stats.lines, heading.family, heading.title
                ));
                Ok(())
            }
            OrphanPolicy::Reject => Err(StructureError::OrphanHeading {
                line: self.stats.lines,
                title: heading.title.clone(),
            }),
        }
    }

    /// Finalize the tree and hand it over.
    #[must_use]
    pub fn finish(mut self) -> ParsedDocument {
        finalize(&mut self.tree);
        ParsedDocument {
            tree: self.tree,
            warnings: self.warnings,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn build(lines: &[&str]) -> ParsedDocument {
        build_with(ParserConfig::default(), lines)
    }

    fn build_with(config: ParserConfig, lines: &[&str]) -> ParsedDocument {
        let mut builder = HierarchyBuilder::new(config);
        for line in lines {
            builder.push_line(line).unwrap();
        }
        builder.finish()
    }

    fn tree_json(lines: &[&str]) -> serde_json::Value {
        serde_json::to_value(&build(lines).tree).unwrap()
    }

    #[test]
    fn test_placement_rules() {
        use HeadingFamily::*;

        assert_eq!(placement(ParenthesizedItem, Some(NumberedItem)), Placement::ChildOfTip);
        assert_eq!(placement(SubNumberedItem, Some(NumberedItem)), Placement::ChildOfTip);
        assert_eq!(placement(SubNumberedItem, Some(ParenthesizedItem)), Placement::ChildOfTip);
        assert_eq!(placement(FullWidthSubItem, Some(ParenthesizedItem)), Placement::ChildOfTip);
        assert_eq!(placement(SubSubItem, Some(SubNumberedItem)), Placement::ChildOfTip);
        assert_eq!(placement(SubSubItem, Some(FullWidthSubItem)), Placement::ChildOfTip);
        assert_eq!(placement(SubSubSubItem, Some(SubSubItem)), Placement::ChildOfTip);

        assert_eq!(placement(NumberedItem, Some(ParenthesizedItem)), Placement::Nominal);
        assert_eq!(placement(ParenthesizedItem, Some(Section)), Placement::Nominal);
        assert_eq!(placement(SubSubItem, Some(NumberedItem)), Placement::Nominal);
        assert_eq!(placement(ParenthesizedItem, None), Placement::Nominal);
    }

    #[test]
    fn test_parenthesized_nests_under_numbered() {
        let value = tree_json(&["1 通則", "(1) 対象", "内容A", "(2) 範囲", "内容B"]);
        assert_eq!(
            value,
            json!({
                "1 通則": {
                    "(1)対象": { "content": "内容A" },
                    "(2)範囲": { "content": "内容B" }
                }
            })
        );
    }

    #[test]
    fn test_numbered_after_parenthesized_is_sibling() {
        let doc = build(&["(1) 対象", "本文", "1 通則", "本文"]);
        assert_eq!(doc.tree.top_level_titles(), vec!["(1)対象", "1 通則"]);
    }

    #[test]
    fn test_full_document_nesting() {
        let value = tree_json(&[
            "第3編 土工・地業",
            "第1章 土工",
            "第1節 土工の定義",
            "土工とは、根切り等をいう。",
            "第2節 土工の計測・計算",
            "1 通則",
            "（1） 土の処理",
            "1) 根切り",
            "① 床付け",
            "ア) 山留め",
            "山留めの本文",
            "イ) 排水",
            "排水の本文",
            "② 埋戻し",
            "埋戻しの本文",
            "2) 盛土",
            "盛土の本文",
            "（2） 山留め壁",
            "山留め壁の本文",
            "2 土の処理の計測・計算",
            "計測の本文",
        ]);

        assert_eq!(
            value,
            json!({
                "第3編 土工・地業": {
                    "第1章 土工": {
                        "第1節 土工の定義": { "content": "土工とは、根切り等をいう。" },
                        "第2節 土工の計測・計算": {
                            "1 通則": {
                                "(1)土の処理": {
                                    "1)根切り": {
                                        "① 床付け": {
                                            "ア)山留め": { "content": "山留めの本文" },
                                            "イ)排水": { "content": "排水の本文" }
                                        },
                                        "② 埋戻し": { "content": "埋戻しの本文" }
                                    },
                                    "2)盛土": { "content": "盛土の本文" }
                                },
                                "(2)山留め壁": { "content": "山留め壁の本文" }
                            },
                            "2 土の処理の計測・計算": { "content": "計測の本文" }
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_chapter_closes_deep_stack() {
        let mut builder = HierarchyBuilder::new(ParserConfig::default());
        for line in [
            "第1編 総則",
            "第1章 仮設",
            "第1節 仮設の定義",
            "1 通則",
            "（1） 仮囲い",
        ] {
            builder.push_line(line).unwrap();
        }
        assert_eq!(builder.depth(), 5);

        builder.push_line("第2章 土工").unwrap();
        assert_eq!(builder.open_titles(), vec!["第1編 総則", "第2章 土工"]);
    }

    #[test]
    fn test_chapter_without_part_closes_to_root() {
        let mut builder = HierarchyBuilder::new(ParserConfig::default());
        for line in ["第1節 仮設の定義", "1 通則", "（1） 仮囲い", "第2章 土工"] {
            builder.push_line(line).unwrap();
        }
        assert_eq!(builder.open_titles(), vec!["第2章 土工"]);
    }

    #[test]
    fn test_effective_level() {
        let mut builder = HierarchyBuilder::new(ParserConfig::default());
        let paren = classify_line("（1） 仮囲い").unwrap();

        // Nothing open: nominal level
        assert_eq!(builder.effective_level(&paren), 3);

        builder.push_line("第1節 仮設の定義").unwrap();
        builder.push_line("1 通則").unwrap();
        assert_eq!(builder.effective_level(&paren), 4);

        builder.push_line("（1） 仮囲い").unwrap();
        let next = classify_line("（2） 足場").unwrap();
        assert_eq!(builder.effective_level(&next), 4);
    }

    #[test]
    fn test_prose_before_first_heading_is_dropped() {
        let doc = build(&["公共建築数量積算基準", "(令和5年改定)", "第1編 総則", "本文"]);
        assert_eq!(doc.stats.dropped_lines, 2);
        assert_eq!(
            serde_json::to_value(&doc.tree).unwrap(),
            json!({ "第1編 総則": { "content": "本文" } })
        );
    }

    #[test]
    fn test_markers_are_skipped() {
        let doc = build(&[
            "(目次)",
            "第1編 総則",
            "1 適用",
            "この基準は、",
            "--- PAGE_BREAK ---",
            "適用する。",
        ]);
        assert_eq!(doc.stats.excluded_lines, 2);
        assert_eq!(doc.stats.headings, 2);
        assert_eq!(
            serde_json::to_value(&doc.tree).unwrap(),
            json!({ "第1編 総則": { "1 適用": { "content": "この基準は、適用する。" } } })
        );
    }

    #[test]
    fn test_duplicate_title_replace() {
        let value = tree_json(&[
            "第1編 総則",
            "1 適用",
            "目次側",
            "第1編 総則",
            "1 適用",
            "本文側",
        ]);
        assert_eq!(
            value,
            json!({ "第1編 総則": { "1 適用": { "content": "本文側" } } })
        );
    }

    #[test]
    fn test_duplicate_title_reopen() {
        let config = ParserConfig::new().with_duplicates(DuplicatePolicy::Reopen);
        let doc = build_with(
            config,
            &["第1編 総則", "1 適用", "前半", "第1編 総則", "1 適用", "後半"],
        );
        assert_eq!(
            serde_json::to_value(&doc.tree).unwrap(),
            json!({ "第1編 総則": { "1 適用": { "content": "前半 後半" } } })
        );
    }

    #[test]
    fn test_orphan_accept_is_silent() {
        let doc = build(&["第1節 仮設の定義", "本文"]);
        assert!(doc.warnings.is_empty());
        assert_eq!(doc.tree.top_level_titles(), vec!["第1節 仮設の定義"]);
    }

    #[test]
    fn test_orphan_warn_records_warning() {
        let config = ParserConfig::new().with_orphans(OrphanPolicy::Warn);
        let doc = build_with(config, &["第1編 総則", "本文", "第1節 仮設の定義", "本文"]);

        // Under a part the section is not an orphan
        assert!(doc.warnings.is_empty());

        let doc = build_with(config, &["第1節 仮設の定義", "本文"]);
        assert_eq!(doc.warnings.len(), 1);
        assert!(doc.warnings[0].contains("第1節 仮設の定義"));
        assert!(doc.warnings[0].starts_with("Line 1:"));
    }

    #[test]
    fn test_orphan_reject_fails() {
        let mut builder =
            HierarchyBuilder::new(ParserConfig::new().with_orphans(OrphanPolicy::Reject));
        builder.push_line("第1編 総則").unwrap();
        builder.push_line("").unwrap();

        let err = builder.push_line("第1節 仮設の定義");
        assert!(err.is_ok(), "section under a part has a parent");

        let mut builder =
            HierarchyBuilder::new(ParserConfig::new().with_orphans(OrphanPolicy::Reject));
        let err = builder.push_line("第1章 仮設").unwrap_err();
        assert!(matches!(err, StructureError::OrphanHeading { line: 1, .. }));
    }

    #[test]
    fn test_levels_strictly_increase_along_path() {
        let mut builder = HierarchyBuilder::new(ParserConfig::default());
        for line in [
            "（1） 孤立",
            "1) 子",
            "第1章 仮設",
            "① 丸数字",
            "ア) 片仮名",
            "1 通則",
            "１）全角",
            "② 次",
        ] {
            builder.push_line(line).unwrap();
            let levels: Vec<usize> = builder.path.iter().map(|h| h.level).collect();
            assert!(
                levels.windows(2).all(|w| w[0] < w[1]),
                "levels {levels:?} after {line}"
            );
        }
    }
}
