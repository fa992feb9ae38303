//! Content finalization: prose normalization and pruning of empty nodes.

use std::sync::LazyLock;

use regex::Regex;

use super::tree::{DocumentTree, NodeId};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Whitespace after a Japanese comma or full stop is a line-wrap artifact.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACE_AFTER_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([、。])\s+").expect("valid regex"));

/// Join prose fragments into one normalized string.
///
/// Fragments are joined with single spaces, whitespace runs collapse to one
/// space, whitespace following `、` or `。` is removed and the result is
/// trimmed. Returns `None` when nothing but whitespace remains.
///
/// # Examples
/// ```
/// use kijun_structurer::outline::normalize_content;
///
/// assert_eq!(
///     normalize_content(["仮設とは、", "工事に必要な施設をいう。"]),
///     Some("仮設とは、工事に必要な施設をいう。".to_string())
/// );
/// assert_eq!(normalize_content([" ", ""]), None);
/// ```
pub fn normalize_content<I, S>(parts: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = parts
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let collapsed = WHITESPACE_RUN.replace_all(&joined, " ");
    let tightened = SPACE_AFTER_PUNCTUATION.replace_all(&collapsed, "$1");
    let trimmed = tightened.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Finalize a whole tree in place.
///
/// Post-order: every node's descendants are finalized before the node
/// itself is checked for emptiness, so a parent whose children all vanish
/// is pruned in the same pass. Running it again changes nothing.
pub fn finalize(tree: &mut DocumentTree) {
    finalize_node(tree, NodeId::ROOT);
}

/// Finalize one subtree. Returns `true` when the node ended up empty.
fn finalize_node(tree: &mut DocumentTree, id: NodeId) -> bool {
    let children = {
        let Some(node) = tree.node_mut(id) else {
            return true;
        };

        let lines = std::mem::take(&mut node.lines);
        node.content = normalize_content(node.content.iter().chain(lines.iter()));
        std::mem::take(&mut node.children)
    };

    let kept: Vec<NodeId> = children
        .into_iter()
        .filter(|&child| !finalize_node(tree, child))
        .collect();

    match tree.node_mut(id) {
        Some(node) => {
            node.children = kept;
            node.is_empty()
        }
        None => true,
    }
}
