//! Plain-text outline rendering.

use textwrap::{fill, Options};

use crate::config::TEXT_WRAP_WIDTH;
use crate::outline::{DocumentTree, NodeId};

const INDENT: &str = "  ";

/// Render the tree as an indented outline.
///
/// Titles are indented two spaces per level; prose sits one level deeper
/// than its heading and is wrapped at [`TEXT_WRAP_WIDTH`] columns.
#[must_use]
pub fn render_text(tree: &DocumentTree) -> String {
    let mut out = String::new();
    if let Some(root) = tree.node(NodeId::ROOT) {
        for &child in root.children() {
            render_node(tree, child, 0, &mut out);
        }
    }
    out
}

fn render_node(tree: &DocumentTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.node(id) else {
        return;
    };

    out.push_str(&INDENT.repeat(depth));
    out.push_str(node.title().unwrap_or_default());
    out.push('\n');

    if let Some(content) = node.content() {
        let indent = INDENT.repeat(depth + 1);
        let options = Options::new(TEXT_WRAP_WIDTH)
            .initial_indent(&indent)
            .subsequent_indent(&indent);
        out.push_str(&fill(content, &options));
        out.push('\n');
    }

    for &child in node.children() {
        render_node(tree, child, depth + 1, out);
    }
}
