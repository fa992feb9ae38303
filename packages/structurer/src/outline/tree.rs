//! Arena-backed document tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. The
//! parse stack only ever holds ids, so there are no parent pointers to keep
//! in sync. Nodes that get pruned or replaced stay in the arena but are no
//! longer reachable from the root.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::CONTENT_KEY;

/// Stable index of a node in its [`DocumentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The unkeyed document root.
    pub const ROOT: NodeId = NodeId(0);
}

/// A titled node holding prose and/or child nodes.
#[derive(Debug, Clone, Default)]
pub struct DocumentNode {
    /// Canonical heading title; `None` only for the root.
    pub(crate) title: Option<String>,
    /// Children in document order. Titles are unique within this list.
    pub(crate) children: Vec<NodeId>,
    /// Prose lines collected since the heading, waiting for finalization.
    pub(crate) lines: Vec<String>,
    /// Normalized prose, set by finalization.
    pub(crate) content: Option<String>,
}

impl DocumentNode {
    fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Heading title of this node.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Finalized prose, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Prose lines not yet finalized.
    #[must_use]
    pub fn pending_lines(&self) -> &[String] {
        &self.lines
    }

    /// Child ids in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True when the node carries neither prose nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.lines.is_empty() && self.content.is_none()
    }
}

/// The outline of one document.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<DocumentNode>,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    /// Create a tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![DocumentNode::default()],
        }
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&DocumentNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut DocumentNode> {
        self.nodes.get_mut(id.0)
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &DocumentNode {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Find a direct child of `parent` by title.
    #[must_use]
    pub fn find_child(&self, parent: NodeId, title: &str) -> Option<NodeId> {
        self.node(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).and_then(DocumentNode::title) == Some(title))
    }

    /// Append a new child under `parent`.
    ///
    /// The caller is responsible for sibling title uniqueness.
    pub fn add_child(&mut self, parent: NodeId, title: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DocumentNode::titled(title));
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }
        id
    }

    /// Swap a fresh node into `old`'s position among `parent`'s children.
    ///
    /// `old` becomes unreachable. Falls back to appending when `old` is not
    /// a child of `parent`.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId) -> NodeId {
        let title = self
            .node(old)
            .and_then(|n| n.title.clone())
            .unwrap_or_default();
        let id = NodeId(self.nodes.len());
        self.nodes.push(DocumentNode::titled(title));

        if let Some(node) = self.node_mut(parent) {
            match node.children.iter().position(|&c| c == old) {
                Some(pos) => node.children[pos] = id,
                None => node.children.push(id),
            }
        }
        id
    }

    /// Append a prose line to a node's pending buffer.
    pub fn push_line(&mut self, id: NodeId, line: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.lines.push(line.into());
        }
    }

    /// Walk from the root along a path of titles.
    ///
    /// # Examples
    /// ```
    /// use kijun_structurer::outline::{DocumentTree, NodeId};
    ///
    /// let mut tree = DocumentTree::new();
    /// let part = tree.add_child(NodeId::ROOT, "第1編 総則");
    /// tree.add_child(part, "1 適用");
    ///
    /// assert!(tree.get(&["第1編 総則", "1 適用"]).is_some());
    /// assert!(tree.get(&["1 適用"]).is_none());
    /// ```
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Option<&DocumentNode> {
        let mut current = NodeId::ROOT;
        for title in path {
            current = self.find_child(current, title)?;
        }
        self.node(current)
    }

    /// Titles of the top-level nodes, in document order.
    #[must_use]
    pub fn top_level_titles(&self) -> Vec<&str> {
        self.child_titles(NodeId::ROOT)
    }

    /// Titles of `id`'s children, in document order.
    #[must_use]
    pub fn child_titles(&self, id: NodeId) -> Vec<&str> {
        self.node(id)
            .map(|n| {
                n.children
                    .iter()
                    .filter_map(|&c| self.node(c).and_then(DocumentNode::title))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of nodes reachable from the root, the root excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = self.root().children.clone();
        while let Some(id) = stack.pop() {
            count += 1;
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().copied());
            }
        }
        count
    }

    /// True when the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root().children.is_empty()
    }

    /// Borrow a node as a serializable view.
    #[must_use]
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView { tree: self, id }
    }
}

/// Serializable view of a subtree.
///
/// A node serializes as a map: its prose under [`CONTENT_KEY`] first (when
/// present), then one entry per child keyed by title.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a DocumentTree,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(node) = self.tree.node(self.id) else {
            return serializer.serialize_map(Some(0))?.end();
        };

        let mut map = serializer.serialize_map(None)?;
        if let Some(content) = node.content.as_deref() {
            map.serialize_entry(CONTENT_KEY, content)?;
        }
        for &child in &node.children {
            let title = self
                .tree
                .node(child)
                .and_then(DocumentNode::title)
                .unwrap_or_default();
            map.serialize_entry(title, &self.tree.view(child))?;
        }
        map.end()
    }
}

impl Serialize for DocumentTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view(NodeId::ROOT).serialize(serializer)
    }
}
