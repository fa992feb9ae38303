//! Outline reconstruction from a flat line stream.
//!
//! ```text
//! lines ──► classifier ──► builder (path stack + arena tree) ──► finalize
//! ```
//!
//! - [`classifier`]: heading recognition and canonical titles
//! - [`builder`]: effective level resolution and tree construction
//! - [`finalize`]: prose normalization and pruning
//! - [`tree`]: the arena-backed document tree

pub mod builder;
pub mod classifier;
pub mod family;
pub mod finalize;
pub mod parser;
pub mod tree;

pub use builder::{HierarchyBuilder, ParseStats, ParsedDocument};
pub use classifier::{classify_line, is_excluded, Heading};
pub use family::HeadingFamily;
pub use finalize::{finalize, normalize_content};
pub use parser::OutlineParser;
pub use tree::{DocumentNode, DocumentTree, NodeId, NodeView};
