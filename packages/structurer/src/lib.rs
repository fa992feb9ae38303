//! Kijun Structurer - Rebuild the outline of Japanese regulatory standards.
//!
//! Text extracted from a PDF standard is a flat stream of lines. This crate
//! recognizes the heading conventions of Japanese government standards
//! (`第1編`, `第1章`, `第1節`, `1`, `（1）`, `1)`, `①`, `ア)`), infers their
//! nesting and emits the document as a tree of titled nodes with prose.
//!
//! # Example
//!
//! ```
//! use kijun_structurer::outline::OutlineParser;
//!
//! let doc = OutlineParser::default()
//!     .parse_lines(["1 通則", "(1) 対象", "内容A", "(2) 範囲", "内容B"])
//!     .unwrap();
//!
//! let item = doc.tree.get(&["1 通則", "(2)範囲"]).unwrap();
//! assert_eq!(item.content(), Some("内容B"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, validation and parser settings
//! - [`error`]: Error types and Result alias
//! - [`source`]: Page text providers (text files, `pdftotext`)
//! - [`normalize`]: Page boilerplate removal
//! - [`outline`]: Line classification, tree building and finalization
//! - [`output`]: JSON, YAML and text rendering
//! - [`pipeline`]: End-to-end document processing
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod normalize;
pub mod outline;
pub mod output;
pub mod pipeline;
pub mod source;

// Re-export main functions
pub use pipeline::process_document;

// Re-export commonly used items
pub use config::{DuplicatePolicy, OrphanPolicy, ParserConfig};
pub use error::{Result, StructureError};
pub use normalize::LineNormalizer;
pub use outline::{DocumentTree, HeadingFamily, OutlineParser, ParsedDocument};
pub use output::{render, OutputFormat};
