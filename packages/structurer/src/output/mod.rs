//! Rendering and writing finalized outlines.

mod text;
mod writer;

pub use text::render_text;
pub use writer::save_output;

use crate::error::Result;
use crate::outline::DocumentTree;

/// Output format for a rendered outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML document.
    Yaml,
    /// Indented plain-text outline.
    Text,
}

impl OutputFormat {
    /// Conventional file extension for the format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Text => "txt",
        }
    }
}

/// Render a finalized tree in the given format.
///
/// The result always ends with a newline.
///
/// # Examples
/// ```
/// use kijun_structurer::outline::OutlineParser;
/// use kijun_structurer::output::{render, OutputFormat};
///
/// let doc = OutlineParser::default().parse_lines(["1 適用", "本文"]).unwrap();
/// let json = render(&doc.tree, OutputFormat::Json).unwrap();
/// assert!(json.contains("\"1 適用\""));
/// ```
pub fn render(tree: &DocumentTree, format: OutputFormat) -> Result<String> {
    let mut rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(tree)?,
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(tree)?;
            format!("---\n{yaml}")
        }
        OutputFormat::Text => render_text(tree),
    };

    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::OutlineParser;
    use pretty_assertions::assert_eq;

    fn sample() -> DocumentTree {
        OutlineParser::default()
            .parse_lines(["第1編 総則", "1 適用", "この基準は、", "適用する。"])
            .unwrap()
            .tree
    }

    #[test]
    fn test_render_json_keeps_japanese() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        assert_eq!(
            json,
            "{\n  \"第1編 総則\": {\n    \"1 適用\": {\n      \"content\": \"この基準は、適用する。\"\n    }\n  }\n}\n"
        );
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&sample(), OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("第1編 総則:"));
        assert!(yaml.contains("content: この基準は、適用する。"));

        let value: serde_json::Value = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(value, serde_json::to_value(sample()).unwrap());
    }

    #[test]
    fn test_render_empty_tree() {
        let tree = DocumentTree::new();
        assert_eq!(render(&tree, OutputFormat::Json).unwrap(), "{}\n");
        assert_eq!(render(&tree, OutputFormat::Text).unwrap(), "\n");
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Yaml.extension(), "yaml");
        assert_eq!(OutputFormat::Text.extension(), "txt");
    }
}
