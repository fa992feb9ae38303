//! Plain-text page source.

use std::fs;
use std::path::{Path, PathBuf};

use super::{split_pages, PageTextProvider};
use crate::error::Result;

/// Reads pages from a UTF-8 text file, pages separated by form feeds.
///
/// This is the format `pdftotext` writes, so a document can be extracted
/// once and parsed many times.
#[derive(Debug, Clone)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    /// Create a source for a text file.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PageTextProvider for TextFileSource {
    fn page_texts(&self, max_pages: Option<usize>) -> Result<Vec<String>> {
        let bytes = fs::read(&self.path)?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    valid_up_to = e.utf8_error().valid_up_to(),
                    "Input is not valid UTF-8, replacing invalid sequences"
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(split_pages(&text, max_pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kijun.txt");
        fs::write(&path, "第1編 総則\n\u{0C}第2編 仮設\n\u{0C}").unwrap();

        let pages = TextFileSource::new(&path).page_texts(None).unwrap();
        assert_eq!(pages, vec!["第1編 総則\n", "第2編 仮設\n"]);

        let pages = TextFileSource::new(&path).page_texts(Some(1)).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        fs::write(&path, b"1 \xff\xfe\n").unwrap();

        let pages = TextFileSource::new(&path).page_texts(None).unwrap();
        assert!(pages[0].contains('\u{FFFD}'));
    }

    #[test]
    fn test_missing_file() {
        let result = TextFileSource::new("/nonexistent/kijun.txt").page_texts(None);
        assert!(result.is_err());
    }
}
