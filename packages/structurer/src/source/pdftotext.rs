//! PDF page source backed by poppler's `pdftotext`.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{split_pages, PageTextProvider};
use crate::config::PDFTOTEXT_PROGRAM;
use crate::error::{Result, StructureError};

/// Extracts page text from a PDF by running `pdftotext`.
#[derive(Debug, Clone)]
pub struct PdftotextSource {
    path: PathBuf,
    program: String,
}

impl PdftotextSource {
    /// Create a source for a PDF file using `pdftotext` from `PATH`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            program: PDFTOTEXT_PROGRAM.to_string(),
        }
    }

    /// Use a different extractor binary with the same command line.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn command(&self, max_pages: Option<usize>) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-enc").arg("UTF-8");
        if let Some(last) = max_pages {
            command.arg("-l").arg(last.to_string());
        }
        command.arg(&self.path).arg("-");
        command
    }
}

impl PageTextProvider for PdftotextSource {
    fn page_texts(&self, max_pages: Option<usize>) -> Result<Vec<String>> {
        tracing::debug!(program = %self.program, path = %self.path.display(), "Running text extractor");

        let output = self.command(max_pages).output().map_err(|source| {
            StructureError::ExtractorUnavailable {
                program: self.program.clone(),
                source,
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StructureError::Extraction {
                path: self.path.clone(),
                message: stderr.trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_pages(&text, max_pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let source = PdftotextSource::new("kijun.pdf");
        let command = source.command(Some(3));
        let args: Vec<_> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(command.get_program(), "pdftotext");
        assert_eq!(args, vec!["-enc", "UTF-8", "-l", "3", "kijun.pdf", "-"]);
    }

    #[test]
    fn test_command_line_all_pages() {
        let source = PdftotextSource::new("kijun.pdf");
        let args: Vec<_> = source
            .command(None)
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["-enc", "UTF-8", "kijun.pdf", "-"]);
    }

    #[test]
    fn test_missing_program() {
        let source = PdftotextSource::new("kijun.pdf").with_program("kijun-no-such-extractor");
        let err = source.page_texts(None).unwrap_err();
        assert!(matches!(err, StructureError::ExtractorUnavailable { .. }));
    }
}
