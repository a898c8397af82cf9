//! Plain-text extraction from document files
//!
//! Each supported extension maps to a [`DocumentFormat`], and each format has
//! one [`TextExtractor`]. Extractors return the document as a flat list of
//! paragraphs; layout decides how they land on pages.

mod markdown;
mod office;
mod plain;
mod rtf;

use std::path::Path;

use tracing::debug;

use crate::discover::lowercase_extension;
use crate::error::{Error, Result};

pub use markdown::MarkdownExtractor;
pub use office::{DocxExtractor, OdtExtractor};
pub use plain::PlainTextExtractor;
pub use rtf::RtfExtractor;

/// Turns one document file into paragraphs of plain text
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<String>>;
}

/// Document formats with a text extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Office Open XML word-processing document
    Docx,
    PlainText,
    Markdown,
    Rtf,
    /// OpenDocument text
    Odt,
}

impl DocumentFormat {
    /// Format for a file extension (case-insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::PlainText),
            "md" => Some(DocumentFormat::Markdown),
            "rtf" => Some(DocumentFormat::Rtf),
            "odt" => Some(DocumentFormat::Odt),
            _ => None,
        }
    }

    /// Format of the file at `path`, judged by extension
    pub fn from_path(path: &Path) -> Option<Self> {
        lowercase_extension(path).and_then(|ext| Self::from_extension(&ext))
    }

    fn extractor(&self) -> &'static dyn TextExtractor {
        match self {
            DocumentFormat::Docx => &DocxExtractor,
            DocumentFormat::PlainText => &PlainTextExtractor,
            DocumentFormat::Markdown => &MarkdownExtractor,
            DocumentFormat::Rtf => &RtfExtractor,
            DocumentFormat::Odt => &OdtExtractor,
        }
    }
}

/// Extract the paragraphs of a document, dispatching on its extension
pub fn extract_paragraphs(path: &Path) -> Result<Vec<String>> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| {
        Error::UnsupportedFormat(
            lowercase_extension(path)
                .map(|ext| format!(".{}", ext))
                .unwrap_or_else(|| path.display().to_string()),
        )
    })?;

    let paragraphs = format.extractor().extract(path)?;
    debug!(file = %path.display(), ?format, paragraphs = paragraphs.len(), "Extracted text");
    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("DOCX"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_extension("txt"), Some(DocumentFormat::PlainText));
        assert_eq!(DocumentFormat::from_extension("Md"), Some(DocumentFormat::Markdown));
        assert_eq!(DocumentFormat::from_extension("rtf"), Some(DocumentFormat::Rtf));
        assert_eq!(DocumentFormat::from_extension("odt"), Some(DocumentFormat::Odt));
        assert_eq!(DocumentFormat::from_extension("pdf"), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slides.pptx");
        fs::write(&path, b"x").unwrap();

        match extract_paragraphs(&path) {
            Err(Error::UnsupportedFormat(ext)) => assert_eq!(ext, ".pptx"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatches_on_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.TXT");
        fs::write(&path, "alpha\nbeta").unwrap();

        assert_eq!(extract_paragraphs(&path).unwrap(), vec!["alpha", "beta"]);
    }
}
