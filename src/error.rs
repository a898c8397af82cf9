//! Error types for the folder2pdf library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the folder2pdf library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source folder does not exist
    #[error("Folder '{}' not found", .0.display())]
    FolderNotFound(PathBuf),

    /// Source folder exists but holds nothing we can convert
    #[error("No {kind} files found in '{}'", .dir.display())]
    NoEligibleFiles { dir: PathBuf, kind: &'static str },

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Image could not be decoded
    #[error("Could not decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// HEIC/HEIF photo could not be decoded
    #[error("Could not decode HEIF image {}: {message}", .path.display())]
    Heif { path: PathBuf, message: String },

    /// Text file is not valid UTF-8
    #[error("{} is not valid UTF-8 text", .0.display())]
    InvalidEncoding(PathBuf),

    /// Extension has no text extractor
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Container (docx/odt) could not be read
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Malformed XML inside a container
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Format-specific extraction failure
    #[error("Could not extract text: {0}")]
    Extraction(String),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// General error
    #[error("{0}")]
    General(String),
}
