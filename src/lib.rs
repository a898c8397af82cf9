//! folder2pdf Library
//!
//! Converts a folder of images or text documents into PDF files.
//! This library provides functionality to:
//! - Discover eligible images and documents in a source folder
//! - Assemble a folder of images into one multi-page PDF
//! - Extract plain text from DOCX, TXT, Markdown, RTF and ODT files
//! - Word-wrap and paginate text onto A4 pages
//! - Name outputs with a sequence number that never repeats in a folder
//!
//! # Example
//!
//! ```no_run
//! use folder2pdf::layout::TextLayout;
//! use folder2pdf::pipeline::{collect_documents, documents_to_pdf};
//! use std::path::Path;
//!
//! let documents = collect_documents(Path::new("DOC")).expect("No documents");
//! let report = documents_to_pdf(&documents, Path::new("PDF"), "notes", &TextLayout::default())
//!     .expect("Conversion failed");
//!
//! for path in &report.written {
//!     println!("Created {}", path.display());
//! }
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod layout;
pub mod naming;
pub mod pdf;
pub mod pipeline;
pub mod text;
pub mod viewer;

// Re-export commonly used items
pub use error::{Error, Result};
