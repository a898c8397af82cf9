//! PDF writing and inspection

pub mod inspect;
pub mod writer;

// Re-export commonly used items
pub use inspect::{count_pages, extract_metadata, page_sizes, PdfMetadata};
pub use writer::PdfBuilder;
