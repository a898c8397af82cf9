//! The two conversion pipelines

pub mod documents;
pub mod images;

pub use documents::{collect_documents, documents_to_pdf, DocumentReport, SkippedFile};
pub use images::{collect_images, images_to_pdf};
