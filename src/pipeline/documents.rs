//! Document folder to one PDF per document

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::warn;

use crate::discover::{collect_sources, SourceKind};
use crate::error::{Error, Result};
use crate::extract::extract_paragraphs;
use crate::layout::{paginate, TextLayout};
use crate::naming::OutputNamer;
use crate::pdf::PdfBuilder;

/// A document that produced no PDF, and why
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: Error,
}

/// Outcome of converting a batch of documents
#[derive(Debug, Default)]
pub struct DocumentReport {
    /// PDFs written, in input order
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

/// Eligible documents in `dir`, sorted by file name
pub fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    collect_sources(dir, SourceKind::Document)
}

/// Convert each document into its own PDF in `output_dir`.
///
/// A document that cannot be extracted or written is recorded in the report
/// and skipped; the rest of the batch carries on. Sequence numbers are taken
/// only by PDFs that were written.
pub fn documents_to_pdf(
    documents: &[PathBuf],
    output_dir: &Path,
    base_name: &str,
    layout: &TextLayout,
) -> Result<DocumentReport> {
    let mut namer = OutputNamer::scan(output_dir, base_name)?;
    let mut report = DocumentReport::default();

    for path in documents {
        match convert_document(path, &namer, layout) {
            Ok(output) => {
                report.written.push(output);
                namer.advance()?;
            }
            Err(reason) => {
                warn!(file = %path.display(), error = %reason, "Could not convert document");
                report.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason,
                });
            }
        }
    }

    Ok(report)
}

fn convert_document(path: &Path, namer: &OutputNamer, layout: &TextLayout) -> Result<PathBuf> {
    let paragraphs = extract_paragraphs(path)?;
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut builder = PdfBuilder::new();
    for page in paginate(layout, &title, &paragraphs) {
        builder.add_text_page(&page, &layout.page)?;
    }

    let output = namer.path_at(&Local::now().naive_local());
    builder.save(&output, &title)?;
    Ok(output)
}
