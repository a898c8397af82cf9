//! Reading back page counts, page sizes and metadata from a PDF

use std::path::Path;
use lopdf::{Document, Object};
use crate::error::{Error, Result};

/// Count pages by reading the Count field from the Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog = doc.catalog()?;

    let pages_id = match catalog.get(b"Pages") {
        Ok(Object::Reference(id)) => *id,
        _ => return Err(Error::General("Pages is not a reference".to_string())),
    };

    let pages_dict = doc.get_dictionary(pages_id)?;

    match pages_dict.get(b"Count") {
        Ok(Object::Integer(n)) => Ok(*n as usize),
        _ => Err(Error::General("Count is not an integer".to_string())),
    }
}

/// PDF metadata
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Producing application (if present)
    pub producer: Option<String>,
}

/// Decode a PDF text string (UTF-16BE with BOM, otherwise single-byte)
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}

fn info_string(doc: &Document, key: &[u8]) -> Option<String> {
    let info_id = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => *id,
        _ => return None,
    };
    let info = doc.get_dictionary(info_id).ok()?;
    let bytes = info.get(key).ok()?.as_str().ok()?;
    Some(decode_text_string(bytes))
}

fn load(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    Ok(Document::load(path)?)
}

/// Extract metadata from a PDF file
pub fn extract_metadata(path: &Path) -> Result<PdfMetadata> {
    let doc = load(path)?;
    let page_count = count_pages_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(PdfMetadata {
        page_count,
        title: info_string(&doc, b"Title"),
        producer: info_string(&doc, b"Producer"),
    })
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<usize> {
    let doc = load(path)?;
    let page_count = count_pages_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}

/// Width and height of every page's MediaBox, in page order
pub fn page_sizes(path: &Path) -> Result<Vec<(f32, f32)>> {
    let doc = load(path)?;

    let mut sizes = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let media_box = doc.get_dictionary(page_id)?.get(b"MediaBox")?.as_array()?;
        let coords = media_box
            .iter()
            .map(Object::as_float)
            .collect::<std::result::Result<Vec<f32>, _>>()?;
        if coords.len() != 4 {
            return Err(Error::General(format!("Malformed MediaBox on page {:?}", page_id)));
        }
        sizes.push((coords[2] - coords[0], coords[3] - coords[1]));
    }

    Ok(sizes)
}
