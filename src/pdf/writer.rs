//! PDF assembly using lopdf
//!
//! Builds a document page by page: laid-out text pages set in the standard
//! Helvetica fonts, or full-page RGB images. Nothing touches the filesystem
//! until [`PdfBuilder::save`].

use std::fs;
use std::path::Path;

use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::{debug, info};

use crate::error::Result;
use crate::layout::{PageDimensions, PageLayout};
use crate::text::{encode_win_ansi, FontFace};

/// Incrementally assembled PDF document
pub struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    font_resources: Option<ObjectId>,
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBuilder {
    /// Start an empty document
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        // Reserve the page tree id now so pages can point at their parent
        let pages_id = doc.new_object_id();

        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            font_resources: None,
        }
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Add a page of positioned text lines
    pub fn add_text_page(&mut self, page: &PageLayout, size: &PageDimensions) -> Result<()> {
        let mut operations = Vec::with_capacity(page.lines.len() * 5);
        for line in &page.lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(line.face.resource_name().as_bytes().to_vec()),
                    Object::Real(line.size),
                ],
            ));
            operations.push(Operation::new("Td", vec![Object::Real(line.x), Object::Real(line.y)]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations }.encode()?;
        let resources_id = self.font_resources();
        self.push_page(
            size.width.pt() as f32,
            size.height.pt() as f32,
            content,
            Object::Reference(resources_id),
        );
        Ok(())
    }

    /// Add a page sized to the image (one pixel per point) that the image fills
    pub fn add_image_page(&mut self, image: RgbImage) -> Result<()> {
        let (width, height) = image.dimensions();

        let mut image_dict = Dictionary::new();
        image_dict.set("Type", Object::Name(b"XObject".to_vec()));
        image_dict.set("Subtype", Object::Name(b"Image".to_vec()));
        image_dict.set("Width", Object::Integer(i64::from(width)));
        image_dict.set("Height", Object::Integer(i64::from(height)));
        image_dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
        image_dict.set("BitsPerComponent", Object::Integer(8));
        let image_id = self.doc.add_object(Stream::new(image_dict, image.into_raw()));

        let (w, h) = (width as f32, height as f32);
        let operations = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(w),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(h),
                    Object::Integer(0),
                    Object::Integer(0),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im1".to_vec())]),
            Operation::new("Q", vec![]),
        ];
        let content = Content { operations }.encode()?;

        let mut xobjects = Dictionary::new();
        xobjects.set("Im1", Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        self.push_page(w, h, content, Object::Dictionary(resources));
        Ok(())
    }

    /// Finish the document and write it to `path`.
    ///
    /// A file left half-written by a failed save is removed.
    pub fn save(mut self, path: &Path, title: &str) -> Result<()> {
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| Object::Reference(id)).collect();

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut info = Dictionary::new();
        info.set("Title", text_string(title));
        info.set("Producer", text_string(concat!("folder2pdf ", env!("CARGO_PKG_VERSION"))));
        let info_id = self.doc.add_object(info);
        self.doc.trailer.set("Info", Object::Reference(info_id));

        self.doc.compress();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if let Err(e) = self.doc.save(path) {
            let _ = fs::remove_file(path);
            return Err(e.into());
        }

        info!(path = %path.display(), pages = self.page_ids.len(), "Wrote PDF");
        Ok(())
    }

    fn push_page(&mut self, width: f32, height: f32, content: Vec<u8>, resources: Object) {
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(self.pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width),
                Object::Real(height),
            ]),
        );
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", resources);

        let page_id = self.doc.add_object(page);
        self.page_ids.push(page_id);
        debug!(page = self.page_ids.len(), width, height, "Added page");
    }

    /// Shared font resources, created on first use
    fn font_resources(&mut self) -> ObjectId {
        if let Some(id) = self.font_resources {
            return id;
        }

        let mut fonts = Dictionary::new();
        for face in [FontFace::Regular, FontFace::Bold] {
            let font_id = use_standard_font(&mut self.doc, face);
            fonts.set(face.resource_name(), Object::Reference(font_id));
        }

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        let id = self.doc.add_object(resources);
        self.font_resources = Some(id);
        id
    }
}

/// Reference one of the standard 14 fonts (nothing embedded)
fn use_standard_font(doc: &mut Document, face: FontFace) -> ObjectId {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(face.base_font().as_bytes().to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));

    doc.add_object(Object::Dictionary(font))
}

/// PDF text string: plain bytes for ASCII, UTF-16BE with a byte-order mark otherwise
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
