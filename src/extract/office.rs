//! Zipped XML word-processing formats: DOCX and ODT
//!
//! Both formats keep their body in one XML part inside a zip container. The
//! walker below reads that part and collects one string per paragraph element.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use super::TextExtractor;
use crate::error::Result;

/// Paragraph list of `word/document.xml`
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let xml = read_archive_entry(path, "word/document.xml")?;
        collect_paragraphs(&xml, &WORDPROCESSING_ML)
    }
}

/// Paragraphs and headings of `content.xml`
pub struct OdtExtractor;

impl TextExtractor for OdtExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let xml = read_archive_entry(path, "content.xml")?;
        collect_paragraphs(&xml, &OPEN_DOCUMENT_TEXT)
    }
}

/// Element names that matter when flattening a document body
struct Markup {
    paragraphs: &'static [&'static [u8]],
    /// Element holding run text; `None` takes all text inside a paragraph
    text: Option<&'static [u8]>,
    tab: &'static [u8],
    line_breaks: &'static [&'static [u8]],
    /// Run-of-spaces element with a `text:c` count
    spaces: Option<&'static [u8]>,
    /// Subtrees whose content is not body text
    ignored: &'static [&'static [u8]],
}

const WORDPROCESSING_ML: Markup = Markup {
    paragraphs: &[b"w:p"],
    text: Some(b"w:t"),
    tab: b"w:tab",
    line_breaks: &[b"w:br", b"w:cr"],
    spaces: None,
    // w:tabs holds tab-stop definitions that reuse the w:tab name
    ignored: &[b"w:tabs", b"w:pPr"],
};

const OPEN_DOCUMENT_TEXT: Markup = Markup {
    paragraphs: &[b"text:p", b"text:h"],
    text: None,
    tab: b"text:tab",
    line_breaks: &[b"text:line-break"],
    spaces: Some(b"text:s"),
    ignored: &[b"text:note", b"office:annotation", b"text:tracked-changes"],
};

/// Longest run of spaces a single `text:s` may expand to
const MAX_SPACE_RUN: usize = 128;

fn read_archive_entry(path: &Path, entry: &str) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut xml = String::new();
    archive.by_name(entry)?.read_to_string(&mut xml)?;
    Ok(xml)
}

fn collect_paragraphs(xml: &str, markup: &Markup) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut ignored = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let qname = e.name();
                let name = qname.as_ref();
                if markup.ignored.contains(&name) {
                    ignored += 1;
                } else if markup.paragraphs.contains(&name) {
                    depth += 1;
                } else if Some(name) == markup.text {
                    in_text = true;
                } else if depth > 0 && ignored == 0 {
                    inline_element(&e, markup, &mut current)?;
                }
            }
            Event::Empty(e) => {
                let qname = e.name();
                let name = qname.as_ref();
                if ignored > 0 {
                    continue;
                }
                if depth > 0 {
                    inline_element(&e, markup, &mut current)?;
                } else if markup.paragraphs.contains(&name) {
                    paragraphs.push(String::new());
                }
            }
            Event::End(e) => {
                let qname = e.name();
                let name = qname.as_ref();
                if markup.ignored.contains(&name) {
                    ignored = ignored.saturating_sub(1);
                } else if markup.paragraphs.contains(&name) {
                    depth = depth.saturating_sub(1);
                    if depth == 0 && ignored == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                } else if Some(name) == markup.text {
                    in_text = false;
                }
            }
            Event::Text(text) => {
                if depth > 0 && ignored == 0 && (markup.text.is_none() || in_text) {
                    current.push_str(&text.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn inline_element(element: &BytesStart, markup: &Markup, current: &mut String) -> Result<()> {
    let qname = element.name();
    let name = qname.as_ref();

    if name == markup.tab {
        current.push('\t');
    } else if markup.line_breaks.contains(&name) {
        current.push('\n');
    } else if Some(name) == markup.spaces {
        let count = match element
            .try_get_attribute("text:c")
            .map_err(quick_xml::Error::from)?
        {
            Some(attr) => attr.unescape_value()?.trim().parse().unwrap_or(1),
            None => 1,
        };
        current.extend(std::iter::repeat(' ').take(count.min(MAX_SPACE_RUN)));
    }

    Ok(())
}
