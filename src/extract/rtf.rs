//! Rich Text Format stripped down to its visible text

use std::fs;
use std::path::Path;

use super::TextExtractor;
use crate::error::{Error, Result};
use crate::text::decode_cp1252;

/// Strips RTF control words, keeping the body text.
///
/// `\par` (and `\sect`, `\page`) end a paragraph; `\line` breaks the line
/// inside one. Hex escapes are read as Windows-1252 and `\uN` escapes as
/// Unicode. Tables such as fonts, colors
/// and styles are skipped along with pictures and `{\*...}` destinations.
pub struct RtfExtractor;

impl TextExtractor for RtfExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let data = fs::read(path)?;
        rtf_to_paragraphs(&data)
    }
}

/// Destinations whose content is never body text
const SKIPPED_DESTINATIONS: &[&[u8]] = &[
    b"fonttbl", b"colortbl", b"stylesheet", b"info", b"pict", b"object",
    b"header", b"headerl", b"headerr", b"headerf",
    b"footer", b"footerl", b"footerr", b"footerf", b"footnote",
    b"listtable", b"listoverridetable", b"rsidtbl", b"generator", b"fldinst",
    b"filetbl", b"revtbl", b"themedata", b"colorschememapping", b"datastore",
    b"latentstyles", b"xmlnstbl",
];

#[derive(Debug, Clone, Copy)]
struct GroupState {
    skip: bool,
    /// Fallback characters that follow each `\uN`
    unicode_skip: usize,
}

struct RtfParser<'a> {
    data: &'a [u8],
    pos: usize,
    state: GroupState,
    stack: Vec<GroupState>,
    pending_fallback: usize,
    current: String,
    paragraphs: Vec<String>,
}

fn rtf_to_paragraphs(data: &[u8]) -> Result<Vec<String>> {
    if !data.starts_with(b"{\\rtf") {
        return Err(Error::Extraction("missing {\\rtf header".to_string()));
    }

    let mut parser = RtfParser {
        data,
        pos: 0,
        state: GroupState { skip: false, unicode_skip: 1 },
        stack: Vec::new(),
        pending_fallback: 0,
        current: String::new(),
        paragraphs: Vec::new(),
    };
    parser.run();

    if !parser.stack.is_empty() {
        return Err(Error::Extraction("unbalanced braces".to_string()));
    }
    Ok(parser.paragraphs)
}

impl<'a> RtfParser<'a> {
    fn run(&mut self) {
        while let Some(&byte) = self.data.get(self.pos) {
            self.pos += 1;
            match byte {
                b'{' => {
                    self.stack.push(self.state);
                    if self.data[self.pos..].starts_with(b"\\*") {
                        self.state.skip = true;
                        self.pos += 2;
                    }
                }
                b'}' => {
                    if let Some(outer) = self.stack.pop() {
                        self.state = outer;
                    }
                    self.pending_fallback = 0;
                }
                b'\\' => self.control(),
                b'\r' | b'\n' => {}
                _ => self.emit(decode_cp1252(byte)),
            }
        }
        self.end_paragraph();
    }

    fn control(&mut self) {
        let Some(&next) = self.data.get(self.pos) else {
            return;
        };

        if !next.is_ascii_alphabetic() {
            self.pos += 1;
            match next {
                b'\'' => {
                    let hex = self.data.get(self.pos..self.pos + 2).unwrap_or_default();
                    self.pos += hex.len();
                    if let Some(byte) = std::str::from_utf8(hex).ok().and_then(|h| u8::from_str_radix(h, 16).ok()) {
                        self.emit(decode_cp1252(byte));
                    }
                }
                b'\\' | b'{' | b'}' => self.emit(next as char),
                b'~' => self.emit('\u{00A0}'),
                b'_' => self.emit('-'),
                b'\r' | b'\n' => self.end_paragraph(),
                _ => {}
            }
            return;
        }

        let data = self.data;
        let start = self.pos;
        while data.get(self.pos).is_some_and(u8::is_ascii_alphabetic) {
            self.pos += 1;
        }
        let word = &data[start..self.pos];

        let num_start = self.pos;
        if self.data.get(self.pos) == Some(&b'-') {
            self.pos += 1;
        }
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        let param = std::str::from_utf8(&self.data[num_start..self.pos])
            .ok()
            .and_then(|s| s.parse::<i32>().ok());

        // A single space delimits the control word and is not text
        if self.data.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }

        self.apply(word, param);
    }

    fn apply(&mut self, word: &[u8], param: Option<i32>) {
        match word {
            b"par" | b"sect" | b"page" => self.end_paragraph(),
            b"line" => self.emit('\n'),
            b"tab" => self.emit('\t'),
            b"emdash" => self.emit('\u{2014}'),
            b"endash" => self.emit('\u{2013}'),
            b"bullet" => self.emit('\u{2022}'),
            b"lquote" => self.emit('\u{2018}'),
            b"rquote" => self.emit('\u{2019}'),
            b"ldblquote" => self.emit('\u{201C}'),
            b"rdblquote" => self.emit('\u{201D}'),
            b"emspace" | b"enspace" | b"qmspace" => self.emit(' '),
            b"uc" => self.state.unicode_skip = param.unwrap_or(1).max(0) as usize,
            b"u" => {
                if let Some(code) = param {
                    let code = if code < 0 { code + 65536 } else { code };
                    if let Some(c) = u32::try_from(code).ok().and_then(char::from_u32) {
                        self.emit(c);
                    }
                    self.pending_fallback = self.state.unicode_skip;
                }
            }
            b"bin" => {
                let len = param.unwrap_or(0).max(0) as usize;
                self.pos = (self.pos + len).min(self.data.len());
            }
            _ if SKIPPED_DESTINATIONS.contains(&word) => self.state.skip = true,
            _ => {}
        }
    }

    fn emit(&mut self, c: char) {
        if self.pending_fallback > 0 {
            self.pending_fallback -= 1;
            return;
        }
        if !self.state.skip {
            self.current.push(c);
        }
    }

    fn end_paragraph(&mut self) {
        if self.state.skip {
            return;
        }
        self.paragraphs.push(std::mem::take(&mut self.current));
    }
}
