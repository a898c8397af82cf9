//! Plain UTF-8 text files

use std::fs;
use std::path::Path;

use super::TextExtractor;
use crate::error::{Error, Result};

/// Reads a `.txt` file as strict UTF-8; each line is a paragraph
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let text = read_utf8(path)?;
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// Read a whole file as strict UTF-8, dropping a leading byte-order mark
pub(super) fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mut text = String::from_utf8(bytes).map_err(|_| Error::InvalidEncoding(path.to_path_buf()))?;
    if text.starts_with('\u{FEFF}') {
        text.drain(..'\u{FEFF}'.len_utf8());
    }
    Ok(text)
}
