//! Output file naming
//!
//! Every PDF is named `<base>[<n>]_<YYYY-MM-DD_HH-MM-SS>.pdf`. The bracketed
//! number is one more than the largest number already present in the output
//! folder, so repeated runs never overwrite earlier results. The timestamp is
//! only there for humans.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::{Error, Result};

fn sequence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[(\d+)\]_.*\.pdf$").expect("valid sequence regex"))
}

/// Extract the bracketed sequence number from an output file name
pub fn parse_sequence_number(file_name: &str) -> Option<u64> {
    sequence_pattern()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Next free sequence number for `dir`: max existing + 1, or 1.
///
/// A directory that does not exist yet counts as empty.
pub fn next_sequence_number(dir: &Path) -> Result<u64> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(1),
        Err(e) => return Err(e.into()),
    };

    let mut max = 0;
    for entry in entries {
        let entry = entry?;
        if let Some(n) = entry.file_name().to_str().and_then(parse_sequence_number) {
            max = max.max(n);
        }
    }

    following(max, dir)
}

fn following(n: u64, dir: &Path) -> Result<u64> {
    n.checked_add(1).ok_or_else(|| {
        Error::General(format!("Sequence numbers exhausted in '{}'", dir.display()))
    })
}

/// Format a timestamp the way it appears in output names
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Build an output file name
pub fn output_file_name(base: &str, number: u64, at: &NaiveDateTime) -> String {
    format!("{}[{}]_{}.pdf", base, number, format_timestamp(at))
}

/// Hands out output paths for one run.
///
/// The number only advances through [`OutputNamer::advance`], which callers
/// invoke once a PDF has actually been written.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    dir: PathBuf,
    base: String,
    next: u64,
}

impl OutputNamer {
    /// Scan `dir` and start numbering after the highest existing output
    pub fn scan(dir: &Path, base: &str) -> Result<Self> {
        Ok(Self {
            dir: dir.to_path_buf(),
            base: base.to_string(),
            next: next_sequence_number(dir)?,
        })
    }

    /// Number the next output will carry
    pub fn current(&self) -> u64 {
        self.next
    }

    /// Path for the next output, stamped with `at`
    pub fn path_at(&self, at: &NaiveDateTime) -> PathBuf {
        self.dir.join(output_file_name(&self.base, self.next, at))
    }

    /// Move on to the next number
    pub fn advance(&mut self) -> Result<()> {
        self.next = following(self.next, &self.dir)?;
        Ok(())
    }
}
