//! Source file discovery and classification

use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Extensions accepted by the image pipeline
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "heic", "heif"];

/// Extensions accepted by the document pipeline
pub const DOCUMENT_EXTENSIONS: &[&str] = &["docx", "txt", "md", "rtf", "odt"];

/// What a source file will be converted as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Image,
    Document,
}

impl SourceKind {
    /// Extension whitelist for this kind
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceKind::Image => IMAGE_EXTENSIONS,
            SourceKind::Document => DOCUMENT_EXTENSIONS,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SourceKind::Image => "image",
            SourceKind::Document => "document",
        }
    }

    /// Classify a path by its (case-insensitive) extension
    pub fn of(path: &Path) -> Option<SourceKind> {
        let ext = lowercase_extension(path)?;
        [SourceKind::Image, SourceKind::Document]
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
    }
}

/// Lowercased extension of `path`, without the dot
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Word-processor lock files (`~$name.docx`) and dot-files
pub fn is_lock_or_hidden(file_name: &str) -> bool {
    file_name.starts_with("~$") || file_name.starts_with('.')
}

/// Whether `path` would be picked up by the pipeline for `kind`
pub fn is_eligible(path: &Path, kind: SourceKind) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !is_lock_or_hidden(name) && SourceKind::of(path) == Some(kind)
}

/// List the eligible files of `kind` directly inside `dir`, sorted by name.
///
/// Fails when the folder is missing or contains nothing eligible. Files with
/// other extensions are skipped with a warning.
pub fn collect_sources(dir: &Path, kind: SourceKind) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::FolderNotFound(dir.to_path_buf()));
    }

    let dir_str = dir
        .to_str()
        .ok_or_else(|| Error::General(format!("Folder path is not valid UTF-8: {}", dir.display())))?;
    let pattern = format!("{}/*", Pattern::escape(dir_str));
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let entries = glob_with(&pattern, options).map_err(|e| Error::General(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Could not read directory entry: {}", e);
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        if is_eligible(&path, kind) {
            files.push(path);
        } else {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            if !is_lock_or_hidden(name) {
                warn!(file = %path.display(), "Skipping unsupported {} file", kind.label());
            }
        }
    }

    if files.is_empty() {
        return Err(Error::NoEligibleFiles {
            dir: dir.to_path_buf(),
            kind: kind.label(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(count = files.len(), dir = %dir.display(), "Collected source files");

    Ok(files)
}
