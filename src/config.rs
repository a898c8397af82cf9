//! Run settings: where sources are read from and where PDFs go

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Base name used by the image pipeline when none is given
pub const DEFAULT_IMAGE_BASE_NAME: &str = "output";

/// Base name used by the document pipeline when none is given
pub const DEFAULT_DOCUMENT_BASE_NAME: &str = "document";

/// Folder locations and post-write behaviour for one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory relative folder names resolve against
    pub root: PathBuf,
    /// Image source folder
    pub image_dir: PathBuf,
    /// Document source folder
    pub document_dir: PathBuf,
    /// Destination for generated PDFs
    pub output_dir: PathBuf,
    /// Open each PDF in the system viewer after writing
    pub open_viewer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            image_dir: PathBuf::from("img"),
            document_dir: PathBuf::from("DOC"),
            output_dir: PathBuf::from("PDF"),
            open_viewer: true,
        }
    }
}

impl Settings {
    /// Defaults rooted at the directory holding the running executable
    pub fn beside_executable() -> Result<Self> {
        Ok(Self {
            root: program_dir()?,
            ..Self::default()
        })
    }

    fn resolve(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.root.join(dir)
        }
    }

    pub fn image_path(&self) -> PathBuf {
        self.resolve(&self.image_dir)
    }

    pub fn document_path(&self) -> PathBuf {
        self.resolve(&self.document_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }
}

/// Directory containing the running executable
pub fn program_dir() -> Result<PathBuf> {
    let exe = env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::General(format!("Executable has no parent directory: {}", exe.display())))
}

/// Trimmed user-supplied base name, or `default` when blank
pub fn base_name_or(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_folders() {
        let settings = Settings {
            root: PathBuf::from("/opt/tool"),
            ..Settings::default()
        };
        let root = PathBuf::from("/opt/tool");
        assert_eq!(settings.image_path(), root.join("img"));
        assert_eq!(settings.document_path(), root.join("DOC"));
        assert_eq!(settings.output_path(), root.join("PDF"));
        assert!(settings.open_viewer);
    }

    #[test]
    fn test_absolute_folders_ignore_root() {
        let absolute = env::temp_dir().join("pdfs");
        let settings = Settings {
            root: PathBuf::from("somewhere"),
            output_dir: absolute.clone(),
            ..Settings::default()
        };
        assert_eq!(settings.output_path(), absolute);
    }

    #[test]
    fn test_base_name_defaults() {
        assert_eq!(base_name_or("  vacation \n", DEFAULT_IMAGE_BASE_NAME), "vacation");
        assert_eq!(base_name_or("   ", DEFAULT_IMAGE_BASE_NAME), "output");
        assert_eq!(base_name_or("", DEFAULT_DOCUMENT_BASE_NAME), "document");
    }

    #[test]
    fn test_program_dir_exists() {
        assert!(program_dir().unwrap().is_dir());
    }
}
