//! Image folder to a single multi-page PDF

use std::path::{Path, PathBuf};

use chrono::Local;
use image::{ImageError, ImageReader, RgbImage};
use tracing::debug;

use crate::discover::{collect_sources, SourceKind};
use crate::error::{Error, Result};
use crate::naming::OutputNamer;
use crate::pdf::PdfBuilder;

/// Eligible images in `dir`, sorted by file name
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    collect_sources(dir, SourceKind::Image)
}

/// Write `images` as one PDF into `output_dir`, one page per image, in order.
///
/// Every image is decoded and flattened to RGB before anything is written; if
/// one cannot be decoded the whole run fails and no file is created.
pub fn images_to_pdf(images: &[PathBuf], output_dir: &Path, base_name: &str) -> Result<PathBuf> {
    if images.is_empty() {
        return Err(Error::General("No images to convert".to_string()));
    }

    let mut builder = PdfBuilder::new();
    for path in images {
        let decoded = decode_image(path)?;
        debug!(file = %path.display(), width = decoded.width(), height = decoded.height(), "Decoded image");
        builder.add_image_page(decoded)?;
    }

    let namer = OutputNamer::scan(output_dir, base_name)?;
    let output = namer.path_at(&Local::now().naive_local());
    builder.save(&output, base_name)?;

    Ok(output)
}

/// Which decoder reads a given image file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDecoder {
    /// Formats the `image` crate reads; the format is sniffed from the content
    Raster,
    /// HEIC/HEIF photos, read through libheif
    Heif,
}

impl ImageDecoder {
    /// Pick the decoder for `path` by its extension
    pub fn for_path(path: &Path) -> ImageDecoder {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("heic" | "heif") => ImageDecoder::Heif,
            _ => ImageDecoder::Raster,
        }
    }
}

/// Decode one image and flatten it to 8-bit RGB
pub fn decode_image(path: &Path) -> Result<RgbImage> {
    match ImageDecoder::for_path(path) {
        ImageDecoder::Raster => decode_raster(path),
        ImageDecoder::Heif => decode_heif(path),
    }
}

fn decode_raster(path: &Path) -> Result<RgbImage> {
    let image_error = |source: ImageError| Error::Image {
        path: path.to_path_buf(),
        source,
    };

    let decoded = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| image_error(ImageError::IoError(e)))?
        .decode()
        .map_err(image_error)?;
    Ok(decoded.to_rgb8())
}

#[cfg(feature = "heif")]
fn decode_heif(path: &Path) -> Result<RgbImage> {
    use libheif_rs::{ColorSpace, HeifContext, HeifError, LibHeif, RgbChroma};

    let heif_error = |message: String| Error::Heif {
        path: path.to_path_buf(),
        message,
    };
    let from_lib = |e: HeifError| heif_error(e.to_string());

    let bytes = std::fs::read(path)?;
    let context = HeifContext::read_from_bytes(&bytes).map_err(from_lib)?;
    let handle = context.primary_image_handle().map_err(from_lib)?;
    let image = LibHeif::new()
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(from_lib)?;

    let planes = image.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| heif_error("no interleaved RGB plane".to_string()))?;

    // Rows may be padded past width * 3 bytes
    let row_len = plane.width as usize * 3;
    let mut pixels = Vec::with_capacity(row_len * plane.height as usize);
    for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
        let row = row
            .get(..row_len)
            .ok_or_else(|| heif_error("truncated pixel row".to_string()))?;
        pixels.extend_from_slice(row);
    }

    RgbImage::from_raw(plane.width, plane.height, pixels)
        .ok_or_else(|| heif_error("pixel data does not match image size".to_string()))
}

#[cfg(not(feature = "heif"))]
fn decode_heif(path: &Path) -> Result<RgbImage> {
    Err(Error::Heif {
        path: path.to_path_buf(),
        message: "HEIF support is not enabled (build with --features heif)".to_string(),
    })
}
