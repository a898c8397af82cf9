//! Integration tests for the folder2pdf library

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use folder2pdf::layout::TextLayout;
use folder2pdf::naming::{next_sequence_number, parse_sequence_number};
use folder2pdf::pdf::{count_pages, page_sizes};
use folder2pdf::pipeline::{collect_documents, collect_images, documents_to_pdf, images_to_pdf};
use folder2pdf::Error;
use image::{Rgb, RgbImage};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Test helper: solid-colour image of the given size
fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([200, 100, 50]))
        .save(&path)
        .expect("Failed to write test image");
    path
}

/// Test helper: minimal DOCX with one paragraph per entry
fn write_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).expect("Failed to create docx"));
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .expect("Failed to start zip entry");
    zip.write_all(xml.as_bytes()).expect("Failed to write zip entry");
    zip.finish().expect("Failed to finish docx");
    path
}

fn pdf_files(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read output dir")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".pdf"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_images_become_one_pdf_in_name_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let img = temp_dir.path().join("img");
    fs::create_dir(&img).unwrap();

    // Widths identify the images once they are pages
    write_image(&img, "c.png", 30, 10);
    write_image(&img, "a.PNG", 10, 10);
    write_image(&img, "b.bmp", 20, 10);
    fs::write(img.join("notes.txt"), "not an image").unwrap();

    let images = collect_images(&img).expect("Failed to collect images");
    assert_eq!(images.len(), 3);

    let out = temp_dir.path().join("PDF");
    let output = images_to_pdf(&images, &out, "vacation").expect("Failed to convert images");

    assert_eq!(pdf_files(&out).len(), 1);
    assert_eq!(count_pages(&output).unwrap(), 3);
    let widths: Vec<f32> = page_sizes(&output).unwrap().iter().map(|(w, _)| *w).collect();
    assert_eq!(widths, vec![10.0, 20.0, 30.0]);

    let name = output.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("vacation[1]_"), "unexpected name {}", name);
}

#[test]
fn test_sequence_continues_after_existing_outputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out = temp_dir.path().join("PDF");
    fs::create_dir(&out).unwrap();
    for name in ["x[1]_a.pdf", "x[3]_b.pdf", "x[7]_c.pdf"] {
        fs::write(out.join(name), b"").unwrap();
    }

    assert_eq!(next_sequence_number(&out).unwrap(), 8);

    let img = write_image(temp_dir.path(), "photo.jpg", 5, 5);
    let output = images_to_pdf(&[img], &out, "output").unwrap();
    let name = output.file_name().unwrap().to_str().unwrap();
    assert_eq!(parse_sequence_number(name), Some(8));
}

#[test]
fn test_repeated_runs_never_overwrite() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let doc = temp_dir.path().join("DOC");
    fs::create_dir(&doc).unwrap();
    fs::write(doc.join("a.txt"), "alpha").unwrap();
    fs::write(doc.join("b.txt"), "beta").unwrap();
    let out = temp_dir.path().join("PDF");

    let documents = collect_documents(&doc).unwrap();
    let first = documents_to_pdf(&documents, &out, "notes", &TextLayout::default()).unwrap();
    let second = documents_to_pdf(&documents, &out, "notes", &TextLayout::default()).unwrap();

    let numbers: Vec<u64> = first
        .written
        .iter()
        .chain(second.written.iter())
        .map(|p| parse_sequence_number(p.file_name().unwrap().to_str().unwrap()).unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert_eq!(pdf_files(&out).len(), 4);
}

#[test]
fn test_corrupt_document_is_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let doc = temp_dir.path().join("DOC");
    fs::create_dir(&doc).unwrap();
    fs::write(doc.join("broken.docx"), b"PK\x03\x04 truncated garbage").unwrap();
    write_docx(&doc, "report.docx", &["Quarterly report", "Revenue went up."]);
    let out = temp_dir.path().join("PDF");

    let documents = collect_documents(&doc).unwrap();
    let report = documents_to_pdf(&documents, &out, "document", &TextLayout::default()).unwrap();

    assert_eq!(report.written.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path.file_name().unwrap(), "broken.docx");
    assert!(!report.skipped[0].reason.to_string().is_empty());
    assert_eq!(pdf_files(&out).len(), 1);
}

#[test]
fn test_lock_and_hidden_files_are_never_selected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let doc = temp_dir.path().join("DOC");
    fs::create_dir(&doc).unwrap();
    fs::write(doc.join(".DS_Store"), b"\x00\x01").unwrap();
    fs::write(doc.join("~$lock.docx"), b"owner").unwrap();
    fs::write(doc.join("notes.md"), "# Notes").unwrap();

    let documents = collect_documents(&doc).unwrap();
    let names: Vec<_> = documents.iter().map(|p| p.file_name().unwrap()).collect();
    assert_eq!(names, vec!["notes.md"]);
}

#[test]
fn test_only_lock_files_means_nothing_to_do() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("~$lock.docx"), b"owner").unwrap();

    let result = collect_documents(temp_dir.path());
    assert!(matches!(result, Err(Error::NoEligibleFiles { .. })));
}

#[test]
fn test_missing_folders_produce_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out = temp_dir.path().join("PDF");

    let images = collect_images(&temp_dir.path().join("img"));
    match images {
        Err(e @ Error::FolderNotFound(_)) => assert!(e.to_string().contains("not found")),
        other => panic!("Expected FolderNotFound, got {:?}", other),
    }

    let documents = collect_documents(&temp_dir.path().join("DOC"));
    assert!(matches!(documents, Err(Error::FolderNotFound(_))));

    assert!(pdf_files(&out).is_empty());
    assert!(!out.exists());
}

#[test]
fn test_every_document_format_converts() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let doc = temp_dir.path().join("DOC");
    fs::create_dir(&doc).unwrap();

    write_docx(&doc, "a.docx", &["Word paragraph"]);
    fs::write(doc.join("b.txt"), "Plain text").unwrap();
    fs::write(doc.join("c.md"), "# Title\n\n- item").unwrap();
    fs::write(doc.join("d.rtf"), r"{\rtf1\ansi Rich text\par}").unwrap();

    let odt = doc.join("e.odt");
    let mut zip = ZipWriter::new(File::create(&odt).unwrap());
    zip.start_file("content.xml", SimpleFileOptions::default()).unwrap();
    zip.write_all(
        br#"<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:text><text:p>Open document</text:p></office:text></office:body></office:document-content>"#,
    )
    .unwrap();
    zip.finish().unwrap();

    let out = temp_dir.path().join("PDF");
    let documents = collect_documents(&doc).unwrap();
    assert_eq!(documents.len(), 5);

    let report = documents_to_pdf(&documents, &out, "all", &TextLayout::default()).unwrap();
    assert!(report.skipped.is_empty(), "skipped: {:?}", report.skipped);
    assert_eq!(report.written.len(), 5);
    for pdf in &report.written {
        assert_eq!(count_pages(pdf).unwrap(), 1);
    }
}
