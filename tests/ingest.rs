//! Integration tests for format dispatch across every quote source type.
//!
//! PDF cases need libpdfium; they print SKIP and return when it cannot be
//! bound (set `PDFIUM_LIB_PATH` to run them).

use memegen::ingest::pdf::bind_pdfium;
use memegen::{load_quotes, parse, MemeConfig, MemeError, QuoteModel, SourceFormat};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

// ── Fixtures ─────────────────────────────────────────────────────────────────

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );

    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

/// A one-page PDF drawing `lines` with the built-in Helvetica font.
fn write_pdf(path: &Path, lines: &[&str]) {
    let mut content = String::from("BT /F1 14 Tf 72 720 Td 18 TL\n");
    for line in lines {
        content.push_str(&format!("({line}) Tj T*\n"));
    }
    content.push_str("ET");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len() + 1,
            content
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, obj) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, obj));
    }
    let xref_at = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for off in offsets {
        pdf.push_str(&format!("{off:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_at
    ));
    std::fs::write(path, pdf).unwrap();
}

fn pdfium_available() -> bool {
    match bind_pdfium() {
        Ok(_) => true,
        Err(e) => {
            println!("SKIP: pdfium not available: {e}");
            false
        }
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

#[test]
fn every_format_yields_the_same_quotes() {
    let dir = tempfile::tempdir().unwrap();

    let txt = dir.path().join("quotes.txt");
    std::fs::write(&txt, "Chase the mailman - Skittle\nWhen in doubt, nap - Fluffles\n").unwrap();

    let csv = dir.path().join("quotes.csv");
    std::fs::write(
        &csv,
        "body,author\nChase the mailman,Skittle\nWhen in doubt nap,Fluffles\n",
    )
    .unwrap();

    let docx = dir.path().join("quotes.docx");
    write_docx(&docx, &["Chase the mailman - Skittle", "When in doubt, nap - Fluffles"]);

    let expected = vec![
        QuoteModel::new("Chase the mailman", "Skittle"),
        QuoteModel::new("When in doubt nap", "Fluffles"),
    ];
    for path in [&txt, &csv, &docx] {
        assert_eq!(parse(path).unwrap(), expected, "{}", path.display());
    }
}

#[test]
fn extension_match_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("LOUD.TXT");
    std::fs::write(&txt, "Woof - Rex\n").unwrap();

    assert_eq!(SourceFormat::from_path(&txt).unwrap(), SourceFormat::Txt);
    assert_eq!(parse(&txt).unwrap(), vec![QuoteModel::new("Woof", "Rex")]);
}

#[test]
fn unknown_extension_is_rejected_before_io() {
    let err = parse("/nonexistent/quotes.rtf").unwrap_err();
    match err {
        MemeError::UnsupportedFormat { extension, .. } => assert_eq!(extension, "rtf"),
        other => panic!("expected UnsupportedFormat, got {other}"),
    }
}

#[test]
fn missing_supported_file_is_file_not_found() {
    let err = parse(PathBuf::from("/nonexistent/quotes.csv")).unwrap_err();
    assert!(matches!(err, MemeError::FileNotFound { .. }), "got: {err}");
}

#[test]
fn docx_with_wrong_container_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let fake = dir.path().join("fake.docx");
    std::fs::write(&fake, "Bark - Rex\n").unwrap();

    let err = parse(&fake).unwrap_err();
    assert!(matches!(err, MemeError::MalformedDocx { .. }), "got: {err}");
}

// ── PDF ──────────────────────────────────────────────────────────────────────

#[test]
fn pdf_quotes_are_read_line_by_line() {
    if !pdfium_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("quotes.pdf");
    write_pdf(&pdf, &["Bark like nobody is listening - Rex", "Sit - Spot"]);

    let quotes = parse(&pdf).unwrap();
    assert_eq!(
        quotes,
        vec![
            QuoteModel::new("Bark like nobody is listening", "Rex"),
            QuoteModel::new("Sit", "Spot"),
        ]
    );
}

#[test]
fn pdf_without_header_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("fake.pdf");
    std::fs::write(&pdf, "this is not a pdf at all").unwrap();

    let err = parse(&pdf).unwrap_err();
    assert!(matches!(err, MemeError::CorruptPdf { .. }), "got: {err}");
}

// ── Bundled data ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn bundled_dog_quotes_load() {
    let config = MemeConfig::default();
    let library = load_quotes(&config.quote_sources).await.unwrap();

    assert!(library
        .quotes
        .contains(&QuoteModel::new("When in doubt go shoe shopping", "Mr Paws")));
    assert!(library.quotes.contains(&QuoteModel::new("RAWRGWAWGGR", "Chewbacca")));
    assert!(library.quotes.contains(&QuoteModel::new("To bork or not to bork", "Bork")));

    if pdfium_available() {
        assert!(library.failures.is_empty(), "{:?}", library.failures);
        assert_eq!(library.len(), 13);
    } else {
        assert_eq!(library.failures.len(), 1);
        assert_eq!(library.len(), 9);
    }
}
