//! Integration tests against a real PDFium library.
//!
//! Gated behind `PDFTEXT_PDFIUM_TESTS` so they do not run in CI unless
//! explicitly requested. The library is located the same way the CLI does
//! (`PDFIUM_LIB_PATH`, next to the binary, current directory, system path).
//!
//! Run with:
//!   PDFTEXT_PDFIUM_TESTS=1 PDFIUM_LIB_PATH=/path/to/libpdfium.so cargo test --test pdfium -- --nocapture

use pdftext::{extract_from_bytes, run, ExtractionConfig, PdfTextError, PdfiumEngine};

/// Skip unless enabled, otherwise bind PDFium (skipping if it is missing).
macro_rules! engine_or_skip {
    () => {{
        if std::env::var("PDFTEXT_PDFIUM_TESTS").is_err() {
            println!("SKIP — set PDFTEXT_PDFIUM_TESTS=1 to run PDFium tests");
            return;
        }
        match PdfiumEngine::bind(None) {
            Ok(engine) => engine,
            Err(e) => {
                println!("SKIP — PDFium unavailable: {e}");
                return;
            }
        }
    }};
}

/// Build a small, valid PDF with one line of Helvetica text per page.
fn minimal_pdf(pages: &[&str]) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + i * 2).collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, text) in pages.iter().enumerate() {
        let content_id = page_ids[i] + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
        ));
        let stream = format!("BT /F1 24 Tf 72 700 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (n, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", n + 1).as_bytes());
    }

    let xref_at = out.len();
    let xref_header = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    out.extend_from_slice(xref_header.as_bytes());
    for off in offsets {
        out.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

// pdfium-render binds the library once per process, so every check shares
// one engine inside a single test.
#[test]
fn pdfium_end_to_end() {
    let engine = engine_or_skip!();

    extracts_text_per_page(&engine);
    json_output_shape(&engine);
    garbage_fails_to_load(&engine);
    empty_input_is_usage_error(&engine);
    engine_survives_many_documents(&engine);
}

fn extracts_text_per_page(engine: &PdfiumEngine) {
    let pdf = minimal_pdf(&["Hello", "World"]);

    let doc = extract_from_bytes(engine, &pdf, &ExtractionConfig::default()).unwrap();
    assert_eq!(doc.kind, "pdf");
    assert_eq!(doc.pages.len(), 2);
    assert_eq!(doc.pages[0].text.trim(), "Hello");
    assert_eq!(doc.pages[1].text.trim(), "World");
}

fn json_output_shape(engine: &PdfiumEngine) {
    let pdf = minimal_pdf(&["alpha", "beta", "gamma"]);

    let out = run(engine, &pdf, &ExtractionConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["type"], "pdf");
    assert_eq!(value["pages"].as_array().unwrap().len(), 3);
}

fn garbage_fails_to_load(engine: &PdfiumEngine) {
    let err = run(engine, b"definitely not a pdf", &ExtractionConfig::default()).unwrap_err();
    assert!(err.is_load_failure(), "got: {err:?}");
}

fn empty_input_is_usage_error(engine: &PdfiumEngine) {
    let err = run(engine, b"", &ExtractionConfig::default()).unwrap_err();
    assert!(matches!(err, PdfTextError::EmptyInput));
}

fn engine_survives_many_documents(engine: &PdfiumEngine) {
    let pdf = minimal_pdf(&["again"]);
    let config = ExtractionConfig::builder().raw(true).build().unwrap();
    for _ in 0..20 {
        assert_eq!(run(engine, &pdf, &config).unwrap().trim(), "again");
    }
}
