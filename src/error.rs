//! Error types for the pdftext library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PdfTextError`] — **Fatal**: extraction cannot proceed at all (no
//!   input bytes, the engine refused the document, wrong password, the
//!   output could not be written). Returned as `Err(PdfTextError)` from
//!   [`crate::extract::extract_from_bytes`] and [`crate::extract::run`].
//!
//! * [`PageError`] — **Non-fatal**: a single page could not be loaded or
//!   text-extracted. The assembler absorbs it: the page is kept as an empty
//!   [`crate::output::Page`], the error is logged and forwarded to
//!   [`crate::progress::ExtractionProgressCallback::on_page_empty`], and
//!   extraction continues with the next page.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdftext library.
#[derive(Debug, Error)]
pub enum PdfTextError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// No input bytes were supplied by any source.
    #[error("No input: supply a document with -i <PATH> or pipe one with -i -")]
    EmptyInput,

    /// Reading the input source failed.
    #[error("Failed to read input from {source_name}: {source}")]
    InputReadFailed {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    // ── Document errors ───────────────────────────────────────────────────
    /// The engine could not open the bytes as a document.
    #[error("Failed to load PDF: {detail}")]
    LoadFailed { detail: String },

    /// The document is encrypted and no password was supplied.
    #[error("PDF is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired,

    /// A password was supplied but the engine rejected it.
    #[error("Wrong password for PDF")]
    WrongPassword,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH (or pass --pdfium-lib) to the path of libpdfium,\n\
or place the platform library next to the executable.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),
}

impl PdfTextError {
    /// `true` for every variant that means the document itself failed to load.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            PdfTextError::LoadFailed { .. }
                | PdfTextError::PasswordRequired
                | PdfTextError::WrongPassword
        )
    }
}

/// A non-fatal error for a single page.
///
/// `page` is the 0-based page index; messages show it 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The engine returned no page handle.
    #[error("Page {}: engine could not load the page", .page + 1)]
    LoadFailed { page: usize },

    /// The page loaded but the engine returned no text-page handle.
    #[error("Page {}: text layer unavailable", .page + 1)]
    TextUnavailable { page: usize },
}

impl PageError {
    /// What went wrong, without the page number.
    pub fn reason(&self) -> &'static str {
        match self {
            PageError::LoadFailed { .. } => "engine could not load the page",
            PageError::TextUnavailable { .. } => "text layer unavailable",
        }
    }
}
