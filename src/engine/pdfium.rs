//! [`DocumentEngine`] over PDFium's raw text API.
//!
//! `pdfium-render`'s high-level `PdfPageText::all()` hands back an already
//! decoded `String`. This crate wants the code units themselves so that the
//! NUL and surrogate rules in [`crate::encoding`] apply, so the engine talks
//! to [`PdfiumLibraryBindings`] directly and keeps the `FPDF_*` handles in
//! the guards from [`super`].
//!
//! The [`Pdfium`] value owns library initialisation: `FPDF_InitLibrary` runs
//! when it is constructed and `FPDF_DestroyLibrary` when it drops, so one
//! `PdfiumEngine` per process brackets every document operation.

use super::DocumentEngine;
use crate::error::PdfTextError;
use pdfium_render::prelude::{
    Pdfium, PdfiumLibraryBindings, FPDF_DOCUMENT, FPDF_PAGE, FPDF_TEXTPAGE,
};
use std::os::raw::{c_int, c_ulong};
use std::path::Path;
use tracing::{debug, warn};

// PDFium error codes (fpdfview.h, FPDF_GetLastError).
const FPDF_ERR_SUCCESS: c_ulong = 0;
const FPDF_ERR_UNKNOWN: c_ulong = 1;
const FPDF_ERR_FILE: c_ulong = 2;
const FPDF_ERR_FORMAT: c_ulong = 3;
const FPDF_ERR_PASSWORD: c_ulong = 4;
const FPDF_ERR_SECURITY: c_ulong = 5;
const FPDF_ERR_PAGE: c_ulong = 6;

/// PDFium-backed document engine.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Wrap an already bound [`Pdfium`].
    pub fn new(pdfium: Pdfium) -> Self {
        Self { pdfium }
    }

    /// Locate and bind the PDFium library (see [`super::bind::bind_pdfium`]).
    pub fn bind(library_path: Option<&Path>) -> Result<Self, PdfTextError> {
        super::bind::bind_pdfium(library_path).map(Self::new)
    }

    fn bindings(&self) -> &dyn PdfiumLibraryBindings {
        self.pdfium.bindings()
    }
}

impl DocumentEngine for PdfiumEngine {
    type Document = FPDF_DOCUMENT;
    type Page = FPDF_PAGE;
    type TextPage = FPDF_TEXTPAGE;

    fn load_document(
        &self,
        bytes: &[u8],
        password: Option<&str>,
    ) -> Result<FPDF_DOCUMENT, PdfTextError> {
        let bindings = self.bindings();
        let document = bindings.FPDF_LoadMemDocument64(bytes, password);

        if document.is_null() {
            let code = bindings.FPDF_GetLastError();
            let err = classify_load_error(code, password.is_some());
            warn!("PDFium refused document (error code {}): {}", code, err);
            return Err(err);
        }

        debug!("PDFium loaded {} bytes", bytes.len());
        Ok(document)
    }

    fn page_count(&self, document: FPDF_DOCUMENT) -> usize {
        usize::try_from(self.bindings().FPDF_GetPageCount(document)).unwrap_or(0)
    }

    fn load_page(&self, document: FPDF_DOCUMENT, index: usize) -> Option<FPDF_PAGE> {
        let index = c_int::try_from(index).ok()?;
        let page = self.bindings().FPDF_LoadPage(document, index);
        (!page.is_null()).then_some(page)
    }

    fn open_text(&self, page: FPDF_PAGE) -> Option<FPDF_TEXTPAGE> {
        let text = self.bindings().FPDFText_LoadPage(page);
        (!text.is_null()).then_some(text)
    }

    fn char_count(&self, text: FPDF_TEXTPAGE) -> usize {
        // -1 on error.
        usize::try_from(self.bindings().FPDFText_CountChars(text)).unwrap_or(0)
    }

    fn get_chars(&self, text: FPDF_TEXTPAGE, start: usize, count: usize) -> Vec<u16> {
        let (Ok(start_index), Ok(n)) = (c_int::try_from(start), c_int::try_from(count)) else {
            return Vec::new();
        };

        // PDFium writes `count` units plus a terminating zero.
        let mut buffer = vec![0u16; count + 1];
        let written = self
            .bindings()
            .FPDFText_GetText(text, start_index, n, buffer.as_mut_ptr());

        // `written` includes the terminator; never trust it past our buffer.
        let len = usize::try_from(written)
            .unwrap_or(0)
            .saturating_sub(1)
            .min(count);
        buffer.truncate(len);
        buffer
    }

    fn close_text(&self, text: FPDF_TEXTPAGE) {
        self.bindings().FPDFText_ClosePage(text);
    }

    fn close_page(&self, page: FPDF_PAGE) {
        self.bindings().FPDF_ClosePage(page);
    }

    fn close_document(&self, document: FPDF_DOCUMENT) {
        self.bindings().FPDF_CloseDocument(document);
    }
}

/// Map an `FPDF_GetLastError` code to a fatal error.
fn classify_load_error(code: c_ulong, password_supplied: bool) -> PdfTextError {
    let detail = match code {
        FPDF_ERR_PASSWORD if password_supplied => return PdfTextError::WrongPassword,
        FPDF_ERR_PASSWORD => return PdfTextError::PasswordRequired,
        FPDF_ERR_FILE => "file could not be read",
        FPDF_ERR_FORMAT => "not in PDF format or corrupted",
        FPDF_ERR_SECURITY => "unsupported security scheme",
        FPDF_ERR_PAGE => "page not found or content error",
        FPDF_ERR_SUCCESS | FPDF_ERR_UNKNOWN => "unknown error",
        _ => "unrecognised PDFium error",
    };
    PdfTextError::LoadFailed {
        detail: detail.to_string(),
    }
}
