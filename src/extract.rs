//! Extraction pipeline: load → assemble → serialize.
//!
//! ```text
//! bytes ──▶ DocumentHandle::open ──▶ assemble_document ──▶ output::render
//!  (Init)       (Loaded)                 (Assembled)          (Serialized)
//!   │
//!   └── load error ──▶ Err(PdfTextError)                       (Failed)
//! ```
//!
//! Everything here is synchronous and strictly sequential: exactly one
//! page and one text page are open at any moment. Per-page problems never
//! abort the document. The page is kept with empty text so that
//! `document.pages.len()` always equals the engine's page count.

use crate::config::ExtractionConfig;
use crate::encoding::utf16_to_utf8;
use crate::engine::{DocumentEngine, DocumentHandle};
use crate::error::{PageError, PdfTextError};
use crate::output::{self, Document, Page};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Extract the text of page `index` (0-based).
///
/// Returns [`PageError`] when the page or its text layer is unavailable.
/// The page and text-page handles are released before this returns, on every
/// path.
pub fn extract_page_text<E: DocumentEngine + ?Sized>(
    document: &DocumentHandle<'_, '_, E>,
    index: usize,
    config: &ExtractionConfig,
) -> Result<String, PageError> {
    let page = document
        .page(index)
        .ok_or(PageError::LoadFailed { page: index })?;
    let text_page = page
        .text()
        .ok_or(PageError::TextUnavailable { page: index })?;

    let units = text_page.all_units();
    let text = utf16_to_utf8(&units, config.nul_handling);
    debug!(
        "Page {}: {} code units → {} bytes",
        page.index() + 1,
        units.len(),
        text.len()
    );
    Ok(text)
}

/// Walk every page of an open document in order and collect its text.
///
/// Never fails: unreadable pages become empty [`Page`]s.
pub fn assemble_document<E: DocumentEngine + ?Sized>(
    document: &DocumentHandle<'_, '_, E>,
    config: &ExtractionConfig,
) -> Document {
    let total_pages = document.page_count();
    info!("PDF has {} pages", total_pages);

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_start(total_pages);
    }

    let mut assembled = Document::pdf();
    assembled.pages.reserve(total_pages);
    let mut extracted = 0usize;

    for index in 0..total_pages {
        let page_num = index + 1;
        let text = match extract_page_text(document, index, config) {
            Ok(text) => {
                extracted += 1;
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_complete(page_num, total_pages, text.len());
                }
                text
            }
            Err(e) => {
                warn!("{}; keeping an empty page", e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_empty(page_num, total_pages, e.reason());
                }
                String::new()
            }
        };
        assembled.pages.push(Page { text });
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_complete(total_pages, extracted);
    }

    assembled
}

/// Load `bytes` and assemble the full [`Document`].
///
/// # Errors
/// - [`PdfTextError::EmptyInput`] when `bytes` is empty. The engine is not
///   touched in that case.
/// - [`PdfTextError::LoadFailed`], [`PdfTextError::PasswordRequired`] or
///   [`PdfTextError::WrongPassword`] when the engine refuses the document.
pub fn extract_from_bytes<E: DocumentEngine + ?Sized>(
    engine: &E,
    bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<Document, PdfTextError> {
    if bytes.is_empty() {
        return Err(PdfTextError::EmptyInput);
    }

    let start = Instant::now();
    let handle = DocumentHandle::open(engine, bytes, config.effective_password())?;
    let document = assemble_document(&handle, config);
    drop(handle);

    info!(
        "Extracted {} pages in {}ms",
        document.pages.len(),
        start.elapsed().as_millis()
    );
    Ok(document)
}

/// Extract `bytes` and serialize the result in `config.format`.
///
/// No output is produced when loading fails.
pub fn run<E: DocumentEngine + ?Sized>(
    engine: &E,
    bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<String, PdfTextError> {
    let document = extract_from_bytes(engine, bytes, config)?;
    let serialized = output::render(&document, config.format);
    debug!(
        "Serialized {:?} output: {} bytes",
        config.format,
        serialized.len()
    );
    Ok(serialized)
}
