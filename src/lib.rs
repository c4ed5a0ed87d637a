//! # pdftext
//!
//! Extract plain text from PDF documents and emit it as raw text or compact
//! JSON, using [PDFium](https://pdfium.googlesource.com/pdfium/) through
//! `pdfium-render`.
//!
//! ## Pipeline Overview
//!
//! ```text
//! bytes
//!  │
//!  ├─ 1. Load      open the buffer with PDFium (optional password)
//!  ├─ 2. Extract   per page: load page → open text layer → read UTF-16 units
//!  ├─ 3. Convert   UTF-16 → UTF-8 (stops at the first NUL unit by default)
//!  ├─ 4. Assemble  Document { type: "pdf", pages: [...] } in page order
//!  └─ 5. Render    raw concatenation or {"type":"pdf","pages":[...]}
//! ```
//!
//! A page that cannot be loaded becomes an empty string in the output; it is
//! never dropped, so `pages.len()` always equals the document's page count.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdftext::{run, ExtractionConfig, PdfiumEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = PdfiumEngine::bind(None)?;
//!     let bytes = std::fs::read("document.pdf")?;
//!     let json = run(&engine, &bytes, &ExtractionConfig::default())?;
//!     println!("{json}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdftext` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod extract;
pub mod io;
pub mod output;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, NulHandling};
pub use encoding::utf16_to_utf8;
pub use engine::{DocumentEngine, DocumentHandle, PageHandle, PdfiumEngine, TextPageHandle};
pub use error::{PageError, PdfTextError};
pub use extract::{assemble_document, extract_from_bytes, extract_page_text, run};
pub use io::{InputSource, OutputSink};
pub use output::{render, Document, OutputFormat, Page, PDF_DOCUMENT_TYPE};
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
