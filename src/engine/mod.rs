//! The document engine seam and scoped handles over it.
//!
//! [`DocumentEngine`] mirrors the engine's C-style primitives one-to-one:
//! open a document, count pages, load a page, open its text layer, read code
//! units, and close each of those again. Callers never call the `close_*`
//! methods themselves. Every acquired handle is wrapped in a guard
//! ([`DocumentHandle`], [`PageHandle`], [`TextPageHandle`]) that releases it
//! exactly once when dropped, whichever path the caller takes out of scope.
//!
//! Guards borrow their parent, so a page cannot outlive its document and a
//! text page cannot outlive its page:
//!
//! ```text
//! DocumentHandle ──borrows──▶ PageHandle ──borrows──▶ TextPageHandle
//! ```

pub mod bind;
pub mod pdfium;

pub use self::pdfium::PdfiumEngine;

use crate::error::PdfTextError;
use std::marker::PhantomData;
use tracing::trace;

/// Primitive operations of a document engine.
///
/// Handle types are opaque `Copy` tokens (raw pointers for PDFium, plain ids
/// for test engines). Ownership is enforced by the guard types, not by the
/// tokens.
pub trait DocumentEngine {
    type Document: Copy;
    type Page: Copy;
    type TextPage: Copy;

    /// Open a document from memory. `bytes` must stay alive until
    /// [`close_document`](Self::close_document).
    fn load_document(
        &self,
        bytes: &[u8],
        password: Option<&str>,
    ) -> Result<Self::Document, PdfTextError>;

    fn page_count(&self, document: Self::Document) -> usize;

    /// `None` when the engine cannot load page `index`.
    fn load_page(&self, document: Self::Document, index: usize) -> Option<Self::Page>;

    /// `None` when the page has no usable text layer.
    fn open_text(&self, page: Self::Page) -> Option<Self::TextPage>;

    fn char_count(&self, text: Self::TextPage) -> usize;

    /// Code units for characters `[start, start + count)`.
    fn get_chars(&self, text: Self::TextPage, start: usize, count: usize) -> Vec<u16>;

    fn close_text(&self, text: Self::TextPage);

    fn close_page(&self, page: Self::Page);

    fn close_document(&self, document: Self::Document);
}

/// An open document. Closed on drop.
///
/// `'b` ties the handle to the input buffer the engine reads from.
pub struct DocumentHandle<'e, 'b, E: DocumentEngine + ?Sized> {
    engine: &'e E,
    raw: E::Document,
    _bytes: PhantomData<&'b [u8]>,
}

impl<'e, 'b, E: DocumentEngine + ?Sized> DocumentHandle<'e, 'b, E> {
    /// Load `bytes` through `engine`.
    pub fn open(
        engine: &'e E,
        bytes: &'b [u8],
        password: Option<&str>,
    ) -> Result<Self, PdfTextError> {
        let raw = engine.load_document(bytes, password)?;
        trace!("document opened");
        Ok(Self {
            engine,
            raw,
            _bytes: PhantomData,
        })
    }

    pub fn page_count(&self) -> usize {
        self.engine.page_count(self.raw)
    }

    /// Load page `index` (0-based). `None` when the engine refuses.
    pub fn page(&self, index: usize) -> Option<PageHandle<'_, E>> {
        let raw = self.engine.load_page(self.raw, index)?;
        Some(PageHandle {
            engine: self.engine,
            raw,
            index,
        })
    }
}

impl<E: DocumentEngine + ?Sized> Drop for DocumentHandle<'_, '_, E> {
    fn drop(&mut self) {
        self.engine.close_document(self.raw);
        trace!("document closed");
    }
}

/// A loaded page. Closed on drop.
pub struct PageHandle<'d, E: DocumentEngine + ?Sized> {
    engine: &'d E,
    raw: E::Page,
    index: usize,
}

impl<'d, E: DocumentEngine + ?Sized> PageHandle<'d, E> {
    /// 0-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Open the page's text layer. `None` when the engine refuses.
    pub fn text(&self) -> Option<TextPageHandle<'_, E>> {
        let raw = self.engine.open_text(self.raw)?;
        Some(TextPageHandle {
            engine: self.engine,
            raw,
        })
    }
}

impl<E: DocumentEngine + ?Sized> Drop for PageHandle<'_, E> {
    fn drop(&mut self) {
        self.engine.close_page(self.raw);
    }
}

/// An open text layer. Closed on drop.
pub struct TextPageHandle<'p, E: DocumentEngine + ?Sized> {
    engine: &'p E,
    raw: E::TextPage,
}

impl<E: DocumentEngine + ?Sized> TextPageHandle<'_, E> {
    pub fn char_count(&self) -> usize {
        self.engine.char_count(self.raw)
    }

    pub fn chars(&self, start: usize, count: usize) -> Vec<u16> {
        self.engine.get_chars(self.raw, start, count)
    }

    /// Every code unit on the page: `[0, char_count)`.
    pub fn all_units(&self) -> Vec<u16> {
        match self.char_count() {
            0 => Vec::new(),
            n => self.chars(0, n),
        }
    }
}

impl<E: DocumentEngine + ?Sized> Drop for TextPageHandle<'_, E> {
    fn drop(&mut self) {
        self.engine.close_text(self.raw);
    }
}
