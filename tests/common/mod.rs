//! Scripted in-memory document engine shared by the integration tests.
//!
//! Every primitive call is appended to an event log so tests can assert on
//! handle discipline (each handle closed exactly once, never more than one
//! page open) and on what the pipeline asked the engine for.

#![allow(dead_code)]

use pdftext::{DocumentEngine, PdfTextError};
use std::cell::RefCell;

/// What the engine does when asked for a page.
#[derive(Debug, Clone)]
pub enum ScriptedPage {
    /// Page loads and its text layer yields these code units.
    Units(Vec<u16>),
    /// `load_page` returns no page.
    Missing,
    /// The page loads but `open_text` returns nothing.
    NoTextLayer,
}

impl ScriptedPage {
    pub fn text(s: &str) -> Self {
        ScriptedPage::Units(s.encode_utf16().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LoadDocument { password: Option<String>, opened: bool },
    PageCount,
    LoadPage(usize),
    OpenText(usize),
    CharCount(usize),
    GetChars { page: usize, start: usize, count: usize },
    CloseText(usize),
    ClosePage(usize),
    CloseDocument,
}

pub struct ScriptedEngine {
    pages: Vec<ScriptedPage>,
    password: Option<String>,
    events: RefCell<Vec<Event>>,
}

impl ScriptedEngine {
    pub fn new(pages: Vec<ScriptedPage>) -> Self {
        Self {
            pages,
            password: None,
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn with_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| ScriptedPage::text(t)).collect())
    }

    /// Require `password` to open the document.
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn log(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    /// Assert every acquired handle was released exactly once, text pages
    /// before their page, and no two pages were open at the same time.
    pub fn assert_balanced(&self) {
        let mut open_doc = 0i32;
        let mut open_page: Option<usize> = None;
        let mut open_text: Option<usize> = None;

        for event in self.events() {
            match event {
                Event::LoadDocument { opened, .. } => open_doc += i32::from(opened),
                Event::CloseDocument => {
                    assert!(open_page.is_none(), "document closed with a page open");
                    open_doc -= 1;
                }
                Event::LoadPage(i) => {
                    if self.page_loads(i) {
                        assert!(open_page.is_none(), "page {i} opened while another is open");
                        open_page = Some(i);
                    }
                }
                Event::OpenText(i) => {
                    assert_eq!(open_page, Some(i), "text opened without its page");
                    if self.text_opens(i) {
                        open_text = Some(i);
                    }
                }
                Event::CloseText(i) => {
                    assert_eq!(open_text, Some(i), "closing a text page that is not open");
                    open_text = None;
                }
                Event::ClosePage(i) => {
                    assert!(open_text.is_none(), "page {i} closed before its text page");
                    assert_eq!(open_page, Some(i), "closing a page that is not open");
                    open_page = None;
                }
                Event::PageCount | Event::CharCount(_) | Event::GetChars { .. } => {}
            }
        }

        assert!(open_page.is_none(), "a page was never closed");
        assert!(open_text.is_none(), "a text page was never closed");
        assert_eq!(open_doc, 0, "document opened and closed a different number of times");
    }

    fn page_loads(&self, index: usize) -> bool {
        !matches!(self.pages.get(index), None | Some(ScriptedPage::Missing))
    }

    fn text_opens(&self, index: usize) -> bool {
        matches!(self.pages.get(index), Some(ScriptedPage::Units(_)))
    }
}

impl DocumentEngine for ScriptedEngine {
    type Document = ();
    type Page = usize;
    type TextPage = usize;

    fn load_document(&self, bytes: &[u8], password: Option<&str>) -> Result<(), PdfTextError> {
        let result = if !bytes.starts_with(b"%PDF") {
            Err(PdfTextError::LoadFailed {
                detail: "not in PDF format or corrupted".into(),
            })
        } else {
            match (&self.password, password) {
                (None, _) => Ok(()),
                (Some(expected), Some(given)) if expected == given => Ok(()),
                (Some(_), Some(_)) => Err(PdfTextError::WrongPassword),
                (Some(_), None) => Err(PdfTextError::PasswordRequired),
            }
        };

        self.log(Event::LoadDocument {
            password: password.map(str::to_string),
            opened: result.is_ok(),
        });
        result
    }

    fn page_count(&self, _document: ()) -> usize {
        self.log(Event::PageCount);
        self.pages.len()
    }

    fn load_page(&self, _document: (), index: usize) -> Option<usize> {
        self.log(Event::LoadPage(index));
        self.page_loads(index).then_some(index)
    }

    fn open_text(&self, page: usize) -> Option<usize> {
        self.log(Event::OpenText(page));
        self.text_opens(page).then_some(page)
    }

    fn char_count(&self, text: usize) -> usize {
        self.log(Event::CharCount(text));
        match &self.pages[text] {
            ScriptedPage::Units(u) => u.len(),
            _ => 0,
        }
    }

    fn get_chars(&self, text: usize, start: usize, count: usize) -> Vec<u16> {
        self.log(Event::GetChars {
            page: text,
            start,
            count,
        });
        match &self.pages[text] {
            ScriptedPage::Units(u) => u[start..start + count].to_vec(),
            _ => Vec::new(),
        }
    }

    fn close_text(&self, text: usize) {
        self.log(Event::CloseText(text));
    }

    fn close_page(&self, page: usize) {
        self.log(Event::ClosePage(page));
    }

    fn close_document(&self, _document: ()) {
        self.log(Event::CloseDocument);
    }
}
