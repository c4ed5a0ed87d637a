//! Locating and binding the PDFium shared library.
//!
//! Resolution order (first match wins):
//!
//! 1. An explicit path (the CLI's `--pdfium-lib`).
//! 2. `PDFIUM_LIB_PATH`.
//! 3. The platform library name next to the running executable.
//! 4. The platform library name in the current directory.
//! 5. The system library search path.

use crate::error::PdfTextError;
use pdfium_render::prelude::Pdfium;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an existing PDFium library.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to PDFium, trying each location in turn.
///
/// An explicit or environment-supplied path is authoritative: if it fails to
/// bind, the error is returned rather than falling through to the search.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, PdfTextError> {
    if let Some(path) = explicit {
        return bind_from_path(path);
    }

    if let Some(path) = env_library_path() {
        return bind_from_path(&path);
    }

    let mut attempts = Vec::new();
    for dir in search_dirs() {
        let candidate = Pdfium::pdfium_platform_library_name_at_path(&dir);
        if !candidate.exists() {
            continue;
        }
        match bind_from_path(&candidate) {
            Ok(pdfium) => return Ok(pdfium),
            Err(e) => attempts.push(e.to_string()),
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            debug!("Bound PDFium from the system library path");
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            attempts.push(format!("system library: {e:?}"));
            Err(PdfTextError::PdfiumBindingFailed(attempts.join("; ")))
        }
    }
}

/// Bind to the library at `path` without searching.
pub fn bind_from_path(path: &Path) -> Result<Pdfium, PdfTextError> {
    Pdfium::bind_to_library(path)
        .map(|bindings| {
            debug!("Bound PDFium from {}", path.display());
            Pdfium::new(bindings)
        })
        .map_err(|e| PdfTextError::PdfiumBindingFailed(format!("'{}': {e:?}", path.display())))
}

fn env_library_path() -> Option<PathBuf> {
    std::env::var_os(PDFIUM_LIB_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Directories checked for the platform library name, in order.
fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::with_capacity(2);
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    dirs.push(PathBuf::from("./"));
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_dirs_end_with_current_dir() {
        let dirs = search_dirs();
        assert!(!dirs.is_empty());
        assert_eq!(dirs.last().unwrap(), &PathBuf::from("./"));
    }

    #[test]
    fn explicit_missing_library_is_binding_error() {
        let err = bind_pdfium(Some(Path::new("/definitely/not/libpdfium.so"))).unwrap_err();
        match err {
            PdfTextError::PdfiumBindingFailed(msg) => {
                assert!(msg.contains("/definitely/not/libpdfium.so"), "got: {msg}")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
