//! Byte source and byte sink around the pipeline.
//!
//! Input comes from a named file or from standard input read to exhaustion.
//! Output goes to standard output, with one trailing newline, or to a file.
//! File output is written exactly and atomically: the bytes go to a temporary
//! file in the destination directory, which is then renamed over the target,
//! so a failed run never leaves a truncated file behind.

use crate::error::PdfTextError;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Where the document bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file on disk.
    Path(PathBuf),
    /// Standard input, read until EOF.
    Stdin,
}

impl InputSource {
    /// `-` means stdin; anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::Path(PathBuf::from(arg))
        }
    }

    /// Human-readable name used in error messages.
    pub fn name(&self) -> String {
        match self {
            InputSource::Path(p) => format!("'{}'", p.display()),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }

    /// Read every byte from the source. Empty input is returned as-is; the
    /// pipeline rejects it.
    pub fn read_bytes(&self) -> Result<Vec<u8>, PdfTextError> {
        let bytes = match self {
            InputSource::Path(p) => std::fs::read(p),
            InputSource::Stdin => read_all(io::stdin().lock()),
        }
        .map_err(|source| PdfTextError::InputReadFailed {
            source_name: self.name(),
            source,
        })?;

        debug!("Read {} bytes from {}", bytes.len(), self.name());
        Ok(bytes)
    }
}

/// Drain `reader` into a buffer.
pub fn read_all(mut reader: impl Read) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Where the serialized document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Standard output; one `\n` is appended.
    Stdout,
    /// A file; bytes are written exactly.
    File(PathBuf),
}

impl OutputSink {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(OutputSink::Stdout, OutputSink::File)
    }

    /// Hand `output` to the sink.
    pub fn write(&self, output: &str) -> Result<(), PdfTextError> {
        match self {
            OutputSink::Stdout => {
                let stdout = io::stdout();
                write_line(stdout.lock(), output).map_err(|source| {
                    PdfTextError::OutputWriteFailed {
                        path: PathBuf::from("<stdout>"),
                        source,
                    }
                })
            }
            OutputSink::File(path) => write_file_atomic(path, output.as_bytes()),
        }
    }
}

/// Write `output` followed by exactly one newline, then flush.
pub fn write_line(mut writer: impl Write, output: &str) -> io::Result<()> {
    writer.write_all(output.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Write `bytes` to `path` through a temporary file in the same directory.
pub fn write_file_atomic(path: &Path, bytes: &[u8]) -> Result<(), PdfTextError> {
    let write_err = |source: io::Error| PdfTextError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
