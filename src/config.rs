//! Configuration types for text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`].

use crate::error::PdfTextError;
use crate::output::OutputFormat;
use crate::progress::ProgressCallback;
use std::fmt;

/// Configuration for a single extraction run.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdftext::{ExtractionConfig, OutputFormat};
///
/// let config = ExtractionConfig::builder()
///     .format(OutputFormat::Raw)
///     .password("secret")
///     .build()
///     .unwrap();
/// assert_eq!(config.password.as_deref(), Some("secret"));
/// ```
#[derive(Clone, Default)]
pub struct ExtractionConfig {
    /// Serialization of the assembled document. Default: [`OutputFormat::Json`].
    pub format: OutputFormat,

    /// Document password. `None` opens the document without one.
    ///
    /// The builder maps an empty string to `None`.
    pub password: Option<String>,

    /// How embedded zero code units are treated. Default: [`NulHandling::Terminate`].
    pub nul_handling: NulHandling,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("format", &self.format)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("nul_handling", &self.nul_handling)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The password to hand to the engine: `None` when unset or empty.
    pub fn effective_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Raw text output when `true`, JSON otherwise.
    pub fn raw(self, raw: bool) -> Self {
        self.format(if raw {
            OutputFormat::Raw
        } else {
            OutputFormat::Json
        })
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        let pwd = pwd.into();
        self.config.password = if pwd.is_empty() { None } else { Some(pwd) };
        self
    }

    pub fn nul_handling(mut self, nul: NulHandling) -> Self {
        self.config.nul_handling = nul;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, PdfTextError> {
        if let Some(ref p) = self.config.password {
            if p.contains('\0') {
                return Err(PdfTextError::InvalidConfig(
                    "password must not contain NUL characters".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

/// Treatment of zero code units in the engine's text buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NulHandling {
    /// A zero unit ends the page text, even before the reported count. (default)
    #[default]
    Terminate,
    /// Convert the full reported length; zeros become U+0000.
    Keep,
}
