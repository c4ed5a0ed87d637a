//! CLI binary for pdftext.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractionConfig`, reads the input bytes, and writes the result.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use pdftext::{
    run, ExtractionConfig, ExtractionProgressCallback, InputSource, NulHandling, OutputSink,
    PdfTextError, PdfiumEngine, ProgressCallback,
};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Renders a progress bar on stderr and a line for every page that came out
/// empty because it could not be read.
struct CliProgressCallback {
    bar: ProgressBar,
    empties: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Loading");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            empties: AtomicUsize::new(0),
        })
    }

    /// Take the bar off stderr without a summary line.
    fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_pages as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Extracting");
    }

    fn on_page_complete(&self, _page_num: usize, _total_pages: usize, _text_len: usize) {
        self.bar.inc(1);
    }

    fn on_page_empty(&self, page_num: usize, total_pages: usize, reason: &str) {
        self.empties.fetch_add(1, Ordering::SeqCst);
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            red("✗"),
            page_num,
            total_pages,
            dim(reason),
        ));
        self.bar.inc(1);
    }

    fn on_extraction_complete(&self, total_pages: usize, extracted: usize) {
        self.bar.finish_and_clear();
        let empty = self.empties.load(Ordering::SeqCst);
        if empty == 0 {
            eprintln!(
                "{} {} pages extracted",
                green("✔"),
                bold(&extracted.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} pages extracted  ({} empty)",
                red("⚠"),
                bold(&extracted.to_string()),
                total_pages,
                red(&empty.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # JSON to stdout
  pdftext -i document.pdf

  # Raw text to a file
  pdftext -r -i document.pdf -o document.txt

  # Read the PDF from stdin
  cat document.pdf | pdftext -i -

  # Encrypted document
  pdftext -i secret.pdf -p hunter2

OUTPUT:
  JSON (default):  {"type":"pdf","pages":["<page 1 text>","<page 2 text>",...]}
  Raw (-r):        every page's text concatenated, no separators

  Output to stdout ends with one newline; output to a file (-o) is written
  exactly. Pages that cannot be read appear as empty strings.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH    Path to an existing libpdfium
  PDFTEXT_PASSWORD   Document password
  RUST_LOG           Override the log filter (logs go to stderr)
"#;

/// Extract text from PDF documents as JSON or raw text.
#[derive(Parser, Debug)]
#[command(
    name = "pdftext",
    version,
    about = "Text extractor for PDF documents",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Document to parse; `-` reads it from stdin.
    #[arg(short, long, value_name = "PATH")]
    input: Option<String>,

    /// Write output to this file instead of stdout.
    #[arg(short, long, env = "PDFTEXT_OUTPUT")]
    output: Option<PathBuf>,

    /// Raw text output (default: JSON).
    #[arg(short, long, env = "PDFTEXT_RAW")]
    raw: bool,

    /// Password for encrypted documents.
    #[arg(short, long, env = "PDFTEXT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Convert each page's full character count, keeping embedded NULs.
    #[arg(long)]
    keep_nul: bool,

    /// Path to the PDFium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Show a progress bar on stderr.
    #[arg(long, env = "PDFTEXT_PROGRESS")]
    progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFTEXT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFTEXT_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar owns stderr while it is drawn, so library warnings
    // are held back to errors unless -v asks for everything.
    let show_progress = cli.progress && !cli.quiet;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Read input ───────────────────────────────────────────────────────
    // Empty input is a usage error and is reported before PDFium is bound.
    let Some(source) = cli.input.as_deref().map(InputSource::from_arg) else {
        usage_error(&PdfTextError::EmptyInput);
    };
    let bytes = source.read_bytes().context("Failed to read input")?;
    if bytes.is_empty() {
        usage_error(&PdfTextError::EmptyInput);
    }

    // ── Bind PDFium ──────────────────────────────────────────────────────
    let engine =
        PdfiumEngine::bind(cli.pdfium_lib.as_deref()).context("Failed to initialise PDFium")?;

    // ── Build config ─────────────────────────────────────────────────────
    let progress = show_progress.then(CliProgressCallback::new);
    let progress_cb: Option<ProgressCallback> = progress
        .clone()
        .map(|cb| cb as Arc<dyn ExtractionProgressCallback>);
    let config = build_config(&cli, progress_cb)?;

    // ── Extract ──────────────────────────────────────────────────────────
    let result = run(&engine, &bytes, &config);
    drop(engine);
    let output =
        clear_on_error(result, progress.as_deref()).context("Failed to extract text")?;

    OutputSink::from_option(cli.output.clone())
        .write(&output)
        .context("Failed to write output")?;

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .raw(cli.raw)
        .nul_handling(if cli.keep_nul {
            NulHandling::Keep
        } else {
            NulHandling::Terminate
        });

    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// A failed load never reaches `on_extraction_complete`, so the spinner
/// has to be cleared here before the error is printed.
fn clear_on_error<T, E>(
    result: std::result::Result<T, E>,
    progress: Option<&CliProgressCallback>,
) -> std::result::Result<T, E> {
    if result.is_err() {
        if let Some(progress) = progress {
            progress.clear();
        }
    }
    result
}

/// Report a usage error the way clap does (usage line, exit status 2).
fn usage_error(err: &PdfTextError) -> ! {
    Cli::command()
        .error(ErrorKind::MissingRequiredArgument, err.to_string())
        .exit()
}
