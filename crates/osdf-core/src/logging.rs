//! Logging init: append to a file under the XDG state dir, falling back to
//! stderr when that is not possible.

use anyhow::Result;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,osdf=debug";
const VERBOSE_FILTER: &str = "debug,osdf=trace";

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogTarget::File(path) => write!(f, "{}", path.display()),
            LogTarget::Stderr => f.write_str("stderr"),
        }
    }
}

/// A log file handle, or stderr if the handle could not be duplicated.
enum LogWriter {
    File(File),
    Stderr,
}

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::File(f) => f.write(buf),
            LogWriter::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::File(f) => f.flush(),
            LogWriter::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct SharedFile(File);

impl<'a> MakeWriter<'a> for SharedFile {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogWriter::File)
            .unwrap_or(LogWriter::Stderr)
    }
}

/// `RUST_LOG` wins; otherwise the default (or verbose) filter.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_FILTER
        } else {
            DEFAULT_FILTER
        })
    })
}

/// `~/.local/state/osdf/osdf.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("osdf")?;
    Ok(xdg_dirs.get_state_home().join("osdf").join("osdf.log"))
}

/// Initialize logging to the state-dir log file.
/// Returns Err (without installing a subscriber) if the file cannot be opened.
pub fn init_logging(verbose: bool) -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(BoxMakeWriter::new(SharedFile(file)))
        .with_ansi(false)
        .init();

    tracing::info!("osdf logging initialized at {}", path.display());
    Ok(path)
}

/// Initialize logging to stderr only.
pub fn init_logging_stderr(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// File logging if possible, stderr otherwise; never fails.
pub fn init(verbose: bool) -> LogTarget {
    match init_logging(verbose) {
        Ok(path) => LogTarget::File(path),
        Err(e) => {
            init_logging_stderr(verbose);
            tracing::warn!("file logging unavailable ({:#}), logging to stderr", e);
            LogTarget::Stderr
        }
    }
}
