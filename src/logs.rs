//! Diagnostics go to a file; the terminal belongs to the editor.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `tracing` subscriber, appending to `log_file`.
///
/// `RUST_LOG` takes precedence over `filter`. A subscriber that is already
/// installed is left in place.
pub fn init_global(log_file: &Path, filter: &str) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
    {
        tracing::debug!("keeping existing tracing subscriber: {}", e);
    }
    Ok(())
}
