//! Process-wide log setup.
//!
//! `main` calls [`init`] once at startup and keeps the returned [`LogGuard`]
//! until shutdown. Components only emit `tracing` events.

use anyhow::{Context, Result, anyhow};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Keeps the log sink open; flushes it when dropped.
pub struct LogGuard {
    file: Option<Arc<File>>,
}

impl LogGuard {
    pub fn flush(&self) -> io::Result<()> {
        if let Some(file) = &self.file {
            (&**file).flush()?;
            file.sync_all()?;
        }
        Ok(())
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Installs the global subscriber, appending to `log_file` when given and
/// writing to stdout otherwise. The filter comes from `RUST_LOG`.
pub fn init(log_file: Option<&Path>) -> Result<LogGuard> {
    let filter = env_filter();
    let guard = match log_file {
        Some(path) => {
            let file = Arc::new(open_append(path)?);
            tracing::subscriber::set_global_default(file_subscriber(file.clone(), filter))
                .map_err(|e| anyhow!("failed to install log subscriber: {}", e))?;
            LogGuard { file: Some(file) }
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| anyhow!("failed to install log subscriber: {}", e))?;
            LogGuard { file: None }
        }
    };
    Ok(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

fn file_subscriber(file: Arc<File>, filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(file)
        .finish()
}
