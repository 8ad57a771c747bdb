//! File-backed tracing setup.
//!
//! The form owns the terminal while it runs, so log lines go to a file under
//! the data directory instead of stdout or stderr. The filter defaults to
//! `skyjourney=info` and can be replaced through the `SKYJOURNEY_LOG`
//! environment variable.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app_dirs;

const FILTER_ENV: &str = "SKYJOURNEY_LOG";
const LOG_FILE: &str = "skyjourney.log";

/// Initialize the logging system, returning the path of the log file.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init() -> Result<PathBuf> {
    let dir = app_dirs::get_data_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file = fs::File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_env(FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new("skyjourney=info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file)),
    );

    let _ = subscriber.try_init();

    Ok(path)
}
