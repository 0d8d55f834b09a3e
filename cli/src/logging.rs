use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Env, Target};
use log::info;

/// Sends log output to a file so it never draws over the terminal UI.
/// `RUST_LOG` overrides the default `info` filter.
pub fn setup_logging() -> Result<PathBuf> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(crate::settings::APP_DIR)
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tasklist.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(log_file)
}
