//! Logging setup with file output only.
//!
//! The TUI owns the terminal, so nothing is ever written to stdout. Logs
//! go to `voxline.log` in the working directory unless `VOXLINE_LOG_FILE`
//! points somewhere else.
//!
//! Filter priority: `VOXLINE_LOG`, then `RUST_LOG`, then a default of
//! `warn` globally with `info` for this crate.

use std::env;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Returned from [`init`]; must be held alive so the background file
/// writer flushes on exit.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub fn init() -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let log_file = env::var_os("VOXLINE_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("voxline.log"));
    let log_dir = match log_file.parent() {
        Some(dir) if dir != Path::new("") => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = log_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "voxline.log".to_string());

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_filter()?);

    Registry::default().with(file_layer).try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

fn create_filter() -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
    if let Ok(filter) = env::var("VOXLINE_LOG") {
        return Ok(EnvFilter::try_new(filter)?);
    }
    if let Ok(filter) = env::var("RUST_LOG") {
        return Ok(EnvFilter::try_new(filter)?);
    }
    Ok(EnvFilter::try_new("warn,voxline=info")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new("warn,voxline=info").is_ok());
    }
}
