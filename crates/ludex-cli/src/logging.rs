// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use time::OffsetDateTime;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

struct LudexTimer;

impl FormatTime for LudexTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
        match OffsetDateTime::now_utc().format(&format) {
            Ok(stamp) => w.write_str(&stamp),
            Err(_) => w.write_str("-"),
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Sends logs to `path`, or to stderr when the file cannot be opened.
/// `RUST_LOG` overrides `level`.
pub fn init(level: &str, path: &Path) -> Result<()> {
    let opened = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| {
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
        });

    match opened {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(LudexTimer)
                .try_init()
                .map_err(|error| anyhow!("install log subscriber: {error}"))?;
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %path.display(), "logging initialized");
        }
        Err(error) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(LudexTimer)
                .try_init()
                .map_err(|error| anyhow!("install log subscriber: {error}"))?;
            tracing::warn!(
                error = %error,
                path = %path.display(),
                "failed to open log file; using stderr"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::LudexTimer;
    use tracing_subscriber::fmt::format::Writer;
    use tracing_subscriber::fmt::time::FormatTime;

    #[test]
    fn timer_writes_utc_timestamp() {
        let mut buf = String::new();
        let mut writer = Writer::new(&mut buf);
        LudexTimer
            .format_time(&mut writer)
            .expect("timestamp formats");
        assert_eq!(buf.len(), "2026-01-01T00:00:00Z".len(), "got {buf}");
        assert!(buf.ends_with('Z'));
    }
}
