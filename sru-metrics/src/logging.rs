use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

const MAX_LOG_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 3);

/// Keeps the non-blocking file writer alive; logs are flushed when dropped.
#[allow(dead_code)]
pub struct LoggerGuard(Option<WorkerGuard>);

/// Install the global subscriber.
///
/// Console output goes to stderr so stdout only carries the metrics report.
/// When `log_dir` is set, a daily-rotated `<prefix>.*.log` file is written as
/// well and stale files from earlier runs are removed.
pub fn init_logging(log_dir: Option<&Path>, prefix: &str, level: &str) -> LoggerGuard {
    let parsed_level = parse_level(level);
    let default_level = parsed_level.unwrap_or(LevelFilter::INFO);
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let builder = EnvFilter::builder().with_default_directive(default_level.into());

    let console_filter = builder.clone().parse_lossy(&rust_log);
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_filter(console_filter);

    let mut guard = None;
    let mut appender_error = None;
    let file_layer = match log_dir.map(|dir| build_file_appender(dir, prefix)) {
        Some(Ok(appender)) => {
            let (non_blocking, worker_guard) = NonBlocking::new(appender);
            guard = Some(worker_guard);
            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_filter(builder.parse_lossy(&rust_log)),
            )
        }
        Some(Err(e)) => {
            appender_error = Some(e);
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    if parsed_level.is_none() {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", level);
    }
    if let Some(e) = appender_error {
        tracing::warn!("File logging disabled: {}", e);
    }
    if let Some(dir) = log_dir {
        if let Err(e) = cleanup_old_logs(dir, prefix, MAX_LOG_AGE) {
            tracing::warn!("Failed to delete old log file: {}", e);
        }
    }

    LoggerGuard(guard)
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        _ => None,
    }
}

fn build_file_appender(log_dir: &Path, prefix: &str) -> Result<RollingFileAppender, String> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| e.to_string())
}

fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<()> {
    let now = SystemTime::now();

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.starts_with(prefix) && file_name.ends_with(".log") {
                let modified = fs::metadata(&path)?.modified()?;
                if now.duration_since(modified).unwrap_or_default() > max_age {
                    fs::remove_file(&path)?;
                    tracing::info!("Old log file deleted: {}", file_name);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("error"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_cleanup_old_logs() {
        let dir = std::env::temp_dir().join(format!("sru-metrics-logs-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let four_days_ago = SystemTime::now() - Duration::from_secs(60 * 60 * 24 * 4);

        let stale = dir.join("sru-metrics.2026-10-14.log");
        let recent = dir.join("sru-metrics.2026-10-18.log");
        let foreign = dir.join("other.2026-10-14.log");
        for path in [&stale, &recent, &foreign] {
            fs::write(path, "log line").unwrap();
        }
        for path in [&stale, &foreign] {
            fs::File::options()
                .write(true)
                .open(path)
                .unwrap()
                .set_modified(four_days_ago)
                .unwrap();
        }

        cleanup_old_logs(&dir, "sru-metrics", MAX_LOG_AGE).unwrap();
        assert!(!stale.exists());
        assert!(recent.exists());
        assert!(foreign.exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
