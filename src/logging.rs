//! Logging setup
//!
//! Structured logging with tracing: a reloadable level filter, console output,
//! optional daily-rotated log files in the platform log directory.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload::Handle;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

const APP_DIR_NAME: &str = "Hamaguri";
const LOG_FILE_NAME: &str = "hamaguri.log";

/// Targets that follow the configured level: the app, the core library and
/// messages forwarded from the webview scripts
const LOG_TARGETS: &[&str] = &["hamaguri", "hamaguri_overlay", "frontend"];

lazy_static! {
    // Global handle for reloading log level dynamically
    static ref LOG_RELOAD_HANDLE: Mutex<Option<Handle<EnvFilter, Registry>>> = Mutex::new(None);
}

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl LogLevel {
    /// Lowercase name as stored in settings
    pub fn as_setting(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            LogLevel::Off => "Off",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        };
        write!(f, "{}", value)
    }
}

impl From<LogLevel> for Option<Level> {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Filter directives for `log_level`, e.g. `hamaguri=debug,hamaguri_overlay=debug,...`
fn filter_directives(log_level: LogLevel) -> String {
    let level: Option<Level> = log_level.into();
    match level {
        Some(lvl) => LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, lvl.as_str().to_lowercase()))
            .collect::<Vec<_>>()
            .join(","),
        None => "off".to_string(),
    }
}

/// Get the platform-specific logs directory
pub fn get_logs_dir() -> Result<PathBuf> {
    let logs_dir = if cfg!(target_os = "macos") {
        // macOS: ~/Library/Logs/Hamaguri
        dirs::home_dir()
            .context("Failed to get home directory")?
            .join("Library")
            .join("Logs")
            .join(APP_DIR_NAME)
    } else {
        // Windows: %LOCALAPPDATA%\Hamaguri\logs
        // Linux: ~/.local/share/Hamaguri/logs
        dirs::data_local_dir()
            .context("Failed to get local data directory")?
            .join(APP_DIR_NAME)
            .join("logs")
    };

    if !logs_dir.exists() {
        fs::create_dir_all(&logs_dir)
            .with_context(|| format!("Failed to create logs directory: {:?}", logs_dir))?;
    }

    Ok(logs_dir)
}

/// Initialize the logging system
///
/// Calling it again only swaps the level filter; the file layer is decided by
/// the first call.
pub fn init_logging(log_level: LogLevel, log_to_file: bool) -> Result<()> {
    let level_filter = EnvFilter::try_new(filter_directives(log_level))
        .context("Failed to build log filter")?;

    let mut handle_guard = LOG_RELOAD_HANDLE
        .lock()
        .map_err(|_| anyhow::anyhow!("Log reload handle lock poisoned"))?;
    if let Some(handle) = handle_guard.as_ref() {
        handle.reload(level_filter).context("Failed to reload log filter")?;
        return Ok(());
    }

    let (filter_layer, reload_handle) = tracing_subscriber::reload::Layer::new(level_filter);
    *handle_guard = Some(reload_handle);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    if log_to_file {
        let logs_dir = get_logs_dir()?;
        let appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, LOG_FILE_NAME);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(appender)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(file_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;
    } else {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init()
            .context("Failed to install tracing subscriber")?;
    }

    Ok(())
}

/// Clean up old log files
///
/// Deletes `.log` files in `logs_dir` older than `keep_days` and returns how
/// many were removed.
pub fn cleanup_old_logs(logs_dir: &Path, keep_days: u32) -> Result<usize> {
    let now = std::time::SystemTime::now();
    let keep_duration = std::time::Duration::from_secs(keep_days as u64 * 24 * 60 * 60);

    let mut deleted_count = 0;

    for entry in fs::read_dir(logs_dir)
        .with_context(|| format!("Failed to read logs directory: {:?}", logs_dir))?
    {
        let entry = entry?;
        let path = entry.path();

        // Rotated files are named hamaguri.log.YYYY-MM-DD
        let is_log = path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_NAME) || name.ends_with(".log"));
        if !path.is_file() || !is_log {
            continue;
        }

        let metadata = entry.metadata()?;
        if let Ok(modified) = metadata.modified() {
            if let Ok(age) = now.duration_since(modified) {
                if age > keep_duration && fs::remove_file(&path).is_ok() {
                    deleted_count += 1;
                    tracing::debug!(file = ?path, age_days = age.as_secs() / 86400, "Deleted old log file");
                }
            }
        }
    }

    Ok(deleted_count)
}

/// Auto-cleanup old logs on startup (runs in background)
pub fn auto_cleanup_old_logs(keep_days: u32) {
    std::thread::spawn(move || {
        if let Ok(logs_dir) = get_logs_dir() {
            match cleanup_old_logs(&logs_dir, keep_days) {
                Ok(count) if count > 0 => {
                    tracing::info!(deleted_count = count, "Cleaned up old log files");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to cleanup old log files");
                }
                _ => {}
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" debug ".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_setting_name_is_normalized() {
        let level: LogLevel = " DEBUG ".parse().unwrap();
        assert_eq!(level.as_setting(), "debug");
        assert_eq!("Warning".parse::<LogLevel>().unwrap().as_setting(), "warn");
        for name in ["off", "error", "warn", "info", "debug", "trace"] {
            assert_eq!(name.parse::<LogLevel>().unwrap().as_setting(), name);
        }
    }

    #[test]
    fn test_filter_directives_cover_all_targets() {
        assert_eq!(
            filter_directives(LogLevel::Info),
            "hamaguri=info,hamaguri_overlay=info,frontend=info"
        );
        assert_eq!(filter_directives(LogLevel::Off), "off");
    }
}
