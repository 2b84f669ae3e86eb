// Logging setup.
// Installs a tracing subscriber writing to stderr or, while the TUI is up, a file.

use std::path::Path;

use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{Result, SiteError};

/// Pick the filter directive from flags, falling back to the configured level.
pub fn filter_directive(level: &str, debug: bool, verbose: bool) -> String {
    if debug {
        "debug".to_string()
    } else if verbose {
        "info".to_string()
    } else {
        level.to_string()
    }
}

/// Initialize logging. `RUST_LOG` takes precedence over flags and config.
///
/// When `file` is set, events go there through a background writer and the
/// returned guard must be kept alive until exit so buffered lines are flushed.
pub fn init_logging(
    level: &str,
    debug: bool,
    verbose: bool,
    file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level, debug, verbose)));

    let guard = match file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;
            let file_name = path
                .file_name()
                .ok_or_else(|| SiteError::Config(format!("invalid log file {}", path.display())))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(debug)
                .try_init()
                .map_err(|e| SiteError::Other(e.to_string()))?;
            Some(guard)
        }
        None => {
            fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(debug)
                .with_line_number(debug)
                .try_init()
                .map_err(|e| SiteError::Other(e.to_string()))?;
            None
        }
    };

    debug!("Logging initialized");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("warn", true, true), "debug");
        assert_eq!(filter_directive("warn", false, true), "info");
        assert_eq!(filter_directive("warn", false, false), "warn");
    }
}
