use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter for the given verbosity
///
/// 0 = info, 1 = debug (with hyper::proto::h1 suppressed), 2+ or `trace` = trace.
/// `RUST_LOG` wins over the flags except in quiet mode.
fn build_filter(verbose_level: u8, quiet: bool, trace: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    let level = if trace { 2 } else { verbose_level };
    let filter_str = match level {
        0 => "info",
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str))
}

/// Logs go to stderr and, when `log_file` is given, to a daily rolling file
/// next to it (`set_creator.log`, `set_creator.log.2026-01-17`, ...)
pub fn init_logging(
    verbose_level: u8,
    quiet: bool,
    trace: bool,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = build_filter(verbose_level, quiet, trace);

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let file_appender = match log_file {
        Some(log_path) => {
            let log_dir = log_path
                .parent()
                .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
            std::fs::create_dir_all(log_dir)?;
            let log_filename = log_path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
            Some(RollingFileAppender::new(Rotation::DAILY, log_dir, log_filename))
        }
        None => None,
    };

    let stderr_json = json.then(|| {
        fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr)
    });
    let stderr_text = (!json).then(|| {
        fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr)
    });
    let file_layer = file_appender.map(|appender| {
        fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(false)
            .with_writer(appender)
    });

    Registry::default()
        .with(filter)
        .with(stderr_json)
        .with(stderr_text)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins() {
        assert_eq!(build_filter(2, true, true).to_string(), "error");
    }

    #[test]
    fn test_trace_flag_matches_double_verbose() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert_eq!(build_filter(0, false, true).to_string(), "trace");
        assert_eq!(build_filter(2, false, false).to_string(), "trace");
        assert_eq!(build_filter(0, false, false).to_string(), "info");
    }
}
