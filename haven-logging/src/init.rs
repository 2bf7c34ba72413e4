use anyhow::Result;
use haven_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber from configuration
///
/// The configured level is used when it parses as a filter directive,
/// otherwise `RUST_LOG`, otherwise `info`. Calling this twice is harmless.
pub fn init_logging_from_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(config.level.as_str());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    let result = match config.format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Compact => builder.compact().with_target(false).try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

/// Initialize plain console tracing at the given level
pub fn init_simple_tracing(log_level: &str) -> Result<()> {
    let env_filter = build_filter(log_level);

    if tracing_subscriber::fmt().with_env_filter(env_filter).try_init().is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

/// Route log output through the test harness's captured writer
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter("debug"))
        .with_test_writer()
        .try_init();
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_config::LogLevel;

    #[test]
    fn test_repeated_init_is_harmless() {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Compact,
            include_location: false,
        };

        assert!(init_logging_from_config(&config).is_ok());
        assert!(init_logging_from_config(&config).is_ok());
        assert!(init_simple_tracing("warn").is_ok());
    }

    #[test]
    fn test_bad_directive_falls_back() {
        // Must not panic on an unparsable directive
        let _ = build_filter("[[not a directive");
    }
}
