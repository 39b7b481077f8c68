//! Tracing subscriber setup for Autocam binaries.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::AutocamResult;

/// Install the global tracing subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.level`. Output goes to stderr,
/// or is appended to `config.file` when one is set, so stdout stays free for
/// command output. A second call leaves the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) -> AutocamResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let writer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(writer);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        let subscriber = builder
            .with_target(true)
            .with_ansi(config.file.is_none())
            .with_thread_ids(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed; keeping it");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_creates_log_file() {
        let dir = std::env::temp_dir().join("autocam_test_logging");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("autocam.log");

        let config = LoggingConfig {
            file: Some(path.clone()),
            ..LoggingConfig::default()
        };
        init_logging(&config).unwrap();
        assert!(path.exists());

        // Second install is tolerated.
        init_logging(&LoggingConfig::default()).unwrap();

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_init_logging_reports_unwritable_file() {
        let config = LoggingConfig {
            file: Some(std::env::temp_dir().join("autocam_missing_dir").join("x").join("a.log")),
            ..LoggingConfig::default()
        };
        assert!(init_logging(&config).is_err());
    }
}
