//! # Logger
//!
//! Installs the process-wide `tracing` subscriber: a compact console layer plus, when a log
//! directory is set, a non-blocking file layer rolled daily (plain text or JSON lines).
//! `RUST_LOG` is honoured unless an explicit filter is configured.
//!
//! ```rust
//! # use lobby_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder("lobby-server").level(LevelFilter::DEBUG).init().unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Daily files kept before the oldest is removed.
const KEPT_FILES: usize = 14;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileOutput {
    directory: PathBuf,
    json: bool,
}

/// Settings for the global subscriber, applied by [`LoggerBuilder::init`].
#[derive(Debug)]
pub struct LoggerBuilder {
    name: String,
    level: LevelFilter,
    filter: Option<String>,
    files: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Default level when neither `RUST_LOG` nor [`LoggerBuilder::env_filter`] says otherwise.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Explicit filter directives (e.g. `lobby=debug,tower_http=info`).
    ///
    /// Replaces `RUST_LOG`. Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Also writes `<name>.<date>.log` files into `directory`, as JSON lines when `json` is set.
    #[must_use]
    pub fn files(mut self, directory: impl Into<PathBuf>, json: bool) -> Self {
        self.files = Some(FileOutput { directory: directory.into(), json });
        self
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive: dropping it stops the file writer thread.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name or an invalid filter.
    /// * [`LoggerError::Internal`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] when a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        let filter = self.build_filter()?;
        let mut layers = vec![layer().compact().with_target(true).boxed()];

        let guard = match &self.files {
            Some(output) => {
                let (writer, guard) = tracing_appender::non_blocking(appender(&self.name, output)?);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if output.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %self.name, files = guard.is_some(), "Logging initialized");

        Ok(Logger { _guard: guard })
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.filter {
            Some(filter) => builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            }),
            None => Ok(builder.from_env_lossy()),
        }
    }
}

fn appender(name: &str, output: &FileOutput) -> Result<RollingFileAppender, LoggerError> {
    std::fs::create_dir_all(&output.directory).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Creating log directory {}", output.directory.display()).into()),
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(KEPT_FILES)
        .build(&output.directory)
        .context("Building rolling file appender")
}

/// Handle to the installed logging system.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    _guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder; `name` prefixes rolled log files.
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder { name: name.into(), level: LevelFilter::INFO, filter: None, files: None }
    }
}
