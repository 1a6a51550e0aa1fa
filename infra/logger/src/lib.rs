//! # Logger
//!
//! Installs the process-wide `tracing` subscriber used by NCSS services.
//!
//! Output goes to the console (compact, ANSI colored), to daily-rotated files
//! (plain text or JSON), or both. Filtering starts from the configured level and
//! honours `RUST_LOG`; an explicit [`LoggerBuilder::env_filter`] replaces the
//! environment lookup.
//!
//! ```rust
//! use ncss_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("ncss-server")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    files: Option<FileConfig>,
}

#[derive(Debug)]
struct FileConfig {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { console: true, level: LevelFilter::INFO, env_filter: None, files: None }
    }
}

mod private {
    pub trait Sealed {}
}

/// Builder state: no logger name given yet.
#[derive(Debug)]
pub struct Unnamed;
/// Builder state: named logger.
#[derive(Debug)]
pub struct Named(String);
/// Builder state: console output only.
#[derive(Debug)]
pub struct NoFiles;
/// Builder state: rolling file output configured.
#[derive(Debug)]
pub struct WithFiles;

impl private::Sealed for Unnamed {}
impl private::Sealed for Named {}
impl private::Sealed for NoFiles {}
impl private::Sealed for WithFiles {}

/// Type-state builder for the global subscriber.
///
/// A name is mandatory before [`LoggerBuilder::init`] becomes available; file-only
/// options ([`rotation`](LoggerBuilder::rotation), [`max_files`](LoggerBuilder::max_files),
/// [`json`](LoggerBuilder::json)) unlock after [`path`](LoggerBuilder::path).
#[derive(Debug)]
#[must_use = "The builder does nothing until `.init()` is called"]
pub struct LoggerBuilder<N: private::Sealed = Unnamed, F: private::Sealed = NoFiles> {
    config: LoggerConfig,
    name: N,
    files: PhantomData<F>,
}

impl<F: private::Sealed> LoggerBuilder<Unnamed, F> {
    /// Names the logger; the name prefixes rolling log files (`<name>.<date>.log`).
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { config: self.config, name: Named(name.into()), files: PhantomData }
    }
}

impl<F: private::Sealed> LoggerBuilder<Named, F> {
    /// Minimum level emitted when no filter directive matches.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Explicit filter directives (e.g. `ncss_convert=debug,tower_http=info`).
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Writes rolling log files into `dir` (created if missing).
    pub fn path(mut self, dir: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFiles> {
        self.config.files = Some(FileConfig {
            dir: dir.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        });
        LoggerBuilder { config: self.config, name: self.name, files: PhantomData }
    }

    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive for the lifetime of the program: dropping it
    /// stops the background file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`,
    ///   an unparsable filter, or when no output is enabled.
    /// * [`LoggerError::Appender`] if the log directory cannot be used.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let LoggerBuilder { config, name: Named(name), .. } = self;
        validate(&config, &name)?;

        let filter = env_filter(&config)?;
        let mut layers: Vec<BoxedLayer<_>> = Vec::new();

        if config.console {
            layers.push(fmt::layer().compact().with_ansi(true).boxed());
        }

        let guard = match &config.files {
            Some(files) => {
                let (layer, guard) = file_layer(&name, files)?;
                layers.push(layer);
                Some(guard)
            }
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "no output enabled; turn on the console or configure a log path".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

impl LoggerBuilder<Named, WithFiles> {
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(files) = self.config.files.as_mut() {
            files.rotation = rotation;
        }
        self
    }

    /// Number of rotated files kept on disk.
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(files) = self.config.files.as_mut() {
            files.max_files = max;
        }
        self
    }

    /// Writes files as JSON lines instead of plain text.
    pub fn json(mut self) -> Self {
        if let Some(files) = self.config.files.as_mut() {
            files.json = true;
        }
        self
    }
}

/// Handle to the installed logging system.
#[must_use = "Dropping this handle stops the background log writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: Unnamed, files: PhantomData }
    }

    /// The file writer guard, present only when file output is configured.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers");
        }
    }
}

fn validate(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "logger name cannot be empty".into(),
            context: None,
        });
    }
    if config.files.as_ref().is_some_and(|files| files.max_files == 0) {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }
    Ok(())
}

fn env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    match &config.env_filter {
        None => Ok(builder.from_env_lossy()),
        Some(directives) => {
            builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("invalid filter '{directives}': {e}").into(),
                context: None,
            })
        }
    }
}

fn file_layer<S>(name: &str, files: &FileConfig) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    std::fs::create_dir_all(&files.dir).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("creating log directory {}", files.dir.display()).into()),
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(files.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(files.max_files)
        .build(&files.dir)?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let layer = if files.json { layer.json().boxed() } else { layer.boxed() };

    Ok((layer, guard))
}
