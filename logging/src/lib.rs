use std::fs::OpenOptions;
use std::io::stdout;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

#[cfg(feature = "journald")]
use slog::Drain;
use slog::o;
use slog::FnValue;
use slog::IgnoreResult;
use slog::Logger;
use slog::Record;
use thiserror::Error as ThisError;

#[cfg(feature = "journald")]
use slog_journald::JournaldDrain;
use slog_json::Json;

mod config;
mod decorator;
mod options;

pub use self::config::Config;
pub use self::config::LoggingBackend;
pub use self::config::LoggingLevel;
pub use self::options::Opts;

use self::decorator::decorate;

/// Errors setting up the logging backend.
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("unable to open log file '{}'", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// JSON lines drain writing to `out`.
fn json<W>(out: W) -> IgnoreResult<Mutex<Json<W>>>
where
    W: Write + Send + 'static,
{
    let drain = Json::new(out)
        .add_default_keys()
        .add_key_value(o!("module" => FnValue(|rinfo: &Record| rinfo.module())))
        .build();
    IgnoreResult::new(Mutex::new(drain))
}

/// Creates a [`Logger`] based on the given configuration.
///
/// Fails only if the configured backend can't be opened.
///
/// [`Logger`]: slog/struct.Logger.html
pub fn configure(config: Config, opts: &Opts) -> Result<Logger> {
    let logger = match &config.backend {
        LoggingBackend::File { path } => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| Error::OpenFile {
                    path: path.clone(),
                    source,
                })?;
            decorate(&config, opts, json(file))
        }
        #[cfg(feature = "journald")]
        LoggingBackend::Journald => decorate(&config, opts, JournaldDrain.ignore_res()),
        LoggingBackend::Json => decorate(&config, opts, json(stdout())),
    };
    Ok(logger)
}

/// Creates a fixed [`Logger`] to be used until configuration is loaded.
///
/// [`Logger`]: slog/struct.Logger.html
pub fn starter(opts: &Opts) -> Logger {
    decorator::into_logger(opts, json(stdout()))
}
