use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors that stop the healthpoint server.
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("unable to bind the server to '{bind}'")]
    Bind {
        bind: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read configuration from '{}'", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in '{}'", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("dependency '{slug}' has unknown type '{kind}', expected 'internal' or 'external'")]
    DependencyType { slug: String, kind: String },

    #[error("unable to configure logging")]
    Logging(#[from] healthpoint_logging::Error),

    #[error("unable to register dependencies")]
    Registry(#[from] healthpoint_status::Error),

    #[error("the HTTP server failed")]
    Serve(#[source] std::io::Error),
}

/// Short form alias for functions returning `Error`s.
pub type Result<T> = std::result::Result<T, Error>;
