use std::fs;
use std::path::Path;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use healthpoint_status::TYPE_EXTERNAL;

use crate::Error;
use crate::Result;

/// Healthpoint server configuration.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    #[serde(default = "ServerConfig::default_bind")]
    pub bind: String,

    /// Remote healthpoints this service depends on.
    #[serde(default)]
    pub dependencies: Vec<DependencyConfig>,

    #[serde(default)]
    pub logging: healthpoint_logging::Config,

    #[serde(default)]
    pub status: healthpoint_status::Config,
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            bind: ServerConfig::default_bind(),
            dependencies: Vec::new(),
            logging: healthpoint_logging::Config::default(),
            status: healthpoint_status::Config::default(),
        }
    }
}

impl ServerConfig {
    fn default_bind() -> String {
        String::from("127.0.0.1:8080")
    }

    /// Load the configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<ServerConfig> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A remote healthpoint to check and, optionally, traverse.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyConfig {
    /// Human readable name of the dependency.
    pub name: String,

    /// Path segment the dependency is registered under.
    pub slug: String,

    /// Either `internal` or `external`.
    #[serde(default = "DependencyConfig::default_kind", rename = "type")]
    pub kind: String,

    /// Base URL of the remote status resource (for example `http://db-api:8080/status`).
    pub url: String,

    /// Forward traversals through this dependency.
    #[serde(default)]
    pub traversable: bool,
}

impl DependencyConfig {
    fn default_kind() -> String {
        String::from(TYPE_EXTERNAL)
    }
}
