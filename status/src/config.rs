use std::path::PathBuf;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Map;
use serde_json::Value as Json;

use healthpoint_models_status::ABOUT_PROTOCOL_HTTP;

/// Status reporting configuration options.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the JSON file with the service metadata.
    #[serde(default = "Config::default_about_file")]
    pub about_file: PathBuf,

    /// Path to the file holding the service version.
    #[serde(default = "Config::default_version_file")]
    pub version_file: PathBuf,

    /// Protocol label reported by About.
    #[serde(default = "Config::default_protocol")]
    pub protocol: String,

    /// Additional custom data reported by About.
    ///
    /// Keys set here take precedence over the same keys in the about file.
    #[serde(default)]
    pub custom_data: Option<Map<String, Json>>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            about_file: Config::default_about_file(),
            version_file: Config::default_version_file(),
            protocol: Config::default_protocol(),
            custom_data: None,
        }
    }
}

impl Config {
    fn default_about_file() -> PathBuf {
        PathBuf::from("about.json")
    }
    fn default_version_file() -> PathBuf {
        PathBuf::from("version.txt")
    }
    fn default_protocol() -> String {
        String::from(ABOUT_PROTOCOL_HTTP)
    }
}
