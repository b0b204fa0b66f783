use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Map;
use serde_json::Value as Json;

use super::EncodedStatus;

/// Placeholder for metadata fields that could not be resolved.
pub const ABOUT_FIELD_NA: &str = "N/A";

/// Protocol label reported by services answering over HTTP.
pub const ABOUT_PROTOCOL_HTTP: &str = "http";

/// Placeholder for an unresolvable host name.
pub const HOST_UNKNOWN: &str = "unknown";

/// Placeholder for an unreadable version file.
pub const VERSION_NA: &str = "N/A";

/// Service identity and dependencies report.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub protocol: String,
    pub owners: Vec<String>,
    pub version: String,
    pub host: String,
    pub project_repo: String,
    pub project_home: String,
    pub logs_links: Vec<String>,
    pub stats_links: Vec<String>,
    pub dependencies: Vec<Dependency>,
    pub custom_data: Option<Map<String, Json>>,
}

/// Status of a single dependency as reported in an `AboutResponse`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub name: String,
    pub status: EncodedStatus,

    /// Wall-clock seconds spent in the status check.
    pub status_duration: f64,
    pub status_path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_traversable: bool,
}
