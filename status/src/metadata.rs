use std::path::Path;

use serde_json::Map;
use serde_json::Value as Json;
use slog::warn;
use slog::Logger;
use tokio::fs;

use healthpoint_models_status::ABOUT_FIELD_NA;
use healthpoint_models_status::HOST_UNKNOWN;
use healthpoint_models_status::VERSION_NA;

/// Service metadata loaded from the about file.
///
/// Fields that can't be resolved hold sentinel values instead of failing the load.
#[derive(Clone, PartialEq, Debug)]
pub struct AboutMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owners: Vec<String>,
    pub project_repo: String,
    pub project_home: String,
    pub logs_links: Vec<String>,
    pub stats_links: Vec<String>,
    pub custom_data: Option<Map<String, Json>>,
}

impl Default for AboutMetadata {
    fn default() -> AboutMetadata {
        AboutMetadata {
            id: ABOUT_FIELD_NA.to_string(),
            name: ABOUT_FIELD_NA.to_string(),
            description: ABOUT_FIELD_NA.to_string(),
            owners: Vec::new(),
            project_repo: ABOUT_FIELD_NA.to_string(),
            project_home: ABOUT_FIELD_NA.to_string(),
            logs_links: Vec::new(),
            stats_links: Vec::new(),
            custom_data: None,
        }
    }
}

impl AboutMetadata {
    /// Load metadata from a JSON file, field by field.
    ///
    /// An unreadable file or invalid JSON document yields the all-sentinel default.
    /// The file is read on the runtime's blocking pool, never on the calling task's thread.
    pub async fn load(path: &Path, logger: &Logger) -> AboutMetadata {
        let data = match fs::read_to_string(path).await {
            Ok(data) => data,
            Err(error) => {
                warn!(
                    logger, "Unable to read about metadata";
                    "path" => %path.display(), "error" => %error,
                );
                return AboutMetadata::default();
            }
        };
        let document: Map<String, Json> = match serde_json::from_str(&data) {
            Ok(document) => document,
            Err(error) => {
                warn!(
                    logger, "Unable to decode about metadata";
                    "path" => %path.display(), "error" => %error, "json" => data,
                );
                return AboutMetadata::default();
            }
        };
        let fields = Fields {
            document: &document,
            logger,
            path,
        };
        AboutMetadata {
            id: fields.string("id"),
            name: fields.string("summary"),
            description: fields.string("description"),
            owners: fields.strings("maintainers"),
            project_repo: fields.string("projectRepo"),
            project_home: fields.string("projectHome"),
            logs_links: fields.strings("logsLinks"),
            stats_links: fields.strings("statsLinks"),
            custom_data: fields.custom_data(),
        }
    }
}

/// Defensive accessors for loosely typed metadata documents.
struct Fields<'a> {
    document: &'a Map<String, Json>,
    logger: &'a Logger,
    path: &'a Path,
}

impl<'a> Fields<'a> {
    fn string(&self, key: &str) -> String {
        match self.document.get(key) {
            None => {
                warn!(self.logger, "About field missing"; "field" => key, "path" => %self.path.display());
                ABOUT_FIELD_NA.to_string()
            }
            Some(Json::String(value)) => value.clone(),
            Some(_) => {
                warn!(self.logger, "About field is not a string"; "field" => key, "path" => %self.path.display());
                ABOUT_FIELD_NA.to_string()
            }
        }
    }

    fn strings(&self, key: &str) -> Vec<String> {
        let items = match self.document.get(key) {
            None => {
                warn!(self.logger, "About field missing"; "field" => key, "path" => %self.path.display());
                return Vec::new();
            }
            Some(Json::Array(items)) => items,
            Some(_) => {
                warn!(self.logger, "About field is not an array"; "field" => key, "path" => %self.path.display());
                return Vec::new();
            }
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Json::String(value) => value.clone(),
                _ => {
                    warn!(
                        self.logger, "About field item is not a string";
                        "field" => key, "index" => index, "path" => %self.path.display(),
                    );
                    ABOUT_FIELD_NA.to_string()
                }
            })
            .collect()
    }

    fn custom_data(&self) -> Option<Map<String, Json>> {
        match self.document.get("customData") {
            None => None,
            Some(Json::Object(data)) => Some(data.clone()),
            Some(_) => {
                warn!(
                    self.logger, "About field customData is not a JSON object";
                    "path" => %self.path.display(),
                );
                None
            }
        }
    }
}

/// Read the service version, trimmed of surrounding whitespace.
///
/// Like `AboutMetadata::load` the file is read off the calling task's thread.
pub async fn load_version(path: &Path, logger: &Logger) -> String {
    match fs::read_to_string(path).await {
        Ok(version) => version.trim().to_string(),
        Err(error) => {
            warn!(
                logger, "Unable to read version";
                "path" => %path.display(), "error" => %error,
            );
            VERSION_NA.to_string()
        }
    }
}

/// Resolve the name of the host running the service.
pub fn resolve_host(logger: &Logger) -> String {
    match hostname::get() {
        Ok(host) => host.to_string_lossy().into_owned(),
        Err(error) => {
            warn!(logger, "Unable to resolve host name"; "error" => %error);
            HOST_UNKNOWN.to_string()
        }
    }
}

/// Overlay caller provided custom data on top of the metadata custom data.
///
/// Caller values win on key collisions.
/// Without caller data the metadata value is returned as is.
pub fn merge_custom_data(
    base: Option<Map<String, Json>>,
    overlay: Option<&Map<String, Json>>,
) -> Option<Map<String, Json>> {
    let overlay = match overlay {
        None => return base,
        Some(overlay) => overlay,
    };
    let mut merged = base.unwrap_or_default();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    Some(merged)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use serde_json::json;
    use serde_json::Map;
    use slog::o;
    use slog::Discard;
    use slog::Logger;
    use tempfile::NamedTempFile;

    use super::load_version;
    use super::merge_custom_data;
    use super::AboutMetadata;

    fn logger() -> Logger {
        Logger::root(Discard, o!())
    }

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[actix_rt::test]
    async fn load_complete() {
        let file = file_with(
            r#"{
                "id": "svc",
                "summary": "Service",
                "description": "A service",
                "maintainers": ["ops@example.com"],
                "projectRepo": "https://git/svc",
                "projectHome": "https://svc",
                "logsLinks": ["https://logs"],
                "statsLinks": ["https://stats"],
                "customData": {"team": "core"}
            }"#,
        );
        let metadata = AboutMetadata::load(file.path(), &logger()).await;
        let mut custom = Map::new();
        custom.insert("team".into(), json!("core"));
        assert_eq!(
            metadata,
            AboutMetadata {
                id: "svc".into(),
                name: "Service".into(),
                description: "A service".into(),
                owners: vec!["ops@example.com".into()],
                project_repo: "https://git/svc".into(),
                project_home: "https://svc".into(),
                logs_links: vec!["https://logs".into()],
                stats_links: vec!["https://stats".into()],
                custom_data: Some(custom),
            }
        );
    }

    #[actix_rt::test]
    async fn load_degrades_fields() {
        let file = file_with(
            r#"{
                "id": 42,
                "summary": "Service",
                "maintainers": "ops",
                "logsLinks": ["https://logs", 7],
                "customData": ["not", "an", "object"]
            }"#,
        );
        let metadata = AboutMetadata::load(file.path(), &logger()).await;
        assert_eq!(metadata.id, "N/A");
        assert_eq!(metadata.name, "Service");
        assert_eq!(metadata.description, "N/A");
        assert_eq!(metadata.owners, Vec::<String>::new());
        assert_eq!(metadata.logs_links, vec!["https://logs".to_string(), "N/A".into()]);
        assert_eq!(metadata.stats_links, Vec::<String>::new());
        assert_eq!(metadata.custom_data, None);
    }

    #[actix_rt::test]
    async fn load_malformed_json() {
        let file = file_with("{ not json");
        let metadata = AboutMetadata::load(file.path(), &logger()).await;
        assert_eq!(metadata, AboutMetadata::default());
    }

    #[actix_rt::test]
    async fn load_missing_file() {
        let path = Path::new("/this/path/does/not/exist/about.json");
        let metadata = AboutMetadata::load(path, &logger()).await;
        assert_eq!(metadata, AboutMetadata::default());
    }

    #[actix_rt::test]
    async fn version_is_trimmed() {
        let file = file_with("  1.2.3\n");
        assert_eq!(load_version(file.path(), &logger()).await, "1.2.3");
    }

    #[actix_rt::test]
    async fn version_missing() {
        let path = Path::new("/this/path/does/not/exist/version.txt");
        assert_eq!(load_version(path, &logger()).await, "N/A");
    }

    #[test]
    fn custom_data_caller_wins() {
        let mut base = Map::new();
        base.insert("team".into(), json!("core"));
        base.insert("tier".into(), json!(1));
        let mut overlay = Map::new();
        overlay.insert("tier".into(), json!(2));
        overlay.insert("region".into(), json!("eu"));
        let merged = merge_custom_data(Some(base), Some(&overlay)).unwrap();
        assert_eq!(merged.get("team"), Some(&json!("core")));
        assert_eq!(merged.get("tier"), Some(&json!(2)));
        assert_eq!(merged.get("region"), Some(&json!("eu")));
    }

    #[test]
    fn custom_data_without_caller() {
        assert_eq!(merge_custom_data(None, None), None);
        let overlay = Map::new();
        assert_eq!(merge_custom_data(None, Some(&overlay)), Some(Map::new()));
    }
}
