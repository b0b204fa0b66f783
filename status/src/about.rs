use std::path::PathBuf;
use std::time::Instant;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use serde_json::Map;
use serde_json::Value as Json;
use slog::debug;
use slog::error;
use slog::Logger;

use healthpoint_models_status::serialize_status_list;
use healthpoint_models_status::translate_status_list;
use healthpoint_models_status::AboutResponse;
use healthpoint_models_status::Dependency;
use healthpoint_models_status::Status;
use healthpoint_models_status::StatusList;

use crate::metadata::load_version;
use crate::metadata::merge_custom_data;
use crate::metadata::resolve_host;
use crate::metadata::AboutMetadata;
use crate::Config;
use crate::StatusEndpoint;

/// Parameters of an About report that do not come from the endpoints.
#[derive(Clone, PartialEq, Debug)]
pub struct AboutOptions {
    pub protocol: String,
    pub about_file: PathBuf,
    pub version_file: PathBuf,
    pub custom_data: Option<Map<String, Json>>,
}

impl AboutOptions {
    pub fn new<S, P1, P2>(protocol: S, about_file: P1, version_file: P2) -> AboutOptions
    where
        S: Into<String>,
        P1: Into<PathBuf>,
        P2: Into<PathBuf>,
    {
        AboutOptions {
            protocol: protocol.into(),
            about_file: about_file.into(),
            version_file: version_file.into(),
            custom_data: None,
        }
    }

    /// Set custom data to merge over the about file custom data.
    pub fn custom_data(mut self, custom_data: Map<String, Json>) -> AboutOptions {
        self.custom_data = Some(custom_data);
        self
    }
}

impl From<Config> for AboutOptions {
    fn from(config: Config) -> AboutOptions {
        AboutOptions {
            protocol: config.protocol,
            about_file: config.about_file,
            version_file: config.version_file,
            custom_data: config.custom_data,
        }
    }
}

/// Check all given endpoints concurrently and report them in input order.
///
/// Each check is timed individually and the call completes only once every
/// check has reported back.
pub async fn collect_dependencies(endpoints: &[StatusEndpoint]) -> Vec<Dependency> {
    let mut pending: FuturesUnordered<_> = endpoints
        .iter()
        .enumerate()
        .map(|(position, endpoint)| async move {
            let start = Instant::now();
            let status = endpoint.status_check.check_status(&endpoint.name).await;
            let status_duration = start.elapsed().as_secs_f64();
            let dependency = Dependency {
                name: endpoint.name.clone(),
                status: translate_status_list(&status),
                status_duration,
                status_path: endpoint.slug.clone(),
                kind: endpoint.kind.clone(),
                is_traversable: endpoint.is_traversable,
            };
            (position, dependency)
        })
        .collect();

    // Completion order is arbitrary: slot each result back into its input position.
    let mut slots: Vec<Option<Dependency>> = endpoints.iter().map(|_| None).collect();
    while let Some((position, dependency)) = pending.next().await {
        slots[position] = Some(dependency);
    }
    slots.into_iter().flatten().collect()
}

/// Build the About report for the service.
pub async fn about_response(
    endpoints: &[StatusEndpoint],
    options: &AboutOptions,
    logger: &Logger,
) -> AboutResponse {
    let metadata = AboutMetadata::load(&options.about_file, logger).await;
    let custom_data = merge_custom_data(metadata.custom_data, options.custom_data.as_ref());
    let version = load_version(&options.version_file, logger).await;
    let host = resolve_host(logger);
    let dependencies = collect_dependencies(endpoints).await;
    debug!(logger, "Collected dependency statuses"; "dependencies" => dependencies.len());
    AboutResponse {
        id: metadata.id,
        name: metadata.name,
        description: metadata.description,
        protocol: options.protocol.clone(),
        owners: metadata.owners,
        version,
        host,
        project_repo: metadata.project_repo,
        project_home: metadata.project_home,
        logs_links: metadata.logs_links,
        stats_links: metadata.stats_links,
        dependencies,
        custom_data,
    }
}

/// Report service metadata and the status of every given endpoint as JSON.
///
/// If the report can't be serialised a `CRIT` status encoding is returned instead.
pub async fn about(endpoints: &[StatusEndpoint], options: &AboutOptions, logger: &Logger) -> String {
    let response = about_response(endpoints, options, logger).await;
    match serde_json::to_string(&response) {
        Ok(text) => text,
        Err(error) => {
            error!(logger, "Unable to serialise about response"; "error" => %error);
            let status = Status::critical(
                "Invalid AboutResponse",
                format!("Error serializing AboutResponse: {}", error),
            );
            serialize_status_list(&StatusList::from(status))
        }
    }
}
