use std::collections::HashMap;

use slog::error;
use slog::Logger;

use healthpoint_models_status::serialize_status_list;
use healthpoint_models_status::Status;
use healthpoint_models_status::StatusList;

use crate::about::about;
use crate::about::AboutOptions;
use crate::aggregate::aggregate;
use crate::registry::find_status_endpoint;
use crate::traverse::traverse;
use crate::traverse::ACTION_ABOUT;
use crate::StatusEndpoint;

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Status query decoded from a request sub-path token and its parameters.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Query {
    About,
    Aggregate {
        type_filter: String,
    },
    AmIUp,
    Traverse {
        action: String,
        dependencies: Vec<String>,
    },
    /// Status of a single endpoint looked up by slug.
    Endpoint {
        slug: String,
        path: String,
    },
}

impl Query {
    /// Decode a query from the sub-path `token`, query `params` and full request `path`.
    pub fn from_request<S: Into<String>>(
        token: &str,
        params: &HashMap<String, String>,
        path: S,
    ) -> Query {
        match token {
            "about" => Query::About,
            "aggregate" => Query::Aggregate {
                type_filter: query_param(params, "type").to_string(),
            },
            "am-i-up" => Query::AmIUp,
            "traverse" => {
                let action = match query_param(params, "action") {
                    "" => ACTION_ABOUT,
                    action => action,
                };
                let dependencies = match query_param(params, "dependencies") {
                    "" => Vec::new(),
                    dependencies => dependencies.split(',').map(String::from).collect(),
                };
                Query::Traverse {
                    action: action.to_string(),
                    dependencies,
                }
            }
            slug => Query::Endpoint {
                slug: slug.to_string(),
                path: path.into(),
            },
        }
    }
}

fn query_param<'a>(params: &'a HashMap<String, String>, name: &str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or("")
}

/// Protocol independent response to a status `Query`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct HealthResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HealthResponse {
    pub fn json<S: Into<String>>(status: u16, body: S) -> HealthResponse {
        HealthResponse {
            status,
            content_type: CONTENT_TYPE_JSON,
            body: body.into(),
        }
    }

    pub fn text<S: Into<String>>(status: u16, body: S) -> HealthResponse {
        HealthResponse {
            status,
            content_type: CONTENT_TYPE_TEXT,
            body: body.into(),
        }
    }
}

/// Run the status check of a single endpoint and encode its result.
pub async fn execute_status_check(endpoint: &StatusEndpoint) -> String {
    let list = endpoint.status_check.check_status(&endpoint.name).await;
    serialize_status_list(&list)
}

/// Answer a status `Query` against the given endpoints.
pub async fn dispatch(
    endpoints: &[StatusEndpoint],
    query: Query,
    options: &AboutOptions,
    logger: &Logger,
) -> HealthResponse {
    match query {
        Query::About => HealthResponse::json(200, about(endpoints, options, logger).await),
        Query::Aggregate { type_filter } => match aggregate(endpoints, &type_filter, logger).await {
            Ok(body) => HealthResponse::json(200, body),
            Err(fault) => {
                error!(logger, "Aggregate status check failed"; "error" => %fault);
                let status = Status::critical("Aggregate failed", fault.to_string());
                HealthResponse::json(500, serialize_status_list(&StatusList::from(status)))
            }
        },
        Query::AmIUp => HealthResponse::text(200, "OK"),
        Query::Traverse {
            action,
            dependencies,
        } => {
            let body = traverse(endpoints, &dependencies, &action, options, logger).await;
            HealthResponse::json(200, body)
        }
        Query::Endpoint { slug, path } => match find_status_endpoint(endpoints, &slug) {
            Some(endpoint) => HealthResponse::json(200, execute_status_check(endpoint).await),
            None => {
                let status = Status::critical(
                    "Unknown Status endpoint",
                    format!("Status endpoint does not exist: {}", path),
                );
                HealthResponse::json(404, serialize_status_list(&StatusList::from(status)))
            }
        },
    }
}
