use slog::debug;
use slog::warn;
use slog::Logger;

use healthpoint_models_status::serialize_status_list;
use healthpoint_models_status::Status;
use healthpoint_models_status::StatusList;

use crate::about::about;
use crate::about::AboutOptions;
use crate::registry::find_status_endpoint;
use crate::StatusEndpoint;

/// Action performed when a traversal reaches its final hop.
pub const ACTION_ABOUT: &str = "about";

fn cant_traverse(details: String) -> String {
    serialize_status_list(&StatusList::from(Status::critical("Can't traverse", details)))
}

/// Forward a status query along `path`, one hop at a time.
///
/// An empty path answers locally with the About report for `endpoints`.
/// Otherwise the first slug selects the endpoint whose traversal capability
/// receives the rest of the path; its payload is returned verbatim.
/// Every failure is reported as a `CRIT` status encoding.
pub async fn traverse(
    endpoints: &[StatusEndpoint],
    path: &[String],
    action: &str,
    options: &AboutOptions,
    logger: &Logger,
) -> String {
    let action = if action.is_empty() {
        ACTION_ABOUT
    } else {
        action
    };

    let (slug, rest) = match path.split_first() {
        Some(hop) => hop,
        None if action == ACTION_ABOUT => return about(endpoints, options, logger).await,
        None => {
            let status = Status::critical(
                "Unsupported action",
                format!("Unsupported traversal action '{}'", action),
            );
            return serialize_status_list(&StatusList::from(status));
        }
    };

    let endpoint = match find_status_endpoint(endpoints, slug) {
        Some(endpoint) => endpoint,
        None => return cant_traverse(format!("Status path '{}' is not registered", slug)),
    };
    if !endpoint.is_traversable {
        return cant_traverse(format!("{} is not traversable", endpoint.name.to_uppercase()));
    }
    let check = match endpoint.traverse_check.as_ref() {
        Some(check) => check,
        None => {
            return cant_traverse(format!(
                "{} does not have a TraverseCheck() function defined",
                endpoint.name.to_uppercase()
            ))
        }
    };

    debug!(
        logger, "Traversing to next hop";
        "slug" => slug, "remaining" => rest.len(), "action" => action,
    );
    match check.traverse(rest, action).await {
        Ok(payload) => payload,
        Err(error) => {
            warn!(logger, "Traversal hop failed"; "slug" => slug, "error" => %error);
            let status = Status::critical("Traverse", error.to_string());
            serialize_status_list(&StatusList::from(status))
        }
    }
}
