use std::fmt;
use std::str::FromStr;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use slog::debug;
use slog::Logger;

use healthpoint_models_status::serialize_status_list;
use healthpoint_models_status::Severity;
use healthpoint_models_status::Status;
use healthpoint_models_status::StatusList;

use crate::Error;
use crate::Result;
use crate::StatusEndpoint;

/// Selection of endpoints included in an aggregate check.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum TypeFilter {
    /// All endpoints.
    All,

    /// Endpoints with type `internal`.
    Internal,

    /// Every endpoint that is not `internal`, whatever its type.
    External,
}

impl TypeFilter {
    pub fn matches(self, endpoint: &StatusEndpoint) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Internal => endpoint.is_internal(),
            TypeFilter::External => !endpoint.is_internal(),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;
    fn from_str(filter: &str) -> std::result::Result<Self, Self::Err> {
        match filter {
            "" => Ok(TypeFilter::All),
            "internal" => Ok(TypeFilter::Internal),
            "external" => Ok(TypeFilter::External),
            filter => Err(filter.to_string()),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeFilter::All => fmt.write_str(""),
            TypeFilter::Internal => fmt.write_str("internal"),
            TypeFilter::External => fmt.write_str("external"),
        }
    }
}

/// Statuses bucketed by severity in the order checks completed.
#[derive(Default)]
struct Buckets {
    critical: Vec<Status>,
    warning: Vec<Status>,
    ok: Vec<Status>,
}

impl Buckets {
    fn push(&mut self, status: Status) {
        match status.result {
            Severity::Critical => self.critical.push(status),
            Severity::Warning => self.warning.push(status),
            Severity::Ok => self.ok.push(status),
        }
    }

    /// First status of the most severe non-empty bucket.
    fn resolve(mut self) -> Status {
        if !self.critical.is_empty() {
            return self.critical.swap_remove(0);
        }
        if !self.warning.is_empty() {
            return self.warning.swap_remove(0);
        }
        Status::ok("Aggregate Check")
    }
}

/// Run the status check of every endpoint selected by `type_filter` and
/// report the most severe result.
///
/// Among results of equal severity the first one to complete wins.
///
/// Invalid filters are reported as a `CRIT` status without running any check.
/// A check returning an empty `StatusList` is a fault in that check: the
/// aggregate fails with `Error::EmptyStatusList` once every check has completed.
pub async fn aggregate(
    endpoints: &[StatusEndpoint],
    type_filter: &str,
    logger: &Logger,
) -> Result<String> {
    let filter: TypeFilter = match type_filter.parse() {
        Ok(filter) => filter,
        Err(_) => {
            let status = Status::critical(
                "Invalid type",
                "Unknown check type given for aggregate check",
            );
            return Ok(serialize_status_list(&StatusList::from(status)));
        }
    };

    let mut pending: FuturesUnordered<_> = endpoints
        .iter()
        .filter(|endpoint| filter.matches(endpoint))
        .map(|endpoint| async move {
            let list = endpoint.status_check.check_status(&endpoint.name).await;
            (endpoint, list)
        })
        .collect();

    let mut buckets = Buckets::default();
    let mut fault = None;
    while let Some((endpoint, list)) = pending.next().await {
        match list.first() {
            Some(status) => buckets.push(status.clone()),
            None if fault.is_none() => fault = Some(Error::EmptyStatusList(endpoint.name.clone())),
            None => (),
        }
    }
    if let Some(fault) = fault {
        return Err(fault);
    }

    debug!(
        logger, "Aggregated dependency statuses";
        "filter" => %filter,
        "critical" => buckets.critical.len(),
        "warning" => buckets.warning.len(),
        "ok" => buckets.ok.len(),
    );
    let status = buckets.resolve();
    Ok(serialize_status_list(&StatusList::from(status)))
}
