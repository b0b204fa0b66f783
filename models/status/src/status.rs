use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Severity;

/// Result of a single status check.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Status {
    pub description: String,
    pub result: Severity,
    pub details: String,
}

impl Status {
    pub fn new<S1, S2>(description: S1, result: Severity, details: S2) -> Status
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Status {
            description: description.into(),
            result,
            details: details.into(),
        }
    }

    /// Healthy status with no details.
    pub fn ok<S: Into<String>>(description: S) -> Status {
        Status::new(description, Severity::Ok, "")
    }

    pub fn warning<S1, S2>(description: S1, details: S2) -> Status
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Status::new(description, Severity::Warning, details)
    }

    pub fn critical<S1, S2>(description: S1, details: S2) -> Status
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Status::new(description, Severity::Critical, details)
    }
}

/// Sequence of statuses returned by a status check.
///
/// Only the first status in the list is ever consulted: checks that want to
/// signal a single outcome return a one-element list and any other element
/// is ignored by encoding and aggregation alike.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StatusList(Vec<Status>);

impl StatusList {
    pub fn new(statuses: Vec<Status>) -> StatusList {
        StatusList(statuses)
    }

    /// The status consulted by every consumer of the list.
    pub fn first(&self) -> Option<&Status> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn statuses(&self) -> &[Status] {
        &self.0
    }
}

impl From<Status> for StatusList {
    fn from(status: Status) -> StatusList {
        StatusList(vec![status])
    }
}

impl From<Vec<Status>> for StatusList {
    fn from(statuses: Vec<Status>) -> StatusList {
        StatusList(statuses)
    }
}
