use futures::future::ready;
use futures::future::BoxFuture;
use futures::FutureExt;

use healthpoint_models_status::Severity;
use healthpoint_models_status::Status;
use healthpoint_models_status::StatusList;

use crate::Error;
use crate::Result;

mod http;

pub use self::http::HttpStatusCheck;
pub use self::http::HttpTraverseCheck;

/// Capability to check the status of a dependency.
///
/// Implementations must return a non-empty `StatusList`: only the first status
/// is ever consulted. No timeout is applied to the returned future, a check
/// that never completes stalls every query that includes it.
pub trait StatusCheck: Send + Sync {
    fn check_status<'a>(&'a self, name: &'a str) -> BoxFuture<'a, StatusList>;
}

/// Capability to forward a status query to the next hop of a traversal.
///
/// `path` is the remaining list of slugs after the hop this capability is
/// attached to. A successful payload is returned to the caller verbatim.
pub trait TraverseCheck: Send + Sync {
    fn traverse<'a>(&'a self, path: &'a [String], action: &'a str)
        -> BoxFuture<'a, Result<String>>;
}

/// Status check that always reports the dependency as healthy.
#[derive(Clone, Copy, Debug, Default)]
pub struct OkStatusCheck;

impl StatusCheck for OkStatusCheck {
    fn check_status<'a>(&'a self, name: &'a str) -> BoxFuture<'a, StatusList> {
        ready(StatusList::from(Status::ok(name))).boxed()
    }
}

/// Status check that always reports the same severity and details.
#[derive(Clone, Debug)]
pub struct StaticStatusCheck {
    details: String,
    severity: Severity,
}

impl StaticStatusCheck {
    pub fn new<S: Into<String>>(severity: Severity, details: S) -> StaticStatusCheck {
        StaticStatusCheck {
            details: details.into(),
            severity,
        }
    }
}

impl StatusCheck for StaticStatusCheck {
    fn check_status<'a>(&'a self, name: &'a str) -> BoxFuture<'a, StatusList> {
        let status = Status::new(name, self.severity, self.details.clone());
        ready(StatusList::from(status)).boxed()
    }
}

/// Traversal capability that returns a fixed payload or fails with a fixed message.
#[derive(Clone, Debug)]
pub enum StaticTraverseCheck {
    Payload(String),
    Failure(String),
}

impl StaticTraverseCheck {
    pub fn payload<S: Into<String>>(payload: S) -> StaticTraverseCheck {
        StaticTraverseCheck::Payload(payload.into())
    }

    pub fn failure<S: Into<String>>(message: S) -> StaticTraverseCheck {
        StaticTraverseCheck::Failure(message.into())
    }
}

impl TraverseCheck for StaticTraverseCheck {
    fn traverse<'a>(
        &'a self,
        _path: &'a [String],
        _action: &'a str,
    ) -> BoxFuture<'a, Result<String>> {
        let result = match self {
            StaticTraverseCheck::Payload(payload) => Ok(payload.clone()),
            StaticTraverseCheck::Failure(message) => Err(Error::traverse(message.clone())),
        };
        ready(result).boxed()
    }
}
