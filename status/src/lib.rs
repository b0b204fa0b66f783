//! Status aggregation and traversal engine for service health reporting.
//!
//! Services register the dependencies they rely on in a `StatusRegistry`.
//! Each dependency provides a `StatusCheck` and, optionally, a `TraverseCheck`
//! used to forward queries to the dependency's own health reporting endpoint.
//!
//! A `HealthPoint` bundles the registry with the About options and answers:
//!
//!   * `about`: service metadata plus the current status of every dependency.
//!   * `aggregate`: the single most severe status across the dependencies.
//!   * `traverse`: a query forwarded along a chain of dependencies.
//!   * `dispatch`: any of the above decoded from a request `Query`.
mod about;
mod aggregate;
pub mod checks;
mod config;
mod dispatch;
mod error;
mod healthpoint;
pub mod metadata;
mod registry;
mod traverse;

pub use self::about::about;
pub use self::about::about_response;
pub use self::about::collect_dependencies;
pub use self::about::AboutOptions;
pub use self::aggregate::aggregate;
pub use self::aggregate::TypeFilter;
pub use self::config::Config;
pub use self::dispatch::dispatch;
pub use self::dispatch::execute_status_check;
pub use self::dispatch::HealthResponse;
pub use self::dispatch::Query;
pub use self::dispatch::CONTENT_TYPE_JSON;
pub use self::dispatch::CONTENT_TYPE_TEXT;
pub use self::error::Error;
pub use self::error::Result;
pub use self::healthpoint::HealthPoint;
pub use self::registry::find_status_endpoint;
pub use self::registry::StatusEndpoint;
pub use self::registry::StatusRegistry;
pub use self::registry::TYPE_EXTERNAL;
pub use self::registry::TYPE_INTERNAL;
pub use self::traverse::traverse;
pub use self::traverse::ACTION_ABOUT;
