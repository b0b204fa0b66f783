use futures::future::BoxFuture;
use futures::FutureExt;
use slog::Logger;

use crate::about::about;
use crate::about::AboutOptions;
use crate::aggregate::aggregate;
use crate::checks::TraverseCheck;
use crate::dispatch::dispatch;
use crate::dispatch::execute_status_check;
use crate::dispatch::HealthResponse;
use crate::dispatch::Query;
use crate::traverse::traverse;
use crate::Config;
use crate::Result;
use crate::StatusRegistry;

/// Health reporting context of a service.
///
/// Bundles the registry of dependencies with the parameters needed to answer
/// status queries about them. All state is read-only so a single instance can
/// serve concurrent queries.
///
/// A `HealthPoint` is itself a `TraverseCheck`: attaching one service's
/// `HealthPoint` to an endpoint of another chains traversals across both.
pub struct HealthPoint {
    logger: Logger,
    options: AboutOptions,
    registry: StatusRegistry,
}

impl HealthPoint {
    pub fn new(registry: StatusRegistry, config: Config, logger: Logger) -> HealthPoint {
        HealthPoint::with_options(registry, AboutOptions::from(config), logger)
    }

    pub fn with_options(
        registry: StatusRegistry,
        options: AboutOptions,
        logger: Logger,
    ) -> HealthPoint {
        HealthPoint {
            logger,
            options,
            registry,
        }
    }

    pub fn registry(&self) -> &StatusRegistry {
        &self.registry
    }

    pub async fn about(&self) -> String {
        about(self.registry.endpoints(), &self.options, &self.logger).await
    }

    pub async fn aggregate(&self, type_filter: &str) -> Result<String> {
        aggregate(self.registry.endpoints(), type_filter, &self.logger).await
    }

    pub async fn traverse(&self, path: &[String], action: &str) -> String {
        traverse(
            self.registry.endpoints(),
            path,
            action,
            &self.options,
            &self.logger,
        )
        .await
    }

    /// Encoded status of the endpoint registered with `slug`, if any.
    pub async fn status(&self, slug: &str) -> Option<String> {
        match self.registry.find(slug) {
            Some(endpoint) => Some(execute_status_check(endpoint).await),
            None => None,
        }
    }

    pub async fn dispatch(&self, query: Query) -> HealthResponse {
        dispatch(
            self.registry.endpoints(),
            query,
            &self.options,
            &self.logger,
        )
        .await
    }
}

impl TraverseCheck for HealthPoint {
    fn traverse<'a>(
        &'a self,
        path: &'a [String],
        action: &'a str,
    ) -> BoxFuture<'a, Result<String>> {
        async move { Ok(HealthPoint::traverse(self, path, action).await) }.boxed()
    }
}
