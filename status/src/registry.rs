use std::fmt;
use std::sync::Arc;

use crate::checks::StatusCheck;
use crate::checks::TraverseCheck;
use crate::Error;
use crate::Result;

/// Dependency type for checks internal to the service.
///
/// Any other type is considered external.
pub const TYPE_INTERNAL: &str = "internal";

/// Conventional type for checks of external dependencies.
pub const TYPE_EXTERNAL: &str = "external";

/// A named, independently checkable dependency of the service.
///
/// Endpoints are created when the service is wired together and never change
/// afterwards, checks are shared behind `Arc`s so endpoints are cheap to clone
/// into registry subsets.
#[derive(Clone)]
pub struct StatusEndpoint {
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub is_traversable: bool,
    pub status_check: Arc<dyn StatusCheck>,
    pub traverse_check: Option<Arc<dyn TraverseCheck>>,
}

impl StatusEndpoint {
    /// Create a non-traversable endpoint.
    pub fn new<S1, S2, S3, C>(name: S1, slug: S2, kind: S3, status_check: C) -> StatusEndpoint
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        C: StatusCheck + 'static,
    {
        StatusEndpoint {
            name: name.into(),
            slug: slug.into(),
            kind: kind.into(),
            is_traversable: false,
            status_check: Arc::new(status_check),
            traverse_check: None,
        }
    }

    /// Attach a traversal capability and mark the endpoint as traversable.
    pub fn with_traverse_check<C>(mut self, traverse_check: C) -> StatusEndpoint
    where
        C: TraverseCheck + 'static,
    {
        self.traverse_check = Some(Arc::new(traverse_check));
        self.is_traversable = true;
        self
    }

    /// Override the traversable flag independently of the attached capability.
    pub fn traversable(mut self, is_traversable: bool) -> StatusEndpoint {
        self.is_traversable = is_traversable;
        self
    }

    pub fn is_internal(&self) -> bool {
        self.kind == TYPE_INTERNAL
    }
}

impl fmt::Debug for StatusEndpoint {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("StatusEndpoint")
            .field("name", &self.name)
            .field("slug", &self.slug)
            .field("kind", &self.kind)
            .field("is_traversable", &self.is_traversable)
            .field("traverse_check", &self.traverse_check.is_some())
            .finish()
    }
}

/// Find the endpoint registered with `slug`, if any.
///
/// The empty slug never matches.
pub fn find_status_endpoint<'a>(
    endpoints: &'a [StatusEndpoint],
    slug: &str,
) -> Option<&'a StatusEndpoint> {
    if slug.is_empty() {
        return None;
    }
    endpoints.iter().find(|endpoint| endpoint.slug == slug)
}

/// Ordered collection of status endpoints with unique slugs.
///
/// Registration order is preserved and is the order dependencies are reported in.
#[derive(Clone, Debug, Default)]
pub struct StatusRegistry {
    endpoints: Vec<StatusEndpoint>,
}

impl StatusRegistry {
    pub fn new() -> StatusRegistry {
        StatusRegistry::default()
    }

    /// Build a registry from a list of endpoints, rejecting duplicate slugs.
    pub fn with_endpoints<I>(endpoints: I) -> Result<StatusRegistry>
    where
        I: IntoIterator<Item = StatusEndpoint>,
    {
        let mut registry = StatusRegistry::new();
        for endpoint in endpoints {
            registry.register(endpoint)?;
        }
        Ok(registry)
    }

    /// Append an endpoint to the registry.
    pub fn register(&mut self, endpoint: StatusEndpoint) -> Result<()> {
        if self.find(&endpoint.slug).is_some() {
            return Err(Error::DuplicateSlug(endpoint.slug));
        }
        self.endpoints.push(endpoint);
        Ok(())
    }

    pub fn find(&self, slug: &str) -> Option<&StatusEndpoint> {
        find_status_endpoint(&self.endpoints, slug)
    }

    pub fn endpoints(&self) -> &[StatusEndpoint] {
        &self.endpoints
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }
}
