use healthpoint_status::checks::HttpStatusCheck;
use healthpoint_status::checks::HttpTraverseCheck;
use healthpoint_status::StatusEndpoint;
use healthpoint_status::StatusRegistry;
use healthpoint_status::TYPE_EXTERNAL;
use healthpoint_status::TYPE_INTERNAL;

use crate::config::DependencyConfig;
use crate::Error;
use crate::Result;

/// Build the status endpoint for a remote healthpoint.
///
/// The status check queries the remote `aggregate` resource and, for
/// traversable dependencies, traversals are forwarded to the remote.
pub fn endpoint(dependency: &DependencyConfig) -> Result<StatusEndpoint> {
    if dependency.kind != TYPE_INTERNAL && dependency.kind != TYPE_EXTERNAL {
        return Err(Error::DependencyType {
            slug: dependency.slug.clone(),
            kind: dependency.kind.clone(),
        });
    }
    let base_url = dependency.url.trim_end_matches('/');
    let check = HttpStatusCheck::new(format!("{}/aggregate", base_url));
    let endpoint = StatusEndpoint::new(
        dependency.name.as_str(),
        dependency.slug.as_str(),
        dependency.kind.as_str(),
        check,
    );
    if dependency.traversable {
        return Ok(endpoint.with_traverse_check(HttpTraverseCheck::new(base_url)));
    }
    Ok(endpoint)
}

/// Build the registry of configured dependencies, in configuration order.
pub fn registry(dependencies: &[DependencyConfig]) -> Result<StatusRegistry> {
    let mut registry = StatusRegistry::new();
    for dependency in dependencies {
        registry.register(endpoint(dependency)?)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use actix_web::dev::ServerHandle;
    use actix_web::web;
    use actix_web::App;
    use actix_web::HttpServer;
    use futures::future::ready;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use slog::o;
    use slog::Discard;
    use slog::Logger;

    use healthpoint_models_status::AboutResponse;
    use healthpoint_models_status::Severity;
    use healthpoint_models_status::StatusList;
    use healthpoint_status::checks::OkStatusCheck;
    use healthpoint_status::checks::StaticStatusCheck;
    use healthpoint_status::checks::StatusCheck;
    use healthpoint_status::AboutOptions;
    use healthpoint_status::HealthPoint;
    use healthpoint_status::StatusEndpoint;
    use healthpoint_status::StatusRegistry;
    use healthpoint_status::TYPE_INTERNAL;
    use healthpoint_util_actixweb::configure;

    use super::registry;
    use crate::config::DependencyConfig;
    use crate::Error;

    fn dependency(slug: &str, kind: &str, url: &str, traversable: bool) -> DependencyConfig {
        DependencyConfig {
            name: slug.to_uppercase(),
            slug: slug.into(),
            kind: kind.into(),
            url: url.into(),
            traversable,
        }
    }

    fn options(protocol: &str) -> AboutOptions {
        AboutOptions::new(protocol, "/does/not/exist.json", "/does/not/exist.txt")
    }

    /// Status check violating the non-empty `StatusList` contract.
    struct EmptyCheck;

    impl StatusCheck for EmptyCheck {
        fn check_status<'a>(&'a self, _name: &'a str) -> BoxFuture<'a, StatusList> {
            ready(StatusList::default()).boxed()
        }
    }

    /// Start a healthpoint server on a random local port.
    fn start_remote() -> (SocketAddr, ServerHandle) {
        let registry = StatusRegistry::with_endpoints(vec![
            StatusEndpoint::new("Disk", "disk", TYPE_INTERNAL, OkStatusCheck),
            StatusEndpoint::new(
                "Index",
                "index",
                TYPE_INTERNAL,
                StaticStatusCheck::new(Severity::Warning, "rebuilding"),
            ),
        ])
        .unwrap();
        start_server(registry)
    }

    fn start_server(registry: StatusRegistry) -> (SocketAddr, ServerHandle) {
        let logger = Logger::root(Discard, o!());
        let healthpoint = web::Data::new(HealthPoint::with_options(
            registry,
            options("remote"),
            logger,
        ));
        let server = HttpServer::new(move || {
            App::new()
                .app_data(healthpoint.clone())
                .configure(configure)
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        (addr, handle)
    }

    #[test]
    fn registry_in_order() {
        let registry = registry(&[
            dependency("db", "internal", "http://db/status", true),
            dependency("billing", "external", "http://billing/status/", false),
        ])
        .unwrap();
        let slugs: Vec<&str> = registry
            .endpoints()
            .iter()
            .map(|endpoint| endpoint.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["db", "billing"]);
        assert!(registry.endpoints()[0].is_traversable);
        assert!(registry.endpoints()[0].traverse_check.is_some());
        assert!(!registry.endpoints()[1].is_traversable);
        assert!(registry.endpoints()[1].traverse_check.is_none());
    }

    #[test]
    fn unknown_type_rejected() {
        let result = registry(&[dependency("db", "sideways", "http://db/status", false)]);
        assert!(matches!(result, Err(Error::DependencyType { .. })));
    }

    #[test]
    fn duplicate_slug_rejected() {
        let result = registry(&[
            dependency("db", "internal", "http://db/status", false),
            dependency("db", "external", "http://other/status", false),
        ]);
        assert!(matches!(
            result,
            Err(Error::Registry(healthpoint_status::Error::DuplicateSlug(_)))
        ));
    }

    #[actix_rt::test]
    async fn check_and_traverse_remote() {
        let (addr, handle) = start_remote();
        let url = format!("http://{}/status", addr);
        let registry = registry(&[dependency("search", "external", &url, true)]).unwrap();
        let local = HealthPoint::with_options(registry, options("local"), Logger::root(Discard, o!()));

        let aggregate = local.aggregate("").await.unwrap();
        assert_eq!(
            aggregate,
            r#"["WARN",{"description":"Index","result":"WARN","details":"rebuilding"}]"#
        );

        let body = local.traverse(&["search".to_string()], "about").await;
        let about: AboutResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(about.protocol, "remote");
        assert_eq!(about.dependencies.len(), 2);

        let path = vec!["search".to_string(), "disk".to_string()];
        let body = local.traverse(&path, "").await;
        assert_eq!(
            body,
            r#"["CRIT",{"description":"Can't traverse","result":"CRIT","details":"DISK is not traversable"}]"#
        );
        handle.stop(true).await;
    }

    #[actix_rt::test]
    async fn remote_fault_details_are_kept() {
        let remote = StatusRegistry::with_endpoints(vec![StatusEndpoint::new(
            "Broken",
            "broken",
            TYPE_INTERNAL,
            EmptyCheck,
        )])
        .unwrap();
        let (addr, handle) = start_server(remote);
        let url = format!("http://{}/status", addr);
        let registry = registry(&[dependency("flaky", "external", &url, false)]).unwrap();
        let local = HealthPoint::with_options(registry, options("local"), Logger::root(Discard, o!()));

        let aggregate = local.aggregate("").await.unwrap();
        assert_eq!(
            aggregate,
            r#"["CRIT",{"description":"Aggregate failed","result":"CRIT","details":"status endpoint 'Broken' returned an empty status list"}]"#
        );
        handle.stop(true).await;
    }

    #[actix_rt::test]
    async fn remote_error_without_status_body() {
        let (addr, handle) = start_remote();
        let url = format!("http://{}/missing", addr);
        let registry = registry(&[dependency("lost", "external", &url, false)]).unwrap();
        let local = HealthPoint::with_options(registry, options("local"), Logger::root(Discard, o!()));

        let aggregate = local.aggregate("").await.unwrap();
        let expected = format!(
            r#"["CRIT",{{"description":"LOST","result":"CRIT","details":"LOST check failed: request to 'http://{}/missing/aggregate' returned HTTP 404"}}]"#,
            addr
        );
        assert_eq!(aggregate, expected);
        handle.stop(true).await;
    }

    #[actix_rt::test]
    async fn unreachable_remote() {
        let registry = registry(&[dependency("gone", "internal", "http://127.0.0.1:1/status", true)])
            .unwrap();
        let local = HealthPoint::with_options(registry, options("local"), Logger::root(Discard, o!()));

        let aggregate = local.aggregate("").await.unwrap();
        assert!(aggregate.starts_with(r#"["CRIT",{"description":"GONE","result":"CRIT","details":"GONE check failed: "#));

        let body = local.traverse(&["gone".to_string()], "").await;
        assert!(body.starts_with(r#"["CRIT",{"description":"Traverse","result":"CRIT","details":"request to 'http://127.0.0.1:1/status/traverse' failed"#));
    }
}
