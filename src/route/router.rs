// ABOUTME: Registers template routes on an axum Router and dispatches requests to them
// ABOUTME: Also runs the router on a TCP listener with graceful shutdown

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{on, MethodFilter};
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::binding::TemplateRoute;
use super::error::{Result, RouteError};
use super::request::{RouteRequest, RouteResponse};

/// Collects template routes and turns them into an axum [`Router`].
#[derive(Default)]
pub struct TemplateRouter {
    router: Router,
    paths: Vec<(Method, String)>,
}

impl TemplateRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<R: TemplateRoute>(self, route: R) -> Result<Self> {
        self.register(Method::GET, MethodFilter::GET, route)
    }

    pub fn post<R: TemplateRoute>(self, route: R) -> Result<Self> {
        self.register(Method::POST, MethodFilter::POST, route)
    }

    pub fn put<R: TemplateRoute>(self, route: R) -> Result<Self> {
        self.register(Method::PUT, MethodFilter::PUT, route)
    }

    pub fn delete<R: TemplateRoute>(self, route: R) -> Result<Self> {
        self.register(Method::DELETE, MethodFilter::DELETE, route)
    }

    fn register<R: TemplateRoute>(
        mut self,
        method: Method,
        filter: MethodFilter,
        route: R,
    ) -> Result<Self> {
        let route = Arc::new(route);
        let path = route.path().to_string();
        self.check_conflicts(&method, &path)?;
        debug!("Registering {} {}", method, path);

        let handler = move |params: Option<Path<HashMap<String, String>>>,
                            Query(query): Query<HashMap<String, String>>,
                            method: Method,
                            uri: Uri,
                            headers: HeaderMap| {
            let route = Arc::clone(&route);
            async move {
                let params = params.map(|Path(p)| p).unwrap_or_default();
                let request = RouteRequest::new(method, uri, headers, params, query);
                dispatch(&*route, &request)
            }
        };

        self.router = self.router.route(&path, on(filter, handler));
        self.paths.push((method, path));
        Ok(self)
    }

    /// Reject registrations the axum router would panic on
    fn check_conflicts(&self, method: &Method, path: &str) -> Result<()> {
        for (existing_method, existing) in &self.paths {
            let clash = if existing == path {
                existing_method == method
            } else {
                segments_clash(existing, path)
            };

            if clash {
                return Err(RouteError::Conflict {
                    path: format!("{} {}", method, path),
                    existing: format!("{} {}", existing_method, existing),
                });
            }
        }
        Ok(())
    }

    /// Registered (method, path) pairs in registration order
    pub fn routes(&self) -> &[(Method, String)] {
        &self.paths
    }

    /// Finish registration and get the axum router with request tracing
    pub fn into_router(self) -> Router {
        self.router.layer(TraceLayer::new_for_http())
    }

    /// Serve the routes until ctrl-c or SIGTERM
    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        info!("Listening on http://{}", listener.local_addr()?);

        for (method, path) in &self.paths {
            info!("  {} {}", method, path);
        }

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Run a route's handler and turn its outcome into an HTTP response.
pub fn dispatch<R: TemplateRoute + ?Sized>(route: &R, request: &RouteRequest) -> Response {
    let mut response = RouteResponse::new();
    match route.handle(request, &mut response) {
        Ok(body) => response.into_response_with(body),
        Err(err) => err.into_response(),
    }
}

#[derive(PartialEq)]
enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
    Wildcard(&'a str),
}

fn segment(raw: &str) -> Segment<'_> {
    if let Some(name) = raw.strip_prefix(':') {
        Segment::Param(name)
    } else if let Some(name) = raw.strip_prefix('*') {
        Segment::Wildcard(name)
    } else {
        Segment::Literal(raw)
    }
}

/// Two distinct paths clash when, before they diverge on a literal, the same
/// position holds captures with different names or kinds, or a wildcard
/// sits opposite a literal.
fn segments_clash(a: &str, b: &str) -> bool {
    for (left, right) in a.split('/').zip(b.split('/')) {
        match (segment(left), segment(right)) {
            (Segment::Literal(x), Segment::Literal(y)) => {
                if x != y {
                    return false;
                }
            }
            (Segment::Literal(_), Segment::Param(_)) | (Segment::Param(_), Segment::Literal(_)) => {
                return false
            }
            (x, y) => {
                if x != y {
                    return true;
                }
            }
        }
    }
    false
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RouteBinding, RouteError, RouteResult};
    use crate::template::{HandlebarsEngine, TemplateExt};
    use axum::http::StatusCode;

    struct Fixed {
        binding: RouteBinding<HandlebarsEngine>,
        name: &'static str,
    }

    impl TemplateRoute for Fixed {
        type Engine = HandlebarsEngine;

        fn binding(&self) -> &RouteBinding<HandlebarsEngine> {
            &self.binding
        }

        fn handle(&self, _: &RouteRequest, _: &mut RouteResponse) -> RouteResult<String> {
            if self.name == "gone" {
                return Err(RouteError::NotFound("Page".to_string()));
            }
            Ok(self.template(self.name)?.render_empty()?)
        }
    }

    fn fixed(path: &str, name: &'static str) -> Fixed {
        let engine = HandlebarsEngine::default()
            .with_template("static", "static body")
            .unwrap();
        Fixed {
            binding: RouteBinding::new(path, Arc::new(engine)).unwrap(),
            name,
        }
    }

    fn request() -> RouteRequest {
        RouteRequest::new(
            Method::GET,
            Uri::from_static("/"),
            HeaderMap::new(),
            HashMap::new(),
            HashMap::new(),
        )
    }

    #[test]
    fn test_dispatch_success() {
        let response = dispatch(&fixed("/", "static"), &request());
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_dispatch_unknown_template_is_server_error() {
        let response = dispatch(&fixed("/", "missing"), &request());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_dispatch_handler_not_found() {
        let response = dispatch(&fixed("/", "gone"), &request());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_routes_recorded() {
        let router = TemplateRouter::new()
            .get(fixed("/a", "static"))
            .unwrap()
            .post(fixed("/b", "static"))
            .unwrap();

        assert_eq!(
            router.routes(),
            &[
                (Method::GET, "/a".to_string()),
                (Method::POST, "/b".to_string())
            ]
        );
    }

    #[test]
    fn test_same_path_different_methods() {
        let router = TemplateRouter::new()
            .get(fixed("/items", "static"))
            .unwrap()
            .post(fixed("/items", "static"))
            .unwrap();
        assert_eq!(router.routes().len(), 2);
    }

    #[test]
    fn test_duplicate_method_and_path_rejected() {
        let err = TemplateRouter::new()
            .get(fixed("/a", "static"))
            .unwrap()
            .get(fixed("/a", "static"))
            .err()
            .unwrap();
        assert!(matches!(err, RouteError::Conflict { .. }));
        assert_eq!(err.to_string(), "Route 'GET /a' conflicts with 'GET /a'");
    }

    #[test]
    fn test_parameter_name_clash_rejected() {
        let err = TemplateRouter::new()
            .get(fixed("/hello/:name", "static"))
            .unwrap()
            .get(fixed("/hello/:id", "static"))
            .err()
            .unwrap();
        assert!(matches!(err, RouteError::Conflict { .. }));

        let err = TemplateRouter::new()
            .get(fixed("/files/:id", "static"))
            .unwrap()
            .post(fixed("/files/*path", "static"))
            .err()
            .unwrap();
        assert!(matches!(err, RouteError::Conflict { .. }));
    }

    #[test]
    fn test_compatible_paths_accepted() {
        let router = TemplateRouter::new()
            .get(fixed("/hello/:name", "static"))
            .unwrap()
            .get(fixed("/hello/:name/edit", "static"))
            .unwrap()
            .get(fixed("/users/:id", "static"))
            .unwrap()
            .get(fixed("/users/new", "static"))
            .unwrap()
            .get(fixed("/other/:id", "static"))
            .unwrap();
        assert_eq!(router.routes().len(), 5);
        let _ = router.into_router();
    }

    #[test]
    fn test_segments_clash() {
        assert!(segments_clash("/hello/:name", "/hello/:id"));
        assert!(segments_clash("/files/*rest", "/files/index"));
        assert!(!segments_clash("/hello/:name", "/bye/:id"));
        assert!(!segments_clash("/a", "/a/"));
    }
}
