//! Path routing.
//!
//! Routes are registered as path templates (`/widgets/{id}`) bound to
//! handlers. Lookup walks the routes in registration order and the first
//! template that matches the whole path wins; there is no ranking by
//! specificity, so overlapping templates must be registered in the order
//! they should be tried.
//!
//! ```
//! use hearth::http::request::Request;
//! use hearth::router::{PathParams, Router};
//!
//! async fn welcome(_req: Request, params: PathParams) -> anyhow::Result<String> {
//!     Ok(format!("Welcome {}", params.get("name").unwrap_or_default()))
//! }
//!
//! let mut router = Router::new();
//! router.add_route("/welcome/{name}", welcome).unwrap();
//!
//! let matched = router.get_handler("/welcome/bob").unwrap();
//! assert_eq!(matched.params().get("name"), Some("bob"));
//! ```

pub mod pattern;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

use crate::http::request::Request;
use crate::http::response::HandlerResult;

pub use pattern::{PathParams, PathPattern};

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route {template:?} duplicates already registered route {existing:?}")]
    DuplicateRoute { template: String, existing: String },

    #[error("no route matches {path}")]
    NotFound { path: String },

    #[error("invalid route template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<HandlerResult>> + Send + 'static>>;

/// Application code bound to a route.
///
/// Implemented for every `async fn(Request, PathParams) -> anyhow::Result<R>`
/// where `R` converts into a [`HandlerResult`] (a `Response`, `String`,
/// `&'static str` or `Vec<u8>`).
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request, params: PathParams) -> HandlerFuture;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: Into<HandlerResult> + Send + 'static,
{
    fn call(&self, request: Request, params: PathParams) -> HandlerFuture {
        let fut = (self)(request, params);
        Box::pin(async move { fut.await.map(Into::into) })
    }
}

pub type SharedHandler = Arc<dyn Handler>;

/// Type-erases a handler so differently typed handlers can be registered
/// together with [`Router::add_routes`].
pub fn shared<H: Handler>(handler: H) -> SharedHandler {
    Arc::new(handler)
}

struct Route {
    pattern: PathPattern,
    handler: SharedHandler,
}

/// The route table. Built once at startup, then shared read-only between
/// connections.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `template`.
    ///
    /// Fails with [`RouteError::DuplicateRoute`] if an existing route
    /// compiles to the same pattern; the existing route stays in place.
    pub fn add_route<H: Handler>(&mut self, template: &str, handler: H) -> Result<(), RouteError> {
        self.add_shared_route(template, shared(handler))
    }

    pub fn add_shared_route(&mut self, template: &str, handler: SharedHandler) -> Result<(), RouteError> {
        let pattern = PathPattern::compile(template)?;

        if let Some(existing) = self.routes.iter().find(|r| r.pattern == pattern) {
            return Err(RouteError::DuplicateRoute {
                template: template.to_string(),
                existing: existing.pattern.template().to_string(),
            });
        }

        tracing::debug!(template, pattern = pattern.as_str(), "Route registered");
        self.routes.push(Route { pattern, handler });
        Ok(())
    }

    /// Registers several routes in iteration order, stopping at the first
    /// failure.
    pub fn add_routes<I, T>(&mut self, routes: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = (T, SharedHandler)>,
        T: AsRef<str>,
    {
        for (template, handler) in routes {
            self.add_shared_route(template.as_ref(), handler)?;
        }
        Ok(())
    }

    /// Resolves `path` to the first matching route.
    pub fn get_handler(&self, path: &str) -> Result<MatchedRoute, RouteError> {
        tracing::trace!(path, "Getting handler");

        self.routes
            .iter()
            .find_map(|route| {
                route.pattern.matches(path).map(|params| MatchedRoute {
                    template: route.pattern.template().to_string(),
                    handler: Arc::clone(&route.handler),
                    params,
                })
            })
            .ok_or_else(|| RouteError::NotFound {
                path: path.to_string(),
            })
    }

    /// Registered templates in match order.
    pub fn templates(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.pattern.template())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.templates()).finish()
    }
}

/// A handler bound to the parameters extracted from one request path.
pub struct MatchedRoute {
    template: String,
    handler: SharedHandler,
    params: PathParams,
}

impl MatchedRoute {
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// Runs the handler. The parameters are stored on the request and also
    /// passed alongside it.
    pub fn handle(self, mut request: Request) -> HandlerFuture {
        request.path_params = self.params.as_map().clone();
        self.handler.call(request, self.params)
    }
}

impl fmt::Debug for MatchedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchedRoute")
            .field("template", &self.template)
            .field("params", &self.params)
            .finish()
    }
}
