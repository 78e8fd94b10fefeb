//! Route table
//!
//! Routes are declared once, in order, through [`RouteTableBuilder`] and the
//! resulting [`RouteTable`] is read-only. Lookups walk the routes in
//! declaration order and stop at the first pattern that matches, so the
//! table can be shared across request tasks without locking.

use std::fmt;

use crate::auth::{login_redirect, AuthGate};
use crate::error::{PatternError, RouteError};
use crate::pattern::{PathParams, PathPattern};
use crate::view::{RequestContext, View, ViewResponse};

/// A path pattern bound to a view under a route name
pub struct Route {
    pattern: PathPattern,
    view: Box<dyn View>,
    name: String,
    login_required: bool,
}

impl Route {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn view(&self) -> &dyn View {
        self.view.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn login_required(&self) -> bool {
        self.login_required
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("view", &self.view.name())
            .field("name", &self.name)
            .field("login_required", &self.login_required)
            .finish()
    }
}

/// A route matched against a path, with its bound parameters
#[derive(Debug)]
pub struct Resolved<'a> {
    pub route: &'a Route,
    pub params: PathParams,
}

/// Collects route declarations in order
#[derive(Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    error: Option<PatternError>,
}

impl RouteTableBuilder {
    /// Declare a public route
    pub fn route(self, pattern: &str, view: impl View + 'static, name: &str) -> Self {
        self.push(pattern, Box::new(view), name, false)
    }

    /// Declare a route that only authenticated callers may reach
    pub fn login_required(self, pattern: &str, view: impl View + 'static, name: &str) -> Self {
        self.push(pattern, Box::new(view), name, true)
    }

    fn push(mut self, pattern: &str, view: Box<dyn View>, name: &str, login_required: bool) -> Self {
        if self.error.is_some() {
            return self;
        }
        match PathPattern::parse(pattern) {
            Ok(pattern) => self.routes.push(Route {
                pattern,
                view,
                name: name.to_string(),
                login_required,
            }),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Freeze the declarations, failing on the first malformed pattern
    pub fn build(self) -> Result<RouteTable, PatternError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let table = RouteTable {
            routes: self.routes,
        };
        for name in table.duplicate_names() {
            tracing::warn!("Route name '{}' is declared more than once", name);
        }
        tracing::debug!("Built route table with {} routes", table.routes.len());

        Ok(table)
    }
}

/// Immutable, ordered set of routes
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Routes in declaration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Names used by more than one route, in first-declared order
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (i, route) in self.routes.iter().enumerate() {
            let name = route.name();
            let repeated = self.routes[i + 1..].iter().any(|r| r.name() == name);
            if repeated && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Find the first route whose pattern matches `path`.
    ///
    /// The path is percent-decoded before matching.
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_>, RouteError> {
        let not_found = || RouteError::NotFound {
            path: path.to_string(),
        };
        let decoded = urlencoding::decode(path).map_err(|_| not_found())?;

        self.routes
            .iter()
            .find_map(|route| {
                route
                    .pattern
                    .matches(&decoded)
                    .map(|params| Resolved { route, params })
            })
            .ok_or_else(not_found)
    }

    /// Route a request to its view.
    ///
    /// Login-required routes consult `gate` first; an unauthenticated caller
    /// gets [`RouteError::Unauthorized`] and the view is never invoked.
    pub fn dispatch(
        &self,
        request: &RequestContext,
        gate: &dyn AuthGate,
    ) -> Result<ViewResponse, RouteError> {
        let Resolved { route, params } = self.resolve(&request.path)?;

        if route.login_required && !gate.is_authenticated(request) {
            let redirect = login_redirect(gate.login_url(), request);
            tracing::debug!(
                route = route.name(),
                "Unauthenticated request for {}, redirecting to {}",
                request.path,
                redirect
            );
            return Err(RouteError::Unauthorized {
                path: request.path.clone(),
                redirect,
            });
        }

        tracing::debug!(
            route = route.name(),
            view = route.view.name(),
            "Dispatching {} {}",
            request.method,
            request.path
        );
        Ok(route.view.handle(&params, request))
    }

    /// Build the path for a route name.
    ///
    /// When several routes share the name, the most recently declared one
    /// whose parameters fit `params` wins.
    pub fn reverse(&self, name: &str, params: &PathParams) -> Result<String, RouteError> {
        self.routes
            .iter()
            .rev()
            .filter(|route| route.name == name)
            .find_map(|route| route.pattern.reverse(params))
            .ok_or_else(|| RouteError::NoReverseMatch {
                name: name.to_string(),
            })
    }
}
