//! Request context, view trait and view responses

use serde::Serialize;
use serde_json::Value;

use crate::pattern::PathParams;

/// What a view gets to know about the incoming request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Authenticated user, as established by the external auth layer
    pub user: Option<String>,
}

impl RequestContext {
    /// Anonymous GET request for `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.into(),
            query: None,
            user: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Whether the request carries a non-empty user name
    pub fn is_authenticated(&self) -> bool {
        self.user.as_deref().is_some_and(|user| !user.is_empty())
    }

    /// Path plus query string, as it should be reported back in `next=`
    pub fn full_path(&self) -> String {
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}?{}", self.path, query),
            _ => self.path.clone(),
        }
    }
}

/// Response produced by a view
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewResponse {
    pub status: u16,
    pub body: Value,
}

impl ViewResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

/// A request handler bound to one or more routes
pub trait View: Send + Sync {
    /// Name shown in route listings
    fn name(&self) -> &'static str;

    fn handle(&self, params: &PathParams, request: &RequestContext) -> ViewResponse;
}
