//! Simmonopoly URLs - request path routing
//!
//! This crate provides the routing layer of the web app:
//! - Path patterns with typed parameters (`<name>`, `<int:id>`, ...)
//! - An ordered, immutable route table (first match wins)
//! - Login-required routes checked against an external auth gate
//! - Reverse lookup of paths by route name
//! - The app's views and its url patterns

pub mod auth;
pub mod error;
pub mod pattern;
pub mod table;
pub mod urls;
pub mod view;
pub mod views;

// Re-exports for convenient access
pub use auth::{AllowAll, AuthGate, DenyAll, RemoteUser, DEFAULT_LOGIN_URL};
pub use error::{PatternError, RouteError};
pub use pattern::{Converter, PathParams, PathPattern};
pub use table::{Resolved, Route, RouteTable, RouteTableBuilder};
pub use urls::url_patterns;
pub use view::{RequestContext, View, ViewResponse};
pub use views::{CaUserSignupView, GameView, JoinView, LoginView, ProfileView};
