//! Simmonopoly Server - HTTP front for the route table
//!
//! This crate provides the web backend:
//! - Every request dispatched through the app's url patterns
//! - Login-required routes redirected to the login page
//! - Static file serving for the board assets

mod dispatch;
mod state;

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use dispatch::dispatch_request;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Header an upstream auth proxy uses to name the logged-in user
    pub remote_user_header: String,
    pub login_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            static_dir: "static".to_string(),
            remote_user_header: "x-remote-user".to_string(),
            login_url: simmonopoly_urls::DEFAULT_LOGIN_URL.to_string(),
        }
    }
}

/// Create the router: static assets, then the url patterns for everything else
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        .nest_service("/static", static_service)
        // Path routing is ours, not axum's: first declared pattern wins
        .fallback(dispatch::dispatch_request)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(&config)?);
    let router = create_router(&config, state);

    tracing::info!("Simmonopoly server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
