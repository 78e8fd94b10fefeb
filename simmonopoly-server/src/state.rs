//! Server state
//!
//! Built once at startup and shared read-only by every request task.

use simmonopoly_urls::{url_patterns, PatternError, RemoteUser, RouteTable};

use crate::ServerConfig;

/// Server-wide shared state
pub struct ServerState {
    pub urls: RouteTable,
    pub gate: RemoteUser,
    pub remote_user_header: String,
}

impl ServerState {
    pub fn new(config: &ServerConfig) -> Result<Self, PatternError> {
        Ok(Self {
            urls: url_patterns()?,
            gate: RemoteUser::new(config.login_url.clone()),
            remote_user_header: config.remote_user_header.clone(),
        })
    }
}
