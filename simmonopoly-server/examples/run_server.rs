//! Example to run the Simmonopoly server standalone
//!
//! Run with: cargo run -p simmonopoly-server --example run_server

use simmonopoly_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();

    println!("Starting Simmonopoly server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Open http://localhost:{}/login/", config.port);

    run_server(config).await
}
