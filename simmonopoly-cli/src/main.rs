//! Simmonopoly CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the web server
//! - routes: List the url patterns
//! - resolve: Dispatch a path and show the outcome
//! - reverse: Build the path for a route name

mod server;
mod urls_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simmonopoly")]
#[command(about = "Simmonopoly web app")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve(server::ServerArgs),
    /// List url patterns in declaration order
    Routes,
    /// Dispatch a path and print the outcome
    Resolve(urls_cmd::ResolveArgs),
    /// Build the path for a route name
    Reverse(urls_cmd::ReverseArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Routes => urls_cmd::list_routes(),
        Commands::Resolve(args) => urls_cmd::resolve(args),
        Commands::Reverse(args) => urls_cmd::reverse(args),
    }
}
