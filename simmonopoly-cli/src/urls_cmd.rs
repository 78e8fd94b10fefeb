//! Url pattern commands - list, resolve and reverse routes
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: list_routes(), resolve(), reverse() - orchestration
//! - Level 2: format_routes(), describe_dispatch()
//! - Level 4: argument parsing

use anyhow::{Context, Result};
use clap::Args;

use simmonopoly_urls::{
    url_patterns, PathParams, RemoteUser, RequestContext, RouteError, RouteTable,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ResolveArgs {
    /// Request path, e.g. /game/alice
    pub path: String,

    /// Dispatch as this logged-in user
    #[arg(long)]
    pub user: Option<String>,

    /// HTTP method to report to the view
    #[arg(long, default_value = "GET")]
    pub method: String,
}

#[derive(Args)]
pub struct ReverseArgs {
    /// Route name, e.g. profile
    pub name: String,

    /// Parameters as KEY=VALUE
    #[arg(value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Print the route table in declaration order
pub fn list_routes() -> Result<()> {
    let table = load_table()?;
    print!("{}", format_routes(&table));
    Ok(())
}

/// Dispatch a path through the table and print what happened
pub fn resolve(args: ResolveArgs) -> Result<()> {
    let table = load_table()?;

    let (path, query) = match args.path.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (args.path.clone(), None),
    };
    let request = RequestContext {
        method: args.method.to_ascii_uppercase(),
        path,
        query,
        user: args.user,
    };

    println!("{}", describe_dispatch(&table, &request)?);
    Ok(())
}

/// Print the path for a route name
pub fn reverse(args: ReverseArgs) -> Result<()> {
    let table = load_table()?;
    let params: PathParams = args.params.into_iter().collect();

    let path = table.reverse(&args.name, &params)?;
    println!("{}", path);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_table() -> Result<RouteTable> {
    url_patterns().context("Failed to build url patterns")
}

/// One line per route, then any duplicated names
fn format_routes(table: &RouteTable) -> String {
    let width = table
        .routes()
        .iter()
        .map(|r| r.pattern().as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for route in table.routes() {
        out.push_str(&format!(
            "{:<width$}  {:<18} {:<10} {}\n",
            route.pattern().as_str(),
            route.view().name(),
            route.name(),
            if route.login_required() { "login required" } else { "public" },
            width = width
        ));
    }

    let duplicates = table.duplicate_names();
    if !duplicates.is_empty() {
        out.push_str(&format!(
            "\nWarning: route names declared more than once: {}\n",
            duplicates.join(", ")
        ));
    }
    out
}

/// Outcome of dispatching `request`, as printable text
fn describe_dispatch(table: &RouteTable, request: &RequestContext) -> Result<String> {
    let resolved = match table.resolve(&request.path) {
        Ok(resolved) => resolved,
        Err(e) => return Ok(format!("404 {}", e)),
    };
    let header = format!(
        "{} -> {} (name: {}, params: {})",
        resolved.route.pattern(),
        resolved.route.view().name(),
        resolved.route.name(),
        serde_json::to_string(&resolved.params)?
    );

    let outcome = match table.dispatch(request, &RemoteUser::default()) {
        Ok(response) => format!(
            "{} {}",
            response.status,
            serde_json::to_string_pretty(&response.body)?
        ),
        Err(RouteError::Unauthorized { redirect, .. }) => format!("302 Location: {}", redirect),
        Err(e) => format!("{} {}", e.status(), e),
    };

    Ok(format!("{}\n{}", header, outcome))
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("profile_user=alice"),
            Ok(("profile_user".to_string(), "alice".to_string()))
        );
        assert_eq!(
            parse_key_value("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_value("alice").is_err());
        assert!(parse_key_value("=alice").is_err());
    }

    #[test]
    fn test_format_routes_lists_all_and_flags_duplicates() {
        let table = load_table().unwrap();
        let text = format_routes(&table);

        assert_eq!(text.lines().filter(|l| l.starts_with('/')).count(), 7);
        assert!(text.contains("CaUserSignupView"));
        assert!(text.contains("route names declared more than once: index, game"));

        let profile = text
            .lines()
            .find(|l| l.starts_with("/profile/"))
            .unwrap();
        assert!(profile.ends_with("login required"));
    }

    #[test]
    fn test_describe_dispatch_outcomes() {
        let table = load_table().unwrap();

        let anon = describe_dispatch(&table, &RequestContext::get("/join/bob")).unwrap();
        assert!(anon.contains("JoinView"));
        assert!(anon.ends_with("302 Location: /login/?next=/join/bob"));

        let user = RequestContext::get("/join/bob").with_user("alice");
        assert!(describe_dispatch(&table, &user).unwrap().contains("\n200 "));

        let missing = describe_dispatch(&table, &RequestContext::get("/nope")).unwrap();
        assert!(missing.starts_with("404 "));
    }
}
