//! The app's views
//!
//! Rendering, persistence and the game itself live outside this crate, so
//! each view answers with a JSON summary of what it was asked to show.

use serde_json::{json, Value};

use crate::pattern::PathParams;
use crate::view::{RequestContext, View, ViewResponse};

/// Fields every view reports
fn summary(view: &'static str, params: &PathParams, request: &RequestContext) -> Value {
    json!({
        "view": view,
        "method": request.method,
        "params": params,
        "user": request.user,
    })
}

fn with_fields(mut body: Value, fields: Value) -> Value {
    if let (Some(body), Value::Object(fields)) = (body.as_object_mut(), fields) {
        body.extend(fields);
    }
    body
}

/// Login page, also served at the site root
#[derive(Clone, Copy, Debug, Default)]
pub struct LoginView;

impl View for LoginView {
    fn name(&self) -> &'static str {
        "LoginView"
    }

    fn handle(&self, params: &PathParams, request: &RequestContext) -> ViewResponse {
        let body = summary(self.name(), params, request);
        ViewResponse::ok(with_fields(
            body,
            json!({ "authenticated": request.is_authenticated() }),
        ))
    }
}

/// A game session, looked up by its host
#[derive(Clone, Copy, Debug, Default)]
pub struct GameView;

impl View for GameView {
    fn name(&self) -> &'static str {
        "GameView"
    }

    fn handle(&self, params: &PathParams, request: &RequestContext) -> ViewResponse {
        // Both game routes bind the host, under different names
        let host = params.get("host_game").or_else(|| params.get("host_name"));
        let body = summary(self.name(), params, request);
        ViewResponse::ok(with_fields(body, json!({ "host": host })))
    }
}

/// A player's profile page
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfileView;

impl View for ProfileView {
    fn name(&self) -> &'static str {
        "ProfileView"
    }

    fn handle(&self, params: &PathParams, request: &RequestContext) -> ViewResponse {
        let profile_user = params.get("profile_user");
        let own_profile = profile_user.is_some() && profile_user == request.user.as_deref();
        let body = summary(self.name(), params, request);
        ViewResponse::ok(with_fields(
            body,
            json!({ "profile_user": profile_user, "own_profile": own_profile }),
        ))
    }
}

/// Join the game hosted by `user_name`
#[derive(Clone, Copy, Debug, Default)]
pub struct JoinView;

impl View for JoinView {
    fn name(&self) -> &'static str {
        "JoinView"
    }

    fn handle(&self, params: &PathParams, request: &RequestContext) -> ViewResponse {
        let body = summary(self.name(), params, request);
        ViewResponse::ok(with_fields(
            body,
            json!({ "host": params.get("user_name"), "player": request.user }),
        ))
    }
}

/// Account sign-up form
#[derive(Clone, Copy, Debug, Default)]
pub struct CaUserSignupView;

impl View for CaUserSignupView {
    fn name(&self) -> &'static str {
        "CaUserSignupView"
    }

    fn handle(&self, params: &PathParams, request: &RequestContext) -> ViewResponse {
        ViewResponse::ok(summary(self.name(), params, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthGate, RemoteUser};

    #[test]
    fn test_game_view_reads_either_host_param() {
        let request = RequestContext::get("/game/alice");

        let by_game: PathParams = [("host_game", "alice")].into_iter().collect();
        let response = GameView.handle(&by_game, &request);
        assert_eq!(response.status, 200);
        assert_eq!(response.body["host"], "alice");

        let by_name: PathParams = [("host_name", "bob")].into_iter().collect();
        assert_eq!(GameView.handle(&by_name, &request).body["host"], "bob");
    }

    #[test]
    fn test_profile_view_flags_own_profile() {
        let params: PathParams = [("profile_user", "alice")].into_iter().collect();

        let own = ProfileView.handle(&params, &RequestContext::get("/").with_user("alice"));
        assert_eq!(own.body["own_profile"], true);

        let other = ProfileView.handle(&params, &RequestContext::get("/").with_user("bob"));
        assert_eq!(other.body["own_profile"], false);
        assert_eq!(other.body["user"], "bob");
    }

    #[test]
    fn test_login_view_summary() {
        let response = LoginView.handle(&PathParams::new(), &RequestContext::get("/"));
        assert_eq!(response.body["view"], "LoginView");
        assert_eq!(response.body["method"], "GET");
        assert_eq!(response.body["authenticated"], false);
        assert!(response.body["user"].is_null());
    }

    #[test]
    fn test_login_view_agrees_with_gate_on_empty_user() {
        let request = RequestContext::get("/").with_user("");
        let response = LoginView.handle(&PathParams::new(), &request);
        assert_eq!(response.body["authenticated"], false);
        assert!(!RemoteUser::default().is_authenticated(&request));
    }
}
