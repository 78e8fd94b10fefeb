//! Authentication gate for login-required routes
//!
//! The router never authenticates anybody itself. It asks an [`AuthGate`]
//! whether the request already belongs to a logged-in user and, if not,
//! where to send the caller to log in.

use crate::view::RequestContext;

/// Login page used when a gate does not name its own
pub const DEFAULT_LOGIN_URL: &str = "/login/";

/// Predicate deciding whether a request is authenticated
pub trait AuthGate: Send + Sync {
    fn is_authenticated(&self, request: &RequestContext) -> bool;

    /// Where unauthenticated callers are redirected
    fn login_url(&self) -> &str {
        DEFAULT_LOGIN_URL
    }
}

impl<F> AuthGate for F
where
    F: Fn(&RequestContext) -> bool + Send + Sync,
{
    fn is_authenticated(&self, request: &RequestContext) -> bool {
        self(request)
    }
}

/// Trusts the user an upstream authentication layer put on the request
#[derive(Clone, Debug)]
pub struct RemoteUser {
    login_url: String,
}

impl RemoteUser {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
        }
    }
}

impl Default for RemoteUser {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_URL)
    }
}

impl AuthGate for RemoteUser {
    fn is_authenticated(&self, request: &RequestContext) -> bool {
        request.is_authenticated()
    }

    fn login_url(&self) -> &str {
        &self.login_url
    }
}

/// Every request counts as authenticated
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl AuthGate for AllowAll {
    fn is_authenticated(&self, _request: &RequestContext) -> bool {
        true
    }
}

/// No request counts as authenticated
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyAll;

impl AuthGate for DenyAll {
    fn is_authenticated(&self, _request: &RequestContext) -> bool {
        false
    }
}

/// Build `<login_url>?next=<full path>` for an unauthenticated request
pub fn login_redirect(login_url: &str, request: &RequestContext) -> String {
    let next = urlencoding::encode(&request.full_path()).replace("%2F", "/");
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!("{}{}next={}", login_url, separator, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_user_requires_non_empty_user() {
        let gate = RemoteUser::default();
        assert!(!gate.is_authenticated(&RequestContext::get("/")));
        assert!(!gate.is_authenticated(&RequestContext::get("/").with_user("")));
        assert!(gate.is_authenticated(&RequestContext::get("/").with_user("alice")));
        assert_eq!(gate.login_url(), "/login/");
    }

    #[test]
    fn test_closure_gate() {
        let gate = |r: &RequestContext| r.user.as_deref() == Some("banker");
        assert!(gate.is_authenticated(&RequestContext::get("/").with_user("banker")));
        assert!(!gate.is_authenticated(&RequestContext::get("/").with_user("alice")));
    }

    #[test]
    fn test_login_redirect_keeps_slashes_and_encodes_query() {
        let request = RequestContext::get("/join/bob").with_query("seat=2");
        assert_eq!(
            login_redirect("/login/", &request),
            "/login/?next=/join/bob%3Fseat%3D2"
        );
        assert_eq!(
            login_redirect("/login/?theme=dark", &RequestContext::get("/profile/x")),
            "/login/?theme=dark&next=/profile/x"
        );
    }
}
