//! Fallback handler routing requests through the url patterns

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use simmonopoly_urls::{RequestContext, RouteError, ViewResponse};

use crate::state::ServerState;

/// Dispatch any request to the view its path resolves to
pub async fn dispatch_request(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request = RequestContext {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        user: remote_user(&headers, &state.remote_user_header),
    };

    match state.urls.dispatch(&request, &state.gate) {
        Ok(view) => view_response(view),
        Err(err) => {
            tracing::debug!("{} {} not dispatched: {}", request.method, request.path, err);
            error_response(err)
        }
    }
}

/// User named by the trusted upstream header, if any
fn remote_user(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|user| !user.is_empty())
        .map(str::to_string)
}

fn view_response(view: ViewResponse) -> Response {
    let status = StatusCode::from_u16(view.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(view.body)).into_response()
}

fn error_response(err: RouteError) -> Response {
    match err {
        RouteError::Unauthorized { redirect, .. } => {
            (StatusCode::FOUND, [(header::LOCATION, redirect)]).into_response()
        }
        other => {
            let status =
                StatusCode::from_u16(other.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": other.to_string() }))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_remote_user_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(remote_user(&headers, "x-remote-user"), None);

        headers.insert("x-remote-user", HeaderValue::from_static("  "));
        assert_eq!(remote_user(&headers, "x-remote-user"), None);

        headers.insert("x-remote-user", HeaderValue::from_static("alice"));
        assert_eq!(
            remote_user(&headers, "x-remote-user").as_deref(),
            Some("alice")
        );
        assert_eq!(remote_user(&headers, "x-other"), None);
    }

    #[test]
    fn test_unauthorized_becomes_found_redirect() {
        let response = error_response(RouteError::Unauthorized {
            path: "/join/bob".to_string(),
            redirect: "/login/?next=/join/bob".to_string(),
        });
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login/?next=/join/bob"
        );
    }

    #[test]
    fn test_not_found_status() {
        let response = error_response(RouteError::NotFound {
            path: "/nowhere".to_string(),
        });
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
