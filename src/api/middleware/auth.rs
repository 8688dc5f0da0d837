use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use subtle::{Choice, ConstantTimeEq};
use tracing::{debug, warn};

use crate::config::state::AppState;
use crate::routing::RouteMatch;
use crate::utils::response_handler::HandlerResponse;

const BEARER_PREFIX: &str = "Bearer ";

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Checks `token` against every configured token without short-circuiting.
fn token_matches(tokens: &[String], token: &str) -> bool {
    tokens
        .iter()
        .fold(Choice::from(0), |found, known| {
            found | known.as_bytes().ct_eq(token.as_bytes())
        })
        .into()
}

/// Middleware enforcing bearer tokens on routes flagged `isauth`.
///
/// Runs after route matching, so the flag comes from the matched rule. With no
/// configured tokens every request is admitted.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, HandlerResponse> {
    let requires_auth: bool = request
        .extensions()
        .get::<RouteMatch>()
        .is_some_and(|route| route.requires_auth);

    let tokens: &[String] = &state.environment.api_tokens;

    if !requires_auth || tokens.is_empty() {
        return Ok(next.run(request).await);
    }

    // 1. Extract the bearer token
    let token: &str = bearer_token(&headers).ok_or_else(|| {
        warn!("Rejected {}: missing bearer token", request.uri().path());
        HandlerResponse::new(StatusCode::UNAUTHORIZED)
            .message("Missing bearer token")
            .data(json!({ "error": "missing_token" }))
    })?;

    // 2. Compare against the configured tokens
    if !token_matches(tokens, token) {
        warn!("Rejected {}: unknown bearer token", request.uri().path());
        return Err(HandlerResponse::new(StatusCode::UNAUTHORIZED)
            .message("Invalid bearer token")
            .data(json!({ "error": "invalid_token" })));
    }

    debug!("Authenticated request to {}", request.uri().path());

    Ok(next.run(request).await)
}
