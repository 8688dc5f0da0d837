// Global error handling for HTTP middleware layers

use axum::{http::StatusCode, BoxError};
use std::error::Error;
// tower's error type for timeouts
use tower::timeout::error::Elapsed;
// Axum uses http_body_util for length-limiting
use http_body_util::LengthLimitError;
use tracing::warn;

use crate::utils::response_handler::HandlerResponse;

/// Maps layer errors (timeouts, oversized bodies) to enveloped HTTP responses
pub async fn handle_global_error(err: BoxError) -> HandlerResponse {
    // 413 if the body was too large
    if find_cause::<LengthLimitError>(&*err).is_some() {
        warn!("Rejected request body: {err}");
        return HandlerResponse::new(StatusCode::PAYLOAD_TOO_LARGE)
            .message("Request body too large");
    }

    // 408 if the request took too long
    if err.is::<Elapsed>() {
        warn!("Request timed out");
        return HandlerResponse::new(StatusCode::REQUEST_TIMEOUT)
            .message("Request timeout");
    }

    // Otherwise, 500
    tracing::error!("Unhandled internal error: {err}");
    HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
        .message("Unhandled internal error")
}

/// Helper function to find specific error type in error chain
pub fn find_cause<'a, T: Error + 'static>(err: &'a (dyn Error + 'static)) -> Option<&'a T> {
    if let Some(typed) = err.downcast_ref::<T>() {
        return Some(typed);
    }

    let mut source: Option<&'a (dyn Error + 'static)> = err.source();

    while let Some(s) = source {
        if let Some(typed) = s.downcast_ref::<T>() {
            return Some(typed);
        }
        source = s.source();
    }

    None
}
