// Start of file: /src/controllers/route_not_found.rs

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use tracing::info;

use super::{Controller, DispatchContext};
use crate::utils::response_handler::HandlerResponse;

pub const NOT_FOUND_MESSAGE: &str = "not found";

/// The payload every unmatched route answers with. It never looks at the request.
pub fn not_found_response() -> HandlerResponse {
    HandlerResponse::new(StatusCode::NOT_FOUND)
        .data(json!({ "message": NOT_FOUND_MESSAGE }))
        .message("The requested route does not exist")
}

/// Terminus for the catch-all route.
#[derive(Debug, Default)]
pub struct RouteNotFoundController;

impl RouteNotFoundController {
    pub const NAME: &'static str = "RouteNotFound";
    pub const ACTION: &'static str = "routenotfound";

    pub fn factory() -> Arc<dyn Controller> {
        Arc::new(Self)
    }
}

#[async_trait]
impl Controller for RouteNotFoundController {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn dispatch(&self, action: &str, ctx: &DispatchContext) -> HandlerResponse {
        info!(
            request_id = %ctx.request_id,
            method = %ctx.method,
            path = %ctx.path,
            action,
            "Route not found"
        );

        not_found_response()
    }
}


// End of file: /src/controllers/route_not_found.rs
