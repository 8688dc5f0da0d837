// Start of file: /src/controllers/status.rs

// Health endpoints so the module has application routes besides the fallback

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use tracing::info;

use super::route_not_found::not_found_response;
use super::{Controller, DispatchContext};
use crate::utils::response_handler::HandlerResponse;

#[derive(Debug, Default)]
pub struct StatusController;

impl StatusController {
    pub const NAME: &'static str = "Status";

    pub fn factory() -> Arc<dyn Controller> {
        Arc::new(Self)
    }
}

#[async_trait]
impl Controller for StatusController {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn dispatch(&self, action: &str, ctx: &DispatchContext) -> HandlerResponse {
        match action {
            "index" => {
                info!(request_id = %ctx.request_id, "Status endpoint called");

                HandlerResponse::new(StatusCode::OK)
                    .data(json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "status": "healthy"
                    }))
                    .message("API is running successfully")
            }
            "ping" => HandlerResponse::new(StatusCode::OK).data(json!({ "message": "pong" })),
            _ => not_found_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteMatch;
    use axum::http::Method;
    use uuid::Uuid;

    fn ctx() -> DispatchContext {
        DispatchContext {
            request_id: Uuid::new_v4(),
            method: Method::GET,
            path: "/status".to_string(),
            route: RouteMatch {
                route: "status".to_string(),
                controller: StatusController::NAME.to_string(),
                action: "index".to_string(),
                requires_auth: false,
                params: Vec::new(),
            },
        }
    }

    #[tokio::test]
    async fn answers_known_actions() {
        let index = StatusController.dispatch("index", &ctx()).await;
        assert_eq!(index.status_code, StatusCode::OK);
        assert_eq!(index.data["status"], "healthy");

        let ping = StatusController.dispatch("ping", &ctx()).await;
        assert_eq!(ping.data["message"], "pong");
    }

    #[tokio::test]
    async fn unknown_action_is_not_found() {
        let response = StatusController.dispatch("reboot", &ctx()).await;
        assert_eq!(response, not_found_response());
    }
}

// End of file: /src/controllers/status.rs
