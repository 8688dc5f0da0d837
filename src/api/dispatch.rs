// Start of file: /src/api/dispatch.rs

// Final handler: hands the matched route to its controller action

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension, State},
    http::{Method, StatusCode, Uri},
};
use tracing::{error, info_span, warn, Instrument};

use crate::api::middleware::route_match::RequestId;
use crate::config::state::AppState;
use crate::controllers::DispatchContext;
use crate::routing::RouteMatch;
use crate::utils::response_handler::HandlerResponse;

pub async fn dispatch_handler(
    State(state): State<AppState>,
    Extension(route): Extension<RouteMatch>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    method: Method,
    uri: Uri,
    // Buffering the body enforces DefaultBodyLimit
    body: Result<Bytes, BytesRejection>,
) -> HandlerResponse {
    let body: Bytes = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(%request_id, "Rejected request body: {rejection}");
            return HandlerResponse::new(rejection.status()).message(rejection.body_text());
        }
    };

    let Some(controller) = state.controllers.get(&route.controller) else {
        // Route tables are checked against the controller list at startup
        error!(%request_id, "Controller '{}' is not registered", route.controller);
        return HandlerResponse::new(StatusCode::INTERNAL_SERVER_ERROR)
            .message("Controller unavailable");
    };

    let span = info_span!(
        "dispatch",
        %request_id,
        route = %route.route,
        controller = controller.name(),
        action = %route.action,
        body_len = body.len()
    );

    let action: String = route.action.clone();
    let ctx: DispatchContext = DispatchContext {
        request_id,
        method,
        path: uri.path().to_owned(),
        route,
    };

    controller.dispatch(&action, &ctx).instrument(span).await
}

// End of file: /src/api/dispatch.rs
