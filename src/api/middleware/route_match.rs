use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::state::AppState;
use crate::controllers::route_not_found::not_found_response;
use crate::routing::RouteMatch;
use crate::utils::response_handler::HandlerResponse;

/// Identifier attached to every request for log correlation
#[derive(Debug, Clone, Copy)]
pub struct RequestId(pub Uuid);

/// Middleware that resolves the request path against the route table
pub async fn route_match_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, HandlerResponse> {
    let request_id: Uuid = Uuid::new_v4();
    let path: String = request.uri().path().to_owned();

    // Paths deeper than the catch-all pattern still get the not-found payload
    let route: RouteMatch = state.routes.resolve(&path).map_err(|err| {
        warn!(%request_id, "{err}");
        not_found_response()
    })?;

    debug!(
        %request_id,
        route = %route.route,
        controller = %route.controller,
        action = %route.action,
        "Matched {path}"
    );

    request.extensions_mut().insert(RequestId(request_id));
    request.extensions_mut().insert(route);

    Ok(next.run(request).await)
}
