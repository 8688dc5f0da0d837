use thiserror::Error;

/// Errors raised while compiling or resolving routes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// No rule matched the request path.
    #[error("no route matches '{path}'")]
    RouteNotFound { path: String },

    #[error("route '{route}' has an invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        route: String,
        pattern: String,
        reason: String,
    },

    #[error("route '{0}' is registered more than once")]
    DuplicateRoute(String),

    #[error("fallback route '{0}' is not registered")]
    MissingFallback(String),

    #[error("fallback route '{fallback}' (priority {fallback_priority}) must rank below route '{route}' (priority {route_priority})")]
    FallbackNotLowest {
        fallback: String,
        fallback_priority: i32,
        route: String,
        route_priority: i32,
    },

    #[error("route '{route}' points at unregistered controller '{controller}'")]
    UnknownController { route: String, controller: String },
}
