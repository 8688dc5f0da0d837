pub mod auth;
pub mod route_match;
