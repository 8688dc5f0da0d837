// Start of file: /src/api/mod.rs

/*
    * Request pipeline: match the route, run authentication when the
    * matched rule asks for it, then dispatch to the controller action.
*/

pub mod dispatch;
pub mod middleware;

// End of file: /src/api/mod.rs
