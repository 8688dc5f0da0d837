// Start of file: /src/config/mod.rs

/*
* Re-export submodules related to configuration, environment variables,
* the module config and app state.
*/

pub mod environment;
pub mod module;
pub mod state;

// End of file: /src/config/mod.rs
