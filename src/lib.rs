// Library root: JSON REST module with a priority-ordered route table
// and a catch-all "route not found" controller

pub mod api;
pub mod config;
pub mod controllers;
pub mod core;
pub mod routing;
pub mod utils;
pub mod view;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::module::ModuleConfig;
pub use crate::config::state::AppState;
pub use crate::core::server::create_app;
