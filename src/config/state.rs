// Application state shared by every request

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::environment::EnvironmentVariables;
use crate::config::module::{CompiledModule, ModuleConfig};
use crate::controllers::ControllerManager;
use crate::routing::RouteTable;
use crate::view::ViewManager;

#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub routes: Arc<RouteTable>,
    pub controllers: Arc<ControllerManager>,
    pub view: Arc<ViewManager>,
}

impl AppState {
    /// Validates and compiles `module` against the built-in controller factories
    pub fn new(environment: EnvironmentVariables, module: &ModuleConfig) -> Result<Self> {
        let compiled: CompiledModule = module
            .compile(
                &ControllerManager::with_builtin_factories(),
                environment.view_strategy,
            )
            .context("Invalid module configuration")?;

        if environment.api_tokens.is_empty() {
            warn!("API_TOKENS is empty; routes flagged isauth admit every request");
        }

        info!(
            "Module ready: {} routes, fallback '{}', view strategy '{}'",
            compiled.routes.len(),
            compiled
                .routes
                .fallback()
                .map(|rule| rule.pattern.as_str())
                .unwrap_or_default(),
            compiled.view.selected()
        );

        Ok(Self {
            environment: Arc::new(environment),
            routes: Arc::new(compiled.routes),
            controllers: Arc::new(compiled.controllers),
            view: Arc::new(compiled.view),
        })
    }

    /// Builds the state from the process environment and the configured module
    pub fn from_env() -> Result<Self> {
        let environment: EnvironmentVariables = EnvironmentVariables::load()?;
        let module: ModuleConfig = ModuleConfig::load(environment.module_config_path.as_deref())?;

        Self::new(environment, &module)
    }
}
