// Start of file: /src/config/module.rs

/*
    * The module configuration: routes, controller factories and view strategies.
    * It is declared once (built-in or loaded from JSON), validated at startup
    * and compiled into the immutable pieces stored in AppState.
*/

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::controllers::{
    ControllerError, ControllerManager, ControllerManagerBuilder, RouteNotFoundController,
    StatusController,
};
use crate::routing::{RouteRule, RouteTable, RoutingError};
use crate::view::{ResponseStrategy, ViewError, ViewManager};

// ! Catch-all route registered by the module
pub const FALLBACK_ROUTE: &str = "404";
pub const FALLBACK_PRIORITY: i32 = -1000;
pub const FALLBACK_MAX_SEGMENTS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub router: RouterConfig,
    pub controllers: ControllersConfig,
    pub view_manager: ViewManagerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    pub routes: Vec<RouteRule>,
    // Name of the rule that must rank below all others
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllersConfig {
    pub factories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewManagerConfig {
    pub strategies: Vec<ResponseStrategy>,
}

fn default_fallback() -> String {
    FALLBACK_ROUTE.to_string()
}

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error(transparent)]
    Routing(#[from] RoutingError),
    #[error(transparent)]
    Controller(#[from] ControllerError),
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Validated, immutable form of the module configuration.
#[derive(Debug, Clone)]
pub struct CompiledModule {
    pub routes: RouteTable,
    pub controllers: ControllerManager,
    pub view: ViewManager,
}

/// `[/:any]` repeated, so the root path and up to six segments match.
pub fn fallback_pattern() -> String {
    "[/:any]".repeat(FALLBACK_MAX_SEGMENTS)
}

pub fn fallback_route() -> RouteRule {
    RouteRule::segment(
        FALLBACK_ROUTE,
        fallback_pattern(),
        RouteNotFoundController::NAME,
        RouteNotFoundController::ACTION,
    )
    .with_auth(true)
    .with_priority(FALLBACK_PRIORITY)
}

impl ModuleConfig {
    pub fn builtin() -> Self {
        Self {
            router: RouterConfig {
                routes: vec![
                    RouteRule::literal("status", "/status", StatusController::NAME, "index"),
                    RouteRule::literal("ping", "/ping", StatusController::NAME, "ping"),
                    fallback_route(),
                ],
                fallback: default_fallback(),
            },
            controllers: ControllersConfig {
                factories: vec![
                    RouteNotFoundController::NAME.to_string(),
                    StatusController::NAME.to_string(),
                ],
            },
            view_manager: ViewManagerConfig {
                strategies: vec![ResponseStrategy::Json],
            },
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Invalid module configuration")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path: &Path = path.as_ref();
        let raw: String = fs::read_to_string(path)
            .with_context(|| format!("Failed to read module configuration {}", path.display()))?;

        Self::from_json_str(&raw)
    }

    /// Uses the file at `path` when given, the built-in module otherwise.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                info!("Loading module configuration from {path}");
                Self::from_json_file(path)
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn compile(
        &self,
        factories: &ControllerManagerBuilder,
        selected: ResponseStrategy,
    ) -> Result<CompiledModule, ModuleError> {
        let routes: RouteTable = RouteTable::new(self.router.routes.clone(), &self.router.fallback)?;
        let controllers: ControllerManager = factories.build(self.controllers.factories.as_slice())?;
        routes.check_controllers(|name| controllers.contains(name))?;
        let view: ViewManager = ViewManager::new(&self.view_manager.strategies, selected)?;

        Ok(CompiledModule {
            routes,
            controllers,
            view,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_module_compiles() {
        let compiled = ModuleConfig::builtin()
            .compile(&ControllerManager::with_builtin_factories(), ResponseStrategy::Json)
            .unwrap();

        let fallback = compiled.routes.fallback().unwrap();
        assert_eq!(fallback.priority, FALLBACK_PRIORITY);
        assert!(fallback.requires_auth());
        assert!(compiled
            .routes
            .rules()
            .filter(|rule| rule.name != FALLBACK_ROUTE)
            .all(|rule| rule.priority > fallback.priority));
    }

    #[test]
    fn loads_declarative_json() {
        let raw = json!({
            "router": {
                "routes": [{
                    "name": "404",
                    "type": "Segment",
                    "options": {
                        "route": "/:any[/:any][/:any][/:any][/:any][/:any]",
                        "defaults": {
                            "controller": "RouteNotFound",
                            "action": "routenotfound",
                            "isauth": true
                        }
                    },
                    "priority": -1000
                }]
            },
            "controllers": { "factories": ["RouteNotFound"] },
            "view_manager": { "strategies": ["ViewJsonStrategy"] }
        })
        .to_string();

        let config = ModuleConfig::from_json_str(&raw).unwrap();
        assert_eq!(config.router.fallback, FALLBACK_ROUTE);

        let compiled = config
            .compile(&ControllerManager::with_builtin_factories(), ResponseStrategy::Json)
            .unwrap();
        assert_eq!(compiled.routes.len(), 1);
    }

    #[test]
    fn rejects_routes_to_unlisted_controllers() {
        let mut config = ModuleConfig::builtin();
        config.controllers.factories.retain(|name| name != StatusController::NAME);

        let err = config
            .compile(&ControllerManager::with_builtin_factories(), ResponseStrategy::Json)
            .unwrap_err();

        assert!(matches!(
            err,
            ModuleError::Routing(RoutingError::UnknownController { .. })
        ));
    }

    #[test]
    fn rejects_missing_json_strategy() {
        let mut config = ModuleConfig::builtin();
        config.view_manager.strategies.clear();

        let err = config
            .compile(&ControllerManager::with_builtin_factories(), ResponseStrategy::Json)
            .unwrap_err();

        assert!(matches!(err, ModuleError::View(ViewError::JsonStrategyMissing)));
    }

    #[test]
    fn rejects_selected_strategy_the_module_does_not_enable() {
        let err = ModuleConfig::builtin()
            .compile(&ControllerManager::with_builtin_factories(), ResponseStrategy::PrettyJson)
            .unwrap_err();

        assert!(matches!(
            err,
            ModuleError::View(ViewError::StrategyNotEnabled(ResponseStrategy::PrettyJson))
        ));
    }
}

// End of file: /src/config/module.rs
