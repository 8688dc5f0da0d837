// Start of file: /src/controllers/mod.rs

/*
    * Controllers and the manager that builds them.
    * Each controller is registered with an explicit factory at startup;
    * the manager instantiates the ones the module config lists, once.
*/

pub mod route_not_found;
pub mod status;

use std::{collections::HashMap, fmt, sync::Arc};

use async_trait::async_trait;
use axum::http::Method;
use thiserror::Error;
use uuid::Uuid;

use crate::routing::RouteMatch;
use crate::utils::response_handler::HandlerResponse;

pub use route_not_found::RouteNotFoundController;
pub use status::StatusController;

/// Everything a controller action may look at.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub request_id: Uuid,
    pub method: Method,
    pub path: String,
    pub route: RouteMatch,
}

#[async_trait]
pub trait Controller: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs `action`. Unknown actions answer with the not-found response.
    async fn dispatch(&self, action: &str, ctx: &DispatchContext) -> HandlerResponse;
}

pub type ControllerFactory = fn() -> Arc<dyn Controller>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("no factory registered for controller '{0}'")]
    MissingFactory(String),
}

#[derive(Default)]
pub struct ControllerManagerBuilder {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerManagerBuilder {
    pub fn register(mut self, name: impl Into<String>, factory: ControllerFactory) -> Self {
        self.factories.insert(name.into(), factory);
        self
    }

    /// Instantiates every controller in `names`.
    pub fn build<S: AsRef<str>>(&self, names: &[S]) -> Result<ControllerManager, ControllerError> {
        let mut controllers: HashMap<String, Arc<dyn Controller>> = HashMap::new();

        for name in names {
            let name: &str = name.as_ref();
            let factory: &ControllerFactory = self
                .factories
                .get(name)
                .ok_or_else(|| ControllerError::MissingFactory(name.to_string()))?;

            controllers.insert(name.to_string(), factory());
        }

        Ok(ControllerManager { controllers })
    }
}

/// Shared controller instances keyed by handler reference.
#[derive(Clone)]
pub struct ControllerManager {
    controllers: HashMap<String, Arc<dyn Controller>>,
}

impl ControllerManager {
    pub fn builder() -> ControllerManagerBuilder {
        ControllerManagerBuilder::default()
    }

    /// Builder holding the factories this crate ships with.
    pub fn with_builtin_factories() -> ControllerManagerBuilder {
        Self::builder()
            .register(RouteNotFoundController::NAME, RouteNotFoundController::factory)
            .register(StatusController::NAME, StatusController::factory)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Controller>> {
        self.controllers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.controllers.contains_key(name)
    }
}

impl fmt::Debug for ControllerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.controllers.keys().collect();
        names.sort();
        f.debug_struct("ControllerManager").field("controllers", &names).finish()
    }
}


// End of file: /src/controllers/mod.rs
