// Start of file: /src/view/mod.rs

/*
    * View strategies: how the final response envelope is serialized.
    * The module enables JSON; the pretty variant exists for local debugging.
*/

use std::{fmt, str::FromStr};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::utils::to_two_space_indented_json;

pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseStrategy {
    // Compact JSON
    #[serde(rename = "ViewJsonStrategy", alias = "json")]
    Json,
    // Two-space indented JSON
    #[serde(rename = "ViewPrettyJsonStrategy", alias = "pretty_json")]
    PrettyJson,
}

impl ResponseStrategy {
    pub fn content_type(self) -> &'static str {
        CONTENT_TYPE_JSON
    }
}

impl fmt::Display for ResponseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::PrettyJson => f.write_str("pretty_json"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown view strategy '{0}' (expected 'json' or 'pretty_json')")]
pub struct UnknownStrategy(String);

impl FromStr for ResponseStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "viewjsonstrategy" => Ok(Self::Json),
            "pretty_json" | "pretty" | "viewprettyjsonstrategy" => Ok(Self::PrettyJson),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("the JSON view strategy must be enabled")]
    JsonStrategyMissing,
    #[error("view strategy '{0}' is selected but not enabled by the module")]
    StrategyNotEnabled(ResponseStrategy),
}

/// Renders responses with one of the strategies the module enables.
#[derive(Clone, Debug)]
pub struct ViewManager {
    selected: ResponseStrategy,
}

impl ViewManager {
    pub fn new(enabled: &[ResponseStrategy], selected: ResponseStrategy) -> Result<Self, ViewError> {
        if !enabled.contains(&ResponseStrategy::Json) {
            return Err(ViewError::JsonStrategyMissing);
        }
        if !enabled.contains(&selected) {
            return Err(ViewError::StrategyNotEnabled(selected));
        }

        Ok(Self { selected })
    }

    pub fn selected(&self) -> ResponseStrategy {
        self.selected
    }

    /// Serializes `value` with the selected strategy.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        match self.selected {
            ResponseStrategy::Json => Ok(serde_json::to_vec(value)?),
            ResponseStrategy::PrettyJson => Ok(to_two_space_indented_json(value)?.into_bytes()),
        }
    }
}


// End of file: /src/view/mod.rs
