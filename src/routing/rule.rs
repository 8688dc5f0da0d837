//! Declarative route rules as they appear in the module configuration.

use serde::{Deserialize, Serialize};

/// Priority given to rules that do not declare one.
pub const DEFAULT_PRIORITY: i32 = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteType {
    /// Pattern with parameters and optional trailing segments.
    #[default]
    Segment,
    /// Fixed path, no parameters.
    Literal,
}

/// Values handed to the dispatcher when the rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefaults {
    pub controller: String,
    pub action: String,
    #[serde(default)]
    pub isauth: bool,
}

/// A route rule.
///
/// On the wire the pattern and defaults sit under `options`, the shape the
/// declarative module config uses:
/// `{"name", "type", "options": {"route", "defaults"}, "priority"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RouteRuleEntry", into = "RouteRuleEntry")]
pub struct RouteRule {
    pub name: String,
    pub kind: RouteType,
    pub pattern: String,
    pub defaults: RouteDefaults,
    pub priority: i32,
}

#[derive(Serialize, Deserialize)]
struct RouteOptions {
    route: String,
    defaults: RouteDefaults,
}

#[derive(Serialize, Deserialize)]
struct RouteRuleEntry {
    name: String,
    #[serde(rename = "type", default)]
    kind: RouteType,
    options: RouteOptions,
    #[serde(default)]
    priority: i32,
}

impl From<RouteRuleEntry> for RouteRule {
    fn from(entry: RouteRuleEntry) -> Self {
        Self {
            name: entry.name,
            kind: entry.kind,
            pattern: entry.options.route,
            defaults: entry.options.defaults,
            priority: entry.priority,
        }
    }
}

impl From<RouteRule> for RouteRuleEntry {
    fn from(rule: RouteRule) -> Self {
        Self {
            name: rule.name,
            kind: rule.kind,
            options: RouteOptions {
                route: rule.pattern,
                defaults: rule.defaults,
            },
            priority: rule.priority,
        }
    }
}

impl RouteRule {
    pub fn segment(
        name: impl Into<String>,
        pattern: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: RouteType::Segment,
            pattern: pattern.into(),
            defaults: RouteDefaults {
                controller: controller.into(),
                action: action.into(),
                isauth: false,
            },
            priority: DEFAULT_PRIORITY,
        }
    }

    pub fn literal(
        name: impl Into<String>,
        path: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            kind: RouteType::Literal,
            ..Self::segment(name, path, controller, action)
        }
    }

    pub fn with_auth(mut self, requires_auth: bool) -> Self {
        self.defaults.isauth = requires_auth;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn requires_auth(&self) -> bool {
        self.defaults.isauth
    }
}
