//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes, highest priority first
//! - Look up the matching route for a request path
//! - Return the matched route or an explicit RouteNotFound
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - O(n) scan over rules (acceptable for typical route counts)
//! - The fallback rule must rank strictly below every other rule

use std::collections::HashSet;

use tracing::debug;

use super::error::RoutingError;
use super::pattern::{split_path, SegmentPattern};
use super::rule::{RouteRule, RouteType};

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: String,
    pub controller: String,
    pub action: String,
    pub requires_auth: bool,
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    rule: RouteRule,
    pattern: SegmentPattern,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    fallback: String,
}

impl RouteTable {
    /// Compiles `rules` and checks that `fallback` names the lowest-priority rule.
    pub fn new(rules: Vec<RouteRule>, fallback: &str) -> Result<Self, RoutingError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut routes: Vec<CompiledRoute> = Vec::with_capacity(rules.len());

        for rule in rules {
            if !seen.insert(rule.name.clone()) {
                return Err(RoutingError::DuplicateRoute(rule.name));
            }

            let pattern: SegmentPattern = compile(&rule)?;
            routes.push(CompiledRoute { rule, pattern });
        }

        let fallback_priority: i32 = routes
            .iter()
            .find(|r| r.rule.name == fallback)
            .map(|r| r.rule.priority)
            .ok_or_else(|| RoutingError::MissingFallback(fallback.to_string()))?;

        if let Some(shadowed) = routes
            .iter()
            .find(|r| r.rule.name != fallback && r.rule.priority <= fallback_priority)
        {
            return Err(RoutingError::FallbackNotLowest {
                fallback: fallback.to_string(),
                fallback_priority,
                route: shadowed.rule.name.clone(),
                route_priority: shadowed.rule.priority,
            });
        }

        // Stable sort: equal priorities keep registration order
        routes.sort_by(|a, b| b.rule.priority.cmp(&a.rule.priority));

        debug!(
            "Compiled {} routes: {:?}",
            routes.len(),
            routes.iter().map(|r| (&r.rule.name, r.rule.priority)).collect::<Vec<_>>()
        );

        Ok(Self {
            routes,
            fallback: fallback.to_string(),
        })
    }

    /// Returns the first rule, by priority, whose pattern matches `path`.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch, RoutingError> {
        let segments: Vec<&str> = split_path(path);

        self.routes
            .iter()
            .find_map(|route| {
                route.pattern.match_segments(&segments).map(|params| RouteMatch {
                    route: route.rule.name.clone(),
                    controller: route.rule.defaults.controller.clone(),
                    action: route.rule.defaults.action.clone(),
                    requires_auth: route.rule.requires_auth(),
                    params,
                })
            })
            .ok_or_else(|| RoutingError::RouteNotFound {
                path: path.to_string(),
            })
    }

    /// Fails on the first rule whose controller `is_registered` rejects.
    pub fn check_controllers(&self, is_registered: impl Fn(&str) -> bool) -> Result<(), RoutingError> {
        match self
            .routes
            .iter()
            .find(|r| !is_registered(&r.rule.defaults.controller))
        {
            Some(route) => Err(RoutingError::UnknownController {
                route: route.rule.name.clone(),
                controller: route.rule.defaults.controller.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Rules in lookup order.
    pub fn rules(&self) -> impl Iterator<Item = &RouteRule> {
        self.routes.iter().map(|r| &r.rule)
    }

    pub fn get(&self, name: &str) -> Option<&RouteRule> {
        self.rules().find(|rule| rule.name == name)
    }

    pub fn fallback(&self) -> Option<&RouteRule> {
        self.get(&self.fallback)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}

fn compile(rule: &RouteRule) -> Result<SegmentPattern, RoutingError> {
    let invalid = |reason: String| RoutingError::InvalidPattern {
        route: rule.name.clone(),
        pattern: rule.pattern.clone(),
        reason,
    };

    if rule.kind == RouteType::Literal && (rule.pattern.contains(':') || rule.pattern.contains('[')) {
        return Err(invalid("literal routes cannot declare parameters".to_string()));
    }

    SegmentPattern::parse(&rule.pattern).map_err(|err| invalid(err.to_string()))
}
