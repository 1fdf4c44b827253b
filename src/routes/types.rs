use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::pattern::RoutePattern;
use crate::request::Method;

/// The `Controller::action` pair a route points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    pub controller: String,
    pub action: String,
}

impl RouteTarget {
    #[must_use]
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl FromStr for RouteTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once("::") {
            Some((controller, action)) if !controller.is_empty() && !action.is_empty() => {
                Ok(RouteTarget::new(controller, action))
            }
            _ => Err(format!("callback '{s}' is not of the form Controller::action")),
        }
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller, self.action)
    }
}

/// Route definition as written in a route source document.
#[derive(Debug, Clone, Deserialize)]
struct RawRouteDefinition {
    route: String,
    callback: String,
    #[serde(default, alias = "verb")]
    method: Option<Method>,
    #[serde(default)]
    arguments: Vec<String>,
}

/// A route: path template, target, optional method constraint and static
/// leading arguments.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawRouteDefinition")]
pub struct RouteDefinition {
    pub route: String,
    pub target: RouteTarget,
    pub method: Option<Method>,
    pub arguments: Vec<String>,
    pattern: RoutePattern,
}

impl RouteDefinition {
    /// # Errors
    ///
    /// Fails when `route` does not compile to a pattern.
    pub fn new(
        route: &str,
        target: RouteTarget,
        method: Option<Method>,
        arguments: Vec<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            route: route.to_string(),
            pattern: RoutePattern::compile(route)?,
            target,
            method,
            arguments,
        })
    }

    /// Definition matching `path` verbatim, placeholders or not.
    #[must_use]
    pub fn literal(
        path: &str,
        target: RouteTarget,
        method: Option<Method>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            route: path.to_string(),
            pattern: RoutePattern::Literal(path.to_string()),
            target,
            method,
            arguments,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }
}

impl TryFrom<RawRouteDefinition> for RouteDefinition {
    type Error = String;

    fn try_from(raw: RawRouteDefinition) -> Result<Self, Self::Error> {
        let target = raw.callback.parse()?;
        RouteDefinition::new(&raw.route, target, raw.method, raw.arguments)
            .map_err(|e| format!("route '{}' does not compile: {e}", raw.route))
    }
}

/// Where a request ends up: controller, action and positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedTarget {
    pub controller_name: String,
    pub action_name: String,
    pub arguments: Vec<String>,
    /// Set when a declared route produced this target.
    pub source_route_name: Option<String>,
}
