use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;

use super::types::RouteDefinition;

/// Route table shared between requests; swapped wholesale on reload.
pub type SharedRouteTable = Arc<ArcSwap<RouteTable>>;

/// Declared routes (in declaration order) plus controller aliases.
///
/// Read-only once loaded. Order matters: the first matching route wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    declared: Vec<(String, RouteDefinition)>,
    controllers: HashMap<String, String>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named route. Re-adding a name replaces the route in place.
    pub fn add_route(&mut self, name: &str, route: RouteDefinition) {
        match self.declared.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = route,
            None => self.declared.push((name.to_string(), route)),
        }
    }

    #[must_use]
    pub fn with_route(mut self, name: &str, route: RouteDefinition) -> Self {
        self.add_route(name, route);
        self
    }

    /// Map a path token (e.g. `people`) to a literal controller (e.g. `Users`).
    pub fn add_alias(&mut self, token: &str, controller: &str) {
        self.controllers
            .insert(token.to_string(), controller.to_string());
    }

    #[must_use]
    pub fn with_alias(mut self, token: &str, controller: &str) -> Self {
        self.add_alias(token, controller);
        self
    }

    #[must_use]
    pub fn get_route(&self, name: &str) -> Option<&RouteDefinition> {
        self.declared
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }

    #[must_use]
    pub fn declared_routes(&self) -> &[(String, RouteDefinition)] {
        &self.declared
    }

    #[must_use]
    pub fn controller_aliases(&self) -> &HashMap<String, String> {
        &self.controllers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.declared.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Wrap the table for sharing with resolvers and the hot reloader.
    #[must_use]
    pub fn into_shared(self) -> SharedRouteTable {
        Arc::new(ArcSwap::from_pointee(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::RouteTarget;

    fn def(route: &str, target: &str) -> RouteDefinition {
        RouteDefinition::new(route, target.parse().unwrap(), None, vec![]).unwrap()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let table = RouteTable::new()
            .with_route("b", def("/b", "B::x"))
            .with_route("a", def("/a", "A::x"));
        let names: Vec<_> = table.declared_routes().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_readding_name_replaces_in_place() {
        let table = RouteTable::new()
            .with_route("first", def("/one", "One::x"))
            .with_route("second", def("/two", "Two::x"))
            .with_route("first", def("/uno", "Uno::x"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.declared_routes()[0].0, "first");
        assert_eq!(
            table.get_route("first").map(|r| &r.target),
            Some(&RouteTarget::new("Uno", "x"))
        );
    }

    #[test]
    fn test_defaults_are_empty() {
        let table = RouteTable::default();
        assert!(table.is_empty());
        assert!(table.controller_aliases().is_empty());
        assert!(table.get_route("missing").is_none());
    }
}
