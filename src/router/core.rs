use std::sync::Arc;
use tracing::{debug, info, warn};

use super::matcher::{PatternMatcher, RouteMatcher};
use crate::request::{Method, RequestContext};
use crate::routes::{ResolvedTarget, RouteDefinition, RouteTarget, SharedRouteTable};

/// Two-phase resolver: declared routes in order, then convention fallback.
///
/// Holds the shared route table, so a reload is picked up by the next
/// resolution without rebuilding the resolver.
#[derive(Clone)]
pub struct RouteResolver {
    table: SharedRouteTable,
    matcher: Arc<dyn RouteMatcher>,
}

impl RouteResolver {
    #[must_use]
    pub fn new(table: SharedRouteTable) -> Self {
        Self::with_matcher(table, Arc::new(PatternMatcher))
    }

    #[must_use]
    pub fn with_matcher(table: SharedRouteTable, matcher: Arc<dyn RouteMatcher>) -> Self {
        Self { table, matcher }
    }

    #[must_use]
    pub fn table(&self) -> &SharedRouteTable {
        &self.table
    }

    /// Resolve `ctx` to a controller, action and arguments.
    ///
    /// Phase 1 stops at the first declared route that matches. Phase 2 only
    /// runs when phase 1 finds nothing, and its synthetic route is checked
    /// by the same matcher. `None` means no route.
    #[must_use]
    pub fn resolve(&self, ctx: &RequestContext) -> Option<ResolvedTarget> {
        let table = self.table.load();

        debug!(
            request_id = %ctx.request_id(),
            method = %ctx.method(),
            path = %ctx.path(),
            declared_routes = table.len(),
            "Route resolution started"
        );

        for (name, route) in table.declared_routes() {
            if let Some(mut target) = self.matcher.check(route, ctx) {
                target.source_route_name = Some(name.clone());
                info!(
                    request_id = %ctx.request_id(),
                    method = %ctx.method(),
                    path = %ctx.path(),
                    route_name = %name,
                    route_pattern = %route.route,
                    controller = %target.controller_name,
                    action = %target.action_name,
                    "Declared route matched"
                );
                return Some(target);
            }
        }

        let mut segments = ctx.path().split('/').skip(1);
        let token = segments.next().unwrap_or_default();
        let arguments: Vec<String> = segments.map(str::to_string).collect();

        let controller = table
            .controller_aliases()
            .get(token)
            .cloned()
            .unwrap_or_else(|| class_name(token));
        let action = convention_action(ctx.method(), arguments.len());

        let synthetic = RouteDefinition::literal(
            ctx.path(),
            RouteTarget::new(controller, action),
            Some(ctx.method()),
            arguments,
        );

        match self.matcher.check(&synthetic, ctx) {
            Some(target) => {
                info!(
                    request_id = %ctx.request_id(),
                    method = %ctx.method(),
                    path = %ctx.path(),
                    controller = %target.controller_name,
                    action = %target.action_name,
                    arguments = ?target.arguments,
                    "Convention route matched"
                );
                Some(target)
            }
            None => {
                warn!(
                    request_id = %ctx.request_id(),
                    method = %ctx.method(),
                    path = %ctx.path(),
                    "No route matched"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for RouteResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteResolver")
            .field("declared_routes", &self.table.load().len())
            .finish_non_exhaustive()
    }
}

/// Class-style identifier for a path token: `user_accounts` → `UserAccounts`.
#[must_use]
pub fn class_name(token: &str) -> String {
    token
        .split(['_', '-', '.', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// REST action for a method and the number of path segments after the controller.
#[must_use]
pub fn convention_action(method: Method, remaining_segments: usize) -> String {
    match method {
        Method::Get if remaining_segments == 0 => "list".to_string(),
        Method::Get => "read".to_string(),
        Method::Post => "create".to_string(),
        Method::Put => "update".to_string(),
        Method::Delete | Method::Head | Method::Options => method.as_str().to_ascii_lowercase(),
    }
}
