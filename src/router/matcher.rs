use tracing::debug;

use crate::request::RequestContext;
use crate::routes::{ResolvedTarget, RouteDefinition};

/// Tests a single route definition against a request.
///
/// Used for declared routes and, with a synthetic definition, for the
/// convention fallback, so both phases get the same validation.
pub trait RouteMatcher: Send + Sync {
    /// `Some` when the request satisfies the route's pattern and method
    /// constraint. Arguments are the route's static arguments followed by
    /// the bound placeholders in template order.
    fn check(&self, route: &RouteDefinition, ctx: &RequestContext) -> Option<ResolvedTarget>;
}

/// Default matcher over compiled [`RoutePattern`](crate::routes::RoutePattern)s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl RouteMatcher for PatternMatcher {
    fn check(&self, route: &RouteDefinition, ctx: &RequestContext) -> Option<ResolvedTarget> {
        if route.method.is_some_and(|m| m != ctx.method()) {
            return None;
        }
        if route.target.controller.is_empty() || route.target.action.is_empty() {
            debug!(
                request_id = %ctx.request_id(),
                route_pattern = %route.route,
                "Route rejected: callback has no controller or action"
            );
            return None;
        }
        let captured = route.pattern().captures(ctx.path())?;

        let mut arguments = Vec::with_capacity(route.arguments.len() + captured.len());
        arguments.extend(route.arguments.iter().cloned());
        arguments.extend(captured);

        Some(ResolvedTarget {
            controller_name: route.target.controller.clone(),
            action_name: route.target.action.clone(),
            arguments,
            source_route_name: None,
        })
    }
}
