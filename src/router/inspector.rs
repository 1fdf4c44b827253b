use tracing::debug;

use super::core::RouteResolver;
use crate::dispatcher::{Callback, HandlerRef};
use crate::error::DispatchError;
use crate::request::RequestContext;

/// Outcome of one router inspection.
pub enum Inspection {
    /// The context was rewritten; inspect it again.
    Rewritten(RequestContext),
    /// A handler was found.
    Handler(Box<dyn HandlerRef>),
    /// No route matches.
    NoRoute,
}

impl std::fmt::Debug for Inspection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inspection::Rewritten(ctx) => f.debug_tuple("Rewritten").field(&ctx.path()).finish(),
            Inspection::Handler(h) => f
                .debug_tuple("Handler")
                .field(&format_args!("{}::{}", h.target_class(), h.action()))
                .finish(),
            Inspection::NoRoute => f.write_str("NoRoute"),
        }
    }
}

/// Router capability consumed by the dispatch coordinator.
pub trait Inspector: Send + Sync {
    /// # Errors
    ///
    /// Any failure is normalized by the coordinator like an invocation fault.
    fn inspect(&self, ctx: &RequestContext) -> Result<Inspection, DispatchError>;
}

/// Default router capability backed by a [`RouteResolver`].
///
/// The first inspection runs extension detection and hands back the
/// rewritten context; later inspections resolve it.
#[derive(Debug, Clone)]
pub struct RouteInspector {
    resolver: RouteResolver,
}

impl RouteInspector {
    #[must_use]
    pub fn new(resolver: RouteResolver) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn resolver(&self) -> &RouteResolver {
        &self.resolver
    }
}

impl Inspector for RouteInspector {
    fn inspect(&self, ctx: &RequestContext) -> Result<Inspection, DispatchError> {
        if !ctx.extension_checked() {
            let mut next = ctx.clone();
            next.extension();
            debug!(
                request_id = %ctx.request_id(),
                from = %ctx.path(),
                to = %next.path(),
                "Request rewritten"
            );
            return Ok(Inspection::Rewritten(next));
        }

        Ok(match self.resolver.resolve(ctx) {
            Some(target) => Inspection::Handler(Box::new(Callback::new(target))),
            None => Inspection::NoRoute,
        })
    }
}
