use serde_json::Value;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::handler::{ControllerRegistry, HandlerRef};
use crate::error::{DispatchError, Severity};
use crate::formatter::Formatter;
use crate::request::RequestContext;
use crate::response::Response;
use crate::router::{Inspection, Inspector};
use crate::runtime_config::RuntimeConfig;
use crate::status::StatusNormalizer;

/// Default bound on router inspections per request.
pub const DEFAULT_MAX_INSPECTIONS: usize = 8;

/// What the coordinator does with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Convert every failure into a normalized response.
    #[default]
    Normalize,
    /// Hand failures back to the caller untouched.
    ReturnOnly,
}

/// Lifecycle of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Start,
    Inspecting,
    Resolved,
    Invoked,
    Formatted,
    Failed,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DispatchState::Start => "start",
            DispatchState::Inspecting => "inspecting",
            DispatchState::Resolved => "resolved",
            DispatchState::Invoked => "invoked",
            DispatchState::Formatted => "formatted",
            DispatchState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Runs a request through inspection, invocation and formatting.
///
/// Holds no per-request state, so one coordinator serves any number of
/// requests, concurrently if its collaborators allow it.
pub struct DispatchCoordinator {
    inspector: Arc<dyn Inspector>,
    formatter: Option<Arc<dyn Formatter>>,
    controllers: ControllerRegistry,
    normalizer: Arc<StatusNormalizer>,
    mode: DispatchMode,
    max_inspections: usize,
}

impl DispatchCoordinator {
    /// Coordinator with no formatter and no controllers registered.
    #[must_use]
    pub fn new(inspector: Arc<dyn Inspector>) -> Self {
        Self {
            inspector,
            formatter: None,
            controllers: ControllerRegistry::default(),
            normalizer: Arc::new(StatusNormalizer::new()),
            mode: DispatchMode::default(),
            max_inspections: DEFAULT_MAX_INSPECTIONS,
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_controllers(mut self, controllers: ControllerRegistry) -> Self {
        self.controllers = controllers;
        self
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Arc<StatusNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// At least one inspection is always allowed.
    #[must_use]
    pub fn with_max_inspections(mut self, max: usize) -> Self {
        self.max_inspections = max.max(1);
        self
    }

    /// Apply the dispatch settings from a runtime config.
    #[must_use]
    pub fn configured(self, config: &RuntimeConfig) -> Self {
        let mode = if config.return_only {
            DispatchMode::ReturnOnly
        } else {
            DispatchMode::Normalize
        };
        self.with_mode(mode)
            .with_max_inspections(config.max_inspections)
    }

    #[must_use]
    pub fn normalizer(&self) -> &Arc<StatusNormalizer> {
        &self.normalizer
    }

    #[must_use]
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Dispatch one request.
    ///
    /// # Errors
    ///
    /// Only in [`DispatchMode::ReturnOnly`]. In the default mode every
    /// failure comes back as an `Ok` fault response.
    pub fn dispatch(&self, ctx: RequestContext) -> Result<Response, DispatchError> {
        let request_id = ctx.request_id();
        let mut state = DispatchState::Start;

        match self.run(ctx, &mut state) {
            Ok(response) => {
                info!(
                    request_id = %request_id,
                    status = response.status_code(),
                    "Request dispatched"
                );
                Ok(response)
            }
            Err(err) => {
                debug!(
                    request_id = %request_id,
                    from = %state,
                    to = %DispatchState::Failed,
                    error = %err,
                    "Dispatch state transition"
                );
                match self.mode {
                    DispatchMode::ReturnOnly => Err(err),
                    DispatchMode::Normalize => Ok(self.normalizer.from_exception(&err, false)),
                }
            }
        }
    }

    fn run(
        &self,
        mut ctx: RequestContext,
        state: &mut DispatchState,
    ) -> Result<Response, DispatchError> {
        let mut inspections = 0;
        let mut handler = loop {
            if inspections >= self.max_inspections {
                error!(
                    request_id = %ctx.request_id(),
                    limit = self.max_inspections,
                    path = %ctx.path(),
                    "Router kept rewriting the request"
                );
                return Err(DispatchError::InspectionLimit {
                    limit: self.max_inspections,
                });
            }
            inspections += 1;
            self.transition(&ctx, state, DispatchState::Inspecting);

            match self.inspector.inspect(&ctx)? {
                Inspection::Rewritten(next) => ctx = next,
                Inspection::Handler(handler) => break handler,
                Inspection::NoRoute => return Err(DispatchError::NoRoute),
            }
        };
        self.transition(&ctx, state, DispatchState::Resolved);

        let format = ctx.negotiated_format();
        let formatter = match &self.formatter {
            Some(f) if format.as_deref().map_or(true, |fmt| f.supports(fmt)) => Arc::clone(f),
            _ => return Err(DispatchError::UnsupportedFormat { format }),
        };

        self.bind(handler.as_mut())?;
        let result = self.invoke(handler.as_mut(), &ctx)?;
        self.transition(&ctx, state, DispatchState::Invoked);

        let response = formatter.transform(result)?;
        self.transition(&ctx, state, DispatchState::Formatted);
        Ok(response)
    }

    fn bind(&self, handler: &mut dyn HandlerRef) -> Result<(), DispatchError> {
        let class = handler.target_class().to_string();
        let controller = self
            .controllers
            .instantiate(&class)
            .ok_or(DispatchError::UnknownController { name: class })?;
        let method = format!("{}_action", handler.action());
        let args = handler.arguments().to_vec();

        handler.bind_object(controller);
        handler.bind_method(method);
        handler.bind_arguments(args);
        Ok(())
    }

    fn invoke(
        &self,
        handler: &mut dyn HandlerRef,
        ctx: &RequestContext,
    ) -> Result<Option<Value>, DispatchError> {
        match catch_unwind(AssertUnwindSafe(|| handler.invoke(ctx))) {
            Ok(result) => result,
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "controller panicked".to_string());
                error!(
                    request_id = %ctx.request_id(),
                    panic_message = %message,
                    "Controller panicked"
                );
                // answered by this dispatch in either mode
                let fault = self.normalizer.from_runtime_error(
                    Severity::Fatal,
                    &message,
                    file!(),
                    line!(),
                    false,
                );
                Err(fault.into())
            }
        }
    }

    fn transition(&self, ctx: &RequestContext, state: &mut DispatchState, to: DispatchState) {
        let from = *state;
        debug!(
            request_id = %ctx.request_id(),
            from = %from,
            to = %to,
            "Dispatch state transition"
        );
        *state = to;
    }
}

impl fmt::Debug for DispatchCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchCoordinator")
            .field("formatter", &self.formatter.is_some())
            .field("controllers", &self.controllers)
            .field("mode", &self.mode)
            .field("max_inspections", &self.max_inspections)
            .finish_non_exhaustive()
    }
}
