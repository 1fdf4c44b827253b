use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DispatchError, Fault};
use crate::request::RequestContext;
use crate::routes::ResolvedTarget;

/// Application controller. `method` is the bound action method name
/// (e.g. `read_action`); `Ok(None)` means the action produced no body.
pub trait Controller: Send {
    /// # Errors
    ///
    /// Whatever the action raises; the code on the error picks the status.
    fn call(
        &mut self,
        method: &str,
        args: &[String],
        ctx: &RequestContext,
    ) -> Result<Option<Value>, DispatchError>;
}

/// Builds a fresh controller instance per request.
pub type ControllerFactory = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Controller factories by class name.
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Arc::new(factory));
    }

    #[must_use]
    pub fn with<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    #[must_use]
    pub fn instantiate(&self, name: &str) -> Option<Box<dyn Controller>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Registered class names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.names())
            .finish()
    }
}

/// Bindable reference to a controller action.
///
/// The router hands one out; the coordinator binds a controller instance,
/// a method name and arguments, then invokes it.
pub trait HandlerRef: Send {
    /// Controller class to instantiate.
    fn target_class(&self) -> &str;
    fn action(&self) -> &str;
    fn arguments(&self) -> &[String];
    fn bind_object(&mut self, controller: Box<dyn Controller>);
    fn bind_method(&mut self, method: String);
    fn bind_arguments(&mut self, args: Vec<String>);

    /// # Errors
    ///
    /// Fails when nothing is bound, or with whatever the controller raises.
    fn invoke(&mut self, ctx: &RequestContext) -> Result<Option<Value>, DispatchError>;
}

/// Default [`HandlerRef`] built from a [`ResolvedTarget`].
pub struct Callback {
    target: ResolvedTarget,
    object: Option<Box<dyn Controller>>,
    method: Option<String>,
    bound_args: Option<Vec<String>>,
}

impl Callback {
    #[must_use]
    pub fn new(target: ResolvedTarget) -> Self {
        Self {
            target,
            object: None,
            method: None,
            bound_args: None,
        }
    }

    #[must_use]
    pub fn target(&self) -> &ResolvedTarget {
        &self.target
    }

    /// Method name bound so far, if any.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("target", &self.target)
            .field("bound", &self.object.is_some())
            .field("method", &self.method)
            .finish()
    }
}

impl HandlerRef for Callback {
    fn target_class(&self) -> &str {
        &self.target.controller_name
    }

    fn action(&self) -> &str {
        &self.target.action_name
    }

    fn arguments(&self) -> &[String] {
        self.bound_args.as_deref().unwrap_or(&self.target.arguments)
    }

    fn bind_object(&mut self, controller: Box<dyn Controller>) {
        self.object = Some(controller);
    }

    fn bind_method(&mut self, method: String) {
        self.method = Some(method);
    }

    fn bind_arguments(&mut self, args: Vec<String>) {
        self.bound_args = Some(args);
    }

    fn invoke(&mut self, ctx: &RequestContext) -> Result<Option<Value>, DispatchError> {
        let Some(object) = self.object.as_mut() else {
            return Err(Fault::new(500, "Handler invoked without a controller").into());
        };
        let method = self
            .method
            .as_deref()
            .unwrap_or(self.target.action_name.as_str());
        let args = self.bound_args.as_deref().unwrap_or(&self.target.arguments);
        object.call(method, args, ctx)
    }
}
