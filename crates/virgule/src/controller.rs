// File: src/controller.rs
// Purpose: Controller shapes, export classification, and the controller registry

use crate::hooks::{Hook, HookSet, MethodKey};
use crate::host::MiddlewareStage;
use std::collections::HashMap;
use tracing::warn;

/// One-time setup callback, invoked with the controller's module key right
/// after its route is registered
pub type InitHook = Box<dyn FnOnce(&str) + Send>;

/// How a controller factory builds a registered controller
pub type ControllerFactory = Box<dyn Fn() -> anyhow::Result<Controller> + Send + Sync>;

/// A controller as its module exposes it
///
/// Either one callable that answers every method, or a bag of named exports
/// (`get`, `post`, …, `all`, plus the middleware names `before`, `after`
/// and `use`).
pub enum Controller {
    /// Single callable; installed under every method and the wildcard
    Handler(Hook),
    /// Named exports, classified one by one
    Exports(ControllerExports),
}

/// Builder for the named-exports controller shape
#[derive(Default)]
pub struct ControllerExports {
    exports: Vec<(String, Hook)>,
    init: Option<InitHook>,
}

impl ControllerExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an export under an arbitrary name
    ///
    /// Names outside the known set are rejected with a warning when the
    /// controller is classified; prefer the typed helpers below.
    pub fn export(mut self, name: impl Into<String>, hook: Hook) -> Self {
        self.exports.push((name.into(), hook));
        self
    }

    pub fn get(self, hook: Hook) -> Self {
        self.export("get", hook)
    }

    pub fn head(self, hook: Hook) -> Self {
        self.export("head", hook)
    }

    pub fn post(self, hook: Hook) -> Self {
        self.export("post", hook)
    }

    pub fn put(self, hook: Hook) -> Self {
        self.export("put", hook)
    }

    pub fn delete(self, hook: Hook) -> Self {
        self.export("delete", hook)
    }

    pub fn options(self, hook: Hook) -> Self {
        self.export("options", hook)
    }

    pub fn patch(self, hook: Hook) -> Self {
        self.export("patch", hook)
    }

    /// Answers any method without an explicit binding
    pub fn all(self, hook: Hook) -> Self {
        self.export("all", hook)
    }

    /// Runs before the route handler
    pub fn before(self, hook: Hook) -> Self {
        self.export("before", hook)
    }

    /// Runs after the route handler
    pub fn after(self, hook: Hook) -> Self {
        self.export("after", hook)
    }

    /// Plain middleware on the route's path
    pub fn middleware(self, hook: Hook) -> Self {
        self.export("use", hook)
    }

    /// One-time setup, called with the controller's module key once the
    /// route is registered
    pub fn init<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&str) + Send + 'static,
    {
        self.init = Some(Box::new(f));
        self
    }
}

/// A classified controller, ready for registration
pub struct ControllerParts {
    pub hooks: HookSet,
    pub middleware: Vec<(MiddlewareStage, Hook)>,
    pub init: Option<InitHook>,
    pub warnings: usize,
}

impl ControllerParts {
    /// The parts of no controller at all
    pub fn empty() -> Self {
        Self {
            hooks: HookSet::new(),
            middleware: Vec::new(),
            init: None,
            warnings: 0,
        }
    }
}

impl Controller {
    /// Sorts this controller's surface into hooks, middleware and setup
    ///
    /// `key` is the controller's module key, used to attribute warnings.
    /// Unknown export names are skipped with a warning rather than silently
    /// bound to nothing.
    pub fn classify(self, key: &str) -> ControllerParts {
        let mut parts = ControllerParts::empty();
        match self {
            Controller::Handler(hook) => {
                parts.hooks.install_for_all(hook);
            }
            Controller::Exports(exports) => {
                parts.init = exports.init;
                for (name, hook) in exports.exports {
                    if let Some(method) = MethodKey::parse(&name) {
                        parts.hooks.insert(method, hook);
                    } else if let Some(stage) = MiddlewareStage::parse(&name) {
                        parts.middleware.push((stage, hook));
                    } else {
                        warn!(
                            "In {key} you configured a method {name}, but that's not a supported HTTP method."
                        );
                        parts.warnings += 1;
                    }
                }
            }
        }
        parts
    }
}

/// Registered controller factories, keyed by module key
///
/// A module key is the controller file's path relative to the routes root,
/// without extension: `users/_user/index`, `api/index`. Looking up a key
/// nobody registered is not an error; the route simply has no controller
/// behavior.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under a module key, replacing any previous one
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F)
    where
        F: Fn() -> anyhow::Result<Controller> + Send + Sync + 'static,
    {
        self.factories.insert(key.into(), Box::new(factory));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Builds the controller for a key
    ///
    /// `None` means the key was never registered; `Some(Err(..))` means the
    /// factory itself failed, which the caller logs.
    pub fn load(&self, key: &str) -> Option<anyhow::Result<Controller>> {
        self.factories.get(key).map(|factory| factory())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.factories.keys().collect();
        keys.sort_unstable();
        f.debug_struct("ControllerRegistry")
            .field("keys", &keys)
            .finish()
    }
}
