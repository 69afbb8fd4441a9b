// File: src/host.rs
// Purpose: The host server port routes are registered against

use crate::context::RequestContext;
use crate::error_pages::ErrorPages;
use crate::hooks::Hook;
use axum::response::Response;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

/// A fully dispatched page: context in, response out
///
/// Built by the dispatcher from a route's shape; the host mounts it at the
/// route's URI and calls it per request.
pub type PageHandler =
    Arc<dyn Fn(RequestContext) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// Where a route-scoped middleware hook runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddlewareStage {
    /// Ahead of the page handler; may short-circuit with a response
    Before,
    /// After the page handler has produced its response
    After,
    /// Plain middleware mounted on the route's path
    Use,
}

impl MiddlewareStage {
    /// Parses a controller export name (`"before"`, `"after"`, `"use"`)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "before" => Some(MiddlewareStage::Before),
            "after" => Some(MiddlewareStage::After),
            "use" => Some(MiddlewareStage::Use),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MiddlewareStage::Before => "before",
            MiddlewareStage::After => "after",
            MiddlewareStage::Use => "use",
        }
    }
}

/// Template bodies handed to the host at registration time
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// Read the template from a view file
    File(PathBuf),
    /// Use this literal body; carries the built-in error-page fallbacks
    Inline(String),
}

/// The server the router registers pages on
///
/// Initialization drives this port: one `add_page` per derived URI, one
/// `add_middleware` per middleware export, then the error-page wiring. The
/// reference host adapts it onto an axum `Router`; tests record the calls.
pub trait HostServer {
    /// Mounts a page handler at a URI (`/users/:user` style parameters)
    fn add_page(&mut self, uri: &str, handler: PageHandler);

    /// Mounts a middleware hook on a URI at the given stage
    fn add_middleware(&mut self, stage: MiddlewareStage, uri: &str, hook: Hook);

    /// Installs the not-found / server-error / bad-CSRF responders
    fn set_error_pages(&mut self, pages: ErrorPages);

    /// Registers a named template; `error_page` marks the error-page trio
    fn register_template(&mut self, name: &str, source: TemplateSource, error_page: bool);
}
