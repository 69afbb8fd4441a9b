//! Shared test doubles for the registration integration tests.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::Path;
use std::sync::{Arc, Mutex};
use virgule::{
    ErrorPages, Hook, HostServer, MiddlewareStage, PageHandler, RenderData, RenderTarget,
    RequestContext, TemplateSource, ViewRenderer,
};

/// Host double that records everything registration does to it.
#[derive(Default)]
pub struct FakeHost {
    pub pages: Vec<(String, PageHandler)>,
    pub middleware: Vec<(MiddlewareStage, String)>,
    pub templates: Vec<(String, TemplateSource, bool)>,
    pub error_pages: Option<ErrorPages>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mounted handler for a URI, if one was registered.
    pub fn page(&self, uri: &str) -> Option<PageHandler> {
        self.pages
            .iter()
            .find(|(mounted, _)| mounted.as_str() == uri)
            .map(|(_, handler)| handler.clone())
    }

    /// Every mounted URI, in registration order.
    pub fn uris(&self) -> Vec<&str> {
        self.pages.iter().map(|(uri, _)| uri.as_str()).collect()
    }

    /// The registered template entry for a name, if any.
    pub fn template(&self, name: &str) -> Option<&(String, TemplateSource, bool)> {
        self.templates
            .iter()
            .find(|(registered, _, _)| registered.as_str() == name)
    }
}

impl HostServer for FakeHost {
    fn add_page(&mut self, uri: &str, handler: PageHandler) {
        self.pages.push((uri.to_string(), handler));
    }

    fn add_middleware(&mut self, stage: MiddlewareStage, uri: &str, _hook: Hook) {
        self.middleware.push((stage, uri.to_string()));
    }

    fn set_error_pages(&mut self, pages: ErrorPages) {
        self.error_pages = Some(pages);
    }

    fn register_template(&mut self, name: &str, source: TemplateSource, error_page: bool) {
        self.templates.push((name.to_string(), source, error_page));
    }
}

/// Renderer double: records every call and answers with the data's status.
#[derive(Default)]
pub struct FakeRenderer {
    calls: Mutex<Vec<(RenderTarget, RenderData)>>,
}

impl FakeRenderer {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take_calls(&self) -> Vec<(RenderTarget, RenderData)> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

impl ViewRenderer for FakeRenderer {
    fn render(&self, _ctx: &RequestContext, target: RenderTarget, data: RenderData) -> Response {
        let status = StatusCode::from_u16(data.status.unwrap_or(200)).unwrap_or(StatusCode::OK);
        self.calls.lock().unwrap().push((target, data));
        status.into_response()
    }
}

/// Writes one file, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}
