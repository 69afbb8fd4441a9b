// File: src/host.rs
// Purpose: Adapt the host-server port onto an axum Router

use crate::renderer::FileRenderer;
use axum::extract::{Query, RawPathParams};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::any;
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use virgule::{
    ErrorPages, Hook, HookReply, HostServer, MiddlewareStage, PageHandler, PathParams,
    QueryParams, RenderData, RequestContext, TemplateSource,
};

/// Host implementation that accumulates an axum `Router`
///
/// Registration drives this through the port: middleware hooks arrive first
/// and are held until their page shows up, pages mount under their derived
/// URI for every method, and the error pages install a router fallback.
/// `build` finishes the router once registration is done.
pub struct AxumHost {
    router: Router,
    renderer: Arc<FileRenderer>,
    pending: HashMap<String, PendingMiddleware>,
    error_pages: Option<ErrorPages>,
    error_templates: Vec<String>,
    uris: Vec<String>,
}

/// Middleware hooks waiting for their page
///
/// `run_first` keeps before- and use-stage hooks in registration order;
/// they run ahead of the page and may short-circuit with a response.
/// After-stage hooks run once the page has answered; their replies are
/// observed but never sent.
#[derive(Default)]
struct PendingMiddleware {
    run_first: Vec<Hook>,
    run_after: Vec<Hook>,
}

impl AxumHost {
    pub fn new(renderer: Arc<FileRenderer>) -> Self {
        Self {
            router: Router::new(),
            renderer,
            pending: HashMap::new(),
            error_pages: None,
            error_templates: Vec::new(),
            uris: Vec::new(),
        }
    }

    /// URIs mounted so far, in registration order
    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    /// Names registered as error-page templates
    pub fn error_template_names(&self) -> &[String] {
        &self.error_templates
    }

    /// Finishes the router, attaching the not-found fallback
    pub fn build(self) -> Router {
        for uri in self.pending.keys() {
            warn!("Middleware for {uri} was never attached to a page");
        }

        let mut router = self.router;
        if let Some(pages) = self.error_pages {
            let not_found = pages.not_found.clone();
            let fallback = move |method: Method,
                                 uri: Uri,
                                 Query(query): Query<HashMap<String, String>>,
                                 headers: HeaderMap| {
                let not_found = not_found.clone();
                async move {
                    let ctx = RequestContext::new(
                        method,
                        uri.path(),
                        PathParams::default(),
                        QueryParams::new(query),
                        headers,
                    );
                    not_found(&ctx, RenderData::new())
                }
            };
            router = router.fallback(fallback);
        }
        router
    }
}

impl HostServer for AxumHost {
    fn add_page(&mut self, uri: &str, handler: PageHandler) {
        let handler = match self.pending.remove(uri) {
            Some(middleware) => wrap_with_middleware(handler, middleware),
            None => handler,
        };

        let page = move |method: Method,
                         uri: Uri,
                         params: RawPathParams,
                         Query(query): Query<HashMap<String, String>>,
                         headers: HeaderMap| {
            let handler = handler.clone();
            async move {
                let mut path_params = PathParams::default();
                for (name, value) in &params {
                    path_params.insert(name, value);
                }
                let ctx = RequestContext::new(
                    method,
                    uri.path(),
                    path_params,
                    QueryParams::new(query),
                    headers,
                );
                handler(ctx).await
            }
        };

        self.router = std::mem::take(&mut self.router).route(uri, any(page));
        self.uris.push(uri.to_string());
    }

    fn add_middleware(&mut self, stage: MiddlewareStage, uri: &str, hook: Hook) {
        let pending = self.pending.entry(uri.to_string()).or_default();
        match stage {
            MiddlewareStage::Before | MiddlewareStage::Use => pending.run_first.push(hook),
            MiddlewareStage::After => pending.run_after.push(hook),
        }
    }

    fn set_error_pages(&mut self, pages: ErrorPages) {
        self.error_pages = Some(pages);
    }

    fn register_template(&mut self, name: &str, source: TemplateSource, error_page: bool) {
        self.renderer.register_template(name, source);
        if error_page {
            self.error_templates.push(name.to_string());
        }
    }
}

/// Wraps a page handler with its route's middleware hooks
fn wrap_with_middleware(inner: PageHandler, middleware: PendingMiddleware) -> PageHandler {
    let run_first = Arc::new(middleware.run_first);
    let run_after = Arc::new(middleware.run_after);

    Arc::new(move |ctx: RequestContext| {
        let inner = inner.clone();
        let run_first = run_first.clone();
        let run_after = run_after.clone();
        Box::pin(async move {
            for hook in run_first.iter() {
                match hook(ctx.clone()).await {
                    Ok(HookReply::Response(response)) => return response,
                    Ok(_) => {}
                    Err(err) => {
                        warn!("Middleware for {} {} failed: {err}", ctx.method, ctx.path);
                        return (
                            StatusCode::from_u16(err.status)
                                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                            err.message,
                        )
                            .into_response();
                    }
                }
            }

            let response = inner(ctx.clone()).await;

            for hook in run_after.iter() {
                if let Err(err) = hook(ctx.clone()).await {
                    warn!("After middleware for {} {} failed: {err}", ctx.method, ctx.path);
                }
            }
            response
        })
    })
}
