// File: src/error_pages.rs
// Purpose: Wire the not-found / server-error / bad-CSRF responders

use crate::config::ErrorPagesConfig;
use crate::context::RequestContext;
use crate::host::{HostServer, TemplateSource};
use crate::render::{ErrorInfo, RenderData, RenderTarget, ViewRenderer};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use virgule_router::RouteTable;

/// Plain-text bodies used when no view covers an error page
pub const NOT_FOUND_FALLBACK: &str = "404 – Not Found.";
pub const SERVER_ERROR_FALLBACK: &str = "500 – Internal Server Error.";
pub const BAD_CSRF_FALLBACK: &str =
    "Your browser did something unexpected. Try refreshing the page. Contact us if the problem persists.";

/// One wired error responder: context and render data in, response out
pub type ErrorResponder = Arc<dyn Fn(&RequestContext, RenderData) -> Response + Send + Sync>;

/// The three responders the host falls back to
///
/// `not_found` answers unmatched URIs, `server_error` answers host-level
/// faults, `bad_csrf` answers rejected CSRF tokens. Each one either renders
/// the configured view or serves its built-in plain-text body.
#[derive(Clone)]
pub struct ErrorPages {
    pub not_found: ErrorResponder,
    pub server_error: ErrorResponder,
    pub bad_csrf: ErrorResponder,
}

impl std::fmt::Debug for ErrorPages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorPages").finish_non_exhaustive()
    }
}

/// Where each error page's view comes from, before wiring
///
/// Configuration is consulted first; slots it leaves empty are filled from
/// the routes tree (`/404`, `/500`, `/422` view routes). A slot that is
/// still empty wires up as a plain-text fallback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorPageSources {
    pub not_found: Option<PathBuf>,
    pub server_error: Option<PathBuf>,
    pub bad_csrf: Option<PathBuf>,
}

impl ErrorPageSources {
    /// Resolves configured error-page views against the routes root
    pub fn from_config(config: &ErrorPagesConfig, routes_root: &Path) -> Self {
        let resolve = |rel: &Option<String>| rel.as_ref().map(|rel| routes_root.join(rel));
        Self {
            not_found: resolve(&config.not_found),
            server_error: resolve(&config.server_error),
            bad_csrf: resolve(&config.bad_csrf),
        }
    }

    /// Fills empty slots from the derived route table
    ///
    /// Only view routes count; a controller at `/404` is not an error page.
    /// Configured slots are never overridden.
    pub fn supplement_from_table(mut self, table: &RouteTable) -> Self {
        let view_at = |uri: &str| table.get(uri).and_then(|entry| entry.view.clone());
        if self.not_found.is_none() {
            self.not_found = view_at("/404");
        }
        if self.server_error.is_none() {
            self.server_error = view_at("/500");
        }
        if self.bad_csrf.is_none() {
            self.bad_csrf = view_at("/422");
        }
        self
    }
}

/// Builds the three responders, registers their templates on the host and
/// installs them
///
/// Template registration always happens for all three names (`"404"`,
/// `"500"`, `"bad-csrf-token"`), with the built-in plain-text body standing
/// in when no view was found. The server-error responder renders by template
/// name rather than by path, so a host can re-point `"500"` later without
/// rewiring.
pub fn wire_error_pages(
    sources: ErrorPageSources,
    renderer: Arc<dyn ViewRenderer>,
    host: &mut dyn HostServer,
) -> ErrorPages {
    let not_found: ErrorResponder = match &sources.not_found {
        Some(path) => {
            let renderer = renderer.clone();
            let path = path.clone();
            Arc::new(move |ctx, mut data| {
                data.status.get_or_insert(404);
                if data.error.is_none() {
                    data.error = Some(ErrorInfo {
                        message: "Not found.".to_string(),
                        status: 404,
                        code: None,
                    });
                }
                data.force_template_name = true;
                renderer.render(ctx, RenderTarget::Path(path.clone()), data)
            })
        }
        None => Arc::new(|_ctx, data| {
            let message = data
                .error
                .map(|error| error.message)
                .unwrap_or_else(|| "Not Found.".to_string());
            plain(404, format!("404 – {message}"))
        }),
    };

    let server_error: ErrorResponder = match &sources.server_error {
        Some(_path) => {
            let renderer = renderer.clone();
            Arc::new(move |ctx, mut data| {
                data.status.get_or_insert(500);
                data.force_template_name = true;
                renderer.render(ctx, RenderTarget::template("500"), data)
            })
        }
        None => Arc::new(|_ctx, _data| plain(500, SERVER_ERROR_FALLBACK.to_string())),
    };

    let bad_csrf: ErrorResponder = match &sources.bad_csrf {
        Some(path) => {
            let renderer = renderer.clone();
            let path = path.clone();
            Arc::new(move |ctx, mut data| {
                data.status.get_or_insert(422);
                data.force_template_name = true;
                renderer.render(ctx, RenderTarget::Path(path.clone()), data)
            })
        }
        None => Arc::new(|_ctx, _data| plain(422, BAD_CSRF_FALLBACK.to_string())),
    };

    register(host, "404", &sources.not_found, NOT_FOUND_FALLBACK);
    register(host, "500", &sources.server_error, SERVER_ERROR_FALLBACK);
    register(host, "bad-csrf-token", &sources.bad_csrf, BAD_CSRF_FALLBACK);

    let pages = ErrorPages {
        not_found,
        server_error,
        bad_csrf,
    };
    host.set_error_pages(pages.clone());
    pages
}

fn register(host: &mut dyn HostServer, name: &str, source: &Option<PathBuf>, fallback: &str) {
    let source = match source {
        Some(path) => TemplateSource::File(path.clone()),
        None => TemplateSource::Inline(fallback.to_string()),
    };
    host.register_template(name, source, true);
}

fn plain(status: u16, body: String) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, body).into_response()
}
