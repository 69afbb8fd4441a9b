// File: src/dispatch.rs
// Purpose: Turn a route's shape into the handler the host mounts

use crate::hooks::{HookReply, HookSet};
use crate::host::PageHandler;
use crate::render::{ErrorInfo, RenderData, RenderTarget, ViewRenderer};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value as JsonValue};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// The three shapes a derived route can take
///
/// Which shape a URI gets is decided once at registration time, from whether
/// the routes tree put a view, a controller, or both at that URI.
#[derive(Debug)]
pub enum RouteShape {
    /// View file plus controller hooks: hooks feed data into the view
    ViewAndController { view: PathBuf, hooks: HookSet },
    /// Controller hooks only: replies are JSON
    ControllerOnly { hooks: HookSet },
    /// View file only: rendered as-is for every method
    ViewOnly { view: PathBuf },
}

/// Builds the page handler for a route shape
///
/// `production` controls whether server-fault messages leak into JSON error
/// bodies; view rendering always goes through `renderer`.
pub fn build_handler(
    shape: RouteShape,
    renderer: Arc<dyn ViewRenderer>,
    production: bool,
) -> PageHandler {
    match shape {
        RouteShape::ViewAndController { view, hooks } => {
            view_controller_handler(view, hooks, renderer)
        }
        RouteShape::ControllerOnly { hooks } => controller_only_handler(hooks, production),
        RouteShape::ViewOnly { view } => view_only_handler(view, renderer),
    }
}

/// View + controller: the hook decides what the view renders
///
/// No hook for the method means the view renders with no data. A data reply
/// renders the route's own view (template name forced) with the reply's
/// fields. Client-fault errors also render the route's own view, carrying
/// the error; server faults are logged once and render the `"500"` template.
fn view_controller_handler(
    view: PathBuf,
    hooks: HookSet,
    renderer: Arc<dyn ViewRenderer>,
) -> PageHandler {
    Arc::new(move |ctx| {
        let view = view.clone();
        let hooks = hooks.clone();
        let renderer = renderer.clone();
        Box::pin(async move {
            let hook = match hooks.resolve(&ctx.method) {
                Some(hook) => hook.clone(),
                None => return renderer.render(&ctx, RenderTarget::Path(view), RenderData::new()),
            };
            match hook(ctx.clone()).await {
                Ok(HookReply::Data(value)) => {
                    let data = RenderData::from_value(value).with_force_template_name();
                    renderer.render(&ctx, RenderTarget::Path(view), data)
                }
                Ok(HookReply::Response(response)) => response,
                Ok(HookReply::Skip) => {
                    debug!(
                        "Hook for {} {} skipped; answering 204",
                        ctx.method, ctx.path
                    );
                    StatusCode::NO_CONTENT.into_response()
                }
                Err(err) => {
                    let data = RenderData::new()
                        .with_status(err.status)
                        .with_error(ErrorInfo::from(&err))
                        .with_force_template_name();
                    if err.is_server_fault() {
                        error!("Hook for {} {} failed: {err}", ctx.method, ctx.path);
                        renderer.render(&ctx, RenderTarget::template("500"), data)
                    } else {
                        renderer.render(&ctx, RenderTarget::Path(view), data)
                    }
                }
            }
        })
    })
}

/// Controller only: replies become JSON responses
///
/// A data reply's own `statusCode` field (stripped from the payload) sets
/// the status, defaulting to 200. No hook for the method is a JSON 404.
/// Server-fault messages are replaced with a generic one in production.
fn controller_only_handler(hooks: HookSet, production: bool) -> PageHandler {
    Arc::new(move |ctx| {
        let hooks = hooks.clone();
        Box::pin(async move {
            let hook = match hooks.resolve(&ctx.method) {
                Some(hook) => hook.clone(),
                None => return json_response(404, json!({ "message": "Not Found" })),
            };
            match hook(ctx.clone()).await {
                Ok(HookReply::Data(mut value)) => {
                    let status = take_status_code(&mut value).unwrap_or(200);
                    json_response(status, value)
                }
                Ok(HookReply::Response(response)) => response,
                Ok(HookReply::Skip) => {
                    warn!(
                        "Hook for {} {} skipped; answering 204",
                        ctx.method, ctx.path
                    );
                    StatusCode::NO_CONTENT.into_response()
                }
                Err(err) => {
                    if err.is_server_fault() {
                        error!("Hook for {} {} failed: {err}", ctx.method, ctx.path);
                        let message = if production {
                            "Internal Server Error".to_string()
                        } else {
                            err.message
                        };
                        json_response(err.status, json!({ "message": message }))
                    } else {
                        let mut body = json!({
                            "message": err.message,
                            "status": err.status,
                        });
                        if let Some(code) = &err.code {
                            body["code"] = json!(code);
                        }
                        json_response(err.status, body)
                    }
                }
            }
        })
    })
}

/// View only: rendered as-is for every method
fn view_only_handler(view: PathBuf, renderer: Arc<dyn ViewRenderer>) -> PageHandler {
    Arc::new(move |ctx| {
        let view = view.clone();
        let renderer = renderer.clone();
        Box::pin(async move { renderer.render(&ctx, RenderTarget::Path(view), RenderData::new()) })
    })
}

/// Pulls `statusCode` out of a data payload
///
/// The field is removed whenever it is present, numeric or not; only a value
/// that fits an HTTP status is returned.
fn take_status_code(value: &mut JsonValue) -> Option<u16> {
    let code = value.as_object_mut()?.remove("statusCode")?;
    code.as_u64().and_then(|n| u16::try_from(n).ok())
}

fn json_response(status: u16, body: JsonValue) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}
