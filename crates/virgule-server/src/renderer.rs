// File: src/renderer.rs
// Purpose: Render view files and registered templates with variable interpolation

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fs;
use std::sync::RwLock;
use tracing::warn;
use virgule::{RenderData, RenderTarget, RequestContext, TemplateSource, ViewRenderer};

static VAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_\.]*)\}").unwrap());

/// Renders `{name}` / `{a.b.c}` placeholders from the render data's fields
///
/// View files are read per render; named templates (the error-page trio) are
/// looked up in the registered map, which inline fallback bodies also live
/// in. A body that cannot be produced renders as a bare 500 page.
pub struct FileRenderer {
    templates: RwLock<HashMap<String, TemplateSource>>,
}

impl FileRenderer {
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Registers (or replaces) a named template
    pub fn register_template(&self, name: &str, source: TemplateSource) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(name.to_string(), source);
        }
    }

    fn template_body(&self, target: &RenderTarget) -> Option<String> {
        match target {
            RenderTarget::Path(path) => match fs::read_to_string(path) {
                Ok(body) => Some(body),
                Err(err) => {
                    warn!("Failed to read view {path:?}: {err}");
                    None
                }
            },
            RenderTarget::Template(name) => {
                let source = self.templates.read().ok()?.get(name).cloned();
                match source {
                    Some(TemplateSource::Inline(body)) => Some(body),
                    Some(TemplateSource::File(path)) => match fs::read_to_string(&path) {
                        Ok(body) => Some(body),
                        Err(err) => {
                            warn!("Failed to read template {name} at {path:?}: {err}");
                            None
                        }
                    },
                    None => {
                        warn!("No template registered under {name}");
                        None
                    }
                }
            }
        }
    }
}

impl Default for FileRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for FileRenderer {
    fn render(&self, _ctx: &RequestContext, target: RenderTarget, data: RenderData) -> Response {
        let status = StatusCode::from_u16(data.status.unwrap_or(200))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match self.template_body(&target) {
            Some(body) => body,
            None => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>500 Internal Server Error</h1>".to_string()),
                )
                    .into_response()
            }
        };

        let fields = serde_json::to_value(&data).unwrap_or(JsonValue::Null);
        (status, Html(interpolate(&body, &fields))).into_response()
    }
}

/// Replaces `{name}` and `{a.b.c}` placeholders with values from the fields
///
/// Unknown names keep their placeholder, so a typo stays visible on the page
/// instead of vanishing.
fn interpolate(content: &str, fields: &JsonValue) -> String {
    VAR_REGEX
        .replace_all(content, |caps: &regex::Captures| {
            let name = &caps[1];
            get_nested(fields, name)
                .map(value_to_string)
                .unwrap_or_else(|| format!("{{{name}}}"))
        })
        .to_string()
}

fn get_nested<'a>(fields: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = fields;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

fn value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
