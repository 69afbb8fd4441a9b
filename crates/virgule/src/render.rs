// File: src/render.rs
// Purpose: Render targets, render data, and the view renderer port

use crate::context::RequestContext;
use crate::error::HookError;
use axum::response::Response;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// What the renderer should render
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderTarget {
    /// A view file on disk, as derived from the routes tree
    Path(PathBuf),
    /// A registered template, addressed by name (`"404"`, `"500"`, …)
    Template(String),
}

impl RenderTarget {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        RenderTarget::Path(path.into())
    }

    pub fn template(name: impl Into<String>) -> Self {
        RenderTarget::Template(name.into())
    }
}

/// Error details exposed to views and JSON payloads
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<&HookError> for ErrorInfo {
    fn from(err: &HookError) -> Self {
        Self {
            message: err.message.clone(),
            status: err.status,
            code: err.code.clone(),
        }
    }
}

/// Everything a view render carries besides the target
///
/// Serializes to the template's field map: hook data fields are flattened at
/// the top level, error details appear under `error`, and the dispatch-only
/// flags stay out of the payload.
#[derive(Debug, Default, Serialize)]
pub struct RenderData {
    /// Response status; renderers treat `None` as 200
    #[serde(skip)]
    pub status: Option<u16>,
    /// Render the route's own view even if the data names another template
    #[serde(skip)]
    pub force_template_name: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, JsonValue>,
}

impl RenderData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds render data from a hook's data value
    ///
    /// An object contributes its fields; a `statusCode` field becomes the
    /// response status and is stripped from the fields. Anything that is not
    /// an object renders the view with no fields at all.
    pub fn from_value(value: JsonValue) -> Self {
        let mut data = Self::new();
        if let JsonValue::Object(mut map) = value {
            if let Some(code) = map.remove("statusCode") {
                data.status = code.as_u64().and_then(|n| u16::try_from(n).ok());
            }
            data.fields = map;
        }
        data
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_force_template_name(mut self) -> Self {
        self.force_template_name = true;
        self
    }
}

/// The rendering port the dispatcher talks to
///
/// Rendering is synchronous string work over already-loaded context, so the
/// port stays a plain function; hosts wrap it in an `Arc` and share it across
/// handlers.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, ctx: &RequestContext, target: RenderTarget, data: RenderData) -> Response;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_value_extracts_and_strips_status_code() {
        let data = RenderData::from_value(json!({
            "user": "alice",
            "statusCode": 201,
        }));

        assert_eq!(data.status, Some(201));
        assert_eq!(data.fields.get("user"), Some(&json!("alice")));
        assert!(!data.fields.contains_key("statusCode"));
    }

    #[test]
    fn test_from_value_strips_non_numeric_status_code() {
        let data = RenderData::from_value(json!({ "statusCode": "created" }));

        assert_eq!(data.status, None);
        assert!(data.fields.is_empty());
    }

    #[test]
    fn test_from_value_ignores_non_objects() {
        let data = RenderData::from_value(json!(["a", "b"]));

        assert_eq!(data.status, None);
        assert!(data.fields.is_empty());
    }

    #[test]
    fn test_serialization_flattens_fields_and_hides_flags() {
        let mut data = RenderData::from_value(json!({ "title": "Home" }));
        data.status = Some(404);
        data.force_template_name = true;

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value, json!({ "title": "Home" }));
    }

    #[test]
    fn test_serialization_exposes_error_details() {
        let err = HookError::with_status(404, "no such user").code("E_USER");
        let data = RenderData::new().with_error(ErrorInfo::from(&err));

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            json!({
                "error": {
                    "message": "no such user",
                    "status": 404,
                    "code": "E_USER",
                }
            })
        );
    }

    #[test]
    fn test_error_info_skips_absent_code() {
        let info = ErrorInfo {
            message: "boom".into(),
            status: 500,
            code: None,
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value, json!({ "message": "boom", "status": 500 }));
    }
}
