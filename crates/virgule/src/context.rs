// File: src/context.rs
// Purpose: Request context passed to hooks and renderers

use axum::http::{HeaderMap, Method};
use std::collections::HashMap;

/// Request context handed to every hook
///
/// The host builds one per request from its own request type; hooks and the
/// renderer only ever see this view of it.
#[derive(Clone)]
pub struct RequestContext {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: Method,

    /// Request path as matched by the host
    pub path: String,

    /// Path parameters extracted from the matched route pattern
    pub params: PathParams,

    /// Query parameters from the URL (?key=value)
    pub query: QueryParams,

    /// Request headers
    pub headers: HeaderMap,
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish()
    }
}

impl RequestContext {
    /// Create a new request context
    pub fn new(
        method: Method,
        path: impl Into<String>,
        params: PathParams,
        query: QueryParams,
        headers: HeaderMap,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            params,
            query,
            headers,
        }
    }

    /// A bare GET request for the given path
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(
            Method::GET,
            path,
            PathParams::default(),
            QueryParams::default(),
            HeaderMap::new(),
        )
    }

    /// Functional builder: same context with a different method
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Functional builder: same context with one more path parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Get a path parameter value
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Get a header value
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

/// Path parameters extracted from the matched route pattern
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    params: HashMap<String, String>,
}

impl PathParams {
    /// Create from HashMap
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a parameter value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.as_str())
    }

    /// Insert a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Check if a parameter exists
    pub fn has(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get as HashMap
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.params
    }
}

/// Query parameters from URL
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Create from HashMap
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a query parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(|v| v.as_str())
    }

    /// Get a query parameter as a specific type
    pub fn get_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.params.get(key)?.parse().ok()
    }

    /// Check if a parameter exists
    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Get as HashMap
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.params
    }
}
