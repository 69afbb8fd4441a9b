// File: src/hooks.rs
// Purpose: Hook signatures and the per-route method → hook mapping

use crate::context::RequestContext;
use crate::error::HookError;
use axum::http::Method;
use axum::response::Response;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// What a hook produced
///
/// Every hook resolves to exactly one of these (or a [`HookError`]); the
/// dispatcher guarantees exactly one of render / send / no-content happens
/// per request.
pub enum HookReply {
    /// Data for the route's view, or the JSON payload on controller-only
    /// routes. On controller-only routes an object's own `statusCode` field
    /// becomes the HTTP status and is stripped from the payload.
    Data(JsonValue),

    /// A complete response the hook built itself; sent as-is, never rendered.
    Response(Response),

    /// Explicitly nothing more to do. The dispatcher answers 204 No Content
    /// and logs, so a skipping hook can never leave the connection hanging.
    Skip,
}

/// Result of awaiting a hook
pub type HookResult = Result<HookReply, HookError>;

/// The boxed future a hook returns
pub type HookFuture = Pin<Box<dyn Future<Output = HookResult> + Send>>;

/// A request hook: one async function from context to reply
///
/// Shared (`Arc`) because the same hook may be installed under several
/// methods and cloned into the per-route handler closure.
pub type Hook = Arc<dyn Fn(RequestContext) -> HookFuture + Send + Sync>;

/// Wraps an async closure into a [`Hook`]
///
/// # Examples
///
/// ```
/// use virgule::hooks::{hook, HookReply};
///
/// let greet = hook(|ctx| async move {
///     let name = ctx.param("user").unwrap_or("stranger").to_string();
///     Ok(HookReply::Data(serde_json::json!({ "user": name })))
/// });
/// # let _ = greet;
/// ```
pub fn hook<F, Fut>(f: F) -> Hook
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Closed enumeration of dispatchable HTTP methods plus the wildcard
///
/// Export names bind by these keys; anything else a controller exports is
/// rejected at classification time with a warning instead of being
/// discovered missing at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKey {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
    /// Matches any method without an explicit binding
    All,
}

impl MethodKey {
    /// Every key, wildcard included; the order single-callable controllers
    /// install themselves in
    pub const ALL_KEYS: [MethodKey; 10] = [
        MethodKey::Get,
        MethodKey::Head,
        MethodKey::Post,
        MethodKey::Put,
        MethodKey::Delete,
        MethodKey::Connect,
        MethodKey::Options,
        MethodKey::Trace,
        MethodKey::Patch,
        MethodKey::All,
    ];

    /// Parses a lower-case export name (`"get"`, `"post"`, …, `"all"`)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "get" => Some(MethodKey::Get),
            "head" => Some(MethodKey::Head),
            "post" => Some(MethodKey::Post),
            "put" => Some(MethodKey::Put),
            "delete" => Some(MethodKey::Delete),
            "connect" => Some(MethodKey::Connect),
            "options" => Some(MethodKey::Options),
            "trace" => Some(MethodKey::Trace),
            "patch" => Some(MethodKey::Patch),
            "all" => Some(MethodKey::All),
            _ => None,
        }
    }

    /// The key for an incoming request method, when it is one we dispatch
    pub fn from_method(method: &Method) -> Option<Self> {
        Self::parse(&method.as_str().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKey::Get => "get",
            MethodKey::Head => "head",
            MethodKey::Post => "post",
            MethodKey::Put => "put",
            MethodKey::Delete => "delete",
            MethodKey::Connect => "connect",
            MethodKey::Options => "options",
            MethodKey::Trace => "trace",
            MethodKey::Patch => "patch",
            MethodKey::All => "all",
        }
    }
}

/// The per-route mapping from method to hook
#[derive(Clone, Default)]
pub struct HookSet {
    hooks: HashMap<MethodKey, Hook>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a hook to one method key, replacing any previous binding
    pub fn insert(&mut self, key: MethodKey, hook: Hook) {
        self.hooks.insert(key, hook);
    }

    /// Installs one hook under every method and the wildcard
    ///
    /// This is how a single-callable controller answers all methods.
    pub fn install_for_all(&mut self, hook: Hook) {
        for key in MethodKey::ALL_KEYS {
            self.hooks.insert(key, hook.clone());
        }
    }

    /// Resolves the hook for an incoming method: the exact binding first,
    /// then the wildcard
    ///
    /// Methods outside the closed enumeration still fall through to the
    /// wildcard, so an `all` controller really does answer everything.
    pub fn resolve(&self, method: &Method) -> Option<&Hook> {
        MethodKey::from_method(method)
            .and_then(|key| self.hooks.get(&key))
            .or_else(|| self.hooks.get(&MethodKey::All))
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }
}

impl std::fmt::Debug for HookSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.hooks.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        f.debug_struct("HookSet").field("methods", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn noop() -> Hook {
        hook(|_ctx| async { Ok(HookReply::Skip) })
    }

    #[rstest]
    #[case("get", Some(MethodKey::Get))]
    #[case("post", Some(MethodKey::Post))]
    #[case("delete", Some(MethodKey::Delete))]
    #[case("patch", Some(MethodKey::Patch))]
    #[case("all", Some(MethodKey::All))]
    #[case("GET", None)]
    #[case("before", None)]
    #[case("fetch", None)]
    fn test_parse_export_names(#[case] name: &str, #[case] expected: Option<MethodKey>) {
        assert_eq!(MethodKey::parse(name), expected);
    }

    #[test]
    fn test_from_method_lowercases() {
        assert_eq!(MethodKey::from_method(&Method::GET), Some(MethodKey::Get));
        assert_eq!(MethodKey::from_method(&Method::PATCH), Some(MethodKey::Patch));
    }

    #[test]
    fn test_resolve_exact_before_wildcard() {
        let mut set = HookSet::new();
        set.insert(MethodKey::Get, noop());
        set.insert(MethodKey::All, noop());

        assert!(set.resolve(&Method::GET).is_some());
        assert!(set.resolve(&Method::POST).is_some()); // falls to wildcard
    }

    #[test]
    fn test_resolve_without_wildcard() {
        let mut set = HookSet::new();
        set.insert(MethodKey::Get, noop());

        assert!(set.resolve(&Method::GET).is_some());
        assert!(set.resolve(&Method::POST).is_none());
    }

    #[test]
    fn test_install_for_all_covers_every_method() {
        let mut set = HookSet::new();
        set.install_for_all(noop());

        assert_eq!(set.len(), MethodKey::ALL_KEYS.len());
        for method in [Method::GET, Method::POST, Method::DELETE, Method::TRACE] {
            assert!(set.resolve(&method).is_some());
        }
    }

    #[test]
    fn test_empty_set_resolves_nothing() {
        let set = HookSet::new();
        assert!(set.resolve(&Method::GET).is_none());
    }
}
