// File: src/controllers.rs
// Purpose: Controller modules backing the demo app's routes

use once_cell::sync::Lazy;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use tracing::{debug, info};
use virgule::{hook, Controller, ControllerExports, ControllerRegistry, HookError, HookReply};

static USERS: Lazy<HashMap<&'static str, JsonValue>> = Lazy::new(|| {
    HashMap::from([
        ("alice", json!({ "name": "Alice", "location": "Earth" })),
        ("bob", json!({ "name": "Bob", "location": "Mars" })),
    ])
});

/// Builds the registry for the demo app
///
/// Keys follow the routes-tree convention: the module file's path relative
/// to the routes root, without extension. `users/_user/index` lives in the
/// mirrored controllers directory; `api/status/index` is colocated with its
/// route.
pub fn build_registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();

    registry.register("users/_user/index", || {
        Ok(Controller::Exports(
            ControllerExports::new()
                .before(hook(|ctx| async move {
                    debug!("{} {}", ctx.method, ctx.path);
                    Ok(HookReply::Skip)
                }))
                .get(hook(|ctx| async move {
                    let user = ctx.param("user").and_then(|name| USERS.get(name));
                    match user {
                        Some(user) => Ok(HookReply::Data(json!({ "user": user }))),
                        None => Err(HookError::with_status(404, "no such user")),
                    }
                }))
                .after(hook(|ctx| async move {
                    debug!("{} {} answered", ctx.method, ctx.path);
                    Ok(HookReply::Skip)
                }))
                .init(|key| info!("Controller {key} ready")),
        ))
    });

    registry.register("api/status/index", || {
        Ok(Controller::Handler(hook(|_ctx| async {
            Ok(HookReply::Data(json!({
                "service": "virgule-demo",
                "status": "ok",
            })))
        })))
    });

    registry
}
