// File: src/registrar.rs
// Purpose: One-time registration of the derived routes onto a host

use crate::config::Config;
use crate::controller::{ControllerParts, ControllerRegistry};
use crate::dispatch::{build_handler, RouteShape};
use crate::error::InitError;
use crate::error_pages::{wire_error_pages, ErrorPageSources};
use crate::host::HostServer;
use crate::render::ViewRenderer;
use crate::scan::scan_routes;
use std::path::Path;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info, warn};
use virgule_router::{derive_routes, module_key, DeriveOptions, RouteEntry};

/// What one `init` pass registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitSummary {
    /// Pages mounted on the host
    pub routes: usize,
    /// Routes that got controller behavior attached
    pub controllers: usize,
    /// Load failures and unsupported exports, logged and skipped
    pub warnings: usize,
}

struct LoadedController {
    key: String,
    parts: ControllerParts,
}

/// Scans the routes directory and registers every derived route on the host
///
/// The filesystem walk runs on a blocking task; everything after it is pure
/// bookkeeping. A failed scan is logged and aborts initialization. A broken
/// controller never does: its route still registers, without the controller
/// behavior, and the failure shows up in the summary's warning count.
///
/// Per route, middleware exports are mounted first, then the page handler,
/// then the controller's one-time `init` runs with its module key. Error
/// pages are wired last so tree-derived `/404`, `/500` and `/422` views can
/// fill slots the configuration left empty.
pub async fn init(
    config: &Config,
    app_root: &Path,
    registry: &ControllerRegistry,
    host: &mut dyn HostServer,
    renderer: Arc<dyn ViewRenderer>,
) -> Result<InitSummary, InitError> {
    let routes_root = config.routes_root(app_root);

    let scan_root = routes_root.clone();
    let tree = task::spawn_blocking(move || scan_routes(&scan_root))
        .await?
        .map_err(|err| {
            warn!("{err}");
            err
        })?;

    let options = DeriveOptions {
        controller_ext: config.controller_ext.clone(),
    };
    let table = derive_routes(&tree, &routes_root, &options);

    let mut summary = InitSummary {
        routes: 0,
        controllers: 0,
        warnings: 0,
    };

    for (uri, entry) in &table {
        let loaded = load_controller(config, entry, &routes_root, registry, &mut summary);
        let (parts, key) = match loaded {
            Some(loaded) => (loaded.parts, Some(loaded.key)),
            None => (ControllerParts::empty(), None),
        };

        let shape = match (&entry.view, key.is_some()) {
            (Some(view), true) => RouteShape::ViewAndController {
                view: view.clone(),
                hooks: parts.hooks,
            },
            (None, true) => RouteShape::ControllerOnly { hooks: parts.hooks },
            (Some(view), false) => RouteShape::ViewOnly { view: view.clone() },
            // table invariant: every entry has a view or a controller
            (None, false) => continue,
        };

        for (stage, hook) in parts.middleware {
            host.add_middleware(stage, uri, hook);
        }
        host.add_page(uri, build_handler(shape, renderer.clone(), config.production));
        if let Some(init_hook) = parts.init {
            init_hook(key.as_deref().unwrap_or_default());
        }

        debug!("Registered route {uri}");
        summary.routes += 1;
    }

    let sources = ErrorPageSources::from_config(&config.error_pages, &routes_root)
        .supplement_from_table(&table);
    wire_error_pages(sources, renderer, host);

    info!(
        "Registered {} routes ({} with controllers, {} warnings)",
        summary.routes, summary.controllers, summary.warnings
    );
    Ok(summary)
}

/// Resolves the controller behavior for one route entry
///
/// A colocated controller leaf keys the registry by its own path. A view
/// without one falls back to the mirrored key when a controllers directory
/// is configured. A key nobody registered is not an error: the colocated
/// case keeps its controller shape with no hooks, the mirrored case stays a
/// plain view route. Factory failures are logged and leave the route
/// hook-less rather than unregistered.
fn load_controller(
    config: &Config,
    entry: &RouteEntry,
    routes_root: &Path,
    registry: &ControllerRegistry,
    summary: &mut InitSummary,
) -> Option<LoadedController> {
    if let Some(controller_path) = &entry.controller {
        let key = module_key(controller_path, routes_root);
        let parts = classify_loaded(registry, &key, summary).unwrap_or_else(ControllerParts::empty);
        return Some(LoadedController { key, parts });
    }

    if config.controllers_dir.is_some() {
        if let Some(view) = &entry.view {
            let key = module_key(view, routes_root);
            if let Some(parts) = classify_loaded(registry, &key, summary) {
                return Some(LoadedController { key, parts });
            }
        }
    }

    None
}

/// Loads and classifies one registered controller, counting what it finds
///
/// `None` only when the key was never registered.
fn classify_loaded(
    registry: &ControllerRegistry,
    key: &str,
    summary: &mut InitSummary,
) -> Option<ControllerParts> {
    match registry.load(key)? {
        Ok(controller) => {
            summary.controllers += 1;
            let parts = controller.classify(key);
            summary.warnings += parts.warnings;
            Some(parts)
        }
        Err(err) => {
            warn!("Controller {key} failed to load: {err:#}");
            summary.warnings += 1;
            Some(ControllerParts::empty())
        }
    }
}
