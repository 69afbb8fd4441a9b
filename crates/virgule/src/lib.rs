// Virgule - file-system-convention router for web publishing
// Directory trees become routes; views and controllers merge per URI

pub mod config;
pub mod context;
pub mod error;

// Framework modules
pub mod controller;
pub mod dispatch;
pub mod error_pages;
pub mod hooks;
pub mod host;
pub mod registrar;
pub mod render;
pub mod scan;

// Re-export route derivation from virgule-router
pub use virgule_router::{
    classify_segment, derive_routes, derive_uri, module_key, DeriveOptions, FileLeaf, FileMeta,
    RouteEntry, RouteTable, SegmentKind, TreeNode,
};

// Re-export framework types
pub use config::{Config, ErrorPagesConfig};
pub use context::{PathParams, QueryParams, RequestContext};
pub use controller::{Controller, ControllerExports, ControllerParts, ControllerRegistry, InitHook};
pub use dispatch::{build_handler, RouteShape};
pub use error::{HookError, InitError, ScanError};
pub use error_pages::{wire_error_pages, ErrorPageSources, ErrorPages, ErrorResponder};
pub use hooks::{hook, Hook, HookFuture, HookReply, HookResult, HookSet, MethodKey};
pub use host::{HostServer, MiddlewareStage, PageHandler, TemplateSource};
pub use registrar::{init, InitSummary};
pub use render::{ErrorInfo, RenderData, RenderTarget, ViewRenderer};
pub use scan::scan_routes;

// Re-export commonly used types from dependencies
pub use axum;
pub use axum::http::StatusCode;
