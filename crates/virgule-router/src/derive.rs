/// Route derivation: walked file tree → URI-keyed route table
///
/// Pure functions from tree + routes root to the table consumed by the
/// framework layer. No file I/O happens here.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::segment::{classify_segment, SegmentKind};
use crate::tree::TreeNode;

/// Merged view/controller description for one derived URI
///
/// Invariant: at least one of the two paths is set once the entry is in a
/// [`RouteTable`]. Both set is a "view+controller" route, only `view` is a
/// static view route, only `controller` is a JSON/API route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteEntry {
    /// Absolute path of the renderable view file, when one derived here
    pub view: Option<PathBuf>,
    /// Absolute path of the controller module file, when one derived here
    pub controller: Option<PathBuf>,
}

/// Mapping from derived URI to its merged route entry
///
/// A `BTreeMap` so iteration (and therefore registration downstream) is
/// deterministic.
pub type RouteTable = BTreeMap<String, RouteEntry>;

/// Options controlling derivation
#[derive(Debug, Clone)]
pub struct DeriveOptions {
    /// File extension (without the dot) that marks a leaf as a controller
    /// module; every other leaf is a view
    pub controller_ext: String,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            controller_ext: "rs".to_string(),
        }
    }
}

impl DeriveOptions {
    /// Builds options with a custom controller extension
    pub fn with_controller_ext(ext: impl Into<String>) -> Self {
        Self {
            controller_ext: ext.into(),
        }
    }
}

/// Derives the full route table from a walked tree (pure function)
///
/// Visits every leaf depth-first in lexicographic name order and upserts its
/// entry at the derived URI. Controller leaves set the `controller` field,
/// view leaves set `view`; two leaves deriving to the same URI merge into one
/// entry, and same-field collisions silently overwrite — last visited wins,
/// which the deterministic traversal makes reproducible.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use virgule_router::{derive_routes, DeriveOptions, TreeNode};
///
/// let tree = TreeNode::dir().with_child(
///     "users",
///     TreeNode::dir()
///         .with_child("index.html", TreeNode::leaf("/app/routes/users/index.html"))
///         .with_child("index.rs", TreeNode::leaf("/app/routes/users/index.rs")),
/// );
///
/// let table = derive_routes(&tree, Path::new("/app/routes"), &DeriveOptions::default());
/// let entry = &table["/users"];
/// assert!(entry.view.is_some());
/// assert!(entry.controller.is_some());
/// ```
pub fn derive_routes(root: &TreeNode, routes_root: &Path, options: &DeriveOptions) -> RouteTable {
    let mut table = RouteTable::new();

    for leaf in root.leaves() {
        let uri = derive_uri(&leaf.path, routes_root);
        let entry = table.entry(uri).or_default();
        if leaf_is_controller(&leaf.path, options) {
            entry.controller = Some(leaf.path.clone());
        } else {
            entry.view = Some(leaf.path.clone());
        }
    }

    table
}

/// Derives the canonical URI for one leaf file (pure function)
///
/// The leaf's parent directory is taken relative to the routes root (leaving
/// the path untouched when it does not live under the root), each directory
/// name and finally the file stem is classified per [`classify_segment`],
/// and the surviving segments are joined with `/`. An all-collapsed path is
/// the root URI `/`; no URI ever carries a trailing slash.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use virgule_router::derive_uri;
///
/// let root = Path::new("/app/routes");
/// assert_eq!(derive_uri(Path::new("/app/routes/index.html"), root), "/");
/// assert_eq!(derive_uri(Path::new("/app/routes/about.html"), root), "/about");
/// assert_eq!(
///     derive_uri(Path::new("/app/routes/users/_user/index.html"), root),
///     "/users/:user"
/// );
/// ```
pub fn derive_uri(path: &Path, routes_root: &Path) -> String {
    let dir = path.parent().unwrap_or(Path::new(""));
    let rel = dir.strip_prefix(routes_root).unwrap_or(dir);
    let stem = file_stem(path);

    let uri = rel
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .chain(std::iter::once(stem))
        .map(|raw| classify_segment(&raw))
        .fold(String::new(), append_segment);

    if uri.is_empty() {
        "/".to_string()
    } else {
        uri
    }
}

/// Registry key for a leaf's module: the routes-root-relative path without
/// its extension, `/`-separated (pure function)
///
/// This is the conventional identifier a controller factory registers under.
/// The same convention keys a mirrored controllers tree, since the key is
/// relative to whichever root the file lives in.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use virgule_router::module_key;
///
/// let root = Path::new("/app/routes");
/// assert_eq!(
///     module_key(Path::new("/app/routes/users/_user/index.rs"), root),
///     "users/_user/index"
/// );
/// assert_eq!(module_key(Path::new("/app/routes/users/_.rs"), root), "users/_");
/// assert_eq!(module_key(Path::new("/app/routes/404.html"), root), "404");
/// ```
pub fn module_key(path: &Path, routes_root: &Path) -> String {
    let rel = path.strip_prefix(routes_root).unwrap_or(path);
    let mut key = String::new();

    if let Some(parent) = rel.parent() {
        for component in parent.components() {
            if let Component::Normal(name) = component {
                if !key.is_empty() {
                    key.push('/');
                }
                key.push_str(&name.to_string_lossy());
            }
        }
    }

    if !key.is_empty() {
        key.push('/');
    }
    key.push_str(&file_stem(path));
    key
}

/// Appends one classified segment to a URI accumulator
///
/// Pure function: (uri, kind) → uri. Collapsed segments contribute nothing;
/// parameters render with the `:` marker.
fn append_segment(mut uri: String, kind: SegmentKind) -> String {
    match kind {
        SegmentKind::Collapse => {}
        SegmentKind::Param(name) => {
            uri.push_str("/:");
            uri.push_str(&name);
        }
        SegmentKind::Literal(lit) => {
            uri.push('/');
            uri.push_str(&lit);
        }
    }
    uri
}

fn leaf_is_controller(path: &Path, options: &DeriveOptions) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(options.controller_ext.as_str())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> &'static Path {
        Path::new("/app/routes")
    }

    #[test]
    fn test_derive_uri_root_index() {
        assert_eq!(derive_uri(Path::new("/app/routes/index.html"), root()), "/");
    }

    #[test]
    fn test_derive_uri_root_underscore_alias() {
        assert_eq!(derive_uri(Path::new("/app/routes/_.html"), root()), "/");
    }

    #[test]
    fn test_derive_uri_literal() {
        assert_eq!(
            derive_uri(Path::new("/app/routes/about.html"), root()),
            "/about"
        );
    }

    #[test]
    fn test_derive_uri_nested_param_index() {
        assert_eq!(
            derive_uri(Path::new("/app/routes/users/_user/index.html"), root()),
            "/users/:user"
        );
    }

    #[test]
    fn test_derive_uri_param_stem() {
        assert_eq!(
            derive_uri(Path::new("/app/routes/users/_user.html"), root()),
            "/users/:user"
        );
    }

    #[test]
    fn test_derive_uri_no_trailing_slash() {
        let uri = derive_uri(Path::new("/app/routes/users/_user/index.html"), root());
        assert!(!uri.ends_with('/'));
    }

    #[test]
    fn test_derive_uri_outside_root_keeps_full_dir() {
        // A leaf not under the routes root falls back to its own directory.
        assert_eq!(
            derive_uri(Path::new("/elsewhere/docs/about.html"), root()),
            "/elsewhere/docs/about"
        );
    }

    #[test]
    fn test_derive_uri_dot_file() {
        assert_eq!(
            derive_uri(Path::new("/app/routes/.well-known/acme.html"), root()),
            "/.well-known/acme"
        );
    }

    #[test]
    fn test_derive_uri_directory_named_index_collapses() {
        // Segment rules apply uniformly to directory names.
        assert_eq!(
            derive_uri(Path::new("/app/routes/docs/index/intro.html"), root()),
            "/docs/intro"
        );
    }

    #[test]
    fn test_module_key_nested() {
        assert_eq!(
            module_key(Path::new("/app/routes/users/_user/index.rs"), root()),
            "users/_user/index"
        );
    }

    #[test]
    fn test_module_key_root_file() {
        assert_eq!(module_key(Path::new("/app/routes/404.html"), root()), "404");
    }

    #[test]
    fn test_module_key_strips_extension_only() {
        assert_eq!(
            module_key(Path::new("/app/routes/users/_.rs"), root()),
            "users/_"
        );
    }

    #[test]
    fn test_derive_routes_merges_view_and_controller() {
        let tree = TreeNode::dir().with_child(
            "users",
            TreeNode::dir()
                .with_child("_.html", TreeNode::leaf("/app/routes/users/_.html"))
                .with_child("_.rs", TreeNode::leaf("/app/routes/users/_.rs")),
        );

        let table = derive_routes(&tree, root(), &DeriveOptions::default());
        assert_eq!(table.len(), 1);
        let entry = &table["/users"];
        assert_eq!(entry.view, Some(PathBuf::from("/app/routes/users/_.html")));
        assert_eq!(entry.controller, Some(PathBuf::from("/app/routes/users/_.rs")));
    }

    #[test]
    fn test_derive_routes_custom_controller_ext() {
        let tree =
            TreeNode::dir().with_child("api.ctrl", TreeNode::leaf("/app/routes/api.ctrl"));

        let options = DeriveOptions::with_controller_ext("ctrl");
        let table = derive_routes(&tree, root(), &options);
        assert!(table["/api"].controller.is_some());
        assert!(table["/api"].view.is_none());
    }

    #[test]
    fn test_derive_routes_last_visited_wins() {
        // Two view leaves deriving to the same URI: lexicographic traversal
        // makes "index.md" the last one visited.
        let tree = TreeNode::dir()
            .with_child("index.html", TreeNode::leaf("/app/routes/index.html"))
            .with_child("index.md", TreeNode::leaf("/app/routes/index.md"));

        let table = derive_routes(&tree, root(), &DeriveOptions::default());
        assert_eq!(table["/"].view, Some(PathBuf::from("/app/routes/index.md")));
    }

    #[test]
    fn test_derive_routes_empty_dirs_yield_nothing() {
        let tree = TreeNode::dir().with_child("empty", TreeNode::dir());
        let table = derive_routes(&tree, root(), &DeriveOptions::default());
        assert!(table.is_empty());
    }
}
