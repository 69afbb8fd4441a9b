//! Integration tests for virgule-router
//!
//! Tests are organized by feature area and cover:
//! - Segment classification (literals, parameters, index/underscore collapse)
//! - URI derivation from leaf paths
//! - Route-table building (view/controller merging, collisions, ordering)
//! - Module-key computation for controller registries

use std::path::{Path, PathBuf};
use virgule_router::*;

fn routes_root() -> &'static Path {
    Path::new("/srv/app/routes")
}

fn leaf(rel: &str) -> TreeNode {
    TreeNode::leaf(routes_root().join(rel))
}

/// A publishing app's routes layout:
///
/// ```text
/// routes/
/// ├── 404.html
/// ├── 422.html
/// ├── 500.html
/// ├── _.html                  << index page (served on `/`)
/// ├── api
/// │   ├── index.rs            << controller-only `/api`
/// │   └── users
/// │       ├── index.rs        << `/api/users`
/// │       └── _username
/// │           └── index.rs    << `/api/users/:username`
/// └── users
///     ├── _.html              << `/users` view
///     ├── _.rs                << `/users` controller
///     └── _user
///         ├── _.html          << `/users/:user` view
///         └── _.rs            << `/users/:user` controller
/// ```
fn example_tree() -> TreeNode {
    TreeNode::dir()
        .with_child("404.html", leaf("404.html"))
        .with_child("422.html", leaf("422.html"))
        .with_child("500.html", leaf("500.html"))
        .with_child("_.html", leaf("_.html"))
        .with_child(
            "api",
            TreeNode::dir()
                .with_child("index.rs", leaf("api/index.rs"))
                .with_child(
                    "users",
                    TreeNode::dir()
                        .with_child("index.rs", leaf("api/users/index.rs"))
                        .with_child(
                            "_username",
                            TreeNode::dir().with_child("index.rs", leaf("api/users/_username/index.rs")),
                        ),
                ),
        )
        .with_child(
            "users",
            TreeNode::dir()
                .with_child("_.html", leaf("users/_.html"))
                .with_child("_.rs", leaf("users/_.rs"))
                .with_child(
                    "_user",
                    TreeNode::dir()
                        .with_child("_.html", leaf("users/_user/_.html"))
                        .with_child("_.rs", leaf("users/_user/_.rs")),
                ),
        )
}

#[test]
fn test_example_tree_uris() {
    let table = derive_routes(&example_tree(), routes_root(), &DeriveOptions::default());

    let mut uris: Vec<_> = table.keys().cloned().collect();
    uris.sort();
    assert_eq!(
        uris,
        vec![
            "/",
            "/404",
            "/422",
            "/500",
            "/api",
            "/api/users",
            "/api/users/:username",
            "/users",
            "/users/:user",
        ]
    );
}

#[test]
fn test_example_tree_shapes() {
    let table = derive_routes(&example_tree(), routes_root(), &DeriveOptions::default());

    // View-only pages
    for uri in ["/", "/404", "/422", "/500"] {
        let entry = &table[uri];
        assert!(entry.view.is_some(), "{uri} should have a view");
        assert!(entry.controller.is_none(), "{uri} should have no controller");
    }

    // Controller-only API endpoints
    for uri in ["/api", "/api/users", "/api/users/:username"] {
        let entry = &table[uri];
        assert!(entry.controller.is_some(), "{uri} should have a controller");
        assert!(entry.view.is_none(), "{uri} should have no view");
    }

    // View + controller pages
    for uri in ["/users", "/users/:user"] {
        let entry = &table[uri];
        assert!(entry.view.is_some() && entry.controller.is_some());
    }
}

#[test]
fn test_alias_segments_become_params_in_order() {
    let tree = TreeNode::dir().with_child(
        "orgs",
        TreeNode::dir().with_child(
            "_org",
            TreeNode::dir().with_child(
                "repos",
                TreeNode::dir().with_child(
                    "_repo",
                    TreeNode::dir().with_child("index.html", leaf("orgs/_org/repos/_repo/index.html")),
                ),
            ),
        ),
    );

    let table = derive_routes(&tree, routes_root(), &DeriveOptions::default());
    assert!(table.contains_key("/orgs/:org/repos/:repo"));
}

#[test]
fn test_index_and_underscore_collapse_identically() {
    let with_index = derive_uri(&routes_root().join("users/index.html"), routes_root());
    let with_alias = derive_uri(&routes_root().join("users/_.html"), routes_root());
    assert_eq!(with_index, "/users");
    assert_eq!(with_alias, "/users");
}

#[test]
fn test_canonical_alias_derivations() {
    assert_eq!(
        derive_uri(&routes_root().join("users/_user/index.html"), routes_root()),
        "/users/:user"
    );
    assert_eq!(
        derive_uri(&routes_root().join("users/_.rs"), routes_root()),
        "/users"
    );
}

#[test]
fn test_colocated_stems_merge_into_one_entry() {
    let tree = TreeNode::dir().with_child(
        "posts",
        TreeNode::dir()
            .with_child("recent.html", leaf("posts/recent.html"))
            .with_child("recent.rs", leaf("posts/recent.rs")),
    );

    let table = derive_routes(&tree, routes_root(), &DeriveOptions::default());
    assert_eq!(table.len(), 1);
    let entry = &table["/posts/recent"];
    assert_eq!(entry.view, Some(routes_root().join("posts/recent.html")));
    assert_eq!(entry.controller, Some(routes_root().join("posts/recent.rs")));
}

#[test]
fn test_controller_collision_is_deterministic() {
    // `api/_.rs` and `api/index.rs` both derive `/api`; lexicographic
    // traversal visits "index.rs" after "_.rs", so it wins.
    let tree = TreeNode::dir().with_child(
        "api",
        TreeNode::dir()
            .with_child("_.rs", leaf("api/_.rs"))
            .with_child("index.rs", leaf("api/index.rs")),
    );

    let table = derive_routes(&tree, routes_root(), &DeriveOptions::default());
    assert_eq!(
        table["/api"].controller,
        Some(routes_root().join("api/index.rs"))
    );
}

#[test]
fn test_table_iterates_in_sorted_uri_order() {
    let table = derive_routes(&example_tree(), routes_root(), &DeriveOptions::default());
    let uris: Vec<_> = table.keys().cloned().collect();
    let mut sorted = uris.clone();
    sorted.sort();
    assert_eq!(uris, sorted);
}

#[test]
fn test_module_keys_for_registry_lookup() {
    assert_eq!(
        module_key(&routes_root().join("api/users/_username/index.rs"), routes_root()),
        "api/users/_username/index"
    );
    assert_eq!(
        module_key(&routes_root().join("users/_.rs"), routes_root()),
        "users/_"
    );
    // View paths key the same way, which is what a mirrored controllers
    // tree relies on.
    assert_eq!(
        module_key(&routes_root().join("users/_user/index.html"), routes_root()),
        "users/_user/index"
    );
}

#[test]
fn test_classify_segment_public_surface() {
    assert_eq!(classify_segment("docs"), SegmentKind::Literal("docs".into()));
    assert_eq!(classify_segment("_slug"), SegmentKind::Param("slug".into()));
    assert_eq!(classify_segment("index"), SegmentKind::Collapse);
    assert_eq!(classify_segment("_"), SegmentKind::Collapse);
}

#[test]
fn test_meta_preserved_on_leaves() {
    let meta = FileMeta {
        len: 128,
        modified: None,
    };
    let tree = TreeNode::dir().with_child(
        "index.html",
        TreeNode::leaf_with_meta(routes_root().join("index.html"), meta.clone()),
    );

    let leaves = tree.leaves();
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].meta, meta);
    assert_eq!(leaves[0].path, PathBuf::from("/srv/app/routes/index.html"));
}
