// File: src/scan.rs
// Purpose: Walk the routes directory into a route tree

use crate::error::ScanError;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use virgule_router::{FileMeta, TreeNode};

/// Scans the routes directory into a tree
///
/// Children are keyed by file name, so every level is already in
/// lexicographic order and route derivation is deterministic. The walk is
/// synchronous; initialization runs it on a blocking task.
///
/// A missing or unreadable root is an error. Deeper traversal failures
/// surface the same way, tagged with the root that was being scanned.
pub fn scan_routes(root: &Path) -> Result<TreeNode, ScanError> {
    scan_dir(root).map_err(|source| ScanError {
        path: root.to_path_buf(),
        source,
    })
}

fn scan_dir(dir: &Path) -> io::Result<TreeNode> {
    let mut children = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // file_type does not follow symlinks; a linked directory stays a leaf
        let node = if entry.file_type()?.is_dir() {
            scan_dir(&entry.path())?
        } else {
            let meta = entry
                .metadata()
                .map(|m| FileMeta {
                    len: m.len(),
                    modified: m.modified().ok(),
                })
                .unwrap_or_default();
            TreeNode::leaf_with_meta(entry.path(), meta)
        };
        children.insert(name, node);
    }
    Ok(TreeNode::Dir(children))
}
