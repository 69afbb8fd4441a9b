/// File-tree description consumed by the route deriver
///
/// The deriver never touches the file system itself: a walker (the host's or
/// the one shipped with the framework crate) produces this structure once at
/// startup, and everything downstream reads it immutably.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::SystemTime;

/// Stat metadata captured for a leaf file at walk time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileMeta {
    /// File size in bytes
    pub len: u64,
    /// Last modification time, when the walker can provide one
    pub modified: Option<SystemTime>,
}

/// A single file inside the walked tree
#[derive(Debug, Clone, PartialEq)]
pub struct FileLeaf {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Stat metadata recorded when the tree was produced
    pub meta: FileMeta,
}

impl FileLeaf {
    pub fn new(path: impl Into<PathBuf>, meta: FileMeta) -> Self {
        Self {
            path: path.into(),
            meta,
        }
    }
}

/// Nested description of a directory subtree
///
/// Directories map child names to nodes. A `BTreeMap` keeps the children in
/// lexicographic order, so every traversal of the same tree visits leaves in
/// the same order — collisions between leaves that derive to the same URI
/// resolve reproducibly (last visited wins).
///
/// # Examples
///
/// ```
/// use virgule_router::TreeNode;
///
/// let tree = TreeNode::dir()
///     .with_child("index.html", TreeNode::leaf("/app/routes/index.html"))
///     .with_child(
///         "users",
///         TreeNode::dir().with_child("_user", TreeNode::dir()),
///     );
///
/// assert!(tree.is_dir());
/// assert_eq!(tree.leaves().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// A directory: child name → node
    Dir(BTreeMap<String, TreeNode>),
    /// A file
    Leaf(FileLeaf),
}

impl TreeNode {
    /// Creates an empty directory node
    pub fn dir() -> Self {
        TreeNode::Dir(BTreeMap::new())
    }

    /// Creates a leaf node with default metadata
    pub fn leaf(path: impl Into<PathBuf>) -> Self {
        TreeNode::Leaf(FileLeaf::new(path, FileMeta::default()))
    }

    /// Creates a leaf node carrying stat metadata
    pub fn leaf_with_meta(path: impl Into<PathBuf>, meta: FileMeta) -> Self {
        TreeNode::Leaf(FileLeaf::new(path, meta))
    }

    /// Adds a child to a directory node, returning the modified node
    ///
    /// Functional builder in the same spirit as the route builders: each call
    /// consumes and returns `Self`, so trees compose as expressions. Calling
    /// this on a leaf is a no-op (leaves have no children).
    pub fn with_child(self, name: impl Into<String>, child: TreeNode) -> Self {
        match self {
            TreeNode::Dir(mut children) => {
                children.insert(name.into(), child);
                TreeNode::Dir(children)
            }
            leaf => leaf,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// Collects every leaf in the subtree, depth-first, children in
    /// lexicographic name order
    ///
    /// This is the traversal order the deriver uses; it is deterministic for
    /// a given tree regardless of how the walker discovered the files.
    pub fn leaves(&self) -> Vec<&FileLeaf> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a FileLeaf>) {
        match self {
            TreeNode::Dir(children) => {
                for child in children.values() {
                    child.collect_leaves(out);
                }
            }
            TreeNode::Leaf(leaf) => out.push(leaf),
        }
    }
}
