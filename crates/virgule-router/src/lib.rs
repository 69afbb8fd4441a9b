//! # Virgule Router
//!
//! Zero-dependency derivation of URL routes from a file-system convention:
//! the structure of a directory tree *is* the route table.
//!
//! - `users/profile.html` → `/users/profile`
//! - `users/_user/index.html` → `/users/:user` (leading `_` marks a parameter)
//! - `index` and the bare `_` alias collapse into the parent directory
//! - a view file and a controller file with the same stem merge into one
//!   route entry
//!
//! The crate is deliberately I/O-free: a walker produces a [`TreeNode`]
//! describing the routes directory, and [`derive_routes`] turns it into a
//! [`RouteTable`]. Traversal is lexicographic (directories are ordered maps),
//! so the same tree always derives the same table — including which leaf wins
//! when two of them collide on a URI.
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//! use virgule_router::{derive_routes, DeriveOptions, TreeNode};
//!
//! let tree = TreeNode::dir()
//!     .with_child("index.html", TreeNode::leaf("/app/routes/index.html"))
//!     .with_child(
//!         "users",
//!         TreeNode::dir().with_child(
//!             "_user",
//!             TreeNode::dir()
//!                 .with_child("index.html", TreeNode::leaf("/app/routes/users/_user/index.html"))
//!                 .with_child("index.rs", TreeNode::leaf("/app/routes/users/_user/index.rs")),
//!         ),
//!     );
//!
//! let table = derive_routes(&tree, Path::new("/app/routes"), &DeriveOptions::default());
//!
//! assert!(table.contains_key("/"));
//! let users = &table["/users/:user"];
//! assert!(users.view.is_some() && users.controller.is_some());
//! ```

pub mod derive;
pub mod segment;
pub mod tree;

// Re-export commonly used types
pub use derive::{derive_routes, derive_uri, module_key, DeriveOptions, RouteEntry, RouteTable};
pub use segment::{classify_segment, SegmentKind};
pub use tree::{FileLeaf, FileMeta, TreeNode};
