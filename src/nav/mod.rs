//! Documentation navigation
//!
//! [`build_tree`] turns a module's content index into a raw navigation tree, and
//! [`transform`] reshapes such a tree for menu rendering. [`menu`] builds the
//! site's top menu from the module registry.

mod menu;
mod node;
mod transform;
mod tree;

pub use menu::{MenuItem, menu};
pub use node::{CodeKind, CodeTitle, NavigationNode};
pub use transform::transform;
pub use tree::build_tree;
