//! Level-at-a-time browsing of a hierarchical node tree.
//!
//! [`Tree`] stores the nodes, [`LevelView`] shows one sibling chain of it in a
//! [`tuiwin::Menu`] and [`path`] renders where the selection sits.

pub mod error;
pub mod node;
pub mod path;
pub mod scope;
pub mod view;

pub use error::{Error, Result};
pub use node::{Ancestors, Chain, Detached, Node, NodeId, Tree};
pub use path::{path_of, render_path};
pub use scope::Scope;
pub use view::LevelView;
