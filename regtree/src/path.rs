//! Containing-path rendering for the status line.

use tuiwin::Window;

use crate::node::{NodeId, Tree};

pub const SEPARATOR: char = '/';

/// Path of the level containing `node`: a separator, then the name of every
/// ancestor followed by a separator, oldest first.
///
/// The node's own name is not part of it, and neither is the tree root (the
/// parentless ancestor), which is never shown as an item of any level.
pub fn path_of(tree: &Tree, node: NodeId) -> String {
    let mut names: Vec<&str> = tree
        .ancestors(node)
        .filter(|&id| tree.parent(id).is_some())
        .map(|id| tree[id].name())
        .collect();
    names.reverse();

    let mut path = String::from(SEPARATOR);
    for name in names {
        path.push_str(name);
        path.push(SEPARATOR);
    }
    path
}

/// Replace the first row of `line` with the path of `node` and refresh it.
///
/// `None` leaves the window untouched.
pub fn render_path(line: &mut Window, tree: &Tree, node: Option<NodeId>) {
    let Some(node) = node else {
        return;
    };

    line.move_to(0, 0);
    line.clear_to_eol();
    line.print(&path_of(tree, node));
    line.refresh();
}
