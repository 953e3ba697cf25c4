//! One level of a tree shown as a menu.

use tuiwin::{Menu, MenuItem, MenuRequest, Rect, Window};

use crate::error::{Error, Result};
use crate::node::{NodeId, Tree};
use crate::scope::Scope;

/// Drawn in front of a node that has children.
pub const EXPAND_MARKER: &str = "+";

/// Drawn in front of the current item.
pub const MARK: &str = "* ";

/// Menus cannot be built empty, so a view starts on this item until the
/// first rebuild replaces it.
const PLACEHOLDER: &str = "12345";

type Item = MenuItem<NodeId>;

/// Labels and items for one rebuild, charged but not yet installed.
#[derive(Debug, Default)]
struct Batch {
    items: Vec<Item>,
    labels: Vec<(NodeId, String)>,
    item_bytes: usize,
}

/// Shows one sibling chain of a [`Tree`] as a selectable menu.
///
/// The view owns the tree it was built from. Every item carries the
/// [`NodeId`] it was built from, so a selection maps straight back to the
/// tree. Nodes with children show as `+name` and keep that label cached for
/// as long as they are displayed.
#[derive(Debug)]
pub struct LevelView {
    tree: Tree,
    root: NodeId,
    menu: Menu<NodeId>,
    /// Scope bytes charged for the items currently installed.
    item_bytes: usize,
    /// Head of the chain currently displayed.
    current: Option<NodeId>,
}

impl LevelView {
    /// Bind a menu to the children of `root`.
    ///
    /// The menu draws into a window derived from `parent` over `region`,
    /// which is relative to `parent`'s origin and clipped to it.
    pub fn new(tree: Tree, root: NodeId, parent: &Window, region: Rect) -> Result<Self> {
        let window = parent.derive(region.height, region.width, region.y, region.x);
        let rows = window.height();
        let mut menu = Menu::new(vec![MenuItem::new(PLACEHOLDER, PLACEHOLDER)], window);
        menu.set_format(rows, 1);
        menu.set_show_description(false);
        menu.set_mark(MARK);

        let mut view = Self {
            tree,
            root,
            menu,
            item_bytes: 0,
            current: None,
        };
        view.update(None)?;
        Ok(view)
    }

    /// Rebuild the items from the chain starting at `chain`.
    ///
    /// `None` means the root's children, not whatever is currently shown. The
    /// chain is walked forward from the given node, so pass a chain head to
    /// see the whole level. Either the new level is installed completely or,
    /// on error, the displayed items and cached labels are left as they were.
    /// The menu is left unposted; call [`show`](Self::show) afterwards.
    pub fn update(&mut self, chain: Option<NodeId>) -> Result<()> {
        let head = chain.or_else(|| self.tree.child_head(self.root));
        self.rebind(head)
    }

    /// Install the chain starting at `head`; `None` is an empty level.
    fn rebind(&mut self, head: Option<NodeId>) -> Result<()> {
        let batch = self.build(head)?;
        let count = batch.items.len();

        // NotPosted only means there is nothing to erase.
        let _ = self.menu.unpost();
        let previous = match self.menu.set_items(batch.items) {
            Ok(previous) => previous,
            Err(e) => {
                self.release_labels(batch.labels);
                self.tree.scope_mut().release(batch.item_bytes);
                return Err(e.into());
            }
        };

        for item in &previous {
            if let Some(id) = item.user() {
                self.tree.clear_label(id);
            }
        }
        if self.item_bytes > 0 {
            self.tree.scope_mut().release(self.item_bytes);
        }
        self.item_bytes = batch.item_bytes;

        for (id, label) in batch.labels {
            self.tree.cache_label(id, label);
        }
        self.current = head;

        log::debug!("level view: {} items from chain {:?}", count, head);
        Ok(())
    }

    fn build(&mut self, head: Option<NodeId>) -> Result<Batch> {
        let ids: Vec<NodeId> = head.map(|h| self.tree.chain(h).collect()).unwrap_or_default();

        let mut batch = Batch::default();
        if ids.is_empty() {
            return Ok(batch);
        }

        batch.item_bytes = Scope::array_bytes::<Item>(ids.len());
        batch.items = self.tree.scope_mut().array(ids.len())?;

        for id in ids {
            let node = &self.tree[id];
            let label = if node.has_children() {
                let name = node.name().to_owned();
                match self.tree.scope_mut().prefixed(EXPAND_MARKER, &name) {
                    Ok(label) => {
                        batch.labels.push((id, label.clone()));
                        label
                    }
                    Err(e) => {
                        self.release_labels(batch.labels);
                        self.tree.scope_mut().release(batch.item_bytes);
                        return Err(e);
                    }
                }
            } else {
                node.name().to_owned()
            };
            let description = self.tree[id].name().to_owned();
            batch.items.push(MenuItem::new(label, description).with_user(id));
        }

        Ok(batch)
    }

    fn release_labels(&mut self, labels: Vec<(NodeId, String)>) {
        for (_, label) in labels {
            self.tree.scope_mut().release(label.len());
        }
    }

    /// Post the menu and refresh its window.
    pub fn show(&mut self) -> Result<()> {
        self.menu.post()?;
        self.menu.window_mut().refresh();
        Ok(())
    }

    /// Tear the view down, destroying the chain rooted where it was built.
    ///
    /// Teardown starts from the construction root regardless of which level
    /// is displayed. The emptied tree is handed back so its scope can be
    /// checked for leftovers.
    pub fn free(mut self) -> Tree {
        let _ = self.menu.unpost();
        if let Ok(items) = self.menu.set_items(Vec::new()) {
            for item in &items {
                if let Some(id) = item.user() {
                    self.tree.clear_label(id);
                }
            }
        }
        if self.item_bytes > 0 {
            self.tree.scope_mut().release(self.item_bytes);
        }

        self.tree.destroy_subtree(self.root);
        log::debug!(
            "level view freed: {} nodes, {} bytes left in scope",
            self.tree.len(),
            self.tree.scope().used()
        );
        self.tree
    }

    // -------------------------------------------------------------------------
    // Selection and navigation
    // -------------------------------------------------------------------------

    /// Node behind the current item.
    pub fn selected(&self) -> Option<NodeId> {
        self.menu.current().and_then(|item| item.user())
    }

    /// Move the current item to the one showing `node`. Returns whether
    /// `node` is displayed.
    pub fn select(&mut self, node: NodeId) -> bool {
        let Some(index) = self.menu.items().iter().position(|item| item.user() == Some(node)) else {
            return false;
        };
        if self.menu.set_current(index).is_err() {
            return false;
        }
        self.menu.window_mut().refresh();
        true
    }

    /// Forward a navigation request. Returns whether the current item moved.
    pub fn drive(&mut self, request: MenuRequest) -> bool {
        let moved = self.menu.drive(request).is_ok();
        if moved {
            self.menu.window_mut().refresh();
        }
        moved
    }

    /// Show the children of `node`.
    pub fn descend(&mut self, node: NodeId) -> Result<()> {
        let head = self
            .tree
            .get(node)
            .ok_or(Error::UnknownNode(node))?
            .child_head();
        self.rebind(head)?;
        self.show()
    }

    /// Show the level containing `node` with `node` selected.
    pub fn ascend(&mut self, node: NodeId) -> Result<()> {
        let head = self.tree.first_of_level(node)?;
        self.update(Some(head))?;
        self.select(node);
        self.show()
    }

    /// Descend into the selected node. Returns `false` when nothing is
    /// selected or the selection has no children.
    pub fn enter(&mut self) -> Result<bool> {
        match self.selected() {
            Some(node) if self.tree.get(node).is_some_and(|n| n.has_children()) => {
                self.descend(node)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Go up to the level holding the displayed chain's parent. Returns
    /// `false` at the top, where the parent is the root itself.
    pub fn leave(&mut self) -> Result<bool> {
        let parent = self.current.and_then(|head| self.tree.parent(head));
        match parent {
            Some(parent) if parent != self.root => {
                self.ascend(parent)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the tree.
    ///
    /// Nodes removed while displayed stay in the menu until the next
    /// [`update`](Self::update); pass the current head to refresh.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Head of the chain currently displayed, `None` for an empty level.
    pub fn current_head(&self) -> Option<NodeId> {
        self.current
    }

    pub fn items(&self) -> &[MenuItem<NodeId>] {
        self.menu.items()
    }

    pub fn menu(&self) -> &Menu<NodeId> {
        &self.menu
    }

    pub fn window(&self) -> &Window {
        self.menu.window()
    }

    pub fn window_mut(&mut self) -> &mut Window {
        self.menu.window_mut()
    }
}
