//! Node storage.
//!
//! Nodes live in a slot arena addressed by [`NodeId`]. Siblings form a chain
//! through their `next` and `previous` links; a parent points into its
//! children's chain through `child_head`. Nodes without a parent form
//! root-level chains that are only reachable through their members.
//!
//! [`Tree::create`] makes the first child created under a parent that
//! parent's `child_head` and links nothing else. [`Tree::append`] splices a
//! node in after any sibling, so the head is the first node *created* into a
//! chain, which is not necessarily the first one in `next` order.

use std::ops::Index;

use slotmap::{SlotMap, new_key_type};

use crate::error::{Error, Result};
use crate::scope::Scope;

new_key_type! {
    /// Handle to a node in a [`Tree`]. Stable until the node is destroyed.
    pub struct NodeId;
}

const NODE_BYTES: usize = std::mem::size_of::<Node>();

#[derive(Debug)]
pub struct Node {
    name: String,
    label: Option<String>,
    parent: Option<NodeId>,
    child_head: Option<NodeId>,
    next: Option<NodeId>,
    previous: Option<NodeId>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label cached while the node is shown with children.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Entry point into this node's children chain.
    pub fn child_head(&self) -> Option<NodeId> {
        self.child_head
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    pub fn has_children(&self) -> bool {
        self.child_head.is_some()
    }

    /// Whether the node has a neighbour on either side.
    pub fn has_neighbours(&self) -> bool {
        self.next.is_some() || self.previous.is_some()
    }
}

/// A node taken out of its chain by [`Tree::pop`].
///
/// Only detached nodes can be handed to [`Tree::destroy`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a detached node is freed by Tree::destroy or when its tree is dropped"]
pub struct Detached(NodeId);

impl Detached {
    pub fn id(&self) -> NodeId {
        self.0
    }
}

/// Arena of nodes.
///
/// Dropping a tree releases every node still in it.
#[derive(Debug, Default)]
pub struct Tree {
    nodes: SlotMap<NodeId, Node>,
    scope: Scope,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree whose allocations are charged to `scope`.
    pub fn with_scope(scope: Scope) -> Self {
        Self {
            scope,
            ..Default::default()
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    /// Number of live nodes, linked or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether `id` is part of a chain: it has a neighbour or it is its
    /// parent's child head.
    pub fn is_linked(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        node.has_neighbours() || node.parent.is_some_and(|p| self.child_head(p) == Some(id))
    }

    // -------------------------------------------------------------------------
    // Store operations
    // -------------------------------------------------------------------------

    /// Allocate a node named `name` under `parent`.
    ///
    /// The node becomes the parent's child head if the parent has none yet.
    /// It is not spliced into any chain. On failure nothing is allocated.
    pub fn create(&mut self, parent: Option<NodeId>, name: &str) -> Result<NodeId> {
        if let Some(parent) = parent.filter(|&p| !self.nodes.contains_key(p)) {
            return Err(Error::UnknownNode(parent));
        }

        self.scope.charge(NODE_BYTES)?;
        let name = match self.scope.copy_str(name) {
            Ok(name) => name,
            Err(e) => {
                self.scope.release(NODE_BYTES);
                return Err(e);
            }
        };

        let id = self.nodes.insert(Node {
            name,
            label: None,
            parent,
            child_head: None,
            next: None,
            previous: None,
        });

        let mut head = false;
        if let Some(p) = parent
            .and_then(|p| self.nodes.get_mut(p))
            .filter(|p| p.child_head.is_none())
        {
            p.child_head = Some(id);
            head = true;
        }

        log::trace!("create {:?} {:?} under {:?} (head: {})", id, self.nodes[id].name, parent, head);
        Ok(id)
    }

    /// Splice `right` into the chain immediately after `left`.
    ///
    /// `left` may be anywhere in a chain, or on its own. Nothing is updated
    /// but the four links involved; in particular the parent's child head
    /// is left alone even when `right` is it.
    ///
    /// # Panics
    ///
    /// If `right` already has a neighbour, if `left` and `right` are the
    /// same node, if the two do not share a parent, or if either is unknown.
    pub fn append(&mut self, left: NodeId, right: NodeId) {
        assert_ne!(left, right, "append: cannot append {left:?} to itself");
        let after = {
            let (l, r) = (&self.nodes[left], &self.nodes[right]);
            assert!(!r.has_neighbours(), "append: right node {right:?} is already linked");
            assert_eq!(
                l.parent, r.parent,
                "append: {left:?} and {right:?} are on different levels"
            );
            l.next
        };

        if let Some(after) = after {
            self.nodes[after].previous = Some(right);
        }
        let r = &mut self.nodes[right];
        r.next = after;
        r.previous = Some(left);
        self.nodes[left].next = Some(right);
        log::trace!("append {:?} after {:?}", right, left);
    }

    /// Detach the node under `cursor` from its chain.
    ///
    /// Its neighbours are joined, and the cursor moves to the detached node's
    /// previous neighbour, else its next neighbour, else `None`. A parent
    /// whose child head is the detached node moves its head to the next
    /// neighbour, else the previous one.
    pub fn pop(&mut self, cursor: &mut Option<NodeId>) -> Option<Detached> {
        let id = cursor.take()?;
        let node = self.nodes.get_mut(id)?;
        let (parent, previous, next) = (node.parent, node.previous.take(), node.next.take());

        if let Some(previous) = previous {
            self.nodes[previous].next = next;
        }
        if let Some(next) = next {
            self.nodes[next].previous = previous;
        }
        if let Some(p) = parent
            .and_then(|p| self.nodes.get_mut(p))
            .filter(|p| p.child_head == Some(id))
        {
            p.child_head = next.or(previous);
        }
        *cursor = previous.or(next);

        log::trace!("pop {:?}, cursor now {:?}", id, cursor);
        Some(Detached(id))
    }

    /// Head of the chain `node` belongs to.
    ///
    /// For a node with a parent this is the parent's child head. A root-level
    /// node has no parent to ask, so its `previous` links are walked to the
    /// front of the chain.
    pub fn first_of_level(&self, node: NodeId) -> Result<NodeId> {
        let n = self.nodes.get(node).ok_or(Error::UnknownNode(node))?;
        if let Some(head) = n.parent.and_then(|p| self.child_head(p)) {
            return Ok(head);
        }

        let mut head = node;
        while let Some(previous) = self.previous(head) {
            head = previous;
        }
        Ok(head)
    }

    /// Free a detached node.
    ///
    /// # Panics
    ///
    /// If the node still has children or was linked again after it was
    /// popped.
    pub fn destroy(&mut self, node: Detached) {
        let id = node.id();
        let n = &self.nodes[id];
        assert!(
            n.child_head.is_none(),
            "destroy: node {:?} ({:?}) still has children",
            id,
            n.name
        );
        assert!(!n.has_neighbours(), "destroy: node {id:?} is linked");

        if let Some(n) = self.nodes.remove(id) {
            self.scope.release(n.name.len());
            if let Some(label) = n.label {
                self.scope.release(label.len());
            }
            self.scope.release(NODE_BYTES);
        }
    }

    /// Destroy every node of the chain containing `head`, and all of their
    /// descendants, children before parents.
    ///
    /// Runs on an explicit stack so depth is bounded only by memory. Nodes
    /// created under a parent but never linked are not reachable from any
    /// chain and stay in the arena until the tree is dropped.
    pub fn destroy_subtree(&mut self, head: NodeId) {
        // Popped nodes waiting for their children to go, with the cursor to
        // resume their own chain from.
        let mut pending: Vec<(Detached, Option<NodeId>)> = Vec::new();
        let mut cursor = Some(head).filter(|&h| self.contains(h));
        let mut destroyed = 0usize;

        loop {
            if let Some(node) = self.pop(&mut cursor) {
                match self.nodes[node.id()].child_head {
                    Some(child) => {
                        pending.push((node, cursor));
                        cursor = Some(child);
                    }
                    None => {
                        self.destroy(node);
                        destroyed += 1;
                    }
                }
            } else if let Some((node, resume)) = pending.pop() {
                self.nodes[node.id()].child_head = None;
                self.destroy(node);
                destroyed += 1;
                cursor = resume;
            } else {
                break;
            }
        }

        log::debug!("destroyed {} nodes from the chain of {:?}", destroyed, head);
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn child_head(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.child_head
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.next
    }

    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.previous
    }

    /// Walk `next` links starting at `head`, inclusive.
    ///
    /// Starting mid-chain yields only the suffix. A node without neighbours
    /// is a chain of one.
    pub fn chain(&self, head: NodeId) -> Chain<'_> {
        Chain {
            tree: self,
            next: self.contains(head).then_some(head),
        }
    }

    /// Parent, grandparent, and so on up to a root-level node.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    // -------------------------------------------------------------------------
    // Label cache
    // -------------------------------------------------------------------------

    /// Attach an already charged label to `id`.
    ///
    /// # Panics
    ///
    /// If the node already has a label cached.
    pub(crate) fn cache_label(&mut self, id: NodeId, label: String) {
        let Some(node) = self.nodes.get_mut(id) else {
            self.scope.release(label.len());
            return;
        };
        assert!(
            node.label.is_none(),
            "label for {:?} ({:?}) is already cached",
            id,
            node.name
        );
        node.label = Some(label);
    }

    pub(crate) fn clear_label(&mut self, id: NodeId) {
        if let Some(label) = self.nodes.get_mut(id).and_then(|n| n.label.take()) {
            self.scope.release(label.len());
        }
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

/// Iterator returned by [`Tree::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Chain<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.next(id);
        Some(id)
    }
}

/// Iterator returned by [`Tree::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.parent(id);
        Some(id)
    }
}
