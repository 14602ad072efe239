// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, reparenting, snapshots.

use alloc::{vec, vec::Vec};
use smallvec::SmallVec;

use crate::types::{NodeId, Snapshot, SnapshotNode};

type Children = SmallVec<[NodeId; 4]>;

/// A rooted tree of host payloads.
///
/// There is always exactly one root, every other node has exactly one parent,
/// and no node is its own ancestor. Every structural operation preserves
/// these properties; an operation that would break them is a no-op.
///
/// ## Example
///
/// ```rust
/// use grove_tree::Tree;
///
/// let mut tree = Tree::new("root");
/// let a = tree.insert(tree.root(), "a").unwrap();
/// let b = tree.insert(a, "b").unwrap();
///
/// // Moving a node under its own descendant is refused.
/// assert!(!tree.move_node(a, b));
/// assert_eq!(tree.parent_of(b), Some(a));
///
/// // Moving a leaf up to the root is fine.
/// assert!(tree.move_node(b, tree.root()));
/// assert_eq!(tree.children_of(tree.root()), &[a, b]);
/// ```
#[derive(Clone)]
pub struct Tree<P> {
    /// slots
    nodes: Vec<Option<Node<P>>>,
    /// last generation per slot (persists across frees and restores)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
}

impl<P> core::fmt::Debug for Tree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.len();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl<P: Default> Default for Tree<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

#[derive(Clone, Debug)]
struct Node<P> {
    generation: u32,
    parent: Option<NodeId>,
    children: Children,
    payload: P,
}

impl<P> Node<P> {
    fn new(generation: u32, parent: Option<NodeId>, payload: P) -> Self {
        Self {
            generation,
            parent,
            children: Children::new(),
            payload,
        }
    }
}

impl<P> Tree<P> {
    /// Create a tree holding only a root node.
    pub fn new(root: P) -> Self {
        let root_id = NodeId::new(0, 1);
        Self {
            nodes: vec![Some(Node::new(1, None, root))],
            generations: vec![1],
            free_list: Vec::new(),
            root: root_id,
        }
    }

    /// The root node. It has no parent and can never be removed or moved.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// A tree always holds its root, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.generation())
    }

    /// Append a new child holding `payload` under `parent`.
    ///
    /// Returns `None` if `parent` is stale.
    pub fn insert(&mut self, parent: NodeId, payload: P) -> Option<NodeId> {
        self.insert_at(parent, usize::MAX, payload)
    }

    /// Insert a new child at `index` in `parent`'s child list.
    ///
    /// An `index` past the end appends. Returns `None` if `parent` is stale.
    pub fn insert_at(&mut self, parent: NodeId, index: usize, payload: P) -> Option<NodeId> {
        if !self.is_alive(parent) {
            return None;
        }
        let id = self.alloc(payload);
        self.link_parent(id, parent, index);
        Some(id)
    }

    /// Remove a node and its whole subtree, returning the node's payload.
    ///
    /// The root cannot be removed. Ids of every removed node become stale.
    pub fn remove(&mut self, id: NodeId) -> Option<P> {
        if id == self.root || !self.is_alive(id) {
            return None;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let mut stack: Vec<NodeId> = self.node(id).children.to_vec();
        while let Some(child) = stack.pop() {
            if let Some(node) = self.free_slot(child) {
                stack.extend(node.children);
            }
        }
        self.free_slot(id).map(|node| node.payload)
    }

    /// Payload of a live node.
    pub fn payload(&self, id: NodeId) -> Option<&P> {
        self.node_opt(id).map(|n| &n.payload)
    }

    /// Mutable payload of a live node.
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut P> {
        self.node_opt_mut(id).map(|n| &mut n.payload)
    }

    /// Replace the payload of a live node, returning the previous one.
    pub fn set_payload(&mut self, id: NodeId, payload: P) -> Option<P> {
        self.node_opt_mut(id)
            .map(|n| core::mem::replace(&mut n.payload, payload))
    }

    /// Returns the parent of a node if live, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Iterate the strict ancestors of `id`, nearest first, ending at the root.
    ///
    /// Yields nothing for the root or a stale id.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, P> {
        Ancestors {
            tree: self,
            next: self.parent_of(id),
        }
    }

    /// Returns `true` if `ancestor` appears on `node`'s parent chain.
    ///
    /// Cost is proportional to the depth of `node`. A node is not its own ancestor.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.ancestors(id).count())
    }

    /// Returns `true` if `source` may be reparented under `dest`.
    ///
    /// Both must be live, distinct, and `source` must not be an ancestor of
    /// `dest`. The root is an ancestor of every other node, so it never moves.
    pub fn can_move(&self, source: NodeId, dest: NodeId) -> bool {
        source != dest
            && self.is_alive(source)
            && self.is_alive(dest)
            && source != self.root
            && !self.is_ancestor(source, dest)
    }

    /// Reparent `source` (with its subtree) as the last child of `dest`.
    ///
    /// Returns `false` and leaves the tree untouched if the move would create
    /// a cycle or refers to stale ids.
    pub fn move_node(&mut self, source: NodeId, dest: NodeId) -> bool {
        self.move_node_at(source, dest, usize::MAX)
    }

    /// Reparent `source` under `dest` at `index` in `dest`'s child list.
    ///
    /// The index is measured after `source` has left its old parent and is
    /// clamped to the child count.
    pub fn move_node_at(&mut self, source: NodeId, dest: NodeId, index: usize) -> bool {
        if !self.can_move(source, dest) {
            tracing::debug!(?source, ?dest, "rejected move");
            return false;
        }
        let Some(old_parent) = self.node(source).parent else {
            unreachable!("only the root has no parent, and `can_move` refuses it");
        };
        self.unlink_parent(source, old_parent);
        self.link_parent(source, dest, index);
        tracing::trace!(?source, ?old_parent, ?dest, "moved node");
        true
    }

    /// Get the next node in depth-first traversal order.
    ///
    /// Returns `None` if no next node exists or if the current node is stale.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first_child) = self.node(current).children.first() {
            return Some(first_child);
        }
        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    /// Get the previous node in reverse depth-first traversal order.
    ///
    /// Returns `None` if no previous node exists or if the current node is stale.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(prev_sibling) = self.prev_sibling(current) {
            return Some(self.last_in_subtree(prev_sibling));
        }
        self.parent_of(current)
    }

    /// Iterate every live node in pre-order, starting at the root.
    pub fn iter_depth_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(Some(self.root), move |&id| self.next_depth_first(id))
    }

    /// Capture an independent copy of the whole tree.
    pub fn snapshot(&self) -> Snapshot<P>
    where
        P: Clone,
    {
        let nodes = self
            .iter_depth_first()
            .map(|id| {
                let node = self.node(id);
                SnapshotNode {
                    id,
                    parent: node.parent,
                    payload: node.payload.clone(),
                }
            })
            .collect();
        Snapshot { nodes }
    }

    /// Replace the whole tree with the contents of `snapshot`.
    ///
    /// Node ids recorded in the snapshot are live afterwards; every other id
    /// is stale. Generations handed out before the restore are never reused by
    /// later inserts.
    ///
    /// A malformed snapshot (empty, a root with a parent, a node listed before
    /// its parent, or a duplicated id) is rejected: this returns `false` and
    /// the tree is left untouched. So is one naming a slot index at or past
    /// the current arena size plus the snapshot's length, since the arena is
    /// dense and would have to grow to reach it.
    pub fn restore(&mut self, snapshot: &Snapshot<P>) -> bool
    where
        P: Clone,
    {
        let Some(first) = snapshot.nodes.first() else {
            return false;
        };
        if first.parent.is_some() || first.id.generation() == 0 {
            return false;
        }
        let slots = snapshot
            .nodes
            .iter()
            .map(|n| n.id.idx() + 1)
            .max()
            .unwrap_or(0);
        if slots > self.generations.len() + snapshot.nodes.len() {
            tracing::debug!(slots, "snapshot slot out of range");
            return false;
        }
        let mut nodes: Vec<Option<Node<P>>> = Vec::new();
        nodes.resize_with(slots, || None);

        for entry in &snapshot.nodes {
            let idx = entry.id.idx();
            if nodes[idx].is_some() || entry.id.generation() == 0 {
                return false;
            }
            if let Some(parent) = entry.parent {
                let Some(Some(p)) = nodes.get_mut(parent.idx()) else {
                    return false;
                };
                if p.generation != parent.generation() {
                    return false;
                }
                p.children.push(entry.id);
            } else if entry.id != first.id {
                return false;
            }
            nodes[idx] = Some(Node::new(
                entry.id.generation(),
                entry.parent,
                entry.payload.clone(),
            ));
        }

        if self.generations.len() < slots {
            self.generations.resize(slots, 0);
        }
        for (idx, slot) in nodes.iter().enumerate() {
            if let Some(node) = slot {
                self.generations[idx] = self.generations[idx].max(node.generation);
            }
        }
        nodes.resize_with(self.generations.len(), || None);
        self.free_list = nodes
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(idx, slot)| slot.is_none().then_some(idx))
            .collect();
        self.nodes = nodes;
        self.root = first.id;
        true
    }
}

/// Iterator over a node's ancestors, returned by [`Tree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a, P> {
    tree: &'a Tree<P>,
    next: Option<NodeId>,
}

impl<P> Iterator for Ancestors<'_, P> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent_of(current);
        Some(current)
    }
}

impl<P> Tree<P> {
    // --- internals ---

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node<P> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node<P>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<P>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.generation() {
            return None;
        }
        Some(n)
    }

    fn alloc(&mut self, payload: P) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, None, payload));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, None, payload)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    fn free_slot(&mut self, id: NodeId) -> Option<Node<P>> {
        let node = self.nodes.get_mut(id.idx())?.take()?;
        self.free_list.push(id.idx());
        Some(node)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId, index: usize) {
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p).copied())
    }

    fn last_in_subtree(&self, mut node: NodeId) -> NodeId {
        while let Some(&last) = self.node(node).children.last() {
            node = last;
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// `R -> A -> B -> C`
    fn chain() -> (Tree<&'static str>, [NodeId; 4]) {
        let mut tree = Tree::new("R");
        let r = tree.root();
        let a = tree.insert(r, "A").unwrap();
        let b = tree.insert(a, "B").unwrap();
        let c = tree.insert(b, "C").unwrap();
        (tree, [r, a, b, c])
    }

    #[test]
    fn insert_links_both_directions() {
        let mut tree = Tree::new(0_u32);
        let root = tree.root();
        let a = tree.insert(root, 1).unwrap();
        let b = tree.insert(root, 2).unwrap();
        let first = tree.insert_at(root, 0, 3).unwrap();
        assert_eq!(tree.children_of(root), &[first, a, b]);
        assert_eq!(tree.parent_of(a), Some(root));
        assert_eq!(tree.parent_of(root), None);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.payload(b), Some(&2));
    }

    #[test]
    fn insert_under_stale_parent_fails() {
        let mut tree = Tree::new(0_u32);
        let a = tree.insert(tree.root(), 1).unwrap();
        tree.remove(a);
        assert_eq!(tree.insert(a, 2), None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_takes_subtree_and_refuses_root() {
        let (mut tree, [r, a, b, c]) = chain();
        assert_eq!(tree.remove(r), None, "root is permanent");
        assert_eq!(tree.remove(a), Some("A"));
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert!(!tree.is_alive(c));
        assert!(tree.children_of(r).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new(());
        let a = tree.insert(tree.root(), ()).unwrap();
        tree.remove(a);
        let b = tree.insert(tree.root(), ()).unwrap();
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn ancestors_walk_to_root() {
        let (tree, [r, a, b, c]) = chain();
        assert_eq!(tree.ancestors(c).collect::<Vec<_>>(), vec![b, a, r]);
        assert!(tree.is_ancestor(a, c));
        assert!(!tree.is_ancestor(c, a));
        assert!(!tree.is_ancestor(a, a), "a node is not its own ancestor");
        assert_eq!(tree.depth(c), Some(3));
        assert_eq!(tree.depth(r), Some(0));
    }

    #[test]
    fn move_into_descendant_is_noop() {
        let (mut tree, [_, a, b, c]) = chain();
        let before = tree.snapshot();
        assert!(!tree.move_node(a, c));
        assert!(!tree.move_node(a, b));
        assert!(!tree.move_node(b, b));
        assert_eq!(tree.snapshot(), before);
    }

    #[test]
    fn root_never_moves() {
        let (mut tree, [r, a, _, _]) = chain();
        assert!(!tree.can_move(r, a));
        assert!(!tree.move_node(r, a));
        assert_eq!(tree.parent_of(r), None);
    }

    #[test]
    fn move_carries_subtree() {
        let (mut tree, [r, a, b, c]) = chain();
        assert!(tree.move_node(b, r));
        assert_eq!(tree.children_of(r), &[a, b]);
        assert!(tree.children_of(a).is_empty());
        assert_eq!(tree.parent_of(b), Some(r));
        assert_eq!(tree.parent_of(c), Some(b), "descendants follow");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn move_with_index_and_within_same_parent() {
        let mut tree = Tree::new(0);
        let r = tree.root();
        let a = tree.insert(r, 1).unwrap();
        let b = tree.insert(r, 2).unwrap();
        let c = tree.insert(r, 3).unwrap();
        assert!(tree.move_node_at(c, r, 0));
        assert_eq!(tree.children_of(r), &[c, a, b]);
        // Dropping onto the current parent sends the node to the end.
        assert!(tree.move_node(c, r));
        assert_eq!(tree.children_of(r), &[a, b, c]);
        assert!(tree.move_node_at(a, b, 99));
        assert_eq!(tree.children_of(b), &[a]);
    }

    #[test]
    fn move_with_stale_ids_is_noop() {
        let (mut tree, [r, a, b, _]) = chain();
        let gone = tree.insert(r, "gone").unwrap();
        tree.remove(gone);
        assert!(!tree.move_node(gone, r));
        assert!(!tree.move_node(b, gone));
        assert_eq!(tree.parent_of(b), Some(a));
    }

    #[test]
    fn depth_first_order() {
        let mut tree = Tree::new(0);
        let r = tree.root();
        let a = tree.insert(r, 1).unwrap();
        let a1 = tree.insert(a, 2).unwrap();
        let b = tree.insert(r, 3).unwrap();
        assert_eq!(tree.iter_depth_first().collect::<Vec<_>>(), vec![r, a, a1, b]);
        assert_eq!(tree.prev_depth_first(b), Some(a1));
        assert_eq!(tree.prev_depth_first(a), Some(r));
        assert_eq!(tree.next_depth_first(b), None);
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let (mut tree, [r, a, b, c]) = chain();
        let snap = tree.snapshot();
        assert_eq!(snap.len(), 4);
        assert_eq!(snap.root(), Some(r));

        assert!(tree.move_node(c, r));
        tree.set_payload(a, "A'");
        let extra = tree.insert(r, "X").unwrap();

        assert!(tree.restore(&snap));
        assert_eq!(tree.snapshot(), snap);
        assert_eq!(tree.parent_of(c), Some(b));
        assert_eq!(tree.payload(a), Some(&"A"));
        assert!(!tree.is_alive(extra), "ids missing from the snapshot go stale");
    }

    #[test]
    fn restore_never_revives_newer_generations() {
        let mut tree = Tree::new(0);
        let r = tree.root();
        let a = tree.insert(r, 1).unwrap();
        let snap = tree.snapshot();
        tree.remove(a);
        let b = tree.insert(r, 2).unwrap();
        assert!(tree.restore(&snap));
        assert!(tree.is_alive(a));
        assert!(!tree.is_alive(b));
        tree.remove(a);
        let c = tree.insert(r, 3).unwrap();
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert!(!tree.is_alive(b));
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        let (mut tree, [r, a, _, _]) = chain();
        let before = tree.snapshot();

        assert!(!tree.restore(&Snapshot::from_nodes(Vec::new())));

        let orphan_first = Snapshot::from_nodes(vec![
            SnapshotNode { id: a, parent: Some(r), payload: "A" },
            SnapshotNode { id: r, parent: None, payload: "R" },
        ]);
        assert!(!tree.restore(&orphan_first));

        let duplicated = Snapshot::from_nodes(vec![
            SnapshotNode { id: r, parent: None, payload: "R" },
            SnapshotNode { id: a, parent: Some(r), payload: "A" },
            SnapshotNode { id: a, parent: Some(r), payload: "A" },
        ]);
        assert!(!tree.restore(&duplicated));

        let two_roots = Snapshot::from_nodes(vec![
            SnapshotNode { id: r, parent: None, payload: "R" },
            SnapshotNode { id: a, parent: None, payload: "A" },
        ]);
        assert!(!tree.restore(&two_roots));

        assert_eq!(tree.snapshot(), before, "tree untouched after rejects");
    }

    #[test]
    fn restore_rejects_out_of_range_slot() {
        let (mut tree, _) = chain();
        let before = tree.snapshot();

        let far = Snapshot::from_nodes(vec![SnapshotNode {
            id: NodeId::new(u32::MAX, 1),
            parent: None,
            payload: "x",
        }]);
        assert!(!tree.restore(&far));
        assert_eq!(tree.snapshot(), before);

        // A fresh tree still accepts a snapshot taken from a larger one.
        let mut fresh = Tree::new("R");
        assert!(fresh.restore(&before));
        assert_eq!(fresh.snapshot(), before);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_serializes() {
        let (tree, _) = chain();
        let snap = tree.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot<&str> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_far_slot_is_rejected() {
        let json = r#"{"nodes":[{"id":[4294967295,1],"parent":null,"payload":"x"}]}"#;
        let snap: Snapshot<&str> = serde_json::from_str(json).unwrap();
        let mut tree = Tree::new("R");
        assert!(!tree.restore(&snap));
        assert_eq!(tree.len(), 1);
    }
}
