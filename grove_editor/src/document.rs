// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The edited document: tree, event bus, and undo history in one place.

use grove_history::{History, HistoryConfig};
use grove_tree::{NodeId, Snapshot, Tree};

use crate::bus::{Event, EventBus, EventKind, ListenerId, Outcome};
use crate::shortcuts::UndoRedo;

/// A tree under edit, with its event bus and undo history.
///
/// Every event goes through [`Document::emit`]. Mutation kinds are recorded
/// in the history first, then delivered to bus listeners, so a listener
/// returning [`Outcome::Stop`] can never keep a mutation out of the history
/// and snapshot order always equals mutation order.
///
/// The state at construction (or at [`load`](Self::load)) is recorded as the
/// first snapshot, so the first mutation can be undone.
///
/// Installing a snapshot through [`undo`](Self::undo) or [`redo`](Self::redo)
/// replaces the whole tree. Ids of nodes the snapshot does not contain become
/// stale.
#[derive(Debug)]
pub struct Document<P: Clone> {
    tree: Tree<P>,
    bus: EventBus,
    history: History<Snapshot<P>>,
    editable: bool,
}

impl<P: Clone> Document<P> {
    /// Wrap `tree` with a default history.
    pub fn new(tree: Tree<P>) -> Self {
        Self::with_history_config(tree, HistoryConfig::default())
    }

    /// Wrap `tree` with a history built from `config`.
    pub fn with_history_config(tree: Tree<P>, config: HistoryConfig) -> Self {
        let mut history = History::with_config(config);
        history.record(&tree);
        Self {
            tree,
            bus: EventBus::new(),
            history,
            editable: true,
        }
    }

    /// The current tree.
    pub fn tree(&self) -> &Tree<P> {
        &self.tree
    }

    /// The undo history.
    pub fn history(&self) -> &History<Snapshot<P>> {
        &self.history
    }

    /// The event bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Returns `true` if drags may start on this document.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Allow or forbid starting drags.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Register a listener for every event kind. See [`EventBus::add_event_listener`].
    pub fn add_event_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Event) -> Outcome + 'static,
    {
        self.bus.add_event_listener(listener)
    }

    /// Unregister a listener.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.bus.remove_event_listener(id)
    }

    /// Publish `event`, recording a snapshot first when it is a mutation.
    ///
    /// Returns the listener that stopped delivery, if any.
    pub fn emit(&mut self, event: &Event) -> Option<ListenerId> {
        if event.kind.is_mutation() {
            self.history.record(&self.tree);
        }
        self.bus.emit(event)
    }

    /// Append a child under `parent` and publish `add_node`.
    ///
    /// Returns `None` if `parent` is stale.
    pub fn add_node(&mut self, parent: NodeId, payload: P) -> Option<NodeId> {
        let id = self.tree.insert(parent, payload)?;
        self.emit(&Event::for_node(EventKind::AddNode, id));
        Some(id)
    }

    /// Insert a child at `index` under `parent` and publish `add_node`.
    pub fn add_node_at(&mut self, parent: NodeId, index: usize, payload: P) -> Option<NodeId> {
        let id = self.tree.insert_at(parent, index, payload)?;
        self.emit(&Event::for_node(EventKind::AddNode, id));
        Some(id)
    }

    /// Remove `id` and its subtree and publish `remove_node`.
    ///
    /// Returns the removed payload; `None` for stale ids and the root.
    pub fn remove_node(&mut self, id: NodeId) -> Option<P> {
        let payload = self.tree.remove(id)?;
        self.emit(&Event::for_node(EventKind::RemoveNode, id));
        Some(payload)
    }

    /// Replace the payload of `id` and publish `edit`.
    ///
    /// Returns the previous payload; `None` for stale ids.
    pub fn edit(&mut self, id: NodeId, payload: P) -> Option<P> {
        let old = self.tree.set_payload(id, payload)?;
        self.emit(&Event::for_node(EventKind::Edit, id));
        Some(old)
    }

    /// Publish `resize` for a live node whose geometry the host changed.
    pub fn resize(&mut self, id: NodeId) -> bool {
        if !self.tree.is_alive(id) {
            return false;
        }
        self.emit(&Event::for_node(EventKind::Resize, id));
        true
    }

    /// Reparent `source` under `dest` (appended last) and publish `move_node`.
    ///
    /// Self-moves, moves into the source's own subtree, moves of the root and
    /// stale ids change nothing, publish nothing, and return `false`.
    pub fn move_node(&mut self, source: NodeId, dest: NodeId) -> bool {
        self.move_node_at(source, dest, usize::MAX)
    }

    /// Reparent `source` under `dest` at `index` and publish `move_node`.
    pub fn move_node_at(&mut self, source: NodeId, dest: NodeId, index: usize) -> bool {
        if !self.tree.move_node_at(source, dest, index) {
            return false;
        }
        self.emit(&Event::for_node(EventKind::MoveNode, source));
        true
    }

    /// Step back one snapshot. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.tree)
    }

    /// Step forward one snapshot. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.tree)
    }

    /// Drop every snapshot. The next mutation starts a fresh history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Switch to another tree.
    ///
    /// The history is cleared and the new tree recorded as its first
    /// snapshot. Listeners stay registered. Returns the previous tree.
    pub fn load(&mut self, tree: Tree<P>) -> Tree<P> {
        let old = core::mem::replace(&mut self.tree, tree);
        self.history.clear();
        self.history.record(&self.tree);
        tracing::debug!(nodes = self.tree.len(), "document loaded");
        old
    }

    /// Take the tree out, dropping the history and listeners.
    pub fn into_tree(self) -> Tree<P> {
        self.tree
    }
}

impl<P: Clone> UndoRedo for Document<P> {
    fn undo(&mut self) -> bool {
        Self::undo(self)
    }

    fn redo(&mut self) -> bool {
        Self::redo(self)
    }
}
