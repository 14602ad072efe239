// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the node tree: identifiers and snapshots.

use alloc::vec::Vec;

/// Identifier for a node in the tree (generational).
///
/// The first field is the arena slot, the second the generation the slot had
/// when the node was created. An id whose generation no longer matches its
/// slot is stale and every query on it answers `None` or `false`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// One node of a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotNode<P> {
    /// Identity of the node at capture time.
    pub id: NodeId,
    /// Parent at capture time; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Copy of the host payload.
    pub payload: P,
}

/// An independent copy of a whole tree at one instant.
///
/// Nodes are stored in pre-order, so a parent always precedes its children and
/// siblings appear in child order. A snapshot owns its payloads; it never
/// aliases a live tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<P> {
    pub(crate) nodes: Vec<SnapshotNode<P>>,
}

impl<P> Snapshot<P> {
    /// Build a snapshot from pre-ordered nodes.
    ///
    /// No validation happens here; [`Tree::restore`](crate::Tree::restore)
    /// rejects malformed input.
    pub fn from_nodes(nodes: Vec<SnapshotNode<P>>) -> Self {
        Self { nodes }
    }

    /// The captured nodes in pre-order.
    pub fn nodes(&self) -> &[SnapshotNode<P>] {
        &self.nodes
    }

    /// Number of captured nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root id, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.first().map(|n| n.id)
    }

    /// Look up the payload captured for `id`.
    pub fn payload(&self, id: NodeId) -> Option<&P> {
        self.nodes.iter().find(|n| n.id == id).map(|n| &n.payload)
    }
}
