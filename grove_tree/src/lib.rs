// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grove Tree: the node tree behind a mind-map editor.
//!
//! A [`Tree`] holds host payloads in a rooted hierarchy. Each node has an
//! identity ([`NodeId`]), an ordered list of children, a parent back-reference
//! used for lookups only, and an opaque payload owned by the host.
//!
//! ## Invariants
//!
//! - Exactly one root, which has no parent and is never removed or moved.
//! - Every other node has exactly one parent.
//! - No cycles. [`Tree::move_node`] checks the destination's ancestor chain
//!   before touching any edge, and refuses moves onto the node itself or into
//!   its own subtree.
//!
//! Operations that would break an invariant are no-ops that report `false`
//! or `None`; nothing here panics on bad ids.
//!
//! ## Snapshots
//!
//! [`Tree::snapshot`] copies the whole tree into a [`Snapshot`], and
//! [`Tree::restore`] installs one as a full replace. Snapshots own their
//! payloads, so later edits never leak into recorded history. Ids recorded in
//! a snapshot stay valid across a restore, and ids of nodes that are not in
//! the snapshot become stale.
//!
//! ```rust
//! use grove_tree::Tree;
//!
//! let mut tree = Tree::new(String::from("root"));
//! let idea = tree.insert(tree.root(), String::from("idea")).unwrap();
//! let before = tree.snapshot();
//!
//! tree.remove(idea);
//! assert!(!tree.is_alive(idea));
//!
//! assert!(tree.restore(&before));
//! assert_eq!(tree.payload(idea).map(String::as_str), Some("idea"));
//! ```
//!
//! ## API overview
//!
//! - [`Tree::insert`] / [`Tree::insert_at`] / [`Tree::remove`]
//! - [`Tree::payload`] / [`Tree::payload_mut`] / [`Tree::set_payload`]
//! - [`Tree::parent_of`] / [`Tree::children_of`] / [`Tree::ancestors`] / [`Tree::is_ancestor`]
//! - [`Tree::can_move`] / [`Tree::move_node`] / [`Tree::move_node_at`]
//! - [`Tree::next_depth_first`] / [`Tree::prev_depth_first`] / [`Tree::iter_depth_first`]
//! - [`Tree::snapshot`] / [`Tree::restore`]
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`NodeId`], [`Snapshot`],
//!   and [`SnapshotNode`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Ancestors, Tree};
pub use types::{NodeId, Snapshot, SnapshotNode};
