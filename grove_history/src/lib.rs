// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grove History: bounded, snapshot-based undo/redo.
//!
//! A [`History`] is an ordered list of whole-state snapshots plus a current
//! index. Each recording captures the full state of a [`SnapshotHost`]; undo
//! and redo move the index and install the snapshot there as a full replace.
//! There is no diffing: every step costs time and memory proportional to the
//! size of the recorded state.
//!
//! - Recording after an undo discards the pending redo snapshots.
//! - The history never holds more than its capacity (100 by default); the
//!   oldest snapshot is evicted first.
//! - Undo at the oldest snapshot and redo at the newest are no-ops.
//!
//! ```rust
//! use grove_history::{History, SnapshotHost};
//!
//! struct Text(String);
//!
//! impl SnapshotHost for Text {
//!     type Snapshot = String;
//!     fn get_data(&self) -> String { self.0.clone() }
//!     fn show(&mut self, snapshot: &String) { self.0 = snapshot.clone(); }
//! }
//!
//! let mut doc = Text(String::from("a"));
//! let mut history = History::default();
//! history.record(&doc);
//! doc.0.push('b');
//! history.record(&doc);
//!
//! assert!(history.undo(&mut doc));
//! assert_eq!(doc.0, "a");
//! assert!(!history.undo(&mut doc));
//! assert!(history.redo(&mut doc));
//! assert_eq!(doc.0, "ab");
//! ```
//!
//! ## Features
//!
//! - `tree_adapter`: implements [`SnapshotHost`] for `grove_tree::Tree<P>`
//!   using its snapshot and restore operations.
//! - `serde`: derives `Serialize`/`Deserialize` for [`HistoryConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod history;
mod host;

pub use history::{DEFAULT_CAPACITY, History, HistoryConfig};
pub use host::SnapshotHost;
