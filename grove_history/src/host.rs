// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capture/install contract between a history and the state it records.

/// State that can be captured into an independent snapshot and replaced by one.
pub trait SnapshotHost {
    /// An owned, independent copy of the whole state.
    type Snapshot: Clone;

    /// Capture the current state.
    fn get_data(&self) -> Self::Snapshot;

    /// Replace the current state with `snapshot`.
    ///
    /// This is a full replace: nothing from the state before the call may stay
    /// reachable afterwards.
    fn show(&mut self, snapshot: &Self::Snapshot);
}

#[cfg(feature = "tree_adapter")]
impl<P: Clone> SnapshotHost for grove_tree::Tree<P> {
    type Snapshot = grove_tree::Snapshot<P>;

    fn get_data(&self) -> Self::Snapshot {
        self.snapshot()
    }

    fn show(&mut self, snapshot: &Self::Snapshot) {
        if !self.restore(snapshot) {
            tracing::debug!(nodes = snapshot.len(), "malformed snapshot not installed");
        }
    }
}
