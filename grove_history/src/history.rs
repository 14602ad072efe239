// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded snapshot history.

use alloc::collections::VecDeque;
use core::fmt;
use core::num::NonZeroUsize;

use crate::host::SnapshotHost;

/// Default number of snapshots a [`History`] keeps.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

/// Configuration for a [`History`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HistoryConfig {
    /// Maximum number of snapshots kept, the current one included.
    pub capacity: NonZeroUsize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl HistoryConfig {
    /// Configuration with a custom capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }
}

/// Bounded, indexed sequence of whole-state snapshots.
///
/// Once non-empty, `index` always points at a snapshot: `0 <= index < len`.
/// Recording after an undo discards every snapshot after the index, so redo
/// is only possible straight after undo. When a recording would exceed the
/// capacity the oldest snapshot is evicted, and the index keeps pointing at
/// the snapshot just recorded.
pub struct History<S> {
    entries: VecDeque<S>,
    index: Option<usize>,
    capacity: NonZeroUsize,
}

impl<S> fmt::Debug for History<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("len", &self.entries.len())
            .field("index", &self.index)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<S: Clone> Clone for History<S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index,
            capacity: self.capacity,
        }
    }
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<S> History<S> {
    /// Create an empty history holding at most `capacity` snapshots.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: None,
            capacity,
        }
    }

    /// Create an empty history from a [`HistoryConfig`].
    pub fn with_config(config: HistoryConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Maximum number of snapshots kept.
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the current snapshot, or `None` when empty.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The current snapshot.
    pub fn current(&self) -> Option<&S> {
        self.entries.get(self.index?)
    }

    /// Returns `true` if [`undo`](Self::undo) would do something.
    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    /// Returns `true` if [`redo`](Self::redo) would do something.
    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// Iterate snapshots oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &S> + '_ {
        self.entries.iter()
    }

    /// Append `snapshot` as the new current state.
    ///
    /// Snapshots after the current index are discarded first. If the history
    /// is full the oldest snapshot is evicted.
    pub fn push(&mut self, snapshot: S) {
        let keep = self.index.map_or(0, |i| i + 1);
        let discarded = self.entries.len() - keep;
        self.entries.truncate(keep);
        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity.get() {
            self.entries.pop_front();
            tracing::trace!(capacity = self.capacity.get(), "evicted oldest snapshot");
        }
        let index = self.entries.len() - 1;
        self.index = Some(index);
        tracing::debug!(index, discarded, "recorded snapshot");
    }

    /// Drop every snapshot; the index becomes `None`.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
        tracing::debug!("history cleared");
    }
}

impl<S: Clone> History<S> {
    /// Capture `host` and [`push`](Self::push) the result.
    pub fn record<H>(&mut self, host: &H)
    where
        H: SnapshotHost<Snapshot = S> + ?Sized,
    {
        self.push(host.get_data());
    }

    /// Step back one snapshot and install it into `host`.
    ///
    /// Returns `false` and changes nothing at the oldest snapshot or when empty.
    pub fn undo<H>(&mut self, host: &mut H) -> bool
    where
        H: SnapshotHost<Snapshot = S> + ?Sized,
    {
        let Some(index) = self.index.filter(|&i| i > 0) else {
            return false;
        };
        self.step_to(index - 1, host);
        true
    }

    /// Step forward one snapshot and install it into `host`.
    ///
    /// Returns `false` and changes nothing at the newest snapshot or when empty.
    pub fn redo<H>(&mut self, host: &mut H) -> bool
    where
        H: SnapshotHost<Snapshot = S> + ?Sized,
    {
        let Some(index) = self.index.filter(|&i| i + 1 < self.entries.len()) else {
            return false;
        };
        self.step_to(index + 1, host);
        true
    }

    fn step_to<H>(&mut self, index: usize, host: &mut H)
    where
        H: SnapshotHost<Snapshot = S> + ?Sized,
    {
        self.index = Some(index);
        if let Some(snapshot) = self.entries.get(index) {
            host.show(snapshot);
        }
        tracing::debug!(index, len = self.entries.len(), "installed snapshot");
    }
}
