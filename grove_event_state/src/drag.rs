// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session state machine.
//!
//! [`DragState`] decides when a press becomes a drag. It is generic over the
//! key of the pressed thing (`K`, usually a node id) and knows nothing about
//! trees, hit testing, or rendering; callers resolve targets and feed them in
//! with [`DragState::set_target`].
//!
//! ## States
//!
//! - **Idle**: nothing pressed.
//! - **Armed**: a key was pressed at an origin; the pointer has not yet moved
//!   farther than the threshold.
//! - **Dragging**: the pointer moved strictly farther than the threshold from
//!   the origin. A [`DragSession`] tracks the current position and target.
//!
//! Releasing while armed is a click. Releasing while dragging yields the
//! finished session as a drop.
//!
//! ```
//! use grove_event_state::drag::{DragState, DragTransition, Release};
//! use kurbo::Point;
//!
//! let mut drag: DragState<u32> = DragState::new();
//! assert!(drag.on_press(42, Point::new(0.0, 0.0)));
//!
//! // Five units is not enough; the distance must exceed the threshold.
//! assert_eq!(drag.on_move(Point::new(3.0, 4.0)), DragTransition::Pending);
//! assert_eq!(drag.on_move(Point::new(6.0, 0.0)), DragTransition::Started);
//! assert_eq!(drag.on_move(Point::new(20.0, 0.0)), DragTransition::Moved);
//!
//! drag.set_target(Some(7));
//! match drag.on_release(Point::new(21.0, 0.0)) {
//!     Release::Drop(session) => {
//!         assert_eq!(session.key, 42);
//!         assert_eq!(session.target, Some(7));
//!     }
//!     other => panic!("expected a drop, got {other:?}"),
//! }
//! ```

use kurbo::Point;

/// Distance the pointer must exceed before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

/// Coarse phase of a [`DragState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// Nothing pressed.
    Idle,
    /// Pressed, below the threshold.
    Armed,
    /// Dragging.
    Dragging,
}

/// A drag in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<K> {
    /// The dragged key.
    pub key: K,
    /// Where the press happened.
    pub origin: Point,
    /// Latest pointer position.
    pub position: Point,
    /// Current drop candidate, if any.
    pub target: Option<K>,
}

/// Result of [`DragState::on_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTransition {
    /// Not pressed; the move is not part of a drag.
    None,
    /// Armed, still within the threshold.
    Pending,
    /// The threshold was just exceeded.
    Started,
    /// Already dragging.
    Moved,
}

/// Result of [`DragState::on_release`].
#[derive(Clone, Debug, PartialEq)]
pub enum Release<K> {
    /// Nothing was pressed.
    None,
    /// Released before the threshold was exceeded.
    Click(K),
    /// Released while dragging.
    Drop(DragSession<K>),
}

#[derive(Clone, Debug)]
enum Inner<K> {
    Idle,
    Armed { key: K, origin: Point },
    Dragging(DragSession<K>),
}

/// Press/drag/release tracking for a single pointer.
#[derive(Clone, Debug)]
pub struct DragState<K> {
    inner: Inner<K>,
    threshold: f64,
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DragState<K> {
    /// Create an idle state machine with [`DEFAULT_DRAG_THRESHOLD`].
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_DRAG_THRESHOLD)
    }

    /// Create an idle state machine with a custom threshold.
    ///
    /// # Arguments
    ///
    /// * `threshold` - distance the pointer must strictly exceed before the
    ///   press becomes a drag. Callers validate it; a negative or non-finite
    ///   value makes every move start a drag or none at all.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            inner: Inner::Idle,
            threshold,
        }
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The current phase.
    pub fn phase(&self) -> DragPhase {
        match self.inner {
            Inner::Idle => DragPhase::Idle,
            Inner::Armed { .. } => DragPhase::Armed,
            Inner::Dragging(_) => DragPhase::Dragging,
        }
    }

    /// Returns `true` while dragging.
    pub fn is_dragging(&self) -> bool {
        matches!(self.inner, Inner::Dragging(_))
    }

    /// The pressed key and press origin, while armed or dragging.
    pub fn pressed(&self) -> Option<(&K, Point)> {
        match &self.inner {
            Inner::Idle => None,
            Inner::Armed { key, origin } => Some((key, *origin)),
            Inner::Dragging(s) => Some((&s.key, s.origin)),
        }
    }

    /// The active drag session.
    pub fn session(&self) -> Option<&DragSession<K>> {
        match &self.inner {
            Inner::Dragging(s) => Some(s),
            _ => None,
        }
    }

    /// Arm on `key` at `origin`.
    ///
    /// Returns `false` and changes nothing if a press is already active.
    pub fn on_press(&mut self, key: K, origin: Point) -> bool {
        if !matches!(self.inner, Inner::Idle) {
            return false;
        }
        self.inner = Inner::Armed { key, origin };
        true
    }

    /// Track pointer movement.
    pub fn on_move(&mut self, position: Point) -> DragTransition {
        match &mut self.inner {
            Inner::Idle => DragTransition::None,
            Inner::Dragging(session) => {
                session.position = position;
                DragTransition::Moved
            }
            Inner::Armed { origin, .. } => {
                let distance_sq = (position - *origin).hypot2();
                if distance_sq <= self.threshold * self.threshold && self.threshold >= 0.0 {
                    return DragTransition::Pending;
                }
                let Inner::Armed { key, origin } =
                    core::mem::replace(&mut self.inner, Inner::Idle)
                else {
                    unreachable!("matched Armed above");
                };
                tracing::debug!(?origin, ?position, "drag threshold exceeded");
                self.inner = Inner::Dragging(DragSession {
                    key,
                    origin,
                    position,
                    target: None,
                });
                DragTransition::Started
            }
        }
    }

    /// Set the current drop candidate. Returns `false` unless dragging.
    pub fn set_target(&mut self, target: Option<K>) -> bool {
        match &mut self.inner {
            Inner::Dragging(session) => {
                session.target = target;
                true
            }
            _ => false,
        }
    }

    /// End the press at `position`.
    pub fn on_release(&mut self, position: Point) -> Release<K> {
        match core::mem::replace(&mut self.inner, Inner::Idle) {
            Inner::Idle => Release::None,
            Inner::Armed { key, .. } => Release::Click(key),
            Inner::Dragging(mut session) => {
                session.position = position;
                Release::Drop(session)
            }
        }
    }

    /// Abandon the press. Returns the session if a drag was in progress.
    pub fn cancel(&mut self) -> Option<DragSession<K>> {
        match core::mem::replace(&mut self.inner, Inner::Idle) {
            Inner::Dragging(session) => Some(session),
            _ => None,
        }
    }
}
