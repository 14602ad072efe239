// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grove Event State: input state machines for the drag-reparenting engine.
//!
//! Two small state machines that sit between raw host input and the editor:
//!
//! - [`gesture`]: normalize mouse and touch input into one press/move/release
//!   protocol, tracking the first touch and emitting exactly one release per
//!   gesture even when the input source is lost.
//! - [`drag`]: decide when a press becomes a drag (a distance threshold) and
//!   carry the drag session (key, origin, position, drop candidate) until it
//!   is released or cancelled.
//!
//! Neither module knows about trees, hit testing, or rendering. They take
//! positions and application keys and report transitions; the editor layer
//! resolves nodes and applies mutations.
//!
//! ```rust
//! use grove_event_state::drag::{DragState, DragTransition, Release};
//! use grove_event_state::gesture::{GestureTracker, MouseButtons, Phase, PointerInput};
//! use kurbo::Point;
//!
//! let mut tracker = GestureTracker::new();
//! let mut drag: DragState<&str> = DragState::new();
//!
//! let inputs = [
//!     PointerInput::MouseDown { position: Point::new(0.0, 0.0), button: MouseButtons::PRIMARY },
//!     PointerInput::MouseMove { position: Point::new(2.0, 2.0), buttons: MouseButtons::PRIMARY },
//!     PointerInput::MouseUp { position: Point::new(2.0, 2.0), button: MouseButtons::PRIMARY },
//! ];
//!
//! let mut last = None;
//! for input in &inputs {
//!     let Some(g) = tracker.handle(input) else { continue };
//!     last = match g.phase {
//!         Phase::Start => { drag.on_press("node", g.position); None }
//!         Phase::Move => { assert_eq!(drag.on_move(g.position), DragTransition::Pending); None }
//!         Phase::End => Some(drag.on_release(g.position)),
//!     };
//! }
//! // Under the threshold: a click, not a drop.
//! assert_eq!(last, Some(Release::Click("node")));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwarded to `kurbo`.
//! - `libm`: use `kurbo` without `std`.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

pub mod drag;
pub mod gesture;
