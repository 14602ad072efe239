// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse and touch normalization into a single press/move/release protocol.
//!
//! [`GestureTracker`] consumes raw [`PointerInput`] and produces at most one
//! [`Gesture`] per input. Consumers only ever see `Start`, any number of
//! `Move`s, and exactly one `End` per gesture, whether the input came from a
//! mouse or a touch screen.
//!
//! ## Rules
//!
//! - **Mouse**: the pressed button is tracked. Releasing it ends the gesture.
//!   A move that reports the button as no longer held (released outside the
//!   window, say) also ends it, at the move position.
//! - **Touch**: the first touch of the starting event is tracked by id; other
//!   simultaneous touches are ignored. The gesture ends when the tracked touch
//!   lifts, disappears from the active list, or the list becomes empty.
//! - **Cancel**: ends an active gesture with [`Gesture::cancelled`] set, at
//!   the last known position.
//! - Presses while a gesture is active are ignored, as are moves and releases
//!   while idle.
//!
//! ```
//! use grove_event_state::gesture::{GestureTracker, Phase, PointerInput, Touch};
//! use kurbo::Point;
//!
//! let mut tracker = GestureTracker::new();
//! let first = Touch { id: 7, position: Point::new(10.0, 10.0) };
//! let second = Touch { id: 8, position: Point::new(90.0, 90.0) };
//!
//! let g = tracker.handle(&PointerInput::TouchStart { touches: &[first] }).unwrap();
//! assert_eq!(g.phase, Phase::Start);
//!
//! // A second finger joins; it is ignored.
//! assert!(tracker.handle(&PointerInput::TouchStart { touches: &[first, second] }).is_none());
//!
//! // Lifting the tracked finger ends the gesture where it was lifted.
//! let lifted = Touch { id: 7, position: Point::new(14.0, 12.0) };
//! let g = tracker
//!     .handle(&PointerInput::TouchEnd { changed: &[lifted], remaining: &[second] })
//!     .unwrap();
//! assert_eq!(g.phase, Phase::End);
//! assert_eq!(g.position, Point::new(14.0, 12.0));
//! ```

use kurbo::Point;

/// Identifier of a touch point, stable for the lifetime of that touch.
pub type TouchId = u64;

bitflags::bitflags! {
    /// Mouse buttons, as a set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Usually the left button.
        const PRIMARY   = 0b0000_0001;
        /// Usually the right button.
        const SECONDARY = 0b0000_0010;
        /// Usually the wheel button.
        const AUXILIARY = 0b0000_0100;
        /// Browser back.
        const BACK      = 0b0000_1000;
        /// Browser forward.
        const FORWARD   = 0b0001_0000;
    }
}

/// One active touch point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Touch {
    /// Touch identity.
    pub id: TouchId,
    /// Position in surface coordinates.
    pub position: Point,
}

/// Raw input delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput<'a> {
    /// A mouse button went down.
    MouseDown {
        /// Pointer position.
        position: Point,
        /// The button that went down.
        button: MouseButtons,
    },
    /// The mouse moved.
    MouseMove {
        /// Pointer position.
        position: Point,
        /// Buttons held during the move.
        buttons: MouseButtons,
    },
    /// A mouse button went up.
    MouseUp {
        /// Pointer position.
        position: Point,
        /// The button that went up.
        button: MouseButtons,
    },
    /// One or more touches began.
    TouchStart {
        /// All touches currently on the surface.
        touches: &'a [Touch],
    },
    /// Touches moved.
    TouchMove {
        /// All touches currently on the surface.
        touches: &'a [Touch],
    },
    /// One or more touches lifted.
    TouchEnd {
        /// The touches that lifted, at their final positions.
        changed: &'a [Touch],
        /// Touches still on the surface.
        remaining: &'a [Touch],
    },
    /// The input source was lost (touch cancel, focus loss).
    Cancel,
}

/// Stage of a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Press.
    Start,
    /// Movement while pressed.
    Move,
    /// Release; emitted exactly once per gesture.
    End,
}

/// Which device drives a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// A mouse or other single pointer.
    Mouse,
    /// A touch screen.
    Touch,
}

/// One normalized gesture event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gesture {
    /// Press, move, or release.
    pub phase: Phase,
    /// Position in surface coordinates.
    pub position: Point,
    /// Device that produced the gesture.
    pub source: InputSource,
    /// True only on an `End` caused by losing the input source abnormally.
    pub cancelled: bool,
}

impl Gesture {
    fn new(phase: Phase, position: Point, source: InputSource) -> Self {
        Self {
            phase,
            position,
            source,
            cancelled: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Active {
    Mouse { button: MouseButtons, last: Point },
    Touch { id: TouchId, last: Point },
}

impl Active {
    fn last(self) -> Point {
        match self {
            Self::Mouse { last, .. } | Self::Touch { last, .. } => last,
        }
    }

    fn source(self) -> InputSource {
        match self {
            Self::Mouse { .. } => InputSource::Mouse,
            Self::Touch { .. } => InputSource::Touch,
        }
    }
}

/// Normalizes mouse and touch input into [`Gesture`]s.
#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    active: Option<Active>,
}

impl GestureTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` between a `Start` and its `End`.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Last known position of the active gesture.
    pub fn position(&self) -> Option<Point> {
        self.active.map(Active::last)
    }

    /// Drop any active gesture without emitting an `End`.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Feed one raw input. Returns the gesture event it produces, if any.
    pub fn handle(&mut self, input: &PointerInput<'_>) -> Option<Gesture> {
        match *input {
            PointerInput::MouseDown { position, button } => {
                if self.active.is_some() {
                    return None;
                }
                self.active = Some(Active::Mouse {
                    button,
                    last: position,
                });
                Some(Gesture::new(Phase::Start, position, InputSource::Mouse))
            }
            PointerInput::MouseMove { position, buttons } => {
                let Some(Active::Mouse { button, last }) = self.active.as_mut() else {
                    return None;
                };
                if !buttons.contains(*button) {
                    return self.finish(position, false);
                }
                *last = position;
                Some(Gesture::new(Phase::Move, position, InputSource::Mouse))
            }
            PointerInput::MouseUp { position, button } => match self.active {
                Some(Active::Mouse { button: held, .. }) if held == button => {
                    self.finish(position, false)
                }
                _ => None,
            },
            PointerInput::TouchStart { touches } => {
                if self.active.is_some() {
                    return None;
                }
                let first = touches.first()?;
                self.active = Some(Active::Touch {
                    id: first.id,
                    last: first.position,
                });
                Some(Gesture::new(Phase::Start, first.position, InputSource::Touch))
            }
            PointerInput::TouchMove { touches } => {
                let Some(Active::Touch { id, last }) = self.active.as_mut() else {
                    return None;
                };
                match touches.iter().find(|t| t.id == *id) {
                    Some(t) => {
                        *last = t.position;
                        Some(Gesture::new(Phase::Move, t.position, InputSource::Touch))
                    }
                    None => {
                        let last = *last;
                        self.finish(last, false)
                    }
                }
            }
            PointerInput::TouchEnd { changed, remaining } => {
                let Some(Active::Touch { id, last }) = self.active else {
                    return None;
                };
                if let Some(t) = changed.iter().find(|t| t.id == id) {
                    return self.finish(t.position, false);
                }
                if remaining.iter().any(|t| t.id == id) {
                    // Some other finger lifted.
                    return None;
                }
                self.finish(last, false)
            }
            PointerInput::Cancel => {
                let last = self.active?.last();
                self.finish(last, true)
            }
        }
    }

    fn finish(&mut self, position: Point, cancelled: bool) -> Option<Gesture> {
        let active = self.active.take()?;
        tracing::trace!(?position, cancelled, "gesture ended");
        Some(Gesture {
            phase: Phase::End,
            position,
            source: active.source(),
            cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> PointerInput<'static> {
        PointerInput::MouseDown {
            position: Point::new(x, y),
            button: MouseButtons::PRIMARY,
        }
    }

    fn drag_to(x: f64, y: f64) -> PointerInput<'static> {
        PointerInput::MouseMove {
            position: Point::new(x, y),
            buttons: MouseButtons::PRIMARY,
        }
    }

    fn up(x: f64, y: f64) -> PointerInput<'static> {
        PointerInput::MouseUp {
            position: Point::new(x, y),
            button: MouseButtons::PRIMARY,
        }
    }

    fn phases(tracker: &mut GestureTracker, inputs: &[PointerInput<'_>]) -> alloc::vec::Vec<Phase> {
        inputs
            .iter()
            .filter_map(|i| tracker.handle(i))
            .map(|g| g.phase)
            .collect()
    }

    #[test]
    fn mouse_press_move_release() {
        let mut tracker = GestureTracker::new();
        let seen = phases(&mut tracker, &[down(0.0, 0.0), drag_to(3.0, 4.0), up(3.0, 4.0)]);
        assert_eq!(seen, [Phase::Start, Phase::Move, Phase::End]);
        assert!(!tracker.is_active());
    }

    #[test]
    fn idle_moves_and_releases_are_ignored() {
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.handle(&drag_to(1.0, 1.0)), None);
        assert_eq!(tracker.handle(&up(1.0, 1.0)), None);
        assert_eq!(tracker.handle(&PointerInput::Cancel), None);
    }

    #[test]
    fn second_press_during_gesture_is_ignored() {
        let mut tracker = GestureTracker::new();
        tracker.handle(&down(0.0, 0.0));
        let other = PointerInput::MouseDown {
            position: Point::new(5.0, 5.0),
            button: MouseButtons::SECONDARY,
        };
        assert_eq!(tracker.handle(&other), None);
        let other_up = PointerInput::MouseUp {
            position: Point::new(5.0, 5.0),
            button: MouseButtons::SECONDARY,
        };
        assert_eq!(tracker.handle(&other_up), None, "wrong button does not end");
        assert!(tracker.is_active());
    }

    #[test]
    fn move_without_held_button_ends_once() {
        let mut tracker = GestureTracker::new();
        tracker.handle(&down(0.0, 0.0));
        let released_outside = PointerInput::MouseMove {
            position: Point::new(40.0, 0.0),
            buttons: MouseButtons::empty(),
        };
        let g = tracker.handle(&released_outside).unwrap();
        assert_eq!(g.phase, Phase::End);
        assert_eq!(g.position, Point::new(40.0, 0.0));
        assert!(!g.cancelled);
        // The late mouseup does not produce a second end.
        assert_eq!(tracker.handle(&up(40.0, 0.0)), None);
    }

    #[test]
    fn touch_uses_first_point_only() {
        let mut tracker = GestureTracker::new();
        let a = Touch {
            id: 1,
            position: Point::new(0.0, 0.0),
        };
        let b = Touch {
            id: 2,
            position: Point::new(50.0, 50.0),
        };
        let start = tracker
            .handle(&PointerInput::TouchStart { touches: &[a, b] })
            .unwrap();
        assert_eq!(start.position, a.position);
        assert_eq!(start.source, InputSource::Touch);

        let a_moved = Touch {
            id: 1,
            position: Point::new(6.0, 8.0),
        };
        let b_moved = Touch {
            id: 2,
            position: Point::new(70.0, 70.0),
        };
        let g = tracker
            .handle(&PointerInput::TouchMove {
                touches: &[b_moved, a_moved],
            })
            .unwrap();
        assert_eq!(g.position, a_moved.position);

        // Lifting the untracked finger changes nothing.
        let ended = tracker.handle(&PointerInput::TouchEnd {
            changed: &[b_moved],
            remaining: &[a_moved],
        });
        assert_eq!(ended, None);
        assert!(tracker.is_active());
    }

    #[test]
    fn empty_touch_list_ends_at_last_position() {
        let mut tracker = GestureTracker::new();
        let a = Touch {
            id: 1,
            position: Point::new(2.0, 2.0),
        };
        tracker.handle(&PointerInput::TouchStart { touches: &[a] });
        let g = tracker
            .handle(&PointerInput::TouchEnd {
                changed: &[],
                remaining: &[],
            })
            .unwrap();
        assert_eq!(g.phase, Phase::End);
        assert_eq!(g.position, a.position);
        assert_eq!(
            tracker.handle(&PointerInput::TouchEnd {
                changed: &[],
                remaining: &[],
            }),
            None,
            "end is emitted exactly once"
        );
    }

    #[test]
    fn tracked_touch_missing_from_move_ends_gesture() {
        let mut tracker = GestureTracker::new();
        let a = Touch {
            id: 1,
            position: Point::new(2.0, 2.0),
        };
        let b = Touch {
            id: 9,
            position: Point::new(9.0, 9.0),
        };
        tracker.handle(&PointerInput::TouchStart { touches: &[a] });
        let g = tracker
            .handle(&PointerInput::TouchMove { touches: &[b] })
            .unwrap();
        assert_eq!(g.phase, Phase::End);
        assert_eq!(g.position, a.position);
    }

    #[test]
    fn cancel_ends_with_flag() {
        let mut tracker = GestureTracker::new();
        tracker.handle(&down(0.0, 0.0));
        tracker.handle(&drag_to(20.0, 0.0));
        let g = tracker.handle(&PointerInput::Cancel).unwrap();
        assert_eq!(g.phase, Phase::End);
        assert!(g.cancelled);
        assert_eq!(g.position, Point::new(20.0, 0.0));
        assert_eq!(tracker.handle(&PointerInput::Cancel), None);
    }

    #[test]
    fn mouse_events_during_touch_gesture_are_ignored() {
        let mut tracker = GestureTracker::new();
        let a = Touch {
            id: 1,
            position: Point::new(2.0, 2.0),
        };
        tracker.handle(&PointerInput::TouchStart { touches: &[a] });
        assert_eq!(tracker.handle(&drag_to(30.0, 30.0)), None);
        assert_eq!(tracker.handle(&up(30.0, 30.0)), None);
        assert_eq!(tracker.position(), Some(a.position));
    }
}
