// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event bus: lifecycle and mutation events delivered to host listeners.
//!
//! Listeners run in registration order. A listener returning
//! [`Outcome::Stop`] halts delivery to the listeners after it; the return
//! value of [`EventBus::emit`] reports which listener stopped it.
//!
//! ```
//! use grove_editor::bus::{Event, EventBus, EventKind, Outcome};
//!
//! let mut bus = EventBus::new();
//! let first = bus.add_event_listener(|e: &Event| {
//!     if e.kind == EventKind::DragStart { Outcome::Stop } else { Outcome::Continue }
//! });
//! bus.add_event_listener(|_: &Event| Outcome::Continue);
//!
//! assert_eq!(bus.emit(&Event::new(EventKind::Edit)), None);
//! assert_eq!(bus.emit(&Event::new(EventKind::DragStart)), Some(first));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use grove_event_state::gesture::Gesture;
use grove_tree::NodeId;

/// Kinds of events published by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A drag crossed the movement threshold.
    DragStart,
    /// The pointer moved during a drag.
    Drag,
    /// A drag ended, whether or not anything moved.
    DragEnd,
    /// A node's payload changed.
    Edit,
    /// A node was added.
    AddNode,
    /// A node and its subtree were removed.
    RemoveNode,
    /// A node was reparented.
    MoveNode,
    /// A node's geometry changed.
    Resize,
}

impl EventKind {
    /// Every kind, lifecycle kinds first.
    pub const ALL: [Self; 8] = [
        Self::DragStart,
        Self::Drag,
        Self::DragEnd,
        Self::Edit,
        Self::AddNode,
        Self::RemoveNode,
        Self::MoveNode,
        Self::Resize,
    ];

    /// Returns `true` for kinds that change the document and are recorded in history.
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            Self::Edit | Self::AddNode | Self::RemoveNode | Self::MoveNode | Self::Resize
        )
    }

    /// The event name hosts see (`"dragstart"`, `"move_node"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DragStart => "dragstart",
            Self::Drag => "drag",
            Self::DragEnd => "dragend",
            Self::Edit => "edit",
            Self::AddNode => "add_node",
            Self::RemoveNode => "remove_node",
            Self::MoveNode => "move_node",
            Self::Resize => "resize",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// The node concerned, if any.
    pub node: Option<NodeId>,
    /// The gesture that caused the event, for drag lifecycle events.
    pub gesture: Option<Gesture>,
}

impl Event {
    /// An event with no node and no gesture.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            node: None,
            gesture: None,
        }
    }

    /// An event about `node`.
    pub fn for_node(kind: EventKind, node: NodeId) -> Self {
        Self {
            node: Some(node),
            ..Self::new(kind)
        }
    }

    /// Attach the originating gesture.
    pub fn with_gesture(mut self, gesture: Gesture) -> Self {
        self.gesture = Some(gesture);
        self
    }
}

/// Propagation control returned by listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep delivering.
    Continue,
    /// Stop delivering to later listeners.
    Stop,
}

/// Handle returned by [`EventBus::add_event_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(&Event) -> Outcome>;

/// Ordered list of event listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` after all existing listeners.
    pub fn add_event_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Event) -> Outcome + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to every listener in order.
    ///
    /// Returns `None` if every listener ran, or the id of the listener that
    /// returned [`Outcome::Stop`].
    pub fn emit(&mut self, event: &Event) -> Option<ListenerId> {
        tracing::trace!(kind = event.kind.as_str(), node = ?event.node, "emit");
        for (id, listener) in &mut self.listeners {
            if listener(event) == Outcome::Stop {
                return Some(*id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn recorder(
        bus: &mut EventBus,
        tag: u8,
        log: &Rc<RefCell<Vec<(u8, EventKind)>>>,
    ) -> ListenerId {
        let log = Rc::clone(log);
        bus.add_event_listener(move |e| {
            log.borrow_mut().push((tag, e.kind));
            Outcome::Continue
        })
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        recorder(&mut bus, 1, &log);
        recorder(&mut bus, 2, &log);
        assert_eq!(bus.emit(&Event::new(EventKind::Resize)), None);
        assert_eq!(
            *log.borrow(),
            vec![(1, EventKind::Resize), (2, EventKind::Resize)]
        );
    }

    #[test]
    fn stop_halts_later_listeners() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let stopper = bus.add_event_listener(|_| Outcome::Stop);
        recorder(&mut bus, 2, &log);
        assert_eq!(bus.emit(&Event::new(EventKind::Drag)), Some(stopper));
        assert!(log.borrow().is_empty(), "listener after Stop must not run");
    }

    #[test]
    fn removed_listener_is_not_called() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let a = recorder(&mut bus, 1, &log);
        recorder(&mut bus, 2, &log);
        assert!(bus.remove_event_listener(a));
        assert!(!bus.remove_event_listener(a), "second removal is a no-op");
        bus.emit(&Event::new(EventKind::Edit));
        assert_eq!(*log.borrow(), vec![(2, EventKind::Edit)]);
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn mutation_kinds() {
        let mutations: Vec<_> = EventKind::ALL
            .into_iter()
            .filter(|k| k.is_mutation())
            .map(EventKind::as_str)
            .collect();
        assert_eq!(
            mutations,
            ["edit", "add_node", "remove_node", "move_node", "resize"]
        );
        assert!(!EventKind::DragEnd.is_mutation());
    }
}
