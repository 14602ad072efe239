// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-reparent controller.
//!
//! [`DragController`] turns normalized [`Gesture`]s into drags of tree nodes:
//!
//! - **Start**: if the document is editable and a node is drawn under the
//!   pointer, that node is armed.
//! - **Move**: once the pointer is farther than the threshold from the press,
//!   the drag starts: `dragstart` is published, a [`DragImage`] is created,
//!   and the view is asked to show the drag line. Every move while dragging
//!   (including the one that crossed the threshold) resolves the drop
//!   candidate under the pointer, re-centres the image, updates the drag line
//!   and publishes `drag`.
//! - **End**: the candidate under the release point is resolved, the image and
//!   line are removed, the node is reparented under the candidate when that
//!   is valid, and `dragend` is published whatever the outcome. A release
//!   before the threshold is a plain click and publishes nothing.
//!
//! A candidate is valid when it exists, is not the dragged node, and is not
//! inside the dragged node's subtree. A cancelled gesture resolves against the
//! last candidate seen during the drag.

use grove_event_state::drag::{DragPhase, DragState, DragTransition, Release};
use grove_event_state::gesture::{Gesture, Phase};
use grove_hit::{RenderSurface, hit_test, node_bounds};
use grove_tree::{NodeId, Tree};
use kurbo::{Point, Rect};

use crate::bus::{Event, EventKind};
use crate::config::{DragConfig, DragLineStyle};
use crate::document::Document;
use crate::error::{ConfigError, Result};

/// Host drag feedback, on top of its rendering surface.
pub trait DragVisualization: RenderSurface {
    /// Start drawing the drag line from `source`.
    fn show_drag_line(&mut self, source: NodeId, style: &DragLineStyle);

    /// Point the drag line from `source` at `target`, or hide its far end.
    fn update_drag_line(&mut self, source: NodeId, target: Option<NodeId>);

    /// Remove the drag line.
    fn hide_drag_line(&mut self);

    /// The drop candidate under `point`.
    ///
    /// Defaults to the node drawn there. Hosts can override this to snap to
    /// the nearest node or to enlarge drop zones.
    fn drop_target<P>(&self, tree: &Tree<P>, point: Point) -> Option<NodeId> {
        hit_test(self, tree, point)
    }
}

/// The floating copy of a dragged node, centred on the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragImage {
    /// The dragged node.
    pub node: NodeId,
    /// Where to draw the image, in surface coordinates.
    pub bounds: Rect,
}

/// What a gesture did to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragResponse {
    /// The gesture is not part of a drag.
    Ignored,
    /// A node was pressed and may be dragged.
    Armed(NodeId),
    /// The pressed node moved, but not past the threshold.
    Pending(NodeId),
    /// Released before the threshold; the host may treat it as a click.
    Click(NodeId),
    /// The drag started on this gesture.
    Started {
        /// The dragged node.
        node: NodeId,
        /// Drop candidate under the pointer.
        target: Option<NodeId>,
    },
    /// The drag continued.
    Moved {
        /// The dragged node.
        node: NodeId,
        /// Drop candidate under the pointer.
        target: Option<NodeId>,
    },
    /// The drag ended.
    Dropped {
        /// The dragged node.
        node: NodeId,
        /// Final drop candidate.
        target: Option<NodeId>,
        /// Whether the node was reparented.
        moved: bool,
    },
}

/// Builder for [`DragController`].
#[derive(Debug)]
pub struct DragControllerBuilder<V> {
    view: Option<V>,
    config: DragConfig,
}

impl<V> Default for DragControllerBuilder<V> {
    fn default() -> Self {
        Self {
            view: None,
            config: DragConfig::default(),
        }
    }
}

impl<V: DragVisualization> DragControllerBuilder<V> {
    /// Set the view. Required.
    pub fn view(mut self, view: V) -> Self {
        self.view = Some(view);
        self
    }

    /// Set the configuration. Defaults to [`DragConfig::default`].
    pub fn config(mut self, config: DragConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingView`] without a view,
    /// [`ConfigError::InvalidThreshold`] for a negative or non-finite threshold.
    pub fn build(self) -> Result<DragController<V>> {
        let view = self.view.ok_or(ConfigError::MissingView)?;
        self.config.validate()?;
        Ok(DragController {
            view,
            state: DragState::with_threshold(self.config.threshold),
            line: self.config.line,
            image: None,
        })
    }
}

/// Drag-to-reparent state machine for one editable surface.
#[derive(Debug)]
pub struct DragController<V> {
    view: V,
    state: DragState<NodeId>,
    line: DragLineStyle,
    image: Option<DragImage>,
}

impl<V: DragVisualization> DragController<V> {
    /// Start building a controller.
    pub fn builder() -> DragControllerBuilder<V> {
        DragControllerBuilder::default()
    }

    /// The view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The view, mutably. Hosts update their element geometry through this.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Idle, armed, or dragging.
    pub fn state(&self) -> DragPhase {
        self.state.phase()
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// The node being dragged.
    pub fn dragged(&self) -> Option<NodeId> {
        self.state.session().map(|s| s.key)
    }

    /// Current drop candidate while dragging.
    pub fn target(&self) -> Option<NodeId> {
        self.state.session().and_then(|s| s.target)
    }

    /// The drag image, while dragging a node that has an element.
    pub fn drag_image(&self) -> Option<&DragImage> {
        self.image.as_ref()
    }

    /// Returns `true` if `target` is a valid drop parent for `node`.
    pub fn is_valid_drop<P>(tree: &Tree<P>, node: NodeId, target: Option<NodeId>) -> bool {
        target.is_some_and(|t| tree.can_move(node, t))
    }

    /// Feed one gesture event.
    pub fn handle<P: Clone>(&mut self, gesture: &Gesture, doc: &mut Document<P>) -> DragResponse {
        match gesture.phase {
            Phase::Start => self.on_start(gesture, doc),
            Phase::Move => self.on_move(gesture, doc),
            Phase::End => self.on_end(gesture, doc),
        }
    }

    fn on_start<P: Clone>(&mut self, gesture: &Gesture, doc: &Document<P>) -> DragResponse {
        if self.state.phase() != DragPhase::Idle || !doc.is_editable() {
            return DragResponse::Ignored;
        }
        let Some(node) = hit_test(&self.view, doc.tree(), gesture.position) else {
            return DragResponse::Ignored;
        };
        self.state.on_press(node, gesture.position);
        tracing::trace!(?node, "armed");
        DragResponse::Armed(node)
    }

    fn on_move<P: Clone>(&mut self, gesture: &Gesture, doc: &mut Document<P>) -> DragResponse {
        let position = gesture.position;
        let started = match self.state.on_move(position) {
            DragTransition::None => return DragResponse::Ignored,
            DragTransition::Pending => {
                return self
                    .state
                    .pressed()
                    .map_or(DragResponse::Ignored, |(node, _)| {
                        DragResponse::Pending(*node)
                    });
            }
            DragTransition::Started => true,
            DragTransition::Moved => false,
        };
        let Some(node) = self.dragged() else {
            return DragResponse::Ignored;
        };

        if started {
            tracing::debug!(?node, "drag started");
            // No element on screen, nothing to copy.
            self.image = node_bounds(&self.view, node).map(|r| DragImage {
                node,
                bounds: Rect::from_center_size(position, r.size()),
            });
            doc.emit(&Event::for_node(EventKind::DragStart, node).with_gesture(*gesture));
            self.view.show_drag_line(node, &self.line);
        }

        let target = self.view.drop_target(doc.tree(), position);
        self.state.set_target(target);
        if let Some(image) = &mut self.image {
            image.bounds = Rect::from_center_size(position, image.bounds.size());
        }
        self.view.update_drag_line(node, target);
        tracing::trace!(?node, ?target, "drag");
        doc.emit(&Event::for_node(EventKind::Drag, node).with_gesture(*gesture));

        if started {
            DragResponse::Started { node, target }
        } else {
            DragResponse::Moved { node, target }
        }
    }

    fn on_end<P: Clone>(&mut self, gesture: &Gesture, doc: &mut Document<P>) -> DragResponse {
        if self.state.is_dragging() && !gesture.cancelled {
            let target = self.view.drop_target(doc.tree(), gesture.position);
            self.state.set_target(target);
        }
        let session = match self.state.on_release(gesture.position) {
            Release::None => return DragResponse::Ignored,
            Release::Click(node) => return DragResponse::Click(node),
            Release::Drop(session) => session,
        };
        let (node, target) = (session.key, session.target);

        self.image = None;
        self.view.hide_drag_line();

        let moved = match target {
            Some(t) if Self::is_valid_drop(doc.tree(), node, target) => doc.move_node(node, t),
            _ => {
                tracing::debug!(?node, ?target, "drop rejected");
                false
            }
        };
        tracing::debug!(?node, ?target, moved, cancelled = gesture.cancelled, "drag ended");
        doc.emit(&Event::for_node(EventKind::DragEnd, node).with_gesture(*gesture));
        DragResponse::Dropped {
            node,
            target,
            moved,
        }
    }
}
