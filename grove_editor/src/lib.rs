// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grove Editor: drag-to-reparent and undo/redo for a mind-map editor.
//!
//! This crate wires the building blocks together:
//!
//! - [`bus`]: the event bus (`dragstart`, `drag`, `dragend`, `edit`,
//!   `add_node`, `remove_node`, `move_node`, `resize`).
//! - [`document`]: a [`Tree`](grove_tree::Tree) with its bus and snapshot
//!   history. Every mutation is recorded before listeners hear about it.
//! - [`drag`]: the drag controller and the [`DragVisualization`] trait the
//!   host implements to draw the drag line.
//! - [`shortcuts`]: Ctrl/Cmd+Z, Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y.
//! - [`Editor`]: one editable surface, fed raw pointer input and key chords.
//!
//! ## Example
//!
//! ```rust
//! use grove_editor::drag::{DragResponse, DragVisualization};
//! use grove_editor::config::DragLineStyle;
//! use grove_editor::Editor;
//! use grove_event_state::gesture::{MouseButtons, PointerInput};
//! use grove_hit::{ElementId, RenderSurface, SpatialSurface};
//! use grove_tree::{NodeId, Tree};
//! use kurbo::{Point, Rect};
//!
//! #[derive(Default)]
//! struct Canvas {
//!     surface: SpatialSurface,
//!     line: Option<(NodeId, Option<NodeId>)>,
//! }
//!
//! impl RenderSurface for Canvas {
//!     type Element = ElementId;
//!     fn element_from_point(&self, p: Point) -> Option<ElementId> { self.surface.element_from_point(p) }
//!     fn node_of(&self, e: ElementId) -> Option<NodeId> { self.surface.node_of(e) }
//!     fn element_of(&self, n: NodeId) -> Option<ElementId> { self.surface.element_of(n) }
//!     fn element_bounds(&self, e: ElementId) -> Option<Rect> { self.surface.element_bounds(e) }
//! }
//!
//! impl DragVisualization for Canvas {
//!     fn show_drag_line(&mut self, source: NodeId, _: &DragLineStyle) { self.line = Some((source, None)); }
//!     fn update_drag_line(&mut self, source: NodeId, target: Option<NodeId>) { self.line = Some((source, target)); }
//!     fn hide_drag_line(&mut self) { self.line = None; }
//! }
//!
//! let mut tree = Tree::new("root");
//! let a = tree.insert(tree.root(), "a").unwrap();
//! let b = tree.insert(tree.root(), "b").unwrap();
//!
//! let mut canvas = Canvas::default();
//! canvas.surface.insert(a, Rect::new(0.0, 0.0, 40.0, 20.0), 0);
//! canvas.surface.insert(b, Rect::new(100.0, 0.0, 140.0, 20.0), 0);
//!
//! let mut editor = Editor::builder().tree(tree).view(canvas).build().unwrap();
//! let at = |x: f64| Point::new(x, 10.0);
//! editor.handle_pointer(&PointerInput::MouseDown { position: at(10.0), button: MouseButtons::PRIMARY });
//! editor.handle_pointer(&PointerInput::MouseMove { position: at(120.0), buttons: MouseButtons::PRIMARY });
//! assert_eq!(editor.view().line, Some((a, Some(b))));
//!
//! let done = editor.handle_pointer(&PointerInput::MouseUp { position: at(120.0), button: MouseButtons::PRIMARY });
//! assert_eq!(done, DragResponse::Dropped { node: a, target: Some(b), moved: true });
//! assert_eq!(editor.document().tree().parent_of(a), Some(b));
//!
//! assert!(editor.undo());
//! assert_eq!(editor.document().tree().parent_of(a), Some(editor.document().tree().root()));
//! ```
//!
//! ## Errors and logging
//!
//! Only construction fails, with [`ConfigError`]. Everything at runtime that
//! cannot apply is a no-op reported through `bool`, `Option`, or
//! [`DragResponse`]. Diagnostics go through `tracing`; no subscriber is
//! installed.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: float support for `kurbo`.
//! - `serde`: derives `Serialize`/`Deserialize` for configuration types and
//!   tree snapshots.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bus;
pub mod config;
pub mod document;
pub mod drag;
pub mod editor;
pub mod error;
pub mod shortcuts;

pub use bus::{Event, EventBus, EventKind, ListenerId, Outcome};
pub use config::{Color, DragConfig, DragLineStyle, EditorConfig, HistoryConfig};
pub use document::Document;
pub use drag::{DragController, DragImage, DragResponse, DragVisualization};
pub use editor::{Editor, EditorBuilder};
pub use error::ConfigError;
pub use shortcuts::{
    Key, KeyChord, KeyDisposition, Modifiers, ShortcutAction, ShortcutDispatcher, UndoRedo,
};
