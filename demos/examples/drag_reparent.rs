// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a node onto another, then undo and redo with keyboard chords.
//!
//! The canvas lays nodes out in columns by depth, one row per node in
//! depth-first order, and is rebuilt after every change.
//!
//! Run:
//! - `cargo run -p grove_demos --example drag_reparent`
//! - `RUST_LOG=grove=trace cargo run -p grove_demos --example drag_reparent` for the
//!   controller and history logs.

use grove_editor::{
    DragLineStyle, DragResponse, DragVisualization, Editor, Key, KeyChord, Modifiers, Outcome,
};
use grove_event_state::gesture::{MouseButtons, PointerInput};
use grove_hit::{ElementId, RenderSurface, SpatialSurface};
use grove_tree::{NodeId, Tree};
use kurbo::{Point, Rect};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const COLUMN: f64 = 120.0;
const ROW: f64 = 30.0;

#[derive(Debug, Default)]
struct Canvas {
    surface: SpatialSurface,
}

impl Canvas {
    fn layout(&mut self, tree: &Tree<&'static str>) {
        self.surface.clear();
        for (row, id) in tree.iter_depth_first().enumerate() {
            let depth = tree.depth(id).unwrap_or(0) as f64;
            let origin = Point::new(depth * COLUMN, row as f64 * ROW);
            self.surface
                .insert(id, Rect::from_origin_size(origin, (100.0, 20.0)), 0);
        }
    }

    fn centre_of(&self, node: NodeId) -> Option<Point> {
        grove_hit::node_bounds(self, node).map(|r| r.center())
    }
}

impl RenderSurface for Canvas {
    type Element = ElementId;

    fn element_from_point(&self, point: Point) -> Option<ElementId> {
        self.surface.element_from_point(point)
    }

    fn node_of(&self, element: ElementId) -> Option<NodeId> {
        self.surface.node_of(element)
    }

    fn element_of(&self, node: NodeId) -> Option<ElementId> {
        self.surface.element_of(node)
    }

    fn element_bounds(&self, element: ElementId) -> Option<Rect> {
        self.surface.element_bounds(element)
    }
}

impl DragVisualization for Canvas {
    fn show_drag_line(&mut self, source: NodeId, style: &DragLineStyle) {
        println!("  line from {source:?} in {} ({}px)", style.color, style.width);
    }

    fn update_drag_line(&mut self, source: NodeId, target: Option<NodeId>) {
        println!("  line {source:?} -> {target:?}");
    }

    fn hide_drag_line(&mut self) {
        println!("  line hidden");
    }
}

fn print_tree(tree: &Tree<&'static str>) {
    for id in tree.iter_depth_first() {
        let depth = tree.depth(id).unwrap_or(0);
        println!("{:indent$}{}", "", tree.payload(id).unwrap_or(&"?"), indent = depth * 2);
    }
}

fn drag(editor: &mut Editor<&'static str, Canvas>, from: Point, to: Point) -> DragResponse {
    let button = MouseButtons::PRIMARY;
    editor.handle_pointer(&PointerInput::MouseDown { position: from, button });
    let midway = from.midpoint(to);
    editor.handle_pointer(&PointerInput::MouseMove { position: midway, buttons: button });
    editor.handle_pointer(&PointerInput::MouseMove { position: to, buttons: button });
    editor.handle_pointer(&PointerInput::MouseUp { position: to, button })
}

fn relayout(editor: &mut Editor<&'static str, Canvas>) {
    let tree = editor.document().tree().clone();
    editor.view_mut().layout(&tree);
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut tree = Tree::new("Central idea");
    let plans = tree.insert(tree.root(), "Plans").unwrap();
    let notes = tree.insert(tree.root(), "Notes").unwrap();
    let draft = tree.insert(plans, "Draft").unwrap();
    tree.insert(draft, "Outline").unwrap();

    let mut editor = Editor::builder()
        .tree(tree)
        .view(Canvas::default())
        .build()
        .expect("default configuration is valid");
    relayout(&mut editor);

    editor.document_mut().add_event_listener(|event| {
        println!("event: {} {:?}", event.kind, event.node);
        Outcome::Continue
    });

    println!("== Initial ==");
    print_tree(editor.document().tree());

    println!("\n== Drag Draft onto Notes ==");
    let from = editor.view().centre_of(draft).expect("draft is drawn");
    let to = editor.view().centre_of(notes).expect("notes is drawn");
    println!("{:?}", drag(&mut editor, from, to));
    relayout(&mut editor);
    print_tree(editor.document().tree());

    println!("\n== Drag Notes onto Draft, its own child: refused ==");
    let from = editor.view().centre_of(notes).expect("notes is drawn");
    let to = editor.view().centre_of(draft).expect("draft is drawn");
    println!("{:?}", drag(&mut editor, from, to));
    relayout(&mut editor);
    print_tree(editor.document().tree());

    println!("\n== Ctrl+Z ==");
    let undo = KeyChord::new(Key::Character('z'), Modifiers::CTRL);
    println!("{:?}", editor.handle_key(&undo));
    relayout(&mut editor);
    print_tree(editor.document().tree());

    println!("\n== Ctrl+Shift+Z ==");
    let redo = KeyChord::new(Key::Character('z'), Modifiers::CTRL | Modifiers::SHIFT);
    println!("{:?}", editor.handle_key(&redo));
    relayout(&mut editor);
    print_tree(editor.document().tree());
}
