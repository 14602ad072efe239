// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor facade: raw input in, tree edits and events out.

use grove_event_state::drag::DragPhase;
use grove_event_state::gesture::{GestureTracker, PointerInput};
use grove_tree::Tree;

use crate::config::EditorConfig;
use crate::document::Document;
use crate::drag::{DragController, DragResponse, DragVisualization};
use crate::error::{ConfigError, Result};
use crate::shortcuts::{KeyChord, KeyDisposition, ShortcutDispatcher};

/// One editable surface: a document, its view, and the input state machines.
///
/// Pointer input flows through a [`GestureTracker`] into the
/// [`DragController`]; key chords go through the [`ShortcutDispatcher`] to
/// the document's history.
#[derive(Debug)]
pub struct Editor<P: Clone, V> {
    gestures: GestureTracker,
    drag: DragController<V>,
    shortcuts: ShortcutDispatcher,
    document: Document<P>,
}

impl<P: Clone, V: DragVisualization> Editor<P, V> {
    /// Start building an editor.
    pub fn builder() -> EditorBuilder<P, V> {
        EditorBuilder::default()
    }

    /// Feed one raw pointer or touch input.
    ///
    /// Returns [`DragResponse::Ignored`] for input that produced no gesture.
    pub fn handle_pointer(&mut self, input: &PointerInput<'_>) -> DragResponse {
        match self.gestures.handle(input) {
            Some(gesture) => self.drag.handle(&gesture, &mut self.document),
            None => DragResponse::Ignored,
        }
    }

    /// Feed one key chord.
    pub fn handle_key(&mut self, chord: &KeyChord) -> KeyDisposition {
        self.shortcuts.dispatch(chord, &mut self.document)
    }

    /// Returns `true` while a node is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Idle, armed, or dragging.
    pub fn drag_state(&self) -> DragPhase {
        self.drag.state()
    }

    /// The drag controller.
    pub fn drag(&self) -> &DragController<V> {
        &self.drag
    }

    /// The view.
    pub fn view(&self) -> &V {
        self.drag.view()
    }

    /// The view, mutably.
    pub fn view_mut(&mut self) -> &mut V {
        self.drag.view_mut()
    }

    /// The document.
    pub fn document(&self) -> &Document<P> {
        &self.document
    }

    /// The document, mutably, for host-driven edits.
    pub fn document_mut(&mut self) -> &mut Document<P> {
        &mut self.document
    }

    /// Undo through the document history.
    pub fn undo(&mut self) -> bool {
        self.document.undo()
    }

    /// Redo through the document history.
    pub fn redo(&mut self) -> bool {
        self.document.redo()
    }
}

/// Builder for [`Editor`].
#[derive(Debug)]
pub struct EditorBuilder<P, V> {
    tree: Option<Tree<P>>,
    view: Option<V>,
    config: EditorConfig,
}

impl<P, V> Default for EditorBuilder<P, V> {
    fn default() -> Self {
        Self {
            tree: None,
            view: None,
            config: EditorConfig::default(),
        }
    }
}

impl<P: Clone, V: DragVisualization> EditorBuilder<P, V> {
    /// Set the tree to edit. Required.
    pub fn tree(mut self, tree: Tree<P>) -> Self {
        self.tree = Some(tree);
        self
    }

    /// Set the view. Required.
    pub fn view(mut self, view: V) -> Self {
        self.view = Some(view);
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingTree`], [`ConfigError::MissingView`], or
    /// [`ConfigError::InvalidThreshold`].
    pub fn build(self) -> Result<Editor<P, V>> {
        let tree = self.tree.ok_or(ConfigError::MissingTree)?;
        let view = self.view.ok_or(ConfigError::MissingView)?;
        let drag = DragController::builder()
            .view(view)
            .config(self.config.drag)
            .build()?;
        Ok(Editor {
            gestures: GestureTracker::new(),
            drag,
            shortcuts: ShortcutDispatcher::new(),
            document: Document::with_history_config(tree, self.config.history),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::tests::RecordingView;
    use crate::shortcuts::{Key, Modifiers};
    use grove_event_state::gesture::{MouseButtons, Touch};
    use kurbo::{Point, Rect};

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

    #[test]
    fn builder_errors() {
        let no_tree = Editor::<(), RecordingView>::builder()
            .view(RecordingView::default())
            .build();
        assert_eq!(no_tree.err(), Some(ConfigError::MissingTree));

        let no_view = Editor::<(), RecordingView>::builder()
            .tree(Tree::new(()))
            .build();
        assert_eq!(no_view.err(), Some(ConfigError::MissingView));
    }

    #[test]
    fn mouse_drag_then_keyboard_undo() {
        let mut tree = Tree::new("root");
        let a = tree.insert(tree.root(), "a").unwrap();
        let b = tree.insert(tree.root(), "b").unwrap();
        let mut view = RecordingView::default();
        view.surface.insert(a, Rect::new(0.0, 0.0, 40.0, 20.0), 0);
        view.surface.insert(b, Rect::new(100.0, 0.0, 140.0, 20.0), 0);
        let mut editor = Editor::builder().tree(tree).view(view).build().unwrap();

        editor.handle_pointer(&down(10.0, 10.0));
        editor.handle_pointer(&drag_to(110.0, 10.0));
        assert!(editor.is_dragging());
        let response = editor.handle_pointer(&up(110.0, 10.0));
        assert!(matches!(response, DragResponse::Dropped { moved: true, .. }));
        assert_eq!(editor.document().tree().parent_of(a), Some(b));

        let undo = KeyChord::new(Key::Character('z'), Modifiers::CTRL);
        assert_eq!(editor.handle_key(&undo), KeyDisposition::PreventDefault);
        assert_eq!(editor.document().tree().parent_of(a), Some(editor.document().tree().root()));

        let redo = KeyChord::new(Key::Character('y'), Modifiers::META);
        assert_eq!(editor.handle_key(&redo), KeyDisposition::PreventDefault);
        assert_eq!(editor.document().tree().parent_of(a), Some(b));
    }

    #[test]
    fn touch_drag_reparents() {
        let mut tree = Tree::new(0);
        let a = tree.insert(tree.root(), 1).unwrap();
        let b = tree.insert(tree.root(), 2).unwrap();
        let mut view = RecordingView::default();
        view.surface.insert(a, Rect::new(0.0, 0.0, 40.0, 20.0), 0);
        view.surface.insert(b, Rect::new(100.0, 0.0, 140.0, 20.0), 0);
        let mut editor = Editor::builder().tree(tree).view(view).build().unwrap();

        let t = |x: f64| Touch {
            id: 3,
            position: Point::new(x, 10.0),
        };
        editor.handle_pointer(&PointerInput::TouchStart { touches: &[t(10.0)] });
        editor.handle_pointer(&PointerInput::TouchMove { touches: &[t(60.0)] });
        editor.handle_pointer(&PointerInput::TouchMove { touches: &[t(90.0)] });
        // Released over `b`; only `changed` carries the final position.
        let response = editor.handle_pointer(&PointerInput::TouchEnd {
            changed: &[t(120.0)],
            remaining: &[],
        });
        assert_eq!(
            response,
            DragResponse::Dropped {
                node: a,
                target: Some(b),
                moved: true
            }
        );
    }

    #[test]
    fn input_cancel_never_leaves_a_drag_behind() {
        let mut tree = Tree::new(());
        let a = tree.insert(tree.root(), ()).unwrap();
        let mut view = RecordingView::default();
        view.surface.insert(a, Rect::new(0.0, 0.0, 40.0, 20.0), 0);
        let mut editor = Editor::builder().tree(tree).view(view).build().unwrap();

        editor.handle_pointer(&down(10.0, 10.0));
        editor.handle_pointer(&drag_to(80.0, 80.0));
        assert_eq!(editor.drag_state(), DragPhase::Dragging);
        let response = editor.handle_pointer(&PointerInput::Cancel);
        assert!(matches!(response, DragResponse::Dropped { moved: false, .. }));
        assert_eq!(editor.drag_state(), DragPhase::Idle);
        assert!(editor.drag().drag_image().is_none());
    }
}
