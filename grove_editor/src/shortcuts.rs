// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard shortcuts for undo and redo.
//!
//! | Chord | Action |
//! |-------|--------|
//! | Ctrl/Cmd + Z | undo |
//! | Ctrl/Cmd + Shift + Z | redo |
//! | Ctrl/Cmd + Y | redo |
//!
//! Chords that also hold Alt never match. Matching chords report
//! [`KeyDisposition::PreventDefault`] so the host suppresses the platform
//! action; everything else passes through.
//!
//! ```
//! use grove_editor::shortcuts::{Key, KeyChord, Modifiers, ShortcutAction, ShortcutDispatcher};
//!
//! let dispatcher = ShortcutDispatcher::new();
//! let chord = KeyChord::new(Key::Character('z'), Modifiers::META | Modifiers::SHIFT);
//! assert_eq!(dispatcher.resolve(&chord), Some(ShortcutAction::Redo));
//!
//! let chord = KeyChord::new(Key::Character('z'), Modifiers::CTRL | Modifiers::ALT);
//! assert_eq!(dispatcher.resolve(&chord), None);
//! ```

bitflags::bitflags! {
    /// Modifier keys held with a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control.
        const CTRL  = 0b0001;
        /// Command on macOS, the Windows key elsewhere.
        const META  = 0b0010;
        /// Alt / Option.
        const ALT   = 0b0100;
        /// Shift.
        const SHIFT = 0b1000;
    }
}

/// A pressed key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key producing a character. Letters match case-insensitively.
    Character(char),
    /// Any other key, by host key code. Never matches a shortcut.
    Other(u32),
}

/// A key with its modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The key.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// Combine a key and modifiers.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Actions a chord can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    /// Step back in history.
    Undo,
    /// Step forward in history.
    Redo,
}

/// What the host should do with the original key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyDisposition {
    /// The chord was handled; suppress the platform default.
    PreventDefault,
    /// Not a shortcut; let the event through.
    PassThrough,
}

/// Something with undo and redo.
pub trait UndoRedo {
    /// Step back. Returns `false` when nothing changed.
    fn undo(&mut self) -> bool;
    /// Step forward. Returns `false` when nothing changed.
    fn redo(&mut self) -> bool;
}

/// Maps key chords to [`ShortcutAction`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortcutDispatcher {
    _priv: (),
}

impl ShortcutDispatcher {
    /// Create a dispatcher with the standard bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The action bound to `chord`, if any.
    pub fn resolve(&self, chord: &KeyChord) -> Option<ShortcutAction> {
        let mods = chord.modifiers;
        if !mods.intersects(Modifiers::CTRL | Modifiers::META) || mods.contains(Modifiers::ALT) {
            return None;
        }
        let Key::Character(c) = chord.key else {
            return None;
        };
        match c.to_ascii_lowercase() {
            'z' if mods.contains(Modifiers::SHIFT) => Some(ShortcutAction::Redo),
            'z' => Some(ShortcutAction::Undo),
            'y' => Some(ShortcutAction::Redo),
            _ => None,
        }
    }

    /// Resolve `chord` and run the action on `target`.
    ///
    /// A matching chord is reported as [`KeyDisposition::PreventDefault`]
    /// even when the action itself was a no-op (undo at the oldest state).
    pub fn dispatch<T>(&self, chord: &KeyChord, target: &mut T) -> KeyDisposition
    where
        T: UndoRedo + ?Sized,
    {
        let Some(action) = self.resolve(chord) else {
            return KeyDisposition::PassThrough;
        };
        let changed = match action {
            ShortcutAction::Undo => target.undo(),
            ShortcutAction::Redo => target.redo(),
        };
        tracing::debug!(?action, changed, "shortcut");
        KeyDisposition::PreventDefault
    }
}
