// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor configuration.
//!
//! All configuration types implement `Default` with the stock behavior, and
//! with the `serde` feature they can be loaded from any serde format. Missing
//! fields fall back to their defaults:
//!
//! ```
//! use grove_editor::config::{Color, DragConfig};
//!
//! let config = DragConfig::default();
//! assert_eq!(config.threshold, 5.0);
//! assert_eq!(config.line.color, Color::GOLD);
//! assert_eq!(config.line.width, 2.0);
//!
//! let config = DragConfig::default().with_threshold(8.0);
//! assert_eq!(config.threshold, 8.0);
//! ```

use core::fmt;

use grove_event_state::drag::DEFAULT_DRAG_THRESHOLD;
pub use grove_history::HistoryConfig;

use crate::error::{ConfigError, Result};

/// An sRGB color with alpha, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 255 is opaque.
    pub a: u8,
}

impl Color {
    /// `#ffd700`, the default drag line color.
    pub const GOLD: Self = Self::from_rgb8(0xff, 0xd7, 0x00);

    /// An opaque color.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// A color with explicit alpha.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Formats as `#rrggbb`, or `#rrggbbaa` when not opaque.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Style of the line connecting a dragged node to its drop candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragLineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in surface units.
    pub width: f64,
}

impl Default for DragLineStyle {
    fn default() -> Self {
        Self {
            color: Color::GOLD,
            width: 2.0,
        }
    }
}

/// Drag controller configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Distance the pointer must exceed before a press becomes a drag.
    pub threshold: f64,
    /// Drag line style handed to the visualization.
    pub line: DragLineStyle,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DRAG_THRESHOLD,
            line: DragLineStyle::default(),
        }
    }
}

impl DragConfig {
    /// Replace the threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the line style.
    pub fn with_line(mut self, line: DragLineStyle) -> Self {
        self.line = line;
        self
    }

    /// Check the values the controller relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        Ok(())
    }
}

/// Configuration for an [`Editor`](crate::Editor).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Drag behavior.
    pub drag: DragConfig,
    /// Undo history.
    pub history: HistoryConfig,
}

impl EditorConfig {
    /// Replace the drag configuration.
    pub fn with_drag(mut self, drag: DragConfig) -> Self {
        self.drag = drag;
        self
    }

    /// Replace the history configuration.
    pub fn with_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }
}
