// Copyright 2025 the Grove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use thiserror::Error;

/// Result type alias using [`ConfigError`].
pub type Result<T> = core::result::Result<T, ConfigError>;

/// Errors raised when building a drag controller or an editor.
///
/// Construction is the only place the editor reports errors. Runtime
/// operations that cannot apply (invalid drops, undo at the floor) are
/// no-ops that return `false` or `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No drag visualization / rendering surface was supplied.
    #[error("invalid configuration: no view supplied")]
    MissingView,

    /// No host tree was supplied.
    #[error("invalid configuration: no tree supplied")]
    MissingTree,

    /// The drag threshold is negative or not finite.
    #[error("invalid configuration: drag threshold {threshold} must be finite and non-negative")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },
}
