//! Error types for the rounding engine and its command surface.

use thiserror::Error;

use crate::vector::Vec3;

#[derive(Debug, Error)]
pub enum RoundedPathError {
    /// Rounded moves require absolute coordinate mode.
    #[error("rounded moves are not supported in relative coordinate mode")]
    UnsupportedMode,

    /// The reported current position no longer matches the buffered anchor:
    /// an un-rounded move slipped in mid-chain. Surfaced rather than
    /// silently re-anchored; the caller must flush with D=0 before resuming.
    #[error(
        "current position {actual:?} does not match the buffered anchor \
         {expected:?}; the last rounded move before other moves needs D=0"
    )]
    PositionDrift { expected: Vec3, actual: Vec3 },

    /// A command word carried a value that does not parse as a number.
    #[error("invalid parameter '{word}': {reason}")]
    InvalidParameter { word: String, reason: String },
}
