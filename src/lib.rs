// rounded-path: corner rounding for travel moves.
//
// Converts a stream of absolute point-to-point moves into a smoothed path:
// sharp corners are replaced by circular arcs bounded by a per-point maximum
// deviation distance. Supports arbitrary paths in XYZ. Since each corner
// depends on the next one, a chain must end with a D=0 command to flush
// pending moves.

pub mod arc;
pub mod buffer;
pub mod command;
pub mod config;
pub mod corner;
pub mod deconflict;
pub mod engine;
pub mod error;
pub mod vector;

pub use buffer::{ControlPoint, PointBuffer};
pub use command::MoveParams;
pub use config::{Config, ConfigError, RoundedPathConfig, load_config};
pub use engine::{MoveSink, PositionSource, RoundedPath};
pub use error::RoundedPathError;
pub use vector::Vec3;

/// Distance tolerance, in length units, for position-drift detection and
/// deconfliction margins.
pub const EPSILON: f64 = 0.001;

/// Angle tolerance, in radians, below which a corner is treated as a
/// straight pass-through.
pub const EPSILON_ANGLE: f64 = 0.001;
