//! The corner-rounding engine.
//!
//! Owns the control point buffer and drives the solve / deconflict /
//! tessellate / emit pipeline. Everything runs synchronously within the
//! caller's invocation; emitted moves are forwarded in strict call order.

use crate::buffer::{ControlPoint, PointBuffer};
use crate::command::MoveParams;
use crate::config::RoundedPathConfig;
use crate::error::RoundedPathError;
use crate::vector::{self, Vec3};
use crate::{EPSILON, arc, corner, deconflict};

/// Query interface for the embedding system's G-code state.
pub trait PositionSource {
    /// Current absolute logical position.
    fn gcode_position(&self) -> Vec3;
    /// Whether absolute coordinate mode is active.
    fn absolute_coordinates(&self) -> bool;
}

/// Execution interface for linear moves. Fire-and-forget; the implementation
/// must preserve submission order as move order.
pub trait MoveSink {
    fn linear_move(&mut self, target: Vec3, feed_rate: Option<f64>);
}

/// Streaming corner-rounding engine.
///
/// Buffers incoming moves, rounds each interior corner to a circular fillet
/// bounded by the point's maximum deviation, and emits the tessellated path
/// as linear moves. A chain must be terminated with a `D=0` point to flush
/// pending moves.
pub struct RoundedPath<P: PositionSource, M: MoveSink> {
    position: P,
    sink: M,
    /// Maximum chord length for arc tessellation.
    resolution: f64,
    buffer: PointBuffer,
    last_emitted: Vec3,
}

impl<P: PositionSource, M: MoveSink> RoundedPath<P, M> {
    pub fn new(config: &RoundedPathConfig, position: P, sink: M) -> Self {
        Self {
            position,
            sink,
            resolution: config.resolution,
            buffer: PointBuffer::new(),
            last_emitted: [0.0; 3],
        }
    }

    /// Number of points currently buffered (including the anchor).
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Handle one rounded-move command.
    ///
    /// Seeds the anchor from the reported current position on the first
    /// point of a chain; on later points, verifies that no out-of-band move
    /// has shifted the position away from the buffered anchor.
    pub fn rounded_move(&mut self, params: &MoveParams) -> Result<(), RoundedPathError> {
        let max_deviation = params.max_deviation.unwrap_or(0.0);
        if max_deviation <= 0.0 && self.buffer.len() < 2 {
            // Nothing buffered to round against: forward as a plain move,
            // honoring whatever coordinate mode is active.
            let current = self.position.gcode_position();
            let target = if self.position.absolute_coordinates() {
                params.resolve(current)
            } else {
                params.resolve_relative(current)
            };
            self.emit(target, params.feed_rate.filter(|&f| f > 0.0));
            return Ok(());
        }

        if !self.position.absolute_coordinates() {
            return Err(RoundedPathError::UnsupportedMode);
        }

        let current = self.position.gcode_position();
        let tail = if self.buffer.is_empty() {
            self.buffer.push(ControlPoint::new(current, 0.0, 0.0));
            current
        } else {
            let anchor = self.buffer[0].position;
            if vector::distance(current, anchor) > EPSILON {
                return Err(RoundedPathError::PositionDrift {
                    expected: anchor,
                    actual: current,
                });
            }
            self.buffer.last().map(|p| p.position).unwrap_or(current)
        };

        let target = params.resolve(tail);
        self.line_to(ControlPoint::new(
            target,
            params.feed_rate.unwrap_or(0.0),
            max_deviation,
        ));
        Ok(())
    }

    /// Append a point, solve the newly-interior corner, and run the
    /// retirement policy.
    fn line_to(&mut self, point: ControlPoint) {
        self.buffer.push(point);
        let n = self.buffer.len();
        if n >= 3 {
            let prev = self.buffer[n - 3].position;
            let next = self.buffer[n - 1].position;
            corner::solve(&mut self.buffer[n - 2], prev, next);
        }

        if n >= 2 && self.buffer[n - 1].max_deviation <= 0.0 {
            // Chain-terminating flush: retire everything, then emit the
            // flush point itself directly.
            let prev = self.buffer[n - 2].position;
            corner::solve_flush(&mut self.buffer[n - 1], prev);
            let tail = self.buffer[n - 1].clone();
            self.flush(n - 2);
            self.emit_point(&tail);
            self.buffer.clear();
            tracing::debug!("flushed chain, buffer cleared");
        } else if n >= 4
            && self.buffer[n - 3].blend_dist + self.buffer[n - 2].blend_dist
                <= self.buffer[n - 2].edge_len_in
        {
            // The two most recent corners no longer overlap their shared
            // edge, so nothing before them can change: stream out all but
            // the last two points.
            self.flush(n - 3);
        }
    }

    /// Deconflict, tessellate, and emit `count` corners, then compact the
    /// buffer, re-seeding the retained head to the last emitted vertex.
    fn flush(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        match self.buffer.len() {
            0 | 1 => {
                self.buffer.clear();
                return;
            }
            2 => {
                let tail = self.buffer[1].clone();
                self.emit_point(&tail);
                self.buffer.clear();
                return;
            }
            _ => {}
        }

        deconflict::resolve(&mut self.buffer, count + 1);
        tracing::debug!(corners = count, "retiring corners");
        for i in 1..=count {
            self.emit_corner(i);
        }
        self.buffer.retire(count, self.last_emitted);
    }

    /// Emit the fillet for the corner at buffer index `i`, or a single move
    /// to the vertex itself when the arc collapses.
    fn emit_corner(&mut self, i: usize) {
        let c = self.buffer[i].clone();
        let prev = self.buffer[i - 1].position;
        let next = self.buffer[i + 1].position;
        match arc::tessellate(&c, prev, next, self.resolution) {
            Some(vertices) => {
                let feed = (c.feed_rate > 0.0).then_some(c.feed_rate);
                for v in vertices {
                    self.emit(v, feed);
                }
            }
            None => self.emit_point(&c),
        }
    }

    fn emit_point(&mut self, point: &ControlPoint) {
        let feed = (point.feed_rate > 0.0).then_some(point.feed_rate);
        self.emit(point.position, feed);
    }

    fn emit(&mut self, target: Vec3, feed_rate: Option<f64>) {
        self.last_emitted = target;
        self.sink.linear_move(target, feed_rate);
    }
}
