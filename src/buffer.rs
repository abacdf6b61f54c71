//! Control point buffer: the rolling window of waypoints awaiting
//! finalization.

use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

use crate::vector::Vec3;

/// One buffered waypoint plus the geometry derived for its corner.
#[derive(Debug, Clone)]
pub struct ControlPoint {
    /// Absolute target position.
    pub position: Vec3,
    /// Requested feed rate for the move ending here; 0 inherits the
    /// previous feed.
    pub feed_rate: f64,
    /// Maximum allowed deviation of the rounded arc from this vertex;
    /// `<= 0` means no rounding (flush point).
    pub max_deviation: f64,
    /// Distance to the previous point. Filled in by the corner solver.
    pub edge_len_in: f64,
    /// Undirected angle between the incoming-reversed and outgoing
    /// directions, in `[0, pi]`. 0 until solved.
    pub turn_angle: f64,
    /// Distance along each adjacent edge consumed by the fillet.
    pub blend_dist: f64,
    /// `tan(turn_angle / 2)`, converting blend distance to fillet radius.
    pub blend_to_radius_ratio: f64,
}

impl ControlPoint {
    pub fn new(position: Vec3, feed_rate: f64, max_deviation: f64) -> Self {
        Self {
            position,
            feed_rate,
            max_deviation,
            edge_len_in: 0.0,
            turn_angle: 0.0,
            blend_dist: 0.0,
            blend_to_radius_ratio: 0.0,
        }
    }

    /// Resolved fillet radius for this corner.
    pub fn radius(&self) -> f64 {
        self.blend_dist * self.blend_to_radius_ratio
    }
}

/// Ordered sequence of control points. Index 0 is the anchor: the last
/// position known to be physically reached, with deviation 0.
///
/// Backed by a `VecDeque` so retirement compacts in amortized O(1) per
/// point instead of reallocating the whole buffer.
#[derive(Debug, Default)]
pub struct PointBuffer {
    points: VecDeque<ControlPoint>,
}

impl PointBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: ControlPoint) {
        self.points.push_back(point);
    }

    pub fn first(&self) -> Option<&ControlPoint> {
        self.points.front()
    }

    pub fn last(&self) -> Option<&ControlPoint> {
        self.points.back()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Drop the first `count` points and re-seed the retained head to
    /// `continuation` (the last emitted vertex), so subsequent corner math
    /// stays continuous with what was actually executed.
    pub fn retire(&mut self, count: usize, continuation: Vec3) {
        for _ in 0..count {
            self.points.pop_front();
        }
        if let Some(head) = self.points.front_mut() {
            head.position = continuation;
        }
    }
}

impl Index<usize> for PointBuffer {
    type Output = ControlPoint;

    fn index(&self, index: usize) -> &ControlPoint {
        &self.points[index]
    }
}

impl IndexMut<usize> for PointBuffer {
    fn index_mut(&mut self, index: usize) -> &mut ControlPoint {
        &mut self.points[index]
    }
}
