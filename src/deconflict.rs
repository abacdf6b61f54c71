//! Blend-distance deconfliction.
//!
//! Two adjacent corners may both claim room on their shared edge. Before a
//! span of corners is retired, overlapping claims are shrunk so every edge
//! can hold both of its fillets.

use std::cmp::Ordering;

use crate::EPSILON;
use crate::buffer::PointBuffer;

/// Resolve overlapping blend distances over the edges `1..=span` of the
/// buffer (edge `i` runs from point `i - 1` to point `i`).
///
/// Edges are processed shortest first: the shortest edges are the most
/// constrained and must be settled before longer edges absorb whatever room
/// remains.
///
/// Postcondition: for every processed edge,
/// `blend_dist[i - 1] + blend_dist[i] <= edge_len_in[i]` (within epsilon).
pub fn resolve(buffer: &mut PointBuffer, span: usize) {
    let mut order: Vec<usize> = (1..=span).collect();
    order.sort_by(|&a, &b| {
        buffer[a]
            .edge_len_in
            .partial_cmp(&buffer[b].edge_len_in)
            .unwrap_or(Ordering::Equal)
    });

    for i in order {
        let (mut d0, t0) = (buffer[i - 1].blend_dist, buffer[i - 1].blend_to_radius_ratio);
        let (mut d1, t1) = (buffer[i].blend_dist, buffer[i].blend_to_radius_ratio);
        let edge_len = buffer[i].edge_len_in;

        let mut missing = d1 + d0 - edge_len;
        if missing <= 0.0 {
            continue;
        }

        // First shrink the corner with the larger implied radius, but never
        // below the other corner's radius.
        let mut r0 = d0 * t0;
        let mut r1 = d1 * t1;
        if r0 > r1 {
            let missing_r0 = missing * t0 + EPSILON;
            r0 = r1.max(r0 - missing_r0);
            d0 = r0 / t0;
        } else if r1 > r0 {
            let missing_r1 = missing * t1 + EPSILON;
            r1 = r0.max(r1 - missing_r1);
            d1 = r1 / t1;
        }

        missing = d1 + d0 - edge_len;
        if missing > 0.0 {
            if t0 <= 0.0 || t1 <= 0.0 {
                // Degenerate ratios: both corners lose their fillet on this
                // edge. Floating point being what it is, treat this as a
                // real branch rather than an unreachable one.
                d0 = 0.0;
                d1 = 0.0;
            } else {
                // Both radii are equal and the edge is still too short:
                // split the remaining deficit between the two corners in
                // inverse proportion to their ratios, flooring at zero.
                let shared_r = missing / (1.0 / t0 + 1.0 / t1);
                d0 = (d0 - shared_r / t0).max(0.0);
                d1 = (d1 - shared_r / t1).max(0.0);
            }
        }

        if d0 < buffer[i - 1].blend_dist || d1 < buffer[i].blend_dist {
            tracing::debug!(
                edge = i,
                edge_len,
                d0,
                d1,
                "shrunk overlapping fillets"
            );
        }
        buffer[i - 1].blend_dist = d0;
        buffer[i].blend_dist = d1;
    }
}
