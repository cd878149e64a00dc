//! Helpers over ordered coordinate sequences.

use crate::Coordinate;

/// Total length of a polyline in metres.  `0.0` for fewer than two points.
pub fn polyline_length(points: &[Coordinate]) -> f64 {
    points.windows(2).map(|w| w[0].distance_m(w[1])).sum()
}

/// Index of the vertex closest to `p`, with its distance in metres.
///
/// Ties resolve to the earliest vertex.  `None` for an empty polyline.
pub fn nearest_vertex(points: &[Coordinate], p: Coordinate) -> Option<(usize, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v.distance_m(p)))
        .fold(None, |best, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
}

/// How far `p` still has to go along a polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemainingDistance {
    /// Vertex `p` was snapped to.
    pub nearest_index: usize,
    /// Distance from `p` to that vertex plus the rest of the polyline.
    pub remaining_m: f64,
}

/// Remaining distance from `p` to the end of `points`, snapping `p` to its
/// nearest vertex.
pub fn remaining_distance(points: &[Coordinate], p: Coordinate) -> Option<RemainingDistance> {
    let (nearest_index, to_vertex) = nearest_vertex(points, p)?;
    let rest = polyline_length(&points[nearest_index..]);
    Some(RemainingDistance { nearest_index, remaining_m: to_vertex + rest })
}
