//! Mask contour plumbing: the external tracing primitive and polygon-to-path
//! conversion.
//!
//! Tracing itself is a collaborator concern; this crate only consumes an
//! ordered outline polygon derived from an alpha-occupancy predicate.

use crate::foundation::core::{BezPath, Point};

/// External contour-tracing primitive.
///
/// Given the mask image's pixel grid and an alpha-occupancy test, returns the
/// ordered outline polygon of the occupied region. An empty result means "no
/// mask" and leaves the previously rasterized outline in place.
pub trait ContourSource {
    /// Trace the outline of the region where `alpha_test` is true.
    fn trace(&self, width: u32, height: u32, alpha_test: &dyn Fn(u32, u32) -> bool) -> Vec<Point>;
}

/// Build the closed contour path from the traced polygon.
///
/// Returns an empty path for fewer than three points; a degenerate polygon
/// rasterizes to nothing rather than erroring.
pub fn contour_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 3 {
        return path;
    }

    path.move_to(points[0]);
    for &point in &points[1..] {
        path.line_to(point);
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/mask/contour.rs"]
mod tests;
