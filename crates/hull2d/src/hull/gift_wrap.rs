use nalgebra::Point2;

use super::{sorted_distinct, Hull};
use crate::error::HullError;
use crate::predicate::{orientation, Orientation};

/// Jarvis march from the leftmost (then lowest) point.
///
/// From each hull vertex pick the endpoint with no point strictly clockwise of
/// `current → endpoint`. Among collinear candidates the farthest wins, so points in
/// the interior of a hull edge are left out. Walks counter-clockwise; O(n·h).
///
/// Duplicates are dropped first, so a set of copies of one location is
/// `DegenerateInput` rather than a wrap that never closes.
pub fn build_hull_gift_wrap(points: &[Point2<f64>]) -> Result<Hull, HullError> {
    let pts = sorted_distinct(points)?;
    let start = pts[0];
    let mut hull: Vec<Point2<f64>> = Vec::new();
    let mut current = start;
    loop {
        hull.push(current);
        if hull.len() > pts.len() {
            return Err(HullError::WrapNotClosed { steps: hull.len() });
        }
        current = next_vertex(&pts, current);
        if current == start {
            break;
        }
    }
    if hull.len() < 3 {
        return Err(HullError::DegenerateInput {
            distinct: pts.len(),
        });
    }
    Ok(Hull::from_boundary(hull))
}

/// Most clockwise point as seen from `current` (farthest on ties).
fn next_vertex(pts: &[Point2<f64>], current: Point2<f64>) -> Point2<f64> {
    let mut endpoint = if pts[0] == current { pts[1] } else { pts[0] };
    for &q in pts {
        if q == current || q == endpoint {
            continue;
        }
        match orientation(current, endpoint, q) {
            Orientation::RightTurn => endpoint = q,
            Orientation::Collinear
                if (q - current).norm_squared() > (endpoint - current).norm_squared() =>
            {
                endpoint = q
            }
            _ => {}
        }
    }
    endpoint
}
