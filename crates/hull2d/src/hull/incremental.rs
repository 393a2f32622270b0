use nalgebra::Point2;

use super::{sorted_distinct, Hull};
use crate::error::HullError;
use crate::predicate::{orientation, Orientation};

/// Andrew's monotone chain.
///
/// Sort by (x, y), scan left→right for the upper chain and right→left for the lower
/// chain, keeping only strict clockwise turns, then splice. The raw boundary is
/// clockwise; `Hull::from_boundary` flips it to canonical CCW.
///
/// Fewer than 3 distinct points, or all points collinear, is `DegenerateInput`.
pub fn build_hull_incremental(points: &[Point2<f64>]) -> Result<Hull, HullError> {
    let pts = sorted_distinct(points)?;
    let upper = clockwise_chain(pts.iter().copied());
    let lower = clockwise_chain(pts.iter().rev().copied());

    // upper = [leftmost .. rightmost], lower = [rightmost .. leftmost]
    let mut boundary = upper;
    boundary.extend_from_slice(&lower[1..lower.len() - 1]);
    if boundary.len() < 3 {
        return Err(HullError::DegenerateInput {
            distinct: pts.len(),
        });
    }
    Ok(Hull::from_boundary(boundary))
}

/// Stack scan; invariant: every consecutive triple is a strict right turn.
fn clockwise_chain(points: impl Iterator<Item = Point2<f64>>) -> Vec<Point2<f64>> {
    let mut chain: Vec<Point2<f64>> = Vec::new();
    for p in points {
        chain.push(p);
        while chain.len() > 2 {
            let k = chain.len();
            if orientation(chain[k - 3], chain[k - 2], chain[k - 1]) == Orientation::RightTurn {
                break;
            }
            chain.remove(k - 2);
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;

    #[test]
    fn chain_pops_collinear_runs() {
        let pts = vec![
            point![0.0, 0.0],
            point![1.0, 1.0],
            point![2.0, 2.0],
            point![3.0, 3.0],
            point![4.0, 0.0],
        ];
        let chain = clockwise_chain(pts.into_iter());
        assert_eq!(chain, vec![point![0.0, 0.0], point![3.0, 3.0], point![4.0, 0.0]]);
    }

    #[test]
    fn chain_keeps_strict_right_turns() {
        let pts: Vec<_> = (0..8)
            .map(|i| {
                let x = i as f64;
                point![x, -(x - 3.5) * (x - 3.5)]
            })
            .collect();
        let chain = clockwise_chain(pts.clone().into_iter());
        assert_eq!(chain, pts);
    }

    #[test]
    fn vertical_extremes_keep_both_corners() {
        let pts = vec![
            point![0.0, 0.0],
            point![0.0, 2.0],
            point![1.0, 1.0],
            point![2.0, 0.0],
            point![2.0, 2.0],
        ];
        let hull = build_hull_incremental(&pts).unwrap();
        assert_eq!(
            hull.vertices(),
            &[
                point![0.0, 0.0],
                point![2.0, 0.0],
                point![2.0, 2.0],
                point![0.0, 2.0]
            ]
        );
    }
}
