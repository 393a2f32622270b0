//! Marriage-before-conquest hull (Kirkpatrick–Seidel).
//!
//! Model
//! - Upper hull: split at the median x, find the bridge over the gap with the LP,
//!   discard everything strictly under the bridge, recurse on the two outer parts.
//! - Lower hull: the upper hull of the y-mirrored set, mirrored back.
//! - No input point lies on the separator: it is placed halfway between the
//!   largest x on the left and the smallest x on the right.
//!
//! Bridge endpoints are read off the LP solution by residual, measured in the
//! bridge's local frame: the leftmost tight point on the left, the rightmost tight
//! point on the right, which drops points in the interior of the bridge edge.

use std::cmp::Ordering;

use nalgebra::Point2;

use super::{lex_cmp, sorted_distinct, Hull};
use crate::bridge::solve_bridge;
use crate::error::HullError;
use crate::lp2::LpCfg;

/// Marriage-before-conquest configuration.
#[derive(Clone, Copy, Debug)]
pub struct MbcCfg {
    pub lp: LpCfg,
    /// Slack, relative to the input's extent, when deciding which points touch a bridge.
    pub eps_tight: f64,
}

impl Default for MbcCfg {
    fn default() -> Self {
        Self {
            lp: LpCfg::default(),
            eps_tight: 1e-9,
        }
    }
}

/// `build_hull_mbc_with` under `MbcCfg::default()`.
pub fn build_hull_mbc(points: &[Point2<f64>]) -> Result<Hull, HullError> {
    build_hull_mbc_with(points, MbcCfg::default())
}

/// Marriage-before-conquest hull: recursive bridges for the upper and lower halves.
pub fn build_hull_mbc_with(points: &[Point2<f64>], cfg: MbcCfg) -> Result<Hull, HullError> {
    let pts = sorted_distinct(points)?;
    let upper = upper_hull(pts.clone(), &cfg, 0)?;
    let mirrored: Vec<Point2<f64>> = pts.iter().map(|p| mirror(*p)).collect();
    let lower: Vec<Point2<f64>> = upper_hull(mirrored, &cfg, 0)?
        .into_iter()
        .map(mirror)
        .collect();
    tracing::debug!(
        n = pts.len(),
        upper = upper.len(),
        lower = lower.len(),
        "mbc halves"
    );

    // lower runs left→right along the bottom; close the loop right→left along the top.
    let mut boundary = lower;
    let mut top: Vec<Point2<f64>> = upper.into_iter().rev().collect();
    if top.first() == boundary.last() {
        top.remove(0);
    }
    if top.last() == boundary.first() {
        top.pop();
    }
    boundary.extend(top);
    if boundary.len() < 3 {
        return Err(HullError::DegenerateInput {
            distinct: pts.len(),
        });
    }
    Ok(Hull::from_boundary(boundary))
}

#[inline]
fn mirror(p: Point2<f64>) -> Point2<f64> {
    Point2::new(p.x, -p.y)
}

/// Upper hull of distinct points, left to right.
fn upper_hull(
    mut pts: Vec<Point2<f64>>,
    cfg: &MbcCfg,
    depth: usize,
) -> Result<Vec<Point2<f64>>, HullError> {
    let (min_x, max_x) = pts
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.x), hi.max(p.x))
        });
    if pts.len() <= 1 {
        return Ok(pts);
    }
    if min_x == max_x {
        // One column: only its top point is on the upper hull.
        let top = pts
            .iter()
            .copied()
            .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal));
        return Ok(top.into_iter().collect());
    }
    if pts.len() == 2 {
        if pts[0].x > pts[1].x {
            pts.swap(0, 1);
        }
        return Ok(pts);
    }

    let (left_max, right_min, on_left) = split_at_median(&pts);
    let xm = left_max + (right_min - left_max) / 2.0;
    let bridge = solve_bridge(&pts, xm, cfg.lp)?;
    tracing::trace!(depth, n = pts.len(), xm, a = bridge.a, b = bridge.b, "mbc bridge");

    // Residuals are in local units (the input spans a unit box there), so the
    // slack is relative to the extent of `pts`.
    let residual = |p: &Point2<f64>| bridge.residual(p);
    let slack = cfg.eps_tight * (1.0 + bridge.a.abs());
    let min_left = pts
        .iter()
        .filter(|p| on_left(*p))
        .map(residual)
        .fold(f64::INFINITY, f64::min);
    let min_right = pts
        .iter()
        .filter(|p| !on_left(*p))
        .map(residual)
        .fold(f64::INFINITY, f64::min);

    // Leftmost tight point on the left, rightmost tight point on the right.
    let pl = pts
        .iter()
        .copied()
        .filter(|p| on_left(p) && residual(p) <= min_left + slack)
        .min_by(lex_cmp_top_first);
    let pr = pts
        .iter()
        .copied()
        .filter(|p| !on_left(p) && residual(p) <= min_right + slack)
        .max_by(lex_cmp);
    let (Some(pl), Some(pr)) = (pl, pr) else {
        return Err(HullError::Infeasible);
    };

    let outer_left: Vec<Point2<f64>> = pts
        .iter()
        .copied()
        .filter(|p| p.x < pl.x || *p == pl)
        .collect();
    let outer_right: Vec<Point2<f64>> = pts
        .iter()
        .copied()
        .filter(|p| p.x > pr.x || *p == pr)
        .collect();
    drop(pts);

    let mut hull = upper_hull(outer_left, cfg, depth + 1)?;
    hull.extend(upper_hull(outer_right, cfg, depth + 1)?);
    Ok(hull)
}

/// x ascending, then y descending: among equal x the top point sorts first.
fn lex_cmp_top_first(p: &Point2<f64>, q: &Point2<f64>) -> Ordering {
    p.x.partial_cmp(&q.x)
        .unwrap_or(Ordering::Equal)
        .then_with(|| q.y.partial_cmp(&p.y).unwrap_or(Ordering::Equal))
}

/// Median-x split into two non-empty sides.
///
/// Returns the largest x on the left, the smallest x on the right, and a side test.
/// Requires at least two distinct x values.
fn split_at_median(pts: &[Point2<f64>]) -> (f64, f64, impl Fn(&Point2<f64>) -> bool) {
    let mut xs: Vec<f64> = pts.iter().map(|p| p.x).collect();
    let mid = xs.len() / 2;
    let (_, &mut m, _) =
        xs.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // `x <= m` unless that leaves the right side empty; then `x < m`.
    let inclusive = m < max_x;
    let on_left = move |p: &Point2<f64>| if inclusive { p.x <= m } else { p.x < m };
    let left_max = pts
        .iter()
        .filter(|p| on_left(*p))
        .map(|p| p.x)
        .fold(f64::NEG_INFINITY, f64::max);
    let right_min = pts
        .iter()
        .filter(|p| !on_left(*p))
        .map(|p| p.x)
        .fold(f64::INFINITY, f64::min);
    (left_max, right_min, on_left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;

    #[test]
    fn split_keeps_both_sides_non_empty() {
        let pts = vec![
            point![0.0, 0.0],
            point![5.0, 1.0],
            point![5.0, 2.0],
            point![5.0, 3.0],
        ];
        let (l, r, on_left) = split_at_median(&pts);
        assert_eq!((l, r), (0.0, 5.0));
        assert!(on_left(&pts[0]));
        assert!(!on_left(&pts[3]));

        let pts = vec![
            point![0.0, 0.0],
            point![1.0, 0.0],
            point![2.0, 0.0],
            point![3.0, 0.0],
        ];
        let (l, r, _) = split_at_median(&pts);
        assert_eq!((l, r), (2.0, 3.0));
    }

    #[test]
    fn upper_hull_of_a_cap_keeps_every_point() {
        let pts: Vec<_> = (0..9)
            .map(|i| {
                let x = i as f64 - 4.0;
                point![x, 20.0 - x * x]
            })
            .collect();
        let hull = upper_hull(pts.clone(), &MbcCfg::default(), 0).unwrap();
        assert_eq!(hull, pts);
    }

    #[test]
    fn upper_hull_drops_bridge_interior_points() {
        let pts = vec![
            point![0.0, 0.0],
            point![1.0, 1.0],
            point![2.0, 1.0],
            point![3.0, 1.0],
            point![4.0, 0.0],
            point![2.0, -5.0],
        ];
        let hull = upper_hull(pts, &MbcCfg::default(), 0).unwrap();
        assert_eq!(
            hull,
            vec![
                point![0.0, 0.0],
                point![1.0, 1.0],
                point![3.0, 1.0],
                point![4.0, 0.0]
            ]
        );
    }

    #[test]
    fn single_column_returns_top() {
        let pts = vec![point![1.0, 0.0], point![1.0, 4.0], point![1.0, 2.0]];
        let hull = upper_hull(pts, &MbcCfg::default(), 0).unwrap();
        assert_eq!(hull, vec![point![1.0, 4.0]]);
    }
}
