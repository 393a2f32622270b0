//! Bridge edges over a vertical separator (marriage before conquest).
//!
//! The upper bridge at `x = xm` is the line `y = a·x + b` that passes on or above
//! every point and is lowest at `xm`. As an LP over `z = (a, b)`:
//!
//! ```text
//! minimize   xm·a + b
//! subject to -x_i·a - b <= -y_i    for every point i
//! ```
//!
//! The LP is solved after moving `xm` to the origin and scaling the input to a
//! unit box, then mapped back. Translating or scaling the input leaves the local
//! problem unchanged, so tolerances stay relative to the input's extent.
//!
//! The lower bridge is the same problem after reflecting `y ↦ -y`.

use nalgebra::{Point2, Vector2};

use crate::error::HullError;
use crate::lp2::{solve_lp2, Hs2, LpCfg};

/// Upper bridge `(a, b)` over `x = xm`: every point satisfies `y <= a·x + b`
/// and `a·xm + b` is minimal.
///
/// Needs at least one point strictly left and one strictly right of `xm`.
pub fn find_bridge(points: &[Point2<f64>], xm: f64) -> Result<(f64, f64), HullError> {
    find_bridge_with(points, xm, LpCfg::default())
}

/// Lower bridge `(a, b)` over `x = xm`: every point satisfies `y >= a·x + b`
/// and `a·xm + b` is maximal.
pub fn find_lower_bridge(points: &[Point2<f64>], xm: f64) -> Result<(f64, f64), HullError> {
    find_lower_bridge_with(points, xm, LpCfg::default())
}

/// `find_bridge` with explicit solver settings.
pub fn find_bridge_with(
    points: &[Point2<f64>],
    xm: f64,
    cfg: LpCfg,
) -> Result<(f64, f64), HullError> {
    Ok(solve_bridge(points, xm, cfg)?.line())
}

/// Frame the bridge LP is solved in: `x' = (x - xm) / sx`, `y' = (y - y0) / sy`.
///
/// `sx` and `sy` are the input's extents around `xm` and `y0`, so every point lands
/// in the box `[-1, 1] × [-1, 0]` whatever the translation or scale of the input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Frame {
    xm: f64,
    y0: f64,
    sx: f64,
    sy: f64,
}

impl Frame {
    fn fit(points: &[Point2<f64>], xm: f64) -> Self {
        let (min_x, max_x, min_y, max_y) = points.iter().fold(
            (
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
            ),
            |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
        );
        let sx = (xm - min_x).max(max_x - xm);
        let sy = max_y - min_y;
        Self {
            xm,
            y0: max_y,
            sx,
            sy: if sy > 0.0 { sy } else { 1.0 },
        }
    }

    #[inline]
    fn local(&self, p: &Point2<f64>) -> Vector2<f64> {
        Vector2::new((p.x - self.xm) / self.sx, (p.y - self.y0) / self.sy)
    }
}

/// Bridge line `y' = a·x' + b` in the local frame of its input.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LocalBridge {
    pub frame: Frame,
    pub a: f64,
    pub b: f64,
}

impl LocalBridge {
    /// Height of the line above `p`, in units of the input's y extent.
    #[inline]
    pub fn residual(&self, p: &Point2<f64>) -> f64 {
        let q = self.frame.local(p);
        self.a * q.x + self.b - q.y
    }

    /// The line in input coordinates as `(a, b)` with `y = a·x + b`.
    pub fn line(&self) -> (f64, f64) {
        let Frame { xm, y0, sx, sy } = self.frame;
        let a = self.a * (sy / sx);
        let y_at_xm = y0 + sy * self.b;
        (a, y_at_xm - a * xm)
    }
}

/// Validate the input, move it to its local frame and solve the bridge LP there.
///
/// In the local frame `xm` is the origin, so the objective is `b'` alone and all
/// constraint normals `(-x', -1)` have entries of order one.
pub(crate) fn solve_bridge(
    points: &[Point2<f64>],
    xm: f64,
    cfg: LpCfg,
) -> Result<LocalBridge, HullError> {
    if points.len() < 2 {
        return Err(HullError::DegenerateInput {
            distinct: points.len(),
        });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(HullError::NonFinite { index });
    }
    if !xm.is_finite() {
        return Err(HullError::SeparatorOutside { xm });
    }
    let seeds = straddling_pair(points, xm).ok_or(HullError::SeparatorOutside { xm })?;
    let frame = Frame::fit(points, xm);
    if !(frame.sx.is_finite() && frame.sy.is_finite()) {
        // Extents beyond f64 range; the local coordinates would all collapse.
        return Err(HullError::Infeasible);
    }
    let constraints: Vec<Hs2> = points
        .iter()
        .map(|p| {
            let q = frame.local(p);
            Hs2::new(Vector2::new(-q.x, -1.0), -q.y)
        })
        .collect();
    let z = solve_lp2(Vector2::new(0.0, 1.0), &constraints, seeds, cfg)?;
    tracing::trace!(n = points.len(), xm, a = z.x, b = z.y, "bridge");
    Ok(LocalBridge {
        frame,
        a: z.x,
        b: z.y,
    })
}

/// `find_lower_bridge` with explicit solver settings.
pub fn find_lower_bridge_with(
    points: &[Point2<f64>],
    xm: f64,
    cfg: LpCfg,
) -> Result<(f64, f64), HullError> {
    let mirrored: Vec<Point2<f64>> = points.iter().map(|p| Point2::new(p.x, -p.y)).collect();
    let (a, b) = find_bridge_with(&mirrored, xm, cfg)?;
    Ok((-a, -b))
}

/// Leftmost and rightmost points, provided they lie strictly on opposite sides of `xm`.
///
/// Any such pair bounds the LP: the line through both is the optimum for the two
/// constraints alone.
fn straddling_pair(points: &[Point2<f64>], xm: f64) -> Option<(usize, usize)> {
    let mut left: Option<usize> = None;
    let mut right: Option<usize> = None;
    for (i, p) in points.iter().enumerate() {
        if left.is_none_or(|l| p.x < points[l].x) {
            left = Some(i);
        }
        if right.is_none_or(|r| p.x > points[r].x) {
            right = Some(i);
        }
    }
    let (l, r) = (left?, right?);
    if points[l].x < xm && xm < points[r].x {
        Some((l, r))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;
    use proptest::prelude::*;

    fn assert_above_all(points: &[Point2<f64>], (a, b): (f64, f64)) {
        for p in points {
            assert!(
                p.y <= a * p.x + b + 1e-9,
                "point {p:?} above line y = {a}x + {b}"
            );
        }
    }

    // P1 = {(0,0),(1,2)}, P2 = {(3,1),(4,3)}, xm = 2
    fn two_pairs() -> Vec<Point2<f64>> {
        vec![
            point![0.0, 0.0],
            point![1.0, 2.0],
            point![3.0, 1.0],
            point![4.0, 3.0],
        ]
    }

    #[test]
    fn bridge_over_two_pairs() {
        let pts = two_pairs();
        let (a, b) = find_bridge(&pts, 2.0).unwrap();
        assert_above_all(&pts, (a, b));
        // Bridge passes through (1,2) and (4,3): a = 1/3, b = 5/3.
        assert!((a - 1.0 / 3.0).abs() < 1e-9);
        assert!((b - 5.0 / 3.0).abs() < 1e-9);
        // No feasible line is lower at xm: check against every pair line.
        let best = a * 2.0 + b;
        for i in 0..pts.len() {
            for j in 0..pts.len() {
                if pts[i].x < 2.0 && pts[j].x > 2.0 {
                    let aa = (pts[j].y - pts[i].y) / (pts[j].x - pts[i].x);
                    let bb = pts[i].y - aa * pts[i].x;
                    if pts.iter().all(|p| p.y <= aa * p.x + bb + 1e-12) {
                        assert!(best <= aa * 2.0 + bb + 1e-9);
                    }
                }
            }
        }
    }

    #[test]
    fn lower_bridge_mirrors_upper() {
        let pts = vec![
            point![0.0, 0.0],
            point![1.0, 2.0],
            point![3.0, 1.0],
            point![4.0, 3.0],
        ];
        let (a, b) = find_lower_bridge(&pts, 2.0).unwrap();
        for p in &pts {
            assert!(p.y >= a * p.x + b - 1e-9);
        }
        // Through (0,0) and (3,1).
        assert!((a - 1.0 / 3.0).abs() < 1e-9);
        assert!(b.abs() < 1e-9);
    }

    #[test]
    fn separator_must_split_points() {
        let pts = vec![point![0.0, 0.0], point![1.0, 1.0], point![2.0, 0.0]];
        assert_eq!(
            find_bridge(&pts, 2.0),
            Err(HullError::SeparatorOutside { xm: 2.0 })
        );
        assert_eq!(
            find_bridge(&pts, -1.0),
            Err(HullError::SeparatorOutside { xm: -1.0 })
        );
        assert!(find_bridge(&pts, 0.5).is_ok());
    }

    #[test]
    fn point_on_separator_is_respected() {
        let pts = vec![point![0.0, 0.0], point![2.0, 5.0], point![4.0, 0.0]];
        let (a, b) = find_bridge(&pts, 2.0).unwrap();
        assert_above_all(&pts, (a, b));
        assert!((a * 2.0 + b - 5.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_tiny_and_non_finite_input() {
        assert_eq!(
            find_bridge(&[point![0.0, 0.0]], 0.0),
            Err(HullError::DegenerateInput { distinct: 1 })
        );
        let pts = vec![point![0.0, 0.0], point![f64::NAN, 1.0], point![2.0, 0.0]];
        assert_eq!(
            find_bridge(&pts, 1.0),
            Err(HullError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn bridge_survives_translation_and_scaling() {
        for (shift, scale) in [
            (1e6, 1.0),
            (1e7, 1.0),
            (-3e5, 1e4),
            (0.0, 1e-10),
            (1e-8, 1e-10),
            (0.0, 1e8),
        ] {
            let pts: Vec<_> = two_pairs()
                .iter()
                .map(|p| point![p.x * scale + shift, p.y * scale + shift])
                .collect();
            let xm = 2.0 * scale + shift;
            let (a, b) = find_bridge(&pts, xm)
                .unwrap_or_else(|e| panic!("shift {shift}, scale {scale}: {e}"));
            let tol = 1e-9 * scale + 1e-14 * shift.abs();
            assert!(
                (a - 1.0 / 3.0).abs() < 1e-9,
                "shift {shift}, scale {scale}: a = {a}"
            );
            let at_xm = a * xm + b;
            let expected = 7.0 / 3.0 * scale + shift;
            assert!(
                (at_xm - expected).abs() <= tol,
                "shift {shift}, scale {scale}: {at_xm} vs {expected}"
            );
            for p in &pts {
                assert!(p.y <= a * p.x + b + tol, "{p:?} above the bridge");
            }
        }
    }

    /// Lowest value at `xm` among lines through a point left and a point right of
    /// `xm` that pass on or above every point. Exact on integer coordinates.
    fn best_pair_line(pts: &[Point2<f64>], xm: f64) -> Option<f64> {
        let mut best: Option<f64> = None;
        for p in pts.iter().filter(|p| p.x < xm) {
            for q in pts.iter().filter(|q| q.x > xm) {
                let above_all = pts
                    .iter()
                    .all(|r| (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x) <= 0.0);
                if above_all {
                    let v = p.y + (q.y - p.y) * (xm - p.x) / (q.x - p.x);
                    best = Some(best.map_or(v, |b| b.min(v)));
                }
            }
        }
        best
    }

    fn grid_and_separator() -> impl Strategy<Value = (Vec<Point2<f64>>, f64)> {
        (
            prop::collection::vec((-20i32..20, -20i32..20), 2..30),
            -20i32..20,
        )
            .prop_map(|(v, k)| {
                let pts = v
                    .into_iter()
                    .map(|(x, y)| point![x as f64, y as f64])
                    .collect();
                (pts, k as f64 + 0.5)
            })
    }

    proptest! {
        #[test]
        fn bridge_is_the_best_line_over_the_separator(
            (pts, xm) in grid_and_separator(),
            e in -27i32..=27,
            kx in -(1i64 << 26)..(1i64 << 26),
            ky in -(1i64 << 26)..(1i64 << 26)
        ) {
            prop_assume!(pts.iter().any(|p| p.x < xm) && pts.iter().any(|p| p.x > xm));
            let best = best_pair_line(&pts, xm);
            prop_assert!(best.is_some());
            let best = best.unwrap_or_default();

            // Power-of-two scale and grid-aligned offsets keep every coordinate exact.
            let s = 2f64.powi(e);
            let (ox, oy) = (kx as f64 * s, ky as f64 * s);
            let moved: Vec<_> = pts
                .iter()
                .map(|p| point![p.x * s + ox, p.y * s + oy])
                .collect();
            let mxm = xm * s + ox;
            let (a, b) = find_bridge(&moved, mxm)
                .map_err(|err| TestCaseError::fail(err.to_string()))?;

            let tol = 1e-7 * 40.0 * s * (1.0 + a.abs());
            for p in &moved {
                prop_assert!(p.y <= a * p.x + b + tol, "{:?} above y = {}x + {}", p, a, b);
            }
            let at_xm = a * mxm + b;
            prop_assert!((at_xm - (best * s + oy)).abs() <= tol, "{} vs {}", at_xm, best * s + oy);
        }
    }
}
