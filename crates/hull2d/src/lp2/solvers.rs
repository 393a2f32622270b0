//! Seidel-style incremental solver for 2-variable LPs.
//!
//! - `solve_lp2`: minimize `objective·z` over the intersection of half-planes.
//! - `optimize_on_boundary`: the 1D sub-problem on a violated constraint's line.
use nalgebra::{Matrix2, Vector2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::types::{Hs2, LpCfg, LpError};

/// Minimize `objective · z` subject to `h.n · z <= h.c` for every `h` in `constraints`.
///
/// `seed_pair` names two constraints whose boundary lines meet in the optimum of the
/// LP restricted to those two. That point starts the incremental solve; the
/// remaining constraints are inserted in a seeded random order.
///
/// Errors
/// - `BadSeed`: indices out of range, equal, or parallel boundaries.
/// - `Unbounded`: the seed pair does not bound the objective (negative multipliers).
/// - `Infeasible`: some inserted constraint cannot be met together with earlier ones.
pub fn solve_lp2(
    objective: Vector2<f64>,
    constraints: &[Hs2],
    seed_pair: (usize, usize),
    cfg: LpCfg,
) -> Result<Vector2<f64>, LpError> {
    let (s0, s1) = seed_pair;
    if s0 >= constraints.len() || s1 >= constraints.len() || s0 == s1 {
        return Err(LpError::BadSeed);
    }
    let (h0, h1) = (constraints[s0], constraints[s1]);
    let mut z = boundary_intersection(h0, h1, cfg.eps_det).ok_or(LpError::BadSeed)?;
    if !seed_bounds_objective(objective, h0, h1, cfg) {
        return Err(LpError::Unbounded);
    }

    let mut order: Vec<usize> = (0..constraints.len())
        .filter(|&i| i != s0 && i != s1)
        .collect();
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    order.shuffle(&mut rng);

    let mut earlier: Vec<Hs2> = Vec::with_capacity(constraints.len());
    earlier.push(h0);
    earlier.push(h1);
    let mut moves = 0usize;
    for i in order {
        let h = constraints[i];
        if !h.satisfies_eps(z, cfg.eps_feas) {
            z = optimize_on_boundary(objective, h, &earlier, z, cfg)?;
            moves += 1;
        }
        earlier.push(h);
    }
    tracing::trace!(constraints = constraints.len(), moves, "lp2 solved");
    Ok(z)
}

/// KKT check at the seed vertex: `-objective = λ0 n0 + λ1 n1` with `λ >= 0`.
fn seed_bounds_objective(objective: Vector2<f64>, h0: Hs2, h1: Hs2, cfg: LpCfg) -> bool {
    let m = Matrix2::from_columns(&[h0.n, h1.n]);
    let Some(minv) = m.try_inverse() else {
        return false;
    };
    let lambda = minv * (-objective);
    let tol = cfg.eps_feas * lambda.amax();
    lambda.x >= -tol && lambda.y >= -tol
}

/// Optimum of the LP restricted to the boundary of `h`, clipped by `earlier`.
///
/// Parametrize the line as `z(t) = z0 + t·dir` and intersect the admissible
/// `t`-intervals of all earlier constraints.
fn optimize_on_boundary(
    objective: Vector2<f64>,
    h: Hs2,
    earlier: &[Hs2],
    current: Vector2<f64>,
    cfg: LpCfg,
) -> Result<Vector2<f64>, LpError> {
    // A zero normal with a violated `0 <= c` cannot be satisfied at all.
    let z0 = h.anchor().ok_or(LpError::Infeasible)?;
    let dir = h.direction();
    let dir_norm = dir.norm();

    // Each bound carries the rounding slack of the constraint that set it.
    let (mut t_lo, mut tol_lo) = (f64::NEG_INFINITY, 0.0);
    let (mut t_hi, mut tol_hi) = (f64::INFINITY, 0.0);
    for g in earlier {
        let nd = g.n.dot(&dir);
        if nd.abs() <= cfg.eps_det * g.n.norm() * dir_norm {
            if !g.satisfies_eps(z0, cfg.eps_feas) {
                return Err(LpError::Infeasible);
            }
            continue;
        }
        let t = (g.c - g.n.dot(&z0)) / nd;
        let tol = cfg.eps_feas * (g.c.abs() + g.n.norm() * z0.norm()) / nd.abs();
        if nd > 0.0 {
            if t < t_hi {
                (t_hi, tol_hi) = (t, tol);
            }
        } else if t > t_lo {
            (t_lo, tol_lo) = (t, tol);
        }
        if t_lo - t_hi > tol_lo + tol_hi {
            return Err(LpError::Infeasible);
        }
    }

    let slope = objective.dot(&dir);
    let flat = cfg.eps_det * objective.norm() * dir_norm;
    let t = if slope > flat {
        t_lo
    } else if slope < -flat {
        t_hi
    } else {
        // Objective is constant along the line: stay as close to `current` as allowed.
        let t_cur = (current - z0).dot(&dir) / (dir_norm * dir_norm);
        t_cur.max(t_lo).min(t_hi)
    };
    if !t.is_finite() {
        return Err(LpError::Unbounded);
    }
    Ok(z0 + dir * t)
}

/// Intersection of the boundary lines of two half-planes.
fn boundary_intersection(h1: Hs2, h2: Hs2, eps_det: f64) -> Option<Vector2<f64>> {
    let a = nalgebra::matrix![h1.n.x, h1.n.y; h2.n.x, h2.n.y];
    let det = a.determinant();
    if !det.is_finite() || det.abs() <= eps_det * h1.n.norm() * h2.n.norm() {
        return None;
    }
    let inv = a.try_inverse()?;
    Some(inv * Vector2::new(h1.c, h2.c))
}
