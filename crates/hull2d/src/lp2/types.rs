//! Half-planes, solver tolerances and LP outcomes.
//!
//! - `LpCfg`: centralizes the feasibility slack and the insertion-order seed.
//! - `Hs2`: closed half-plane `n·z <= c` with helper predicates.
//! - `LpError`: infeasible, unbounded, or a seed pair that cannot start the solve.

use std::fmt;

use nalgebra::Vector2;

/// Solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct LpCfg {
    /// Relative slack allowed when testing `n·z <= c`.
    pub eps_feas: f64,
    /// Below this `|det|` two boundaries count as parallel.
    pub eps_det: f64,
    /// Seed for the random insertion order.
    pub seed: u64,
}

impl Default for LpCfg {
    fn default() -> Self {
        Self {
            eps_feas: 1e-9,
            eps_det: 1e-12,
            seed: 0x5eed_2d10,
        }
    }
}

/// Closed half-plane `n · z <= c` (no normalization required here).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Hs2 {
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// `n·z <= c` up to `eps` relative to the magnitude of the terms compared.
    ///
    /// The slack is `eps·(|n|·|z| + |c|)`, with no absolute floor: a constraint
    /// scaled by any factor accepts exactly the same points.
    #[inline]
    pub fn satisfies_eps(&self, z: Vector2<f64>, eps: f64) -> bool {
        let lhs = self.n.dot(&z);
        lhs <= self.c + eps * (self.n.norm() * z.norm() + self.c.abs())
    }

    /// A point on the boundary line `n·z = c`, or None for a zero normal.
    #[inline]
    pub(crate) fn anchor(&self) -> Option<Vector2<f64>> {
        let nn = self.n.norm_squared();
        if !(nn.is_finite()) || nn <= 0.0 {
            return None;
        }
        Some(self.n * (self.c / nn))
    }

    /// Boundary direction, rotated 90° CCW from the normal.
    #[inline]
    pub(crate) fn direction(&self) -> Vector2<f64> {
        Vector2::new(-self.n.y, self.n.x)
    }
}

/// Why the LP has no optimum to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LpError {
    /// The constraints admit no common point.
    Infeasible,
    /// The objective decreases without bound along a feasible ray.
    Unbounded,
    /// Seed indices are out of range, equal, or have parallel boundaries.
    BadSeed,
}

impl fmt::Display for LpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LpError::Infeasible => write!(f, "linear program is infeasible"),
            LpError::Unbounded => write!(f, "linear program is unbounded"),
            LpError::BadSeed => write!(f, "seed constraints do not meet in a single point"),
        }
    }
}

impl std::error::Error for LpError {}
