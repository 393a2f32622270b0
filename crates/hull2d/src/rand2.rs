//! Reproducible random point sets (square, disk, parabola).
//!
//! Purpose
//! - Feed the hull builders with inputs for tests, benchmarks and the CLI. These
//!   are collaborators, not part of hull construction.
//!
//! Model
//! - Square: integer coordinates in `[0, side]²` (duplicates and collinear runs
//!   are common, which exercises tie handling).
//! - Disk: `r = sqrt(U(0, radius²))`, `θ = U(0, 2π)`, uniform over the area.
//! - Parabola: integer `x ∈ [0, x_max]`, `y = x²` or `y = -x²`. Every distinct
//!   point is a hull vertex of one half.
//! - Determinism uses a replay token `(seed, index)` that keys a single RNG.

use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Where points are drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointDist {
    Square { side: u32 },
    Disk { radius: f64 },
    Parabola { x_max: u32, opens_up: bool },
}

impl Default for PointDist {
    fn default() -> Self {
        PointDist::Square { side: 100 }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    /// Stream for this token; `seed` and `index` fill the ChaCha key directly.
    fn rng(self) -> StdRng {
        let mut key = <StdRng as SeedableRng>::Seed::default();
        key[..8].copy_from_slice(&self.seed.to_le_bytes());
        key[8..16].copy_from_slice(&self.index.to_le_bytes());
        key[16..24].copy_from_slice(b"hull2dpt");
        StdRng::from_seed(key)
    }

    /// Token for the next draw in the same stream.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }
}

/// Draw `n` points from `dist`; the same token always yields the same points.
pub fn draw_points(dist: PointDist, n: usize, tok: ReplayToken) -> Vec<Point2<f64>> {
    let mut rng = tok.rng();
    (0..n).map(|_| draw_one(dist, &mut rng)).collect()
}

fn draw_one<R: Rng>(dist: PointDist, rng: &mut R) -> Point2<f64> {
    match dist {
        PointDist::Square { side } => Point2::new(
            rng.gen_range(0..=side) as f64,
            rng.gen_range(0..=side) as f64,
        ),
        PointDist::Disk { radius } => {
            let r2 = radius.abs() * radius.abs();
            let r = (rng.gen::<f64>() * r2).sqrt();
            let th = rng.gen::<f64>() * std::f64::consts::TAU;
            Point2::new(r * th.cos(), r * th.sin())
        }
        PointDist::Parabola { x_max, opens_up } => {
            let x = rng.gen_range(0..=x_max) as f64;
            let y = if opens_up { x * x } else { -x * x };
            Point2::new(x, y)
        }
    }
}
