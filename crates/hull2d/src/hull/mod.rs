//! Convex hull builders and the canonical `Hull` value.
//!
//! Purpose
//! - Three alternative strategies (`incremental`, `gift_wrap`, `mbc`) that all
//!   return the same canonical boundary for the same input.
//!
//! Canonical form
//! - Counter-clockwise, starting at the lexicographically smallest vertex.
//! - No three consecutive vertices collinear; no repeated vertex.
//! - Builders may produce either orientation internally; `Hull::from_boundary`
//!   normalizes before anything leaves this module.
//!
//! Code cross-refs: `predicate::orientation`, `bridge::find_bridge`

mod gift_wrap;
mod incremental;
mod mbc;

use std::cmp::Ordering;

use nalgebra::Point2;

use crate::error::HullError;
use crate::predicate::{cross, orientation, Orientation};

pub use gift_wrap::build_hull_gift_wrap;
pub use incremental::build_hull_incremental;
pub use mbc::{build_hull_mbc, build_hull_mbc_with, MbcCfg};

/// Hull construction strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Andrew's monotone chain.
    Incremental,
    /// Jarvis march.
    GiftWrap,
    /// Marriage before conquest (LP bridges).
    Mbc,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Incremental, Algorithm::GiftWrap, Algorithm::Mbc];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Incremental => "incremental",
            Algorithm::GiftWrap => "gift-wrap",
            Algorithm::Mbc => "mbc",
        }
    }
}

/// Build the hull of `points` with the chosen strategy.
pub fn build_hull(points: &[Point2<f64>], algo: Algorithm) -> Result<Hull, HullError> {
    match algo {
        Algorithm::Incremental => build_hull_incremental(points),
        Algorithm::GiftWrap => build_hull_gift_wrap(points),
        Algorithm::Mbc => build_hull_mbc(points),
    }
}

/// Convex hull boundary in canonical form (see module docs).
#[derive(Clone, Debug, PartialEq)]
pub struct Hull {
    vertices: Vec<Point2<f64>>,
}

impl Hull {
    /// Normalize a closed boundary (either orientation, any start) to canonical form.
    pub(crate) fn from_boundary(mut vertices: Vec<Point2<f64>>) -> Self {
        if signed_area(&vertices) < 0.0 {
            vertices.reverse();
        }
        if let Some(start) = (0..vertices.len()).min_by(|&i, &j| lex_cmp(&vertices[i], &vertices[j]))
        {
            vertices.rotate_left(start);
        }
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn into_vertices(self) -> Vec<Point2<f64>> {
        self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shoelace area (positive for the canonical CCW order).
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    pub fn perimeter(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| (self.vertices[(i + 1) % n] - self.vertices[i]).norm())
            .sum()
    }

    /// Inside or on the boundary, by the exact orientation predicate.
    pub fn contains(&self, p: Point2<f64>) -> bool {
        let n = self.vertices.len();
        (0..n).all(|i| {
            orientation(self.vertices[i], self.vertices[(i + 1) % n], p) != Orientation::RightTurn
        })
    }

    /// Every cyclic triple is a strict left turn.
    pub fn is_strictly_convex(&self) -> bool {
        let n = self.vertices.len();
        n >= 3
            && (0..n).all(|i| {
                orientation(
                    self.vertices[i],
                    self.vertices[(i + 1) % n],
                    self.vertices[(i + 2) % n],
                ) == Orientation::LeftTurn
            })
    }

    /// Same vertices regardless of start or orientation.
    pub fn same_vertex_set(&self, other: &Hull) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut a = self.vertices.clone();
        let mut b = other.vertices.clone();
        a.sort_by(lex_cmp);
        b.sort_by(lex_cmp);
        a == b
    }
}

/// Order by x, then y. NaN compares equal (inputs are checked to be finite first).
pub(crate) fn lex_cmp(a: &Point2<f64>, b: &Point2<f64>) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

/// Finite check, lexicographic sort, exact dedup; fewer than 3 survivors is degenerate.
pub(crate) fn sorted_distinct(points: &[Point2<f64>]) -> Result<Vec<Point2<f64>>, HullError> {
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(HullError::NonFinite { index });
    }
    let mut pts = points.to_vec();
    pts.sort_by(lex_cmp);
    pts.dedup();
    if pts.len() < 3 {
        return Err(HullError::DegenerateInput {
            distinct: pts.len(),
        });
    }
    Ok(pts)
}

fn signed_area(vertices: &[Point2<f64>]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let o = vertices[0];
    let twice: f64 = (1..n - 1)
        .map(|i| cross(o, vertices[i], vertices[i + 1]))
        .sum();
    0.5 * twice
}
