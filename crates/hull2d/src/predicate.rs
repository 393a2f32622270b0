//! Orientation predicate shared by all hull builders.
//!
//! Convention (y axis pointing up):
//! - `LeftTurn`: p1 → p2 → p3 turns counter-clockwise.
//! - `RightTurn`: clockwise.
//! - `Collinear`: the determinant is exactly zero (includes coincident points).
//!
//! The test is exact on `f64` values; near-collinear triples may report noise.

use nalgebra::Point2;

/// Turn direction of three ordered points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    LeftTurn,
    Collinear,
    RightTurn,
}

/// Classify the turn p1 → p2 → p3.
///
/// Sign of `(p2.y - p1.y)(p3.x - p2.x) - (p2.x - p1.x)(p3.y - p2.y)`:
/// negative is a left (counter-clockwise) turn.
#[inline]
pub fn orientation(p1: Point2<f64>, p2: Point2<f64>, p3: Point2<f64>) -> Orientation {
    let v = (p2.y - p1.y) * (p3.x - p2.x) - (p2.x - p1.x) * (p3.y - p2.y);
    if v < 0.0 {
        Orientation::LeftTurn
    } else if v == 0.0 {
        Orientation::Collinear
    } else {
        Orientation::RightTurn
    }
}

/// Signed area of the parallelogram spanned by `a - o` and `b - o`.
/// Positive for a counter-clockwise turn o → a → b.
#[inline]
pub fn cross(o: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let oa = a - o;
    let ob = b - o;
    oa.x * ob.y - oa.y * ob.x
}
