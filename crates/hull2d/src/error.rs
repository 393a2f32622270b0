//! Error type shared by the hull builders and the bridge finder.

use std::fmt;

use crate::lp2::LpError;

/// Failure modes of hull construction and bridge finding.
///
/// Near-collinear sign noise is not an error: the predicate is exact on `f64`.
#[derive(Clone, Debug, PartialEq)]
pub enum HullError {
    /// Fewer than three distinct points, or all points collinear.
    DegenerateInput { distinct: usize },
    /// The bridge LP has no feasible line.
    Infeasible,
    /// No input point lies strictly on one side of the separator `x = xm`.
    SeparatorOutside { xm: f64 },
    /// A coordinate is NaN or infinite.
    NonFinite { index: usize },
    /// Gift wrapping did not return to its start vertex.
    WrapNotClosed { steps: usize },
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HullError::DegenerateInput { distinct } => write!(
                f,
                "degenerate input: {distinct} distinct point(s) do not span a 2D hull"
            ),
            HullError::Infeasible => write!(f, "bridge LP is infeasible"),
            HullError::SeparatorOutside { xm } => {
                write!(f, "separator x = {xm} does not split the point set")
            }
            HullError::NonFinite { index } => {
                write!(f, "point {index} has a non-finite coordinate")
            }
            HullError::WrapNotClosed { steps } => {
                write!(f, "gift wrap did not close after {steps} steps")
            }
        }
    }
}

impl std::error::Error for HullError {}

impl From<LpError> for HullError {
    fn from(e: LpError) -> Self {
        match e {
            // A bridge seed pair always bounds the objective, so an unbounded or
            // rejected seed can only come from numerically broken input.
            LpError::Infeasible | LpError::Unbounded | LpError::BadSeed => HullError::Infeasible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_payload() {
        let e = HullError::DegenerateInput { distinct: 2 };
        assert!(e.to_string().contains('2'));
        let e = HullError::SeparatorOutside { xm: 7.5 };
        assert!(e.to_string().contains("7.5"));
    }

    #[test]
    fn lp_errors_map_to_infeasible() {
        assert_eq!(HullError::from(LpError::Unbounded), HullError::Infeasible);
        assert_eq!(HullError::from(LpError::Infeasible), HullError::Infeasible);
    }
}
