//! Two-variable linear programming.
//!
//! Purpose
//! - Solve `minimize c·z  s.t.  n_i·z <= c_i` over `z ∈ R²`, the shape of the
//!   bridge problem in marriage-before-conquest hulls.
//!
//! Model
//! - Seidel-style randomized incremental insertion. The caller supplies a seed
//!   pair of constraints whose boundary intersection is the optimum of the LP
//!   restricted to that pair; every later violated constraint moves the optimum
//!   onto its own boundary, found by a 1D clip against earlier constraints.
//! - Insertion order comes from a seeded `StdRng`, so results are reproducible.
//!
//! Code cross-refs: `crate::bridge::find_bridge`

mod solvers;
mod types;

pub use solvers::solve_lp2;
pub use types::{Hs2, LpCfg, LpError};
