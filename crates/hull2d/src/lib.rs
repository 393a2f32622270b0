//! Planar convex hulls.
//!
//! Three interchangeable builders share one orientation predicate:
//! - `build_hull_incremental`: Andrew's monotone chain, O(n log n).
//! - `build_hull_gift_wrap`: Jarvis march, O(n·h).
//! - `build_hull_mbc`: marriage-before-conquest, bridges found by a 2D LP.
//!
//! Every builder returns a `Hull` in canonical form: counter-clockwise,
//! starting at the lexicographically smallest vertex.
//!
//! Collaborators (point samplers) live in `rand2`; plotting is out of scope.

pub mod bridge;
pub mod error;
pub mod hull;
pub mod lp2;
pub mod predicate;
pub mod rand2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use bridge::{find_bridge, find_lower_bridge};
pub use error::HullError;
pub use hull::{
    build_hull, build_hull_gift_wrap, build_hull_incremental, build_hull_mbc, Algorithm, Hull,
    MbcCfg,
};
pub use nalgebra::Point2;
pub use predicate::{cross, orientation, Orientation};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bridge::{find_bridge, find_lower_bridge};
    pub use crate::hull::{
        build_hull, build_hull_gift_wrap, build_hull_incremental, build_hull_mbc, Algorithm, Hull,
    };
    pub use crate::lp2::{solve_lp2, Hs2, LpCfg, LpError};
    pub use crate::predicate::{orientation, Orientation};
    pub use crate::rand2::{draw_points, PointDist, ReplayToken};
    pub use crate::HullError;
    pub use nalgebra::{Point2, Vector2 as Vec2};
}
