//! Build the hull of one sampled point set with every strategy and print the result.
//!
//! Usage:
//!   cargo run -p hull2d --example compare_builders -- [square|disk|parabola] [n]

use hull2d::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let dist = match args.next().as_deref().unwrap_or("disk") {
        "square" => PointDist::Square { side: 100 },
        "parabola" => PointDist::Parabola {
            x_max: 100,
            opens_up: false,
        },
        _ => PointDist::Disk { radius: 10.0 },
    };
    let n: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(400);
    let pts = draw_points(dist, n, ReplayToken { seed: 2025, index: 0 });

    for algo in Algorithm::ALL {
        match build_hull(&pts, algo) {
            Ok(hull) => println!(
                "{:>12}: h={:<4} area={:.4} perimeter={:.4}",
                algo.name(),
                hull.len(),
                hull.area(),
                hull.perimeter()
            ),
            Err(e) => println!("{:>12}: {e}", algo.name()),
        }
    }
}
