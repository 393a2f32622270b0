use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hull2d::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod points;
mod provenance;

use provenance::{write_sidecar, Run};

#[derive(Parser)]
#[command(name = "hull2d")]
#[command(about = "Sample point sets, build convex hulls, find bridges")]
struct Cmd {
    /// Optional run tag; propagated to logs and provenance sidecars
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Draw a reproducible point set and write it as CSV/Parquet
    Gen {
        #[arg(long, value_enum, default_value_t = DistArg::Square)]
        dist: DistArg,
        #[arg(long, default_value_t = 400)]
        n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Square side (square) or x range (parabola)
        #[arg(long, default_value_t = 100)]
        extent: u32,
        /// Disk radius
        #[arg(long, default_value_t = 10.0)]
        radius: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build a hull and write it as JSON, with a provenance sidecar
    Hull {
        #[arg(long, value_enum, default_value_t = AlgoArg::Incremental)]
        algo: AlgoArg,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the bridge line y = a·x + b over the separator x = xm
    Bridge {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        xm: f64,
        /// Lower bridge (line below all points) instead of the upper one
        #[arg(long)]
        lower: bool,
    },
    /// Run every builder on one input and check that the hulls agree
    Compare {
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgoArg {
    Incremental,
    GiftWrap,
    Mbc,
}

impl From<AlgoArg> for Algorithm {
    fn from(a: AlgoArg) -> Self {
        match a {
            AlgoArg::Incremental => Algorithm::Incremental,
            AlgoArg::GiftWrap => Algorithm::GiftWrap,
            AlgoArg::Mbc => Algorithm::Mbc,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DistArg {
    Square,
    Disk,
    ParabolaUp,
    ParabolaDown,
}

impl DistArg {
    fn to_dist(self, extent: u32, radius: f64) -> PointDist {
        match self {
            DistArg::Square => PointDist::Square { side: extent },
            DistArg::Disk => PointDist::Disk { radius },
            DistArg::ParabolaUp => PointDist::Parabola {
                x_max: extent,
                opens_up: true,
            },
            DistArg::ParabolaDown => PointDist::Parabola {
                x_max: extent,
                opens_up: false,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct HullReport {
    algo: &'static str,
    n_points: usize,
    vertices: Vec<[f64; 2]>,
    area: f64,
    perimeter: f64,
}

impl HullReport {
    fn new(algo: Algorithm, n_points: usize, hull: &Hull) -> Self {
        Self {
            algo: algo.name(),
            n_points,
            vertices: hull.vertices().iter().map(|p| [p.x, p.y]).collect(),
            area: hull.area(),
            perimeter: hull.perimeter(),
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Gen {
            dist,
            n,
            seed,
            extent,
            radius,
            out,
        } => gen(dist.to_dist(extent, radius), n, seed, &out, cmd.tag),
        Action::Hull { algo, input, out } => {
            hull(algo.into(), &input, &out, cmd.tag).map(|_| ())
        }
        Action::Bridge { input, xm, lower } => {
            let line = bridge(&input, xm, lower)?;
            println!("{}", serde_json::to_string_pretty(&line)?);
            Ok(())
        }
        Action::Compare { input } => {
            let summary = compare(&input)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            if !summary.agree {
                bail!("hull builders disagree on {}", input.display());
            }
            Ok(())
        }
    }
}

fn gen(dist: PointDist, n: usize, seed: u64, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(?dist, n, seed, out = %out.display(), tag = ?tag, "gen");
    let pts = draw_points(dist, n, ReplayToken { seed, index: 0 });
    points::write_points(out, &pts)?;
    let run = Run {
        command: "gen",
        tag,
        params: json!({ "dist": format!("{dist:?}"), "n": n, "seed": seed }),
    };
    write_sidecar(out, &run)?;
    Ok(())
}

fn hull(algo: Algorithm, input: &Path, out: &Path, tag: Option<String>) -> Result<HullReport> {
    tracing::info!(algo = algo.name(), input = %input.display(), out = %out.display(), tag = ?tag, "hull");
    let pts = points::read_points(input)?;
    let hull = build_hull(&pts, algo)
        .with_context(|| format!("{} hull of {}", algo.name(), input.display()))?;
    let report = HullReport::new(algo, pts.len(), &hull);
    tracing::info!(h = report.vertices.len(), area = report.area, "hull_built");

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let run = Run {
        command: "hull",
        tag,
        params: json!({
            "algo": algo.name(),
            "input": input.to_string_lossy(),
            "n_points": pts.len(),
        }),
    };
    write_sidecar(out, &run)?;
    Ok(report)
}

fn bridge(input: &Path, xm: f64, lower: bool) -> Result<serde_json::Value> {
    tracing::info!(input = %input.display(), xm, lower, "bridge");
    let pts = points::read_points(input)?;
    let (a, b) = if lower {
        find_lower_bridge(&pts, xm)?
    } else {
        find_bridge(&pts, xm)?
    };
    Ok(json!({ "a": a, "b": b, "xm": xm, "lower": lower, "y_at_xm": a * xm + b }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum BuilderOutcome {
    Built { vertices: usize, area: f64 },
    Error(String),
}

#[derive(Debug, Serialize)]
struct CompareSummary {
    n_points: usize,
    agree: bool,
    builders: BTreeMap<&'static str, BuilderOutcome>,
}

fn compare(input: &Path) -> Result<CompareSummary> {
    let pts = points::read_points(input)?;
    let results: Vec<(Algorithm, Result<Hull, HullError>)> = Algorithm::ALL
        .iter()
        .map(|&algo| (algo, build_hull(&pts, algo)))
        .collect();
    let mut builders = BTreeMap::new();
    for (algo, res) in &results {
        let outcome = match res {
            Ok(h) => BuilderOutcome::Built {
                vertices: h.len(),
                area: h.area(),
            },
            Err(e) => BuilderOutcome::Error(e.to_string()),
        };
        tracing::info!(algo = algo.name(), ?outcome, "compare");
        builders.insert(algo.name(), outcome);
    }
    let agree = results.windows(2).all(|w| match (&w[0].1, &w[1].1) {
        (Ok(a), Ok(b)) => a.same_vertex_set(b),
        (Err(a), Err(b)) => a == b,
        _ => false,
    });
    Ok(CompareSummary {
        n_points: pts.len(),
        agree,
        builders,
    })
}
