//! Point-set files: columns `x`, `y` as CSV (default) or Parquet (`.parquet`).

use std::fs::{self, File};
use std::path::Path;

use anyhow::{bail, Context, Result};
use hull2d::Point2;
use polars::prelude::*;

fn is_parquet(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("parquet"))
}

/// Read `x`/`y` columns; integer columns are widened to f64.
pub fn read_points(path: &Path) -> Result<Vec<Point2<f64>>> {
    let lf = if is_parquet(path) {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?
    };
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y columns from {}", path.display()))?;
    tracing::info!(rows = df.height(), path = %path.display(), "points_read");

    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(Point2::new(x, y)),
            _ => bail!("row {row}: missing coordinate"),
        })
        .collect()
}

/// Write points as an `x`,`y` table, creating parent directories.
pub fn write_points(path: &Path, pts: &[Point2<f64>]) -> Result<()> {
    let xs: Vec<f64> = pts.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = pts.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if is_parquet(path) {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    } else {
        CsvWriter::new(&mut file).finish(&mut df)?;
    }
    tracing::info!(rows = pts.len(), path = %path.display(), "points_written");
    Ok(())
}
