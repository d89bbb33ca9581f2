//! Tabular I/O for sweep inputs and results.
//!
//! Wall forces exported by the engine are read from CSV and the reduced
//! coefficients are written back as CSV, both through polars data frames.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::info;

use crate::error::{AeroError, Result};
use crate::sweep::{AoaResult, WallForceSample};

/// Column names of the results table, in order.
pub const RESULT_COLUMNS: [&str; 8] = ["AoA_deg", "Fx_N", "Fy_N", "Fz_N", "Lift_N", "Drag_N", "CL", "CD"];

/// Column names required in a wall-force table.
pub const FORCE_COLUMNS: [&str; 4] = ["AoA_deg", "Fx_N", "Fy_N", "Fz_N"];

/// Build the results data frame.
pub fn results_table(results: &[AoaResult]) -> Result<DataFrame> {
    let col = |f: fn(&AoaResult) -> f64| results.iter().map(f).collect::<Vec<f64>>();

    let df = DataFrame::new(vec![
        Series::new(RESULT_COLUMNS[0], col(|r| r.aoa_deg)),
        Series::new(RESULT_COLUMNS[1], col(|r| r.fx)),
        Series::new(RESULT_COLUMNS[2], col(|r| r.fy)),
        Series::new(RESULT_COLUMNS[3], col(|r| r.fz)),
        Series::new(RESULT_COLUMNS[4], col(|r| r.lift)),
        Series::new(RESULT_COLUMNS[5], col(|r| r.drag)),
        Series::new(RESULT_COLUMNS[6], col(|r| r.cl)),
        Series::new(RESULT_COLUMNS[7], col(|r| r.cd)),
    ])?;
    Ok(df)
}

/// Write the results table as CSV with a header row.
///
/// Returns the absolute path of the written file.
pub fn write_results_csv(path: impl AsRef<Path>, results: &[AoaResult]) -> Result<PathBuf> {
    let path = path.as_ref();
    let mut df = results_table(results)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).has_header(true).finish(&mut df)?;

    let out = path.canonicalize()?;
    info!("wrote {} rows to {}", df.height(), out.display());
    Ok(out)
}

/// Extract a column as `f64`, casting integer columns.
fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    if !df.get_column_names().contains(&name) {
        return Err(AeroError::MissingColumn(name.to_string()));
    }
    let series = df.column(name)?.cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| AeroError::invalid_value(name, "null", "column contains empty cells"))
}

/// Read wall forces recorded by the engine.
///
/// The CSV needs a header with `AoA_deg, Fx_N, Fy_N, Fz_N`; other columns
/// (for example a previous results table) are ignored.
pub fn read_wall_forces_csv(path: impl AsRef<Path>) -> Result<Vec<WallForceSample>> {
    let path = path.as_ref();
    let df = CsvReader::from_path(path)?.has_header(true).finish()?;

    let aoa = float_column(&df, FORCE_COLUMNS[0])?;
    let fx = float_column(&df, FORCE_COLUMNS[1])?;
    let fy = float_column(&df, FORCE_COLUMNS[2])?;
    let fz = float_column(&df, FORCE_COLUMNS[3])?;

    let samples: Vec<WallForceSample> = aoa
        .iter()
        .zip(fx.iter().zip(fy.iter().zip(fz.iter())))
        .map(|(&aoa_deg, (&x, (&y, &z)))| WallForceSample {
            aoa_deg,
            force: [x, y, z],
        })
        .collect();
    info!("read {} wall-force samples from {}", samples.len(), path.display());
    Ok(samples)
}
