//! CSV column summarization.
//!
//! Reads a CSV file with a header row and produces a numeric summary
//! (count, min, max, mean, median) of one named column. Cells that do not
//! parse as numbers are skipped and counted rather than failing the run.

use crate::error::{DatarunError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Numeric summary of one CSV column.
#[derive(Debug, PartialEq)]
pub struct ColumnSummary {
    /// Numeric values seen.
    pub count: usize,

    /// Cells present but not parseable as numbers.
    pub skipped: usize,

    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

fn csv_error(path: &Path, err: impl std::fmt::Display) -> DatarunError {
    DatarunError::InvalidData {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Summarize the named column of a CSV file.
pub fn summarize_column(input: &Path, column: &str) -> Result<ColumnSummary> {
    let mut reader = csv::Reader::from_path(input).map_err(|e| csv_error(input, e))?;

    let headers = reader.headers().map_err(|e| csv_error(input, e))?.clone();
    let index = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| csv_error(input, format!("column '{column}' not found")))?;

    let mut values: Vec<f64> = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| csv_error(input, e))?;
        match record.get(index).map(str::trim) {
            Some(cell) if !cell.is_empty() => match cell.parse::<f64>() {
                // NaN and infinities would poison min/max/median; treat them
                // like any other unusable cell.
                Ok(value) if value.is_finite() => values.push(value),
                _ => skipped += 1,
            },
            _ => skipped += 1,
        }
    }

    if values.is_empty() {
        return Err(csv_error(
            input,
            format!("column '{column}' holds no numeric values"),
        ));
    }

    values.sort_by(|a, b| a.partial_cmp(b).expect("non-finite values filtered above"));
    let count = values.len();
    let min = values[0];
    let max = values[count - 1];
    let mean = values.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        values[count / 2]
    } else {
        (values[count / 2 - 1] + values[count / 2]) / 2.0
    };

    Ok(ColumnSummary {
        count,
        skipped,
        min,
        max,
        mean,
        median,
    })
}

/// Write the summary as a plain-text report.
pub fn write_report(
    input: &Path,
    column: &str,
    summary: &ColumnSummary,
    output: &Path,
) -> Result<PathBuf> {
    let mut report = String::new();
    report.push_str(&format!("Column Summary: {column}\n"));
    report.push_str(&format!("{}\n", "-".repeat(40)));
    report.push_str(&format!("Input file: {}\n", input.display()));
    report.push_str(&format!(
        "Values: {} ({} non-numeric skipped)\n",
        summary.count, summary.skipped
    ));
    report.push_str(&format!("Min: {:.2}\n", summary.min));
    report.push_str(&format!("Max: {:.2}\n", summary.max));
    report.push_str(&format!("Mean: {:.2}\n", summary.mean));
    report.push_str(&format!("Median: {:.2}\n", summary.median));

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, report)?;
    Ok(output.to_path_buf())
}

/// Read, summarize, and report in one pass.
pub fn run(input: &Path, column: &str, output: &Path) -> Result<()> {
    let summary = summarize_column(input, column)?;
    write_report(input, column, &summary, output)?;
    info!(
        "Processed CSV file: {}, results saved to: {}",
        input.display(),
        output.display()
    );
    Ok(())
}
