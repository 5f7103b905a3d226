//! JSON record grouping.
//!
//! Counts the records of a JSON file grouped by the value of one string
//! field. Accepts a top-level array of records, or an object whose first
//! array value holds the records. Records without the field (or with a
//! non-string value) are counted under `unknown`.

use crate::error::{DatarunError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Bucket name for records missing the grouping field.
pub const UNKNOWN_BUCKET: &str = "unknown";

fn json_error(path: &Path, err: impl std::fmt::Display) -> DatarunError {
    DatarunError::InvalidData {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Count records grouped by `field`.
pub fn count_by_field(input: &Path, field: &str) -> Result<BTreeMap<String, usize>> {
    let contents = fs::read_to_string(input)?;
    let data: Value = serde_json::from_str(&contents).map_err(|e| json_error(input, e))?;

    let records: Vec<Value> = match data {
        Value::Array(records) => records,
        Value::Object(map) => map
            .into_iter()
            .map(|(_, v)| v)
            .find_map(|v| match v {
                Value::Array(records) => Some(records),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let Value::Object(map) = record else { continue };
        let bucket = match map.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => UNKNOWN_BUCKET.to_string(),
        };
        *counts.entry(bucket).or_insert(0) += 1;
    }

    Ok(counts)
}

/// Write the grouped counts as a plain-text report.
pub fn write_report(
    input: &Path,
    field: &str,
    counts: &BTreeMap<String, usize>,
    output: &Path,
) -> Result<PathBuf> {
    let total: usize = counts.values().sum();

    let mut report = String::new();
    report.push_str(&format!("Records by {field}\n"));
    report.push_str(&format!("{}\n\n", "=".repeat(40)));
    report.push_str(&format!("Input file: {}\n", input.display()));
    report.push_str(&format!("Total records counted: {total}\n\n"));
    report.push_str("Counts:\n");
    for (bucket, count) in counts {
        report.push_str(&format!("  {bucket}: {count}\n"));
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, report)?;
    Ok(output.to_path_buf())
}

/// Read, group, and report in one pass.
pub fn run(input: &Path, field: &str, output: &Path) -> Result<()> {
    let counts = count_by_field(input, field)?;
    write_report(input, field, &counts, output)?;
    info!(
        "Processed JSON file: {}, results saved to: {}",
        input.display(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_json(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("input.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn counts_by_string_field() {
        let temp = TempDir::new().unwrap();
        let input = write_json(
            temp.path(),
            r#"[{"cls":"G"},{"cls":"K"},{"cls":"G"},{"cls":"M"}]"#,
        );

        let counts = count_by_field(&input, "cls").unwrap();

        assert_eq!(counts.get("G"), Some(&2));
        assert_eq!(counts.get("K"), Some(&1));
        assert_eq!(counts.get("M"), Some(&1));
    }

    #[test]
    fn missing_field_lands_in_unknown() {
        let temp = TempDir::new().unwrap();
        let input = write_json(temp.path(), r#"[{"cls":"G"},{"other":1},{"cls":""}]"#);

        let counts = count_by_field(&input, "cls").unwrap();

        assert_eq!(counts.get(UNKNOWN_BUCKET), Some(&2));
    }

    #[test]
    fn unwraps_first_array_value_of_object() {
        let temp = TempDir::new().unwrap();
        let input = write_json(
            temp.path(),
            r#"{"meta":"x","stars":[{"cls":"O"},{"cls":"O"}]}"#,
        );

        let counts = count_by_field(&input, "cls").unwrap();

        assert_eq!(counts.get("O"), Some(&2));
    }

    #[test]
    fn non_object_records_are_ignored() {
        let temp = TempDir::new().unwrap();
        let input = write_json(temp.path(), r#"[{"cls":"A"}, 42, "stray"]"#);

        let counts = count_by_field(&input, "cls").unwrap();

        assert_eq!(counts.values().sum::<usize>(), 1);
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        let temp = TempDir::new().unwrap();
        let input = write_json(temp.path(), "{not json");

        let err = count_by_field(&input, "cls").unwrap_err();

        assert!(matches!(err, DatarunError::InvalidData { .. }));
    }

    #[test]
    fn run_writes_ordered_report() {
        let temp = TempDir::new().unwrap();
        let input = write_json(temp.path(), r#"[{"cls":"B"},{"cls":"A"},{"cls":"B"}]"#);
        let output = temp.path().join("processed").join("groups.txt");

        run(&input, "cls", &output).unwrap();

        let report = fs::read_to_string(&output).unwrap();
        assert!(report.contains("Total records counted: 3"));
        let a_pos = report.find("  A: 1").unwrap();
        let b_pos = report.find("  B: 2").unwrap();
        assert!(a_pos < b_pos);
    }
}
