//! Conversion factor import
//!
//! Loads a three-column CSV export of the conversion spreadsheet
//! (`input unit, output unit, ratio`) into the `CONVERSION_FACTOR` table.

use std::fs::File;
use std::io::{BufRead, BufReader};

use serde::Serialize;

use crate::db::Database;
use crate::models::ConversionFactorRecord;

/// Response for a CSV import
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub file_path: String,
    pub total_rows: usize,
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
    pub imported_at: String,
}

/// Rows parsed from a CSV source
#[derive(Debug, Default)]
pub struct ParsedCsv {
    pub records: Vec<ConversionFactorRecord>,
    pub total_rows: usize,
    pub errors: Vec<String>,
}

fn clean_field(field: &str) -> &str {
    field.trim().trim_matches('"').trim()
}

/// Parse one data row
fn parse_row(line: &str) -> Result<ConversionFactorRecord, String> {
    let fields: Vec<&str> = line.split(',').map(clean_field).collect();
    if fields.len() < 3 {
        return Err("Not enough fields".to_string());
    }
    if fields.len() > 3 {
        return Err(format!("Too many fields (expected 3, found {})", fields.len()));
    }

    let input_unit = fields[0];
    let output_unit = fields[1];
    if input_unit.is_empty() || output_unit.is_empty() {
        return Err("Unit name cannot be empty".to_string());
    }

    let ratio: f64 = fields[2]
        .parse()
        .map_err(|_| format!("Invalid conversion ratio '{}'", fields[2]))?;
    if !ratio.is_finite() {
        return Err(format!("Invalid conversion ratio '{}'", fields[2]));
    }

    Ok(ConversionFactorRecord::new(
        input_unit.to_lowercase(),
        output_unit.to_lowercase(),
        ratio,
    ))
}

/// A header row has the three columns but a non-numeric ratio column
fn is_header(line: &str) -> bool {
    let fields: Vec<&str> = line.split(',').map(clean_field).collect();
    fields.len() >= 3 && fields[2].parse::<f64>().is_err()
}

/// Parse conversion rows from any line source
///
/// The first non-empty line is treated as a header when it has at least three
/// columns and its ratio column is not numeric; any other malformed row,
/// including the first, is reported and skipped. Blank lines are ignored.
pub fn parse_conversion_csv<R: BufRead>(reader: R) -> Result<ParsedCsv, String> {
    let mut parsed = ParsedCsv::default();
    let mut seen_first_row = false;

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| format!("Error reading line {}: {}", line_num + 1, e))?;
        let line = line.trim_start_matches('\u{feff}');

        if line.trim().is_empty() {
            continue;
        }

        if !seen_first_row {
            seen_first_row = true;
            if is_header(line) {
                tracing::debug!("Skipping header row: {}", line);
                continue;
            }
        }

        match parse_row(line) {
            Ok(record) => {
                parsed.total_rows += 1;
                parsed.records.push(record);
            }
            Err(e) => {
                parsed.total_rows += 1;
                tracing::warn!("Row {}: {}", line_num + 1, e);
                parsed.errors.push(format!("Row {}: {}", line_num + 1, e));
            }
        }
    }

    Ok(parsed)
}

/// Replace the stored conversion factors with the contents of a CSV file
pub fn import_conversion_csv(db: &Database, file_path: &str) -> Result<ImportResponse, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open file '{}': {}", file_path, e))?;
    let parsed = parse_conversion_csv(BufReader::new(file))?;

    if parsed.records.is_empty() {
        return Err(format!("No valid conversion rows found in '{}'", file_path));
    }

    let imported = db
        .with_conn_mut(|conn| ConversionFactorRecord::replace_all(conn, &parsed.records))
        .map_err(|e| format!("Failed to store conversion factors: {}", e))?;

    tracing::info!(
        imported,
        skipped = parsed.errors.len(),
        "Imported conversion factors from {}",
        file_path
    );

    Ok(ImportResponse {
        success: true,
        file_path: file_path.to_string(),
        total_rows: parsed.total_rows,
        imported,
        skipped: parsed.errors.len(),
        errors: parsed.errors,
        imported_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::UnitConverter;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_parse_with_header() {
        let csv = "Unit_input,Unit_output,Conversion_ratio\nML,L,0.001\n\nl,ml,1000\n";
        let parsed = parse_conversion_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed.total_rows, 2);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.records[0], ConversionFactorRecord::new("ml", "l", 0.001));
        assert_eq!(parsed.records[1], ConversionFactorRecord::new("l", "ml", 1000.0));
    }

    #[test]
    fn test_parse_without_header() {
        let csv = "g,kg,0.001\n\"lb\", \"oz\", 16\n";
        let parsed = parse_conversion_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1], ConversionFactorRecord::new("lb", "oz", 16.0));
    }

    #[test]
    fn test_parse_reports_bad_rows() {
        let csv = "g,kg,0.001\ng,mg\n,kg,2\ncup,ml,abc\ntbsp,ml,inf\n";
        let parsed = parse_conversion_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.total_rows, 5);
        assert_eq!(parsed.errors.len(), 4);
        assert_eq!(parsed.errors[0], "Row 2: Not enough fields");
        assert_eq!(parsed.errors[1], "Row 3: Unit name cannot be empty");
        assert_eq!(parsed.errors[2], "Row 4: Invalid conversion ratio 'abc'");
    }

    #[test]
    fn test_parse_reports_bad_first_row() {
        let parsed = parse_conversion_csv(",kg,2\nml,l,0.001\n".as_bytes()).unwrap();
        assert_eq!(parsed.total_rows, 2);
        assert_eq!(parsed.records, vec![ConversionFactorRecord::new("ml", "l", 0.001)]);
        assert_eq!(parsed.errors, vec!["Row 1: Unit name cannot be empty"]);

        let parsed = parse_conversion_csv("g,mg\nml,l,0.001\n".as_bytes()).unwrap();
        assert_eq!(parsed.errors, vec!["Row 1: Not enough fields"]);
        assert_eq!(parsed.records.len(), 1);

        let parsed = parse_conversion_csv("g,kg,0.001,x\nml,l,0.001\n".as_bytes()).unwrap();
        assert_eq!(parsed.errors, vec!["Row 1: Too many fields (expected 3, found 4)"]);

        let parsed = parse_conversion_csv("g,kg,1.5.0\nml,l,0.001\n".as_bytes()).unwrap();
        assert_eq!(parsed.errors, vec!["Row 1: Invalid conversion ratio '1.5.0'"]);
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        let parsed = parse_conversion_csv("g,kg,0.001\nml,l,0.001,extra\n".as_bytes()).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.errors, vec!["Row 2: Too many fields (expected 3, found 4)"]);
    }

    #[test]
    fn test_import_file_replaces_table() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("conversions.csv");
        std::fs::write(&csv_path, "input,output,ratio\nG,KG,0.001\ng,kg,0.0011\nkg,g,1000\n").unwrap();

        let db = Database::new(dir.path().join("units.db")).unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();

        let response = import_conversion_csv(&db, csv_path.to_str().unwrap()).unwrap();
        assert!(response.success);
        assert_eq!(response.imported, 3);
        assert_eq!(response.skipped, 0);

        let converter = db.with_conn(|conn| UnitConverter::load(conn)).unwrap();
        assert_eq!(converter.get_units(), vec!["g", "kg"]);
        assert!((converter.convert(1000.0, "g", "kg").unwrap() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("units.db")).unwrap();

        let err = import_conversion_csv(&db, "/nonexistent/conversions.csv").unwrap_err();
        assert!(err.starts_with("Failed to open file"));
    }
}
