//! Conversion factor model
//!
//! One row of the `CONVERSION_FACTOR` table: "1 input unit = ratio output units".

use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::conversion::canonicalize_unit;
use crate::db::DbResult;

/// A raw conversion fact as stored in the data source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionFactorRecord {
    pub input_unit: String,
    pub output_unit: String,
    pub ratio: f64,
}

impl ConversionFactorRecord {
    pub fn new(input_unit: impl Into<String>, output_unit: impl Into<String>, ratio: f64) -> Self {
        Self {
            input_unit: input_unit.into(),
            output_unit: output_unit.into(),
            ratio,
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            input_unit: row.get("Unit_input")?,
            output_unit: row.get("Unit_output")?,
            ratio: row.get("Conversion_ratio")?,
        })
    }

    /// Load every record in insertion order
    ///
    /// Row order matters: later duplicates of an (input, output) pair win when
    /// the conversion table is built.
    pub fn list_all(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT "Unit_input", "Unit_output", "Conversion_ratio"
            FROM CONVERSION_FACTOR
            ORDER BY rowid ASC
            "#,
        )?;

        let records = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Count stored records
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM CONVERSION_FACTOR", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Replace the whole table with `records` in a single transaction
    ///
    /// Unit names are stored lowercased. Returns the number of rows written.
    pub fn replace_all(conn: &mut Connection, records: &[Self]) -> DbResult<usize> {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM CONVERSION_FACTOR", [])?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO CONVERSION_FACTOR ("Unit_input", "Unit_output", "Conversion_ratio")
                VALUES (?1, ?2, ?3)
                "#,
            )?;
            for record in records {
                stmt.execute(params![
                    canonicalize_unit(&record.input_unit),
                    canonicalize_unit(&record.output_unit),
                    record.ratio,
                ])?;
            }
        }

        tx.commit()?;
        Ok(records.len())
    }
}
