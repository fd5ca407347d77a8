//! Unit converter
//!
//! Query surface over a [`ConversionTable`]: unit listings, validation and
//! scalar conversion.

use rusqlite::Connection;
use thiserror::Error;

use super::table::ConversionTable;
use super::units::canonicalize_unit;
use crate::db::DbResult;
use crate::models::ConversionFactorRecord;

/// Conversion query errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// The input unit is not present in the table at all
    #[error("Unit '{unit}' not available for conversion")]
    UnitNotFound { unit: String },

    /// The input unit is known but has no direct entry for the output unit
    #[error("Unit '{output_unit}' not an available conversion for unit '{input_unit}'")]
    Conversion {
        input_unit: String,
        output_unit: String,
    },
}

/// Result type for conversion queries
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Converts scalars between units using directly-known ratios
///
/// The table is fixed at construction; the converter can be shared across
/// threads for read-only queries.
#[derive(Debug, Clone, Default)]
pub struct UnitConverter {
    table: ConversionTable,
}

impl UnitConverter {
    pub fn new(table: ConversionTable) -> Self {
        Self { table }
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ConversionFactorRecord>,
    {
        Self::new(ConversionTable::build(records))
    }

    /// Load every conversion factor from the database and build the converter
    pub fn load(conn: &Connection) -> DbResult<Self> {
        let records = ConversionFactorRecord::list_all(conn)?;
        let converter = Self::from_records(records);

        if converter.table.is_empty() {
            tracing::warn!("No conversion factors found in the database");
        } else {
            tracing::info!(
                units = converter.table.len(),
                conversions = converter.table.conversion_count(),
                "Loaded conversion table"
            );
        }

        Ok(converter)
    }

    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    /// All supported input units, sorted ascending
    pub fn get_units(&self) -> Vec<String> {
        self.table.units().map(str::to_string).collect()
    }

    /// Units that `unit` converts to directly, sorted ascending
    pub fn get_available_conversions(&self, unit: &str) -> ConvertResult<Vec<String>> {
        let unit = canonicalize_unit(unit);
        match self.table.outputs(&unit) {
            Some(outputs) => Ok(outputs.keys().cloned().collect()),
            None => Err(ConvertError::UnitNotFound { unit }),
        }
    }

    /// Check that a direct conversion exists between two canonical unit names
    ///
    /// Identity is not special-cased here: `can_convert("ml", "ml")` fails
    /// unless the table holds an explicit `ml -> ml` entry. [`Self::convert`]
    /// handles identity before reaching this check.
    pub fn can_convert(&self, input_unit: &str, output_unit: &str) -> ConvertResult<bool> {
        self.direct_ratio(input_unit, output_unit).map(|_| true)
    }

    /// Validated lookup of a direct ratio between canonical unit names
    fn direct_ratio(&self, input_unit: &str, output_unit: &str) -> ConvertResult<f64> {
        let outputs = self
            .table
            .outputs(input_unit)
            .ok_or_else(|| ConvertError::UnitNotFound {
                unit: input_unit.to_string(),
            })?;

        outputs
            .get(output_unit)
            .copied()
            .ok_or_else(|| ConvertError::Conversion {
                input_unit: input_unit.to_string(),
                output_unit: output_unit.to_string(),
            })
    }

    /// Factor that turns one `input_unit` into `output_unit`
    ///
    /// Identical units (after canonicalization) always yield 1, even for units
    /// missing from the table.
    pub fn conversion_factor(&self, input_unit: &str, output_unit: &str) -> ConvertResult<f64> {
        let input_unit = canonicalize_unit(input_unit);
        let output_unit = canonicalize_unit(output_unit);

        if input_unit == output_unit {
            return Ok(1.0);
        }

        self.direct_ratio(&input_unit, &output_unit)
    }

    /// Convert `scalar` from `input_unit` to `output_unit`
    pub fn convert(&self, scalar: f64, input_unit: &str, output_unit: &str) -> ConvertResult<f64> {
        let factor = self.conversion_factor(input_unit, output_unit)?;
        Ok(factor * scalar)
    }
}
