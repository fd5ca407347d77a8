//! Conversion table
//!
//! Nested lookup of directly-known conversion ratios, keyed by canonical unit
//! names: input unit -> (output unit -> ratio).

use std::collections::BTreeMap;

use super::units::canonicalize_unit;
use crate::models::ConversionFactorRecord;

/// Ratios from one input unit to each of its direct output units
pub type OutputRatios = BTreeMap<String, f64>;

/// Immutable table of direct conversions
///
/// Every input unit present has at least one output entry. No transitive
/// conversions are derived: `a -> b` and `b -> c` do not imply `a -> c`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionTable {
    entries: BTreeMap<String, OutputRatios>,
}

impl ConversionTable {
    /// Build the table in a single pass over `records`
    ///
    /// Unit names are canonicalized. Records for the same input unit accumulate;
    /// a repeated (input, output) pair keeps the ratio of the last record.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ConversionFactorRecord>,
    {
        let mut entries: BTreeMap<String, OutputRatios> = BTreeMap::new();
        let mut record_count = 0usize;

        for record in records {
            record_count += 1;
            let input = canonicalize_unit(&record.input_unit);
            let output = canonicalize_unit(&record.output_unit);

            let outputs = entries.entry(input).or_default();
            if let Some(previous) = outputs.insert(output, record.ratio) {
                tracing::debug!(
                    "Duplicate conversion {} -> {}: ratio {} replaced by {}",
                    record.input_unit,
                    record.output_unit,
                    previous,
                    record.ratio
                );
            }
        }

        tracing::debug!(
            records = record_count,
            units = entries.len(),
            "Built conversion table"
        );

        Self { entries }
    }

    /// Input units in ascending order
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Direct outputs of a canonical input unit
    pub fn outputs(&self, unit: &str) -> Option<&OutputRatios> {
        self.entries.get(unit)
    }

    /// Ratio for a canonical (input, output) pair, if directly known
    pub fn ratio(&self, input_unit: &str, output_unit: &str) -> Option<f64> {
        self.entries.get(input_unit)?.get(output_unit).copied()
    }

    pub fn contains_unit(&self, unit: &str) -> bool {
        self.entries.contains_key(unit)
    }

    /// Number of input units
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stored (input, output) pairs
    pub fn conversion_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }
}

impl FromIterator<ConversionFactorRecord> for ConversionTable {
    fn from_iter<T: IntoIterator<Item = ConversionFactorRecord>>(iter: T) -> Self {
        Self::build(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(input: &str, output: &str, ratio: f64) -> ConversionFactorRecord {
        ConversionFactorRecord::new(input, output, ratio)
    }

    #[test]
    fn test_build_canonicalizes_unit_names() {
        let table = ConversionTable::build(vec![record("ML", "L", 0.001)]);

        assert!(table.contains_unit("ml"));
        assert!(!table.contains_unit("ML"));
        assert_eq!(table.ratio("ml", "l"), Some(0.001));
    }

    #[test]
    fn test_build_accumulates_outputs_per_input() {
        let table = ConversionTable::build(vec![
            record("g", "kg", 0.001),
            record("ml", "l", 0.001),
            record("g", "mg", 1000.0),
        ]);

        let outputs = table.outputs("g").unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs.get("kg"), Some(&0.001));
        assert_eq!(outputs.get("mg"), Some(&1000.0));
        assert_eq!(table.len(), 2);
        assert_eq!(table.conversion_count(), 3);
    }

    #[test]
    fn test_duplicate_pair_last_write_wins() {
        let table = ConversionTable::build(vec![
            record("g", "kg", 0.001),
            record("g", "lb", 0.0022),
            record("G", "KG", 0.0011),
        ]);

        assert_eq!(table.ratio("g", "kg"), Some(0.0011));
        assert_eq!(table.ratio("g", "lb"), Some(0.0022));
        assert_eq!(table.conversion_count(), 2);
    }

    #[test]
    fn test_no_transitive_entries() {
        let table = ConversionTable::build(vec![record("a", "b", 2.0), record("b", "c", 3.0)]);

        assert_eq!(table.ratio("a", "c"), None);
        assert_eq!(table.ratio("b", "a"), None);
    }

    #[test]
    fn test_units_sorted() {
        let table: ConversionTable = vec![
            record("oz", "g", 28.3495),
            record("cup", "ml", 236.588),
            record("g", "oz", 0.035274),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.units().collect::<Vec<_>>(), vec!["cup", "g", "oz"]);
    }

    #[test]
    fn test_empty_table() {
        let table = ConversionTable::build(Vec::new());

        assert!(table.is_empty());
        assert_eq!(table.units().count(), 0);
        assert_eq!(table.outputs("ml"), None);
    }
}
