//! Converter Status Tool
//!
//! Provides runtime status information and usage instructions for the service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::conversion::UnitConverter;

/// Usage instructions for AI assistants
pub const CONVERSION_INSTRUCTIONS: &str = r#"
# Unit Conversion Instructions

This server converts quantities between units of measure using a fixed table of
conversion ratios.

## Workflow

1. Call `list_units` to see every unit that can be converted FROM.
2. Call `get_available_conversions` with a unit to see which units it converts TO.
3. Call `convert` with `value`, `input_unit` and `output_unit`.

## Rules

- Unit names are case-insensitive ("ML", "ml" and "Ml" are the same unit).
- Only direct conversions are supported. If `g -> kg` and `kg -> lb` exist but
  `g -> lb` does not, converting `g` to `lb` fails. Convert in two steps instead.
- Reverse conversions are separate entries: `g -> kg` does not imply `kg -> g`.
- Converting a unit to itself always returns the same value, even for units
  that are not in the table.

## Errors

| Message | Meaning |
|---------|---------|
| `Unit 'x' not available for conversion` | `x` is not a known input unit |
| `Unit 'y' not an available conversion for unit 'x'` | `x` is known but has no direct entry for `y` |
"#;

/// Runtime status of the conversion service
#[derive(Debug, Serialize)]
pub struct ConverterStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Conversion table
    pub unit_count: usize,
    pub conversion_count: usize,
    pub loaded_at: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    loaded_at: String,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            loaded_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, converter: &UnitConverter) -> ConverterStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ConverterStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            unit_count: converter.table().len(),
            conversion_count: converter.table().conversion_count(),
            loaded_at: self.loaded_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConversionFactorRecord;

    #[test]
    fn test_status_reports_table_counts() {
        let converter = UnitConverter::from_records(vec![
            ConversionFactorRecord::new("ml", "l", 0.001),
            ConversionFactorRecord::new("l", "ml", 1000.0),
            ConversionFactorRecord::new("l", "cup", 4.22675),
        ]);
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/units.db"));

        let status = tracker.get_status(&converter);
        assert_eq!(status.unit_count, 2);
        assert_eq!(status.conversion_count, 3);
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
    }
}
