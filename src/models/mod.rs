//! Data models
//!
//! Rust structs representing database entities.

mod conversion_factor;

pub use conversion_factor::ConversionFactorRecord;
