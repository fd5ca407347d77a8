//! Unit conversion module
//!
//! Builds the conversion table from raw records and answers conversion queries.

pub mod converter;
pub mod table;
pub mod units;

pub use converter::{ConvertError, ConvertResult, UnitConverter};
pub use table::{ConversionTable, OutputRatios};
pub use units::{canonicalize_unit, parse_quantity};
