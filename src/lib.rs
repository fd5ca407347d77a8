//! Unit Converter Library
//!
//! Table-driven conversion of scalar quantities between units of measure.

pub mod build_info;
pub mod conversion;
pub mod db;
pub mod mcp;
pub mod models;
pub mod tools;
