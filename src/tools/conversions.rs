//! Conversion query tools
//!
//! Serializable wrappers around [`UnitConverter`] queries.

use serde::Serialize;

use crate::conversion::{canonicalize_unit, UnitConverter};

/// Response for list_units
#[derive(Debug, Serialize)]
pub struct ListUnitsResponse {
    pub units: Vec<String>,
    pub total: usize,
}

/// Response for get_available_conversions
#[derive(Debug, Serialize)]
pub struct AvailableConversionsResponse {
    pub unit: String,
    pub conversions: Vec<String>,
    pub total: usize,
}

/// Response for convert
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub input_value: f64,
    pub input_unit: String,
    pub output_value: f64,
    pub output_unit: String,
    pub conversion_factor: f64,
}

/// Response for get_conversion_factor
#[derive(Debug, Serialize)]
pub struct ConversionFactorResponse {
    pub input_unit: String,
    pub output_unit: String,
    pub conversion_factor: f64,
}

/// List every supported input unit
pub fn list_units(converter: &UnitConverter) -> ListUnitsResponse {
    let units = converter.get_units();
    ListUnitsResponse {
        total: units.len(),
        units,
    }
}

/// List the direct conversions available for a unit
pub fn get_available_conversions(
    converter: &UnitConverter,
    unit: &str,
) -> Result<AvailableConversionsResponse, String> {
    let conversions = converter
        .get_available_conversions(unit)
        .map_err(|e| e.to_string())?;

    Ok(AvailableConversionsResponse {
        unit: canonicalize_unit(unit),
        total: conversions.len(),
        conversions,
    })
}

/// Convert a value between two units
pub fn convert(
    converter: &UnitConverter,
    value: f64,
    input_unit: &str,
    output_unit: &str,
) -> Result<ConvertResponse, String> {
    if !value.is_finite() {
        return Err("value must be a finite number".to_string());
    }

    let conversion_factor = converter
        .conversion_factor(input_unit, output_unit)
        .map_err(|e| e.to_string())?;

    Ok(ConvertResponse {
        input_value: value,
        input_unit: canonicalize_unit(input_unit),
        output_value: conversion_factor * value,
        output_unit: canonicalize_unit(output_unit),
        conversion_factor,
    })
}

/// Look up the factor for one unit pair
pub fn get_conversion_factor(
    converter: &UnitConverter,
    input_unit: &str,
    output_unit: &str,
) -> Result<ConversionFactorResponse, String> {
    let conversion_factor = converter
        .conversion_factor(input_unit, output_unit)
        .map_err(|e| e.to_string())?;

    Ok(ConversionFactorResponse {
        input_unit: canonicalize_unit(input_unit),
        output_unit: canonicalize_unit(output_unit),
        conversion_factor,
    })
}
