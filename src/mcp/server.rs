//! Unit Converter MCP Server Implementation
//!
//! Exposes the conversion queries as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::conversion::UnitConverter;
use crate::tools::conversions;
use crate::tools::status::StatusTracker;

/// Unit converter MCP service
///
/// The converter is loaded once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct ConverterService {
    converter: Arc<UnitConverter>,
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<ConverterService>,
}

impl ConverterService {
    pub fn new(database_path: PathBuf, converter: UnitConverter) -> Self {
        Self {
            converter: Arc::new(converter),
            status_tracker: Arc::new(StatusTracker::new(database_path)),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetAvailableConversionsParams {
    /// Unit to convert from (case-insensitive)
    pub unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertParams {
    /// Value to convert
    pub value: f64,
    /// Unit of the value (case-insensitive)
    pub input_unit: String,
    /// Desired unit (case-insensitive)
    pub output_unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetConversionFactorParams {
    /// Unit to convert from (case-insensitive)
    pub input_unit: String,
    /// Unit to convert to (case-insensitive)
    pub output_unit: String,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl ConverterService {
    #[tool(description = "Get the current status of the unit converter including build info, database status, conversion table size, and process information")]
    fn converter_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.status_tracker.get_status(&self.converter);
        to_json(&status)
    }

    #[tool(description = "Get instructions for using the unit conversion tools. Call this when unsure how conversions are resolved.")]
    fn conversion_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CONVERSION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CONVERSION_INSTRUCTIONS)]))
    }

    #[tool(description = "List every unit that can be converted from, sorted alphabetically")]
    fn list_units(&self) -> Result<CallToolResult, McpError> {
        let result = conversions::list_units(&self.converter);
        to_json(&result)
    }

    #[tool(description = "List the units a given unit can be converted to directly")]
    fn get_available_conversions(&self, Parameters(p): Parameters<GetAvailableConversionsParams>) -> Result<CallToolResult, McpError> {
        let result = conversions::get_available_conversions(&self.converter, &p.unit)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert a value from one unit to another using a direct conversion ratio. Converting a unit to itself always returns the input value.")]
    fn convert(&self, Parameters(p): Parameters<ConvertParams>) -> Result<CallToolResult, McpError> {
        tracing::debug!("convert {} {} -> {}", p.value, p.input_unit, p.output_unit);
        let result = conversions::convert(&self.converter, p.value, &p.input_unit, &p.output_unit)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the ratio that converts one input unit into the output unit")]
    fn get_conversion_factor(&self, Parameters(p): Parameters<GetConversionFactorParams>) -> Result<CallToolResult, McpError> {
        let result = conversions::get_conversion_factor(&self.converter, &p.input_unit, &p.output_unit)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for ConverterService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: crate::build_info::NAME.into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Unit Converter".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Unit Converter - converts values between units of measure using direct conversion ratios. \
                 Call conversion_instructions for details. \
                 Discovery: list_units, get_available_conversions. \
                 Conversion: convert, get_conversion_factor. \
                 Diagnostics: converter_status."
                    .into(),
            ),
        }
    }
}
