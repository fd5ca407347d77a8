//! Tools module
//!
//! Service-facing operations used by the MCP server and the binaries.

pub mod conversions;
pub mod import;
pub mod status;
