//! MCP tool modules.
//!
//! Tools are grouped by query shape: account overview, per-kind listing,
//! per-resource lineage analysis, and contextual help.

pub mod analyze;
pub mod context;
pub mod listing;
pub mod overview;
