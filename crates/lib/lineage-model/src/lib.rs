//! Lineage models and wire field names for quicksight-lineage.
//!
//! This crate defines the records returned to callers (summaries, per-kind
//! lineage records, failure records, overview counts) and the field names used
//! by the metadata API payloads they are projected from.

pub mod models;
pub mod schema;

pub use models::*;
