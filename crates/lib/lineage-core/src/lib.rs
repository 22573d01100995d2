//! Core services for quicksight-lineage.
//!
//! This crate owns the metadata source seam and its QuickSight implementation,
//! the generic paginator, the lineage assembler, and the control plane that
//! composes them into overview, listing and detail operations.

pub mod assemble;
pub mod collect;
pub mod control;
pub mod services;
pub mod source;
