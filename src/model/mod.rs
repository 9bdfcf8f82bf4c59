//! Point record and table types
//!
//! This module contains the value types threaded through the planning
//! pipeline: raw, resolved, and augmented records and their tables, plus
//! per-table axis schema detection.

pub mod record;
pub mod schema;
pub mod table;

// Re-export commonly used types
pub use record::{AugmentedRecord, RawRecord, ResolvedRecord, Tissue};
pub use schema::AxisSchema;
pub use table::{AugmentedTable, RawTable, ResolvedTable};
