//! Axis schema detection
//!
//! A working set either carries a raw axis everywhere it was measured or
//! not at all; probing which axes are present once per table replaces
//! per-point column fallbacks and makes the 2D-only case explicit.

use crate::model::record::RawRecord;

/// Which raw axis columns a table actually carries
///
/// Detected once per [`RawTable`](crate::model::RawTable); the resolver
/// consults it instead of re-probing every record. A table without
/// left-right data is a valid 2D sweep and resolves every `leftright`
/// coordinate to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSchema {
    /// Any record carries a raw superoinferior offset
    pub superoinferior: bool,
    /// Any record carries a raw posteroanterior offset
    pub posteroanterior: bool,
    /// Any record carries a raw leftright offset
    pub leftright: bool,
}

impl AxisSchema {
    /// Probe which axes are populated anywhere in the record set
    pub fn detect(records: &[RawRecord]) -> Self {
        AxisSchema {
            superoinferior: records.iter().any(|r| r.superoinferior.is_some()),
            posteroanterior: records.iter().any(|r| r.posteroanterior.is_some()),
            leftright: records.iter().any(|r| r.leftright.is_some()),
        }
    }

    /// True when no left-right data exists (2D-only sweep)
    pub fn is_planar(&self) -> bool {
        !self.leftright
    }
}
