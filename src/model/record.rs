//! Point record types
//!
//! A skullsweep working set is a table of named anatomical samples: cranial
//! landmarks (bregma, lambda), implant targets, and probed skull-surface
//! contacts. Records exist in three shapes matching the planning pipeline:
//!
//! - [`RawRecord`] - as measured, offsets relative to another record
//! - [`ResolvedRecord`] - offsets re-expressed against one ultimate reference
//! - [`AugmentedRecord`] - resolved plus derived trajectory-projection columns
//!
//! All coordinates are in millimeters.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tissue category of a probed point
///
/// Landmark and target rows carry no tissue tag; only physical probe
/// contacts are categorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tissue {
    /// Skull-surface contact, candidate for the incision point
    Skull,
    /// Brain structure probed below the surface
    Brain,
}

impl Tissue {
    /// Parse a table cell into a tissue tag; empty cells mean untagged
    pub fn parse(cell: &str) -> Option<Tissue> {
        match cell.trim().to_ascii_lowercase().as_str() {
            "skull" => Some(Tissue::Skull),
            "brain" => Some(Tissue::Brain),
            _ => None,
        }
    }

    /// Table-cell rendering of this tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Tissue::Skull => "skull",
            Tissue::Brain => "brain",
        }
    }
}

impl fmt::Display for Tissue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named sample as recorded, with raw offsets measured relative to the
/// record named in `reference`
///
/// Raw axis offsets are optional: 2D-only sweeps omit `leftright`, and a
/// landmark row measured at its own reference may omit everything. Missing
/// offsets count as zero during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Identifier, e.g. "bregma", "lambda", "VTA"
    pub id: String,
    /// Tissue tag; `None` for landmark/target rows
    pub tissue: Option<Tissue>,
    /// Id of the record these offsets are measured against; the ultimate
    /// reference's own row references itself
    pub reference: String,
    /// Raw superior-inferior offset in mm (superior-to-inferior positive)
    pub superoinferior: Option<f64>,
    /// Raw posterior-anterior offset in mm (anterior positive)
    pub posteroanterior: Option<f64>,
    /// Raw left-right offset in mm (right positive)
    pub leftright: Option<f64>,
}

impl RawRecord {
    /// Create a record with no raw offsets
    pub fn new(id: impl Into<String>, reference: impl Into<String>) -> Self {
        RawRecord {
            id: id.into(),
            tissue: None,
            reference: reference.into(),
            superoinferior: None,
            posteroanterior: None,
            leftright: None,
        }
    }

    /// Create a record with 2D raw offsets
    pub fn with_offsets(
        id: impl Into<String>,
        reference: impl Into<String>,
        superoinferior: f64,
        posteroanterior: f64,
    ) -> Self {
        RawRecord {
            id: id.into(),
            tissue: None,
            reference: reference.into(),
            superoinferior: Some(superoinferior),
            posteroanterior: Some(posteroanterior),
            leftright: None,
        }
    }

    /// Set the tissue tag
    pub fn with_tissue(mut self, tissue: Tissue) -> Self {
        self.tissue = Some(tissue);
        self
    }

    /// Set the raw left-right offset
    pub fn with_leftright(mut self, leftright: f64) -> Self {
        self.leftright = Some(leftright);
        self
    }
}

/// One named sample with coordinates resolved against the ultimate reference
///
/// `inferosuperior` is the negation of the summed raw superoinferior offsets,
/// so superior is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    /// Identifier, unchanged from the raw record
    pub id: String,
    /// Tissue tag, unchanged from the raw record
    pub tissue: Option<Tissue>,
    /// The raw record's immediate reference, kept for provenance
    pub reference: String,
    /// Resolved left-right coordinate in mm
    pub leftright: f64,
    /// Resolved posterior-anterior coordinate in mm
    pub posteroanterior: f64,
    /// Resolved inferior-superior coordinate in mm (superior positive)
    pub inferosuperior: f64,
}

impl ResolvedRecord {
    /// Resolved coordinates as an (x, y, z) = (leftright, posteroanterior,
    /// inferosuperior) vector
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.leftright, self.posteroanterior, self.inferosuperior)
    }

    /// True for skull-surface contacts (the projectable set)
    pub fn is_skull(&self) -> bool {
        self.tissue == Some(Tissue::Skull)
    }
}

/// A resolved record plus derived trajectory-projection columns
///
/// The derived columns are populated for skull rows only; landmark, target,
/// and brain rows keep them `None`. The synthesized `incision` row carries
/// the selected projected coordinates and its scalar offset in
/// `projection_t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedRecord {
    /// Identifier ("incision" for the synthesized entry-point row)
    pub id: String,
    /// Tissue tag
    pub tissue: Option<Tissue>,
    /// Immediate reference (mode of the table's references for the
    /// synthesized incision row)
    pub reference: String,
    /// Resolved left-right coordinate in mm
    pub leftright: f64,
    /// Resolved posterior-anterior coordinate in mm
    pub posteroanterior: f64,
    /// Resolved inferior-superior coordinate in mm
    pub inferosuperior: f64,
    /// Scalar projection offset along the trajectory direction
    pub projection_t: Option<f64>,
    /// Coordinates of this point projected onto the trajectory line
    pub projection: Option<[f64; 3]>,
    /// Perpendicular distance from this point to the trajectory line
    pub projection_distance: Option<f64>,
}

impl AugmentedRecord {
    /// Lift a resolved record into the augmented shape with empty derived
    /// columns
    pub fn from_resolved(record: &ResolvedRecord) -> Self {
        AugmentedRecord {
            id: record.id.clone(),
            tissue: record.tissue,
            reference: record.reference.clone(),
            leftright: record.leftright,
            posteroanterior: record.posteroanterior,
            inferosuperior: record.inferosuperior,
            projection_t: None,
            projection: None,
            projection_distance: None,
        }
    }

    /// Resolved coordinates as an (x, y, z) vector
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.leftright, self.posteroanterior, self.inferosuperior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tissue_parse() {
        assert_eq!(Tissue::parse("skull"), Some(Tissue::Skull));
        assert_eq!(Tissue::parse(" Brain "), Some(Tissue::Brain));
        assert_eq!(Tissue::parse(""), None);
        assert_eq!(Tissue::parse("bone"), None);
    }

    #[test]
    fn test_raw_record_builders() {
        let rec = RawRecord::with_offsets("s1", "bregma", 1.5, -2.0)
            .with_tissue(Tissue::Skull)
            .with_leftright(0.5);
        assert_eq!(rec.id, "s1");
        assert_eq!(rec.reference, "bregma");
        assert_eq!(rec.superoinferior, Some(1.5));
        assert_eq!(rec.posteroanterior, Some(-2.0));
        assert_eq!(rec.leftright, Some(0.5));
        assert_eq!(rec.tissue, Some(Tissue::Skull));
    }

    #[test]
    fn test_resolved_position_axis_order() {
        let rec = ResolvedRecord {
            id: "VTA".to_string(),
            tissue: Some(Tissue::Brain),
            reference: "bregma".to_string(),
            leftright: 1.0,
            posteroanterior: 2.0,
            inferosuperior: 3.0,
        };
        assert_eq!(rec.position(), Vector3::new(1.0, 2.0, 3.0));
        assert!(!rec.is_skull());
    }

    #[test]
    fn test_from_resolved_keeps_coordinates() {
        let rec = ResolvedRecord {
            id: "s1".to_string(),
            tissue: Some(Tissue::Skull),
            reference: "lambda".to_string(),
            leftright: 0.0,
            posteroanterior: 4.0,
            inferosuperior: -1.0,
        };
        let aug = AugmentedRecord::from_resolved(&rec);
        assert_eq!(aug.position(), rec.position());
        assert_eq!(aug.projection_t, None);
        assert_eq!(aug.projection_distance, None);
    }
}
