//! Point tables
//!
//! Ordered collections of point records, threaded through the planning
//! pipeline as immutable values: each transformation returns a new table,
//! so a resolved table can be re-projected against any number of targets
//! and angles.

use serde::{Deserialize, Serialize};

use crate::model::record::{AugmentedRecord, RawRecord, ResolvedRecord};
use crate::model::schema::AxisSchema;

/// Ordered collection of raw records as loaded or measured
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTable {
    records: Vec<RawRecord>,
}

impl RawTable {
    /// Create a table from records, preserving their order
    pub fn new(records: Vec<RawRecord>) -> Self {
        RawTable { records }
    }

    /// Create an empty table
    pub fn empty() -> Self {
        RawTable {
            records: Vec::new(),
        }
    }

    /// Append a record
    pub fn push(&mut self, record: RawRecord) {
        self.records.push(record);
    }

    /// Records in input order
    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with the given id
    pub fn get(&self, id: &str) -> Option<&RawRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Detect which raw axis columns this table carries
    pub fn schema(&self) -> AxisSchema {
        AxisSchema::detect(&self.records)
    }
}

impl FromIterator<RawRecord> for RawTable {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        RawTable {
            records: iter.into_iter().collect(),
        }
    }
}

/// Ordered collection of records resolved against one ultimate reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTable {
    records: Vec<ResolvedRecord>,
}

impl ResolvedTable {
    /// Create a table from resolved records, preserving their order
    pub fn new(records: Vec<ResolvedRecord>) -> Self {
        ResolvedTable { records }
    }

    /// Records in input order
    pub fn records(&self) -> &[ResolvedRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with the given id
    pub fn get(&self, id: &str) -> Option<&ResolvedRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Most frequent `reference` value across all records, ties broken by
    /// the value encountered first in table order
    ///
    /// The synthesized incision record inherits this value.
    pub fn dominant_reference(&self) -> Option<&str> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for record in &self.records {
            match counts
                .iter_mut()
                .find(|(v, _)| *v == record.reference.as_str())
            {
                Some((_, n)) => *n += 1,
                None => counts.push((record.reference.as_str(), 1)),
            }
        }
        // max_by_key would return the LAST maximum; first occurrence wins
        counts
            .iter()
            .fold(None, |best: Option<(&str, usize)>, &(v, n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((v, n)),
            })
            .map(|(v, _)| v)
    }

    /// Render as delimited text with a header row, for downstream
    /// collaborators (plotting, volume synthesis)
    pub fn to_delimited(&self) -> String {
        let mut out =
            String::from("ID,reference,tissue,leftright,posteroanterior,inferosuperior\n");
        for r in &self.records {
            let tissue = r.tissue.map(|t| t.as_str()).unwrap_or("");
            out.push_str(&format!(
                "{},{},{},{},{},{}\n",
                r.id, r.reference, tissue, r.leftright, r.posteroanterior, r.inferosuperior
            ));
        }
        out
    }
}

/// Resolved table plus derived projection columns and the synthesized
/// incision record (always the last row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedTable {
    records: Vec<AugmentedRecord>,
}

impl AugmentedTable {
    /// Create a table from augmented records, preserving their order
    pub fn new(records: Vec<AugmentedRecord>) -> Self {
        AugmentedTable { records }
    }

    /// Records in input order, incision row last
    pub fn records(&self) -> &[AugmentedRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with the given id
    pub fn get(&self, id: &str) -> Option<&AugmentedRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// The synthesized incision record
    pub fn incision(&self) -> Option<&AugmentedRecord> {
        self.get("incision")
    }

    /// Render as delimited text with a header row, derived columns included
    pub fn to_delimited(&self) -> String {
        let mut out = String::from(
            "ID,reference,tissue,leftright,posteroanterior,inferosuperior,\
             projection t,leftright (implant projection),\
             posteroanterior (implant projection),\
             inferosuperior (implant projection),projection distance\n",
        );
        for r in &self.records {
            let tissue = r.tissue.map(|t| t.as_str()).unwrap_or("");
            let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
            let proj = |i: usize| {
                r.projection
                    .map(|p| p[i].to_string())
                    .unwrap_or_default()
            };
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{}\n",
                r.id,
                r.reference,
                tissue,
                r.leftright,
                r.posteroanterior,
                r.inferosuperior,
                opt(r.projection_t),
                proj(0),
                proj(1),
                proj(2),
                opt(r.projection_distance),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Tissue;

    fn resolved(id: &str, reference: &str) -> ResolvedRecord {
        ResolvedRecord {
            id: id.to_string(),
            tissue: None,
            reference: reference.to_string(),
            leftright: 0.0,
            posteroanterior: 0.0,
            inferosuperior: 0.0,
        }
    }

    #[test]
    fn test_raw_table_lookup_first_match() {
        let table = RawTable::new(vec![
            RawRecord::with_offsets("s1", "bregma", 1.0, 1.0),
            RawRecord::with_offsets("s1", "lambda", 2.0, 2.0),
        ]);
        assert_eq!(table.get("s1").unwrap().reference, "bregma");
        assert!(table.get("s9").is_none());
    }

    #[test]
    fn test_dominant_reference_mode() {
        let table = ResolvedTable::new(vec![
            resolved("bregma", "bregma"),
            resolved("s1", "lambda"),
            resolved("s2", "lambda"),
            resolved("s3", "bregma"),
            resolved("s4", "lambda"),
        ]);
        assert_eq!(table.dominant_reference(), Some("lambda"));
    }

    #[test]
    fn test_dominant_reference_tie_first_encountered() {
        let table = ResolvedTable::new(vec![
            resolved("bregma", "bregma"),
            resolved("s1", "lambda"),
            resolved("s2", "lambda"),
            resolved("s3", "bregma"),
        ]);
        // 2 vs 2; "bregma" was seen first
        assert_eq!(table.dominant_reference(), Some("bregma"));
    }

    #[test]
    fn test_dominant_reference_empty() {
        let table = ResolvedTable::new(vec![]);
        assert_eq!(table.dominant_reference(), None);
    }

    #[test]
    fn test_resolved_to_delimited() {
        let mut rec = resolved("s1", "bregma");
        rec.tissue = Some(Tissue::Skull);
        rec.posteroanterior = 2.5;
        rec.inferosuperior = -1.0;
        let table = ResolvedTable::new(vec![rec]);
        let text = table.to_delimited();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,reference,tissue,leftright,posteroanterior,inferosuperior"
        );
        assert_eq!(lines.next().unwrap(), "s1,bregma,skull,0,2.5,-1");
    }

    #[test]
    fn test_augmented_incision_lookup() {
        let mut rec = AugmentedRecord::from_resolved(&resolved("incision", "bregma"));
        rec.projection_t = Some(-2.0);
        let table = AugmentedTable::new(vec![
            AugmentedRecord::from_resolved(&resolved("s1", "bregma")),
            rec,
        ]);
        assert_eq!(table.incision().unwrap().projection_t, Some(-2.0));
    }
}
