//! Reference resolution
//!
//! Skullsweep measurements are recorded relative to whichever landmark was
//! convenient at the bench: a skull point against lambda, lambda against
//! bregma. Resolution walks each record's reference chain and re-expresses
//! every coordinate as an additive offset from one user-chosen ultimate
//! reference, so all downstream geometry works in a single frame.

use tracing::{debug, trace};

use crate::error::{PlanError, Result};
use crate::model::{RawTable, ResolvedRecord, ResolvedTable};

/// Resolve every record's coordinates against `ultimate_reference`
///
/// For each record the reference chain is walked hop by hop, summing the
/// raw offsets of every intermediate record, until a record's `reference`
/// equals `ultimate_reference`. The ultimate reference's own row (if
/// present) self-references and terminates immediately. After summation
/// the inferosuperior coordinate is the negation of the accumulated
/// superoinferior offsets, so superior is positive.
///
/// Missing raw offsets count as zero; a table with no left-right data
/// anywhere resolves every `leftright` to zero (2D sweeps are supported).
/// Output preserves input order.
///
/// # Errors
///
/// - [`PlanError::MissingReference`] when a chain names an id that is not
///   in the table
/// - [`PlanError::CyclicReference`] when a chain does not terminate within
///   as many hops as the table has records
/// - [`PlanError::MalformedTable`] when the table is empty
pub fn resolve(table: &RawTable, ultimate_reference: &str) -> Result<ResolvedTable> {
    if table.is_empty() {
        return Err(PlanError::MalformedTable(
            "cannot resolve an empty table".to_string(),
        ));
    }
    let schema = table.schema();
    let max_hops = table.len();
    let mut resolved = Vec::with_capacity(table.len());

    for record in table.records() {
        let mut superoinferior = record.superoinferior.unwrap_or(0.0);
        let mut posteroanterior = record.posteroanterior.unwrap_or(0.0);
        let mut leftright = if schema.leftright {
            record.leftright.unwrap_or(0.0)
        } else {
            0.0
        };

        let mut reference = record.reference.as_str();
        let mut hops = 0usize;
        while reference != ultimate_reference {
            if hops >= max_hops {
                return Err(PlanError::CyclicReference {
                    record: record.id.clone(),
                    ultimate: ultimate_reference.to_string(),
                    hops,
                });
            }
            let hop = table.get(reference).ok_or_else(|| PlanError::MissingReference {
                record: record.id.clone(),
                reference: reference.to_string(),
            })?;
            superoinferior += hop.superoinferior.unwrap_or(0.0);
            posteroanterior += hop.posteroanterior.unwrap_or(0.0);
            if schema.leftright {
                leftright += hop.leftright.unwrap_or(0.0);
            }
            reference = hop.reference.as_str();
            hops += 1;
        }

        trace!(
            id = %record.id,
            hops,
            posteroanterior,
            inferosuperior = -superoinferior,
            "resolved record"
        );
        resolved.push(ResolvedRecord {
            id: record.id.clone(),
            tissue: record.tissue,
            reference: record.reference.clone(),
            leftright,
            posteroanterior,
            // sign convention: superior is positive
            inferosuperior: -superoinferior,
        });
    }

    debug!(
        records = resolved.len(),
        reference = ultimate_reference,
        planar = schema.is_planar(),
        "resolved point table"
    );
    Ok(ResolvedTable::new(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawRecord, RawTable, Tissue};
    use approx::assert_relative_eq;

    fn anchor() -> RawRecord {
        RawRecord::with_offsets("bregma", "bregma", 0.0, 0.0)
    }

    #[test]
    fn test_direct_reference_flips_superoinferior() {
        let table = RawTable::new(vec![
            anchor(),
            RawRecord::with_offsets("s1", "bregma", 2.5, 1.0),
        ]);
        let resolved = resolve(&table, "bregma").unwrap();
        let s1 = resolved.get("s1").unwrap();
        assert_relative_eq!(s1.inferosuperior, -2.5);
        assert_relative_eq!(s1.posteroanterior, 1.0);
        assert_relative_eq!(s1.leftright, 0.0);
    }

    #[test]
    fn test_chained_resolution_sums_offsets() {
        // lambda measured 4.0 anterior of bregma; skull point 1.0 anterior
        // of lambda must land at 5.0 anterior of bregma.
        let table = RawTable::new(vec![
            anchor(),
            RawRecord::with_offsets("lambda", "bregma", 0.0, 4.0),
            RawRecord::with_offsets("s1", "lambda", 0.0, 1.0).with_tissue(Tissue::Skull),
        ]);
        let resolved = resolve(&table, "bregma").unwrap();
        assert_relative_eq!(resolved.get("s1").unwrap().posteroanterior, 5.0);
    }

    #[test]
    fn test_chained_equals_direct() {
        // Recording through an intermediate landmark gives the same absolute
        // coordinates as recording directly against the ultimate reference.
        let chained = RawTable::new(vec![
            anchor(),
            RawRecord::with_offsets("lambda", "bregma", 1.5, -4.0),
            RawRecord::with_offsets("s1", "lambda", 0.5, 1.0),
        ]);
        let direct = RawTable::new(vec![
            anchor(),
            RawRecord::with_offsets("s1", "bregma", 2.0, -3.0),
        ]);
        let a = resolve(&chained, "bregma").unwrap();
        let b = resolve(&direct, "bregma").unwrap();
        assert_relative_eq!(
            a.get("s1").unwrap().posteroanterior,
            b.get("s1").unwrap().posteroanterior
        );
        assert_relative_eq!(
            a.get("s1").unwrap().inferosuperior,
            b.get("s1").unwrap().inferosuperior
        );
    }

    #[test]
    fn test_cycle_detected() {
        let table = RawTable::new(vec![
            RawRecord::with_offsets("a", "b", 1.0, 1.0),
            RawRecord::with_offsets("b", "a", 1.0, 1.0),
        ]);
        let err = resolve(&table, "bregma").unwrap_err();
        assert!(matches!(err, PlanError::CyclicReference { .. }));
    }

    #[test]
    fn test_self_cycle_detected() {
        let table = RawTable::new(vec![RawRecord::with_offsets("a", "a", 1.0, 1.0)]);
        let err = resolve(&table, "bregma").unwrap_err();
        assert!(matches!(err, PlanError::CyclicReference { .. }));
    }

    #[test]
    fn test_missing_reference() {
        let table = RawTable::new(vec![RawRecord::with_offsets("s1", "lambda", 1.0, 1.0)]);
        let err = resolve(&table, "bregma").unwrap_err();
        match err {
            PlanError::MissingReference { record, reference } => {
                assert_eq!(record, "s1");
                assert_eq!(reference, "lambda");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = resolve(&RawTable::empty(), "bregma").unwrap_err();
        assert!(matches!(err, PlanError::MalformedTable(_)));
    }

    #[test]
    fn test_planar_table_defaults_leftright_to_zero() {
        let table = RawTable::new(vec![
            anchor(),
            RawRecord::with_offsets("s1", "bregma", 1.0, 2.0),
        ]);
        let resolved = resolve(&table, "bregma").unwrap();
        assert!(resolved.records().iter().all(|r| r.leftright == 0.0));
    }

    #[test]
    fn test_leftright_accumulates_when_present() {
        let table = RawTable::new(vec![
            anchor(),
            RawRecord::with_offsets("lambda", "bregma", 0.0, -4.0).with_leftright(0.2),
            RawRecord::with_offsets("s1", "lambda", 0.0, 1.0).with_leftright(0.3),
        ]);
        let resolved = resolve(&table, "bregma").unwrap();
        assert_relative_eq!(resolved.get("s1").unwrap().leftright, 0.5);
    }

    #[test]
    fn test_output_preserves_input_order() {
        let table = RawTable::new(vec![
            RawRecord::with_offsets("z", "bregma", 0.0, 0.0),
            anchor(),
            RawRecord::with_offsets("a", "bregma", 0.0, 0.0),
        ]);
        let resolved = resolve(&table, "bregma").unwrap();
        let ids: Vec<&str> = resolved.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "bregma", "a"]);
    }
}
