//! Delimited point-table loading
//!
//! Skullsweep working sets arrive as comma-delimited text with a header
//! row. Required columns are `ID` and `reference`; raw axis columns are
//! matched case-insensitively against the supported schema
//! (`superoinferior`/`SI`, `posteroanterior`/`PA`, `leftright`/`LR` or
//! `rightleft`/`RL`) and a `tissue` column tags skull/brain rows. Column
//! detection happens once per file; rows are then read strictly, with
//! diagnostics naming the offending row and column.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PlanError, Result};
use crate::model::{RawRecord, RawTable, Tissue};

/// Header-resolved column positions
struct ColumnMap {
    id: usize,
    reference: usize,
    tissue: Option<usize>,
    superoinferior: Option<usize>,
    posteroanterior: Option<usize>,
    leftright: Option<usize>,
    /// Alternative left-right column with the opposite sign convention;
    /// negated into `leftright` on load
    rightleft: Option<usize>,
    width: usize,
}

fn column_index(columns: &[&str], names: &[&str]) -> Option<usize> {
    columns
        .iter()
        .position(|c| names.iter().any(|n| c.eq_ignore_ascii_case(n)))
}

impl ColumnMap {
    fn from_header(header: &str) -> Result<Self> {
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        let required = |names: &[&str]| {
            column_index(&columns, names).ok_or_else(|| {
                PlanError::MalformedTable(format!("missing required column '{}'", names[0]))
            })
        };
        let map = ColumnMap {
            id: required(&["ID"])?,
            reference: required(&["reference"])?,
            tissue: column_index(&columns, &["tissue"]),
            superoinferior: column_index(&columns, &["superoinferior", "SI"]),
            posteroanterior: column_index(&columns, &["posteroanterior", "PA"]),
            leftright: column_index(&columns, &["leftright", "LR"]),
            rightleft: column_index(&columns, &["rightleft", "RL"]),
            width: columns.len(),
        };
        if map.leftright.is_some() && map.rightleft.is_some() {
            return Err(PlanError::MalformedTable(
                "both 'leftright' and 'rightleft' columns present".to_string(),
            ));
        }
        Ok(map)
    }
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>().map(Some).map_err(|_| {
        PlanError::MalformedTable(format!(
            "row {row}: cannot parse '{cell}' in column '{column}' as a number"
        ))
    })
}

/// Parse a comma-delimited point table with a header row
///
/// Blank lines are skipped; every data row must have as many cells as the
/// header. A `rightleft` column is accepted in place of `leftright` and
/// negated into the crate's right-positive left-right axis.
pub fn parse_table(text: &str) -> Result<RawTable> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());
    let (_, header) = lines.next().ok_or_else(|| {
        PlanError::MalformedTable("empty table: missing header row".to_string())
    })?;
    let map = ColumnMap::from_header(header)?;

    let mut table = RawTable::empty();
    for (line_index, line) in lines {
        let row = line_index + 1;
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != map.width {
            return Err(PlanError::MalformedTable(format!(
                "row {row}: expected {} cells, found {}",
                map.width,
                cells.len()
            )));
        }

        let id = cells[map.id];
        if id.is_empty() {
            return Err(PlanError::MalformedTable(format!("row {row}: empty ID")));
        }
        let reference = cells[map.reference];
        if reference.is_empty() {
            return Err(PlanError::MalformedTable(format!(
                "row {row}: empty reference for '{id}'"
            )));
        }

        let tissue = match map.tissue.map(|i| cells[i].trim()) {
            None => None,
            Some("") => None,
            Some(cell) => Some(Tissue::parse(cell).ok_or_else(|| {
                PlanError::MalformedTable(format!(
                    "row {row}: unknown tissue '{cell}' for '{id}'"
                ))
            })?),
        };

        let superoinferior = match map.superoinferior {
            Some(i) => parse_cell(cells[i], row, "superoinferior")?,
            None => None,
        };
        let posteroanterior = match map.posteroanterior {
            Some(i) => parse_cell(cells[i], row, "posteroanterior")?,
            None => None,
        };
        let leftright = match (map.leftright, map.rightleft) {
            (Some(i), _) => parse_cell(cells[i], row, "leftright")?,
            (None, Some(i)) => parse_cell(cells[i], row, "rightleft")?.map(|v| -v),
            (None, None) => None,
        };

        table.push(RawRecord {
            id: id.to_string(),
            tissue,
            reference: reference.to_string(),
            superoinferior,
            posteroanterior,
            leftright,
        });
    }

    debug!(records = table.len(), "parsed point table");
    Ok(table)
}

/// Load a comma-delimited point table from a file
pub fn load_table(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading point table");
    let text = fs::read_to_string(path)?;
    parse_table(&text)
}
