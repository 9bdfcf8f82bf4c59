//! Trajectory projection
//!
//! Given a resolved point set, a target, and a trajectory direction, find
//! the skull-surface point best suited as the implant entry site: project
//! every skull contact onto the line through the target, pick the contact
//! with the smallest perpendicular distance to that line, and synthesize
//! the incision record at its projected coordinates. The insertion length
//! is the Euclidean distance from the incision point to the target.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{PlanError, Result};
use crate::geometry::angles::EntryAngles;
use crate::model::{AugmentedRecord, AugmentedTable, ResolvedTable};

/// Largest magnitude by which the projection-distance radicand may go
/// negative before it is treated as a data/angle inconsistency rather than
/// floating rounding. The sub-epsilon clamp to zero is the only tolerated
/// numeric slack in the crate.
const RADICAND_EPSILON: f64 = 1e-9;

/// Target specification for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// Look up the unique record with this id in the resolved table
    Id(String),
    /// Explicit per-axis coordinates relative to the ultimate reference
    Coordinates {
        /// Left-right coordinate in mm
        leftright: f64,
        /// Posterior-anterior coordinate in mm
        posteroanterior: f64,
        /// Inferior-superior coordinate in mm
        inferosuperior: f64,
    },
    /// Explicit (leftright, posteroanterior, inferosuperior) vector
    Point([f64; 3]),
}

impl From<&str> for Target {
    fn from(id: &str) -> Self {
        Target::Id(id.to_string())
    }
}

impl From<[f64; 3]> for Target {
    fn from(point: [f64; 3]) -> Self {
        Target::Point(point)
    }
}

/// Derived trajectory geometry: direction, target, incision, and scalars
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Trajectory direction vector (not re-normalized for compound angles)
    pub direction: Vector3<f64>,
    /// Target point in resolved coordinates
    pub target: Vector3<f64>,
    /// Selected skull-surface entry point in resolved coordinates
    pub incision: Vector3<f64>,
    /// Scalar offset of the incision along the direction vector
    pub t_incision: f64,
    /// Euclidean distance from target to incision, in mm
    pub insertion_length: f64,
}

/// Project the skull points of `table` onto the line through `target` with
/// `direction` and derive the incision point
///
/// Every skull record gains derived columns: its scalar projection
/// `t = dot(point - target, direction)`, its projected coordinates
/// `target + t * direction`, and its perpendicular distance to the
/// trajectory line. The skull record with the smallest perpendicular
/// distance (ties broken by input order, first occurrence wins) determines
/// the incision point; a synthesized record with id `"incision"` is
/// appended to the table, carrying the projected coordinates, the mode of
/// all records' `reference` values, and the selected scalar offset.
///
/// Pure transform: the input table is not modified, so it can be
/// re-projected with other targets or angles.
///
/// # Errors
///
/// - [`PlanError::UnknownTarget`] / [`PlanError::AmbiguousTarget`] for a
///   bad id target
/// - [`PlanError::EmptySkullSet`] when no record is tagged skull
/// - [`PlanError::NumericDomain`] when a projection radicand goes negative
///   beyond tolerance
pub fn project(
    table: &ResolvedTable,
    target: &Target,
    direction: Vector3<f64>,
) -> Result<(Trajectory, AugmentedTable)> {
    let target_point = locate_target(table, target)?;

    struct Selected {
        index: usize,
        t: f64,
        point: Vector3<f64>,
        distance: f64,
    }

    let mut augmented: Vec<AugmentedRecord> = table
        .records()
        .iter()
        .map(AugmentedRecord::from_resolved)
        .collect();
    let mut best: Option<Selected> = None;

    for (index, record) in table.records().iter().enumerate() {
        if !record.is_skull() {
            continue;
        }
        let offset = record.position() - target_point;
        let t = offset.dot(&direction);
        let projected = target_point + direction * t;
        let radicand = offset.norm_squared() - t * t;
        let distance = if radicand < 0.0 {
            if radicand < -RADICAND_EPSILON {
                return Err(PlanError::NumericDomain {
                    record: record.id.clone(),
                    radicand,
                    t,
                });
            }
            // rounding slack only; see RADICAND_EPSILON
            0.0
        } else {
            radicand.sqrt()
        };

        trace!(id = %record.id, t, distance, "projected skull point");
        augmented[index].projection_t = Some(t);
        augmented[index].projection = Some([projected.x, projected.y, projected.z]);
        augmented[index].projection_distance = Some(distance);

        // strict < keeps the first occurrence on ties
        if best.as_ref().map_or(true, |b| distance < b.distance) {
            best = Some(Selected {
                index,
                t,
                point: projected,
                distance,
            });
        }
    }

    let selected = best.ok_or(PlanError::EmptySkullSet)?;
    let insertion_length = (selected.point - target_point).norm();
    let reference = table
        .dominant_reference()
        .unwrap_or_default()
        .to_string();

    debug!(
        incision = %table.records()[selected.index].id,
        distance = selected.distance,
        insertion_length,
        "selected incision point"
    );

    augmented.push(AugmentedRecord {
        id: "incision".to_string(),
        tissue: None,
        reference,
        leftright: selected.point.x,
        posteroanterior: selected.point.y,
        inferosuperior: selected.point.z,
        projection_t: Some(selected.t),
        projection: None,
        projection_distance: None,
    });

    let trajectory = Trajectory {
        direction,
        target: target_point,
        incision: selected.point,
        t_incision: selected.t,
        insertion_length,
    };
    Ok((trajectory, AugmentedTable::new(augmented)))
}

/// [`project`] with the direction derived from entry angles
pub fn project_at_angles(
    table: &ResolvedTable,
    target: &Target,
    angles: &EntryAngles,
) -> Result<(Trajectory, AugmentedTable)> {
    project(table, target, angles.direction())
}

fn locate_target(table: &ResolvedTable, target: &Target) -> Result<Vector3<f64>> {
    match target {
        Target::Point(p) => Ok(Vector3::new(p[0], p[1], p[2])),
        Target::Coordinates {
            leftright,
            posteroanterior,
            inferosuperior,
        } => Ok(Vector3::new(*leftright, *posteroanterior, *inferosuperior)),
        Target::Id(id) => {
            let mut matches = table.records().iter().filter(|r| &r.id == id);
            match (matches.next(), matches.next()) {
                (None, _) => Err(PlanError::UnknownTarget(id.clone())),
                (Some(record), None) => Ok(record.position()),
                (Some(_), Some(_)) => Err(PlanError::AmbiguousTarget {
                    id: id.clone(),
                    count: 2 + matches.count(),
                }),
            }
        }
    }
}
