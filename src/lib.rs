//! Stereotactic brain-implant trajectory planning
//!
//! This library plans implant and injection trajectories for small-animal
//! stereotactic surgery: given a sweep of probed skull-surface points and an
//! anatomical target, it computes the skull entry (incision) point and the
//! insertion length for an implant driven along a chosen angle, with every
//! coordinate referenced to a cranial landmark such as bregma or lambda.
//!
//! # Features
//!
//! - **Reference resolution** - re-expresses relatively-recorded
//!   measurements against one ultimate reference, following chains of
//!   intermediate landmarks
//! - **Trajectory projection** - projects the skull sweep onto the
//!   trajectory line through the target and selects the best entry point
//! - **2D and 3D sweeps** - tables without left-right data resolve in the
//!   sagittal plane
//! - **Pure value pipeline** - every step returns a new table, so one
//!   resolved sweep can be re-projected for any number of targets and
//!   angles
//!
//! # Quick Start
//!
//! ```
//! use skullsweep::geometry::{project_at_angles, resolve, EntryAngles, Target};
//! use skullsweep::model::{RawRecord, RawTable, Tissue};
//!
//! let table = RawTable::new(vec![
//!     RawRecord::with_offsets("bregma", "bregma", 0.0, 0.0),
//!     RawRecord::with_offsets("lambda", "bregma", 0.2, -4.0),
//!     RawRecord::with_offsets("VTA", "bregma", 4.5, -3.2),
//!     RawRecord::with_offsets("s1", "lambda", -0.4, 1.0).with_tissue(Tissue::Skull),
//!     RawRecord::with_offsets("s2", "lambda", -0.6, 2.5).with_tissue(Tissue::Skull),
//! ]);
//!
//! let resolved = resolve(&table, "bregma")?;
//! let (trajectory, augmented) = project_at_angles(
//!     &resolved,
//!     &Target::from("VTA"),
//!     &EntryAngles::new(20.0, 0.0),
//! )?;
//!
//! println!("insertion length: {:.2} mm", trajectory.insertion_length);
//! assert_eq!(augmented.records().last().unwrap().id, "incision");
//! # Ok::<(), skullsweep::PlanError>(())
//! ```
//!
//! # Architecture
//!
//! - **`model`** - point records and tables (raw, resolved, augmented) and
//!   per-table axis schema detection
//! - **`geometry`** - the planning core: reference resolution, entry-angle
//!   decomposition, trajectory projection
//! - **`io`** - delimited point-table loading
//! - **`report`** - textual plan summary for standard output
//! - **`error`** - `PlanError` and the crate `Result` alias
//!
//! Plotting, volumetric mask synthesis, and template registration are
//! external collaborators: they consume the augmented tables and trajectory
//! scalars this crate produces and are not implemented here.

pub mod error;
pub mod geometry;
pub mod io;
pub mod model;
pub mod report;

// Re-export commonly used types
pub use error::{PlanError, Result};
