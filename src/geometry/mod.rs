//! Geometric core: reference resolution and trajectory projection
//!
//! Both operations are pure, synchronous transforms over point tables.
//! `resolve` brings every record into one coordinate frame; `project`
//! derives the entry point and insertion length for a chosen target and
//! angle.

pub mod angles;
pub mod project;
pub mod resolve;

// Re-export commonly used types
pub use angles::EntryAngles;
pub use project::{project, project_at_angles, Target, Trajectory};
pub use resolve::resolve;
