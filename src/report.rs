//! Textual plan summary
//!
//! Human-readable rendering of a computed plan for standard output:
//! target coordinates, entry angles, incision coordinates, and insertion
//! length, all relative to the chosen ultimate reference.

use std::fmt;

use crate::geometry::{EntryAngles, Trajectory};

/// A computed plan ready for textual rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSummary {
    /// How the target was specified (record id or "explicit coordinates")
    pub target_label: String,
    /// The ultimate reference all coordinates are relative to
    pub reference: String,
    /// The entry angles the plan was computed for
    pub angles: EntryAngles,
    /// The derived trajectory geometry
    pub trajectory: Trajectory,
}

impl PlanSummary {
    /// Bundle a computed trajectory with its inputs for rendering
    pub fn new(
        target_label: impl Into<String>,
        reference: impl Into<String>,
        angles: EntryAngles,
        trajectory: Trajectory,
    ) -> Self {
        PlanSummary {
            target_label: target_label.into(),
            reference: reference.into(),
            angles,
            trajectory,
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reference = &self.reference;
        let yz_axis = if self.angles.stereotaxis_style {
            "from inferosuperior axis"
        } else {
            "from posteroanterior axis"
        };
        writeln!(f, "You have selected:")?;
        writeln!(f)?;
        writeln!(f, "  Target: \"{}\"", self.target_label)?;
        writeln!(
            f,
            "    LeftRight({reference}):       {:8.2}",
            self.trajectory.target.x
        )?;
        writeln!(
            f,
            "    PosteroAnterior({reference}): {:8.2}",
            self.trajectory.target.y
        )?;
        writeln!(
            f,
            "    InferoSuperior({reference}):  {:8.2}",
            self.trajectory.target.z
        )?;
        writeln!(f, "  Entry Angles:")?;
        writeln!(
            f,
            "    XZ (coronal plane):   {:.0}\u{b0}",
            self.angles.xz_angle
        )?;
        writeln!(
            f,
            "    YZ ({yz_axis}): {:.0}\u{b0}",
            self.angles.yz_angle
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Given your skull points, you can best reach the target at the desired angle with:"
        )?;
        writeln!(f)?;
        writeln!(f, "  Incision Site:")?;
        writeln!(
            f,
            "    LeftRight({reference}):       {:8.2}",
            self.trajectory.incision.x
        )?;
        writeln!(
            f,
            "    PosteroAnterior({reference}): {:8.2}",
            self.trajectory.incision.y
        )?;
        writeln!(
            f,
            "    InferoSuperior({reference}):  {:8.2}",
            self.trajectory.incision.z
        )?;
        writeln!(
            f,
            "  Insertion Length: {:.2}mm",
            self.trajectory.insertion_length
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_summary_rendering() {
        let trajectory = Trajectory {
            direction: Vector3::new(0.0, 0.0, 1.0),
            target: Vector3::new(0.0, 10.0, 5.0),
            incision: Vector3::new(0.0, 10.0, 0.0),
            t_incision: -5.0,
            insertion_length: 5.0,
        };
        let summary = PlanSummary::new("VTA", "bregma", EntryAngles::new(30.0, 0.0), trajectory);
        let text = summary.to_string();
        assert!(text.contains("Target: \"VTA\""));
        assert!(text.contains("PosteroAnterior(bregma):    10.00"));
        assert!(text.contains("YZ (from inferosuperior axis): 30\u{b0}"));
        assert!(text.contains("Insertion Length: 5.00mm"));
    }
}
