//! Entry-angle decomposition
//!
//! An implant trajectory is specified by up to two planar angles: `yz_angle`
//! in the sagittal plane and `xz_angle` in the coronal plane. With the
//! stereotaxis-style convention (the default) the yz angle is measured
//! relative to the inferosuperior axis, matching how a stereotactic frame
//! arm is read off; disabling the convention takes it relative to the
//! posteroanterior axis instead. The stereotaxis-style yz angle is offset
//! by +90 degrees before conversion to radians.
//!
//! The decomposition into a direction vector is
//!
//! ```text
//! dx = sin(xz),  dy = sin(yz),  dz = cos(xz) * cos(yz)
//! ```
//!
//! and is deliberately NOT re-normalized: for compound angle combinations
//! the vector norm exceeds 1, which changes what a scalar offset along the
//! trajectory means. Insertion lengths are computed from Euclidean point
//! distances and are unaffected, but the mapping is pinned by a property
//! test and must not be normalized without revisiting that contract.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Planar entry angles for an implant trajectory, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryAngles {
    /// Angle in the sagittal (posteroanterior/inferosuperior) plane
    pub yz_angle: f64,
    /// Angle in the coronal (leftright/inferosuperior) plane
    pub xz_angle: f64,
    /// Measure `yz_angle` from the inferosuperior axis (stereotaxis-style)
    /// rather than from the posteroanterior axis
    pub stereotaxis_style: bool,
}

impl Default for EntryAngles {
    fn default() -> Self {
        EntryAngles {
            yz_angle: 0.0,
            xz_angle: 0.0,
            stereotaxis_style: true,
        }
    }
}

impl EntryAngles {
    /// Stereotaxis-style angles: `yz_angle` measured from the
    /// inferosuperior axis
    pub fn new(yz_angle: f64, xz_angle: f64) -> Self {
        EntryAngles {
            yz_angle,
            xz_angle,
            stereotaxis_style: true,
        }
    }

    /// Angles measured from the posteroanterior axis
    pub fn from_posteroanterior(yz_angle: f64, xz_angle: f64) -> Self {
        EntryAngles {
            yz_angle,
            xz_angle,
            stereotaxis_style: false,
        }
    }

    /// Decompose into a trajectory direction vector
    ///
    /// Not re-normalized; see the module documentation.
    pub fn direction(&self) -> Vector3<f64> {
        let yz = if self.stereotaxis_style {
            self.yz_angle + 90.0
        } else {
            self.yz_angle
        };
        let yz_rad = yz.to_radians();
        let xz_rad = self.xz_angle.to_radians();
        Vector3::new(
            xz_rad.sin(),
            yz_rad.sin(),
            xz_rad.cos() * yz_rad.cos(),
        )
    }
}
