//! # Analytic Field Model
//!
//! The field map is not solved from a magnet design. Every sample carries a
//! field of constant magnitude lying in the transverse plane, with its
//! direction given by the polar angle of the sample position:
//!
//! ```text
//! θ  = atan2(y, x)
//! Bx = B · cos(θ)
//! By = B · sin(θ)
//! Bz = 0
//! ```
//!
//! ## Origin Convention
//!
//! The polar angle is undefined at `x = y = 0`. [`f64::atan2`] returns `0.0`
//! for `atan2(±0, +0)`, so the origin evaluates to `(B, 0, 0)`. Samplers keep
//! this value unless the point falls inside a masked bore.

use serde::{Deserialize, Serialize};

/// Magnetic field vector in tesla.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldVector {
    /// X component (T)
    pub bx: f64,
    /// Y component (T)
    pub by: f64,
    /// Z component (T), always zero for this model
    pub bz: f64,
}

impl FieldVector {
    /// The field-free vector.
    pub const ZERO: FieldVector = FieldVector {
        bx: 0.0,
        by: 0.0,
        bz: 0.0,
    };

    /// Euclidean norm of the vector.
    pub fn magnitude(&self) -> f64 {
        (self.bx * self.bx + self.by * self.by + self.bz * self.bz).sqrt()
    }
}

/// Evaluate the toroidal model at a transverse position.
///
/// `x` and `y` are in millimeters, `magnitude` in tesla. The returned vector
/// always has `bz == 0.0` and, away from the origin, norm `|magnitude|`.
///
/// # Example
///
/// ```
/// use bmap::field::toroidal_field;
///
/// let b = toroidal_field(7600.0, 0.0, 5.0);
/// assert_eq!((b.bx, b.by, b.bz), (5.0, 0.0, 0.0));
/// ```
#[inline]
pub fn toroidal_field(x: f64, y: f64, magnitude: f64) -> FieldVector {
    let theta = y.atan2(x);
    let (sin, cos) = theta.sin_cos();
    FieldVector {
        bx: magnitude * cos,
        by: magnitude * sin,
        bz: 0.0,
    }
}

/// A single row of the field-map table.
///
/// Positions are in millimeters and field components in tesla, both stored
/// in single precision to match the on-disk schema. Field names serialize to
/// the table's column names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    /// X position (mm)
    pub x_mm: f32,
    /// Y position (mm)
    pub y_mm: f32,
    /// Z position (mm)
    pub z_mm: f32,
    /// X field component (T)
    #[serde(rename = "Bx")]
    pub bx: f32,
    /// Y field component (T)
    #[serde(rename = "By")]
    pub by: f32,
    /// Z field component (T)
    #[serde(rename = "Bz")]
    pub bz: f32,
}

impl FieldSample {
    /// Build a sample from double-precision position and field values.
    pub fn new(x_mm: f64, y_mm: f64, z_mm: f64, field: FieldVector) -> Self {
        Self {
            x_mm: x_mm as f32,
            y_mm: y_mm as f32,
            z_mm: z_mm as f32,
            bx: field.bx as f32,
            by: field.by as f32,
            bz: field.bz as f32,
        }
    }

    /// The same sample reflected through the z = 0 plane.
    ///
    /// Field components are copied unchanged: the map treats the field as
    /// even in z.
    pub fn mirrored_z(&self) -> Self {
        Self {
            z_mm: -self.z_mm,
            ..*self
        }
    }

    /// Transverse distance from the beam axis (mm).
    pub fn radius_mm(&self) -> f32 {
        self.x_mm.hypot(self.y_mm)
    }

    /// Norm of the field vector (T).
    pub fn field_magnitude(&self) -> f32 {
        (self.bx * self.bx + self.by * self.by + self.bz * self.bz).sqrt()
    }
}
