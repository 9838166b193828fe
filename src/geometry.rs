//! # Detector Geometry and Sampling Grids
//!
//! A field map is described by a region (barrel + endcap of a cylindrical
//! detector) and a grid resolution. The defaults reproduce the MuColl_10TeV_v0A
//! toroid layout: a 5 T field between the calorimeter (4100 mm) and the outer
//! radius (7600 mm), endcaps starting at the end of the HCal (4570 mm) and
//! reaching down to the end of the nozzle (445 mm).

use serde::{Deserialize, Serialize};

use crate::sampler::SamplerError;

/// Default field magnitude (T)
pub const DEFAULT_FIELD_TESLA: f64 = 5.0;
/// Default inner radius of the barrel (mm)
pub const DEFAULT_RMIN_MM: f64 = 4100.0;
/// Default outer radius (mm)
pub const DEFAULT_RMAX_MM: f64 = 7600.0;
/// Default half-length of the detector (mm)
pub const DEFAULT_HALFLENGTH_MM: f64 = 8000.0;
/// Default z where the endcap region starts, end of HCal (mm)
pub const DEFAULT_Z_ENDCAP_MIN_MM: f64 = 4570.0;
/// Default inner endcap radius, end of nozzle (mm)
pub const DEFAULT_R_ENDCAP_MIN_MM: f64 = 445.0;

/// Scalar description of the sampled detector region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorGeometry {
    /// Field magnitude (T)
    pub field_tesla: f64,
    /// Inner barrel radius; bore boundary (mm)
    pub rmin_mm: f64,
    /// Outer radius (mm)
    pub rmax_mm: f64,
    /// Half-length along the beam axis (mm)
    pub halflength_mm: f64,
    /// |z| at which the endcap region starts (mm)
    pub z_endcap_min_mm: f64,
    /// Inner endcap radius at the beam nozzle (mm)
    pub r_endcap_min_mm: f64,
}

impl Default for DetectorGeometry {
    fn default() -> Self {
        Self {
            field_tesla: DEFAULT_FIELD_TESLA,
            rmin_mm: DEFAULT_RMIN_MM,
            rmax_mm: DEFAULT_RMAX_MM,
            halflength_mm: DEFAULT_HALFLENGTH_MM,
            z_endcap_min_mm: DEFAULT_Z_ENDCAP_MIN_MM,
            r_endcap_min_mm: DEFAULT_R_ENDCAP_MIN_MM,
        }
    }
}

impl DetectorGeometry {
    /// Checks shared by both samplers.
    pub fn validate(&self) -> Result<(), SamplerError> {
        let values = [
            ("field_tesla", self.field_tesla),
            ("rmin_mm", self.rmin_mm),
            ("rmax_mm", self.rmax_mm),
            ("halflength_mm", self.halflength_mm),
            ("z_endcap_min_mm", self.z_endcap_min_mm),
            ("r_endcap_min_mm", self.r_endcap_min_mm),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(SamplerError::InvalidGeometry(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.rmin_mm < 0.0 || self.rmin_mm >= self.rmax_mm {
            return Err(SamplerError::InvalidGeometry(format!(
                "expected 0 <= rmin < rmax, got rmin={} rmax={}",
                self.rmin_mm, self.rmax_mm
            )));
        }

        if self.halflength_mm <= 0.0 {
            return Err(SamplerError::InvalidGeometry(format!(
                "halflength must be positive, got {}",
                self.halflength_mm
            )));
        }

        if self.z_endcap_min_mm < 0.0 {
            return Err(SamplerError::InvalidGeometry(format!(
                "z_endcap_min must be non-negative, got {}",
                self.z_endcap_min_mm
            )));
        }

        Ok(())
    }

    /// Additional checks for the endcap pass of the cylindrical sampler.
    pub fn validate_endcap(&self) -> Result<(), SamplerError> {
        self.validate()?;

        if self.z_endcap_min_mm >= self.halflength_mm {
            return Err(SamplerError::InvalidGeometry(format!(
                "endcap must start inside the detector: z_endcap_min={} halflength={}",
                self.z_endcap_min_mm, self.halflength_mm
            )));
        }

        if self.r_endcap_min_mm < 0.0 || self.r_endcap_min_mm >= self.rmin_mm {
            return Err(SamplerError::InvalidGeometry(format!(
                "expected 0 <= r_endcap_min < rmin, got r_endcap_min={} rmin={}",
                self.r_endcap_min_mm, self.rmin_mm
            )));
        }

        Ok(())
    }

    /// Whether a point lies in the field-free bore.
    #[inline]
    pub fn in_bore(&self, radius_mm: f64, z_mm: f64) -> bool {
        radius_mm < self.rmin_mm && z_mm.abs() < self.z_endcap_min_mm
    }
}

/// Grid resolution of the Cartesian sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartesianGrid {
    /// Number of intervals along z; `num_points_z + 1` planes are sampled
    pub num_points_z: usize,
    /// Number of intervals along x and y; `num_points_xy + 1` values each
    pub num_points_xy: usize,
}

impl Default for CartesianGrid {
    fn default() -> Self {
        Self {
            num_points_z: 100,
            num_points_xy: 200,
        }
    }
}

impl CartesianGrid {
    /// Reject zero interval counts (they would divide by zero in the step).
    pub fn validate(&self) -> Result<(), SamplerError> {
        if self.num_points_z == 0 {
            return Err(SamplerError::InvalidGridCount {
                name: "num_points_z",
                value: self.num_points_z,
            });
        }
        if self.num_points_xy == 0 {
            return Err(SamplerError::InvalidGridCount {
                name: "num_points_xy",
                value: self.num_points_xy,
            });
        }
        if self.checked_records().is_none() {
            let (name, value) = if self.num_points_xy >= self.num_points_z {
                ("num_points_xy", self.num_points_xy)
            } else {
                ("num_points_z", self.num_points_z)
            };
            return Err(SamplerError::GridTooLarge { name, value });
        }
        Ok(())
    }

    /// Closed-form record count `(nz + 1) * (nxy + 1)^2`, `None` if it does
    /// not fit in a `u64`.
    pub fn checked_records(&self) -> Option<u64> {
        let nz = u64::try_from(self.num_points_z).ok()?.checked_add(1)?;
        let nxy = u64::try_from(self.num_points_xy).ok()?.checked_add(1)?;
        nz.checked_mul(nxy)?.checked_mul(nxy)
    }

    /// Closed-form record count, saturating at `u64::MAX`.
    pub fn expected_records(&self) -> u64 {
        self.checked_records().unwrap_or(u64::MAX)
    }
}

/// Grid resolution of the cylindrical sampler.
///
/// One count is reused for z, radius and azimuth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CylindricalGrid {
    /// Number of samples along each axis
    pub num_points: usize,
}

impl Default for CylindricalGrid {
    fn default() -> Self {
        Self { num_points: 100 }
    }
}

impl CylindricalGrid {
    /// Reject a zero count.
    pub fn validate(&self) -> Result<(), SamplerError> {
        if self.num_points == 0 {
            return Err(SamplerError::InvalidGridCount {
                name: "num_points",
                value: self.num_points,
            });
        }
        if self.checked_records().is_none() {
            return Err(SamplerError::GridTooLarge {
                name: "num_points",
                value: self.num_points,
            });
        }
        Ok(())
    }

    fn checked_barrel(n: u64) -> Option<u64> {
        n.checked_mul(n)?.checked_mul(n)?.checked_mul(2)
    }

    fn checked_endcap(n: u64) -> Option<u64> {
        n.saturating_sub(1).checked_mul(n)?.checked_mul(n)?.checked_mul(2)
    }

    /// Records emitted by the barrel pass, mirrors included: `2 n^3`.
    /// Saturates at `u64::MAX`.
    pub fn barrel_records(&self) -> u64 {
        u64::try_from(self.num_points)
            .ok()
            .and_then(Self::checked_barrel)
            .unwrap_or(u64::MAX)
    }

    /// Records emitted by the endcap pass, mirrors included: `2 (n - 1) n^2`.
    /// Saturates at `u64::MAX`.
    pub fn endcap_records(&self) -> u64 {
        u64::try_from(self.num_points)
            .ok()
            .and_then(Self::checked_endcap)
            .unwrap_or(u64::MAX)
    }

    /// Total records of both passes, `None` if it does not fit in a `u64`.
    pub fn checked_records(&self) -> Option<u64> {
        let n = u64::try_from(self.num_points).ok()?;
        Self::checked_barrel(n)?.checked_add(Self::checked_endcap(n)?)
    }

    /// Total records of both passes, saturating at `u64::MAX`.
    pub fn expected_records(&self) -> u64 {
        self.checked_records().unwrap_or(u64::MAX)
    }
}

/// Sampling variant together with its grid, as recorded in file metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum SamplingGrid {
    /// Full square x/y grid over `[-rmax, rmax]^2` with a masked bore
    Cartesian(CartesianGrid),
    /// Barrel and endcap shells with z-mirroring
    Cylindrical(CylindricalGrid),
}

impl SamplingGrid {
    /// Validate the grid of the recorded variant.
    pub fn validate(&self) -> Result<(), SamplerError> {
        match self {
            SamplingGrid::Cartesian(grid) => grid.validate(),
            SamplingGrid::Cylindrical(grid) => grid.validate(),
        }
    }

    /// Closed-form record count of the variant.
    pub fn expected_records(&self) -> u64 {
        match self {
            SamplingGrid::Cartesian(grid) => grid.expected_records(),
            SamplingGrid::Cylindrical(grid) => grid.expected_records(),
        }
    }

    /// Short variant name.
    pub fn variant_name(&self) -> &'static str {
        match self {
            SamplingGrid::Cartesian(_) => "cartesian",
            SamplingGrid::Cylindrical(_) => "cylindrical",
        }
    }
}
