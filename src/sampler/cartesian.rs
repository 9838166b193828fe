use crate::field::{toroidal_field, FieldSample, FieldVector};
use crate::geometry::{CartesianGrid, DetectorGeometry, SamplingGrid};

use super::{axis_value, FieldMapSampler, SamplerError};

/// Samples the field on a Cartesian x/y/z box.
///
/// z runs over `num_points_z + 1` values in `[-halflength, halflength]`; for
/// each plane x and y independently run over `num_points_xy + 1` values in
/// `[-rmax, rmax]`. The square is not clipped to a disk, so corner points lie
/// beyond `rmax`. Points with `radius < rmin` and `|z| < z_endcap_min` carry
/// a zero field.
#[derive(Debug, Clone)]
pub struct CartesianSampler {
    geometry: DetectorGeometry,
    grid: CartesianGrid,
}

impl CartesianSampler {
    /// Create a sampler, rejecting zero grid counts and degenerate geometry.
    pub fn new(geometry: DetectorGeometry, grid: CartesianGrid) -> Result<Self, SamplerError> {
        geometry.validate()?;
        grid.validate()?;
        Ok(Self { geometry, grid })
    }

    /// Grid resolution
    pub fn cartesian_grid(&self) -> &CartesianGrid {
        &self.grid
    }

    /// z coordinate of plane `iz`.
    #[inline]
    fn z_at(&self, iz: usize) -> f64 {
        let h = self.geometry.halflength_mm;
        axis_value(-h, 2.0 * h, iz, self.grid.num_points_z)
    }

    /// x (or y) coordinate of column `i`.
    #[inline]
    fn xy_at(&self, i: usize) -> f64 {
        let r = self.geometry.rmax_mm;
        axis_value(-r, 2.0 * r, i, self.grid.num_points_xy)
    }

    /// Evaluate one grid point, applying the bore mask.
    pub fn sample_at(&self, x: f64, y: f64, z: f64) -> FieldSample {
        let radius = x.hypot(y);
        let field = if self.geometry.in_bore(radius, z) {
            FieldVector::ZERO
        } else {
            toroidal_field(x, y, self.geometry.field_tesla)
        };
        FieldSample::new(x, y, z, field)
    }
}

impl FieldMapSampler for CartesianSampler {
    type Samples<'a> = CartesianSamples<'a>;

    fn geometry(&self) -> &DetectorGeometry {
        &self.geometry
    }

    fn grid(&self) -> SamplingGrid {
        SamplingGrid::Cartesian(self.grid)
    }

    fn samples(&self) -> CartesianSamples<'_> {
        CartesianSamples {
            sampler: self,
            iz: 0,
            ix: 0,
            iy: 0,
            z: self.z_at(0),
            x: self.xy_at(0),
            remaining: self.grid.expected_records(),
        }
    }
}

/// Iterator over the records of a [`CartesianSampler`], z outermost, y innermost.
#[derive(Debug, Clone)]
pub struct CartesianSamples<'a> {
    sampler: &'a CartesianSampler,
    iz: usize,
    ix: usize,
    iy: usize,
    z: f64,
    x: f64,
    remaining: u64,
}

impl Iterator for CartesianSamples<'_> {
    type Item = FieldSample;

    fn next(&mut self) -> Option<FieldSample> {
        if self.remaining == 0 {
            return None;
        }
        let grid = &self.sampler.grid;

        let y = self.sampler.xy_at(self.iy);
        let sample = self.sampler.sample_at(self.x, y, self.z);
        self.remaining -= 1;

        self.iy += 1;
        if self.iy > grid.num_points_xy {
            self.iy = 0;
            self.ix += 1;
            if self.ix > grid.num_points_xy {
                self.ix = 0;
                self.iz += 1;
                self.z = self.sampler.z_at(self.iz);
            }
            self.x = self.sampler.xy_at(self.ix);
        }

        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
