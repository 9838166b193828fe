use std::f64::consts::TAU;

use crate::field::{toroidal_field, FieldSample};
use crate::geometry::{CylindricalGrid, DetectorGeometry, SamplingGrid};

use super::{axis_value, FieldMapSampler, SamplerError};

/// Which shell a cylindrical sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellPass {
    /// `rmin <= r < rmax`, `0 <= z < halflength`
    Barrel,
    /// `r_endcap_min <= r < rmin`, `z_endcap_min <= z < halflength`
    Endcap,
}

/// Samples the field on barrel and endcap shells of an r/θ/z grid.
///
/// A single count `n` sets the resolution of every axis. Each sample at `+z`
/// is followed by a copy at `-z` carrying the same field, so the map only
/// walks the positive half of the detector.
///
/// - Barrel: `n` values each of z in `[0, halflength)`, r in `[rmin, rmax)`
///   and θ in `[0, 2π)`.
/// - Endcap: `n` values of z in `[z_endcap_min, halflength)`, `n - 1` values
///   of r in `[r_endcap_min, rmin)`, θ as in the barrel. Stopping short of
///   `rmin` keeps the shells from sharing a radius.
#[derive(Debug, Clone)]
pub struct CylindricalSampler {
    geometry: DetectorGeometry,
    grid: CylindricalGrid,
}

impl CylindricalSampler {
    /// Create a sampler, rejecting a zero grid count and degenerate geometry.
    pub fn new(geometry: DetectorGeometry, grid: CylindricalGrid) -> Result<Self, SamplerError> {
        geometry.validate_endcap()?;
        grid.validate()?;
        Ok(Self { geometry, grid })
    }

    /// Grid resolution
    pub fn cylindrical_grid(&self) -> &CylindricalGrid {
        &self.grid
    }

    /// Number of radial values in `pass`.
    fn radial_count(&self, pass: ShellPass) -> usize {
        match pass {
            ShellPass::Barrel => self.grid.num_points,
            ShellPass::Endcap => self.grid.num_points - 1,
        }
    }

    fn z_at(&self, pass: ShellPass, iz: usize) -> f64 {
        let g = &self.geometry;
        match pass {
            ShellPass::Barrel => axis_value(0.0, g.halflength_mm, iz, self.grid.num_points),
            ShellPass::Endcap => axis_value(
                g.z_endcap_min_mm,
                g.halflength_mm - g.z_endcap_min_mm,
                iz,
                self.grid.num_points,
            ),
        }
    }

    fn r_at(&self, pass: ShellPass, ir: usize) -> f64 {
        let g = &self.geometry;
        match pass {
            ShellPass::Barrel => {
                axis_value(g.rmin_mm, g.rmax_mm - g.rmin_mm, ir, self.grid.num_points)
            }
            ShellPass::Endcap => axis_value(
                g.r_endcap_min_mm,
                g.rmin_mm - g.r_endcap_min_mm,
                ir,
                self.grid.num_points - 1,
            ),
        }
    }

    fn theta_at(&self, it: usize) -> f64 {
        axis_value(0.0, TAU, it, self.grid.num_points)
    }

    /// Evaluate the grid point at cylindrical coordinates `(r, θ, z)`.
    pub fn sample_at(&self, r: f64, theta: f64, z: f64) -> FieldSample {
        let (sin, cos) = theta.sin_cos();
        let x = r * cos;
        let y = r * sin;
        FieldSample::new(x, y, z, toroidal_field(x, y, self.geometry.field_tesla))
    }
}

impl FieldMapSampler for CylindricalSampler {
    type Samples<'a> = CylindricalSamples<'a>;

    fn geometry(&self) -> &DetectorGeometry {
        &self.geometry
    }

    fn grid(&self) -> SamplingGrid {
        SamplingGrid::Cylindrical(self.grid)
    }

    fn samples(&self) -> CylindricalSamples<'_> {
        CylindricalSamples {
            sampler: self,
            pass: Some(ShellPass::Barrel),
            iz: 0,
            ir: 0,
            it: 0,
            mirror: None,
            remaining: self.grid.expected_records(),
        }
    }
}

/// Iterator over the records of a [`CylindricalSampler`].
///
/// Yields the barrel pass, then the endcap pass; within a pass z is outermost
/// and θ innermost, and every record is immediately followed by its `-z`
/// mirror.
#[derive(Debug, Clone)]
pub struct CylindricalSamples<'a> {
    sampler: &'a CylindricalSampler,
    pass: Option<ShellPass>,
    iz: usize,
    ir: usize,
    it: usize,
    mirror: Option<FieldSample>,
    remaining: u64,
}

impl CylindricalSamples<'_> {
    /// Pass currently being walked, `None` once both are exhausted.
    pub fn pass(&self) -> Option<ShellPass> {
        self.pass
    }

    /// Move `pass` forward until it has a non-empty radial axis.
    fn settle_pass(&mut self) {
        while let Some(pass) = self.pass {
            if self.sampler.radial_count(pass) > 0 {
                return;
            }
            self.pass = match pass {
                ShellPass::Barrel => Some(ShellPass::Endcap),
                ShellPass::Endcap => None,
            };
        }
    }

    fn advance(&mut self, pass: ShellPass) {
        let n = self.sampler.grid.num_points;
        self.it += 1;
        if self.it < n {
            return;
        }
        self.it = 0;
        self.ir += 1;
        if self.ir < self.sampler.radial_count(pass) {
            return;
        }
        self.ir = 0;
        self.iz += 1;
        if self.iz < n {
            return;
        }
        self.iz = 0;
        self.pass = match pass {
            ShellPass::Barrel => Some(ShellPass::Endcap),
            ShellPass::Endcap => None,
        };
    }
}

impl Iterator for CylindricalSamples<'_> {
    type Item = FieldSample;

    fn next(&mut self) -> Option<FieldSample> {
        if let Some(mirror) = self.mirror.take() {
            self.remaining -= 1;
            return Some(mirror);
        }

        self.settle_pass();
        let pass = self.pass?;

        let sampler = self.sampler;
        let sample = sampler.sample_at(
            sampler.r_at(pass, self.ir),
            sampler.theta_at(self.it),
            sampler.z_at(pass, self.iz),
        );
        self.advance(pass);

        self.mirror = Some(sample.mirrored_z());
        self.remaining -= 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(n: usize) -> CylindricalSampler {
        CylindricalSampler::new(DetectorGeometry::default(), CylindricalGrid { num_points: n })
            .unwrap()
    }

    #[test]
    fn test_barrel_pass_count_for_two_points() {
        let sampler = sampler(2);
        let samples: Vec<_> = sampler.samples().collect();
        assert_eq!(samples.len(), 24);

        let barrel = samples
            .iter()
            .filter(|s| s.radius_mm() >= 4100.0 - 1e-2)
            .count();
        assert_eq!(barrel, 16);
    }

    #[test]
    fn test_record_count_matches_closed_form() {
        for n in [1, 2, 3, 5, 8] {
            let sampler = sampler(n);
            assert_eq!(
                sampler.samples().count() as u64,
                sampler.expected_records(),
                "n = {}",
                n
            );
        }
    }

    #[test]
    fn test_single_point_grid_has_no_endcap() {
        let sampler = sampler(1);
        let samples: Vec<_> = sampler.samples().collect();
        assert_eq!(samples.len(), 2);
        assert_eq!((samples[0].x_mm, samples[0].y_mm), (4100.0, 0.0));
        assert_eq!(samples[0].z_mm, 0.0);
        assert_eq!(samples[1].z_mm, 0.0);
    }

    #[test]
    fn test_every_sample_is_followed_by_its_mirror() {
        let sampler = sampler(4);
        let samples: Vec<_> = sampler.samples().collect();
        for pair in samples.chunks(2) {
            assert_eq!(pair[1].z_mm, -pair[0].z_mm);
            assert_eq!((pair[1].x_mm, pair[1].y_mm), (pair[0].x_mm, pair[0].y_mm));
            assert_eq!((pair[1].bx, pair[1].by), (pair[0].bx, pair[0].by));
        }
    }

    #[test]
    fn test_barrel_axes() {
        let sampler = sampler(4);
        let barrel: Vec<_> = sampler.samples().step_by(2).take(64).collect();

        // z in [0, halflength): 0, 2000, 4000, 6000
        let mut z: Vec<f32> = barrel.iter().map(|s| s.z_mm).collect();
        z.dedup();
        assert_eq!(z, vec![0.0, 2000.0, 4000.0, 6000.0]);

        // r in [rmin, rmax): 4100, 4975, 5850, 6725
        let radii: Vec<f32> = barrel.iter().take(16).step_by(4).map(|s| s.radius_mm()).collect();
        for (r, expected) in radii.iter().zip([4100.0f32, 4975.0, 5850.0, 6725.0]) {
            assert!((r - expected).abs() < 1e-2, "{} vs {}", r, expected);
        }
    }

    #[test]
    fn test_endcap_axes_exclude_rmin() {
        let sampler = sampler(4);
        let endcap: Vec<_> = sampler.samples().skip(128).step_by(2).collect();
        assert_eq!(endcap.len(), 48);

        for s in &endcap {
            assert!(s.z_mm >= 4570.0 && s.z_mm < 8000.0);
            let r = s.radius_mm();
            assert!(r >= 445.0 - 1e-2 && r < 4100.0 - 1.0, "r = {}", r);
        }

        // three radial values: 445, 445 + 3655/3, 445 + 2 * 3655/3
        let step = (4100.0 - 445.0) / 3.0;
        let r_last = endcap[11].radius_mm() as f64;
        assert!((r_last - (445.0 + 2.0 * step)).abs() < 1e-2);
    }

    #[test]
    fn test_field_magnitude_constant() {
        let sampler = sampler(5);
        for s in sampler.samples() {
            assert_eq!(s.bz, 0.0);
            assert!((s.field_magnitude() - 5.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_pass_tracking() {
        let sampler = sampler(2);
        let mut iter = sampler.samples();
        assert_eq!(iter.pass(), Some(ShellPass::Barrel));
        for _ in 0..16 {
            iter.next();
        }
        iter.next();
        assert_eq!(iter.pass(), Some(ShellPass::Endcap));
        assert_eq!(iter.by_ref().count(), 7);
        assert_eq!(iter.pass(), None);
    }

    #[test]
    fn test_invalid_endcap_geometry_rejected() {
        let geometry = DetectorGeometry {
            r_endcap_min_mm: 4100.0,
            ..Default::default()
        };
        let result = CylindricalSampler::new(geometry, CylindricalGrid { num_points: 3 });
        assert!(matches!(result, Err(SamplerError::InvalidGeometry(_))));
    }
}
