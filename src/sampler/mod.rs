//! # Field Samplers
//!
//! Two grid walks over the detector region, both evaluating
//! [`toroidal_field`](crate::field::toroidal_field) at every point:
//!
//! - [`CartesianSampler`]: a full x/y square of half-width `rmax` on each of
//!   `num_points_z + 1` z planes, with the field zeroed inside the bore.
//! - [`CylindricalSampler`]: barrel and endcap shells on an r/θ/z grid, each
//!   sample followed by its mirror image at `-z`.
//!
//! Samplers are lazy. [`FieldMapSampler::samples`] yields records in table
//! order, and [`FieldMapSampler::sample_into`] streams them into any
//! [`FieldMapSink`] without materializing the full map.
//!
//! ```
//! use bmap::geometry::{CylindricalGrid, DetectorGeometry};
//! use bmap::sampler::{CylindricalSampler, FieldMapSampler};
//!
//! let sampler = CylindricalSampler::new(
//!     DetectorGeometry::default(),
//!     CylindricalGrid { num_points: 4 },
//! )?;
//!
//! let mut records = Vec::new();
//! let written = sampler.sample_into(&mut records).unwrap();
//! assert_eq!(written, sampler.expected_records());
//! # Ok::<(), bmap::sampler::SamplerError>(())
//! ```

use log::{debug, info};

use crate::field::FieldSample;
use crate::geometry::{DetectorGeometry, SamplingGrid};

mod cartesian;
mod cylindrical;
mod error;
mod sink;

pub use cartesian::{CartesianSampler, CartesianSamples};
pub use cylindrical::{CylindricalSampler, CylindricalSamples, ShellPass};
pub use error::SamplerError;
pub use sink::FieldMapSink;

/// Records handed to a sink per `write_samples` call.
const SINK_CHUNK: usize = 4096;

/// A grid walk producing field-map records.
pub trait FieldMapSampler {
    /// Lazy iterator over the records, in table order
    type Samples<'a>: Iterator<Item = FieldSample>
    where
        Self: 'a;

    /// Region being sampled
    fn geometry(&self) -> &DetectorGeometry;

    /// Variant and resolution of the walk
    fn grid(&self) -> SamplingGrid;

    /// Iterate over every record of the map.
    fn samples(&self) -> Self::Samples<'_>;

    /// Closed-form number of records [`samples`](Self::samples) yields.
    fn expected_records(&self) -> u64 {
        self.grid().expected_records()
    }

    /// Stream every record into `sink`, returning the number written.
    fn sample_into<S: FieldMapSink + ?Sized>(&self, sink: &mut S) -> Result<u64, S::Error> {
        let grid = self.grid();
        info!(
            "Sampling {} field map: {} records expected",
            grid.variant_name(),
            grid.expected_records()
        );

        let mut written = 0u64;
        let mut chunk = Vec::with_capacity(SINK_CHUNK);
        for sample in self.samples() {
            chunk.push(sample);
            if chunk.len() == SINK_CHUNK {
                sink.write_samples(&chunk)?;
                written += chunk.len() as u64;
                chunk.clear();
            }
        }
        if !chunk.is_empty() {
            sink.write_samples(&chunk)?;
            written += chunk.len() as u64;
        }

        debug!("Sampling finished after {} records", written);
        Ok(written)
    }
}

/// Value at `index` on an axis splitting `span` into `intervals` equal steps.
///
/// Scales before dividing so that grid points landing on round values
/// (the axis origin in particular) come out exact.
#[inline]
fn axis_value(start: f64, span: f64, index: usize, intervals: usize) -> f64 {
    start + (index as f64 * span) / intervals as f64
}
