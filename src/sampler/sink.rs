use std::convert::Infallible;

use crate::field::FieldSample;

/// Destination for sampled records.
///
/// Samplers push records in iteration order and never read them back, so a
/// sink is free to stream them straight to storage.
pub trait FieldMapSink {
    /// Error produced when a record cannot be accepted
    type Error;

    /// Append one record.
    fn write_sample(&mut self, sample: &FieldSample) -> Result<(), Self::Error>;

    /// Append a run of records.
    fn write_samples(&mut self, samples: &[FieldSample]) -> Result<(), Self::Error> {
        for sample in samples {
            self.write_sample(sample)?;
        }
        Ok(())
    }
}

/// In-memory sink, mostly useful for small maps and tests.
impl FieldMapSink for Vec<FieldSample> {
    type Error = Infallible;

    fn write_sample(&mut self, sample: &FieldSample) -> Result<(), Self::Error> {
        self.push(*sample);
        Ok(())
    }

    fn write_samples(&mut self, samples: &[FieldSample]) -> Result<(), Self::Error> {
        self.extend_from_slice(samples);
        Ok(())
    }
}

impl<S: FieldMapSink + ?Sized> FieldMapSink for &mut S {
    type Error = S::Error;

    fn write_sample(&mut self, sample: &FieldSample) -> Result<(), Self::Error> {
        (**self).write_sample(sample)
    }

    fn write_samples(&mut self, samples: &[FieldSample]) -> Result<(), Self::Error> {
        (**self).write_samples(samples)
    }
}
