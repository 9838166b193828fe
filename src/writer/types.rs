use crate::field::FieldSample;

/// Columnar buffer of field-map rows.
///
/// One vector per table column. The writer fills it row by row and hands the
/// vectors to Arrow without copying when a batch is flushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBatch {
    /// X positions (mm)
    pub x_mm: Vec<f32>,
    /// Y positions (mm)
    pub y_mm: Vec<f32>,
    /// Z positions (mm)
    pub z_mm: Vec<f32>,
    /// X field components (T)
    pub bx: Vec<f32>,
    /// Y field components (T)
    pub by: Vec<f32>,
    /// Z field components (T)
    pub bz: Vec<f32>,
}

impl SampleBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty batch with room for `capacity` rows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x_mm: Vec::with_capacity(capacity),
            y_mm: Vec::with_capacity(capacity),
            z_mm: Vec::with_capacity(capacity),
            bx: Vec::with_capacity(capacity),
            by: Vec::with_capacity(capacity),
            bz: Vec::with_capacity(capacity),
        }
    }

    /// Append one row
    #[inline]
    pub fn push(&mut self, sample: &FieldSample) {
        self.x_mm.push(sample.x_mm);
        self.y_mm.push(sample.y_mm);
        self.z_mm.push(sample.z_mm);
        self.bx.push(sample.bx);
        self.by.push(sample.by);
        self.bz.push(sample.bz);
    }

    /// Number of rows, taken from the `x_mm` column
    pub fn len(&self) -> usize {
        self.x_mm.len()
    }

    /// Whether the batch holds no rows
    pub fn is_empty(&self) -> bool {
        self.x_mm.is_empty()
    }

    /// Check that every column has as many rows as `x_mm`
    pub fn validate_lengths(&self) -> Result<usize, super::WriterError> {
        let expected = self.x_mm.len();
        let checks = [
            ("y_mm", self.y_mm.len()),
            ("z_mm", self.z_mm.len()),
            ("Bx", self.bx.len()),
            ("By", self.by.len()),
            ("Bz", self.bz.len()),
        ];
        for (name, len) in checks {
            if len != expected {
                return Err(super::WriterError::InvalidData(format!(
                    "Column '{}' has {} elements, expected {} (matching x_mm length)",
                    name, len, expected
                )));
            }
        }
        Ok(expected)
    }

    /// Row `index` as a sample, if in range
    pub fn get(&self, index: usize) -> Option<FieldSample> {
        Some(FieldSample {
            x_mm: *self.x_mm.get(index)?,
            y_mm: *self.y_mm.get(index)?,
            z_mm: *self.z_mm.get(index)?,
            bx: *self.bx.get(index)?,
            by: *self.by.get(index)?,
            bz: *self.bz.get(index)?,
        })
    }
}

impl FromIterator<FieldSample> for SampleBatch {
    fn from_iter<I: IntoIterator<Item = FieldSample>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut batch = Self::with_capacity(iter.size_hint().0);
        for sample in iter {
            batch.push(&sample);
        }
        batch
    }
}

impl<'a> Extend<&'a FieldSample> for SampleBatch {
    fn extend<I: IntoIterator<Item = &'a FieldSample>>(&mut self, iter: I) {
        for sample in iter {
            self.push(sample);
        }
    }
}
