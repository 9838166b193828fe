use arrow::array::{Array, Float32Array};
use arrow::record_batch::RecordBatch;

use crate::field::FieldSample;
use crate::schema::columns;

use super::batches::RecordBatchIterator;
use super::utils::get_float32_column;
use super::{FieldMapReader, ReaderError};

/// The six columns of one decoded batch.
struct SampleColumns {
    x_mm: Float32Array,
    y_mm: Float32Array,
    z_mm: Float32Array,
    bx: Float32Array,
    by: Float32Array,
    bz: Float32Array,
}

impl SampleColumns {
    fn from_batch(batch: &RecordBatch) -> Result<Self, ReaderError> {
        Ok(Self {
            x_mm: get_float32_column(batch, columns::X_MM)?.clone(),
            y_mm: get_float32_column(batch, columns::Y_MM)?.clone(),
            z_mm: get_float32_column(batch, columns::Z_MM)?.clone(),
            bx: get_float32_column(batch, columns::BX)?.clone(),
            by: get_float32_column(batch, columns::BY)?.clone(),
            bz: get_float32_column(batch, columns::BZ)?.clone(),
        })
    }

    fn len(&self) -> usize {
        self.x_mm.len()
    }

    fn row(&self, i: usize) -> FieldSample {
        FieldSample {
            x_mm: self.x_mm.value(i),
            y_mm: self.y_mm.value(i),
            z_mm: self.z_mm.value(i),
            bx: self.bx.value(i),
            by: self.by.value(i),
            bz: self.bz.value(i),
        }
    }
}

/// Streaming iterator over the rows of a field map, in file order
pub struct SampleIterator {
    batches: RecordBatchIterator,
    current: Option<SampleColumns>,
    row: usize,
}

impl Iterator for SampleIterator {
    type Item = Result<FieldSample, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(columns) = &self.current {
                if self.row < columns.len() {
                    let sample = columns.row(self.row);
                    self.row += 1;
                    return Some(Ok(sample));
                }
            }

            let batch = match self.batches.next()? {
                Ok(batch) => batch,
                Err(e) => return Some(Err(e)),
            };
            match SampleColumns::from_batch(&batch) {
                Ok(columns) => {
                    self.current = Some(columns);
                    self.row = 0;
                }
                Err(e) => {
                    self.current = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl FieldMapReader {
    /// Stream the map row by row
    pub fn iter_samples(&self) -> Result<SampleIterator, ReaderError> {
        Ok(SampleIterator {
            batches: self.iter_batches()?,
            current: None,
            row: 0,
        })
    }

    /// Read every row into memory
    pub fn read_samples(&self) -> Result<Vec<FieldSample>, ReaderError> {
        self.iter_samples()?.collect()
    }
}
