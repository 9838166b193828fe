use std::fs::File;

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::config::ReaderSource;
use super::{FieldMapReader, ReaderError};

/// Streaming iterator over record batches
///
/// Batches are decoded on demand, so memory use is bounded by the configured
/// batch size rather than the file size.
pub struct RecordBatchIterator {
    inner: Box<dyn Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send>,
}

impl RecordBatchIterator {
    pub(crate) fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }
}

impl Iterator for RecordBatchIterator {
    type Item = Result<RecordBatch, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|r| r.map_err(ReaderError::from))
    }
}

impl FieldMapReader {
    /// Returns a streaming iterator over record batches
    ///
    /// # Example
    /// ```rust,no_run
    /// use bmap::reader::FieldMapReader;
    ///
    /// let reader = FieldMapReader::open("cylindrical_grid_data.parquet")?;
    /// for batch_result in reader.iter_batches()? {
    ///     let batch = batch_result?;
    ///     println!("Processing batch with {} rows", batch.num_rows());
    /// }
    /// # Ok::<(), bmap::reader::ReaderError>(())
    /// ```
    pub fn iter_batches(&self) -> Result<RecordBatchIterator, ReaderError> {
        match &self.source {
            ReaderSource::FilePath(path) => {
                let file = File::open(path)?;
                let builder = ParquetRecordBatchReaderBuilder::try_new(file)?
                    .with_batch_size(self.config.batch_size);
                let reader = builder.build()?;
                Ok(RecordBatchIterator::new(reader))
            }
            ReaderSource::InMemory(bytes) => {
                let builder = ParquetRecordBatchReaderBuilder::try_new(bytes.clone())?
                    .with_batch_size(self.config.batch_size);
                let reader = builder.build()?;
                Ok(RecordBatchIterator::new(reader))
            }
        }
    }

    /// Read all record batches from the file (eager, collects all batches)
    ///
    /// **Warning**: This loads all data into memory. For large files, prefer `iter_batches()`.
    pub fn read_all_batches(&self) -> Result<Vec<RecordBatch>, ReaderError> {
        self.iter_batches()?.collect()
    }
}
