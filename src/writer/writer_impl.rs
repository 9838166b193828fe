use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float32Array};
use arrow::buffer::ScalarBuffer;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ArrowWriter;

use crate::field::FieldSample;
use crate::metadata::FieldMapMetadata;
use crate::sampler::FieldMapSink;
use crate::schema::create_field_map_schema_arc;

use super::config::WriterConfig;
use super::error::WriterError;
use super::stats::WriterStats;
use super::types::SampleBatch;

/// Streaming writer for Parquet field maps.
///
/// Rows accumulate in a columnar buffer of `batch_size` rows; each full buffer
/// is encoded as one Arrow record batch. Rows still buffered when the writer
/// is dropped are lost, so always call [`finish`](Self::finish).
pub struct FieldMapWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: Arc<Schema>,
    buffer: SampleBatch,
    batch_size: usize,
    samples_written: u64,
    batches_written: usize,
}

impl FieldMapWriter<File> {
    /// Create a new writer to a file path, replacing any existing file
    pub fn new_file<P: AsRef<Path>>(
        path: P,
        metadata: &FieldMapMetadata,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Self::new(file, metadata, config)
    }
}

impl<W: Write + Send> FieldMapWriter<W> {
    /// Create a new writer to any Write implementation
    pub fn new(
        writer: W,
        metadata: &FieldMapMetadata,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let schema = create_field_map_schema_arc();
        let parquet_metadata = metadata.to_parquet_metadata()?;
        let props = config.to_writer_properties(&parquet_metadata);

        let arrow_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;
        let batch_size = config.batch_size.max(1);

        Ok(Self {
            writer: arrow_writer,
            schema,
            buffer: SampleBatch::with_capacity(batch_size),
            batch_size,
            samples_written: 0,
            batches_written: 0,
        })
    }

    /// Convert an owned Vec<f32> to an Arrow Float32Array via zero-copy pointer transfer.
    #[inline]
    fn vec_to_f32_array(data: Vec<f32>) -> ArrayRef {
        let buffer = ScalarBuffer::from(data);
        Arc::new(Float32Array::new(buffer, None))
    }

    /// Encode a complete columnar batch.
    fn write_owned(&mut self, batch: SampleBatch) -> Result<(), WriterError> {
        let rows = batch.validate_lengths()?;
        if rows == 0 {
            return Ok(());
        }

        let arrays: Vec<ArrayRef> = vec![
            Self::vec_to_f32_array(batch.x_mm),
            Self::vec_to_f32_array(batch.y_mm),
            Self::vec_to_f32_array(batch.z_mm),
            Self::vec_to_f32_array(batch.bx),
            Self::vec_to_f32_array(batch.by),
            Self::vec_to_f32_array(batch.bz),
        ];

        let record_batch = RecordBatch::try_new(self.schema.clone(), arrays)?;
        self.writer.write(&record_batch)?;

        self.samples_written += rows as u64;
        self.batches_written += 1;
        debug!(
            "Flushed batch {} ({} rows, {} total)",
            self.batches_written, rows, self.samples_written
        );

        Ok(())
    }

    /// Encode whatever is buffered.
    fn flush_buffer(&mut self) -> Result<(), WriterError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let batch = std::mem::replace(&mut self.buffer, SampleBatch::with_capacity(self.batch_size));
        self.write_owned(batch)
    }

    /// Append one row
    pub fn write_sample(&mut self, sample: &FieldSample) -> Result<(), WriterError> {
        self.buffer.push(sample);
        if self.buffer.len() >= self.batch_size {
            self.flush_buffer()?;
        }
        Ok(())
    }

    /// Append a run of rows
    pub fn write_samples(&mut self, samples: &[FieldSample]) -> Result<(), WriterError> {
        for sample in samples {
            self.write_sample(sample)?;
        }
        Ok(())
    }

    /// Write a pre-built columnar batch.
    ///
    /// Buffered rows are flushed first so table order is preserved.
    ///
    /// # Errors
    ///
    /// Returns `WriterError::InvalidData` if the column lengths differ.
    pub fn write_batch(&mut self, batch: SampleBatch) -> Result<(), WriterError> {
        batch.validate_lengths()?;
        self.flush_buffer()?;
        self.write_owned(batch)
    }

    /// Rows accepted so far, buffered rows included
    pub fn samples_written(&self) -> u64 {
        self.samples_written + self.buffer.len() as u64
    }

    /// Flush any buffered data and finalize the file
    pub fn finish(mut self) -> Result<WriterStats, WriterError> {
        self.flush_buffer()?;
        let file_metadata = self.writer.close()?;

        Ok(WriterStats {
            samples_written: self.samples_written,
            batches_written: self.batches_written,
            row_groups_written: file_metadata.row_groups.len(),
            uncompressed_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size as u64)
                .sum(),
        })
    }

    /// Finalize and return the inner writer (for buffer extraction)
    pub fn finish_into_inner(mut self) -> Result<W, WriterError> {
        self.flush_buffer()?;
        let writer = self.writer.into_inner()?;
        Ok(writer)
    }

    /// Get current statistics
    pub fn stats(&self) -> WriterStats {
        WriterStats {
            samples_written: self.samples_written(),
            batches_written: self.batches_written,
            row_groups_written: 0, // Unknown until finish
            uncompressed_bytes: 0, // Unknown until finish
        }
    }
}

impl<W: Write + Send> FieldMapSink for FieldMapWriter<W> {
    type Error = WriterError;

    fn write_sample(&mut self, sample: &FieldSample) -> Result<(), WriterError> {
        FieldMapWriter::write_sample(self, sample)
    }

    fn write_samples(&mut self, samples: &[FieldSample]) -> Result<(), WriterError> {
        FieldMapWriter::write_samples(self, samples)
    }
}
