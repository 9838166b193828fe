use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::field::FieldSample;
use crate::sampler::FieldMapSink;
use crate::schema::columns;

use super::error::WriterError;
use super::stats::WriterStats;

/// Streaming writer for CSV field maps.
///
/// Writes a header row with the table's column names followed by one line
/// per sample. There is no footer, so geometry and grid are not recorded.
pub struct CsvFieldMapWriter<W: Write> {
    writer: csv::Writer<W>,
    samples_written: u64,
}

impl CsvFieldMapWriter<File> {
    /// Create a new writer to a file path, replacing any existing file
    pub fn new_file<P: AsRef<Path>>(path: P) -> Result<Self, WriterError> {
        let file = File::create(path)?;
        Self::new(file)
    }
}

impl<W: Write> CsvFieldMapWriter<W> {
    /// Create a new writer and emit the header row
    pub fn new(writer: W) -> Result<Self, WriterError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(columns::ALL)?;

        Ok(Self {
            writer,
            samples_written: 0,
        })
    }

    /// Append one row
    pub fn write_sample(&mut self, sample: &FieldSample) -> Result<(), WriterError> {
        self.writer.serialize(sample)?;
        self.samples_written += 1;
        Ok(())
    }

    /// Rows written so far
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Flush and return statistics
    pub fn finish(self) -> Result<WriterStats, WriterError> {
        let samples_written = self.samples_written;
        self.finish_into_inner()?;
        Ok(WriterStats {
            samples_written,
            ..WriterStats::default()
        })
    }

    /// Flush and return the inner writer
    pub fn finish_into_inner(self) -> Result<W, WriterError> {
        self.writer
            .into_inner()
            .map_err(|e| WriterError::IoError(e.into_error()))
    }
}

impl<W: Write> FieldMapSink for CsvFieldMapWriter<W> {
    type Error = WriterError;

    fn write_sample(&mut self, sample: &FieldSample) -> Result<(), WriterError> {
        CsvFieldMapWriter::write_sample(self, sample)
    }
}
