use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of records written
    pub samples_written: u64,
    /// Number of Arrow record batches handed to the encoder
    pub batches_written: usize,
    /// Number of Parquet row groups written (0 for CSV)
    pub row_groups_written: usize,
    /// Uncompressed column bytes summed over row groups, as reported by the
    /// Parquet footer. This is not the on-disk size. 0 for CSV.
    pub uncompressed_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} samples in {} batches ({} row groups",
            self.samples_written, self.batches_written, self.row_groups_written
        )?;
        if self.uncompressed_bytes > 0 {
            write!(f, ", {} bytes uncompressed", self.uncompressed_bytes)?;
        }
        write!(f, ")")
    }
}
