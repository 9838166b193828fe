use bytes::Bytes;

/// Configuration for reading field-map files
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Batch size for reading records
    pub batch_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { batch_size: 65536 }
    }
}

/// Source type for the reader (stores path or bytes for re-reading)
pub(super) enum ReaderSource {
    /// File path for file-based reading
    FilePath(std::path::PathBuf),
    /// Whole file held in memory
    InMemory(Bytes),
}
