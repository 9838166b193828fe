use std::fs::File;
use std::path::Path;

use bytes::Bytes;
use log::debug;
use parquet::file::reader::SerializedFileReader;

use super::config::ReaderSource;
use super::{FieldMapReader, ReaderConfig, ReaderError};

impl FieldMapReader {
    /// Open a Parquet field map
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open a Parquet field map with custom configuration
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ReaderConfig,
    ) -> Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();
        if path.is_dir() {
            return Err(ReaderError::InvalidFormat(format!(
                "Expected a Parquet file, found a directory: {}",
                path.display()
            )));
        }

        let file = File::open(&path)?;
        let parquet_reader = SerializedFileReader::new(file)?;
        let file_metadata = Self::extract_file_metadata(&parquet_reader)?;
        debug!(
            "Opened {} ({} rows in {} row groups)",
            path.display(),
            file_metadata.total_rows,
            file_metadata.num_row_groups
        );

        Ok(Self {
            source: ReaderSource::FilePath(path),
            config,
            file_metadata,
        })
    }

    /// Read a field map already held in memory
    pub fn from_bytes(bytes: Bytes) -> Result<Self, ReaderError> {
        Self::from_bytes_with_config(bytes, ReaderConfig::default())
    }

    /// Read an in-memory field map with custom configuration
    pub fn from_bytes_with_config(bytes: Bytes, config: ReaderConfig) -> Result<Self, ReaderError> {
        let file_metadata = Self::extract_file_metadata_from_bytes(&bytes)?;

        Ok(Self {
            source: ReaderSource::InMemory(bytes),
            config,
            file_metadata,
        })
    }
}
