use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::Schema;
use bytes::Bytes;
use log::warn;
use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::metadata::FieldMapMetadata;
use crate::schema::KEY_FORMAT_VERSION;

use super::{FieldMapReader, ReaderError};

/// Metadata extracted from a field-map file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Format version string
    pub format_version: String,
    /// Total number of rows (samples) in the file
    pub total_rows: i64,
    /// Number of row groups
    pub num_row_groups: usize,
    /// Schema of the Parquet file
    pub schema: Arc<Schema>,
    /// Raw key-value metadata from Parquet footer
    pub key_value_metadata: HashMap<String, String>,
    /// Parsed field-map metadata (if available)
    pub field_map_metadata: Option<FieldMapMetadata>,
}

impl FieldMapReader {
    /// Extract metadata from a Parquet reader
    pub(super) fn extract_file_metadata<R: parquet::file::reader::ChunkReader + 'static>(
        reader: &SerializedFileReader<R>,
    ) -> Result<FileMetadata, ReaderError> {
        let parquet_metadata = reader.metadata();
        let file_meta = parquet_metadata.file_metadata();
        let schema = parquet::arrow::parquet_to_arrow_schema(
            file_meta.schema_descr(),
            file_meta.key_value_metadata(),
        )?;

        let mut kv_metadata = HashMap::new();
        if let Some(kv_list) = file_meta.key_value_metadata() {
            for kv in kv_list {
                if let Some(value) = &kv.value {
                    kv_metadata.insert(kv.key.clone(), value.clone());
                }
            }
        }

        let format_version = kv_metadata
            .get(KEY_FORMAT_VERSION)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        // Files from other tools have no bmap keys; keep the raw map in that case.
        let field_map_metadata = match FieldMapMetadata::from_parquet_metadata(&kv_metadata) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!("No usable field-map metadata in footer: {}", e);
                None
            }
        };

        let total_rows: i64 = (0..parquet_metadata.num_row_groups())
            .map(|i| parquet_metadata.row_group(i).num_rows())
            .sum();

        Ok(FileMetadata {
            format_version,
            total_rows,
            num_row_groups: parquet_metadata.num_row_groups(),
            schema: Arc::new(schema),
            key_value_metadata: kv_metadata,
            field_map_metadata,
        })
    }

    /// Extract metadata from Bytes
    pub(super) fn extract_file_metadata_from_bytes(
        bytes: &Bytes,
    ) -> Result<FileMetadata, ReaderError> {
        let reader = SerializedFileReader::new(bytes.clone())?;
        Self::extract_file_metadata(&reader)
    }

    /// Get file metadata
    pub fn metadata(&self) -> &FileMetadata {
        &self.file_metadata
    }

    /// Get the total number of samples (rows) in the file
    pub fn total_samples(&self) -> i64 {
        self.file_metadata.total_rows
    }

    /// Get the Arrow schema
    pub fn schema(&self) -> Arc<Schema> {
        Arc::clone(&self.file_metadata.schema)
    }

    /// Parsed footer metadata, or an error naming what is missing
    pub fn field_map_metadata(&self) -> Result<FieldMapMetadata, ReaderError> {
        match &self.file_metadata.field_map_metadata {
            Some(metadata) => Ok(metadata.clone()),
            None => Ok(FieldMapMetadata::from_parquet_metadata(
                &self.file_metadata.key_value_metadata,
            )?),
        }
    }
}
