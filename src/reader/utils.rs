use arrow::array::Float32Array;
use arrow::record_batch::RecordBatch;

use super::ReaderError;

/// Get a required Float32 column by name.
pub(super) fn get_float32_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float32Array, ReaderError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<Float32Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not Float32", name)))
}
