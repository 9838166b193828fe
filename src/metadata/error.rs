/// Errors that can occur during metadata processing
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A required key is absent from the Parquet footer
    #[error("Missing metadata key: {0}")]
    MissingKey(String),

    /// A timestamp could not be parsed
    #[error("Invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        /// Raw value found in the footer
        value: String,
        /// Underlying parse error
        source: chrono::ParseError,
    },
}
