use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geometry::{DetectorGeometry, SamplingGrid};
use crate::sampler::FieldMapSampler;
use crate::schema::{DEFAULT_TABLE_NAME, DEFAULT_TABLE_TITLE};

use super::MetadataError;

/// Complete metadata container for a field-map file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapMetadata {
    /// Name of the table
    pub table_name: String,

    /// Human-readable title
    pub title: String,

    /// Sampled region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<DetectorGeometry>,

    /// Sampling variant and resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<SamplingGrid>,

    /// When the map was generated; filled in at write time when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Software that produced the map
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
}

impl Default for FieldMapMetadata {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            title: DEFAULT_TABLE_TITLE.to_string(),
            geometry: None,
            grid: None,
            created_at: None,
            generator: None,
        }
    }
}

impl FieldMapMetadata {
    /// Create a metadata container with the default table name and title
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe the map a sampler is about to produce
    pub fn for_sampler<S: FieldMapSampler + ?Sized>(sampler: &S) -> Self {
        Self {
            geometry: Some(*sampler.geometry()),
            grid: Some(sampler.grid()),
            generator: Some(generator_info()),
            ..Self::default()
        }
    }

    /// Number of rows the recorded grid produces, if a grid is recorded
    pub fn expected_records(&self) -> Option<u64> {
        self.grid.as_ref().map(SamplingGrid::expected_records)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert all metadata to a HashMap suitable for Parquet key_value_metadata
    pub fn to_parquet_metadata(&self) -> Result<HashMap<String, String>, MetadataError> {
        use crate::schema::*;

        let mut metadata = HashMap::new();

        metadata.insert(
            KEY_FORMAT_VERSION.to_string(),
            FIELD_MAP_FORMAT_VERSION.to_string(),
        );
        metadata.insert(KEY_TABLE_NAME.to_string(), self.table_name.clone());
        metadata.insert(KEY_TABLE_TITLE.to_string(), self.title.clone());

        let created_at = self.created_at.unwrap_or_else(Utc::now);
        metadata.insert(KEY_CREATED_AT.to_string(), created_at.to_rfc3339());

        metadata.insert(
            KEY_GENERATOR.to_string(),
            self.generator.clone().unwrap_or_else(generator_info),
        );

        if let Some(ref geometry) = self.geometry {
            metadata.insert(KEY_GEOMETRY.to_string(), serde_json::to_string(geometry)?);
        }

        if let Some(ref grid) = self.grid {
            metadata.insert(KEY_GRID.to_string(), serde_json::to_string(grid)?);
        }

        Ok(metadata)
    }

    /// Reconstruct metadata from Parquet key_value_metadata
    pub fn from_parquet_metadata(
        metadata: &HashMap<String, String>,
    ) -> Result<Self, MetadataError> {
        use crate::schema::*;

        let table_name = metadata
            .get(KEY_TABLE_NAME)
            .cloned()
            .ok_or_else(|| MetadataError::MissingKey(KEY_TABLE_NAME.to_string()))?;

        let mut result = Self {
            table_name,
            ..Self::default()
        };

        if let Some(title) = metadata.get(KEY_TABLE_TITLE) {
            result.title = title.clone();
        }

        if let Some(json) = metadata.get(KEY_GEOMETRY) {
            result.geometry = Some(serde_json::from_str(json)?);
        }

        if let Some(json) = metadata.get(KEY_GRID) {
            result.grid = Some(serde_json::from_str(json)?);
        }

        if let Some(value) = metadata.get(KEY_CREATED_AT) {
            let parsed = DateTime::parse_from_rfc3339(value).map_err(|source| {
                MetadataError::InvalidTimestamp {
                    value: value.clone(),
                    source,
                }
            })?;
            result.created_at = Some(parsed.with_timezone(&Utc));
        }

        result.generator = metadata.get(KEY_GENERATOR).cloned();

        Ok(result)
    }
}

fn generator_info() -> String {
    format!("bmap v{}", env!("CARGO_PKG_VERSION"))
}
