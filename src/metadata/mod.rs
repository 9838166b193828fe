//! # Field-Map Metadata
//!
//! Provenance stored alongside the sampled table: the table name and title,
//! the detector geometry, the sampling variant with its grid resolution, and
//! when and by what the map was generated.
//!
//! Parquet outputs embed this in the footer's key-value metadata under
//! `bmap:*` keys, with structured values JSON-encoded, so a map can be
//! re-validated without knowing the command line that produced it.

mod error;
mod field_map;


pub use error::MetadataError;
pub use field_map::FieldMapMetadata;
