//! # Field Map Validation
//!
//! Integrity checks for Parquet field maps written by this crate or by any
//! tool that follows the same table layout.
//!
//! ## Validation Checklist
//!
//! 1. **Structure**: the path is a readable Parquet file
//! 2. **Schema Contract**: six non-nullable Float32 columns with units
//! 3. **Metadata Integrity**: footer keys parse into geometry and grid
//! 4. **Data Sanity**: `Bz == 0`, `|B|` is zero or nominal, the row count
//!    matches the grid, and variant-specific layout rules hold
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bmap::validator::validate_field_map_file;
//! use std::path::Path;
//!
//! match validate_field_map_file(Path::new("cylindrical_grid_data.parquet")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

use anyhow::Result;

pub use report::{CheckStage, CheckStatus, RowTally, ValidationCheck, ValidationReport};

mod data;
mod metadata;
mod report;
mod schema;
mod structure;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The path cannot be validated at all
    #[error("Structure error: {0}")]
    StructureError(String),
}

/// Main validation entry point
pub fn validate_field_map_file(path: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    // 1. Structure Check
    let Some(reader) = structure::check_structure(path, &mut report)? else {
        return Ok(report);
    };

    // 2. Schema Contract Check
    report.enter(CheckStage::Schema);
    schema::check_schema_contract(&reader, &mut report);

    // 3. Metadata Integrity Check
    report.enter(CheckStage::Metadata);
    let metadata = metadata::check_metadata_integrity(&reader, &mut report);

    // 4. Data Sanity Check
    if crate::schema::validate_schema(&reader.schema()).is_ok() {
        report.enter(CheckStage::Data);
        data::check_data_sanity(&reader, metadata.as_ref(), &mut report)?;
    }

    Ok(report)
}
