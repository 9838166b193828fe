use crate::metadata::FieldMapMetadata;
use crate::reader::FieldMapReader;
use crate::schema::{FIELD_MAP_FORMAT_VERSION, KEY_FORMAT_VERSION};

use super::{ValidationCheck, ValidationReport};

/// Step 3: Footer metadata validation
///
/// Returns the parsed metadata so the data checks can use the recorded
/// geometry and grid.
pub(crate) fn check_metadata_integrity(
    reader: &FieldMapReader,
    report: &mut ValidationReport,
) -> Option<FieldMapMetadata> {
    let kv = &reader.metadata().key_value_metadata;

    match kv.get(KEY_FORMAT_VERSION) {
        Some(version) if version == FIELD_MAP_FORMAT_VERSION => {
            report.add_check(ValidationCheck::ok(format!(
                "Format version matches ({})",
                FIELD_MAP_FORMAT_VERSION
            )));
        }
        Some(version) => report.add_check(ValidationCheck::warning(
            "Format version",
            format!("Expected {}, found {}", FIELD_MAP_FORMAT_VERSION, version),
        )),
        None => report.add_check(ValidationCheck::warning(
            "Format version",
            format!("Missing {} in footer", KEY_FORMAT_VERSION),
        )),
    }

    let metadata = match FieldMapMetadata::from_parquet_metadata(kv) {
        Ok(metadata) => metadata,
        Err(e) => {
            report.add_check(ValidationCheck::failed("Footer metadata", e.to_string()));
            return None;
        }
    };
    report.add_check(ValidationCheck::ok(format!(
        "Table name: {}",
        metadata.table_name
    )));

    match &metadata.geometry {
        Some(geometry) => match geometry.validate() {
            Ok(()) => report.add_check(ValidationCheck::ok(format!(
                "Geometry: B = {} T, r = [{}, {}] mm, |z| <= {} mm",
                geometry.field_tesla, geometry.rmin_mm, geometry.rmax_mm, geometry.halflength_mm
            ))),
            Err(e) => report.add_check(ValidationCheck::failed("Geometry", e.to_string())),
        },
        None => report.add_check(ValidationCheck::warning(
            "Geometry",
            "No geometry recorded; field magnitude cannot be checked against it",
        )),
    }

    match &metadata.grid {
        Some(grid) => match grid.validate() {
            Ok(()) => report.add_check(ValidationCheck::ok(format!(
                "Grid: {} ({} records expected)",
                grid.variant_name(),
                grid.expected_records()
            ))),
            Err(e) => report.add_check(ValidationCheck::failed("Grid", e.to_string())),
        },
        None => report.add_check(ValidationCheck::warning(
            "Grid",
            "No grid recorded; row count cannot be checked",
        )),
    }

    match &metadata.created_at {
        Some(created_at) => {
            report.add_check(ValidationCheck::ok(format!("Created at {}", created_at)))
        }
        None => report.add_check(ValidationCheck::warning("Creation time", "Not recorded")),
    }

    Some(metadata)
}
