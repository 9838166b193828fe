use std::path::Path;

use anyhow::Result;

use crate::reader::FieldMapReader;
use crate::schema::PARQUET_EXTENSION;

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Step 1: Structure validation
///
/// Returns the opened reader, or `None` when the file is not readable Parquet.
pub(crate) fn check_structure(
    path: &Path,
    report: &mut ValidationReport,
) -> Result<Option<FieldMapReader>> {
    if !path.exists() {
        report.add_check(ValidationCheck::failed(
            "Path exists",
            format!("Path does not exist: {}", path.display()),
        ));
        anyhow::bail!(ValidationError::StructureError("Path does not exist".to_string()));
    }
    report.add_check(ValidationCheck::ok("Path exists"));

    if !path.is_file() {
        report.add_check(ValidationCheck::failed(
            "Regular file",
            "Path is not a regular file",
        ));
        return Ok(None);
    }

    let has_parquet_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(PARQUET_EXTENSION))
        .unwrap_or(false);
    if has_parquet_extension {
        report.add_check(ValidationCheck::ok("File extension (.parquet)"));
    } else {
        report.add_check(ValidationCheck::warning(
            "File extension",
            format!("Expected .{} extension", PARQUET_EXTENSION),
        ));
    }

    match FieldMapReader::open(path) {
        Ok(reader) => {
            report.add_check(ValidationCheck::ok(format!(
                "Parquet footer readable ({} row groups)",
                reader.metadata().num_row_groups
            )));
            Ok(Some(reader))
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                "Parquet footer readable",
                e.to_string(),
            ));
            Ok(None)
        }
    }
}
