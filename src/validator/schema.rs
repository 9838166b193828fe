use arrow::datatypes::DataType;

use crate::reader::FieldMapReader;
use crate::schema::{columns, create_field_map_schema, validate_schema, KEY_UNIT};

use super::{ValidationCheck, ValidationReport};

/// Step 2: Schema contract validation
pub(crate) fn check_schema_contract(reader: &FieldMapReader, report: &mut ValidationReport) {
    let schema = reader.schema();

    for name in columns::ALL {
        match schema.field_with_name(name) {
            Err(_) => report.add_check(ValidationCheck::failed(
                format!("Required column: {}", name),
                format!("Column '{}' is missing", name),
            )),
            Ok(field) if field.data_type() != &DataType::Float32 => {
                report.add_check(ValidationCheck::failed(
                    format!("Column type: {}", name),
                    format!("Expected Float32, found {:?}", field.data_type()),
                ))
            }
            Ok(field) if field.is_nullable() => report.add_check(ValidationCheck::warning(
                format!("Column: {}", name),
                "Column is nullable",
            )),
            Ok(_) => report.add_check(ValidationCheck::ok(format!("Column: {}", name))),
        }
    }

    if validate_schema(&schema).is_ok() {
        let actual: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        if actual == columns::ALL {
            report.add_check(ValidationCheck::ok("Column order"));
        } else {
            report.add_check(ValidationCheck::warning(
                "Column order",
                format!("Expected {:?}, found {:?}", columns::ALL, actual),
            ));
        }
    }

    // Units are advisory; files written without the Arrow schema lose them.
    let expected = create_field_map_schema();
    for name in columns::ALL {
        let (Ok(field), Ok(expected_field)) =
            (schema.field_with_name(name), expected.field_with_name(name))
        else {
            continue;
        };
        let Some(expected_unit) = expected_field.metadata().get(KEY_UNIT) else {
            continue;
        };

        match field.metadata().get(KEY_UNIT) {
            Some(unit) if unit == expected_unit => report.add_check(ValidationCheck::ok(format!(
                "Unit for {}: {}",
                name, expected_unit
            ))),
            Some(unit) => report.add_check(ValidationCheck::warning(
                format!("Unit for {}", name),
                format!("Expected {}, found {}", expected_unit, unit),
            )),
            None => report.add_check(ValidationCheck::warning(
                format!("Unit for {}", name),
                format!("Missing unit annotation (expected {})", expected_unit),
            )),
        }
    }
}
