use arrow::datatypes::{DataType, Schema};

use super::columns;

/// Validates that a schema is compatible with the field-map format.
///
/// Returns `Ok(())` if the schema contains all six columns as Float32,
/// or an error describing the incompatibility.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaValidationError> {
    for name in columns::ALL {
        match schema.field_with_name(name) {
            Ok(field) => {
                if field.data_type() != &DataType::Float32 {
                    return Err(SchemaValidationError::TypeMismatch {
                        column: name.to_string(),
                        expected: format!("{:?}", DataType::Float32),
                        found: format!("{:?}", field.data_type()),
                    });
                }
            }
            Err(_) => {
                return Err(SchemaValidationError::MissingColumn(name.to_string()));
            }
        }
    }

    Ok(())
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column has an incorrect data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column with the type mismatch
        column: String,
        /// Expected data type
        expected: String,
        /// Actual data type found
        found: String,
    },
}
