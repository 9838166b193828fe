use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::{
    DEFAULT_TABLE_NAME, DEFAULT_TABLE_TITLE, FIELD_MAP_FORMAT_VERSION, FIELD_UNIT,
    KEY_FORMAT_VERSION, KEY_TABLE_NAME, KEY_TABLE_TITLE, KEY_UNIT, POSITION_UNIT,
};

/// Creates a non-nullable Float32 field annotated with its unit
fn field_with_unit(name: &str, unit: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert(KEY_UNIT.to_string(), unit.to_string());
    Field::new(name, DataType::Float32, false).with_metadata(metadata)
}

/// Creates the field-map Arrow schema.
///
/// Six single-precision, non-nullable columns: the sample position in
/// millimeters followed by the field vector in tesla.
///
/// # Example
///
/// ```
/// use bmap::schema::create_field_map_schema;
///
/// let schema = create_field_map_schema();
/// assert_eq!(schema.fields().len(), 6);
/// ```
pub fn create_field_map_schema() -> Schema {
    let mut builder = SchemaBuilder::new();

    for name in columns::POSITION {
        builder.push(field_with_unit(name, POSITION_UNIT));
    }
    for name in columns::FIELD {
        builder.push(field_with_unit(name, FIELD_UNIT));
    }

    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        FIELD_MAP_FORMAT_VERSION.to_string(),
    );
    metadata.insert(KEY_TABLE_NAME.to_string(), DEFAULT_TABLE_NAME.to_string());
    metadata.insert(KEY_TABLE_TITLE.to_string(), DEFAULT_TABLE_TITLE.to_string());

    builder.finish().with_metadata(metadata)
}

/// Returns an Arc-wrapped schema for shared ownership
pub fn create_field_map_schema_arc() -> Arc<Schema> {
    Arc::new(create_field_map_schema())
}
