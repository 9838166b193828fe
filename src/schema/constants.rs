/// Field-map format version - follows semantic versioning
pub const FIELD_MAP_FORMAT_VERSION: &str = "1.0.0";

/// Name of the field-map table
pub const DEFAULT_TABLE_NAME: &str = "my_magnetic_field_map";

/// Human-readable title of the field-map table
pub const DEFAULT_TABLE_TITLE: &str = "MuColl_10TeV_v0A toroidal magnetic field";

/// File extension for Parquet field maps
pub const PARQUET_EXTENSION: &str = "parquet";

/// File extension for CSV field maps
pub const CSV_EXTENSION: &str = "csv";

/// Unit of position columns
pub const POSITION_UNIT: &str = "mm";

/// Unit of field columns
pub const FIELD_UNIT: &str = "T";

/// Field-level metadata key holding the unit of a column
pub const KEY_UNIT: &str = "unit";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "bmap:format_version";

/// Metadata key for the table name
pub const KEY_TABLE_NAME: &str = "bmap:table_name";

/// Metadata key for the table title
pub const KEY_TABLE_TITLE: &str = "bmap:title";

/// Metadata key for the JSON-encoded detector geometry
pub const KEY_GEOMETRY: &str = "bmap:geometry";

/// Metadata key for the JSON-encoded sampling grid
pub const KEY_GRID: &str = "bmap:grid";

/// Metadata key for creation timestamp
pub const KEY_CREATED_AT: &str = "bmap:created_at";

/// Metadata key for generator software info
pub const KEY_GENERATOR: &str = "bmap:generator";
