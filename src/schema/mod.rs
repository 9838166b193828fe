//! # Field-Map Schema Definition
//!
//! This module defines the Apache Arrow schema of a field-map table.
//!
//! ## Schema Columns
//!
//! | Column | Type | Unit | Description |
//! |--------|------|------|-------------|
//! | x_mm | Float32 | mm | Sample x position |
//! | y_mm | Float32 | mm | Sample y position |
//! | z_mm | Float32 | mm | Sample z position (beam axis) |
//! | Bx | Float32 | T | Field x component |
//! | By | Float32 | T | Field y component |
//! | Bz | Float32 | T | Field z component, always 0 |
//!
//! Each column carries its unit in the field-level `unit` metadata entry.
//! Rows keep the sampler's iteration order and positions are not unique.

mod builders;
/// Field-map column name constants.
pub mod columns;
mod constants;
mod validation;


pub use builders::{create_field_map_schema, create_field_map_schema_arc};
pub use constants::*;
pub use validation::{validate_schema, SchemaValidationError};
