//! # bmap - Synthetic Toroidal Field Maps
//!
//! `bmap` samples an analytic magnetic field over a cylindrical detector
//! region (barrel plus endcaps) and writes the samples as a flat table of
//! positions and field vectors.
//!
//! ## Key Features
//!
//! - **Analytic field**: constant magnitude in the transverse plane, pointing
//!   along the polar angle of the sample position, `Bz = 0`.
//!
//! - **Two grid walks**: a Cartesian box with a field-free bore, or barrel
//!   and endcap shells on an r/θ/z grid mirrored in z.
//!
//! - **Streaming output**: samplers are lazy iterators; writers buffer a
//!   bounded batch, so memory does not grow with the grid resolution.
//!
//! - **Self-describing files**: Parquet footers record the geometry, grid,
//!   and generation time next to the data.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bmap::geometry::{CylindricalGrid, DetectorGeometry};
//! use bmap::sampler::CylindricalSampler;
//! use bmap::writer::{write_field_map_file, OutputFormat, WriterConfig};
//!
//! let sampler = CylindricalSampler::new(
//!     DetectorGeometry::default(),
//!     CylindricalGrid::default(),
//! )?;
//!
//! let stats = write_field_map_file(
//!     &sampler,
//!     "cylindrical_grid_data.parquet",
//!     OutputFormat::Parquet,
//!     WriterConfig::default(),
//! )?;
//! println!("Wrote {} samples", stats.samples_written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reading Field Maps
//!
//! Field maps are standard Parquet files and can be read with any
//! Parquet-compatible tool:
//!
//! ```python
//! # Python
//! import pyarrow.parquet as pq
//! df = pq.read_table("cylindrical_grid_data.parquet").to_pandas()
//! ```
//!
//! ```sql
//! -- DuckDB
//! SELECT * FROM read_parquet('cylindrical_grid_data.parquet')
//! WHERE z_mm > 4570;
//! ```
//!
//! ## Architecture
//!
//! - [`field`]: the analytic field function and the row type
//! - [`geometry`]: detector region and grid resolutions
//! - [`sampler`]: Cartesian and cylindrical grid walks, the sink trait
//! - [`schema`]: Arrow schema and footer metadata keys
//! - [`metadata`]: footer metadata describing how a map was sampled
//! - [`writer`]: streaming Parquet and CSV writers
//! - [`reader`]: reading maps back as batches or samples
//! - [`validator`]: integrity checks for written maps
//!
//! ### File Footer Metadata
//!
//! - `bmap:format_version`: Format version string
//! - `bmap:table_name`, `bmap:title`: Table name and title
//! - `bmap:geometry`: JSON detector geometry
//! - `bmap:grid`: JSON sampling variant and resolution
//! - `bmap:created_at`: RFC 3339 generation time
//! - `bmap:generator`: Producing software

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod field;
pub mod geometry;
pub mod metadata;
pub mod reader;
pub mod sampler;
pub mod schema;
pub mod validator;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::field::{toroidal_field, FieldSample, FieldVector};
    pub use crate::geometry::{CartesianGrid, CylindricalGrid, DetectorGeometry, SamplingGrid};
    pub use crate::metadata::FieldMapMetadata;
    pub use crate::reader::{FieldMapReader, FileMetadata, FileSummary, ReaderConfig, ReaderError};
    pub use crate::sampler::{
        CartesianSampler, CylindricalSampler, FieldMapSampler, FieldMapSink, SamplerError,
    };
    pub use crate::schema::{columns, create_field_map_schema, FIELD_MAP_FORMAT_VERSION};
    pub use crate::validator::{validate_field_map_file, ValidationReport};
    pub use crate::writer::{
        write_field_map_file, CompressionType, CsvFieldMapWriter, FieldMapWriter, OutputFormat,
        WriterConfig, WriterError, WriterStats,
    };
}
