//! # Field Map Reader
//!
//! Reads Parquet field maps back as Arrow record batches or as
//! [`FieldSample`](crate::field::FieldSample) rows, together with the footer
//! metadata that describes how the map was sampled.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bmap::reader::FieldMapReader;
//!
//! let reader = FieldMapReader::open("cylindrical_grid_data.parquet")?;
//! println!("Format version: {}", reader.metadata().format_version);
//!
//! for sample in reader.iter_samples()? {
//!     let sample = sample?;
//!     println!("{:?}", sample);
//! }
//! # Ok::<(), bmap::reader::ReaderError>(())
//! ```

mod batches;
mod config;
mod error;
mod metadata;
mod open;
mod samples;
mod summary;
mod utils;


pub use batches::RecordBatchIterator;
pub use config::ReaderConfig;
pub use error::ReaderError;
pub use metadata::FileMetadata;
pub use samples::SampleIterator;
pub use summary::FileSummary;

use config::ReaderSource;

/// Reader for Parquet field maps
///
/// Opens either a file on disk or a buffer already in memory.
pub struct FieldMapReader {
    source: ReaderSource,
    config: ReaderConfig,
    file_metadata: FileMetadata,
}
