//! Writer profiles for common use cases.
//!
//! Profiles pick one of the writer presets so users never have to touch
//! low-level Parquet settings.

use std::fmt;
use std::str::FromStr;

use bmap::writer::{CompressionType, WriterConfig};

/// Writer profiles for common use cases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Prioritize speed over file size.
    ///
    /// - Compression: Snappy
    /// - Row group size: 500,000 samples
    /// - Batch size: 32,768 samples
    Fast,

    /// Balance between speed and file size (default).
    ///
    /// - Compression: ZSTD level 9
    /// - Row group size: 1,000,000 samples
    /// - Batch size: 65,536 samples
    #[default]
    Balanced,

    /// Smallest files, slower writes.
    ///
    /// - Compression: ZSTD level 22
    /// - Row group size: 4,000,000 samples
    /// - Batch size: 131,072 samples
    MaxCompression,
}

impl Profile {
    /// Returns the writer preset for this profile.
    pub fn writer_config(&self) -> WriterConfig {
        match self {
            Profile::Fast => WriterConfig::fast_write(),
            Profile::Balanced => WriterConfig::balanced(),
            Profile::MaxCompression => WriterConfig::max_compression(),
        }
    }

    /// Returns the ZSTD level of this profile, `None` when it does not use ZSTD.
    pub fn compression_level(&self) -> Option<i32> {
        match self.writer_config().compression {
            CompressionType::Zstd(level) => Some(level),
            _ => None,
        }
    }

    /// Returns all available profile names.
    pub fn variants() -> &'static [&'static str] {
        &["fast", "balanced", "max-compression"]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Fast => write!(f, "fast"),
            Profile::Balanced => write!(f, "balanced"),
            Profile::MaxCompression => write!(f, "max-compression"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Profile::Fast),
            "balanced" | "default" => Ok(Profile::Balanced),
            "max-compression" | "maxcompression" | "max" => Ok(Profile::MaxCompression),
            _ => Err(format!(
                "Unknown profile '{}'. Valid options: {}",
                s,
                Profile::variants().join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let balanced = Profile::default();
        assert_eq!(balanced, Profile::Balanced);
        assert_eq!(balanced.compression_level(), Some(9));
        assert_eq!(balanced.writer_config().row_group_size, 1_000_000);
        assert_eq!(balanced.writer_config().batch_size, 65_536);
    }

    #[test]
    fn test_fast_profile_uses_snappy() {
        assert_eq!(Profile::Fast.compression_level(), None);
        assert_eq!(Profile::MaxCompression.compression_level(), Some(22));
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(Profile::from_str("fast").unwrap(), Profile::Fast);
        assert_eq!(Profile::from_str("BALANCED").unwrap(), Profile::Balanced);
        assert_eq!(
            Profile::from_str("max-compression").unwrap(),
            Profile::MaxCompression
        );
        assert!(Profile::from_str("invalid").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for name in Profile::variants() {
            let profile = Profile::from_str(name).unwrap();
            assert_eq!(profile.to_string(), *name);
        }
    }
}
