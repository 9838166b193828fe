//! TOML configuration file support.
//!
//! Every setting a generation command accepts can also come from a file:
//!
//! ```toml
//! # bmap.toml
//! [geometry]
//! field_tesla = 5.0
//! rmin_mm = 4100.0
//! rmax_mm = 7600.0
//! halflength_mm = 8000.0
//! z_endcap_min_mm = 4570.0
//! r_endcap_min_mm = 445.0
//!
//! [grid]
//! num_points_z = 100
//! num_points_xy = 200
//! num_points = 100
//!
//! [output]
//! format = "parquet"
//! profile = "balanced"
//! compression_level = 15
//! row_group_size = 2000000
//! batch_size = 65536
//! ```
//!
//! Command-line flags win over the file, and the file wins over built-in
//! defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use bmap::geometry::{CartesianGrid, CylindricalGrid, DetectorGeometry};
use bmap::writer::OutputFormat;

/// Root configuration structure for bmap.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Detector region overrides.
    #[serde(default)]
    pub geometry: GeometryConfig,

    /// Grid resolution overrides.
    #[serde(default)]
    pub grid: GridConfig,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Overrides for [`DetectorGeometry`].
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryConfig {
    /// Field magnitude (T).
    pub field_tesla: Option<f64>,
    /// Inner barrel radius (mm).
    pub rmin_mm: Option<f64>,
    /// Outer radius (mm).
    pub rmax_mm: Option<f64>,
    /// Half-length along z (mm).
    pub halflength_mm: Option<f64>,
    /// Start of the endcap region in |z| (mm).
    pub z_endcap_min_mm: Option<f64>,
    /// Inner endcap radius (mm).
    pub r_endcap_min_mm: Option<f64>,
}

impl GeometryConfig {
    /// Layer `other` on top of `self`; values set in `other` win.
    pub fn overridden_by(&self, other: &GeometryConfig) -> GeometryConfig {
        GeometryConfig {
            field_tesla: other.field_tesla.or(self.field_tesla),
            rmin_mm: other.rmin_mm.or(self.rmin_mm),
            rmax_mm: other.rmax_mm.or(self.rmax_mm),
            halflength_mm: other.halflength_mm.or(self.halflength_mm),
            z_endcap_min_mm: other.z_endcap_min_mm.or(self.z_endcap_min_mm),
            r_endcap_min_mm: other.r_endcap_min_mm.or(self.r_endcap_min_mm),
        }
    }

    /// Fill unset values from the built-in defaults.
    pub fn resolve(&self) -> DetectorGeometry {
        let defaults = DetectorGeometry::default();
        DetectorGeometry {
            field_tesla: self.field_tesla.unwrap_or(defaults.field_tesla),
            rmin_mm: self.rmin_mm.unwrap_or(defaults.rmin_mm),
            rmax_mm: self.rmax_mm.unwrap_or(defaults.rmax_mm),
            halflength_mm: self.halflength_mm.unwrap_or(defaults.halflength_mm),
            z_endcap_min_mm: self.z_endcap_min_mm.unwrap_or(defaults.z_endcap_min_mm),
            r_endcap_min_mm: self.r_endcap_min_mm.unwrap_or(defaults.r_endcap_min_mm),
        }
    }
}

/// Overrides for the grid resolution of either variant.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Cartesian z intervals.
    pub num_points_z: Option<usize>,
    /// Cartesian x/y intervals.
    pub num_points_xy: Option<usize>,
    /// Cylindrical samples per axis.
    pub num_points: Option<usize>,
}

impl GridConfig {
    /// Layer `other` on top of `self`; values set in `other` win.
    pub fn overridden_by(&self, other: &GridConfig) -> GridConfig {
        GridConfig {
            num_points_z: other.num_points_z.or(self.num_points_z),
            num_points_xy: other.num_points_xy.or(self.num_points_xy),
            num_points: other.num_points.or(self.num_points),
        }
    }

    /// Cartesian grid with unset counts taken from the defaults.
    pub fn cartesian(&self) -> CartesianGrid {
        let defaults = CartesianGrid::default();
        CartesianGrid {
            num_points_z: self.num_points_z.unwrap_or(defaults.num_points_z),
            num_points_xy: self.num_points_xy.unwrap_or(defaults.num_points_xy),
        }
    }

    /// Cylindrical grid with an unset count taken from the default.
    pub fn cylindrical(&self) -> CylindricalGrid {
        CylindricalGrid {
            num_points: self
                .num_points
                .unwrap_or(CylindricalGrid::default().num_points),
        }
    }
}

/// Output file settings.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// `parquet` or `csv`.
    pub format: Option<OutputFormat>,

    /// Writer profile name (fast, balanced, max-compression).
    pub profile: Option<String>,

    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Number of samples per Parquet row group.
    pub row_group_size: Option<usize>,

    /// Number of samples buffered per record batch.
    pub batch_size: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, otherwise an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [geometry]
            field_tesla = 3.5
            rmin_mm = 4000.0

            [grid]
            num_points_z = 50
            num_points = 20

            [output]
            format = "csv"
            profile = "fast"
            row_group_size = 200000
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.geometry.field_tesla, Some(3.5));
        assert_eq!(config.geometry.rmin_mm, Some(4000.0));
        assert_eq!(config.geometry.rmax_mm, None);
        assert_eq!(config.grid.num_points_z, Some(50));
        assert_eq!(config.grid.num_points, Some(20));
        assert_eq!(config.output.format, Some(OutputFormat::Csv));
        assert_eq!(config.output.profile.as_deref(), Some("fast"));
        assert_eq!(config.output.row_group_size, Some(200_000));
    }

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.geometry.resolve(), DetectorGeometry::default());
        assert_eq!(config.grid.cartesian(), CartesianGrid::default());
        assert_eq!(config.grid.cylindrical(), CylindricalGrid::default());
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn test_partial_geometry() {
        let config = Config::from_str("[geometry]\nhalflength_mm = 9000.0\n").unwrap();
        let geometry = config.geometry.resolve();
        assert_eq!(geometry.halflength_mm, 9000.0);
        assert_eq!(geometry.rmin_mm, 4100.0);
    }

    #[test]
    fn test_override_precedence() {
        let file = GeometryConfig {
            field_tesla: Some(2.0),
            rmax_mm: Some(7000.0),
            ..Default::default()
        };
        let flags = GeometryConfig {
            field_tesla: Some(4.0),
            ..Default::default()
        };
        let merged = file.overridden_by(&flags);
        assert_eq!(merged.field_tesla, Some(4.0));
        assert_eq!(merged.rmax_mm, Some(7000.0));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_str("[grid]\nnum_points_r = 3\n").is_err());
        assert!(Config::from_str("[geometry]\nfield_tesla = \"five\"\n").is_err());
    }
}
