use std::fmt;

use super::{FieldMapReader, ReaderError};

/// Running `(min, max)` of a column.
fn widen(range: &mut Option<(f32, f32)>, value: f32) {
    *range = Some(match *range {
        Some((lo, hi)) => (lo.min(value), hi.max(value)),
        None => (value, value),
    });
}

/// Summary statistics about a field-map file
#[derive(Debug, Clone, Default)]
pub struct FileSummary {
    /// Total number of rows in the file
    pub total_samples: u64,
    /// Extent of x (mm)
    pub x_range: Option<(f32, f32)>,
    /// Extent of y (mm)
    pub y_range: Option<(f32, f32)>,
    /// Extent of z (mm)
    pub z_range: Option<(f32, f32)>,
    /// Smallest and largest |B| over all rows (T)
    pub field_magnitude_range: Option<(f32, f32)>,
    /// Largest |Bz| seen (T)
    pub max_abs_bz: f32,
    /// Rows carrying a zero field
    pub zero_field_samples: u64,
    /// Format version
    pub format_version: String,
}

impl FieldMapReader {
    /// Scan the whole file and summarize its contents
    pub fn summary(&self) -> Result<FileSummary, ReaderError> {
        let mut summary = FileSummary {
            format_version: self.file_metadata.format_version.clone(),
            ..FileSummary::default()
        };

        for sample in self.iter_samples()? {
            let sample = sample?;
            summary.total_samples += 1;
            widen(&mut summary.x_range, sample.x_mm);
            widen(&mut summary.y_range, sample.y_mm);
            widen(&mut summary.z_range, sample.z_mm);

            let magnitude = sample.field_magnitude();
            widen(&mut summary.field_magnitude_range, magnitude);
            if magnitude == 0.0 {
                summary.zero_field_samples += 1;
            }
            summary.max_abs_bz = summary.max_abs_bz.max(sample.bz.abs());
        }

        Ok(summary)
    }
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field Map Summary")?;
        writeln!(f, "=================")?;
        writeln!(f, "Format version: {}", self.format_version)?;
        writeln!(f, "Total samples: {}", self.total_samples)?;
        for (label, range) in [("x", self.x_range), ("y", self.y_range), ("z", self.z_range)] {
            if let Some((lo, hi)) = range {
                writeln!(f, "{} range: {:.1} - {:.1} mm", label, lo, hi)?;
            }
        }
        if let Some((lo, hi)) = self.field_magnitude_range {
            writeln!(f, "|B| range: {:.4} - {:.4} T", lo, hi)?;
        }
        writeln!(f, "Max |Bz|: {:.4} T", self.max_abs_bz)?;
        writeln!(f, "Field-free samples: {}", self.zero_field_samples)?;
        Ok(())
    }
}
