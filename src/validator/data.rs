use anyhow::Result;

use crate::field::FieldSample;
use crate::geometry::{DetectorGeometry, SamplingGrid};
use crate::metadata::FieldMapMetadata;
use crate::reader::FieldMapReader;

use super::{ValidationCheck, ValidationReport};

/// Relative tolerance on |B| after the round trip through single precision.
const MAGNITUDE_TOLERANCE: f32 = 1e-4;

/// Counters gathered in one pass over the rows.
#[derive(Debug, Default)]
struct DataScan {
    rows: u64,
    non_finite: u64,
    nonzero_bz: u64,
    zero_field: u64,
    /// Smallest and largest |B| over rows with a field
    nonzero_range: Option<(f32, f32)>,
    bore_mismatches: u64,
    mirror_mismatches: u64,
    pending_mirror: Option<FieldSample>,
}

impl DataScan {
    fn push(&mut self, sample: FieldSample, geometry: Option<&DetectorGeometry>, grid: Option<&SamplingGrid>) {
        self.rows += 1;

        let values = [
            sample.x_mm,
            sample.y_mm,
            sample.z_mm,
            sample.bx,
            sample.by,
            sample.bz,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            self.non_finite += 1;
            return;
        }

        if sample.bz != 0.0 {
            self.nonzero_bz += 1;
        }

        let magnitude = sample.field_magnitude();
        let is_zero = magnitude == 0.0;
        if is_zero {
            self.zero_field += 1;
        } else {
            self.nonzero_range = Some(match self.nonzero_range {
                Some((lo, hi)) => (lo.min(magnitude), hi.max(magnitude)),
                None => (magnitude, magnitude),
            });
        }

        match (grid, geometry) {
            (Some(SamplingGrid::Cartesian(_)), Some(geometry)) if geometry.field_tesla != 0.0 => {
                let radius = (sample.x_mm as f64).hypot(sample.y_mm as f64);
                if geometry.in_bore(radius, sample.z_mm as f64) != is_zero {
                    self.bore_mismatches += 1;
                }
            }
            (Some(SamplingGrid::Cylindrical(_)), _) => match self.pending_mirror.take() {
                None => self.pending_mirror = Some(sample),
                Some(primary) => {
                    if sample != primary.mirrored_z() {
                        self.mirror_mismatches += 1;
                    }
                }
            },
            _ => {}
        }
    }
}

/// Step 4: Data sanity validation
pub(crate) fn check_data_sanity(
    reader: &FieldMapReader,
    metadata: Option<&FieldMapMetadata>,
    report: &mut ValidationReport,
) -> Result<()> {
    let geometry = metadata.and_then(|m| m.geometry.as_ref());
    let grid = metadata.and_then(|m| m.grid.as_ref());

    let mut scan = DataScan::default();
    for sample in reader.iter_samples()? {
        scan.push(sample?, geometry, grid);
    }

    report.record_rows(scan.rows, grid.map(SamplingGrid::expected_records));
    report_row_count(&scan, grid, report);

    if scan.rows == 0 {
        report.add_check(ValidationCheck::warning(
            "Data rows",
            "File contains no data rows",
        ));
        return Ok(());
    }

    if scan.non_finite == 0 {
        report.add_check(ValidationCheck::ok("All values finite"));
    } else {
        report.add_check(ValidationCheck::failed(
            "All values finite",
            format!("Found {} rows with NaN or infinite values", scan.non_finite),
        ));
    }

    if scan.nonzero_bz == 0 {
        report.add_check(ValidationCheck::ok("Bz identically zero"));
    } else {
        report.add_check(ValidationCheck::failed(
            "Bz identically zero",
            format!("Found {} rows with Bz != 0", scan.nonzero_bz),
        ));
    }

    report_magnitude(&scan, geometry, report);

    match grid {
        Some(SamplingGrid::Cartesian(_)) if geometry.is_some() => {
            if scan.bore_mismatches == 0 {
                report.add_check(ValidationCheck::ok(format!(
                    "Field-free rows match the bore ({} rows)",
                    scan.zero_field
                )));
            } else {
                // Rows on the bore boundary can flip after rounding to f32.
                report.add_check(ValidationCheck::warning(
                    "Field-free rows match the bore",
                    format!("{} rows disagree with the bore mask", scan.bore_mismatches),
                ));
            }
        }
        Some(SamplingGrid::Cylindrical(_)) => {
            if scan.mirror_mismatches == 0 && scan.pending_mirror.is_none() {
                report.add_check(ValidationCheck::ok("Every row followed by its -z mirror"));
            } else {
                report.add_check(ValidationCheck::failed(
                    "Every row followed by its -z mirror",
                    format!(
                        "{} mismatched pairs{}",
                        scan.mirror_mismatches,
                        if scan.pending_mirror.is_some() {
                            ", last row unpaired"
                        } else {
                            ""
                        }
                    ),
                ));
            }
        }
        _ => {}
    }

    Ok(())
}

fn report_row_count(scan: &DataScan, grid: Option<&SamplingGrid>, report: &mut ValidationReport) {
    match grid {
        Some(grid) => {
            let expected = grid.expected_records();
            if scan.rows == expected {
                report.add_check(ValidationCheck::ok(format!(
                    "Row count matches grid ({})",
                    expected
                )));
            } else {
                report.add_check(ValidationCheck::failed(
                    "Row count matches grid",
                    format!("Expected {} rows for {:?}, found {}", expected, grid, scan.rows),
                ));
            }
        }
        None => report.add_check(ValidationCheck::ok(format!("Total rows: {}", scan.rows))),
    }
}

fn report_magnitude(
    scan: &DataScan,
    geometry: Option<&DetectorGeometry>,
    report: &mut ValidationReport,
) {
    let Some((lo, hi)) = scan.nonzero_range else {
        report.add_check(ValidationCheck::warning(
            "Field magnitude",
            "Every row is field-free",
        ));
        return;
    };

    let (nominal, source) = match geometry {
        Some(geometry) => (geometry.field_tesla.abs() as f32, "recorded"),
        None => (hi, "largest observed"),
    };
    let tolerance = MAGNITUDE_TOLERANCE * nominal.max(1.0);

    if (lo - nominal).abs() <= tolerance && (hi - nominal).abs() <= tolerance {
        report.add_check(ValidationCheck::ok(format!(
            "|B| is 0 or {} T ({} nominal)",
            nominal, source
        )));
    } else {
        report.add_check(ValidationCheck::failed(
            "|B| is 0 or the nominal magnitude",
            format!(
                "Non-zero |B| spans {} - {} T, expected {} T ({})",
                lo, hi, nominal, source
            ),
        ));
    }
}
