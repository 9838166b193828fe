use std::fmt::{self, Write};

#[cfg(feature = "colorized_output")]
use console::style;

/// Validation stage a check belongs to, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    /// Path and Parquet footer
    Structure,
    /// Column names, types and units
    Schema,
    /// `bmap:*` footer keys
    Metadata,
    /// Row scan
    Data,
}

impl CheckStage {
    const ALL: [CheckStage; 4] = [
        CheckStage::Structure,
        CheckStage::Schema,
        CheckStage::Metadata,
        CheckStage::Data,
    ];

    /// Section heading used when rendering.
    pub fn title(&self) -> &'static str {
        match self {
            CheckStage::Structure => "Structure",
            CheckStage::Schema => "Schema",
            CheckStage::Metadata => "Footer metadata",
            CheckStage::Data => "Data",
        }
    }
}

/// Outcome of a single check
#[derive(Debug, Clone)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with a caveat
    Warning(String),
    /// Check failed
    Failed(String),
}

/// One named check and its outcome
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// Stage the check ran in; stamped by [`ValidationReport::add_check`]
    pub stage: CheckStage,
    /// Short description of what was checked
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
}

impl ValidationCheck {
    fn with_status(name: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            stage: CheckStage::Structure,
            name: name.into(),
            status,
        }
    }

    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Ok)
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Warning(message.into()))
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Failed(message.into()))
    }
}

/// Rows seen by the data scan next to the count the recorded grid implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTally {
    /// Rows read from the file
    pub scanned: u64,
    /// Closed-form count of the recorded grid, if one was recorded
    pub expected: Option<u64>,
}

/// Checks collected while validating one field-map file, grouped by stage
#[derive(Debug)]
pub struct ValidationReport {
    /// Path of the validated file
    pub file_path: String,
    /// Checks in the order they ran
    pub checks: Vec<ValidationCheck>,
    /// Row counts, present once the data scan has run
    pub rows: Option<RowTally>,
    stage: CheckStage,
}

impl ValidationReport {
    /// Empty report for `file_path`, starting in the structure stage
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            checks: Vec::new(),
            rows: None,
            stage: CheckStage::Structure,
        }
    }

    /// Checks added from now on belong to `stage`.
    pub fn enter(&mut self, stage: CheckStage) {
        self.stage = stage;
    }

    /// Record a check under the current stage.
    pub fn add_check(&mut self, mut check: ValidationCheck) {
        check.stage = self.stage;
        self.checks.push(check);
    }

    /// Record the outcome of the data scan.
    pub fn record_rows(&mut self, scanned: u64, expected: Option<u64>) {
        self.rows = Some(RowTally { scanned, expected });
    }

    /// Checks that ran in `stage`
    pub fn stage_checks(&self, stage: CheckStage) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(move |c| c.stage == stage)
    }

    /// Whether any check failed
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Whether any check produced a warning
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Number of passed checks
    pub fn success_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Ok))
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Warning(_)))
    }

    /// Number of failures
    pub fn failure_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&CheckStatus) -> bool) -> usize {
        self.checks.iter().filter(|c| pred(&c.status)).count()
    }

    /// Render with terminal colors when the `colorized_output` feature is on.
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut out = String::new();
            // Writing into a String cannot fail.
            let _ = self.render(&mut out, paint_colored);
            out
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }

    fn render(&self, out: &mut impl Write, paint: fn(Tone, &str) -> String) -> fmt::Result {
        let title = "Field Map Validation Report";
        writeln!(out, "{}", paint(Tone::Heading, title))?;
        writeln!(out, "{}", paint(Tone::Heading, &"=".repeat(title.len())))?;
        writeln!(out, "File: {}", self.file_path)?;
        match self.rows {
            Some(RowTally {
                scanned,
                expected: Some(expected),
            }) => writeln!(out, "Rows: {} scanned, {} expected", scanned, expected)?,
            Some(RowTally { scanned, .. }) => writeln!(out, "Rows: {} scanned", scanned)?,
            None => {}
        }

        for stage in CheckStage::ALL {
            let mut checks = self.stage_checks(stage).peekable();
            if checks.peek().is_none() {
                continue;
            }
            writeln!(out)?;
            writeln!(out, "{}", paint(Tone::Heading, stage.title()))?;
            for check in checks {
                match &check.status {
                    CheckStatus::Ok => {
                        writeln!(out, "  [✓] {}", paint(Tone::Pass, &check.name))?
                    }
                    CheckStatus::Warning(msg) => writeln!(
                        out,
                        "  [⚠] {} - {}: {}",
                        paint(Tone::Warn, &check.name),
                        paint(Tone::Warn, "WARNING"),
                        msg
                    )?,
                    CheckStatus::Failed(msg) => writeln!(
                        out,
                        "  [✗] {} - {}: {}",
                        paint(Tone::Fail, &check.name),
                        paint(Tone::Fail, "FAILED"),
                        msg
                    )?,
                }
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;

        let verdict = if self.has_failures() {
            paint(Tone::Fail, "Validation FAILED")
        } else if self.has_warnings() {
            paint(Tone::Warn, "Validation PASSED with warnings")
        } else {
            paint(Tone::Pass, "Validation PASSED")
        };
        writeln!(out, "{}", verdict)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, paint_plain)
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Heading,
    Pass,
    Warn,
    Fail,
}

fn paint_plain(_: Tone, text: &str) -> String {
    text.to_string()
}

#[cfg(feature = "colorized_output")]
fn paint_colored(tone: Tone, text: &str) -> String {
    let styled = style(text);
    match tone {
        Tone::Heading => styled.bold().cyan(),
        Tone::Pass => styled.green(),
        Tone::Warn => styled.yellow(),
        Tone::Fail => styled.red().bold(),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ValidationReport {
        let mut report = ValidationReport::new("map.parquet");
        report.add_check(ValidationCheck::ok("Path exists"));
        report.enter(CheckStage::Metadata);
        report.add_check(ValidationCheck::warning("Creation time", "Not recorded"));
        report.enter(CheckStage::Data);
        report.add_check(ValidationCheck::failed("Bz identically zero", "3 rows"));
        report.record_rows(10, Some(24));
        report
    }

    #[test]
    fn test_checks_are_stamped_with_stage() {
        let report = sample_report();
        let stages: Vec<_> = report.checks.iter().map(|c| c.stage).collect();
        assert_eq!(
            stages,
            vec![CheckStage::Structure, CheckStage::Metadata, CheckStage::Data]
        );
        assert_eq!(report.stage_checks(CheckStage::Schema).count(), 0);
        assert_eq!(report.stage_checks(CheckStage::Data).count(), 1);
    }

    #[test]
    fn test_display_groups_by_stage() {
        let output = sample_report().to_string();

        assert!(output.contains("Rows: 10 scanned, 24 expected"));
        assert!(output.contains("\nStructure\n  [✓] Path exists\n"));
        assert!(output.contains("Footer metadata\n  [⚠] Creation time - WARNING: Not recorded"));
        assert!(output.contains("  [✗] Bz identically zero - FAILED: 3 rows"));
        // Stages without checks get no heading.
        assert!(!output.contains("\nSchema\n"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.trim_end().ends_with("Validation FAILED"));
    }

    #[test]
    fn test_verdicts() {
        let mut report = ValidationReport::new("map.parquet");
        report.add_check(ValidationCheck::ok("Path exists"));
        assert!(report.to_string().trim_end().ends_with("Validation PASSED"));
        assert!(!report.to_string().contains("Rows:"));

        report.add_check(ValidationCheck::warning("File extension", "Expected .parquet"));
        assert!(report
            .to_string()
            .trim_end()
            .ends_with("Validation PASSED with warnings"));

        report.record_rows(5, None);
        assert!(report.to_string().contains("Rows: 5 scanned\n"));
    }
}
