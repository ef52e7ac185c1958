//! Issues found in one annotation file.

use std::fmt;

use serde::Serialize;

/// Every issue found in one annotation file, in discovery order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// `imagePath` of the validated file.
    pub image: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn for_image(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            issues: Vec::new(),
        }
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether the file should be rejected; `strict` also rejects warnings.
    pub fn fails(&self, strict: bool) -> bool {
        if strict {
            !self.is_clean()
        } else {
            !self.is_ok()
        }
    }

    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// Issues attached to shape `index`.
    pub fn for_shape(&self, index: usize) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(move |i| i.context == IssueContext::Shape { index })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "{}: Validation passed, no issues found", self.image);
        }

        writeln!(
            f,
            "{}: {} error(s) and {} warning(s)",
            self.image,
            self.error_count(),
            self.warning_count()
        )?;
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}

/// One problem, located in the file.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub context: IssueContext,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(code: IssueCode, context: IssueContext, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            context,
            message: message.into(),
        }
    }

    pub fn warning(code: IssueCode, context: IssueContext, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, context, message)
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<7} {}: {:?}: {}",
            self.severity, self.context, self.code, self.message
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Boxes and masks are still produced, but may not be what was meant.
    Warning,
    /// Box extraction or mask rendering will refuse the file.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width specifiers apply.
        f.pad(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Stable identifier for each kind of issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    /// `imagePath` is empty.
    EmptyImagePath,
    /// The file has no shapes, so no table region.
    NoShapes,
    /// A shape's point count is not accepted by the selected path.
    UnsupportedPointCount,
    /// A point has a NaN or infinite coordinate.
    PointNotFinite,
    /// A point lies outside the declared image and will be clamped.
    PointOutOfBounds,
    /// The box is inverted after clamping.
    DegenerateBox,
    /// A line is neither horizontal nor vertical and lands in no mask.
    DiagonalLine,
}

/// Where in the file an issue was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum IssueContext {
    File,
    Shape { index: usize },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::File => f.write_str("file"),
            IssueContext::Shape { index } => write!(f, "shape {index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_rejects_warnings_only() {
        let mut report = ValidationReport::for_image("page.png");
        assert!(!report.fails(true));

        report.add(ValidationIssue::warning(
            IssueCode::NoShapes,
            IssueContext::File,
            "no shapes",
        ));
        assert!(!report.fails(false));
        assert!(report.fails(true));

        report.add(ValidationIssue::error(
            IssueCode::UnsupportedPointCount,
            IssueContext::Shape { index: 0 },
            "1 point(s)",
        ));
        assert!(report.fails(false));
    }

    #[test]
    fn issue_line_layout() {
        let issue = ValidationIssue::warning(
            IssueCode::DiagonalLine,
            IssueContext::Shape { index: 3 },
            "slanted",
        );
        assert_eq!(issue.to_string(), "warning shape 3: DiagonalLine: slanted");

        let issue = ValidationIssue::error(IssueCode::NoShapes, IssueContext::File, "x");
        assert_eq!(issue.to_string(), "error   file: NoShapes: x");
    }

    #[test]
    fn json_shape() {
        let issue = ValidationIssue::error(
            IssueCode::PointNotFinite,
            IssueContext::Shape { index: 2 },
            "NaN",
        );
        let value = serde_json::to_value(&issue).expect("serialize issue");
        assert_eq!(value["severity"], "error");
        assert_eq!(value["code"], "PointNotFinite");
        assert_eq!(value["context"]["scope"], "shape");
        assert_eq!(value["context"]["index"], 2);
    }
}
