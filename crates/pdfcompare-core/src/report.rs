//! Aggregated comparison report.
//!
//! [`ReportBuilder`] collects one result per method and derives the
//! [`Summary`] and [`ExitStatus`] from them.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::CompareError;
use crate::metadata::MetadataComparison;
use crate::method::MethodKind;
use crate::structure::{PageCountComparison, StructureComparison};
use crate::text_compare::ComparisonResult;
use crate::visual::VisualComparison;

/// Paths of the two inputs as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilePair {
    pub pdf1: String,
    pub pdf2: String,
}

impl FilePair {
    pub fn new(pdf1: &Path, pdf2: &Path) -> Self {
        Self {
            pdf1: pdf1.display().to_string(),
            pdf2: pdf2.display().to_string(),
        }
    }
}

/// File sizes in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeComparison {
    pub pdf1: u64,
    pub pdf2: u64,
    pub identical: bool,
}

impl SizeComparison {
    pub fn new(pdf1: u64, pdf2: u64) -> Self {
        Self {
            pdf1,
            pdf2,
            identical: pdf1 == pdf2,
        }
    }
}

/// Facts gathered for every run regardless of the selected methods.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicInfo {
    pub file_size: SizeComparison,
    /// Absent when either file could not be parsed.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub page_count: Option<PageCountComparison>,
}

/// Category of a method failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FailureKind {
    Extraction,
    DependencyUnavailable,
}

/// A method that could not produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodFailure {
    pub error: String,
    pub kind: FailureKind,
}

/// Outcome of one comparison method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum MethodResult {
    Text(ComparisonResult),
    Visual(VisualComparison),
    Structure(StructureComparison),
    Metadata(MetadataComparison),
    Failed(MethodFailure),
}

impl MethodResult {
    /// `None` for a failed method.
    pub fn identical(&self) -> Option<bool> {
        match self {
            MethodResult::Text(r) => Some(r.identical),
            MethodResult::Visual(r) => Some(r.identical),
            MethodResult::Structure(r) => Some(r.identical),
            MethodResult::Metadata(r) => Some(r.identical),
            MethodResult::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&MethodFailure> {
        match self {
            MethodResult::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// All checks that ran are identical, and at least one ran.
    pub overall_identical: bool,
    pub checks_passed: usize,
    pub checks_total: usize,
    pub has_errors: bool,
}

impl Summary {
    fn from_results<'a>(results: impl Iterator<Item = &'a MethodResult>) -> Self {
        let mut summary = Summary {
            overall_identical: false,
            checks_passed: 0,
            checks_total: 0,
            has_errors: false,
        };
        for result in results {
            match result.identical() {
                Some(identical) => {
                    summary.checks_total += 1;
                    summary.checks_passed += usize::from(identical);
                }
                None => summary.has_errors = true,
            }
        }
        summary.overall_identical =
            summary.checks_total > 0 && summary.checks_passed == summary.checks_total;
        summary
    }
}

/// Process exit status derived from a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Identical,
    Different,
    Error,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Identical => 0,
            ExitStatus::Different => 2,
            ExitStatus::Error => 1,
        }
    }
}

/// Full result of comparing two files.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonReport {
    pub files: FilePair,
    pub methods_used: Vec<MethodKind>,
    pub basic_info: BasicInfo,
    pub results: BTreeMap<MethodKind, MethodResult>,
    pub summary: Summary,
}

impl ComparisonReport {
    pub fn result(&self, method: MethodKind) -> Option<&MethodResult> {
        self.results.get(&method)
    }

    /// Extraction failures and runs where no check completed are errors.
    /// A method skipped for a missing dependency is reported but does not
    /// turn the run into an error on its own.
    pub fn exit_status(&self) -> ExitStatus {
        let extraction_failed = self
            .results
            .values()
            .filter_map(MethodResult::failure)
            .any(|f| f.kind == FailureKind::Extraction);
        if extraction_failed || self.summary.checks_total == 0 {
            ExitStatus::Error
        } else if self.summary.overall_identical {
            ExitStatus::Identical
        } else {
            ExitStatus::Different
        }
    }
}

/// Collects method results, each written exactly once.
#[derive(Debug)]
pub struct ReportBuilder {
    files: FilePair,
    methods_used: Vec<MethodKind>,
    basic_info: BasicInfo,
    results: BTreeMap<MethodKind, MethodResult>,
}

impl ReportBuilder {
    pub fn new(files: FilePair, methods_used: Vec<MethodKind>, basic_info: BasicInfo) -> Self {
        Self {
            files,
            methods_used,
            basic_info,
            results: BTreeMap::new(),
        }
    }

    /// Record the outcome of `method`.
    ///
    /// Method-scoped errors are stored as [`MethodResult::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InternalDiff`] if the method produced one, or
    /// if `method` already has a result.
    pub fn record(
        &mut self,
        method: MethodKind,
        outcome: Result<MethodResult, CompareError>,
    ) -> Result<(), CompareError> {
        if self.results.contains_key(&method) {
            return Err(CompareError::InternalDiff(format!(
                "result for {method} recorded twice"
            )));
        }
        let result = match outcome {
            Ok(result) => result,
            Err(err @ CompareError::InternalDiff(_)) => return Err(err),
            Err(err) => {
                let kind = match err {
                    CompareError::Extraction(_) => FailureKind::Extraction,
                    _ => FailureKind::DependencyUnavailable,
                };
                MethodResult::Failed(MethodFailure {
                    error: err.to_string(),
                    kind,
                })
            }
        };
        self.results.insert(method, result);
        Ok(())
    }

    pub fn finish(self) -> ComparisonReport {
        let summary = Summary::from_results(self.results.values());
        ComparisonReport {
            files: self.files,
            methods_used: self.methods_used,
            basic_info: self.basic_info,
            results: self.results,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionError, ExtractionFailure};
    use crate::structure::compare_structure;
    use crate::text_compare::TextStatistics;

    fn builder(methods: &[MethodKind]) -> ReportBuilder {
        ReportBuilder::new(
            FilePair::new(Path::new("a.pdf"), Path::new("b.pdf")),
            methods.to_vec(),
            BasicInfo {
                file_size: SizeComparison::new(10, 12),
                page_count: Some(PageCountComparison::new(1, 1)),
            },
        )
    }

    fn text(identical: bool) -> MethodResult {
        MethodResult::Text(ComparisonResult {
            identical,
            similarity: if identical { 1.0 } else { 0.5 },
            statistics: TextStatistics::default(),
            detailed_differences: None,
        })
    }

    #[test]
    fn all_identical_exits_zero() {
        let mut b = builder(&[MethodKind::Text, MethodKind::Structure]);
        b.record(MethodKind::Text, Ok(text(true))).unwrap();
        b.record(
            MethodKind::Structure,
            Ok(MethodResult::Structure(compare_structure(&[], &[]))),
        )
        .unwrap();
        let report = b.finish();
        assert_eq!(
            report.summary,
            Summary {
                overall_identical: true,
                checks_passed: 2,
                checks_total: 2,
                has_errors: false,
            }
        );
        assert_eq!(report.exit_status(), ExitStatus::Identical);
        assert_eq!(report.exit_status().code(), 0);
    }

    #[test]
    fn one_difference_exits_two() {
        let mut b = builder(&[MethodKind::Text]);
        b.record(MethodKind::Text, Ok(text(false))).unwrap();
        let report = b.finish();
        assert!(!report.summary.overall_identical);
        assert_eq!(report.exit_status().code(), 2);
    }

    #[test]
    fn extraction_failure_exits_one() {
        let mut b = builder(&[MethodKind::Text, MethodKind::Structure]);
        let err = ExtractionError::new("b.pdf", ExtractionFailure::Corrupt, "");
        b.record(MethodKind::Text, Err(err.into())).unwrap();
        b.record(
            MethodKind::Structure,
            Ok(MethodResult::Structure(compare_structure(&[], &[]))),
        )
        .unwrap();
        let report = b.finish();
        assert!(report.summary.has_errors);
        let failure = report.result(MethodKind::Text).unwrap().failure().unwrap();
        assert_eq!(failure.kind, FailureKind::Extraction);
        assert!(failure.error.contains("b.pdf"));
        assert_eq!(report.exit_status(), ExitStatus::Error);
    }

    #[test]
    fn missing_dependency_does_not_force_error() {
        let mut b = builder(&[MethodKind::Text, MethodKind::Visual]);
        b.record(MethodKind::Text, Ok(text(true))).unwrap();
        b.record(
            MethodKind::Visual,
            Err(CompareError::DependencyUnavailable {
                method: MethodKind::Visual,
                dependency: "pdftoppm".to_string(),
            }),
        )
        .unwrap();
        let report = b.finish();
        assert!(report.summary.has_errors);
        assert_eq!(report.summary.checks_total, 1);
        assert_eq!(report.exit_status(), ExitStatus::Identical);
    }

    #[test]
    fn no_checks_is_an_error() {
        let mut b = builder(&[MethodKind::Visual]);
        b.record(
            MethodKind::Visual,
            Err(CompareError::DependencyUnavailable {
                method: MethodKind::Visual,
                dependency: "pdftoppm".to_string(),
            }),
        )
        .unwrap();
        let report = b.finish();
        assert!(!report.summary.overall_identical);
        assert_eq!(report.exit_status(), ExitStatus::Error);
    }

    #[test]
    fn duplicate_slot_is_internal_error() {
        let mut b = builder(&[MethodKind::Text]);
        b.record(MethodKind::Text, Ok(text(true))).unwrap();
        let err = b.record(MethodKind::Text, Ok(text(true))).unwrap_err();
        assert!(matches!(err, CompareError::InternalDiff(_)));
    }

    #[test]
    fn internal_diff_error_propagates() {
        let mut b = builder(&[MethodKind::Text]);
        let err = b
            .record(
                MethodKind::Text,
                Err(CompareError::InternalDiff("bad".to_string())),
            )
            .unwrap_err();
        assert!(matches!(err, CompareError::InternalDiff(_)));
        assert!(b.finish().results.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn report_json_shape() {
        let mut b = builder(&[MethodKind::Text, MethodKind::Metadata]);
        b.record(MethodKind::Text, Ok(text(false))).unwrap();
        b.record(
            MethodKind::Metadata,
            Err(CompareError::Extraction(ExtractionError::new(
                "a.pdf",
                ExtractionFailure::Encrypted,
                "",
            ))),
        )
        .unwrap();
        let json = serde_json::to_value(b.finish()).unwrap();
        assert_eq!(json["files"]["pdf1"], "a.pdf");
        assert_eq!(json["methods_used"][0], "text_comparison");
        assert_eq!(json["basic_info"]["file_size"]["pdf2"], 12);
        assert_eq!(json["results"]["text_comparison"]["identical"], false);
        assert_eq!(
            json["results"]["metadata_comparison"]["kind"],
            "extraction"
        );
        assert_eq!(json["summary"]["checks_total"], 1);
        assert_eq!(json["summary"]["has_errors"], true);
    }
}
