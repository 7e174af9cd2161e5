use core::fmt;

use crate::error::RecordIssue;
use crate::{build_catalog, Catalog};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
    Done,
}

impl Severity {
    /// Short console tag, e.g. `[!]`
    pub fn tag(self) -> &'static str {
        match self {
            Self::Success => "[+]",
            Self::Warning => "[!]",
            Self::Error => "[x]",
            Self::Done => "[>]",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Done => "done",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    /// Descriptor file the report is about
    pub source: String,
    pub message: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. Source file: {}", self.message, self.source)
    }
}

/// Destination for reports produced while processing descriptors.
pub trait ReportSink {
    fn report(&mut self, report: Report);
}

impl ReportSink for Vec<Report> {
    fn report(&mut self, report: Report) {
        self.push(report);
    }
}

impl RecordIssue {
    /// A missing name is a warning, an undecodable one an error.
    pub fn severity(&self) -> Severity {
        match self {
            Self::NameNotFound => Severity::Warning,
            Self::InvalidName { .. } => Severity::Error,
        }
    }
}

/// Build the catalog of `source` and send its failures to `sink`.
///
/// A missing section is reported as an error and yields `None`. Every skipped
/// record is reported with its index and fingerprint: a missing name as a
/// warning, an undecodable name as an error.
pub fn report_catalog(source: &str, bytes: &[u8], sink: &mut dyn ReportSink) -> Option<Catalog> {
    let catalog = match build_catalog(bytes) {
        Ok(catalog) => catalog,
        Err(error) => {
            sink.report(Report {
                severity: Severity::Error,
                source: source.to_string(),
                message: error.to_string(),
            });
            return None;
        }
    };

    for diagnostic in &catalog.diagnostics {
        sink.report(Report {
            severity: diagnostic.issue.severity(),
            source: source.to_string(),
            message: format!(
                "record {} ({}): {}",
                diagnostic.index, diagnostic.fingerprint, diagnostic.issue
            ),
        });
    }

    Some(catalog)
}
