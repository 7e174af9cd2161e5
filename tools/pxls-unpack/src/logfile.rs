use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use pxls::{Report, ReportSink, Severity};

/// Append-only log of reports, one `timestamp | severity : message` line each.
pub struct LogFile<W: Write = File> {
    writer: W,
}

impl LogFile<File> {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> LogFile<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub fn format_line(timestamp: &NaiveDateTime, report: &Report) -> String {
    format!(
        "{} | {} : {}\n",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        report.severity,
        report
    )
}

impl<W: Write> ReportSink for LogFile<W> {
    fn report(&mut self, report: Report) {
        match report.severity {
            Severity::Error => log::error!("{report}"),
            Severity::Warning => log::warn!("{report}"),
            Severity::Success | Severity::Done => log::info!("{report}"),
        }

        let line = format_line(&Local::now().naive_local(), &report);
        if let Err(error) = self.writer.write_all(line.as_bytes()) {
            log::error!("failed to append to the log file: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn report(severity: Severity) -> Report {
        Report {
            severity,
            source: "ui.pxls.bytes".to_string(),
            message: "file name not found".to_string(),
        }
    }

    #[test]
    fn line_has_timestamp_severity_and_source() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|date| date.and_hms_opt(3, 4, 5))
            .expect("valid timestamp");

        assert_eq!(
            format_line(&timestamp, &report(Severity::Warning)),
            "2024-01-02 03:04:05 | warning : file name not found. Source file: ui.pxls.bytes\n"
        );
    }

    #[test]
    fn reports_are_appended_in_order() {
        let mut log = LogFile::new(Vec::new());
        log.report(report(Severity::Warning));
        log.report(report(Severity::Error));

        let text = String::from_utf8(log.into_inner()).expect("utf-8 log");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" | warning : file name not found. Source file: ui.pxls.bytes"));
        assert!(lines[1].contains(" | error : "));
    }

    #[test]
    fn open_appends_to_existing_file() {
        let tmp = tempdir::TempDir::new("pxls").expect("tempdir");
        let path = tmp.path().join("log.txt");
        std::fs::write(&path, "earlier\n").expect("seed log");

        let mut log = LogFile::open(&path).expect("open log");
        log.report(report(Severity::Error));
        drop(log);

        let text = std::fs::read_to_string(&path).expect("read log");
        assert!(text.starts_with("earlier\n"));
        assert_eq!(text.lines().count(), 2);
    }
}
