//! CSV report of checked registration numbers
//!
//! Two columns, `RegistrationNo.,Status`, one row per candidate in the order
//! they were checked. Rows are flushed as they are written so an interrupted
//! run still leaves a readable report.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use vahan_domain::repository::ReportSink;
use vahan_types::{RegistrationStatus, ReportError};

pub const REPORT_HEADER: [&str; 2] = ["RegistrationNo.", "Status"];

pub struct CsvReportWriter<W: Write = File> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvReportWriter<File> {
    /// Create (or truncate) the report file and write the header
    pub fn create(path: &Path) -> Result<Self, ReportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Self::from_writer(file)
    }
}

impl<W: Write> CsvReportWriter<W> {
    pub fn from_writer(inner: W) -> Result<Self, ReportError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(REPORT_HEADER)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Rows written so far, header excluded
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> Result<W, ReportError> {
        self.writer
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))
    }
}

impl<W: Write> ReportSink for CsvReportWriter<W> {
    fn append(&mut self, candidate: &str, status: RegistrationStatus) -> Result<(), ReportError> {
        self.writer.write_record([candidate, status.as_str()])?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_header_only() {
        let report = CsvReportWriter::from_writer(Vec::new()).unwrap();
        let bytes = report.into_inner().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "RegistrationNo.,Status\n");
    }

    #[test]
    fn test_rows_in_order() {
        let mut report = CsvReportWriter::from_writer(Vec::new()).unwrap();
        report.append("TN09DE1111", RegistrationStatus::NotAvailable).unwrap();
        report.append("TN09DE1112", RegistrationStatus::Available).unwrap();
        report.append("TN09DE1113", RegistrationStatus::Unknown).unwrap();
        assert_eq!(report.rows(), 3);

        let text = String::from_utf8(report.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "RegistrationNo.,Status\n\
             TN09DE1111,NOT_AVAILABLE\n\
             TN09DE1112,AVAILABLE\n\
             TN09DE1113,UNKNOWN\n"
        );
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("output.csv");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale,data\nmore,rows\n").unwrap();

        let mut report = CsvReportWriter::create(&path).unwrap();
        report.append("AB1221", RegistrationStatus::Available).unwrap();
        drop(report);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "RegistrationNo.,Status\nAB1221,AVAILABLE\n");
    }

    #[test]
    fn test_prefix_with_comma_is_quoted() {
        let mut report = CsvReportWriter::from_writer(Vec::new()).unwrap();
        report.append("A,B1111", RegistrationStatus::Available).unwrap();
        let text = String::from_utf8(report.into_inner().unwrap()).unwrap();
        assert!(text.ends_with("\"A,B1111\",AVAILABLE\n"));
    }
}
