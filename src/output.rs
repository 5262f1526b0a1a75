//! Output formatting and persistence for graded reports.
//!
//! Supports a bordered terminal table, pretty JSON, and CSV export.

use anyhow::Result;
use tabled::{Table, Tabled, settings::Style};
use tracing::{debug, info};

use crate::grading::types::{Report, ReportRow};
use csv::WriterBuilder;
use std::fs::File;

/// Placeholder for a missing score, average or grade in the terminal table.
const MISSING: &str = "-";

#[derive(Tabled)]
struct ReportLine {
    no: usize,
    nim: String,
    uk1: String,
    uk2: String,
    uk3: String,
    partisipasi: String,
    hasil_proyek: String,
    nilai_akhir: String,
    nilai_skala: String,
    huruf: String,
}

fn fmt_score(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.2}", v))
}

impl From<&ReportRow> for ReportLine {
    fn from(row: &ReportRow) -> Self {
        Self {
            no: row.no,
            nim: row.nim.clone(),
            uk1: fmt_score(row.uk1),
            uk2: fmt_score(row.uk2),
            uk3: fmt_score(row.uk3),
            partisipasi: fmt_score(row.partisipasi),
            hasil_proyek: fmt_score(row.hasil_proyek),
            nilai_akhir: fmt_score(row.nilai_akhir),
            nilai_skala: fmt_score(row.nilai_skala),
            huruf: row
                .huruf
                .map_or_else(|| MISSING.to_string(), |g| g.to_string()),
        }
    }
}

/// Renders the report as a bordered table, numbers to two decimals.
pub fn render_table(report: &Report) -> String {
    let lines: Vec<ReportLine> = report.rows.iter().map(ReportLine::from).collect();
    Table::new(&lines).with(Style::modern()).to_string()
}

/// Serializes the report, including its generation timestamp, as pretty JSON.
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the report rows to a CSV file at `path`, replacing any existing file.
pub fn write_csv(path: &str, report: &Report) -> Result<()> {
    debug!(path, rows = report.rows.len(), "Writing CSV report");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in &report.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path, "CSV report written");
    Ok(())
}

/// Renders the report rows as CSV text.
pub fn to_csv_string(report: &Report) -> Result<String> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    for row in &report.rows {
        writer.serialize(row)?;
    }
    Ok(String::from_utf8(writer.into_inner()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::types::Grade;
    use chrono::Utc;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_report() -> Report {
        Report {
            generated_at: Utc::now(),
            rows: vec![
                ReportRow {
                    no: 1,
                    nim: "01".into(),
                    uk1: Some(90.0),
                    uk2: Some(80.0),
                    uk3: None,
                    partisipasi: None,
                    hasil_proyek: None,
                    nilai_akhir: Some(85.0),
                    nilai_skala: Some(3.4),
                    huruf: Some(Grade::A),
                },
                ReportRow {
                    no: 2,
                    nim: "02".into(),
                    uk1: None,
                    uk2: None,
                    uk3: None,
                    partisipasi: None,
                    hasil_proyek: None,
                    nilai_akhir: None,
                    nilai_skala: None,
                    huruf: None,
                },
            ],
        }
    }

    #[test]
    fn test_render_table_formats_values() {
        let rendered = render_table(&sample_report());
        for column in Report::COLUMNS {
            assert!(rendered.contains(column), "missing header {column}");
        }
        assert!(rendered.contains("85.00"));
        assert!(rendered.contains("3.40"));
        assert!(rendered.contains(" - "));
    }

    #[test]
    fn test_json_uses_null_for_missing() {
        let json = to_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["generated_at"].is_string());
        assert_eq!(value["rows"][0]["huruf"], "A");
        assert_eq!(value["rows"][0]["nilai_skala"], 3.4);
        assert!(value["rows"][1]["nilai_akhir"].is_null());
    }

    #[test]
    fn test_csv_header_matches_report_columns() {
        let text = to_csv_string(&sample_report()).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next().unwrap(), Report::COLUMNS.join(","));
        assert_eq!(lines.next().unwrap(), "1,01,90.0,80.0,,,,85.0,3.4,A");
        assert_eq!(lines.next().unwrap(), "2,02,,,,,,,,");
    }

    #[test]
    fn test_write_csv_replaces_file() {
        let path = temp_path("gradebook_rater_test_report.csv");
        fs::write(&path, "stale contents\n").unwrap();

        write_csv(&path, &sample_report()).unwrap();
        write_csv(&path, &sample_report()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        // 1 header + 2 data rows
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
