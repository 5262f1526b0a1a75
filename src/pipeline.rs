//! End-to-end grading run: load, validate, normalize, categorize, aggregate,
//! assemble.

use tracing::info;

use crate::error::Result;
use crate::fetch::HttpClient;
use crate::grading::aggregate::aggregate_scores;
use crate::grading::category::CategoryMap;
use crate::grading::report::assemble_report;
use crate::grading::types::Report;
use crate::loader::load_source;
use crate::normalize::normalize;
use crate::schema::validate;
use crate::table::RawTable;

/// Runs every transformation stage over an already loaded table.
///
/// Either the complete report is returned or the first stage error; no
/// partial output is produced.
#[tracing::instrument(skip_all, fields(rows = table.row_count()))]
pub fn process(table: RawTable) -> Result<Report> {
    let validated = validate(table)?;
    let records = normalize(&validated);
    let categorized = CategoryMap::default().categorize(records)?;
    let aggregates = aggregate_scores(&categorized)?;
    assemble_report(&aggregates)
}

/// Loads `input` (path or link) and grades it.
#[tracing::instrument(skip(client))]
pub async fn process_source<C: HttpClient>(client: &C, input: &str) -> Result<Report> {
    let table = load_source(client, input).await?;
    let report = process(table)?;
    info!(students = report.rows.len(), "Grading finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GradeError;
    use crate::loader::parse_csv;

    fn run(csv: &str) -> Result<Report> {
        process(parse_csv("inline", csv.as_bytes()).unwrap())
    }

    #[test]
    fn test_schema_failure_stops_before_mapping() {
        let err = run("nim,score,jenis_penilaian\n1,80,bogus\n").unwrap_err();
        assert!(matches!(err, GradeError::SchemaInvalid { .. }));
    }

    #[test]
    fn test_unknown_label_fails_whole_batch() {
        let err = run("nim,nilai,jenis_penilaian\n1,80,uk1\n2,70,Kuis\n").unwrap_err();
        match err {
            GradeError::CategoryUnrecognized { labels } => assert_eq!(labels, vec!["kuis"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_sheet_gives_empty_report() {
        let report = run("nim,nilai,jenis_penilaian\n").unwrap();
        assert!(report.rows.is_empty());
    }
}
