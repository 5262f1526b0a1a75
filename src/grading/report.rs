use chrono::Utc;
use tracing::{debug, info};

use crate::error::{GradeError, Result, Stage};
use crate::grading::grade::{grade, scale};
use crate::grading::types::{AggregateTable, Category, Report, ReportRow};
use crate::grading::utility::mean;

/// Builds the final report from per-student aggregates.
///
/// Every canonical category becomes a column, missing where the student has
/// no score. The overall average only counts present categories; a student
/// with none gets no average, scale value or grade. Rows are sorted by `nim`
/// and numbered from 1.
///
/// # Errors
///
/// [`GradeError::ProcessingFailure`] if an overall average is not finite.
pub fn assemble_report(aggregates: &AggregateTable) -> Result<Report> {
    for category in Category::ALL {
        if !aggregates.observed.contains(&category) {
            debug!(%category, "Category absent from batch, column left empty");
        }
    }

    let mut rows: Vec<ReportRow> = aggregates
        .students
        .iter()
        .map(|student| {
            let s = student.scores;
            let nilai_akhir = mean(&s.present());
            if let Some(value) = nilai_akhir.filter(|v| !v.is_finite()) {
                return Err(GradeError::ProcessingFailure {
                    stage: Stage::Assemble,
                    reason: format!("overall average for nim '{}' is {}", student.nim, value),
                });
            }
            Ok(ReportRow {
                no: 0,
                nim: student.nim.clone(),
                uk1: s.uk1,
                uk2: s.uk2,
                uk3: s.uk3,
                partisipasi: s.partisipasi,
                hasil_proyek: s.hasil_proyek,
                nilai_akhir,
                nilai_skala: nilai_akhir.map(scale),
                huruf: nilai_akhir.map(grade),
            })
        })
        .collect::<Result<_>>()?;

    rows.sort_by(|a, b| a.nim.cmp(&b.nim));
    for (i, row) in rows.iter_mut().enumerate() {
        row.no = i + 1;
    }

    let ungraded = rows.iter().filter(|r| r.huruf.is_none()).count();
    info!(students = rows.len(), ungraded, "Final report assembled");

    Ok(Report {
        generated_at: Utc::now(),
        rows,
    })
}
