use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::error::{GradeError, Result, Stage};
use crate::grading::types::{
    AggregateTable, CategorizedRecord, Category, CategoryScores, StudentAggregate,
};
use crate::grading::utility::mean;

/// Averages scores per student per category and pivots them to one row per
/// student.
///
/// Missing scores are ignored inside a group; a group with no present score
/// yields `None`. Categories a student never appears in stay `None`.
///
/// # Errors
///
/// [`GradeError::ProcessingFailure`] if a mean is not finite.
pub fn aggregate_scores(records: &[CategorizedRecord]) -> Result<AggregateTable> {
    let mut groups: BTreeMap<(&str, Category), Vec<f64>> = BTreeMap::new();
    let mut observed = BTreeSet::new();

    for r in records {
        observed.insert(r.category);
        let series = groups.entry((r.record.nim.as_str(), r.category)).or_default();
        if let Some(score) = r.record.score {
            series.push(score);
        }
    }

    let mut students: BTreeMap<&str, CategoryScores> = BTreeMap::new();

    for ((nim, category), series) in &groups {
        let avg = mean(series);
        if let Some(value) = avg.filter(|v| !v.is_finite()) {
            return Err(GradeError::ProcessingFailure {
                stage: Stage::Aggregate,
                reason: format!("mean {} score for nim '{}' is {}", category, nim, value),
            });
        }
        debug!(nim = *nim, %category, samples = series.len(), ?avg, "Category mean");
        students.entry(*nim).or_default().set(*category, avg);
    }

    let students: Vec<StudentAggregate> = students
        .into_iter()
        .map(|(nim, scores)| StudentAggregate {
            nim: nim.to_string(),
            scores,
        })
        .collect();

    info!(
        students = students.len(),
        categories = observed.len(),
        "Scores aggregated"
    );
    Ok(AggregateTable { students, observed })
}
