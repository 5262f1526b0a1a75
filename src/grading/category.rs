use std::collections::HashMap;

use tracing::info;

use crate::error::{GradeError, Result};
use crate::grading::types::{CategorizedRecord, Category, ScoreRecord};

/// Known assessment labels (already lowercased and trimmed) and the report
/// column each one feeds.
static LABELS: &[(&str, Category)] = &[
    ("uk1", Category::Uk1),
    ("uk 1", Category::Uk1),
    ("unit kompetensi 1", Category::Uk1),
    ("uk2", Category::Uk2),
    ("uk 2", Category::Uk2),
    ("uk3", Category::Uk3),
    ("uk 3", Category::Uk3),
    ("proyek", Category::HasilProyek),
    ("project", Category::HasilProyek),
    ("final project", Category::HasilProyek),
    ("partisipasi", Category::Partisipasi),
    ("presensi", Category::Partisipasi),
];

/// Immutable label lookup, built once per run.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    entries: HashMap<&'static str, Category>,
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self {
            entries: LABELS.iter().copied().collect(),
        }
    }
}

impl CategoryMap {
    /// Case-sensitive lookup of a normalized label.
    pub fn lookup(&self, label: &str) -> Option<Category> {
        self.entries.get(label).copied()
    }

    /// Tags every record with its canonical category.
    ///
    /// # Errors
    ///
    /// [`GradeError::CategoryUnrecognized`] listing each distinct unknown
    /// label, in the order first seen. No record is dropped silently.
    pub fn categorize(&self, records: Vec<ScoreRecord>) -> Result<Vec<CategorizedRecord>> {
        let mut unknown: Vec<String> = Vec::new();
        let mut categorized = Vec::with_capacity(records.len());

        for record in records {
            match self.lookup(&record.label) {
                Some(category) => categorized.push(CategorizedRecord { record, category }),
                None => {
                    if !unknown.contains(&record.label) {
                        unknown.push(record.label);
                    }
                }
            }
        }

        if !unknown.is_empty() {
            return Err(GradeError::CategoryUnrecognized { labels: unknown });
        }

        info!(rows = categorized.len(), "Assessment labels mapped to categories");
        Ok(categorized)
    }
}
