//! Data types used by the grading pipeline.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Canonical assessment categories, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Uk1,
    Uk2,
    Uk3,
    Partisipasi,
    HasilProyek,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Uk1,
        Category::Uk2,
        Category::Uk3,
        Category::Partisipasi,
        Category::HasilProyek,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Uk1 => "uk1",
            Category::Uk2 => "uk2",
            Category::Uk3 => "uk3",
            Category::Partisipasi => "partisipasi",
            Category::HasilProyek => "hasil_proyek",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One score row after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    /// Digits-only student identifier.
    pub nim: String,
    /// `None` when the raw value was blank or not numeric.
    pub score: Option<f64>,
    /// Lowercased, trimmed category label.
    pub label: String,
}

/// A [`ScoreRecord`] resolved to its canonical category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedRecord {
    pub record: ScoreRecord,
    pub category: Category,
}

/// Per-category mean scores for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryScores {
    pub uk1: Option<f64>,
    pub uk2: Option<f64>,
    pub uk3: Option<f64>,
    pub partisipasi: Option<f64>,
    pub hasil_proyek: Option<f64>,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::Uk1 => self.uk1,
            Category::Uk2 => self.uk2,
            Category::Uk3 => self.uk3,
            Category::Partisipasi => self.partisipasi,
            Category::HasilProyek => self.hasil_proyek,
        }
    }

    pub fn set(&mut self, category: Category, value: Option<f64>) {
        let slot = match category {
            Category::Uk1 => &mut self.uk1,
            Category::Uk2 => &mut self.uk2,
            Category::Uk3 => &mut self.uk3,
            Category::Partisipasi => &mut self.partisipasi,
            Category::HasilProyek => &mut self.hasil_proyek,
        };
        *slot = value;
    }

    /// Scores that are present, in report column order.
    pub fn present(&self) -> Vec<f64> {
        Category::ALL.iter().filter_map(|c| self.get(*c)).collect()
    }
}

/// One student's pivoted category means.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAggregate {
    pub nim: String,
    pub scores: CategoryScores,
}

/// Output of the aggregation stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTable {
    /// One entry per distinct student, ascending by `nim`.
    pub students: Vec<StudentAggregate>,
    /// Categories that appeared anywhere in the batch.
    pub observed: BTreeSet<Category>,
}

/// Letter grade on the A–E scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        };
        f.write_str(letter)
    }
}

/// A single line of the final report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub no: usize,
    pub nim: String,
    pub uk1: Option<f64>,
    pub uk2: Option<f64>,
    pub uk3: Option<f64>,
    pub partisipasi: Option<f64>,
    pub hasil_proyek: Option<f64>,
    pub nilai_akhir: Option<f64>,
    pub nilai_skala: Option<f64>,
    pub huruf: Option<Grade>,
}

/// The finished, numbered report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Column headers, in output order.
    pub const COLUMNS: [&'static str; 10] = [
        "no",
        "nim",
        "uk1",
        "uk2",
        "uk3",
        "partisipasi",
        "hasil_proyek",
        "nilai_akhir",
        "nilai_skala",
        "huruf",
    ];
}
