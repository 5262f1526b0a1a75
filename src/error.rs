//! Error taxonomy for the grading pipeline.
//!
//! Every stage wraps its own failures into one of these variants before
//! returning. All of them abort the current run.

use std::fmt;

use thiserror::Error;

/// Pipeline stage that raised a [`GradeError::ProcessingFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Aggregate,
    Assemble,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Aggregate => "aggregation",
            Stage::Assemble => "report assembly",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum GradeError {
    #[error("source '{path}' not found, check that the path is correct")]
    SourceNotFound { path: String },
    #[error("failed to read source '{location}': {reason}")]
    SourceReadFailure { location: String, reason: String },
    #[error("missing required columns {missing:?}; column names must match exactly: {required:?}")]
    SchemaInvalid {
        missing: Vec<String>,
        required: Vec<String>,
    },
    #[error("unrecognized assessment categories: {labels:?}")]
    CategoryUnrecognized { labels: Vec<String> },
    #[error("{stage} failed: {reason}")]
    ProcessingFailure { stage: Stage, reason: String },
}

impl GradeError {
    /// Short name of the error kind, shown to the user ahead of the message.
    pub fn kind(&self) -> &'static str {
        match self {
            GradeError::SourceNotFound { .. } => "SourceNotFound",
            GradeError::SourceReadFailure { .. } => "SourceReadFailure",
            GradeError::SchemaInvalid { .. } => "SchemaInvalid",
            GradeError::CategoryUnrecognized { .. } => "CategoryUnrecognized",
            GradeError::ProcessingFailure { .. } => "ProcessingFailure",
        }
    }

    pub(crate) fn read_failure(location: &str, reason: impl fmt::Display) -> Self {
        GradeError::SourceReadFailure {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GradeError>;
