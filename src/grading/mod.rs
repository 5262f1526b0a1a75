//! Score categorization, aggregation and grading.
//!
//! This module maps assessment labels to report columns, averages scores
//! per student per category, assigns letter grades, and assembles the
//! numbered final report.

pub mod aggregate;
pub mod category;
pub mod grade;
pub mod report;
pub mod types;
pub mod utility;
