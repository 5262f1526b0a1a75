pub mod error;
pub mod fetch;
pub mod grading;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod schema;
pub mod table;

pub use error::{GradeError, Result};
pub use grading::types::{Grade, Report, ReportRow};
pub use pipeline::{process, process_source};
