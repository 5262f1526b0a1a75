//! Required-column check for loaded sheets.

use tracing::info;

use crate::error::{GradeError, Result};
use crate::table::RawTable;

pub const NIM_COLUMN: &str = "nim";
pub const SCORE_COLUMN: &str = "nilai";
pub const CATEGORY_COLUMN: &str = "jenis_penilaian";

/// Column names every score sheet must carry, matched exactly.
pub const REQUIRED_COLUMNS: [&str; 3] = [NIM_COLUMN, SCORE_COLUMN, CATEGORY_COLUMN];

/// A table known to contain every required column, with their positions.
#[derive(Debug)]
pub struct ValidatedTable {
    pub(crate) table: RawTable,
    pub(crate) nim: usize,
    pub(crate) score: usize,
    pub(crate) category: usize,
}

impl ValidatedTable {
    pub fn table(&self) -> &RawTable {
        &self.table
    }
}

/// Confirms `table` has the `nim`, `nilai` and `jenis_penilaian` columns.
///
/// # Errors
///
/// Returns [`GradeError::SchemaInvalid`] naming every missing column.
pub fn validate(table: RawTable) -> Result<ValidatedTable> {
    let positions = REQUIRED_COLUMNS.map(|name| table.column_index(name));

    let [Some(nim), Some(score), Some(category)] = positions else {
        let missing = REQUIRED_COLUMNS
            .iter()
            .zip(positions)
            .filter(|(_, position)| position.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        return Err(GradeError::SchemaInvalid {
            missing,
            required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        });
    };

    info!("Required columns present");
    Ok(ValidatedTable {
        table,
        nim,
        score,
        category,
    })
}
