//! In-memory representation of a freshly loaded sheet.

use std::fmt;

/// A single cell as read from the source, before any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Builds a cell from CSV text. Blank fields become [`Cell::Empty`].
    pub fn from_text(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            // f64's Display already drops the ".0" on integral values
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

static EMPTY: Cell = Cell::Empty;

/// Header names plus rows of cells, exactly as the loader produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Position of the column whose header is exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at `(row, col)`. Short rows read as empty past their end.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_drops_integral_fraction() {
        assert_eq!(Cell::Number(12345.0).to_string(), "12345");
        assert_eq!(Cell::Number(1.5).to_string(), "1.5");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn test_ragged_rows_read_as_empty() {
        let table = RawTable::new(
            vec!["a".into(), "b".into()],
            vec![vec![Cell::from_text("x")]],
        );
        assert_eq!(table.cell(0, 0), &Cell::Text("x".into()));
        assert_eq!(table.cell(0, 1), &Cell::Empty);
        assert_eq!(table.cell(5, 0), &Cell::Empty);
    }

    #[test]
    fn test_column_index_is_case_sensitive() {
        let table = RawTable::new(vec!["nim".into(), "Nilai".into()], vec![]);
        assert_eq!(table.column_index("nim"), Some(0));
        assert_eq!(table.column_index("nilai"), None);
    }
}
