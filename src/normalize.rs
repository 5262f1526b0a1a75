//! Type coercion for validated score sheets.

use tracing::{info, warn};

use crate::grading::types::ScoreRecord;
use crate::schema::ValidatedTable;
use crate::table::Cell;

/// Strips every character that is not an ASCII digit.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Reads a score cell. Blank, non-numeric and non-finite values are `None`.
pub fn parse_score(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Empty => return None,
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

pub fn normalize_label(cell: &Cell) -> String {
    cell.to_string().to_lowercase().trim().to_string()
}

/// Coerces every row of `validated` into a [`ScoreRecord`].
///
/// Rows are never dropped. Unparseable scores become `None` and are counted
/// in a single warning.
pub fn normalize(validated: &ValidatedTable) -> Vec<ScoreRecord> {
    let table = validated.table();

    let records: Vec<ScoreRecord> = (0..table.row_count())
        .map(|row| ScoreRecord {
            nim: digits_only(&table.cell(row, validated.nim).to_string()),
            score: parse_score(table.cell(row, validated.score)),
            label: normalize_label(table.cell(row, validated.category)),
        })
        .collect();

    let missing = records.iter().filter(|r| r.score.is_none()).count();
    if missing > 0 {
        warn!(missing, "Some scores were not numeric and are treated as missing");
    }

    info!(rows = records.len(), "Records normalized");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate;
    use crate::table::RawTable;

    #[test]
    fn test_digits_only_strips_and_is_idempotent() {
        for raw in ["A01", "12-345 67", "nim: 2021/0042", "", "abc", "٣12"] {
            let once = digits_only(raw);
            assert!(once.chars().all(|c| c.is_ascii_digit()), "{raw} -> {once}");
            assert_eq!(digits_only(&once), once);
        }
        assert_eq!(digits_only("A01"), "01");
        assert_eq!(digits_only("12-345 67"), "1234567");
    }

    #[test]
    fn test_numeric_nim_cell_has_no_fraction_digits() {
        assert_eq!(digits_only(&Cell::Number(2021001.0).to_string()), "2021001");
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(&Cell::Number(88.5)), Some(88.5));
        assert_eq!(parse_score(&Cell::Text(" 72 ".into())), Some(72.0));
        assert_eq!(parse_score(&Cell::Text("tujuh puluh".into())), None);
        assert_eq!(parse_score(&Cell::Text("NaN".into())), None);
        assert_eq!(parse_score(&Cell::Text("inf".into())), None);
        assert_eq!(parse_score(&Cell::Empty), None);
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label(&Cell::Text("  UK 1 ".into())), "uk 1");
        assert_eq!(normalize_label(&Cell::Text("Final Project".into())), "final project");
    }

    #[test]
    fn test_normalize_keeps_every_row() {
        let table = RawTable::new(
            vec!["jenis_penilaian".into(), "nim".into(), "nilai".into()],
            vec![
                vec![Cell::from_text("Presensi"), Cell::from_text("A-01"), Cell::from_text("80")],
                vec![Cell::from_text("uk2"), Cell::Number(2.0), Cell::from_text("abc")],
                vec![Cell::from_text("uk3")],
            ],
        );
        let records = normalize(&validate(table).unwrap());

        assert_eq!(
            records,
            vec![
                ScoreRecord {
                    nim: "01".into(),
                    score: Some(80.0),
                    label: "presensi".into(),
                },
                ScoreRecord {
                    nim: "2".into(),
                    score: None,
                    label: "uk2".into(),
                },
                ScoreRecord {
                    nim: "".into(),
                    score: None,
                    label: "uk3".into(),
                },
            ]
        );
    }
}
