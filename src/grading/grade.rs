use crate::grading::types::Grade;

/// Converts an overall average (0–100) into a letter grade.
///
/// | Range   | Grade |
/// |---------|-------|
/// | >= 85   | A     |
/// | >= 75   | B     |
/// | >= 65   | C     |
/// | >= 50   | D     |
/// | < 50    | E     |
pub fn grade(average: f64) -> Grade {
    match average {
        a if a >= 85.0 => Grade::A,
        a if a >= 75.0 => Grade::B,
        a if a >= 65.0 => Grade::C,
        a if a >= 50.0 => Grade::D,
        _ => Grade::E,
    }
}

/// Rescales an overall average to the 4.0 scale, rounded to two decimals.
pub fn scale(average: f64) -> f64 {
    crate::grading::utility::round2(average / 100.0 * 4.0)
}
