use std::fmt;

/// Highest impact score the service hands out.
pub const MAX_IMPACT_SCORE: u8 = 10;

/// One recommendation produced by the pricing analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub title: String,
    pub description: String,
    /// 0..=10, already clamped.
    pub impact_score: u8,
    pub tags: Vec<String>,
    pub sequence_number: u32,
    pub grid: GridRange,
}

impl Insight {
    /// Clamp a raw score into the 0..=10 range, rounding to the nearest step.
    pub fn clamp_score(raw: f64) -> u8 {
        if raw.is_nan() {
            return 0;
        }
        raw.round().clamp(0.0, f64::from(MAX_IMPACT_SCORE)) as u8
    }
}

/// Rectangular region of the pricing page grid an insight refers to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridRange {
    pub from: GridCell,
    pub to: GridCell,
}

impl fmt::Display for GridRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

/// A spreadsheet-style cell reference such as `B3`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridCell {
    pub column: String,
    pub row: String,
}

impl GridCell {
    pub fn new(column: impl Into<String>, row: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            row: row.into(),
        }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_score_rounds_and_bounds() {
        assert_eq!(Insight::clamp_score(7.4), 7);
        assert_eq!(Insight::clamp_score(7.5), 8);
        assert_eq!(Insight::clamp_score(-3.0), 0);
        assert_eq!(Insight::clamp_score(42.0), 10);
        assert_eq!(Insight::clamp_score(f64::NAN), 0);
    }

    #[test]
    fn grid_range_formats_like_a_spreadsheet() {
        let range = GridRange {
            from: GridCell::new("A", "1"),
            to: GridCell::new("C", "4"),
        };
        assert_eq!(range.to_string(), "A1 to C4");
    }
}
