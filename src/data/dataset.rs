//! Dataset Module
//! Holds the editable (x, y) rows behind the chart and the data table.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DataError {
    #[error("Row {index} does not exist ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },
}

/// A single (x, y) sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which coordinate of a row a cell edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Why a cell edit was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellRejection {
    Empty,
    NotANumber(String),
    NotFinite(String),
}

impl std::fmt::Display for CellRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellRejection::Empty => write!(f, "value is empty"),
            CellRejection::NotANumber(text) => write!(f, "'{}' is not a number", text),
            CellRejection::NotFinite(text) => write!(f, "'{}' is not a finite number", text),
        }
    }
}

/// Outcome of validating a typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellEdit {
    Accepted(f64),
    Rejected(CellRejection),
}

impl CellEdit {
    /// Parse cell text. Leading/trailing whitespace is ignored.
    pub fn validate(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return CellEdit::Rejected(CellRejection::Empty);
        }
        match parse_number(trimmed) {
            Some(v) if v.is_finite() => CellEdit::Accepted(v),
            Some(_) => CellEdit::Rejected(CellRejection::NotFinite(trimmed.to_string())),
            None => CellEdit::Rejected(CellRejection::NotANumber(trimmed.to_string())),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, CellEdit::Accepted(_))
    }
}

/// Parse a single numeric token.
pub(crate) fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok()
}

/// Ordered sequence of points, edited row by row or replaced wholesale.
///
/// `revision` changes on every structural change (replace, add, remove,
/// clear) so views holding per-row text buffers know when to resync.
/// Accepted cell edits keep the revision.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    points: Vec<Point>,
    revision: u64,
}

impl Dataset {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            revision: 0,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy of the rows ordered by ascending x.
    pub fn sorted(&self) -> Vec<Point> {
        let mut sorted = self.points.clone();
        sorted.sort_unstable_by(|a, b| a.x.total_cmp(&b.x));
        sorted
    }

    /// Replace every row.
    pub fn replace(&mut self, points: Vec<Point>) {
        self.points = points;
        self.revision += 1;
    }

    /// Append a row one step past the largest x, or at the origin when empty.
    pub fn add_row(&mut self) -> Point {
        let next_x = self
            .points
            .iter()
            .map(|p| p.x)
            .filter(|x| x.is_finite())
            .fold(None, |max: Option<f64>, x| Some(max.map_or(x, |m| m.max(x))))
            .map_or(0.0, |max| max + 1.0);

        let point = Point::new(next_x, 0.0);
        self.points.push(point);
        self.revision += 1;
        point
    }

    pub fn remove_row(&mut self, index: usize) -> Result<Point, DataError> {
        if index >= self.points.len() {
            return Err(DataError::RowOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.revision += 1;
        Ok(self.points.remove(index))
    }

    /// Validate `text` and store it into one coordinate of a row.
    ///
    /// A rejected value leaves the row untouched.
    pub fn update_cell(&mut self, index: usize, axis: Axis, text: &str) -> Result<CellEdit, DataError> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(DataError::RowOutOfRange { index, len })?;

        let edit = CellEdit::validate(text);
        if let CellEdit::Accepted(value) = edit {
            match axis {
                Axis::X => point.x = value,
                Axis::Y => point.y = value,
            }
        }
        Ok(edit)
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_row_steps_past_max_x() {
        let mut data = Dataset::new(vec![Point::new(2.0, 5.0)]);
        let added = data.add_row();
        assert_eq!(added, Point::new(3.0, 0.0));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn add_row_uses_max_not_last() {
        let mut data = Dataset::new(vec![Point::new(7.0, 1.0), Point::new(2.0, 1.0)]);
        assert_eq!(data.add_row().x, 8.0);
    }

    #[test]
    fn add_row_on_empty_starts_at_zero() {
        let mut data = Dataset::default();
        assert_eq!(data.add_row(), Point::new(0.0, 0.0));
    }

    #[test]
    fn remove_row_out_of_range_is_error() {
        let mut data = Dataset::new(vec![Point::new(0.0, 0.0)]);
        assert_eq!(
            data.remove_row(3),
            Err(DataError::RowOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(data.remove_row(0), Ok(Point::new(0.0, 0.0)));
        assert!(data.is_empty());
    }

    #[test]
    fn rejected_cell_edit_keeps_value() {
        let mut data = Dataset::new(vec![Point::new(1.0, 2.0)]);
        let edit = data.update_cell(0, Axis::Y, "abc").unwrap();
        assert_eq!(
            edit,
            CellEdit::Rejected(CellRejection::NotANumber("abc".into()))
        );
        assert_eq!(data.points()[0], Point::new(1.0, 2.0));
    }

    #[test]
    fn accepted_cell_edit_writes_axis() {
        let mut data = Dataset::new(vec![Point::new(1.0, 2.0)]);
        let rev = data.revision();
        assert!(data.update_cell(0, Axis::X, " 4.5 ").unwrap().is_accepted());
        assert_eq!(data.points()[0], Point::new(4.5, 2.0));
        assert_eq!(data.revision(), rev);
    }

    #[test]
    fn blank_and_non_finite_cells_are_rejected() {
        assert_eq!(CellEdit::validate("   "), CellEdit::Rejected(CellRejection::Empty));
        assert_eq!(
            CellEdit::validate("NaN"),
            CellEdit::Rejected(CellRejection::NotFinite("NaN".into()))
        );
        assert_eq!(
            CellEdit::validate("inf"),
            CellEdit::Rejected(CellRejection::NotFinite("inf".into()))
        );
    }

    #[test]
    fn sorted_orders_by_x() {
        let data = Dataset::new(vec![
            Point::new(3.0, 0.0),
            Point::new(-1.0, 1.0),
            Point::new(2.0, 2.0),
        ]);
        let xs: Vec<f64> = data.sorted().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-1.0, 2.0, 3.0]);
        // Storage order is untouched.
        assert_eq!(data.points()[0].x, 3.0);
    }
}
