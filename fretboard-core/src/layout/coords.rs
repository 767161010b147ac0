//! Maps fingerboard positions onto 1-based grid columns and rows.
use error_stack::{report, Result};
use serde::Serialize;

use super::layer::Layer;
use crate::error::FretboardError;

/// An inclusive, 1-based range of grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridSpan {
  pub start: u32,
  pub end: u32,
}

impl GridSpan {
  pub fn new(start: u32, end: u32) -> GridSpan {
    assert!(start <= end, "grid span {start}..={end} is reversed");
    GridSpan { start, end }
  }

  pub fn single(line: u32) -> GridSpan {
    GridSpan {
      start: line,
      end: line,
    }
  }

  pub fn line_count(&self) -> u32 {
    self.end - self.start + 1
  }

  pub fn is_single(&self) -> bool {
    self.start == self.end
  }

  pub fn contains(&self, line: u32) -> bool {
    self.start <= line && line <= self.end
  }

  /// True when this span lies entirely within `1 ..= limit`.
  pub fn within(&self, limit: u32) -> bool {
    self.start >= 1 && self.end <= limit
  }
}

/// Where an element sits in the layout grid, plus its stacking layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridPosition {
  pub column: GridSpan,
  pub row: GridSpan,
  pub layer: Layer,
}

impl GridPosition {
  pub fn cell(column: u32, row: u32, layer: Layer) -> GridPosition {
    GridPosition {
      column: GridSpan::single(column),
      row: GridSpan::single(row),
      layer,
    }
  }
}

/// Pure arithmetic from (string, fret) to (column, row).
///
/// Columns are `fret + 1`, so the open string sits in column 1. Rows are
/// `string + 1`, shifted down by a constant number of placeholder rows that
/// are reserved above (and below) the strings for annotations. Both maps are
/// injective and exactly invertible for every valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMapper {
  string_count: usize,
  placeholder_rows: u32,
}

impl CoordinateMapper {
  pub fn new(string_count: usize, placeholder_rows: u32) -> CoordinateMapper {
    assert!(string_count > 0, "a fingerboard needs at least one string");
    CoordinateMapper {
      string_count,
      placeholder_rows,
    }
  }

  /// Six strings with one placeholder row above and below.
  pub fn standard() -> CoordinateMapper {
    CoordinateMapper::new(6, 1)
  }

  pub fn string_count(&self) -> usize {
    self.string_count
  }

  pub fn placeholder_rows(&self) -> u32 {
    self.placeholder_rows
  }

  pub fn to_column(&self, fret: u16) -> u32 {
    u32::from(fret) + 1
  }

  pub fn fret_for_column(&self, column: u32) -> Option<u16> {
    column.checked_sub(1).and_then(|f| u16::try_from(f).ok())
  }

  pub fn to_row(&self, string_index: usize) -> Result<u32, FretboardError> {
    if string_index >= self.string_count {
      return Err(report!(FretboardError::InvalidStringIndex {
        index: string_index,
        string_count: self.string_count,
      }));
    }
    Ok(self.placeholder_rows + string_index as u32 + 1)
  }

  pub fn string_for_row(&self, row: u32) -> Option<usize> {
    let index = row.checked_sub(self.placeholder_rows + 1)? as usize;
    (index < self.string_count).then_some(index)
  }

  /// `(column, row)` for a position.
  pub fn cell(&self, string_index: usize, fret: u16) -> Result<(u32, u32), FretboardError> {
    Ok((self.to_column(fret), self.to_row(string_index)?))
  }

  /// The rows occupied by strings.
  pub fn playable_rows(&self) -> GridSpan {
    GridSpan::new(
      self.placeholder_rows + 1,
      self.placeholder_rows + self.string_count as u32,
    )
  }

  pub fn total_row_count(&self) -> u32 {
    self.string_count as u32 + 2 * self.placeholder_rows
  }

  /// Open-string column plus one column per fret.
  pub fn column_count(&self, fret_count: u16) -> u32 {
    self.to_column(fret_count)
  }
}

impl Default for CoordinateMapper {
  fn default() -> Self {
    CoordinateMapper::standard()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_columns() {
    let m = CoordinateMapper::standard();
    assert_eq!(m.to_column(0), 1);
    assert_eq!(m.to_column(1), 2);
    assert_eq!(m.to_column(12), 13);
    assert_eq!(m.fret_for_column(13), Some(12));
    assert_eq!(m.fret_for_column(0), None);
    assert_eq!(m.column_count(12), 13);
  }

  #[test]
  fn test_rows_with_placeholders() {
    let m = CoordinateMapper::standard();
    let rows: Vec<u32> = (0..6).map(|s| m.to_row(s).unwrap()).collect();
    assert_eq!(rows, vec![2, 3, 4, 5, 6, 7]);
    assert_eq!(m.playable_rows(), GridSpan::new(2, 7));
    assert_eq!(m.total_row_count(), 8);

    assert_eq!(m.string_for_row(1), None);
    assert_eq!(m.string_for_row(2), Some(0));
    assert_eq!(m.string_for_row(7), Some(5));
    assert_eq!(m.string_for_row(8), None);
  }

  #[test]
  fn test_rows_without_placeholders() {
    let m = CoordinateMapper::new(6, 0);
    assert_eq!(m.to_row(0).unwrap(), 1);
    assert_eq!(m.to_row(5).unwrap(), 6);
    assert_eq!(m.string_for_row(1), Some(0));
    assert_eq!(m.string_for_row(0), None);
    assert_eq!(m.total_row_count(), 6);
  }

  #[test]
  fn test_invalid_string() {
    let m = CoordinateMapper::standard();
    let err = m.to_row(6).unwrap_err();
    assert_eq!(
      err.current_context(),
      &FretboardError::InvalidStringIndex {
        index: 6,
        string_count: 6
      }
    );
  }

  #[test]
  fn test_spans() {
    let span = GridSpan::new(2, 7);
    assert_eq!(span.line_count(), 6);
    assert!(span.contains(2) && span.contains(7) && !span.contains(8));
    assert!(span.within(7) && !span.within(6));
    assert!(GridSpan::single(3).is_single());
  }
}
