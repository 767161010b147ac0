//! Label text and colors for note markers.
use std::fmt::Display;
use std::str::FromStr;

use error_stack::{report, Report};
use serde::Serialize;

use crate::color::palette::DegreePalette;
use crate::error::FretboardError;
use crate::theory::scan::FretPosition;

/// Whether markers are labelled with note names or scale degrees.
///
/// The core always computes both; this only picks which one is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DisplayMode {
  #[default]
  NoteNames,
  ScaleDegrees,
}

impl DisplayMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      DisplayMode::NoteNames => "names",
      DisplayMode::ScaleDegrees => "degrees",
    }
  }
}

impl Display for DisplayMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for DisplayMode {
  type Err = Report<FretboardError>;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "names" | "notes" | "name" | "note" => Ok(DisplayMode::NoteNames),
      "degrees" | "degree" => Ok(DisplayMode::ScaleDegrees),
      other => Err(report!(FretboardError::InvalidConfig(format!(
        "unknown display mode {other:?}, expected \"names\" or \"degrees\""
      )))),
    }
  }
}

/// What a marker shows: its text plus background / text colors as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerLabel {
  pub text: String,
  pub background: String,
  pub foreground: String,
}

impl MarkerLabel {
  /// Labels `position` for `mode`.
  ///
  /// Depends only on the position's note and degree, so equal degrees always
  /// produce equal labels. In degree mode a note outside the scale falls back
  /// to its name.
  pub fn for_position(position: &FretPosition, mode: DisplayMode, palette: &DegreePalette) -> Self {
    let degree = position.scale_degree();
    let text = match (mode, degree) {
      (DisplayMode::ScaleDegrees, Some(d)) => d.get().to_string(),
      _ => position.note().to_string(),
    };
    let (background, foreground) = palette.hex_pair(degree);
    MarkerLabel {
      text,
      background,
      foreground,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::theory::chromatic::Note;
  use crate::theory::scale::DEGREES;

  #[test]
  fn test_parse_display_mode() {
    assert_eq!("names".parse::<DisplayMode>().unwrap(), DisplayMode::NoteNames);
    assert_eq!("Degrees".parse::<DisplayMode>().unwrap(), DisplayMode::ScaleDegrees);
    let err = "roman".parse::<DisplayMode>().unwrap_err();
    assert!(matches!(
      err.current_context(),
      FretboardError::InvalidConfig(_)
    ));
    assert_eq!(DisplayMode::default().to_string(), "names");
  }

  #[test]
  fn test_labels() {
    let palette = DegreePalette::default();
    let g = FretPosition::new(0, 3, Note::G, Some(DEGREES[4]));

    let by_name = MarkerLabel::for_position(&g, DisplayMode::NoteNames, &palette);
    let by_degree = MarkerLabel::for_position(&g, DisplayMode::ScaleDegrees, &palette);
    assert_eq!(by_name.text, "G");
    assert_eq!(by_degree.text, "5");
    assert_eq!(by_name.background, by_degree.background);

    let outside = FretPosition::new(4, 0, Note::B, None);
    let label = MarkerLabel::for_position(&outside, DisplayMode::ScaleDegrees, &palette);
    assert_eq!(label.text, "B");
    assert_eq!(label.background, "#808080");
  }
}
