use lazy_static::lazy_static;
use palette::{IntoColor, LinSrgb, Srgb, Xyz};

use crate::error::FretboardError;
use crate::theory::scale::{parse_degree, ScaleDegree, SCALE_LENGTH};
use error_stack::Result;

lazy_static! {
  static ref DEFAULT_PALETTE: DegreePalette = DegreePalette::new(
    [
      // hard-coded stops around an "RYB" color wheel, one per degree
      rgb(0xff, 0x00, 0x00),
      rgb(0xff, 0x80, 0x00),
      rgb(0xff, 0xff, 0x00),
      rgb(0x00, 0xa9, 0x33),
      rgb(0x2a, 0x60, 0x99),
      rgb(0x55, 0x30, 0x8d),
      rgb(0xbf, 0x00, 0x41),
    ],
    rgb(0x80, 0x80, 0x80),
  );
}

/// Backgrounds at or above this relative luminance get dark marker text.
pub const DARK_TEXT_LUMINANCE: f32 = 0.5;

fn rgb(red: u8, green: u8, blue: u8) -> LinSrgb {
  LinSrgb::<u8>::new(red, green, blue).into_format()
}

/// `#rrggbb`, as written into marker labels.
fn hex_string(color: LinSrgb) -> String {
  let color: LinSrgb<u8> = color.into_format();
  format!("#{color:x}")
}

fn luminance(color: LinSrgb) -> f32 {
  let xyz: Xyz = Srgb::from_linear(color).into_color();
  xyz.y
}

/// A fixed color per scale degree, plus a fallback for notes with no degree.
///
/// Every marker with the same degree gets the same color, no matter where
/// it is on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreePalette {
  colors: [LinSrgb; SCALE_LENGTH],
  fallback: LinSrgb,
}

impl DegreePalette {
  pub fn new(colors: [LinSrgb; SCALE_LENGTH], fallback: LinSrgb) -> Self {
    DegreePalette { colors, fallback }
  }

  /// The built-in color wheel palette.
  pub fn default_palette() -> &'static DegreePalette {
    &DEFAULT_PALETTE
  }

  pub fn get(&self, degree: Option<ScaleDegree>) -> LinSrgb {
    match degree {
      Some(d) => self.colors[(d.get() - 1) as usize],
      None => self.fallback,
    }
  }

  pub fn fallback(&self) -> LinSrgb {
    self.fallback
  }

  /// Color for a raw degree number; fails outside 1 ..= 7.
  pub fn color_for_degree_number(&self, degree: u8) -> Result<LinSrgb, FretboardError> {
    parse_degree(degree).map(|d| self.get(Some(d)))
  }

  /// Black on light degree colors, white on dark ones, so a label stays
  /// legible whichever degree it marks.
  pub fn text_color(&self, degree: Option<ScaleDegree>) -> LinSrgb {
    if luminance(self.get(degree)) < DARK_TEXT_LUMINANCE {
      LinSrgb::new(1.0, 1.0, 1.0)
    } else {
      LinSrgb::new(0.0, 0.0, 0.0)
    }
  }

  pub fn hex(&self, degree: Option<ScaleDegree>) -> String {
    hex_string(self.get(degree))
  }

  /// `(background, foreground)` as `#rrggbb` strings.
  pub fn hex_pair(&self, degree: Option<ScaleDegree>) -> (String, String) {
    (self.hex(degree), hex_string(self.text_color(degree)))
  }
}

impl Default for DegreePalette {
  fn default() -> Self {
    DEFAULT_PALETTE.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::theory::scale::DEGREES;

  #[test]
  fn test_every_degree_has_a_distinct_color() {
    let palette = DegreePalette::default();
    let hexes: Vec<String> = DEGREES
      .iter()
      .map(|d| palette.hex(Some(*d)))
      .collect();
    assert_eq!(hexes[0], "#ff0000");
    for (i, a) in hexes.iter().enumerate() {
      assert!(hexes[i + 1..].iter().all(|b| a != b));
      assert_ne!(a, &palette.hex(None));
    }
  }

  #[test]
  fn test_fallback_for_no_degree() {
    let palette = DegreePalette::default();
    assert_eq!(palette.hex(None), "#808080");
  }

  #[test]
  fn test_raw_degree_lookup() {
    let palette = DegreePalette::default();
    assert_eq!(
      palette.color_for_degree_number(5).unwrap(),
      palette.get(Some(DEGREES[4]))
    );
    let err = palette.color_for_degree_number(0).unwrap_err();
    assert_eq!(err.current_context(), &FretboardError::InvalidScaleDegree(0));
  }

  #[test]
  fn test_text_color_contrast() {
    let palette = DegreePalette::default();
    // yellow background gets dark text, purple gets light text
    assert_eq!(palette.hex_pair(Some(DEGREES[2])).1, "#000000");
    assert_eq!(palette.hex_pair(Some(DEGREES[5])).1, "#ffffff");
  }

  #[test]
  fn test_text_color_follows_custom_palette() {
    let black = LinSrgb::new(0.0, 0.0, 0.0);
    let white = LinSrgb::new(1.0, 1.0, 1.0);
    let palette = DegreePalette::new([white, black, white, black, white, black, white], black);
    assert_eq!(palette.text_color(Some(DEGREES[0])), black);
    assert_eq!(palette.text_color(Some(DEGREES[1])), white);
    assert_eq!(palette.hex_pair(None), ("#000000".to_string(), "#ffffff".to_string()));
  }
}
