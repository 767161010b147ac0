//! Preset files for the fretboard view, in ini format:
//!
//! ```ini
//! [Fretboard]
//! Key=G
//! Frets=15
//! Display=degrees
//! ```
//!
//! Missing keys keep their default values.
use error_stack::{report, IntoReport, Result, ResultExt};
use ini::{Ini, Properties};
use log::debug;

use crate::display::DisplayMode;
use crate::error::FretboardError;
use crate::theory::chromatic::Note;

pub const SECTION: &str = "Fretboard";

/// Longest fingerboard a preset may ask for.
pub const MAX_FRET_COUNT: u16 = 36;

pub const DEFAULT_FRET_COUNT: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FretboardConfig {
  pub root: Note,
  pub fret_count: u16,
  pub display: DisplayMode,
}

impl Default for FretboardConfig {
  fn default() -> Self {
    FretboardConfig {
      root: Note::C,
      fret_count: DEFAULT_FRET_COUNT,
      display: DisplayMode::NoteNames,
    }
  }
}

/// Checks a fret count against [`MAX_FRET_COUNT`].
pub fn check_fret_count(fret_count: u16) -> Result<u16, FretboardError> {
  if fret_count > MAX_FRET_COUNT {
    return Err(
      report!(FretboardError::InvalidFretNumber(i32::from(fret_count)))
        .attach_printable(format!("at most {MAX_FRET_COUNT} frets are supported")),
    );
  }
  Ok(fret_count)
}

impl FretboardConfig {
  pub fn from_ini_str(s: &str) -> Result<FretboardConfig, FretboardError> {
    let ini = Ini::load_from_str(s)
      .into_report()
      .change_context(FretboardError::InvalidConfig(String::from("malformed ini")))?;

    match ini.section(Some(SECTION)) {
      Some(props) => Self::from_ini_section(props),
      None => {
        debug!("no [{SECTION}] section in preset, using defaults");
        Ok(FretboardConfig::default())
      }
    }
  }

  fn from_ini_section(props: &Properties) -> Result<FretboardConfig, FretboardError> {
    let mut config = FretboardConfig::default();

    if let Some(key) = props.get("Key") {
      config.root = key.parse()?;
    }

    if let Some(frets) = props.get("Frets") {
      let n = frets.trim().parse::<u16>().into_report().change_context_lazy(|| {
        FretboardError::InvalidConfig(format!("Frets must be a whole number, got {frets:?}"))
      })?;
      config.fret_count = check_fret_count(n)?;
    }

    if let Some(display) = props.get("Display") {
      config.display = display.parse()?;
    }

    Ok(config)
  }

  pub fn to_ini(&self) -> Ini {
    let mut ini = Ini::new();
    ini
      .with_section(Some(SECTION))
      .set("Key", self.root.name())
      .set("Frets", self.fret_count.to_string())
      .set("Display", self.display.as_str());
    ini
  }

  pub fn to_ini_string(&self) -> Result<String, FretboardError> {
    let mut buf = Vec::new();
    self
      .to_ini()
      .write_to(&mut buf)
      .into_report()
      .change_context(FretboardError::InvalidConfig(String::from("unable to write preset")))?;
    String::from_utf8(buf)
      .into_report()
      .change_context(FretboardError::InvalidConfig(String::from("preset is not utf-8")))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_full_preset() {
    let config = FretboardConfig::from_ini_str("[Fretboard]\nKey=Gb\nFrets=15\nDisplay=degrees\n").unwrap();
    assert_eq!(
      config,
      FretboardConfig {
        root: Note::Fsh,
        fret_count: 15,
        display: DisplayMode::ScaleDegrees,
      }
    );
  }

  #[test]
  fn test_missing_values_use_defaults() {
    assert_eq!(
      FretboardConfig::from_ini_str("").unwrap(),
      FretboardConfig::default()
    );
    let config = FretboardConfig::from_ini_str("[Fretboard]\nKey=A\n").unwrap();
    assert_eq!(config.root, Note::A);
    assert_eq!(config.fret_count, DEFAULT_FRET_COUNT);
  }

  #[test]
  fn test_invalid_values() {
    let err = FretboardConfig::from_ini_str("[Fretboard]\nKey=Q\n").unwrap_err();
    assert_eq!(
      err.current_context(),
      &FretboardError::InvalidRootNote("Q".to_string())
    );

    let err = FretboardConfig::from_ini_str("[Fretboard]\nFrets=lots\n").unwrap_err();
    assert!(matches!(
      err.current_context(),
      FretboardError::InvalidConfig(_)
    ));

    let err = FretboardConfig::from_ini_str("[Fretboard]\nFrets=40\n").unwrap_err();
    assert_eq!(err.current_context(), &FretboardError::InvalidFretNumber(40));

    let err = FretboardConfig::from_ini_str("[Fretboard]\nDisplay=roman\n").unwrap_err();
    assert!(matches!(
      err.current_context(),
      FretboardError::InvalidConfig(_)
    ));
  }

  #[test]
  fn test_ini_round_trip() {
    let config = FretboardConfig {
      root: Note::Dsh,
      fret_count: 22,
      display: DisplayMode::ScaleDegrees,
    };
    let ini = config.to_ini();
    let section = ini.section(Some(SECTION)).unwrap();
    assert_eq!(section.get("Key"), Some("D#"));
    assert_eq!(section.get("Frets"), Some("22"));
    assert_eq!(section.get("Display"), Some("degrees"));

    let natural = FretboardConfig {
      root: Note::D,
      ..config
    };
    let text = natural.to_ini_string().unwrap();
    assert_eq!(FretboardConfig::from_ini_str(&text).unwrap(), natural);
  }
}
