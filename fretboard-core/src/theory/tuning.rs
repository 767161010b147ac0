//! Open-string tunings and the (string, fret) -> note resolver.
use error_stack::{report, Result};
use serde::Serialize;

use super::chromatic::{ChromaticSystem, Note};
use crate::error::FretboardError;

/// The open-string notes of an instrument, lowest-pitched string first.
///
/// String index 0 is always the physically lowest string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tuning {
  name: String,
  open_strings: Vec<Note>,
}

impl Tuning {
  pub fn new(name: &str, open_strings: Vec<Note>) -> Result<Tuning, FretboardError> {
    if open_strings.is_empty() {
      return Err(report!(FretboardError::InvalidTuning(format!(
        "tuning {name:?} has no strings"
      ))));
    }
    Ok(Tuning {
      name: name.to_string(),
      open_strings,
    })
  }

  /// Six-string standard tuning, E A D G B E.
  pub fn standard() -> Tuning {
    use Note::*;
    Tuning {
      name: String::from("Standard"),
      open_strings: vec![E, A, D, G, B, E],
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn string_count(&self) -> usize {
    self.open_strings.len()
  }

  pub fn open_strings(&self) -> &[Note] {
    &self.open_strings
  }

  /// The open note of `string_index`.
  pub fn open_note(&self, string_index: usize) -> Result<Note, FretboardError> {
    self.open_strings.get(string_index).copied().ok_or_else(|| {
      report!(FretboardError::InvalidStringIndex {
        index: string_index,
        string_count: self.string_count(),
      })
    })
  }
}

impl Default for Tuning {
  fn default() -> Self {
    Tuning::standard()
  }
}

/// Resolves the note sounding at a (string, fret) position.
#[derive(Debug, Clone, Default)]
pub struct PositionResolver {
  chromatic: ChromaticSystem,
  tuning: Tuning,
}

impl PositionResolver {
  pub fn new(chromatic: ChromaticSystem, tuning: Tuning) -> PositionResolver {
    PositionResolver { chromatic, tuning }
  }

  pub fn tuning(&self) -> &Tuning {
    &self.tuning
  }

  pub fn string_count(&self) -> usize {
    self.tuning.string_count()
  }

  /// The note at `fret` on `string_index`.
  ///
  /// There is no upper bound on `fret`; high frets wrap around the chromatic
  /// circle. Negative frets and unknown strings are errors.
  pub fn note_at(&self, string_index: usize, fret: i32) -> Result<Note, FretboardError> {
    if fret < 0 {
      return Err(report!(FretboardError::InvalidFretNumber(fret)));
    }
    let open = self.tuning.open_note(string_index)?;
    let index = self.chromatic.index_of(open) + fret as usize;
    Ok(self.chromatic.note_at(index))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_standard_open_strings() {
    let resolver = PositionResolver::default();
    let open: Vec<Note> = (0..6).map(|s| resolver.note_at(s, 0).unwrap()).collect();
    assert_eq!(open, vec![Note::E, Note::A, Note::D, Note::G, Note::B, Note::E]);
  }

  #[test]
  fn test_fretted_notes() {
    let resolver = PositionResolver::default();
    assert_eq!(resolver.note_at(0, 3).unwrap(), Note::G);
    assert_eq!(resolver.note_at(1, 2).unwrap(), Note::B);
    assert_eq!(resolver.note_at(4, 1).unwrap(), Note::C);
    assert_eq!(resolver.note_at(5, 12).unwrap(), Note::E);
    assert_eq!(resolver.note_at(5, 25).unwrap(), Note::F);
  }

  #[test]
  fn test_rejects_out_of_range_inputs() {
    let resolver = PositionResolver::default();

    let err = resolver.note_at(6, 0).unwrap_err();
    assert_eq!(
      err.current_context(),
      &FretboardError::InvalidStringIndex {
        index: 6,
        string_count: 6
      }
    );

    let err = resolver.note_at(0, -1).unwrap_err();
    assert_eq!(err.current_context(), &FretboardError::InvalidFretNumber(-1));
  }

  #[test]
  fn test_custom_tuning() {
    let drop_d = Tuning::new("Drop D", vec![Note::D, Note::A, Note::D, Note::G, Note::B, Note::E])
      .unwrap();
    let resolver = PositionResolver::new(ChromaticSystem::standard(), drop_d);
    assert_eq!(resolver.note_at(0, 2).unwrap(), Note::E);
    assert_eq!(resolver.tuning().name(), "Drop D");

    assert!(Tuning::new("empty", vec![]).is_err());
  }
}
