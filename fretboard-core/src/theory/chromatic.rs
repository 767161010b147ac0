//! The 12-tone pitch alphabet and index arithmetic over it.
use std::fmt::Display;
use std::str::FromStr;

use error_stack::{report, Report, Result};
use serde::Serialize;

use crate::error::FretboardError;

/// Number of semitones in an octave.
pub const SEMITONES: usize = 12;

/// One of the twelve pitch classes.
///
/// Enharmonic spellings are always normalized to the sharp name, so there is
/// exactly one `Note` per pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Note {
  #[serde(rename = "C")]
  C = 0,
  #[serde(rename = "C#")]
  Csh,
  #[serde(rename = "D")]
  D,
  #[serde(rename = "D#")]
  Dsh,
  #[serde(rename = "E")]
  E,
  #[serde(rename = "F")]
  F,
  #[serde(rename = "F#")]
  Fsh,
  #[serde(rename = "G")]
  G,
  #[serde(rename = "G#")]
  Gsh,
  #[serde(rename = "A")]
  A,
  #[serde(rename = "A#")]
  Ash,
  #[serde(rename = "B")]
  B,
}

impl Note {
  /// All notes, in ascending pitch-class order starting from C.
  pub const ALL: [Note; SEMITONES] = [
    Note::C,
    Note::Csh,
    Note::D,
    Note::Dsh,
    Note::E,
    Note::F,
    Note::Fsh,
    Note::G,
    Note::Gsh,
    Note::A,
    Note::Ash,
    Note::B,
  ];

  /// The pitch class of this note, with C = 0.
  pub fn pitch_class(&self) -> usize {
    *self as usize
  }

  /// Canonical (sharp-preferred) spelling.
  pub fn name(&self) -> &'static str {
    use Note::*;
    match self {
      C => "C",
      Csh => "C#",
      D => "D",
      Dsh => "D#",
      E => "E",
      F => "F",
      Fsh => "F#",
      G => "G",
      Gsh => "G#",
      A => "A",
      Ash => "A#",
      B => "B",
    }
  }

  pub fn is_natural(&self) -> bool {
    self.name().len() == 1
  }
}

impl Display for Note {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

/// Parses a note name such as `"G"`, `"f#"`, `"Db"` or `"B♭"`.
///
/// Any number of accidentals is accepted; the result is always the sharp
/// spelling of the resulting pitch class (`"Cb"` parses to `B`).
impl FromStr for Note {
  type Err = Report<FretboardError>;

  fn from_str(s: &str) -> Result<Self, FretboardError> {
    let invalid = || report!(FretboardError::InvalidRootNote(s.to_string()));

    let mut chars = s.trim().chars();
    let letter = chars.next().ok_or_else(invalid)?;
    let natural: i32 = match letter.to_ascii_uppercase() {
      'C' => 0,
      'D' => 2,
      'E' => 4,
      'F' => 5,
      'G' => 7,
      'A' => 9,
      'B' => 11,
      _ => return Err(invalid()),
    };

    let mut offset = 0i32;
    for c in chars {
      offset += match c {
        '#' | '♯' => 1,
        'b' | '♭' => -1,
        _ => return Err(invalid().attach_printable(format!("unexpected accidental {c:?}"))),
      };
    }

    let pc = (natural + offset).rem_euclid(SEMITONES as i32) as usize;
    Ok(Note::ALL[pc])
  }
}

/// An ordered chromatic alphabet: a permutation of the twelve notes in
/// ascending semitone order from some starting note.
///
/// Index arithmetic is always taken modulo 12. The alphabet is plain data so
/// engines can be built over a rotated alphabet without touching any global
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromaticSystem {
  alphabet: [Note; SEMITONES],
  // inverse of `alphabet`, indexed by pitch class
  positions: [usize; SEMITONES],
}

impl ChromaticSystem {
  /// Builds a system from an explicit alphabet.
  ///
  /// Every note must appear exactly once and consecutive entries must be one
  /// semitone apart, otherwise interval walks over the alphabet would not
  /// produce the intended pitches.
  pub fn new(alphabet: [Note; SEMITONES]) -> Result<ChromaticSystem, FretboardError> {
    let mut positions = [usize::MAX; SEMITONES];
    for (i, note) in alphabet.iter().enumerate() {
      let pc = note.pitch_class();
      if positions[pc] != usize::MAX {
        return Err(report!(FretboardError::InvalidAlphabet(format!(
          "note {note} appears more than once"
        ))));
      }
      positions[pc] = i;
    }

    for (i, note) in alphabet.iter().enumerate() {
      let next = alphabet[(i + 1) % SEMITONES];
      if (note.pitch_class() + 1) % SEMITONES != next.pitch_class() {
        return Err(report!(FretboardError::InvalidAlphabet(format!(
          "{next} does not follow {note} by one semitone"
        ))));
      }
    }

    Ok(ChromaticSystem { alphabet, positions })
  }

  /// The C-based alphabet `C, C#, D, ... B`.
  pub fn standard() -> ChromaticSystem {
    let mut positions = [0; SEMITONES];
    for (i, p) in positions.iter_mut().enumerate() {
      *p = i;
    }
    ChromaticSystem {
      alphabet: Note::ALL,
      positions,
    }
  }

  pub fn alphabet(&self) -> &[Note; SEMITONES] {
    &self.alphabet
  }

  /// Position of `note` within this alphabet.
  pub fn index_of(&self, note: Note) -> usize {
    self.positions[note.pitch_class()]
  }

  /// The note at `index`, wrapping modulo 12.
  pub fn note_at(&self, index: usize) -> Note {
    self.alphabet[index % SEMITONES]
  }

  /// The note `semitones` above `note` (or below, when negative).
  pub fn transpose(&self, note: Note, semitones: i32) -> Note {
    let index = self.index_of(note) as i32 + semitones;
    self.note_at(index.rem_euclid(SEMITONES as i32) as usize)
  }
}

impl Default for ChromaticSystem {
  fn default() -> Self {
    ChromaticSystem::standard()
  }
}
