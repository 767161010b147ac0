//! Major scale construction and degree lookups.
use bounded_integer::BoundedU8;
use error_stack::{report, Result, ResultExt};
use log::debug;
use serde::Serialize;

use super::chromatic::{ChromaticSystem, Note};
use crate::error::FretboardError;

/// Number of notes in a diatonic scale.
pub const SCALE_LENGTH: usize = 7;

/// Whole / whole / half / whole / whole / whole / half.
///
/// The final step closes the octave and is never applied when walking.
pub const MAJOR_INTERVALS: [u8; SCALE_LENGTH] = [2, 2, 1, 2, 2, 2, 1];

/// A scale degree in the closed range 1 ..= 7.
pub type ScaleDegree = BoundedU8<1, 7>;

const fn degree(n: u8) -> ScaleDegree {
  match ScaleDegree::new(n) {
    Some(d) => d,
    None => panic!("scale degree out of range"),
  }
}

/// Every scale degree, in ascending order.
pub const DEGREES: [ScaleDegree; SCALE_LENGTH] = [
  degree(1),
  degree(2),
  degree(3),
  degree(4),
  degree(5),
  degree(6),
  degree(7),
];

/// Converts a raw degree number, failing outside 1 ..= 7.
pub fn parse_degree(n: u8) -> Result<ScaleDegree, FretboardError> {
  ScaleDegree::new(n).ok_or_else(|| report!(FretboardError::InvalidScaleDegree(n)))
}

/// A seven-note scale built from a root.
///
/// `notes[i]` is the note at `degrees[i]`; the two arrays are index-aligned.
/// Built once by [`ScaleEngine::build_major_scale`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleInfo {
  root: Note,
  notes: [Note; SCALE_LENGTH],
  degrees: [ScaleDegree; SCALE_LENGTH],
  intervals: [u8; SCALE_LENGTH],
}

impl ScaleInfo {
  pub fn root(&self) -> Note {
    self.root
  }

  pub fn notes(&self) -> &[Note; SCALE_LENGTH] {
    &self.notes
  }

  pub fn degrees(&self) -> &[ScaleDegree; SCALE_LENGTH] {
    &self.degrees
  }

  pub fn intervals(&self) -> &[u8; SCALE_LENGTH] {
    &self.intervals
  }

  /// e.g. `"F# major"`
  pub fn name(&self) -> String {
    format!("{} major", self.root)
  }

  /// The degree of `note` in this scale, or `None` if it isn't a member.
  pub fn degree_of(&self, note: Note) -> Option<ScaleDegree> {
    self
      .notes
      .iter()
      .position(|n| *n == note)
      .map(|i| self.degrees[i])
  }

  /// The note at `degree`, or `None` when `degree` is outside 1 ..= 7.
  pub fn note_at_degree(&self, degree: u8) -> Option<Note> {
    ScaleDegree::new(degree).map(|d| self.note_of(d))
  }

  /// Like [`Self::note_at_degree`], but an out-of-range degree is an error.
  pub fn require_note_at_degree(&self, degree: u8) -> Result<Note, FretboardError> {
    parse_degree(degree)
      .attach_printable_lazy(|| format!("looking up a degree of {}", self.name()))
      .map(|d| self.note_of(d))
  }

  /// Infallible lookup for an already-validated degree.
  pub fn note_of(&self, degree: ScaleDegree) -> Note {
    self.notes[(degree.get() - 1) as usize]
  }

  pub fn is_member(&self, note: Note) -> bool {
    self.degree_of(note).is_some()
  }

  /// The chromatic notes that are not in this scale.
  pub fn excluded_notes(&self) -> Vec<Note> {
    Note::ALL
      .iter()
      .copied()
      .filter(|n| !self.is_member(*n))
      .collect()
  }
}

/// Builds scales over an injected chromatic alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleEngine {
  chromatic: ChromaticSystem,
}

impl ScaleEngine {
  pub fn new(chromatic: ChromaticSystem) -> ScaleEngine {
    ScaleEngine { chromatic }
  }

  pub fn chromatic(&self) -> &ChromaticSystem {
    &self.chromatic
  }

  /// Walks [`MAJOR_INTERVALS`] from `root`, collecting seven notes.
  pub fn build_major_scale(&self, root: Note) -> ScaleInfo {
    let start = self.chromatic.index_of(root);
    let mut notes = [root; SCALE_LENGTH];
    let mut offset = 0usize;
    for (i, note) in notes.iter_mut().enumerate() {
      *note = self.chromatic.note_at(start + offset);
      offset += MAJOR_INTERVALS[i] as usize;
    }

    debug!("built {root} major: {notes:?}");
    ScaleInfo {
      root,
      notes,
      degrees: DEGREES,
      intervals: MAJOR_INTERVALS,
    }
  }

  /// Parses `root` and builds its major scale.
  pub fn build_major_scale_named(&self, root: &str) -> Result<ScaleInfo, FretboardError> {
    let root: Note = root.parse()?;
    Ok(self.build_major_scale(root))
  }
}
