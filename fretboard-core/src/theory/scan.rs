//! Enumerates the positions of a scale across the fingerboard.
use error_stack::Result;
use log::debug;
use serde::Serialize;

use super::chromatic::Note;
use super::scale::{ScaleDegree, ScaleEngine, ScaleInfo};
use super::tuning::PositionResolver;
use crate::error::FretboardError;

/// A single (string, fret) position and what sounds there.
///
/// `is_in_scale` is always equivalent to `scale_degree.is_some()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FretPosition {
  string: usize,
  fret: u16,
  note: Note,
  scale_degree: Option<ScaleDegree>,
  is_in_scale: bool,
}

impl FretPosition {
  pub fn new(string: usize, fret: u16, note: Note, scale_degree: Option<ScaleDegree>) -> Self {
    FretPosition {
      string,
      fret,
      note,
      scale_degree,
      is_in_scale: scale_degree.is_some(),
    }
  }

  pub fn string(&self) -> usize {
    self.string
  }

  pub fn fret(&self) -> u16 {
    self.fret
  }

  pub fn note(&self) -> Note {
    self.note
  }

  pub fn scale_degree(&self) -> Option<ScaleDegree> {
    self.scale_degree
  }

  pub fn is_in_scale(&self) -> bool {
    self.is_in_scale
  }

  pub fn is_open(&self) -> bool {
    self.fret == 0
  }
}

/// Combines a [`ScaleEngine`] and a [`PositionResolver`] to find where a
/// scale's notes fall on the instrument.
///
/// Every call recomputes from scratch; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct FretboardScanner {
  engine: ScaleEngine,
  resolver: PositionResolver,
}

impl FretboardScanner {
  pub fn new(engine: ScaleEngine, resolver: PositionResolver) -> FretboardScanner {
    FretboardScanner { engine, resolver }
  }

  pub fn engine(&self) -> &ScaleEngine {
    &self.engine
  }

  pub fn resolver(&self) -> &PositionResolver {
    &self.resolver
  }

  pub fn string_count(&self) -> usize {
    self.resolver.string_count()
  }

  fn position(
    &self,
    scale: &ScaleInfo,
    string: usize,
    fret: u16,
  ) -> Result<FretPosition, FretboardError> {
    let note = self.resolver.note_at(string, i32::from(fret))?;
    Ok(FretPosition::new(string, fret, note, scale.degree_of(note)))
  }

  /// Every position on every string for frets `0 ..= max_fret`, in string
  /// then fret order, whether or not it belongs to the scale.
  pub fn scan_all(&self, scale: &ScaleInfo, max_fret: u16) -> Result<Vec<FretPosition>, FretboardError> {
    let mut positions = Vec::with_capacity(self.string_count() * (max_fret as usize + 1));
    for string in 0..self.string_count() {
      for fret in 0..=max_fret {
        positions.push(self.position(scale, string, fret)?);
      }
    }
    Ok(positions)
  }

  /// The fretted positions that belong to `scale`, frets `1 ..= max_fret`.
  ///
  /// Open strings are not included; see [`Self::open_strings`].
  pub fn scan_scale(&self, scale: &ScaleInfo, max_fret: u16) -> Result<Vec<FretPosition>, FretboardError> {
    let mut positions = Vec::new();
    for string in 0..self.string_count() {
      for fret in 1..=max_fret {
        let pos = self.position(scale, string, fret)?;
        if pos.is_in_scale() {
          positions.push(pos);
        }
      }
    }

    debug!(
      "scanned {} in-scale positions for {} up to fret {max_fret}",
      positions.len(),
      scale.name()
    );
    Ok(positions)
  }

  /// Builds the major scale on `root` and scans it.
  pub fn scan(&self, root: Note, max_fret: u16) -> Result<Vec<FretPosition>, FretboardError> {
    let scale = self.engine.build_major_scale(root);
    self.scan_scale(&scale, max_fret)
  }

  /// One fret-0 position per string, present whether or not the open note
  /// is in the scale.
  pub fn open_strings(&self, scale: &ScaleInfo) -> Result<Vec<FretPosition>, FretboardError> {
    (0..self.string_count())
      .map(|string| self.position(scale, string, 0))
      .collect()
  }
}
