//! Wires the theory and layout engines together for one render cycle.
use error_stack::{Result, ResultExt};
use log::debug;
use serde::Serialize;

use crate::color::palette::DegreePalette;
use crate::config::{check_fret_count, FretboardConfig};
use crate::display::{DisplayMode, MarkerLabel};
use crate::error::FretboardError;
use crate::layout::assembler::{LayoutAssembler, LayoutTable};
use crate::layout::coords::CoordinateMapper;
use crate::theory::chromatic::{ChromaticSystem, Note};
use crate::theory::scale::{ScaleEngine, ScaleInfo};
use crate::theory::scan::{FretPosition, FretboardScanner};
use crate::theory::tuning::{PositionResolver, Tuning};

/// Everything the presentation layer needs to draw one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FretboardView {
  pub scale: ScaleInfo,
  pub display: DisplayMode,
  /// In-scale fretted positions, string then fret order.
  pub positions: Vec<FretPosition>,
  /// One position per string at fret 0.
  pub open_strings: Vec<FretPosition>,
  pub layout: LayoutTable,
}

/// The scanner, assembler and palette for a single instrument.
///
/// Holds only immutable configuration, so [`Fretboard::render`] is a pure
/// function of its arguments.
#[derive(Debug, Clone)]
pub struct Fretboard {
  scanner: FretboardScanner,
  assembler: LayoutAssembler,
  palette: DegreePalette,
}

impl Fretboard {
  pub fn new(
    chromatic: ChromaticSystem,
    tuning: Tuning,
    placeholder_rows: u32,
    palette: DegreePalette,
  ) -> Fretboard {
    let mapper = CoordinateMapper::new(tuning.string_count(), placeholder_rows);
    let assembler = LayoutAssembler::new(mapper, tuning.open_strings().to_vec());
    let scanner = FretboardScanner::new(
      ScaleEngine::new(chromatic),
      PositionResolver::new(chromatic, tuning),
    );
    Fretboard {
      scanner,
      assembler,
      palette,
    }
  }

  /// Standard six-string tuning, one annotation row above and below the
  /// strings, and the default palette.
  pub fn standard() -> Fretboard {
    Fretboard::new(
      ChromaticSystem::standard(),
      Tuning::standard(),
      1,
      DegreePalette::default(),
    )
  }

  pub fn scanner(&self) -> &FretboardScanner {
    &self.scanner
  }

  pub fn assembler(&self) -> &LayoutAssembler {
    &self.assembler
  }

  pub fn palette(&self) -> &DegreePalette {
    &self.palette
  }

  pub fn scale(&self, root: Note) -> ScaleInfo {
    self.scanner.engine().build_major_scale(root)
  }

  pub fn label(&self, position: &FretPosition, mode: DisplayMode) -> MarkerLabel {
    MarkerLabel::for_position(position, mode, &self.palette)
  }

  /// Scans the key, assembles the layout and places a labelled marker for
  /// every open string and in-scale position.
  pub fn render(&self, config: &FretboardConfig) -> Result<FretboardView, FretboardError> {
    let fret_count = check_fret_count(config.fret_count)?;
    let scale = self.scale(config.root);

    let positions = self
      .scanner
      .scan_scale(&scale, fret_count)
      .attach_printable_lazy(|| format!("scanning {}", scale.name()))?;
    let open_strings = self.scanner.open_strings(&scale)?;

    let mut layout = self.assembler.assemble(fret_count)?;
    let label = |p: &FretPosition| Some(self.label(p, config.display));
    self
      .assembler
      .place_markers(&mut layout, &open_strings, label)?;
    self
      .assembler
      .place_markers(&mut layout, &positions, label)?;

    debug!(
      "rendered {} with {} frets: {} markers, {} layout elements",
      scale.name(),
      fret_count,
      positions.len() + open_strings.len(),
      layout.elements().len()
    );

    Ok(FretboardView {
      scale,
      display: config.display,
      positions,
      open_strings,
      layout,
    })
  }
}

impl Default for Fretboard {
  fn default() -> Self {
    Fretboard::standard()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::layout::assembler::ElementPayload;
  use crate::layout::layer::{ElementKind, Layer};

  #[test]
  fn test_render_c_major() {
    let board = Fretboard::standard();
    let view = board.render(&FretboardConfig::default()).unwrap();

    assert_eq!(view.scale.notes(), &[Note::C, Note::D, Note::E, Note::F, Note::G, Note::A, Note::B]);
    assert_eq!(view.open_strings.len(), 6);

    let markers = view.layout.iter_kind(ElementKind::NoteMarker).count();
    assert_eq!(markers, view.positions.len() + 6);
    assert_eq!(
      view.layout.iter_kind(ElementKind::MarkerContainer).count(),
      markers
    );
    assert!(view.layout.validate_layers());
  }

  #[test]
  fn test_render_labels_by_degree() {
    let board = Fretboard::standard();
    let config = FretboardConfig {
      root: Note::G,
      fret_count: 5,
      display: DisplayMode::ScaleDegrees,
    };
    let view = board.render(&config).unwrap();

    // low E string, 2nd fret is F#: degree 7 of G major
    let marker = view
      .layout
      .iter_layer(Layer::NoteMarkers)
      .find(|e| matches!(e.payload, ElementPayload::NoteMarker { string: 0, fret: 2, .. }))
      .unwrap();
    match &marker.payload {
      ElementPayload::NoteMarker { note, label, .. } => {
        assert_eq!(*note, Note::Fsh);
        assert_eq!(label.as_ref().unwrap().text, "7");
      }
      other => panic!("unexpected payload {other:?}"),
    }
  }

  #[test]
  fn test_render_rejects_long_fingerboards() {
    let board = Fretboard::standard();
    let config = FretboardConfig {
      fret_count: 37,
      ..FretboardConfig::default()
    };
    let err = board.render(&config).unwrap_err();
    assert_eq!(err.current_context(), &FretboardError::InvalidFretNumber(37));
  }
}
