//! Builds the full placement table for a fingerboard of a given length.
use std::collections::HashSet;

use error_stack::Result;
use log::{debug, warn};
use serde::Serialize;

use super::coords::{CoordinateMapper, GridPosition, GridSpan};
use super::layer::{ElementKind, Layer, LayerRegistry, Layered};
use crate::display::MarkerLabel;
use crate::error::FretboardError;
use crate::theory::chromatic::Note;
use crate::theory::scale::ScaleDegree;
use crate::theory::scan::FretPosition;
use crate::theory::tuning::Tuning;

/// Which annotation band a placeholder row fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Band {
  Top,
  Bottom,
}

/// Kind-specific data carried by a [`GridElement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ElementPayload {
  PlaceholderRow {
    band: Band,
  },
  FretDivider {
    fret: u16,
  },
  StringLine {
    string: usize,
    open_note: Note,
  },
  MarkerContainer {
    string: usize,
    fret: u16,
  },
  NoteMarker {
    string: usize,
    fret: u16,
    note: Note,
    degree: Option<ScaleDegree>,
    open: bool,
    label: Option<MarkerLabel>,
  },
}

impl ElementPayload {
  pub fn kind(&self) -> ElementKind {
    use ElementPayload::*;
    match self {
      PlaceholderRow { .. } => ElementKind::PlaceholderRow,
      FretDivider { .. } => ElementKind::FretDivider,
      StringLine { .. } => ElementKind::StringLine,
      MarkerContainer { .. } => ElementKind::MarkerContainer,
      NoteMarker { .. } => ElementKind::NoteMarker,
    }
  }
}

/// One placed element. Its kind is read from its payload, so editing the
/// payload through [`LayoutTable::elements_mut`] also changes the layer
/// [`LayerRegistry::enforce`] will assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridElement {
  pub position: GridPosition,
  pub payload: ElementPayload,
}

impl GridElement {
  fn new(column: GridSpan, row: GridSpan, payload: ElementPayload) -> GridElement {
    GridElement {
      position: GridPosition {
        column,
        row,
        layer: LayerRegistry::layer_for(payload.kind()),
      },
      payload,
    }
  }

  pub fn kind(&self) -> ElementKind {
    self.payload.kind()
  }
}

impl Layered for GridElement {
  fn kind(&self) -> ElementKind {
    self.payload.kind()
  }

  fn layer(&self) -> Layer {
    self.position.layer
  }

  fn set_layer(&mut self, layer: Layer) {
    self.position.layer = layer;
  }
}

/// Every element for one fret count, in construction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutTable {
  fret_count: u16,
  column_count: u32,
  row_count: u32,
  elements: Vec<GridElement>,
  /// Cells already holding a marker, one entry per marker layer.
  #[serde(skip)]
  occupied: HashSet<GridPosition>,
}

impl LayoutTable {
  pub fn fret_count(&self) -> u16 {
    self.fret_count
  }

  pub fn column_count(&self) -> u32 {
    self.column_count
  }

  pub fn row_count(&self) -> u32 {
    self.row_count
  }

  pub fn elements(&self) -> &[GridElement] {
    &self.elements
  }

  /// Mutable access for callers that adjust elements after assembly. Use
  /// [`LayerRegistry::enforce`] to repair any layer drift this introduces.
  pub fn elements_mut(&mut self) -> &mut [GridElement] {
    &mut self.elements
  }

  pub fn iter_kind(&self, kind: ElementKind) -> impl Iterator<Item = &GridElement> + '_ {
    self.elements.iter().filter(move |e| e.kind() == kind)
  }

  pub fn iter_layer(&self, layer: Layer) -> impl Iterator<Item = &GridElement> + '_ {
    self.elements.iter().filter(move |e| e.position.layer == layer)
  }

  pub fn validate_layers(&self) -> bool {
    LayerRegistry::validate(&self.elements)
  }

  pub fn enforce_layers(&mut self) -> usize {
    LayerRegistry::enforce(&mut self.elements)
  }

  /// Whether a marker of either kind already sits in this cell.
  pub fn is_occupied(&self, column: u32, row: u32) -> bool {
    [Layer::MarkerContainers, Layer::NoteMarkers]
      .into_iter()
      .any(|layer| self.occupied.contains(&GridPosition::cell(column, row, layer)))
  }

  fn push(&mut self, element: GridElement) {
    let GridPosition { column, row, .. } = element.position;
    assert!(
      column.within(self.column_count) && row.within(self.row_count),
      "{:?} at columns {column:?} rows {row:?} is outside the {}x{} grid",
      element.kind(),
      self.column_count,
      self.row_count
    );
    if element.kind().is_marker() {
      let fresh = self.occupied.insert(element.position);
      assert!(fresh, "two markers at {:?}", element.position);
    }
    self.elements.push(element);
  }
}

/// Produces [`LayoutTable`]s using a [`CoordinateMapper`].
#[derive(Debug, Clone)]
pub struct LayoutAssembler {
  mapper: CoordinateMapper,
  open_strings: Vec<Note>,
}

impl LayoutAssembler {
  /// `open_strings` are the tuning's open notes, lowest string first; there
  /// must be one per string the mapper knows about.
  pub fn new(mapper: CoordinateMapper, open_strings: Vec<Note>) -> LayoutAssembler {
    assert_eq!(
      mapper.string_count(),
      open_strings.len(),
      "mapper and tuning disagree on the number of strings"
    );
    LayoutAssembler {
      mapper,
      open_strings,
    }
  }

  pub fn mapper(&self) -> &CoordinateMapper {
    &self.mapper
  }

  /// Fret dividers, string lines and placeholder rows for `fret_count` frets.
  pub fn assemble(&self, fret_count: u16) -> Result<LayoutTable, FretboardError> {
    let columns = GridSpan::new(1, self.mapper.column_count(fret_count));
    let mut table = LayoutTable {
      fret_count,
      column_count: columns.end,
      row_count: self.mapper.total_row_count(),
      elements: Vec::with_capacity(fret_count as usize + self.open_strings.len() + 2),
      occupied: HashSet::new(),
    };

    let placeholders = self.mapper.placeholder_rows();
    if placeholders > 0 {
      table.push(GridElement::new(
        columns,
        GridSpan::new(1, placeholders),
        ElementPayload::PlaceholderRow { band: Band::Top },
      ));
    }

    let playable = self.mapper.playable_rows();
    for fret in 1..=fret_count {
      table.push(GridElement::new(
        GridSpan::single(self.mapper.to_column(fret)),
        playable,
        ElementPayload::FretDivider { fret },
      ));
    }

    for (string, open_note) in self.open_strings.iter().enumerate() {
      table.push(GridElement::new(
        columns,
        GridSpan::single(self.mapper.to_row(string)?),
        ElementPayload::StringLine {
          string,
          open_note: *open_note,
        },
      ));
    }

    if placeholders > 0 {
      table.push(GridElement::new(
        columns,
        GridSpan::new(playable.end + 1, table.row_count),
        ElementPayload::PlaceholderRow { band: Band::Bottom },
      ));
    }

    debug!(
      "assembled {} layout elements for {fret_count} frets",
      table.elements.len()
    );
    Ok(table)
  }

  /// Places a marker container and a note marker for each position and
  /// returns how many positions were placed.
  ///
  /// A position whose cell already holds a marker is skipped, so each cell
  /// carries at most one container and one note marker. `label` is called
  /// once per placed position. Positions past the table's last fret are a
  /// caller defect and panic.
  pub fn place_markers<F>(
    &self,
    table: &mut LayoutTable,
    positions: &[FretPosition],
    mut label: F,
  ) -> Result<usize, FretboardError>
  where
    F: FnMut(&FretPosition) -> Option<MarkerLabel>,
  {
    let mut placed = 0;
    for pos in positions {
      let (column, row) = self.mapper.cell(pos.string(), pos.fret())?;
      if table.is_occupied(column, row) {
        warn!(
          "string {} fret {} already has a marker, skipping",
          pos.string(),
          pos.fret()
        );
        continue;
      }
      let (column, row) = (GridSpan::single(column), GridSpan::single(row));

      table.push(GridElement::new(
        column,
        row,
        ElementPayload::MarkerContainer {
          string: pos.string(),
          fret: pos.fret(),
        },
      ));
      table.push(GridElement::new(
        column,
        row,
        ElementPayload::NoteMarker {
          string: pos.string(),
          fret: pos.fret(),
          note: pos.note(),
          degree: pos.scale_degree(),
          open: pos.is_open(),
          label: label(pos),
        },
      ));
      placed += 1;
    }
    Ok(placed)
  }
}

impl Default for LayoutAssembler {
  fn default() -> Self {
    LayoutAssembler::new(
      CoordinateMapper::standard(),
      Tuning::standard().open_strings().to_vec(),
    )
  }
}
