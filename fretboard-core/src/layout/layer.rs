//! Visual stacking layers and enforcement of the kind -> layer mapping.
use log::{debug, warn};
use serde::Serialize;
use std::fmt::Display;

/// Front-to-back stacking order, lowest first.
///
/// The discriminants are the z-index values handed to the renderer. They are
/// fixed at compile time and strictly increase in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum Layer {
  FretDividers = 1,
  StringLines = 2,
  MarkerContainers = 3,
  NoteMarkers = 4,
}

impl Layer {
  pub const ALL: [Layer; 4] = [
    Layer::FretDividers,
    Layer::StringLines,
    Layer::MarkerContainers,
    Layer::NoteMarkers,
  ];

  pub fn z_index(&self) -> u8 {
    *self as u8
  }
}

impl Display for Layer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}({})", self, self.z_index())
  }
}

/// The kinds of element that make up a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
  /// Annotation band above or below the strings.
  PlaceholderRow,
  FretDivider,
  StringLine,
  /// The cell that hosts a note marker.
  MarkerContainer,
  NoteMarker,
}

impl ElementKind {
  /// Marker kinds must never share a (column, row, layer) triple.
  pub fn is_marker(&self) -> bool {
    matches!(self, ElementKind::MarkerContainer | ElementKind::NoteMarker)
  }
}

/// Anything that carries a kind and a layer tag that can drift apart.
pub trait Layered {
  fn kind(&self) -> ElementKind;
  fn layer(&self) -> Layer;
  fn set_layer(&mut self, layer: Layer);
}

/// An element whose layer disagrees with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMismatch {
  pub index: usize,
  pub kind: ElementKind,
  pub expected: Layer,
  pub actual: Layer,
}

impl Display for LayerMismatch {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "element {} ({:?}) is on layer {}, expected {}",
      self.index, self.kind, self.actual, self.expected
    )
  }
}

/// Owns the fixed kind -> layer mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerRegistry;

impl LayerRegistry {
  pub fn layer_for(kind: ElementKind) -> Layer {
    use ElementKind::*;
    match kind {
      PlaceholderRow | FretDivider => Layer::FretDividers,
      StringLine => Layer::StringLines,
      MarkerContainer => Layer::MarkerContainers,
      NoteMarker => Layer::NoteMarkers,
    }
  }

  /// True when [`Layer::ALL`] is strictly increasing by z-index.
  pub fn is_strictly_ordered() -> bool {
    Layer::ALL
      .windows(2)
      .all(|pair| pair[0].z_index() < pair[1].z_index())
  }

  /// Every element whose layer doesn't match its kind.
  pub fn mismatches<T: Layered>(elements: &[T]) -> Vec<LayerMismatch> {
    elements
      .iter()
      .enumerate()
      .filter_map(|(index, el)| {
        let expected = Self::layer_for(el.kind());
        let actual = el.layer();
        (expected != actual).then_some(LayerMismatch {
          index,
          kind: el.kind(),
          expected,
          actual,
        })
      })
      .collect()
  }

  /// Returns false if any element is on the wrong layer, logging each one.
  pub fn validate<T: Layered>(elements: &[T]) -> bool {
    let mismatches = Self::mismatches(elements);
    for m in &mismatches {
      warn!("layer mismatch: {m}");
    }
    mismatches.is_empty()
  }

  /// Rewrites every element's layer from its kind. Returns how many changed.
  pub fn enforce<T: Layered>(elements: &mut [T]) -> usize {
    let mut repaired = 0;
    for el in elements.iter_mut() {
      let expected = Self::layer_for(el.kind());
      if el.layer() != expected {
        el.set_layer(expected);
        repaired += 1;
      }
    }
    if repaired > 0 {
      debug!("repaired layers on {repaired} elements");
    }
    repaired
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Tagged(ElementKind, Layer);

  impl Layered for Tagged {
    fn kind(&self) -> ElementKind {
      self.0
    }
    fn layer(&self) -> Layer {
      self.1
    }
    fn set_layer(&mut self, layer: Layer) {
      self.1 = layer;
    }
  }

  #[test]
  fn test_layers_strictly_increase() {
    assert!(LayerRegistry::is_strictly_ordered());
    let z: Vec<u8> = Layer::ALL.iter().map(Layer::z_index).collect();
    assert_eq!(z, vec![1, 2, 3, 4]);
    assert!(Layer::FretDividers < Layer::NoteMarkers);
  }

  #[test]
  fn test_validate_reports_mismatches() {
    let elements = vec![
      Tagged(ElementKind::FretDivider, Layer::FretDividers),
      Tagged(ElementKind::NoteMarker, Layer::StringLines),
      Tagged(ElementKind::StringLine, Layer::StringLines),
    ];
    assert!(!LayerRegistry::validate(&elements));

    let mismatches = LayerRegistry::mismatches(&elements);
    assert_eq!(
      mismatches,
      vec![LayerMismatch {
        index: 1,
        kind: ElementKind::NoteMarker,
        expected: Layer::NoteMarkers,
        actual: Layer::StringLines,
      }]
    );
    assert_eq!(
      mismatches[0].to_string(),
      "element 1 (NoteMarker) is on layer StringLines(2), expected NoteMarkers(4)"
    );
  }

  #[test]
  fn test_enforce_is_idempotent() {
    let mut elements = vec![
      Tagged(ElementKind::PlaceholderRow, Layer::NoteMarkers),
      Tagged(ElementKind::MarkerContainer, Layer::FretDividers),
      Tagged(ElementKind::NoteMarker, Layer::NoteMarkers),
    ];
    assert_eq!(LayerRegistry::enforce(&mut elements), 2);
    assert!(LayerRegistry::validate(&elements));
    assert_eq!(LayerRegistry::enforce(&mut elements), 0);
    assert_eq!(elements[1].1, Layer::MarkerContainers);
  }
}
