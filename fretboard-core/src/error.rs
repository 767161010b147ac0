use error_stack::Context;
use std::fmt::Display;

/// Precondition failures raised by the theory and layout engines.
///
/// These all indicate a caller passing a value outside the legal domain.
/// A note that isn't in a scale, or a position with no scale degree, is a
/// normal result and is represented with `Option` / `bool` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FretboardError {
  InvalidRootNote(String),
  InvalidStringIndex {
    index: usize,
    string_count: usize,
  },
  InvalidFretNumber(i32),
  InvalidScaleDegree(u8),

  InvalidAlphabet(String),
  InvalidTuning(String),
  InvalidConfig(String),
}

impl Context for FretboardError {}

impl Display for FretboardError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use FretboardError::*;
    match self {
      InvalidRootNote(name) => write!(f, "invalid root note: {name:?}"),

      InvalidStringIndex {
        index,
        string_count,
      } => write!(
        f,
        "invalid string index {index}. Valid range is 0 .. {string_count}"
      ),

      InvalidFretNumber(n) => write!(f, "invalid fret number {n}"),

      InvalidScaleDegree(n) => write!(f, "invalid scale degree {n}. Valid range is 1 ..= 7"),

      InvalidAlphabet(msg) => write!(f, "invalid chromatic alphabet: {msg}"),

      InvalidTuning(msg) => write!(f, "invalid tuning: {msg}"),

      InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
    }
  }
}
