use error_stack::{Result, ResultExt};
use fretboard_core::theory::scale::ScaleEngine;

use super::CliError;

pub fn run_scale(key: &str) -> Result<(), CliError> {
  let scale = ScaleEngine::default()
    .build_major_scale_named(key)
    .change_context(CliError::InvalidInput)?;

  println!("{}", scale.name());
  for (note, degree) in scale.notes().iter().zip(scale.degrees()) {
    println!("  {}  {note}", degree.get());
  }
  Ok(())
}
