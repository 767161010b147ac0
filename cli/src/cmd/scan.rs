use error_stack::{Result, ResultExt};
use fretboard_core::config::FretboardConfig;
use fretboard_core::theory::scan::FretPosition;
use fretboard_core::Fretboard;

use super::CliError;

pub fn run_scan(config: &FretboardConfig) -> Result<(), CliError> {
  let board = Fretboard::standard();
  let view = board.render(config).change_context(CliError::InvalidInput)?;

  println!("{} ({} frets)", view.scale.name(), config.fret_count);
  println!("string  fret  note  degree  label");
  for pos in view.open_strings.iter().chain(view.positions.iter()) {
    print_position(&board, config, pos);
  }
  Ok(())
}

fn print_position(board: &Fretboard, config: &FretboardConfig, pos: &FretPosition) {
  let degree = pos
    .scale_degree()
    .map(|d| d.get().to_string())
    .unwrap_or_else(|| String::from("-"));
  let label = board.label(pos, config.display);
  println!(
    "{:>6}  {:>4}  {:<4}  {:>6}  {} {}",
    pos.string(),
    pos.fret(),
    pos.note().name(),
    degree,
    label.text,
    label.background
  );
}
