use error_stack::{IntoReport, Result, ResultExt};
use fretboard_core::config::FretboardConfig;
use fretboard_core::layout::assembler::{ElementPayload, GridElement};
use fretboard_core::layout::coords::GridSpan;
use fretboard_core::Fretboard;

use super::CliError;

pub fn run_layout(config: &FretboardConfig, json: bool) -> Result<(), CliError> {
  let view = Fretboard::standard()
    .render(config)
    .change_context(CliError::InvalidInput)?;

  if json {
    let out = serde_json::to_string_pretty(&view)
      .into_report()
      .change_context(CliError::OutputFailed)?;
    println!("{out}");
    return Ok(());
  }

  let table = &view.layout;
  println!(
    "{} / {} columns x {} rows / {} elements",
    view.scale.name(),
    table.column_count(),
    table.row_count(),
    table.elements().len()
  );
  println!("{:<16}  {:>7}  {:>5}  {:<18}  detail", "kind", "columns", "rows", "layer");
  for el in table.elements() {
    print_element(el);
  }
  Ok(())
}

fn span(s: GridSpan) -> String {
  if s.is_single() {
    s.start.to_string()
  } else {
    format!("{}-{}", s.start, s.end)
  }
}

fn print_element(el: &GridElement) {
  let detail = match &el.payload {
    ElementPayload::PlaceholderRow { band } => format!("{band:?}"),
    ElementPayload::FretDivider { fret } => format!("fret {fret}"),
    ElementPayload::StringLine { string, open_note } => format!("string {string} ({open_note})"),
    ElementPayload::MarkerContainer { string, fret } => format!("{string}/{fret}"),
    ElementPayload::NoteMarker { note, label, .. } => match label {
      Some(l) => format!("{note} [{}] {}", l.text, l.background),
      None => note.to_string(),
    },
  };
  println!(
    "{:<16}  {:>7}  {:>5}  {:<18}  {detail}",
    format!("{:?}", el.kind()),
    span(el.position.column),
    span(el.position.row),
    el.position.layer.to_string(),
  );
}
