mod layout;
mod scale;
mod scan;

use clap::{Args, Subcommand};
use error_stack::{Context, IntoReport, Result, ResultExt};
use std::fmt::Display;
use std::fs;
use std::path::Path;

use fretboard_core::config::FretboardConfig;
use fretboard_core::display::DisplayMode;
use fretboard_core::theory::chromatic::Note;
use fretboard_core::FretboardError;

use self::{layout::run_layout, scale::run_scale, scan::run_scan};

#[derive(Debug)]
pub enum CliError {
  InvalidInput,
  OutputFailed,
}

impl Context for CliError {}

impl Display for CliError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CliError::InvalidInput => write!(f, "invalid input"),
      CliError::OutputFailed => write!(f, "unable to write output"),
    }
  }
}

#[derive(Subcommand)]
pub enum CliCommand {
  /// Prints the notes and degrees of a major scale
  Scale {
    #[clap(value_parser)]
    key: String,
  },

  /// Lists every open string and in-scale fretted position
  Scan {
    #[clap(flatten)]
    opts: KeyOpts,
  },

  /// Prints the grid placement of every element for a key
  Layout {
    #[clap(flatten)]
    opts: KeyOpts,

    /// Emit JSON instead of a table
    #[clap(long)]
    json: bool,
  },
}

/// Options that override the preset.
#[derive(Args)]
pub struct KeyOpts {
  /// Root of the major scale, e.g. G, F#, Bb
  #[clap(short, long, value_parser)]
  key: Option<String>,

  /// Number of frets to lay out
  #[clap(short, long, value_parser)]
  frets: Option<u16>,

  /// "names" or "degrees"
  #[clap(short, long, value_parser)]
  display: Option<String>,
}

impl KeyOpts {
  fn resolve(&self, preset: Option<&Path>) -> Result<FretboardConfig, FretboardError> {
    let mut config = match preset {
      Some(path) => load_preset(path)?,
      None => FretboardConfig::default(),
    };

    if let Some(key) = &self.key {
      config.root = key.parse::<Note>()?;
    }
    if let Some(frets) = self.frets {
      config.fret_count = frets;
    }
    if let Some(display) = &self.display {
      config.display = display.parse::<DisplayMode>()?;
    }

    log::debug!("resolved config: {config:?}");
    Ok(config)
  }
}

fn load_preset(path: &Path) -> Result<FretboardConfig, FretboardError> {
  let contents = fs::read_to_string(path)
    .into_report()
    .change_context_lazy(|| {
      FretboardError::InvalidConfig(format!("unable to read preset {}", path.display()))
    })?;
  FretboardConfig::from_ini_str(&contents)
    .attach_printable_lazy(|| format!("loading preset {}", path.display()))
}

impl CliCommand {
  pub fn run(&self, preset: Option<&Path>) -> Result<(), CliError> {
    match self {
      Self::Scale { key } => run_scale(key),

      Self::Scan { opts } => {
        let config = opts.resolve(preset).change_context(CliError::InvalidInput)?;
        run_scan(&config)
      }

      Self::Layout { opts, json } => {
        let config = opts.resolve(preset).change_context(CliError::InvalidInput)?;
        run_layout(&config, *json)
      }
    }
  }
}
