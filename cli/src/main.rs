mod cmd;

use crate::cmd::CliCommand;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Cli {
  /// Ini preset to read the key, fret count and display mode from
  #[clap(long, global = true, value_parser)]
  config: Option<PathBuf>,

  /// Log at debug level unless RUST_LOG says otherwise
  #[clap(short, long, global = true)]
  verbose: bool,

  #[clap(subcommand)]
  command: CliCommand,
}

fn main() {
  let cli = Cli::parse();

  let default_log_level = if cli.verbose { "debug" } else { "warn" };
  let env = env_logger::Env::default().filter_or("RUST_LOG", default_log_level);
  env_logger::init_from_env(env);

  if let Err(err) = cli.command.run(cli.config.as_deref()) {
    log::error!("{err:?}");
    eprintln!("error: {err}");
    std::process::exit(1);
  }
}
