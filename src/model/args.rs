use clap::{arg, command, Parser};

/// Server CLI: `--config-path` overrides the default settings file looked up
/// via `COMMENTABLE_CONFIG`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  #[arg(short, long)]
  pub config_path: Option<String>,
}
