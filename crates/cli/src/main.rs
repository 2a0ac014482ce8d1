mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// outreg - decide which paths on disk are build output
#[derive(Parser)]
#[command(name = "outreg")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Output manifest (default: $OUTREG_MANIFEST or ./outputs.json)
  #[arg(short, long, global = true)]
  manifest: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show registered output declarations and their resolved paths
  List {
    /// Only list declarations, without evaluating them
    #[arg(long)]
    unresolved: bool,
  },

  /// Report whether paths are owned by the build (exits 1 if any is not)
  Check {
    /// Paths to check, relative to the manifest base
    #[arg(required = true)]
    paths: Vec<PathBuf>,
  },

  /// Remove the given stale paths that the build owns
  Clean {
    /// Candidate paths, relative to the manifest base
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Show what would be removed without deleting anything
    #[arg(long)]
    dry_run: bool,
  },
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<bool> {
  let manifest = cli.manifest.as_deref();

  match cli.command {
    Commands::List { unresolved } => cmd::cmd_list(manifest, unresolved, cli.output).map(|()| true),
    Commands::Check { paths } => cmd::cmd_check(manifest, &paths, cli.output),
    Commands::Clean { paths, dry_run } => cmd::cmd_clean(manifest, &paths, dry_run, cli.output).map(|()| true),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::FAILURE,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
