//! ime - script-driven raster image editor
//!
//! Loads images into named slots, runs filter commands over them and saves
//! the results.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "ime")]
#[command(author, version, about = "Script-driven raster image editor")]
#[command(long_about = "
Edits images held in named slots. Each line of a script is one command:

  load PATH NAME            # read a ppm/png/jpg file into slot NAME
  save PATH NAME            # write slot NAME (format from extension)
  run SCRIPT                # execute another script
  blur SRC DST [split P]    # any filter command
  exit                      # stop

Examples:
  ime run edit.txt
  ime exec load in.png img
  ime repl < commands.txt
  ime -v run edit.txt       # debug logging
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script file
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Read commands from stdin until `exit`
    Repl,

    /// Execute a single command given as arguments
    #[command(visible_alias = "x")]
    Exec(ExecArgs),

    /// List available filter commands
    Commands,
}

#[derive(Args)]
struct RunArgs {
    /// Script file
    script: PathBuf,
}

#[derive(Args)]
struct ExecArgs {
    /// Command name followed by its arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "ime=debug" } else { "ime=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ok = match cli.command {
        Commands::Run(args) => commands::run::run(args, cli.verbose)?,
        Commands::Repl => commands::repl::run(cli.verbose)?,
        Commands::Exec(args) => commands::exec::run(args, cli.verbose)?,
        Commands::Commands => {
            commands::list();
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
