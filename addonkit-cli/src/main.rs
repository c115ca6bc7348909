//! addonkit — addon repository mirroring and Lua doc extraction.
//!
//! # Usage
//!
//! ```text
//! addonkit mirror [--config <path>] [--dry-run] [--json | --table]
//! addonkit doc <input>... [--lang <name>] [--dry-run] [--diff]
//! addonkit config init [--force]
//! addonkit config show [--config <path>]
//! addonkit config path
//! ```

mod commands;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{config::ConfigCommand, doc::DocArgs, mirror::MirrorArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "addonkit",
    version,
    about = "Mirror an addon repository into game folders and extract Lua API docs",
    long_about = None,
)]
struct Cli {
    /// Log debug detail to stderr.
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone the configured repository and copy it into every destination.
    Mirror(MirrorArgs),

    /// Convert the annotation block of Lua source files to markdown.
    Doc(DocArgs),

    /// Inspect or create the mirror config file.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::Verbosity::from_flags(cli.verbose, cli.quiet));
    match cli.command {
        Commands::Mirror(args) => args.run(),
        Commands::Doc(args) => args.run(),
        Commands::Config { command } => commands::config::run(command),
    }
}
