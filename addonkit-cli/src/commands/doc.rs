//! `addonkit doc <input>...` — write `<input>.md` from each annotation block.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use addonkit_docs::{
    convert_file, diff_document, extract_file, render::DEFAULT_FENCE_LANGUAGE, RenderOptions,
    WriteResult,
};

/// Arguments for `addonkit doc`.
#[derive(Args, Debug)]
pub struct DocArgs {
    /// Lua source file(s) containing a `--[[@Begin … @End]]` block.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Language tag for the Usage code fence.
    #[arg(long, default_value = DEFAULT_FENCE_LANGUAGE)]
    pub lang: String,

    /// Show what would be written without writing.
    #[arg(long)]
    pub dry_run: bool,

    /// Print a unified diff against the existing output instead of writing.
    #[arg(long, conflicts_with = "dry_run")]
    pub diff: bool,
}

impl DocArgs {
    pub fn run(self) -> Result<()> {
        let options = RenderOptions {
            fence_language: self.lang.clone(),
        };
        for input in &self.inputs {
            tracing::debug!(input = %input.display(), diff = self.diff, dry_run = self.dry_run, "processing");
            if self.diff {
                let extraction = extract_file(input, &options)
                    .with_context(|| format!("failed to read '{}'", input.display()))?;
                let diff = diff_document(&extraction.output, &extraction.rendered)
                    .with_context(|| format!("diff failed for '{}'", input.display()))?;
                if let Some(diff) = diff {
                    print!("{diff}");
                    if !diff.ends_with('\n') {
                        println!();
                    }
                }
            } else {
                let result = convert_file(input, &options, self.dry_run)
                    .with_context(|| format!("failed to convert '{}'", input.display()))?;
                tracing::debug!(output = %result.path().display(), "done");
                print_result(&result);
            }
        }
        Ok(())
    }
}

fn print_result(result: &WriteResult) {
    match result {
        WriteResult::Written { path } => println!("{} {}", "✎".green(), path.display()),
        WriteResult::WouldWrite { path } => println!("[dry-run] ~ {}", path.display()),
        WriteResult::Unchanged { path } => println!("· {} (unchanged)", path.display()),
    }
}
