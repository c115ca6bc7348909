//! # addonkit-docs
//!
//! Turn the `--[[@Begin … @End]]` annotation block of a Lua source file into
//! a markdown document written next to it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use addonkit_docs::{convert_file, RenderOptions};
//!
//! fn document(input: &Path) {
//!     if let Ok(result) = convert_file(input, &RenderOptions::default(), false) {
//!         println!("{}", result.path().display());
//!     }
//! }
//! ```

pub mod diff;
pub mod error;
pub mod parser;
pub mod render;
pub mod writer;

use std::path::{Path, PathBuf};

pub use diff::diff_document;
pub use error::DocError;
pub use parser::{parse, Document, Section, SectionKind};
pub use render::{render, RenderOptions};
pub use writer::{write_document, WriteResult};

use crate::error::io_err;

pub const OUTPUT_EXTENSION: &str = "md";

/// Where the document for `input` goes: same directory, extension replaced
/// by `.md` (appended when `input` has none).
pub fn output_path(input: &Path) -> Result<PathBuf, DocError> {
    let out = input.with_extension(OUTPUT_EXTENSION);
    if out == input {
        return Err(DocError::OutputIsInput {
            path: input.to_path_buf(),
        });
    }
    Ok(out)
}

/// A scanned and rendered input, not yet written.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub input: PathBuf,
    pub output: PathBuf,
    pub document: Document,
    pub rendered: String,
}

/// Read `input`, scan its annotation block, and render the markdown.
pub fn extract_file(input: &Path, options: &RenderOptions) -> Result<Extraction, DocError> {
    let output = output_path(input)?;
    let source = std::fs::read_to_string(input).map_err(|e| io_err(input, e))?;
    let document = parse(&source);
    if document.is_empty() {
        tracing::warn!(input = %input.display(), "no annotated sections found");
    }
    let rendered = render(&document, options);
    Ok(Extraction {
        input: input.to_path_buf(),
        output,
        document,
        rendered,
    })
}

/// [`extract_file`] followed by a hash-gated write of the output.
pub fn convert_file(
    input: &Path,
    options: &RenderOptions,
    dry_run: bool,
) -> Result<WriteResult, DocError> {
    let extraction = extract_file(input, options)?;
    write_document(&extraction.output, &extraction.rendered, dry_run)
}
