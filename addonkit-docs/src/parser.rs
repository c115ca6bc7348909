//! Annotation block scanner.
//!
//! A block opens on a line starting with `--[[@Begin` and closes on any line
//! containing `@End]]`. Inside it, lines are classified into sections by a
//! literal keyword prefix (`Title:`, `Usage:`, …) after the Lua comment
//! prefix is stripped. Everything else accumulates in the current section's
//! buffer until the next keyword or the end marker flushes it.

use std::fmt;

pub const BEGIN_MARKER: &str = "--[[@Begin";
pub const END_MARKER: &str = "@End]]";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Title,
    Signature,
    Description,
    Parameters,
    Returns,
    Usage,
}

impl SectionKind {
    /// Keywords in match order.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Title,
        SectionKind::Signature,
        SectionKind::Description,
        SectionKind::Parameters,
        SectionKind::Returns,
        SectionKind::Usage,
    ];

    /// The keyword token, colon included.
    pub fn keyword(self) -> &'static str {
        match self {
            SectionKind::Title => "Title:",
            SectionKind::Signature => "Signature:",
            SectionKind::Description => "Description:",
            SectionKind::Parameters => "Parameters:",
            SectionKind::Returns => "Returns:",
            SectionKind::Usage => "Usage:",
        }
    }

    /// Match a keyword at the very start of `line`; returns the kind and the
    /// text after the colon.
    pub fn match_prefix(line: &str) -> Option<(SectionKind, &str)> {
        Self::ALL
            .iter()
            .find_map(|k| line.strip_prefix(k.keyword()).map(|rest| (*k, rest)))
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One completed section: its keyword and the lines buffered under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<String>,
}

/// Result of scanning one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
    /// The input ended inside a block.
    pub unterminated: bool,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside {
        section: Option<SectionKind>,
        buffer: Vec<String>,
    },
}

/// Line-at-a-time state machine; [`parse`] drives it over a whole string.
#[derive(Debug)]
pub struct Scanner {
    state: ScanState,
    sections: Vec<Section>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Outside,
            sections: Vec::new(),
        }
    }

    pub fn feed(&mut self, raw: &str) {
        let line = raw.trim();

        if line.starts_with(BEGIN_MARKER) {
            if self.state == ScanState::Outside {
                self.state = ScanState::Inside {
                    section: None,
                    buffer: Vec::new(),
                };
            }
            return;
        }

        if line.contains(END_MARKER) {
            if let ScanState::Inside { section, buffer } =
                std::mem::replace(&mut self.state, ScanState::Outside)
            {
                flush(section, buffer, &mut self.sections);
            }
            return;
        }

        let ScanState::Inside { section, buffer } = &mut self.state else {
            return;
        };

        let line = strip_comment_prefix(line);
        if let Some((kind, rest)) = SectionKind::match_prefix(line) {
            flush(*section, std::mem::take(buffer), &mut self.sections);
            *section = Some(kind);
            let rest = rest.trim();
            if !rest.is_empty() {
                buffer.push(rest.to_owned());
            }
        } else {
            buffer.push(line.to_owned());
        }
    }

    pub fn finish(mut self) -> Document {
        let mut unterminated = false;
        if let ScanState::Inside { section, buffer } =
            std::mem::replace(&mut self.state, ScanState::Outside)
        {
            unterminated = true;
            tracing::warn!(section = ?section, "annotation block has no end marker");
            if section == Some(SectionKind::Usage) && buffer.is_empty() {
                // An opened Usage fence is always closed in the output.
                self.sections.push(Section {
                    kind: SectionKind::Usage,
                    lines: Vec::new(),
                });
            } else {
                flush(section, buffer, &mut self.sections);
            }
        }
        Document {
            sections: self.sections,
            unterminated,
        }
    }
}

/// Scan `input` and return every section found in its annotation block(s).
pub fn parse(input: &str) -> Document {
    let mut scanner = Scanner::new();
    for line in input.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

/// `-- text` → `text`; `--- - item` → `- item`.
fn strip_comment_prefix(line: &str) -> &str {
    if line.starts_with("--") {
        line.trim_start_matches('-').trim_start()
    } else {
        line
    }
}

fn flush(section: Option<SectionKind>, buffer: Vec<String>, out: &mut Vec<Section>) {
    if buffer.is_empty() {
        return;
    }
    match section {
        Some(kind) => out.push(Section {
            kind,
            lines: buffer,
        }),
        None => tracing::debug!(lines = buffer.len(), "text before first keyword ignored"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
