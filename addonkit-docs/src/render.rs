//! Markdown rendering of a scanned [`Document`].
//!
//! | Section            | Output                                            |
//! |--------------------|---------------------------------------------------|
//! | `Usage`            | `**Usage:**` + fenced code block tagged `lang`    |
//! | any, with `-` line | `**Kind:**` + lines joined by `\n` (list)         |
//! | any other          | `**Kind:**` + lines joined by a space (paragraph) |
//!
//! Fragments are separated by one blank line.

use crate::parser::{Document, Section, SectionKind};

pub const DEFAULT_FENCE_LANGUAGE: &str = "lua";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Info string on the opening fence of `Usage` blocks.
    pub fence_language: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fence_language: DEFAULT_FENCE_LANGUAGE.to_owned(),
        }
    }
}

pub fn render(doc: &Document, options: &RenderOptions) -> String {
    let fragments: Vec<String> = doc
        .sections
        .iter()
        .map(|s| render_section(s, options))
        .collect();
    if fragments.is_empty() {
        return String::new();
    }
    let mut out = fragments.join("\n\n");
    out.push('\n');
    out
}

pub fn render_section(section: &Section, options: &RenderOptions) -> String {
    let header = format!("**{}**", section.kind);
    if section.kind == SectionKind::Usage {
        let code = section.lines.join("\n");
        return format!(
            "{header}\n```{}\n{}\n```",
            options.fence_language,
            code.trim()
        );
    }

    let is_list = section.lines.iter().any(|l| l.trim().starts_with('-'));
    let body = if is_list {
        section.lines.join("\n")
    } else {
        section.lines.join(" ")
    };
    format!("{header}\n{body}")
}
