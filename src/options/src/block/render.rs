// modflowrs-options/src/block/render.rs

//! Writing option blocks in block or line form.

use super::{OptionBlock, RepresentationMode};
use std::fmt;
use std::io::{self, Write};

impl OptionBlock {
    /// Render in the current representation mode. No trailing newline.
    pub fn render(&self) -> String {
        self.render_as(self.mode)
    }

    /// Render in `mode` without changing the block.
    pub fn render_as(&self, mode: RepresentationMode) -> String {
        let entries = self.rendered_entries();
        match mode {
            RepresentationMode::Block => {
                let mut lines = Vec::with_capacity(entries.len() + 2);
                lines.push("OPTIONS".to_string());
                lines.extend(entries);
                lines.push("END".to_string());
                lines.join("\n")
            }
            RepresentationMode::Line => entries.join(" "),
        }
    }

    /// One entry per enabled option in declaration order, then any verbatim
    /// entries from a tolerant parse.
    fn rendered_entries(&self) -> Vec<String> {
        let mut entries: Vec<String> = self
            .enabled()
            .map(|(name, values)| {
                std::iter::once(name.to_uppercase())
                    .chain(values.iter().map(ToString::to_string))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        entries.extend(self.unrecognized.iter().cloned());
        entries
    }

    /// Write the rendered block followed by a newline.
    ///
    /// A line-form block with nothing enabled writes nothing.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let text = self.render();
        if text.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", text)
    }
}

impl fmt::Display for OptionBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
