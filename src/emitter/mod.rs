//! C++ source emission
//!
//! This module handles:
//! - Rendering one self-contained unit per resource ([`resource`])
//! - Rendering the `ResourcesDB` aggregator that re-exports every resource unit ([`aggregator`])
//!
//! Nesting depth is carried by an explicit [`Indent`] value passed to every line
//! written, never by shared state.

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

pub mod aggregator;
pub mod resource;

pub use aggregator::emit_aggregator;
pub use resource::emit_resource;

/// Name of the aggregator unit
pub const AGGREGATOR_NAME: &str = "ResourcesDB";

/// Start of the banner line that marks every generated unit
pub const BANNER_PREFIX: &str = "// Generated by resembed";

/// Whether `head`, the first bytes of a file, belongs to a unit this tool emitted.
///
/// The banner sits on the first line, or on the second when a PCH include precedes it.
pub fn is_generated_source(head: &str) -> bool {
    head.lines().take(2).any(|line| line.starts_with(BANNER_PREFIX))
}

/// Kind of C++ source emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// C++20 module interface units (`.cppm`)
    #[default]
    Module,
    /// Header files (`.h`)
    Header,
}

impl OutputFormat {
    /// File extension of generated units
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Module => "cppm",
            OutputFormat::Header => "h",
        }
    }

    /// Output file name for a unit called `name`
    pub fn file_name(self, name: &str) -> String {
        format!("{}.{}", name, self.extension())
    }
}

/// Settings shared by every emitted unit of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Namespace wrapping every generated struct
    pub namespace: String,
    /// Header included on the first line of every unit, if any
    pub pch_header: Option<String>,
    pub format: OutputFormat,
}

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Unit name: the resource identifier, or [`AGGREGATOR_NAME`]
    pub name: String,
    /// File name inside the output directory
    pub file_name: String,
    pub contents: String,
}

/// Indentation depth, rendered as one tab per level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indent(usize);

impl Indent {
    pub const ROOT: Indent = Indent(0);

    /// One level deeper
    pub fn deeper(self) -> Indent {
        Indent(self.0 + 1)
    }

    pub fn depth(self) -> usize {
        self.0
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("\t")?;
        }
        Ok(())
    }
}

/// Line-oriented text buffer for generated sources
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `text` at the given depth followed by a newline
    pub(crate) fn line(&mut self, indent: Indent, text: &str) {
        if !text.is_empty() {
            for _ in 0..indent.depth() {
                self.out.push('\t');
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Append pre-indented text verbatim, followed by a newline
    pub(crate) fn raw(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// First lines shared by every unit: optional PCH include and the banner
    pub(crate) fn preamble(&mut self, options: &EmitOptions, origin: Option<&str>) {
        if let Some(header) = &options.pch_header {
            self.raw(&format!("#include \"{}\"", header));
        }
        match origin {
            Some(path) => self.raw(&format!("{} from {:?}. Do not edit.", BANNER_PREFIX, path)),
            None => self.raw(&format!("{}. Do not edit.", BANNER_PREFIX)),
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
