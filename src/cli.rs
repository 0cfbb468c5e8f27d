//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::Parser;
use std::path::PathBuf;

use crate::emitter::OutputFormat;

/// Token in the trailing arguments that enables the precompiled header include
pub const PCH_TOKEN: &str = "pch";

/// resembed - resource embedding compiler
///
/// Embeds every file under a resource directory into generated C++ sources.
#[derive(Parser, Debug)]
#[command(
    name = "resembed",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Embed resource files into generated C++ sources",
    long_about = "resembed walks a resource directory and writes one C++ unit per file, each \
                  owning the file's exact bytes, plus a ResourcesDB unit that re-exports them all. \
                  Output is written atomically: a failed run leaves the previous output untouched.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  resembed assets/ generated/ Nova                 \x1b[90m# Generate C++20 modules\x1b[0m\n   \
                  resembed assets/ generated/ Nova pch             \x1b[90m# Prefix every unit with #include \"pch.h\"\x1b[0m\n   \
                  resembed assets/ generated/ Nova --format header \x1b[90m# Generate headers instead\x1b[0m\n   \
                  resembed assets/ generated/ Nova --check         \x1b[90m# Fail if generated/ is stale\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Directory scanned recursively for resource files
    #[arg(value_name = "RESOURCE_ROOT")]
    pub resource_root: Option<PathBuf>,

    /// Directory receiving the generated units
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Namespace wrapping every generated struct
    #[arg(value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Trailing tokens; `pch` prefixes every unit with the precompiled header include
    #[arg(value_name = "EXTRA")]
    pub extra: Vec<String>,

    /// Prefix every unit with the precompiled header include (same as the `pch` token)
    #[arg(long)]
    pub pch: bool,

    /// Header named by the precompiled header include
    #[arg(long, value_name = "HEADER", env = "RESEMBED_PCH_HEADER")]
    pub pch_header: Option<String>,

    /// Kind of C++ source to generate
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip resources whose relative path matches this glob (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Verify the output directory is up to date without writing to it
    #[arg(long)]
    pub check: bool,

    /// YAML configuration file providing defaults
    #[arg(long, short = 'c', value_name = "FILE", env = "RESEMBED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Show a progress spinner instead of one line per resource
    #[arg(long, conflicts_with = "quiet")]
    pub progress: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Whether the precompiled header include was requested
    pub fn wants_pch(&self) -> bool {
        self.pch || self.extra.iter().any(|token| token == PCH_TOKEN)
    }

    /// Trailing tokens that mean nothing to resembed
    pub fn unknown_extra(&self) -> impl Iterator<Item = &str> {
        self.extra
            .iter()
            .map(String::as_str)
            .filter(|token| *token != PCH_TOKEN)
    }
}
