//! resembed - resource embedding compiler
//!
//! A build-time tool that walks a directory of resource files (textures, audio, text, ...)
//! and emits one C++ unit per file embedding its exact bytes, plus a `ResourcesDB`
//! aggregator re-exporting every unit.

use clap::Parser;
use console::Style;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod emitter;
mod encoder;
mod error;
mod identifier;
mod manifest;
mod path_utils;
mod transaction;
mod ui;
mod walker;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.completions {
        Some(shell) => commands::completions::run(shell),
        None => commands::generate::run(cli),
    };

    if let Err(e) = result {
        eprintln!("{} {}", Style::new().red().bold().apply_to("Error:"), e);
        if let Some(help) = e.help() {
            eprintln!("  {} {}", Style::new().dim().apply_to("help:"), help);
        }
        std::process::exit(e.exit_code());
    }
}
