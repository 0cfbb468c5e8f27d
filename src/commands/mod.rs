//! Command implementations for resembed CLI

pub mod completions;
pub mod generate;
