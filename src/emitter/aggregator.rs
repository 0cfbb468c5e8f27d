//! Aggregator unit emission
//!
//! `ResourcesDB` re-exports every resource unit in manifest order, so a single
//! import (or include) gives access to the whole resource set.

use super::{AGGREGATOR_NAME, EmitOptions, GeneratedUnit, Indent, OutputFormat, SourceWriter};

/// Render the aggregator for `identifiers`, keeping their order
pub fn emit_aggregator<S: AsRef<str>>(identifiers: &[S], options: &EmitOptions) -> GeneratedUnit {
    let mut w = SourceWriter::new();
    w.preamble(options, None);

    let root = Indent::ROOT;
    match options.format {
        OutputFormat::Module => {
            w.line(root, &format!("export module {};", AGGREGATOR_NAME));
            w.blank();
            for identifier in identifiers {
                w.line(root, &format!("export import {};", identifier.as_ref()));
            }
        }
        OutputFormat::Header => {
            w.line(root, "#pragma once");
            w.blank();
            for identifier in identifiers {
                let file_name = options.format.file_name(identifier.as_ref());
                w.line(root, &format!("#include \"{}\"", file_name));
            }
        }
    }

    GeneratedUnit {
        name: AGGREGATOR_NAME.to_string(),
        file_name: options.format.file_name(AGGREGATOR_NAME),
        contents: w.finish(),
    }
}
