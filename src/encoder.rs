//! Byte literal encoding
//!
//! Renders raw resource bytes as a C-style list of hex literals, eight values per
//! line, so the generated sources stay diffable and readable.

use std::fmt::Write;

/// Number of byte literals rendered on a single line
pub const BYTES_PER_LINE: usize = 8;

/// Render `bytes` as comma separated `0xNN` literals.
///
/// Every line starts with `indent`. Values on a line are joined by `, ` and lines
/// are joined by `,` and a newline, so the output never ends with a separator.
/// Empty input yields an empty string.
pub fn encode_bytes(bytes: &[u8], indent: &str) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    let line_count = bytes.len().div_ceil(BYTES_PER_LINE);
    // "0xNN, " is six characters per value, plus indentation and line break per line
    let mut out = String::with_capacity(bytes.len() * 6 + line_count * (indent.len() + 2));

    for (line_index, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if line_index > 0 {
            out.push_str(",\n");
        }
        out.push_str(indent);
        for (i, byte) in chunk.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            // Writing into a String cannot fail
            let _ = write!(out, "0x{byte:02X}");
        }
    }

    out
}
