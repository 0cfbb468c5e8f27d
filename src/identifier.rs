//! Identifier synthesis for generated units
//!
//! A resource's relative path becomes the name of its generated struct, its module
//! and its output file. The mapping is a plain character substitution so the same
//! path always yields the same identifier across runs and platforms.

/// Characters replaced with `_` when deriving an identifier
const SEPARATOR_CHARS: &[char] = &['\\', '/', '.', ':', '-', ' '];

/// Derive an identifier from a resource path relative to the resource root.
///
/// Each of `\ / . : -` and space becomes `_`; every other character is kept.
/// The result is not checked for being a legal C++ identifier, see
/// [`is_valid_cpp_identifier`].
pub fn sanitize_identifier(relative_path: &str) -> String {
    relative_path
        .chars()
        .map(|c| if SEPARATOR_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Whether `identifier` is usable as-is as a C++ identifier (ASCII letters, digits
/// and underscores, not starting with a digit).
pub fn is_valid_cpp_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
