//! Cross-platform path utilities
//!
//! Resource paths are reported and matched with forward slashes on every platform,
//! so exclude globs and progress output read the same on Windows and Unix.

use std::path::Path;

/// Convert a path to a string with forward slashes.
///
/// # Examples
///
/// ```ignore
/// use std::path::Path;
///
/// assert_eq!(to_forward_slashes(Path::new("textures\\brick.png")), "textures/brick.png");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Path of `path` relative to `root`, falling back to `path` itself when it is
/// not located under `root`.
pub fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_to_forward_slashes() {
        assert_eq!(
            to_forward_slashes(Path::new("textures\\walls\\brick.png")),
            "textures/walls/brick.png"
        );
        assert_eq!(to_forward_slashes(Path::new("audio/click.wav")), "audio/click.wav");
    }

    #[test]
    fn test_relative_to_strips_root() {
        let root = PathBuf::from("assets");
        let path = root.join("textures").join("brick.png");
        assert_eq!(relative_to(&path, &root), Path::new("textures/brick.png"));
    }

    #[test]
    fn test_relative_to_outside_root() {
        let path = Path::new("elsewhere/file.bin");
        assert_eq!(relative_to(path, Path::new("assets")), path);
    }
}
