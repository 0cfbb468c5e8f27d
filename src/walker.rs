//! Resource discovery
//!
//! Walks the resource root recursively and yields every regular file below it.
//! Siblings are visited in file-name order so the resulting manifest, and with it
//! the aggregator, is identical across runs and platforms. Symlinks and special
//! files are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use wax::{CandidatePath, Glob, Pattern};
use walkdir::WalkDir;

use crate::error::{self, Result};
use crate::path_utils;

/// A regular file found under the resource root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path as visited on disk
    pub absolute_path: PathBuf,
    /// Path relative to the resource root
    pub relative_path: PathBuf,
}

impl DiscoveredFile {
    /// Relative path with forward slashes, as used for identifiers and exclude globs
    pub fn relative_str(&self) -> String {
        path_utils::to_forward_slashes(&self.relative_path)
    }

    /// Read the full content of the file
    pub fn read(self) -> Result<ResourceFile> {
        let bytes =
            fs::read(&self.absolute_path).map_err(|e| error::fs::read_failed(&self.absolute_path, e))?;
        Ok(ResourceFile {
            relative_path: self.relative_path,
            bytes,
        })
    }
}

/// A resource file together with its exact content
#[derive(Debug)]
pub struct ResourceFile {
    pub relative_path: PathBuf,
    pub bytes: Vec<u8>,
}

impl ResourceFile {
    /// Relative path with forward slashes
    pub fn relative_str(&self) -> String {
        path_utils::to_forward_slashes(&self.relative_path)
    }
}

/// Glob patterns for resources that must not be embedded
#[derive(Debug, Default)]
pub struct ExcludeFilter {
    globs: Vec<Glob<'static>>,
}

impl ExcludeFilter {
    /// Compile the given glob patterns
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let globs = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Glob::new(pattern)
                    .map(Glob::into_owned)
                    .map_err(|e| error::config::invalid_pattern(pattern, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { globs })
    }

    /// Whether a forward-slash relative path matches any pattern
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        let candidate = CandidatePath::from(relative_path);
        self.globs
            .iter()
            .any(|glob| glob.matched(&candidate).is_some())
    }
}

/// Lazy, ordered iterator over the regular files of a resource tree
pub struct ResourceWalker {
    root: PathBuf,
    entries: Box<dyn Iterator<Item = walkdir::Result<walkdir::DirEntry>>>,
    exclude: ExcludeFilter,
}

impl ResourceWalker {
    /// Start walking `root`.
    ///
    /// Directories listed in `skip_dirs` are not descended into; the driver uses
    /// this when the output directory lives under the resource root.
    pub fn new(root: &Path, exclude: ExcludeFilter, skip_dirs: Vec<PathBuf>) -> Result<Self> {
        if !root.is_dir() {
            return Err(error::fs::path_not_found(root));
        }

        let entries = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !skip_dirs.iter().any(|skip| entry.path() == skip.as_path()));

        Ok(Self {
            root: root.to_path_buf(),
            entries: Box::new(entries),
            exclude,
        })
    }
}

impl Iterator for ResourceWalker {
    type Item = Result<DiscoveredFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(self.root.as_path()).to_path_buf();
                    return Some(Err(error::fs::read_failed(&path, e)));
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let absolute_path = entry.into_path();
            let relative_path = path_utils::relative_to(&absolute_path, &self.root).to_path_buf();
            let file = DiscoveredFile {
                absolute_path,
                relative_path,
            };

            if self.exclude.is_excluded(&file.relative_str()) {
                continue;
            }

            return Some(Ok(file));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_tree(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, content) in files {
            let full = temp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(&full, content).unwrap();
        }
        temp
    }

    fn relative_paths(walker: ResourceWalker) -> Vec<String> {
        walker
            .map(|file| file.unwrap().relative_str())
            .collect()
    }

    #[test]
    fn test_walk_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = ResourceWalker::new(&temp.path().join("missing"), ExcludeFilter::default(), Vec::new());
        assert!(matches!(
            result.err(),
            Some(crate::error::ResembedError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_walk_root_is_file() {
        let temp = create_tree(&[("file.bin", "x")]);
        let result = ResourceWalker::new(&temp.path().join("file.bin"), ExcludeFilter::default(), Vec::new());
        assert!(matches!(
            result.err(),
            Some(crate::error::ResembedError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_walk_empty_root() {
        let temp = TempDir::new().unwrap();
        let walker = ResourceWalker::new(temp.path(), ExcludeFilter::default(), Vec::new()).unwrap();
        assert!(relative_paths(walker).is_empty());
    }

    #[test]
    fn test_walk_is_sorted_and_recursive() {
        let temp = create_tree(&[
            ("textures/brick.png", "png"),
            ("audio/click.wav", ""),
            ("textures/a/deep.bin", "d"),
            ("readme.txt", "r"),
        ]);
        fs::create_dir_all(temp.path().join("empty_dir")).unwrap();

        let walker = ResourceWalker::new(temp.path(), ExcludeFilter::default(), Vec::new()).unwrap();
        assert_eq!(
            relative_paths(walker),
            vec![
                "audio/click.wav",
                "readme.txt",
                "textures/a/deep.bin",
                "textures/brick.png",
            ]
        );
    }

    #[test]
    fn test_walk_is_reproducible() {
        let temp = create_tree(&[("b/1", "1"), ("a/2", "2"), ("c", "3"), ("a/1", "4")]);
        let first = relative_paths(ResourceWalker::new(temp.path(), ExcludeFilter::default(), Vec::new()).unwrap());
        let second = relative_paths(ResourceWalker::new(temp.path(), ExcludeFilter::default(), Vec::new()).unwrap());
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_symlinks() {
        let temp = create_tree(&[("real.bin", "data")]);
        std::os::unix::fs::symlink(temp.path().join("real.bin"), temp.path().join("link.bin")).unwrap();

        let walker = ResourceWalker::new(temp.path(), ExcludeFilter::default(), Vec::new()).unwrap();
        assert_eq!(relative_paths(walker), vec!["real.bin"]);
    }

    #[test]
    fn test_walk_skip_dir() {
        let temp = create_tree(&[("assets/a.bin", "a"), ("generated/a_bin.cppm", "x")]);
        let walker = ResourceWalker::new(
            temp.path(),
            ExcludeFilter::default(),
            vec![temp.path().join("generated")],
        )
        .unwrap();
        assert_eq!(relative_paths(walker), vec!["assets/a.bin"]);
    }

    #[test]
    fn test_walk_with_excludes() {
        let temp = create_tree(&[
            ("textures/brick.png", "png"),
            ("textures/brick.psd", "psd"),
            ("audio/.gitkeep", ""),
        ]);
        let exclude = ExcludeFilter::new(&["**/*.psd", "**/.gitkeep"]).unwrap();
        let walker = ResourceWalker::new(temp.path(), exclude, Vec::new()).unwrap();
        assert_eq!(relative_paths(walker), vec!["textures/brick.png"]);
    }

    #[test]
    fn test_exclude_filter_invalid_pattern() {
        let result = ExcludeFilter::new(&["textures/[unclosed"]);
        assert!(matches!(
            result.err(),
            Some(crate::error::ResembedError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_read_keeps_exact_bytes() {
        let content: Vec<u8> = (0..=255u8).collect();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("all.bin"), &content).unwrap();
        let mut walker = ResourceWalker::new(temp.path(), ExcludeFilter::default(), Vec::new()).unwrap();
        let file = walker.next().unwrap().unwrap().read().unwrap();
        assert_eq!(file.bytes, content);
        assert_eq!(file.relative_path, PathBuf::from("all.bin"));
    }
}
