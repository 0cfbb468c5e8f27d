//! Transaction support for atomic output generation
//!
//! Generated units are written into a staging directory inside the output
//! directory first. Only once every unit of the run is staged does [`OutputTransaction::commit`]
//! move them into place, so a failed run never leaves a half-regenerated tree.
//!
//! A commit replaces the whole generated set: units an earlier run emitted
//! that are not part of this run are removed along with it. Other files in the
//! output directory are never touched.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = OutputTransaction::begin(&output_dir)?;
//! transaction.stage(&unit)?;
//!
//! // On success:
//! transaction.commit()?;
//!
//! // On error (automatic via Drop if not committed):
//! // staged files are discarded and the output directory is untouched
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::emitter::{self, GeneratedUnit};
use crate::error::{self, ResembedError, Result};

/// Prefix of the staging directory created inside the output directory
pub const STAGING_PREFIX: &str = ".resembed-staging-";

/// Name of the directory inside staging that holds replaced files during commit
const BACKUP_DIR: &str = "backup";

/// Bytes read from an existing file to look for the generated-unit banner
const HEAD_LEN: u64 = 4096;

/// A file moved into or out of the output directory during commit
#[derive(Debug)]
struct AppliedFile {
    target: PathBuf,
    /// Previous content of `target`, moved aside
    backup: Option<PathBuf>,
}

/// A set of generated units that is applied all at once
#[derive(Debug)]
pub struct OutputTransaction {
    /// Output directory path
    output_dir: PathBuf,

    /// Staging directory; removed when the transaction ends
    staging: Option<TempDir>,

    /// File names staged so far, in staging order
    staged: Vec<String>,

    /// Whether this transaction created the output directory
    created_output_dir: bool,

    /// Staging lives outside the output directory, which is only compared
    check_only: bool,

    /// Whether the transaction has been committed
    committed: bool,
}

impl OutputTransaction {
    /// Begin a transaction writing into `output_dir`, creating it if missing
    pub fn begin(output_dir: &Path) -> Result<Self> {
        let created_output_dir = !output_dir.exists();
        if created_output_dir {
            fs::create_dir_all(output_dir).map_err(|e| error::fs::write_failed(output_dir, e))?;
        }

        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(output_dir)
            .map_err(|e| error::fs::write_failed(output_dir, e));

        // Undo the directory creation if staging could not be set up
        let staging = match staging {
            Ok(staging) => staging,
            Err(e) => {
                if created_output_dir {
                    let _ = fs::remove_dir(output_dir);
                }
                return Err(e);
            }
        };

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            staging: Some(staging),
            staged: Vec::new(),
            created_output_dir,
            check_only: false,
            committed: false,
        })
    }

    /// Begin a transaction that stages in the system temporary directory and
    /// never writes `output_dir`, which may be missing or read-only.
    ///
    /// Only [`OutputTransaction::outdated_files`] is meaningful for it.
    pub fn begin_check(output_dir: &Path) -> Result<Self> {
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir()
            .map_err(|e| error::fs::write_failed(&std::env::temp_dir(), e))?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            staging: Some(staging),
            staged: Vec::new(),
            created_output_dir: false,
            check_only: true,
            committed: false,
        })
    }

    /// Path of the staging directory
    pub fn staging_dir(&self) -> &Path {
        match &self.staging {
            Some(staging) => staging.path(),
            None => &self.output_dir,
        }
    }

    /// Number of staged units
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Write `unit` into the staging directory.
    ///
    /// A unit whose file already exists in staging is an identifier collision;
    /// this catches names that differ only in case on case-insensitive file systems.
    pub fn stage(&mut self, unit: &GeneratedUnit) -> Result<()> {
        let path = self.staging_dir().join(&unit.file_name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Err(self.collision(unit)),
            Err(e) => return Err(error::fs::write_failed(&path, e)),
        };
        file.write_all(unit.contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| error::fs::write_failed(&path, e))?;

        self.staged.push(unit.file_name.clone());
        Ok(())
    }

    fn collision(&self, unit: &GeneratedUnit) -> ResembedError {
        let first = self
            .staged
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&unit.file_name))
            .unwrap_or(&unit.file_name);

        ResembedError::IdentifierCollision {
            identifier: unit.name.clone(),
            first: first.clone(),
            second: unit.file_name.clone(),
        }
    }

    /// Generated units in the output directory that this run did not stage
    pub fn stale_files(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(error::fs::read_failed(&self.output_dir, e)),
        };

        let mut stale = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| error::fs::read_failed(&self.output_dir, e))?;
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !self.staged.contains(&name) && is_generated_file(&entry.path()) {
                stale.push(name);
            }
        }

        stale.sort();
        Ok(stale)
    }

    /// Files whose state in the output directory differs from this run: staged
    /// files that are missing or changed, then stale generated units.
    pub fn outdated_files(&self) -> Result<Vec<String>> {
        let mut outdated = Vec::new();

        for name in &self.staged {
            let staged_path = self.staging_dir().join(name);
            let staged = fs::read(&staged_path).map_err(|e| error::fs::read_failed(&staged_path, e))?;

            let target = self.output_dir.join(name);
            match fs::read(&target) {
                Ok(existing) if existing == staged => {}
                Ok(_) => outdated.push(name.clone()),
                Err(e) if e.kind() == ErrorKind::NotFound => outdated.push(name.clone()),
                Err(e) => return Err(error::fs::read_failed(&target, e)),
            }
        }

        outdated.extend(self.stale_files()?);
        Ok(outdated)
    }

    /// Replace the generated set in the output directory with the staged files.
    ///
    /// Stale generated units are moved out first, then staged files are moved in.
    /// If any move fails, every move already made is rolled back and the
    /// previous output is restored.
    pub fn commit(mut self) -> Result<()> {
        if self.check_only {
            return Err(error::fs::write_failed(
                &self.output_dir,
                "transaction was opened for checking only",
            ));
        }

        let stale = self.stale_files()?;
        let staging_dir = self.staging_dir().to_path_buf();
        let backup_dir = staging_dir.join(BACKUP_DIR);
        fs::create_dir(&backup_dir).map_err(|e| error::fs::write_failed(&backup_dir, e))?;

        let retired = stale
            .iter()
            .map(|name| retire_file(&self.output_dir.join(name), &backup_dir.join(name)));
        let moved = self.staged.iter().map(|name| {
            apply_file(&staging_dir.join(name), &self.output_dir.join(name), &backup_dir.join(name))
        });

        let mut applied = Vec::with_capacity(stale.len() + self.staged.len());
        for result in retired.chain(moved) {
            match result {
                Ok(file) => applied.push(file),
                Err(e) => {
                    rollback(&applied);
                    return Err(e);
                }
            }
        }

        self.committed = true;
        Ok(())
    }
}

/// Whether the file at `path` starts with the generated-unit banner
fn is_generated_file(path: &Path) -> bool {
    let mut head = Vec::new();
    File::open(path)
        .and_then(|file| file.take(HEAD_LEN).read_to_end(&mut head))
        .is_ok_and(|_| emitter::is_generated_source(&String::from_utf8_lossy(&head)))
}

/// Move a stale `target` to `backup`
fn retire_file(target: &Path, backup: &Path) -> Result<AppliedFile> {
    fs::rename(target, backup).map_err(|e| error::fs::write_failed(target, e))?;
    Ok(AppliedFile {
        target: target.to_path_buf(),
        backup: Some(backup.to_path_buf()),
    })
}

/// Move `staged` to `target`, first moving an existing `target` to `backup`
fn apply_file(staged: &Path, target: &Path, backup: &Path) -> Result<AppliedFile> {
    let backup = if target.exists() {
        fs::rename(target, backup).map_err(|e| error::fs::write_failed(target, e))?;
        Some(backup.to_path_buf())
    } else {
        None
    };

    if let Err(e) = fs::rename(staged, target) {
        if let Some(backup) = &backup {
            let _ = fs::rename(backup, target);
        }
        return Err(error::fs::write_failed(target, e));
    }

    Ok(AppliedFile {
        target: target.to_path_buf(),
        backup,
    })
}

/// Restore the output directory to its state before commit started
fn rollback(applied: &[AppliedFile]) {
    for file in applied.iter().rev() {
        let restored = match &file.backup {
            Some(backup) => fs::rename(backup, &file.target),
            None => fs::remove_file(&file.target),
        };
        if let Err(e) = restored {
            eprintln!(
                "Warning: Failed to restore {}: {}",
                file.target.display(),
                e
            );
        }
    }
}

impl Drop for OutputTransaction {
    fn drop(&mut self) {
        // Staging has to go before the output directory can be removed
        if let Some(staging) = self.staging.take() {
            if let Err(e) = staging.close() {
                eprintln!("Warning: Failed to remove staging directory: {}", e);
            }
        }

        if !self.committed && self.created_output_dir {
            // Only remove if empty
            if fs::read_dir(&self.output_dir)
                .map(|mut d| d.next().is_none())
                .unwrap_or(false)
            {
                let _ = fs::remove_dir(&self.output_dir);
            }
        }
    }
}
