//! Aggregator manifest
//!
//! Ordered, append-only record of every identifier emitted during a run. The
//! insertion order is the traversal order and becomes the aggregator's order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::emitter::AGGREGATOR_NAME;
use crate::error::{ResembedError, Result};
use crate::path_utils;

/// Identifiers recorded so far, with the resource each one came from
#[derive(Debug, Default)]
pub struct Manifest {
    identifiers: Vec<String>,
    sources: HashMap<String, PathBuf>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `identifier` for the resource at `source`.
    ///
    /// Fails when another resource already produced the same identifier, or when
    /// the identifier would overwrite the aggregator unit.
    pub fn push(&mut self, identifier: &str, source: &Path) -> Result<()> {
        if identifier == AGGREGATOR_NAME {
            return Err(ResembedError::IdentifierCollision {
                identifier: identifier.to_string(),
                first: format!("<{} aggregator>", AGGREGATOR_NAME),
                second: path_utils::to_forward_slashes(source),
            });
        }

        if let Some(first) = self.sources.get(identifier) {
            return Err(ResembedError::IdentifierCollision {
                identifier: identifier.to_string(),
                first: path_utils::to_forward_slashes(first),
                second: path_utils::to_forward_slashes(source),
            });
        }

        self.sources
            .insert(identifier.to_string(), source.to_path_buf());
        self.identifiers.push(identifier.to_string());
        Ok(())
    }

    /// Identifiers in insertion order
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}
