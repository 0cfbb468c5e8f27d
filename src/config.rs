//! Generator configuration
//!
//! Settings come from the command line, optionally layered over a YAML file:
//!
//! ```yaml
//! namespace: Nova
//! pch: true
//! pch_header: pch.h
//! format: module
//! exclude:
//!   - "**/*.psd"
//! ```
//!
//! Command-line values win over file values; exclude lists are concatenated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::emitter::{EmitOptions, OutputFormat};
use crate::error::{self, Result};

/// Header included when the precompiled header include is enabled
pub const DEFAULT_PCH_HEADER: &str = "pch.h";

/// Contents of a resembed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub namespace: Option<String>,
    pub pch: Option<bool>,
    pub pch_header: Option<String>,
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ConfigFile {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| error::config::parse_failed(path, e))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path).map_err(|e| error::fs::read_failed(path, e))?;
        Self::from_yaml(&yaml, path)
    }
}

/// Fully resolved settings of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub resource_root: PathBuf,
    pub output_dir: PathBuf,
    pub namespace: String,
    pub include_pch: bool,
    pub pch_header: String,
    pub format: OutputFormat,
    pub exclude: Vec<String>,
    /// Compare against the output directory instead of writing it
    pub check: bool,
}

impl GeneratorConfig {
    /// Configuration with defaults for everything but the required settings
    pub fn new(
        resource_root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            resource_root: resource_root.into(),
            output_dir: output_dir.into(),
            namespace: namespace.into(),
            include_pch: false,
            pch_header: DEFAULT_PCH_HEADER.to_string(),
            format: OutputFormat::default(),
            exclude: Vec::new(),
            check: false,
        }
    }

    /// Resolve the configuration from parsed arguments, loading `--config` if given
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Self::merge(cli, file)
    }

    /// Layer command-line values over `file`
    pub fn merge(cli: &Cli, file: ConfigFile) -> Result<Self> {
        let resource_root = cli
            .resource_root
            .clone()
            .ok_or_else(|| error::config::missing_argument("RESOURCE_ROOT"))?;
        let output_dir = cli
            .output_dir
            .clone()
            .ok_or_else(|| error::config::missing_argument("OUTPUT_DIR"))?;
        let namespace = cli
            .namespace
            .clone()
            .or(file.namespace)
            .filter(|ns| !ns.trim().is_empty())
            .ok_or_else(|| error::config::missing_argument("NAMESPACE"))?;

        let mut exclude = file.exclude;
        exclude.extend(cli.exclude.iter().cloned());

        let mut config = Self::new(resource_root, output_dir, namespace);
        config.include_pch = cli.wants_pch() || file.pch.unwrap_or(false);
        if let Some(header) = cli.pch_header.clone().or(file.pch_header) {
            config.pch_header = header;
        }
        config.format = cli.format.or(file.format).unwrap_or_default();
        config.exclude = exclude;
        config.check = cli.check;
        Ok(config)
    }

    /// Options handed to the emitters
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            namespace: self.namespace.clone(),
            pch_header: self.include_pch.then(|| self.pch_header.clone()),
            format: self.format,
        }
    }
}
