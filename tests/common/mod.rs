//! Common test utilities for resembed integration tests

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch project holding a resource tree and an output directory
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new test project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        std::fs::create_dir_all(path.join("assets")).expect("Failed to create assets directory");
        Self { temp, path }
    }

    /// Resource root of the project
    pub fn assets(&self) -> PathBuf {
        self.path.join("assets")
    }

    /// Output directory of the project
    pub fn generated(&self) -> PathBuf {
        self.path.join("generated")
    }

    /// Write a resource file below `assets/`
    pub fn write_resource(&self, path: &str, content: &[u8]) {
        let file_path = self.assets().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write a file relative to the project root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a generated file
    pub fn read_generated(&self, name: &str) -> String {
        std::fs::read_to_string(self.generated().join(name)).expect("Failed to read file")
    }

    /// Sorted names of every entry in the output directory
    pub fn generated_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.generated())
            .expect("Failed to read output directory")
            .map(|e| {
                e.expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Command running resembed from the project root with the standard positionals
    pub fn resembed(&self, namespace: &str) -> Command {
        let mut cmd = resembed_cmd();
        cmd.current_dir(&self.path)
            .arg("assets")
            .arg("generated")
            .arg(namespace);
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Command for the resembed binary with a clean environment
#[allow(dead_code)]
pub fn resembed_cmd() -> Command {
    // Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("resembed").expect("resembed binary should be built");
    cmd.env_remove("RESEMBED_CONFIG")
        .env_remove("RESEMBED_PCH_HEADER");
    cmd
}

/// Parse the byte literals between the constructor's initializer braces
#[allow(dead_code)]
pub fn embedded_bytes(unit: &str) -> Vec<u8> {
    let start = unit
        .find("m_data = new unsigned char[")
        .expect("unit should allocate its buffer");
    let rest = &unit[start..];
    let open = rest.find('{').expect("initializer should open");
    let close = rest.find('}').expect("initializer should close");
    rest[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            u8::from_str_radix(token.trim_start_matches("0x"), 16).expect("hex literal")
        })
        .collect()
}
