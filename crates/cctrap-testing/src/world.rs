//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated build tree in a temp directory
//! - Placing C sources (and look-alike directories) in it
//! - Installing fake compilers that record their argv and exit with a chosen status
//! - Configuring `cctrap-results` runs against the tree

use anyhow::{Context, Result};
use assert_cmd::Command;
use cctrap_core::TrapConfig;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SAMPLE_SOURCE: &str = "int main(void) { return 0; }\n";

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use cctrap_testing::TestWorld;
///
/// let world = TestWorld::new().with_source("src/main.c");
/// let cc = world.fake_compiler("cc", 0).unwrap();
/// let config = world.config(cc.path());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    results_path: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let results_path = temp_dir.path().join("results.txt");
        Self {
            temp_dir,
            results_path,
        }
    }

    /// Get the temp directory root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Resolve a path relative to the temp root.
    pub fn path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    /// Path of the results log the world's config points at.
    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    /// Write a small C translation unit at `relative`, creating parent dirs.
    pub fn with_source(self, relative: impl AsRef<Path>) -> Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create source dir");
        }
        fs::write(&path, SAMPLE_SOURCE).expect("Failed to write source file");
        self
    }

    /// Create a directory at `relative`.
    pub fn with_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path(relative)).expect("Failed to create directory");
        self
    }

    /// Absolute path of `relative` as a UTF-8 argv token.
    pub fn token(&self, relative: &str) -> String {
        self.path(relative).to_string_lossy().into_owned()
    }

    /// Directory fake compilers are installed into.
    pub fn bin_dir(&self) -> PathBuf {
        self.path("bin")
    }

    /// Trap configuration targeting `host_compiler` and this world's results log.
    pub fn config(&self, host_compiler: impl AsRef<Path>) -> TrapConfig {
        TrapConfig::new(
            host_compiler.as_ref().to_string_lossy(),
            self.results_path.clone(),
        )
    }

    /// Install a shell-script compiler that writes each argument it receives
    /// on its own line and exits with `status`.
    #[cfg(unix)]
    pub fn fake_compiler(&self, name: &str, status: i32) -> Result<FakeCompiler> {
        let script = format!("exit {status}");
        self.fake_compiler_with(name, &script)
    }

    /// Install a fake compiler whose last action is the given shell snippet.
    #[cfg(unix)]
    pub fn fake_compiler_with(&self, name: &str, tail: &str) -> Result<FakeCompiler> {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = self.bin_dir();
        fs::create_dir_all(&bin_dir)?;

        let path = bin_dir.join(name);
        let args_path = bin_dir.join(format!("{name}.args"));
        let script = format!(
            "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\"; done > '{}'\n{}\n",
            args_path.display(),
            tail
        );
        fs::write(&path, script)
            .with_context(|| format!("Failed to write fake compiler {}", path.display()))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;

        Ok(FakeCompiler { path, args_path })
    }

    /// Raw text of the results log.
    pub fn results(&self) -> Result<String> {
        fs::read_to_string(&self.results_path)
            .with_context(|| format!("Failed to read {}", self.results_path.display()))
    }

    /// Raw bytes of the results log.
    pub fn results_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.results_path)
            .with_context(|| format!("Failed to read {}", self.results_path.display()))
    }

    /// Write a results log directly, for reader tests.
    pub fn write_results(&self, contents: &str) -> Result<()> {
        fs::write(&self.results_path, contents)?;
        Ok(())
    }

    /// Configure a command to run inside this world.
    ///
    /// Runs from the temp root with cctrap's log filter cleared, so stderr
    /// holds only what the command itself reports. The world's `bin/` is put
    /// ahead of `PATH` so fake compilers shadow real ones by name.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> Result<&'a mut Command> {
        let mut dirs = vec![self.bin_dir()];
        if let Some(path) = std::env::var_os("PATH") {
            dirs.extend(std::env::split_paths(&path));
        }
        let path: OsString = std::env::join_paths(dirs).context("Failed to build PATH")?;

        Ok(cmd
            .current_dir(self.root())
            .env("PATH", path)
            .env_remove("CCTRAP_LOG"))
    }
}

/// A compiler stand-in installed by [`TestWorld::fake_compiler`].
pub struct FakeCompiler {
    path: PathBuf,
    args_path: PathBuf,
}

impl FakeCompiler {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Arguments of the last invocation as text. Invalid UTF-8 shows as U+FFFD.
    pub fn received_args(&self) -> Result<Vec<String>> {
        Ok(self
            .received_raw_args()?
            .iter()
            .map(|arg| String::from_utf8_lossy(arg).into_owned())
            .collect())
    }

    /// Arguments of the last invocation, byte for byte as the compiler's argv held them.
    pub fn received_raw_args(&self) -> Result<Vec<Vec<u8>>> {
        let bytes = fs::read(&self.args_path)
            .with_context(|| format!("Fake compiler {} never ran", self.path.display()))?;
        let Some(bytes) = bytes.strip_suffix(b"\n") else {
            return Ok(Vec::new());
        };
        Ok(bytes.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect())
    }

    pub fn was_invoked(&self) -> bool {
        self.args_path.exists()
    }
}
