use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "gather-props" => env!("CARGO_BIN_EXE_gather-props"),
        "gather-nicegui" => env!("CARGO_BIN_EXE_gather-nicegui"),
        "quasar-lookup" => env!("CARGO_BIN_EXE_quasar-lookup"),
        other => panic!("unknown helper {other}"),
    };
    PathBuf::from(path)
}

/// Run a helper with the descriptor/root environment cleared so the host
/// machine cannot leak into the fixture.
pub fn helper_command(name: &str) -> Command {
    let mut cmd = Command::new(helper_binary(name));
    cmd.env_remove("QUASAR_API_DIR")
        .env_remove("QUASAR_META_ROOT")
        .env_remove("QUASAR_META_ASSETS")
        .env_remove("NICEGUI_EXPORTS");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// A throwaway project root with `assets/`, a manifest, and helpers for
/// laying down descriptor fixtures.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("allocating project dir")?;
        fs::create_dir_all(dir.path().join("project").join("assets"))?;
        fs::write(dir.path().join("project").join("package.json"), "{}\n")?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn assets(&self) -> PathBuf {
        self.root().join("assets")
    }

    /// Write a descriptor file relative to `base`, creating parents.
    pub fn write_json(&self, base: &Path, relative: &str, value: &Value) -> Result<PathBuf> {
        let path = base.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_vec_pretty(value)?)?;
        Ok(path)
    }

    pub fn read_asset(&self, name: &str) -> Result<Value> {
        let path = self.assets().join(name);
        let data = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(serde_json::from_str(&data)?)
    }
}
