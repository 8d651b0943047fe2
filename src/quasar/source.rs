//! Locating and loading the Quasar API descriptor files.
//!
//! Two layouts exist in the wild: a Quasar source checkout (`ui/src`, nested
//! directories, descriptor name = relative path) and the npm package
//! (`dist/api`, flat, descriptor name = file stem). Files are always visited in
//! lexicographic order of their relative path so collisions and mixin
//! visibility resolve the same way on every machine.

use crate::error::MetadataError;
use crate::quasar::ComponentTable;
use anyhow::{Context, Result};
use serde_json::Value;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the descriptor source directory.
pub const API_DIR_ENV: &str = "QUASAR_API_DIR";

// Directory name the npm package uses for its flat API dump.
const FLAT_LAYOUT_DIR: &str = "api";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SourceLayout {
    /// Nested tree; names are relative paths without the `.json` suffix.
    Tree,
    /// Flat `dist/api` directory; names are file stems.
    Flat,
}

#[derive(Debug, Clone)]
pub struct DescriptorSource {
    pub path: PathBuf,
    pub layout: SourceLayout,
}

impl DescriptorSource {
    pub fn new(path: PathBuf) -> Self {
        let layout = if path.file_name().and_then(|n| n.to_str()) == Some(FLAT_LAYOUT_DIR) {
            SourceLayout::Flat
        } else {
            SourceLayout::Tree
        };
        Self { path, layout }
    }
}

/// Pick the descriptor source for a project rooted at `root`.
///
/// An explicit path (from `--source`) must exist. Otherwise `QUASAR_API_DIR`
/// wins when it names an existing directory, then a sibling Quasar checkout,
/// then the installed npm package.
pub fn resolve_source_path(root: &Path, explicit: Option<&Path>) -> Result<DescriptorSource> {
    resolve_source_path_with(root, explicit, env::var_os(API_DIR_ENV))
}

/// Same as [`resolve_source_path`] with the environment value passed in.
pub fn resolve_source_path_with(
    root: &Path,
    explicit: Option<&Path>,
    env_value: Option<OsString>,
) -> Result<DescriptorSource> {
    if let Some(path) = explicit {
        if path.is_dir() {
            return Ok(DescriptorSource::new(path.to_path_buf()));
        }
        return Err(MetadataError::Configuration(format!(
            "descriptor source {} does not exist",
            path.display()
        ))
        .into());
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        let path = PathBuf::from(value);
        if path.exists() {
            return Ok(DescriptorSource::new(path));
        }
    }

    for candidate in fallback_locations(root) {
        if candidate.exists() {
            return Ok(DescriptorSource::new(candidate));
        }
    }

    Err(MetadataError::Configuration(format!(
        "could not find Quasar API source; set {API_DIR_ENV} or install the quasar npm package under {}",
        root.display()
    ))
    .into())
}

fn fallback_locations(root: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(parent) = root.parent() {
        candidates.push(parent.join("quasar").join("ui").join("src"));
    }
    candidates.push(
        root.join("node_modules")
            .join("quasar")
            .join("dist")
            .join("api"),
    );
    candidates
}

/// Parse every descriptor under `source` into a name-ordered table.
///
/// Any unreadable or malformed file aborts the whole load.
pub fn load_descriptors(source: &DescriptorSource) -> Result<ComponentTable> {
    let mut files = Vec::new();
    collect_json_files(&source.path, &source.path, &mut files)
        .with_context(|| format!("scanning {}", source.path.display()))?;
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut table = ComponentTable::new();
    for (relative, path) in files {
        let name = descriptor_name(source.layout, &relative);
        let data = fs::read_to_string(&path).map_err(|err| MetadataError::parse(&path, err))?;
        let value: Value =
            serde_json::from_str(&data).map_err(|err| MetadataError::parse(&path, err))?;
        table.insert(name, value);
    }
    Ok(table)
}

fn descriptor_name(layout: SourceLayout, relative: &str) -> String {
    match layout {
        SourceLayout::Flat => {
            let file = relative.rsplit('/').next().unwrap_or(relative);
            file.strip_suffix(".json").unwrap_or(file).to_string()
        }
        SourceLayout::Tree => relative
            .strip_suffix(".json")
            .unwrap_or(relative)
            .to_string(),
    }
}

fn collect_json_files(base: &Path, dir: &Path, acc: &mut Vec<(String, PathBuf)>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        // Symlinked directories are skipped.
        if entry.file_type()?.is_dir() {
            collect_json_files(base, &path, acc)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            let relative = path
                .strip_prefix(base)
                .unwrap_or(&path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            acc.push((relative, path));
        }
    }
    Ok(())
}
