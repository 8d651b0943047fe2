//! Shared library for the quasar-meta generators.
//!
//! The crate hydrates Quasar's component API descriptors into self-contained
//! records, infers which Quasar component each NiceGUI element class wraps,
//! and reads the resulting assets back for completion tooling. Public
//! functions here are what the three binaries build on: project discovery,
//! path resolution, and the two generator entry points in [`gather`].

use anyhow::Result;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod assets;
pub mod error;
pub mod gather;
pub mod merge;
pub mod nicegui;
pub mod quasar;

pub use error::MetadataError;
pub use gather::{NiceguiSummary, PropsSummary, gather_nicegui, gather_props};
pub use nicegui::{ExportRecord, Heuristic, build_mapping, infer_quasar_key};
pub use quasar::{AssetCatalog, ComponentTable, ItemKind, Vocabulary, hydrate};

/// Environment variable pointing at the project root.
pub const ROOT_ENV: &str = "QUASAR_META_ROOT";
/// Environment variable overriding the asset directory.
pub const ASSETS_ENV: &str = "QUASAR_META_ASSETS";

const ASSET_DIR: &str = "assets";
const ROOT_MANIFESTS: &[&str] = &["Cargo.toml", "package.json"];
const DEFAULT_EXPORTS: &str = "tools/nicegui_exports.json";

/// Returns true when `candidate` has an `assets/` directory next to a
/// Cargo or npm manifest.
fn is_project_root(candidate: &Path) -> bool {
    candidate.join(ASSET_DIR).is_dir()
        && ROOT_MANIFESTS
            .iter()
            .any(|manifest| candidate.join(manifest).is_file())
}

fn project_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_project_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_project_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the project root.
///
/// Honors `QUASAR_META_ROOT` when it points at a real project, then climbs up
/// from the working directory, then from the executable.
pub fn find_project_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = project_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    Err(MetadataError::Configuration(format!(
        "unable to locate the project root (a directory with assets/ and a manifest); set {ROOT_ENV}"
    ))
    .into())
}

/// Asset directory: explicit flag, then `QUASAR_META_ASSETS`, then `<root>/assets`.
pub fn resolve_asset_dir(root: &Path, explicit: Option<&Path>) -> PathBuf {
    first_path(explicit, ASSETS_ENV).unwrap_or_else(|| root.join(ASSET_DIR))
}

/// Export listing: explicit flag, then `NICEGUI_EXPORTS`, then
/// `<root>/tools/nicegui_exports.json`.
pub fn resolve_exports_path(root: &Path, explicit: Option<&Path>) -> PathBuf {
    first_path(explicit, nicegui::EXPORTS_ENV).unwrap_or_else(|| root.join(DEFAULT_EXPORTS))
}

fn first_path(explicit: Option<&Path>, env_key: &str) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        env::var_os(env_key)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}
