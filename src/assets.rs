//! Reading and writing the generated JSON assets.
//!
//! Every asset is pretty-printed with a four-space indent and a trailing
//! newline. Writes land in a temporary file next to the target and are then
//! persisted over it, so a failed run never leaves a truncated asset behind.

use crate::error::MetadataError;
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub const COMPONENTS_FILE: &str = "quasar_components.json";
pub const LISTS_FILE: &str = "quasar_lists.json";
pub const FUNCTIONS_FILE: &str = "nicegui_functions.json";
pub const MAPPING_FILE: &str = "nicegui_to_quasar_map.json";

const INDENT: &[u8] = b"    ";

/// Render `value` the way every asset is stored on disk.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("serializing asset")?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `value` to `path`, replacing any previous file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let bytes = to_pretty_json(value)?;
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("allocating temp file in {}", dir.display()))?;
    tmp.write_all(&bytes)
        .with_context(|| format!("writing {}", path.display()))?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("persisting {}", path.display()))?;
    Ok(())
}

/// Read and decode a JSON file that an earlier step must have produced.
///
/// A missing file is a `NotFound` error labelled with `what`; anything else
/// that goes wrong while reading or decoding is a `Parse` error.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<T> {
    if !path.is_file() {
        return Err(MetadataError::not_found(what, path).into());
    }
    let data = fs::read_to_string(path).map_err(|err| MetadataError::parse(path, err))?;
    let value = serde_json::from_str(&data).map_err(|err| MetadataError::parse(path, err))?;
    Ok(value)
}
