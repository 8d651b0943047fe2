//! Generator entry points shared by `gather-props` and `gather-nicegui`.
//!
//! Each function reads all of its inputs before writing anything, so a parse
//! failure or missing prerequisite leaves previously generated assets intact.

use crate::assets::{
    COMPONENTS_FILE, FUNCTIONS_FILE, LISTS_FILE, MAPPING_FILE, read_json, write_json,
};
use crate::nicegui::{build_mapping, load_exports, public_names};
use crate::quasar::{ComponentTable, DescriptorSource, hydrate, load_descriptors};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// Counts reported after a hydration run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PropsSummary {
    pub descriptors: usize,
    pub components: usize,
    pub extended_attributes: usize,
    pub mixed_in_items: usize,
}

/// Counts reported after an inference run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NiceguiSummary {
    pub exported_names: usize,
    pub mappings: usize,
}

/// Hydrate every descriptor under `source` and write the component table and
/// vocabulary lists into `asset_dir`.
pub fn gather_props(source: &DescriptorSource, asset_dir: &Path) -> Result<PropsSummary> {
    let table = load_descriptors(source)
        .with_context(|| format!("loading descriptors from {}", source.path.display()))?;
    let descriptors = table.len();
    let hydrated = hydrate(table);

    write_json(&asset_dir.join(COMPONENTS_FILE), &hydrated.components)?;
    write_json(&asset_dir.join(LISTS_FILE), &hydrated.vocabulary)?;

    Ok(PropsSummary {
        descriptors,
        components: hydrated.components.len(),
        extended_attributes: hydrated.extended_attributes,
        mixed_in_items: hydrated.mixed_in_items,
    })
}

/// Map the exports listed in `exports_path` onto the component table already
/// present in `asset_dir`, writing the function list and the class mapping.
pub fn gather_nicegui(exports_path: &Path, asset_dir: &Path) -> Result<NiceguiSummary> {
    let keys = load_component_keys(asset_dir)?;
    let exports = load_exports(exports_path)?;

    let names = public_names(&exports);
    let mapping = build_mapping(&exports, &keys);

    write_json(&asset_dir.join(FUNCTIONS_FILE), &names)?;
    write_json(&asset_dir.join(MAPPING_FILE), &mapping)?;

    Ok(NiceguiSummary {
        exported_names: names.len(),
        mappings: mapping.len(),
    })
}

/// Top-level keys of the generated component table.
pub fn load_component_keys(asset_dir: &Path) -> Result<BTreeSet<String>> {
    let table: ComponentTable = read_json(&asset_dir.join(COMPONENTS_FILE), "component table")?;
    Ok(table.into_iter().map(|(name, _)| name).collect())
}
