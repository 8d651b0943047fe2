//! Pre-extracted listing of NiceGUI's public `ui` exports.
//!
//! The listing replaces runtime introspection: one record per exported name
//! with the constructor documentation and source captured as plain text.

use crate::assets::read_json;
use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Environment variable naming the export listing file.
pub const EXPORTS_ENV: &str = "NICEGUI_EXPORTS";

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ExportRecord {
    /// Name as exported from `nicegui.ui`.
    pub name: String,
    /// Runtime class name; differs from `name` for aliased exports.
    #[serde(default)]
    pub class_name: Option<String>,
    /// True when the export is a class deriving from the base element.
    #[serde(default)]
    pub element: bool,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl ExportRecord {
    /// Key used in the class mapping.
    pub fn class_name(&self) -> &str {
        self.class_name.as_deref().unwrap_or(&self.name)
    }

    pub fn doc(&self) -> &str {
        self.doc.as_deref().unwrap_or_default()
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or_default()
    }

    pub fn is_public(&self) -> bool {
        !self.name.starts_with('_')
    }
}

pub fn load_exports(path: &Path) -> Result<Vec<ExportRecord>> {
    read_json(path, "export listing")
}

/// Sorted, de-duplicated public export names.
pub fn public_names(exports: &[ExportRecord]) -> Vec<String> {
    exports
        .iter()
        .filter(|record| record.is_public())
        .map(|record| record.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
