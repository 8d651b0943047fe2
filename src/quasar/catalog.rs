//! Read side of the generated assets.
//!
//! Answers the questions completion tooling asks: which items of a kind does
//! the component behind a NiceGUI class offer, what values does a prop accept,
//! and which `ui.` names exist. Unmapped classes fall back to the global
//! vocabulary.

use crate::assets::{COMPONENTS_FILE, FUNCTIONS_FILE, LISTS_FILE, MAPPING_FILE, read_json};
use crate::quasar::{ComponentTable, ItemKind, Vocabulary};
use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// One completion candidate.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ItemEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

#[derive(Debug, Default)]
pub struct AssetCatalog {
    components: ComponentTable,
    vocabulary: Vocabulary,
    functions: Vec<String>,
    mapping: BTreeMap<String, String>,
}

impl AssetCatalog {
    /// Load all four assets from `asset_dir`; each one must exist.
    pub fn load(asset_dir: &Path) -> Result<Self> {
        Ok(Self {
            components: read_json(&asset_dir.join(COMPONENTS_FILE), "component table")?,
            vocabulary: read_json(&asset_dir.join(LISTS_FILE), "vocabulary lists")?,
            functions: read_json(&asset_dir.join(FUNCTIONS_FILE), "function list")?,
            mapping: read_json(&asset_dir.join(MAPPING_FILE), "class mapping")?,
        })
    }

    pub fn from_parts(
        components: ComponentTable,
        vocabulary: Vocabulary,
        functions: Vec<String>,
        mapping: BTreeMap<String, String>,
    ) -> Self {
        Self {
            components,
            vocabulary,
            functions,
            mapping,
        }
    }

    /// Resolve a NiceGUI class (or a bare component key such as `qbtn`).
    pub fn component_for_class(&self, class: &str) -> Option<&Map<String, Value>> {
        let key = self.mapping.get(class).map(String::as_str).unwrap_or(class);
        self.components.get(key).and_then(Value::as_object)
    }

    /// Items of `kind` whose name contains `word`.
    ///
    /// For a known component, internal items are hidden and each entry carries
    /// its rendered label and description. Otherwise the global vocabulary is
    /// searched and entries are bare names.
    pub fn items(&self, class: Option<&str>, kind: ItemKind, word: &str) -> Vec<ItemEntry> {
        let Some(component) = class.and_then(|c| self.component_for_class(c)) else {
            return self
                .vocabulary
                .get(kind)
                .iter()
                .filter(|name| name.contains(word))
                .map(|name| ItemEntry {
                    name: name.clone(),
                    label: None,
                    desc: None,
                })
                .collect();
        };

        let Some(items) = component.get(kind.as_str()).and_then(Value::as_object) else {
            return Vec::new();
        };
        items
            .iter()
            .filter(|(name, _)| name.contains(word))
            .filter_map(|(name, attr)| {
                let attr = attr.as_object()?;
                if attr.get("internal").and_then(Value::as_bool) == Some(true) {
                    return None;
                }
                Some(ItemEntry {
                    name: name.clone(),
                    label: attribute_label(attr),
                    desc: attr.get("desc").and_then(Value::as_str).map(str::to_string),
                })
            })
            .collect()
    }

    /// Accepted values of one item, with their surrounding quotes removed.
    pub fn values(&self, class: &str, kind: ItemKind, item: &str) -> Vec<String> {
        self.component_for_class(class)
            .and_then(|c| c.get(kind.as_str()))
            .and_then(|items| items.get(item))
            .and_then(|attr| attr.get("values"))
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|v| strip_quotes(v).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Exported UI names containing `word`.
    pub fn functions(&self, word: &str) -> Vec<&str> {
        self.functions
            .iter()
            .filter(|name| name.contains(word))
            .map(String::as_str)
            .collect()
    }
}

// Values are stored as source literals (`'left'`); drop the first and last char.
fn strip_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Short signature shown next to an item name.
///
/// Callables render as `(params) => returns`, or `(params)` when no return is
/// declared; everything else shows its type, with union types joined by `|`.
pub fn attribute_label(attr: &Map<String, Value>) -> Option<String> {
    match (attr.get("params"), attr.get("returns")) {
        (Some(params), Some(returns)) => Some(format!(
            "({}) => {}",
            key_list(params),
            key_list(returns)
        )),
        (Some(params), None) => Some(format!("({})", key_list(params))),
        _ => attr.get("type").and_then(|ty| flatten(ty, " | ")),
    }
}

fn key_list(value: &Value) -> String {
    match value.as_object() {
        Some(map) if !map.is_empty() => map.keys().cloned().collect::<Vec<_>>().join(", "),
        Some(_) => String::new(),
        None => "void".to_string(),
    }
}

fn flatten(value: &Value, join: &str) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(join),
        ),
        _ => None,
    }
}
