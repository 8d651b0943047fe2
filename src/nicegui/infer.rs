//! Heuristic mapping from NiceGUI element classes to Quasar component keys.
//!
//! Heuristics are tried in a fixed order and the first candidate that names a
//! known component wins: Quasar component names in the docstring, a
//! "Quasar `Name`" reference in the docstring, a `tag='q-...'` assignment in
//! the constructor source, and finally the class name itself.

use crate::nicegui::ExportRecord;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

static COMPONENT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bQ[A-Z][A-Za-z0-9]+\b").unwrap());
static QUASAR_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Quasar\s+`([A-Z][A-Za-z0-9]+)").unwrap());
static TAG_ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"tag\s*=\s*['"](q-[a-z0-9-]+)['"]"#).unwrap());

// Quasar abbreviates a few component names.
const ABBREVIATIONS: &[(&str, &str)] = &[("button", "btn"), ("image", "img")];

/// Which heuristic produced a key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Heuristic {
    DocToken,
    DocReference,
    SourceTag,
    ClassName,
}

impl Heuristic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Heuristic::DocToken => "doc-token",
            Heuristic::DocReference => "doc-reference",
            Heuristic::SourceTag => "source-tag",
            Heuristic::ClassName => "class-name",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Inference {
    pub key: String,
    pub heuristic: Heuristic,
}

/// Infer the component key for one export, or `None` when nothing matches.
pub fn infer_quasar_key(record: &ExportRecord, keys: &BTreeSet<String>) -> Option<Inference> {
    let found = |key: String, heuristic: Heuristic| {
        keys.contains(&key).then_some(Inference { key, heuristic })
    };
    let doc = record.doc();

    for token in COMPONENT_TOKEN.find_iter(doc) {
        if let Some(hit) = found(token.as_str().to_lowercase(), Heuristic::DocToken) {
            return Some(hit);
        }
    }

    if let Some(caps) = QUASAR_REFERENCE.captures(doc) {
        let key = format!("q{}", caps[1].to_lowercase());
        if let Some(hit) = found(key, Heuristic::DocReference) {
            return Some(hit);
        }
    }

    if let Some(caps) = TAG_ASSIGNMENT.captures(record.source()) {
        let tag = &caps[1];
        let key = format!("q{}", tag.strip_prefix("q-").unwrap_or(tag).replace('-', ""));
        if let Some(hit) = found(key, Heuristic::SourceTag) {
            return Some(hit);
        }
    }

    found(class_name_key(record.class_name()), Heuristic::ClassName)
}

/// `Button` becomes `qbtn`, `Image` becomes `qimg`.
pub fn class_name_key(class_name: &str) -> String {
    let mut key = format!("q{}", class_name.to_lowercase());
    for (long, short) in ABBREVIATIONS {
        key = key.replace(long, short);
    }
    key
}

/// Map every public element class to its inferred component key.
///
/// Exports that are not element classes, and classes no heuristic resolves,
/// are left out.
pub fn build_mapping(
    exports: &[ExportRecord],
    keys: &BTreeSet<String>,
) -> BTreeMap<String, String> {
    exports
        .iter()
        .filter(|record| record.is_public() && record.element)
        .filter_map(|record| {
            infer_quasar_key(record, keys).map(|hit| (record.class_name().to_string(), hit.key))
        })
        .collect()
}
