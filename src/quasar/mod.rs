//! Quasar component metadata: loading the API descriptors, hydrating their
//! inheritance, and querying the generated assets.
//!
//! Descriptors stay as ordered JSON objects throughout; apart from the four
//! item maps and `mixins`, their payload is opaque and passed through as-is.

pub mod catalog;
pub mod hydrate;
pub mod kind;
pub mod source;

use serde_json::{Map, Value};

/// Descriptor name to raw descriptor, in load order.
pub type ComponentTable = Map<String, Value>;

pub use catalog::{AssetCatalog, ItemEntry, attribute_label};
pub use hydrate::{
    EXTENDS_REGISTRY, Hydrated, Vocabulary, collect_vocabulary, hydrate, normalize_name,
    normalize_names, resolve_extends, resolve_mixins,
};
pub use kind::ItemKind;
pub use source::{
    API_DIR_ENV, DescriptorSource, SourceLayout, load_descriptors, resolve_source_path,
    resolve_source_path_with,
};
