//! Turns raw descriptors into self-contained ones.
//!
//! Passes run in a fixed order over the load-ordered table: `extends`
//! references are filled from the `api.extends` registry, mixins are copied in
//! place, the vocabulary is collected, and finally names are normalized.
//! Inherited data only ever fills gaps; nothing a descriptor defines itself is
//! overwritten.

use crate::merge::fill_missing;
use crate::quasar::{ComponentTable, ItemKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Reserved descriptor holding reusable item definitions.
pub const EXTENDS_REGISTRY: &str = "api.extends";

const EXTENDS_KEY: &str = "extends";
const MIXINS_KEY: &str = "mixins";

/// Flattened item-name vocabulary across every descriptor.
///
/// Fields are declared alphabetically so the serialized object has sorted keys;
/// each set serializes as a sorted list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub events: BTreeSet<String>,
    #[serde(default)]
    pub methods: BTreeSet<String>,
    #[serde(default)]
    pub props: BTreeSet<String>,
    #[serde(default)]
    pub slots: BTreeSet<String>,
}

impl Vocabulary {
    pub fn get(&self, kind: ItemKind) -> &BTreeSet<String> {
        match kind {
            ItemKind::Props => &self.props,
            ItemKind::Events => &self.events,
            ItemKind::Methods => &self.methods,
            ItemKind::Slots => &self.slots,
        }
    }

    fn get_mut(&mut self, kind: ItemKind) -> &mut BTreeSet<String> {
        match kind {
            ItemKind::Props => &mut self.props,
            ItemKind::Events => &mut self.events,
            ItemKind::Methods => &mut self.methods,
            ItemKind::Slots => &mut self.slots,
        }
    }
}

/// Result of a full hydration run.
#[derive(Debug)]
pub struct Hydrated {
    /// Normalized name to hydrated descriptor, in load order.
    pub components: ComponentTable,
    pub vocabulary: Vocabulary,
    /// Attributes copied from the extends registry.
    pub extended_attributes: usize,
    /// Items copied from mixins.
    pub mixed_in_items: usize,
}

/// Run every pass over a freshly loaded table.
pub fn hydrate(mut table: ComponentTable) -> Hydrated {
    let extended_attributes = resolve_extends(&mut table);
    let mixed_in_items = resolve_mixins(&mut table);
    let vocabulary = collect_vocabulary(&table);
    let components = normalize_names(table);
    Hydrated {
        components,
        vocabulary,
        extended_attributes,
        mixed_in_items,
    }
}

/// Fill items that declare `extends` from the registry entry of the same kind.
///
/// The registry itself is left alone. Returns the number of attributes copied.
pub fn resolve_extends(table: &mut ComponentTable) -> usize {
    let Some(Value::Object(registry)) = table.get(EXTENDS_REGISTRY).cloned() else {
        return 0;
    };

    let mut copied = 0;
    for (name, descriptor) in table.iter_mut() {
        if name == EXTENDS_REGISTRY {
            continue;
        }
        let Some(descriptor) = descriptor.as_object_mut() else {
            continue;
        };
        for kind in ItemKind::ALL {
            let Some(items) = kind_map_mut(descriptor, kind) else {
                continue;
            };
            let Some(donors) = registry.get(kind.as_str()).and_then(Value::as_object) else {
                continue;
            };
            for item in items.values_mut() {
                let Some(body) = item.as_object_mut() else {
                    continue;
                };
                let Some(reference) = body.get(EXTENDS_KEY).and_then(Value::as_str) else {
                    continue;
                };
                if let Some(donor) = donors.get(reference).and_then(Value::as_object) {
                    copied += fill_missing(body, donor);
                }
            }
        }
    }
    copied
}

/// Copy items from each declared mixin into the descriptor that names it.
///
/// Descriptors are visited in table order and updated in place, so a mixin
/// that was itself hydrated earlier in the walk passes its inherited items on.
/// Every kind map is created on the target, even when the mixin has nothing to
/// copy into it. Returns the number of items copied.
pub fn resolve_mixins(table: &mut ComponentTable) -> usize {
    let names: Vec<String> = table.keys().cloned().collect();
    let mut copied = 0;

    for name in names {
        let mixins = declared_mixins(table.get(&name));
        for mixin_name in mixins {
            // Snapshot the donor first; a descriptor may list itself.
            let donor = match table.get(&mixin_name) {
                Some(Value::Object(mixin)) if !mixin.is_empty() => mixin.clone(),
                _ => continue,
            };
            let Some(target) = table.get_mut(&name).and_then(Value::as_object_mut) else {
                continue;
            };
            for kind in ItemKind::ALL {
                let entry = target
                    .entry(kind.as_str())
                    .or_insert_with(|| Value::Object(Map::new()));
                let (Some(items), Some(inherited)) = (
                    entry.as_object_mut(),
                    donor.get(kind.as_str()).and_then(Value::as_object),
                ) else {
                    continue;
                };
                copied += fill_missing(items, inherited);
            }
        }
    }
    copied
}

fn declared_mixins(descriptor: Option<&Value>) -> Vec<String> {
    descriptor
        .and_then(|d| d.get(MIXINS_KEY))
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn kind_map_mut(
    descriptor: &mut Map<String, Value>,
    kind: ItemKind,
) -> Option<&mut Map<String, Value>> {
    descriptor.get_mut(kind.as_str()).and_then(Value::as_object_mut)
}

/// Union of item names per kind over every descriptor in `table`.
pub fn collect_vocabulary(table: &ComponentTable) -> Vocabulary {
    let mut vocabulary = Vocabulary::default();
    for descriptor in table.values() {
        for kind in ItemKind::ALL {
            if let Some(items) = descriptor.get(kind.as_str()).and_then(Value::as_object) {
                vocabulary.get_mut(kind).extend(items.keys().cloned());
            }
        }
    }
    vocabulary
}

/// Final path segment, lowercased: `components/btn/QBtn` becomes `qbtn`.
pub fn normalize_name(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_lowercase()
}

/// Re-key the table by normalized name.
///
/// On collision the later descriptor replaces the earlier one but keeps the
/// position where the name first appeared.
pub fn normalize_names(table: ComponentTable) -> ComponentTable {
    let mut out = ComponentTable::new();
    for (name, descriptor) in table {
        out.insert(normalize_name(&name), descriptor);
    }
    out
}
