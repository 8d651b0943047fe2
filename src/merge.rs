//! First-definition-wins merging over ordered JSON objects.
//!
//! Both inheritance passes reduce to the same rule: copy a donor's entries
//! into a target only where the target has no entry of that name yet. The
//! extends pass applies it to attribute records, the mixin pass to whole item
//! maps.

use serde_json::{Map, Value};

/// Copy every entry of `donor` whose key is absent from `target`.
///
/// Existing target entries are never touched, whatever the donor holds for
/// them. New keys are appended in donor order. Returns how many entries were
/// added.
pub fn fill_missing(target: &mut Map<String, Value>, donor: &Map<String, Value>) -> usize {
    let mut added = 0;
    for (key, value) in donor {
        if !target.contains_key(key) {
            target.insert(key.clone(), value.clone());
            added += 1;
        }
    }
    added
}
