//! The deep and shallow merge engines.

use serde_json::{Map, Value};

use crate::patch::{Edit, Patch, PatchMap};

// ── Merge depth ───────────────────────────────────────────────────────────

/// How record-shaped patch values below the top level are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Depth {
    /// Record patches recurse into record targets.
    Deep,
    /// Record patches replace the slot wholesale.
    Shallow,
}

// ── Slot rule ─────────────────────────────────────────────────────────────

/// Applies `patch` to the value currently occupying a slot.
///
/// `current` is `None` when the slot is absent from the target.
pub(crate) fn apply_at(patch: &Patch, current: Option<Value>, depth: Depth) -> Edit {
    match patch {
        Patch::Merge(entries) => Edit::Set(merge(entries, current, depth)),
        Patch::Update(updater) => updater.update(current),
        Patch::Unset => Edit::Unset,
        Patch::Value(value) => Edit::Set(value.clone()),
    }
}

/// Resolves an [`Edit`] escaping the engine root: with no enclosing record
/// to delete from, removal degrades to `Null`.
pub(crate) fn resolve(edit: Edit) -> Value {
    match edit {
        Edit::Set(value) => value,
        Edit::Unset => Value::Null,
    }
}

fn merge(entries: &PatchMap, current: Option<Value>, depth: Depth) -> Value {
    // Non-record targets are treated as absent: the merge baseline is an
    // empty record, which is what makes upserting new nested structure work.
    let mut map = match current {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for (key, sub) in entries {
        if sub.is_unset() {
            map.shift_remove(key);
            continue;
        }
        // Take the slot out by value; the key keeps its position and the
        // placeholder is overwritten or removed below.
        let slot = map.get_mut(key).map(Value::take);
        let edit = match (depth, sub) {
            // One level down, the shallow engine materializes record
            // patches over an empty baseline instead of merging.
            (Depth::Shallow, Patch::Merge(inner)) => {
                Edit::Set(merge(inner, None, Depth::Deep))
            }
            _ => apply_at(sub, slot, depth),
        };
        match edit {
            Edit::Set(value) => {
                map.insert(key.clone(), value);
            }
            // An updater returned the sentinel.
            Edit::Unset => {
                map.shift_remove(key);
            }
        }
    }
    Value::Object(map)
}

// ── Public entry points ───────────────────────────────────────────────────

/// Applies a patch to a target, producing a new value.
///
/// Record patches merge recursively into record targets; updaters are
/// invoked with the current value; the sentinel deletes keys; any other
/// patch replaces the target wholesale. Untouched subtrees of the target
/// move into the result unchanged.
///
/// # Example
///
/// ```
/// use json_evolve::{evolve, patch};
/// use serde_json::json;
///
/// let target = json!({"user": {"name": "Alice", "age": 22}});
/// let out = evolve(&patch!({"user": {"age": 33}}), target);
/// assert_eq!(out, json!({"user": {"name": "Alice", "age": 33}}));
/// ```
///
/// Keys absent from the target are created, recursing into an empty record
/// where needed:
///
/// ```
/// use json_evolve::{evolve, patch};
/// use serde_json::json;
///
/// let out = evolve(&patch!({"a": {"b": 1}}), json!({}));
/// assert_eq!(out, json!({"a": {"b": 1}}));
/// ```
pub fn evolve(patch: &Patch, target: Value) -> Value {
    resolve(apply_at(patch, Some(target), Depth::Deep))
}

/// Applies a patch to the top level of a target only.
///
/// Identical to [`evolve`] except a record-shaped patch value at a key
/// does not recurse — it fully replaces the value at that key. Intended
/// for flat state slices where wholesale replacement of a nested record is
/// wanted.
///
/// # Example
///
/// ```
/// use json_evolve::{shallow_evolve, patch};
/// use serde_json::json;
///
/// let target = json!({"meta": {"a": 0, "b": 0}});
/// let out = shallow_evolve(&patch!({"meta": {"a": 1}}), target);
/// assert_eq!(out, json!({"meta": {"a": 1}}));
/// ```
pub fn shallow_evolve(patch: &Patch, target: Value) -> Value {
    resolve(apply_at(patch, Some(target), Depth::Shallow))
}

// ── Tests ─────────────────────────────────────────────────────────────────
