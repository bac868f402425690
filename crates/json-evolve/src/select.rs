//! Array selection helpers: element-wise and selective updates.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::apply::{apply_at, resolve, Depth};
use crate::patch::Patch;

// ── Selector ──────────────────────────────────────────────────────────────

/// Identifies which elements of an array an update applies to.
#[derive(Clone)]
pub enum Selector {
    /// A single position. Negative indices count back from the end:
    /// `-1` is the last element. Out-of-range indices select nothing.
    Index(i64),
    /// Every element the predicate returns `true` for — all matches, not
    /// just the first.
    Where(Arc<dyn Fn(&Value) -> bool + Send + Sync>),
}

impl Selector {
    /// Builds a predicate selector.
    ///
    /// # Example
    ///
    /// ```
    /// use json_evolve::{adjust, patch, Selector};
    /// use serde_json::json;
    ///
    /// let bobs = Selector::matching(|v| v["name"] == json!("Bob"));
    /// let out = adjust(
    ///     &bobs,
    ///     &patch!({"age": 55}),
    ///     vec![json!({"name": "Bob", "age": 33}), json!({"name": "Claire", "age": 44})],
    /// );
    /// assert_eq!(out[0]["age"], json!(55));
    /// assert_eq!(out[1]["age"], json!(44));
    /// ```
    pub fn matching<F>(pred: F) -> Selector
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Selector::Where(Arc::new(pred))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(index) => write!(f, "Index({index})"),
            Selector::Where(_) => f.write_str("Where(..)"),
        }
    }
}

impl From<i64> for Selector {
    fn from(index: i64) -> Selector {
        Selector::Index(index)
    }
}

impl From<i32> for Selector {
    fn from(index: i32) -> Selector {
        Selector::Index(index.into())
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Selector {
        Selector::Index(index as i64)
    }
}

/// Normalizes a possibly negative index against `len`, once, before any
/// element is visited.
fn normalize(index: i64, len: usize) -> Option<usize> {
    let effective = if index < 0 { index + len as i64 } else { index };
    if effective >= 0 && (effective as usize) < len {
        Some(effective as usize)
    } else {
        None
    }
}

// ── map ───────────────────────────────────────────────────────────────────

pub(crate) fn map_at(patch: &Patch, mut items: Vec<Value>, depth: Depth) -> Vec<Value> {
    for slot in items.iter_mut() {
        let current = slot.take();
        // Updaters receive exactly the element, never its index.
        *slot = resolve(apply_at(patch, Some(current), depth));
    }
    items
}

/// Transforms every element of an array with the same per-element rule as
/// [`evolve`](crate::evolve): record patches merge into each element,
/// updaters are invoked with the element, literals replace it.
///
/// # Example
///
/// ```
/// use json_evolve::{map, patch};
/// use serde_json::json;
///
/// let friends = vec![
///     json!({"name": "Bob", "age": 33}),
///     json!({"name": "Claire", "age": 44}),
/// ];
/// let out = map(&patch!({"age": 55}), friends);
/// assert_eq!(out[0], json!({"name": "Bob", "age": 55}));
/// assert_eq!(out[1], json!({"name": "Claire", "age": 55}));
/// ```
pub fn map(patch: &Patch, items: Vec<Value>) -> Vec<Value> {
    map_at(patch, items, Depth::Deep)
}

/// [`map`] using the shallow engine for record patches.
pub fn shallow_map(patch: &Patch, items: Vec<Value>) -> Vec<Value> {
    map_at(patch, items, Depth::Shallow)
}

// ── adjust ────────────────────────────────────────────────────────────────

pub(crate) fn adjust_at(
    selector: &Selector,
    patch: &Patch,
    mut items: Vec<Value>,
    depth: Depth,
) -> Vec<Value> {
    match selector {
        Selector::Index(index) => {
            // Normalized once, before any element is inspected; an
            // out-of-range index selects nothing and the input vector is
            // handed back unchanged.
            if let Some(slot) = normalize(*index, items.len()).and_then(|i| items.get_mut(i)) {
                let current = slot.take();
                *slot = resolve(apply_at(patch, Some(current), depth));
            }
        }
        Selector::Where(pred) => {
            for slot in items.iter_mut() {
                if !pred(slot) {
                    continue;
                }
                let current = slot.take();
                *slot = resolve(apply_at(patch, Some(current), depth));
            }
        }
    }
    items
}

/// Transforms the eligible elements of an array, per the selector.
///
/// The array is taken by value and handed back with only eligible elements
/// replaced; when nothing is eligible the input vector is returned as-is —
/// same allocation, no copy.
///
/// # Example
///
/// ```
/// use json_evolve::{adjust, patch, Selector};
/// use serde_json::json;
///
/// let out = adjust(
///     &Selector::Index(-1),
///     &patch!({"age": 1}),
///     vec![json!({"age": 0}), json!({"age": 0})],
/// );
/// assert_eq!(out, vec![json!({"age": 0}), json!({"age": 1})]);
/// ```
pub fn adjust(selector: &Selector, patch: &Patch, items: Vec<Value>) -> Vec<Value> {
    adjust_at(selector, patch, items, Depth::Deep)
}

/// [`adjust`] using the shallow engine for record patches.
pub fn shallow_adjust(selector: &Selector, patch: &Patch, items: Vec<Value>) -> Vec<Value> {
    adjust_at(selector, patch, items, Depth::Shallow)
}

// ── Tests ─────────────────────────────────────────────────────────────────
