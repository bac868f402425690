//! Core types for the patch engine.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// Ordered map of record-patch entries.
///
/// Entries apply in their declaration order, matching the key order of the
/// record literal the patch was built from.
pub type PatchMap = IndexMap<String, Patch>;

// ── Edit ──────────────────────────────────────────────────────────────────

/// The outcome of applying a patch at a single slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Replace the slot with this value.
    Set(Value),
    /// Remove the slot's key from the enclosing record.
    ///
    /// At the engine root there is no enclosing record and removal degrades
    /// to `Value::Null`.
    Unset,
}

impl From<Value> for Edit {
    fn from(value: Value) -> Edit {
        Edit::Set(value)
    }
}

// ── Update ────────────────────────────────────────────────────────────────

/// A unary updater: maps the current slot value to its replacement.
///
/// `current` is `None` when the slot is absent from the target. The result
/// is used as-is — the engine never merges into an updater's output.
///
/// Implemented by closures (via [`Patch::update`]) and by the deferred
/// operation forms ([`Evolver`](crate::Evolver), [`Mapper`](crate::Mapper),
/// [`Adjuster`](crate::Adjuster)), so a partially applied engine call is
/// just another invocable patch value.
pub trait Update: Send + Sync {
    fn update(&self, current: Option<Value>) -> Edit;
}

struct FnUpdate<F>(F);

impl<F, R> Update for FnUpdate<F>
where
    F: Fn(Option<Value>) -> R + Send + Sync,
    R: Into<Edit>,
{
    fn update(&self, current: Option<Value>) -> Edit {
        (self.0)(current).into()
    }
}

// ── Patch ─────────────────────────────────────────────────────────────────

/// A description of a change to a JSON value.
///
/// - `Merge` — a record of sub-patches, merged key-by-key into a record
///   target (the deep engine recurses; the shallow engine replaces below
///   the top level).
/// - `Update` — an updater invoked with the current value; its result is
///   used without further merging.
/// - `Unset` — the deletion sentinel: removes the corresponding key. There
///   is exactly one such marker and it cannot be confused with any data
///   value, including `null`.
/// - `Value` — any literal; fully replaces the target slot. Arrays are
///   never merged element-wise.
///
/// Patches are cheap to clone (updaters are shared behind `Arc`) and safe
/// to apply concurrently from multiple threads.
#[derive(Clone)]
pub enum Patch {
    /// A record of sub-patches.
    Merge(PatchMap),
    /// An updater function.
    Update(Arc<dyn Update>),
    /// The deletion sentinel.
    Unset,
    /// A literal replacement value.
    Value(Value),
}

impl Patch {
    /// Wraps a closure as an updater patch.
    ///
    /// The closure receives the current slot value (`None` when absent) and
    /// returns either a plain `Value` or an [`Edit`] — returning
    /// `Edit::Unset` deletes the key.
    ///
    /// # Example
    ///
    /// ```
    /// use json_evolve::{evolve, Patch};
    /// use serde_json::{json, Value};
    ///
    /// let bump = Patch::merge([(
    ///     "age",
    ///     Patch::update(|v: Option<Value>| {
    ///         json!(v.and_then(|v| v.as_i64()).unwrap_or(0) + 1)
    ///     }),
    /// )]);
    /// assert_eq!(evolve(&bump, json!({"age": 22})), json!({"age": 23}));
    /// ```
    pub fn update<F, R>(f: F) -> Patch
    where
        F: Fn(Option<Value>) -> R + Send + Sync + 'static,
        R: Into<Edit>,
    {
        Patch::Update(Arc::new(FnUpdate(f)))
    }

    /// Builds a record patch from key/sub-patch pairs.
    ///
    /// Duplicate keys keep the first occurrence's position, as in a record
    /// literal.
    pub fn merge<K, P, I>(entries: I) -> Patch
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Patch>,
    {
        Patch::Merge(
            entries
                .into_iter()
                .map(|(key, sub)| (key.into(), sub.into()))
                .collect(),
        )
    }

    /// Returns true if this patch is the deletion sentinel.
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }
}

/// The deletion sentinel, as a free function.
///
/// Equivalent to [`Patch::Unset`] (and to the `unset` keyword inside
/// [`patch!`](crate::patch!)); provided for call sites building patches
/// from plain function calls.
///
/// # Example
///
/// ```
/// use json_evolve::{evolve, unset, Patch};
/// use serde_json::json;
///
/// let p = Patch::merge([("stale", unset())]);
/// assert_eq!(evolve(&p, json!({"stale": 1, "kept": 2})), json!({"kept": 2}));
/// ```
pub fn unset() -> Patch {
    Patch::Unset
}

/// The empty patch: applying it changes nothing.
impl Default for Patch {
    fn default() -> Patch {
        Patch::Merge(PatchMap::new())
    }
}

impl fmt::Debug for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Patch::Merge(entries) => f.debug_map().entries(entries.iter()).finish(),
            Patch::Update(_) => f.write_str("Update(..)"),
            Patch::Unset => f.write_str("Unset"),
            Patch::Value(value) => fmt::Debug::fmt(value, f),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<Value> for Patch {
    fn from(value: Value) -> Patch {
        Patch::Value(value)
    }
}

impl From<&Value> for Patch {
    fn from(value: &Value) -> Patch {
        Patch::Value(value.clone())
    }
}

impl From<bool> for Patch {
    fn from(value: bool) -> Patch {
        Patch::Value(Value::from(value))
    }
}

impl From<i32> for Patch {
    fn from(value: i32) -> Patch {
        Patch::Value(Value::from(value))
    }
}

impl From<i64> for Patch {
    fn from(value: i64) -> Patch {
        Patch::Value(Value::from(value))
    }
}

impl From<u64> for Patch {
    fn from(value: u64) -> Patch {
        Patch::Value(Value::from(value))
    }
}

impl From<f64> for Patch {
    fn from(value: f64) -> Patch {
        Patch::Value(Value::from(value))
    }
}

impl From<&str> for Patch {
    fn from(value: &str) -> Patch {
        Patch::Value(Value::from(value))
    }
}

impl From<String> for Patch {
    fn from(value: String) -> Patch {
        Patch::Value(Value::from(value))
    }
}

impl From<Vec<Value>> for Patch {
    fn from(value: Vec<Value>) -> Patch {
        Patch::Value(Value::Array(value))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
