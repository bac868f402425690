//! Deferred (partially applied) forms of the patch operations.
//!
//! Each operation has an "apply now" function ([`evolve`](crate::evolve),
//! [`map`](crate::map), [`adjust`](crate::adjust)) and a "wait for more"
//! form defined here, holding every argument but the target. Deferred forms
//! are `Clone` and reusable: re-deferring one any number of times is the
//! same value with the same behavior.
//!
//! All three implement [`Update`], so a partially applied operation is an
//! ordinary patch value — the engine can nest inside its own patches with
//! no special case.

use serde_json::Value;

use crate::apply::{apply_at, resolve, Depth};
use crate::patch::{Edit, Patch, Update};
use crate::select::{adjust_at, map_at, Selector};

// ── Evolver ───────────────────────────────────────────────────────────────

/// A patch application awaiting its target.
///
/// # Example
///
/// ```
/// use json_evolve::{patch, Evolver};
/// use serde_json::json;
///
/// let grow = Evolver::new(patch!({"age": 33}));
/// assert_eq!(grow.apply(json!({"age": 22})), json!({"age": 33}));
///
/// // Embeddable inside another patch:
/// let p = patch!({"user": (grow.clone())});
/// let out = json_evolve::evolve(&p, json!({"user": {"age": 22, "name": "Alice"}}));
/// assert_eq!(out, json!({"user": {"age": 33, "name": "Alice"}}));
/// ```
#[derive(Debug, Clone)]
pub struct Evolver {
    patch: Patch,
    depth: Depth,
}

impl Evolver {
    /// Defers a deep merge of `patch`.
    pub fn new(patch: impl Into<Patch>) -> Evolver {
        Evolver {
            patch: patch.into(),
            depth: Depth::Deep,
        }
    }

    /// Defers a shallow merge of `patch`.
    pub fn shallow(patch: impl Into<Patch>) -> Evolver {
        Evolver {
            patch: patch.into(),
            depth: Depth::Shallow,
        }
    }

    /// Applies the held patch to `target`.
    pub fn apply(&self, target: Value) -> Value {
        resolve(apply_at(&self.patch, Some(target), self.depth))
    }
}

impl Update for Evolver {
    fn update(&self, current: Option<Value>) -> Edit {
        apply_at(&self.patch, current, self.depth)
    }
}

// ── Mapper ────────────────────────────────────────────────────────────────

/// An element-wise array update awaiting its array.
///
/// Applied (via [`Update`]) to a non-array value it leaves the value
/// unchanged; applied to an absent slot it leaves the slot absent.
#[derive(Debug, Clone)]
pub struct Mapper {
    patch: Patch,
    depth: Depth,
}

impl Mapper {
    /// Defers a deep [`map`](crate::map) of `patch`.
    pub fn new(patch: impl Into<Patch>) -> Mapper {
        Mapper {
            patch: patch.into(),
            depth: Depth::Deep,
        }
    }

    /// Defers a shallow map of `patch`.
    pub fn shallow(patch: impl Into<Patch>) -> Mapper {
        Mapper {
            patch: patch.into(),
            depth: Depth::Shallow,
        }
    }

    /// Transforms every element of `items` with the held patch.
    pub fn apply(&self, items: Vec<Value>) -> Vec<Value> {
        map_at(&self.patch, items, self.depth)
    }
}

impl Update for Mapper {
    fn update(&self, current: Option<Value>) -> Edit {
        match current {
            Some(Value::Array(items)) => {
                Edit::Set(Value::Array(map_at(&self.patch, items, self.depth)))
            }
            // Non-array: zero eligible elements.
            Some(other) => Edit::Set(other),
            // Absent slot: unset on an absent key is a no-op, so the slot
            // stays absent.
            None => Edit::Unset,
        }
    }
}

// ── Adjuster ──────────────────────────────────────────────────────────────

/// A selective array update awaiting its array.
///
/// # Example
///
/// ```
/// use json_evolve::{evolve, patch, Adjuster};
/// use serde_json::json;
///
/// let first_older = Adjuster::new(0, patch!({"age": 55}));
/// let p = patch!({"friends": (first_older)});
/// let out = evolve(
///     &p,
///     json!({"friends": [{"age": 33}, {"age": 44}]}),
/// );
/// assert_eq!(out, json!({"friends": [{"age": 55}, {"age": 44}]}));
/// ```
#[derive(Debug, Clone)]
pub struct Adjuster {
    selector: Selector,
    patch: Patch,
    depth: Depth,
}

impl Adjuster {
    /// Defers a deep [`adjust`](crate::adjust) of `patch` at `selector`.
    pub fn new(selector: impl Into<Selector>, patch: impl Into<Patch>) -> Adjuster {
        Adjuster {
            selector: selector.into(),
            patch: patch.into(),
            depth: Depth::Deep,
        }
    }

    /// Defers a shallow adjust of `patch` at `selector`.
    pub fn shallow(selector: impl Into<Selector>, patch: impl Into<Patch>) -> Adjuster {
        Adjuster {
            selector: selector.into(),
            patch: patch.into(),
            depth: Depth::Shallow,
        }
    }

    /// Transforms the eligible elements of `items` with the held patch.
    pub fn apply(&self, items: Vec<Value>) -> Vec<Value> {
        adjust_at(&self.selector, &self.patch, items, self.depth)
    }
}

impl Update for Adjuster {
    fn update(&self, current: Option<Value>) -> Edit {
        match current {
            Some(Value::Array(items)) => Edit::Set(Value::Array(adjust_at(
                &self.selector,
                &self.patch,
                items,
                self.depth,
            ))),
            Some(other) => Edit::Set(other),
            None => Edit::Unset,
        }
    }
}

// ── Patch embedding ───────────────────────────────────────────────────────

impl From<Evolver> for Patch {
    fn from(evolver: Evolver) -> Patch {
        Patch::Update(std::sync::Arc::new(evolver))
    }
}

impl From<Mapper> for Patch {
    fn from(mapper: Mapper) -> Patch {
        Patch::Update(std::sync::Arc::new(mapper))
    }
}

impl From<Adjuster> for Patch {
    fn from(adjuster: Adjuster) -> Patch {
        Patch::Update(std::sync::Arc::new(adjuster))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
