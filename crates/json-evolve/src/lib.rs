//! json-evolve — immutable structural patch application for JSON values.
//!
//! Given a [`Patch`] describing additions, replacements, functional
//! updates, and deletions, the engine produces a new `serde_json::Value`
//! derived from a target, without mutating anything observable: targets
//! are consumed by value and untouched subtrees move into the result
//! unchanged. It replaces manual deep-copy-and-modify code for nested,
//! plain-data structures, and its deferred forms slot into reducer and
//! selector pipelines as plain callbacks.
//!
//! # Operations
//!
//! - [`evolve`] — recursive deep merge of a patch into a target.
//! - [`shallow_evolve`] — top-level-only sibling: nested record patches
//!   replace instead of merging.
//! - [`map`] / [`shallow_map`] — transform every element of an array.
//! - [`adjust`] / [`shallow_adjust`] — transform the elements picked by a
//!   [`Selector`] (index, negative index, or predicate); when nothing
//!   matches the input vector is handed back untouched.
//! - [`Patch::Unset`] (also the [`unset`] function) — the deletion
//!   sentinel, embeddable as a patch value or returned from an updater.
//! - [`Evolver`], [`Mapper`], [`Adjuster`] — the deferred ("curried")
//!   forms, each awaiting only its target and each usable as a patch value
//!   in its own right.
//!
//! The engine performs no shape validation and raises no errors: malformed
//! patch/target combinations fall through to the most literal applicable
//! rule (replace, merge over an empty baseline, or delete).
//!
//! # Quick start
//!
//! ```
//! use json_evolve::{evolve, patch, Patch};
//! use serde_json::{json, Value};
//!
//! let state = json!({
//!     "user": {"name": "Alice", "age": 22},
//!     "tags": {"active": true, "stale": true},
//! });
//!
//! let out = evolve(
//!     &patch!({
//!         "user": {
//!             "age": (Patch::update(|v: Option<Value>| {
//!                 json!(v.and_then(|v| v.as_i64()).unwrap_or(0) + 11)
//!             })),
//!         },
//!         "tags": {"stale": unset},
//!     }),
//!     state,
//! );
//!
//! assert_eq!(
//!     out,
//!     json!({
//!         "user": {"name": "Alice", "age": 33},
//!         "tags": {"active": true},
//!     })
//! );
//! ```

pub mod apply;
pub mod curry;
pub mod patch;
pub mod select;

mod macros;

pub use apply::{evolve, shallow_evolve};
pub use curry::{Adjuster, Evolver, Mapper};
pub use patch::{unset, Edit, Patch, PatchMap, Update};
pub use select::{adjust, map, shallow_adjust, shallow_map, Selector};

/// Alias of [`evolve`] for call sites that want to underline that the
/// patch and target need not share a shape; same function, no separate
/// code path.
pub use apply::evolve as evolve_;

// Support for the `patch!` macro; not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use serde_json::{json, Value};
}
