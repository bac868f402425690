//! The `patch!` constructor macro.

/// Builds a [`Patch`](crate::Patch) with JSON-like syntax.
///
/// - `{ "key": sub, … }` builds a record patch ([`Patch::Merge`](crate::Patch));
///   keys are string literals, values are any of these forms.
/// - `unset` is the deletion sentinel.
/// - `( expr )` embeds any expression convertible into a `Patch`: a
///   [`Patch::update`](crate::Patch::update) closure, a deferred form
///   ([`Evolver`](crate::Evolver), [`Mapper`](crate::Mapper),
///   [`Adjuster`](crate::Adjuster)), another `Patch`, or a plain value.
/// - Anything else is a literal replacement, parsed by
///   [`serde_json::json!`] — so `[1, 2]` replaces wholesale rather than
///   merging element-wise, and a literal record replacement is written
///   `(json!({ … }))`.
///
/// # Example
///
/// ```
/// use json_evolve::{evolve, patch, Patch};
/// use serde_json::{json, Value};
///
/// let p = patch!({
///     "user": {
///         "age": (Patch::update(|v: Option<Value>| {
///             json!(v.and_then(|v| v.as_i64()).unwrap_or(0) + 11)
///         })),
///         "interests": { "mushrooms": unset },
///     },
///     "tags": ["a", "b"],
/// });
/// let out = evolve(
///     &p,
///     json!({
///         "user": {"age": 22, "interests": {"tea": true, "mushrooms": true}},
///         "tags": ["old"],
///     }),
/// );
/// assert_eq!(
///     out,
///     json!({
///         "user": {"age": 33, "interests": {"tea": true}},
///         "tags": ["a", "b"],
///     })
/// );
/// ```
#[macro_export]
macro_rules! patch {
    // ── Sentinel and null ─────────────────────────────────────────────────
    (unset) => {
        $crate::Patch::Unset
    };
    (null) => {
        $crate::Patch::Value($crate::__private::Value::Null)
    };

    // ── Record of sub-patches ─────────────────────────────────────────────
    ({ $($body:tt)* }) => {{
        #[allow(unused_mut)]
        let mut entries = $crate::PatchMap::new();
        $crate::patch!(@entries entries, $($body)*);
        $crate::Patch::Merge(entries)
    }};

    // ── Embedded expression ───────────────────────────────────────────────
    (( $e:expr )) => {
        $crate::Patch::from($e)
    };

    // ── Literal (via json!) ───────────────────────────────────────────────
    (- $lit:tt) => {
        $crate::Patch::Value($crate::__private::json!(-$lit))
    };
    ($other:tt) => {
        $crate::Patch::Value($crate::__private::json!($other))
    };

    // ── Internal: record entries ──────────────────────────────────────────
    (@entries $map:ident,) => {};
    (@entries $map:ident, $key:literal : - $value:tt $(, $($rest:tt)*)?) => {
        $map.insert(($key).to_string(), $crate::patch!(- $value));
        $crate::patch!(@entries $map, $($($rest)*)?);
    };
    (@entries $map:ident, $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $map.insert(($key).to_string(), $crate::patch!($value));
        $crate::patch!(@entries $map, $($($rest)*)?);
    };
}

#[cfg(test)]
mod tests {
    use crate::{Patch, PatchMap};
    use serde_json::{json, Value};

    #[test]
    fn empty_record_is_the_empty_patch() {
        match patch!({}) {
            Patch::Merge(entries) => assert!(entries.is_empty()),
            other => panic!("expected merge patch, got {other:?}"),
        }
    }

    #[test]
    fn scalars_and_arrays_are_literals() {
        assert!(matches!(patch!(42), Patch::Value(v) if v == json!(42)));
        assert!(matches!(patch!(-7), Patch::Value(v) if v == json!(-7)));
        assert!(matches!(patch!("s"), Patch::Value(v) if v == json!("s")));
        assert!(matches!(patch!(true), Patch::Value(v) if v == json!(true)));
        assert!(matches!(patch!(null), Patch::Value(Value::Null)));
        assert!(matches!(patch!([1, 2]), Patch::Value(v) if v == json!([1, 2])));
    }

    #[test]
    fn records_nest_and_keep_order() {
        let p = patch!({"b": {"x": unset}, "a": 1, "n": -1});
        let entries = match p {
            Patch::Merge(entries) => entries,
            other => panic!("expected merge patch, got {other:?}"),
        };
        let keys: Vec<&str> = entries.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "n"]);
        assert!(matches!(&entries["a"], Patch::Value(v) if *v == json!(1)));
        assert!(matches!(&entries["n"], Patch::Value(v) if *v == json!(-1)));
        match &entries["b"] {
            Patch::Merge(inner) => assert!(inner["x"].is_unset()),
            other => panic!("expected nested merge, got {other:?}"),
        }
    }

    #[test]
    fn trailing_commas_are_accepted() {
        let p = patch!({"a": 1, "b": 2,});
        match p {
            Patch::Merge(entries) => assert_eq!(entries.len(), 2),
            other => panic!("expected merge patch, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_expressions_embed() {
        let sub = Patch::merge([("a", 1i64)]);
        let p = patch!({"nested": (sub.clone()), "lit": (json!({"k": 1}))});
        let entries = match p {
            Patch::Merge(entries) => entries,
            other => panic!("expected merge patch, got {other:?}"),
        };
        assert!(matches!(&entries["nested"], Patch::Merge(_)));
        assert!(matches!(&entries["lit"], Patch::Value(v) if *v == json!({"k": 1})));
    }

    #[test]
    fn builder_and_macro_agree() {
        let mut entries = PatchMap::new();
        entries.insert("a".to_string(), Patch::Value(json!(1)));
        assert_eq!(format!("{:?}", patch!({"a": 1})), format!("{:?}", Patch::Merge(entries)));
    }
}
