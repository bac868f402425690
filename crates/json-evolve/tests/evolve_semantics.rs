//! Deep merge semantics of `evolve`.

use json_evolve::{evolve, patch, Edit, Evolver, Mapper, Patch};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

fn state() -> Value {
    json!({
        "user": {
            "name": "Alice",
            "age": 22,
            "friends": [
                {"name": "Bob", "age": 33},
                {"name": "Claire", "age": 44},
            ],
            "interests": {"tea": true, "mushrooms": true},
            "meta": {"active": true, "deleted": false},
        },
        "foo": {"a": false, "b": false},
    })
}

fn plus(n: i64) -> Patch {
    Patch::update(move |v: Option<Value>| json!(v.and_then(|v| v.as_i64()).unwrap_or(0) + n))
}

#[test]
fn performs_a_deep_merge() {
    let out = evolve(
        &patch!({
            "user": {
                "age": 33,
                "friends": [{"name": "Claire", "age": 44}],
                "interests": {"mushrooms": false},
            },
            "foo": {"b": true},
        }),
        state(),
    );
    assert_eq!(
        out,
        json!({
            "user": {
                "name": "Alice",
                "age": 33,
                "friends": [{"name": "Claire", "age": 44}],
                "interests": {"tea": true, "mushrooms": false},
                "meta": {"active": true, "deleted": false},
            },
            "foo": {"a": false, "b": true},
        })
    );
}

#[test]
fn treats_updaters_as_key_updates() {
    let append_dave = Patch::update(|v: Option<Value>| {
        let mut friends = match v {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        friends.push(json!({"name": "Dave", "age": 55}));
        Value::Array(friends)
    });
    let toggle = Patch::update(|v: Option<Value>| {
        json!(!v.and_then(|v| v.as_bool()).unwrap_or(false))
    });
    let out = evolve(
        &patch!({
            "user": {
                "age": (plus(11)),
                "friends": (append_dave),
                "interests": {"mushrooms": (toggle)},
            },
            "foo": {"b": true},
        }),
        state(),
    );
    assert_eq!(
        out,
        json!({
            "user": {
                "name": "Alice",
                "age": 33,
                "friends": [
                    {"name": "Bob", "age": 33},
                    {"name": "Claire", "age": 44},
                    {"name": "Dave", "age": 55},
                ],
                "interests": {"tea": true, "mushrooms": false},
                "meta": {"active": true, "deleted": false},
            },
            "foo": {"a": false, "b": true},
        })
    );
}

#[test]
fn omits_keys_patched_with_the_sentinel() {
    let out = evolve(&patch!({"foo": unset}), state());
    assert_eq!(out, json!({"user": state()["user"]}));

    let out = evolve(
        &patch!({"interests": {"mushrooms": unset, "tea": false}}),
        state()["user"].clone(),
    );
    assert_eq!(out["interests"], json!({"tea": false}));
}

#[test]
fn sentinel_from_an_updater_deletes_too() {
    let drop_it = Patch::update(|_: Option<Value>| Edit::Unset);
    let out = evolve(&patch!({"foo": (drop_it)}), state());
    assert_eq!(out, json!({"user": state()["user"]}));
}

#[test]
fn has_a_deferred_form() {
    let direct = evolve(&patch!({"age": 33}), state()["user"].clone());
    let deferred = Evolver::new(patch!({"age": 33}));
    assert_eq!(deferred.apply(state()["user"].clone()), direct);
    // Re-deferring any number of times changes nothing.
    assert_eq!(
        deferred.clone().clone().clone().apply(state()["user"].clone()),
        direct
    );
}

#[test]
fn can_be_used_within_a_patch() {
    // friends: map(evolve({age: age + 1}))
    let out = evolve(
        &patch!({
            "user": {
                "friends": (Mapper::new(Evolver::new(patch!({"age": (plus(1))})))),
            },
        }),
        state(),
    );
    assert_eq!(
        out["user"]["friends"],
        json!([
            {"name": "Bob", "age": 34},
            {"name": "Claire", "age": 45},
        ])
    );

    // user: evolve({age: age + 1})
    let out = evolve(
        &patch!({"user": (Evolver::new(patch!({"age": (plus(1))})))}),
        state(),
    );
    assert_eq!(out["user"]["age"], json!(23));
    assert_eq!(out["user"]["name"], json!("Alice"));
}

#[test]
fn non_record_patches_replace_regardless_of_target() {
    assert_eq!(evolve(&Patch::from(json!(null)), state()), json!(null));
    assert_eq!(evolve(&Patch::from(state()), json!(null)), state());
    assert_eq!(evolve(&Patch::from("foo"), state()), json!("foo"));
    assert_eq!(evolve(&Patch::from(json!(["foo"])), state()), json!(["foo"]));
    assert_eq!(evolve(&Patch::from(42i64), state()), json!(42));
    assert_eq!(evolve(&Patch::from(42i64), json!(42)), json!(42));
    assert_eq!(evolve(&plus(1), json!(42)), json!(43));
}

#[test]
fn handles_targets_with_different_shapes() {
    let foo = json!({"foo": {"a": true, "b": true}});
    let bar = json!({"bar": {"a": false, "b": false}});

    let out = evolve(&Patch::from(foo.clone()), bar.clone());
    assert_eq!(out, foo);

    let out = evolve(&patch!({"foo": {"a": true, "b": true}}), bar.clone());
    assert_eq!(
        out,
        json!({
            "bar": {"a": false, "b": false},
            "foo": {"a": true, "b": true},
        })
    );

    // Upsert via an updater over an absent key.
    let out = evolve(
        &patch!({"foo": (Patch::update(|_: Option<Value>| json!(true)))}),
        json!({}),
    );
    assert_eq!(out, json!({"foo": true}));

    // Empty record patch over a record target changes nothing.
    assert_eq!(evolve(&patch!({"foo": {}}), foo.clone()), foo);

    // Literals replace records and vice versa.
    assert_eq!(evolve(&patch!({"foo": "foo"}), foo.clone()), json!({"foo": "foo"}));
    assert_eq!(
        evolve(&patch!({"foo": {"a": true, "b": true}}), json!({"foo": "foo"})),
        foo
    );
    assert_eq!(
        evolve(&patch!({"foo": ["foo"]}), foo.clone()),
        json!({"foo": ["foo"]})
    );
}

#[test]
fn open_string_keyed_maps_accept_new_keys() {
    let tag_state = json!({"tags": {"foo": true, "bar": true}});

    let out = evolve(&patch!({"tags": {"baz": true}}), tag_state.clone());
    assert_eq!(out, json!({"tags": {"foo": true, "bar": true, "baz": true}}));

    let out = evolve(&patch!({"tags": {"foo": unset}}), tag_state.clone());
    assert_eq!(out, json!({"tags": {"bar": true}}));

    let out = evolve(&patch!({"tags": {"foo": unset, "bar": false}}), tag_state);
    assert_eq!(out, json!({"tags": {"bar": false}}));
}

#[test]
fn untouched_subtrees_keep_their_allocation() {
    let target = state();
    let friends_ptr = target["user"]["friends"].as_array().map(|a| a.as_ptr());
    let name_ptr = target["user"]["name"].as_str().map(|s| s.as_ptr());

    let out = evolve(&patch!({"user": {"age": 33}, "foo": {"a": true}}), target);

    assert_eq!(out["user"]["friends"].as_array().map(|a| a.as_ptr()), friends_ptr);
    assert_eq!(out["user"]["name"].as_str().map(|s| s.as_ptr()), name_ptr);
}

#[test]
fn empty_patch_is_the_identity() {
    assert_eq!(evolve(&Patch::default(), state()), state());
    assert_eq!(evolve(&patch!({}), state()), state());
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: u32,
}

#[test]
fn round_trips_through_serde_types() {
    let before = Profile {
        name: "Alice".to_string(),
        age: 22,
    };
    let value = serde_json::to_value(&before).unwrap();
    let out = evolve(&patch!({"age": 33}), value);
    let after: Profile = serde_json::from_value(out).unwrap();
    assert_eq!(
        after,
        Profile {
            name: "Alice".to_string(),
            age: 33,
        }
    );
}
