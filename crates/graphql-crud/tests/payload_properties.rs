//! End-to-end behavior of the create / update / upsert entry points.

use graphql_crud::{
    build_create_payload, build_one_to_one_relation_overrides, build_update_payload,
    build_upsert_payload, OverrideRegistry, Resolution, NEW_ID,
};
use serde_json::{json, Value};

const NO_OFFLINE: [&str; 0] = [];

fn create(initial: Option<Value>, current: Value, overrides: Option<&OverrideRegistry>) -> Option<Value> {
    build_create_payload(initial.as_ref(), &current, overrides)
        .unwrap_or_else(|e| panic!("create failed: {e}"))
        .map(Value::Object)
}

fn update(initial: Value, current: Value, overrides: Option<&OverrideRegistry>) -> Option<Value> {
    build_update_payload(Some(&initial), &current, overrides)
        .unwrap_or_else(|e| panic!("update failed: {e}"))
        .map(Value::Object)
}

// ----------------------------------------------------------------- Scalars

#[test]
fn scalar_change_detection() {
    assert_eq!(update(json!({"name": "A"}), json!({"name": "B"}), None), Some(json!({"name": "B"})));
    assert_eq!(update(json!({"name": "A"}), json!({"name": "A"}), None), None);
}

#[test]
fn update_of_identical_snapshot_is_empty() {
    let snapshot = json!({
        "__typename": "User",
        "id": "1",
        "localId": "l-1",
        "name": "A",
        "tags": ["x", "y"],
        "profile": {"__typename": "Profile", "id": "p", "bio": "b", "links": {"site": "s"}}
    });
    assert_eq!(update(snapshot.clone(), snapshot, None), None);
}

#[test]
fn ignored_keys_never_appear() {
    let current = json!({"__typename": "User", "id": "1", "localId": "l-1", "name": "A"});
    let created = create(None, current.clone(), None).unwrap();
    assert!(created.get("__typename").is_none());
    assert!(created.get("id").is_none());
    assert_eq!(created["localId"], json!("l-1"));

    let updated = update(json!({"localId": "l-0", "id": "0"}), current, None).unwrap();
    assert_eq!(updated, json!({"name": "A"}));
}

#[test]
fn falsy_scalar_change_is_dropped_without_override() {
    assert_eq!(update(json!({"active": true}), json!({"active": false}), None), None);
    assert_eq!(update(json!({"count": 2}), json!({"count": 0}), None), None);
    assert_eq!(update(json!({"label": "x"}), json!({"label": ""}), None), None);
}

#[test]
fn falsy_scalar_change_with_override() {
    let overrides = OverrideRegistry::new()
        .with_fn("active", |_mode, _key, _computed, _initial, current| Resolution::pass(current.cloned()));
    assert_eq!(
        update(json!({"active": true}), json!({"active": false}), Some(&overrides)),
        Some(json!({"active": false}))
    );
}

// ----------------------------------------------------------------- Nested relations

#[test]
fn nested_relation_create() {
    assert_eq!(
        create(None, json!({"name": "A", "profile": {"bio": "x"}}), None),
        Some(json!({"name": "A", "profile": {"create": {"bio": "x"}}}))
    );
}

#[test]
fn create_emits_unchanged_values() {
    assert_eq!(
        create(Some(json!({"name": "A", "age": 3})), json!({"name": "A", "age": 3}), None),
        Some(json!({"name": "A", "age": 3}))
    );
}

#[test]
fn nested_relation_update_only_carries_changes() {
    assert_eq!(
        update(
            json!({"name": "A", "profile": {"id": "p", "bio": "x", "age": 1}}),
            json!({"name": "A", "profile": {"id": "p", "bio": "y", "age": 1}}),
            None
        ),
        Some(json!({"profile": {"update": {"bio": "y"}}}))
    );
}

#[test]
fn deeply_nested_update() {
    assert_eq!(
        update(
            json!({"a": {"b": {"c": 1}}}),
            json!({"a": {"b": {"c": 2}}}),
            None
        ),
        Some(json!({"a": {"update": {"b": {"update": {"c": 2}}}}}))
    );
}

// ----------------------------------------------------------------- One-to-one relations

#[test]
fn relation_connect_and_disconnect() {
    let overrides = build_one_to_one_relation_overrides(["manager"], NO_OFFLINE);
    assert_eq!(
        update(json!({"manager": {"id": "1"}}), json!({"manager": {"id": "2"}}), Some(&overrides)),
        Some(json!({"manager": {"connect": {"id": "2"}}}))
    );
    assert_eq!(
        update(json!({"manager": {"id": "1"}}), json!({}), Some(&overrides)),
        Some(json!({"manager": {"disconnect": true}}))
    );
    assert_eq!(
        update(json!({"manager": {"id": "1"}}), json!({"manager": null}), Some(&overrides)),
        Some(json!({"manager": {"disconnect": true}}))
    );
}

#[test]
fn relation_unchanged_is_omitted() {
    let overrides = build_one_to_one_relation_overrides(["manager"], NO_OFFLINE);
    assert_eq!(
        update(
            json!({"name": "A", "manager": {"id": "1"}}),
            json!({"name": "A", "manager": {"id": "1"}}),
            Some(&overrides)
        ),
        None
    );
    assert_eq!(update(json!({"name": "A"}), json!({"name": "A"}), Some(&overrides)), None);
}

#[test]
fn relation_on_create_connects_never_creates() {
    let overrides = build_one_to_one_relation_overrides(["manager", "team"], ["team"]);
    assert_eq!(
        create(
            None,
            json!({
                "name": "A",
                "manager": {"__typename": "User", "id": "1", "name": "M"},
                "team": {"id": "add", "localId": "t-1"}
            }),
            Some(&overrides)
        ),
        Some(json!({
            "name": "A",
            "manager": {"connect": {"id": "1"}},
            "team": {"connect": {"localId": "t-1"}}
        }))
    );
}

#[test]
fn relation_absent_on_create_is_omitted() {
    let overrides = build_one_to_one_relation_overrides(["manager"], NO_OFFLINE);
    assert_eq!(
        create(None, json!({"name": "A", "manager": null}), Some(&overrides)),
        Some(json!({"name": "A"}))
    );
}

#[test]
fn relation_inside_created_child() {
    // The override applies to the key wherever it appears, so a nested
    // relation under a created child still connects.
    let overrides = build_one_to_one_relation_overrides(["owner"], NO_OFFLINE);
    assert_eq!(
        create(None, json!({"profile": {"bio": "x", "owner": {"id": "u"}}}), Some(&overrides)),
        Some(json!({"profile": {"create": {"bio": "x", "owner": {"connect": {"id": "u"}}}}}))
    );
}

// ----------------------------------------------------------------- Upsert

#[test]
fn upsert_gating() {
    assert_eq!(
        build_upsert_payload(Some("real-id"), Some(&json!({"name": "A"})), &json!({"name": "A"}), None).unwrap(),
        None
    );

    let payload = build_upsert_payload(None, None, &json!({"name": "A"}), None).unwrap().unwrap();
    assert_eq!(payload.create.map(Value::Object), Some(json!({"name": "A"})));
    assert_eq!(payload.where_.id, NEW_ID);
}

#[test]
fn upsert_with_changes_for_real_id() {
    let payload = build_upsert_payload(Some("7"), Some(&json!({"name": "A"})), &json!({"name": "B"}), None)
        .unwrap()
        .unwrap();
    assert_eq!(
        payload.to_value(),
        json!({"create": {"name": "B"}, "update": {"name": "B"}, "where": {"id": "7"}})
    );
}

#[test]
fn upsert_update_keeps_local_id() {
    // Pinned: the upsert update branch ignores only `__typename` and `id`,
    // while build_update_payload also ignores `localId`.
    let initial = json!({"localId": "l-1"});
    let current = json!({"localId": "l-2"});
    let payload = build_upsert_payload(Some("7"), Some(&initial), &current, None).unwrap().unwrap();
    assert_eq!(payload.update.map(Value::Object), Some(json!({"localId": "l-2"})));
    assert_eq!(update(initial, current, None), None);
}

#[test]
fn upsert_empty_string_id_counts_as_absent() {
    let payload = build_upsert_payload(Some(""), Some(&json!({"a": 1})), &json!({"a": 1}), None)
        .unwrap()
        .unwrap();
    assert_eq!(payload.where_.id, NEW_ID);
    assert_eq!(payload.update, None);
}
