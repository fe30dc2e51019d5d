//! Shape inference for assembled trees.

use rstest::rstest;
use serde_json::{Value, json};

use super::{ROOT_ITEMS_KEY, assemble_tree, insert_path};
use crate::node::{ConfigNode, Mapping};
use crate::source::Parameter;

fn params(pairs: &[(&str, &str)]) -> Vec<Parameter> {
    let mut list: Vec<Parameter> = pairs
        .iter()
        .map(|(key, value)| Parameter::new(*key, *value))
        .collect();
    list.sort();
    list
}

fn assembled(pairs: &[(&str, &str)], base: &str) -> Value {
    Value::from(ConfigNode::Mapping(assemble_tree(&params(pairs), base, true)))
}

#[rstest]
fn empty_listing_is_an_empty_mapping() {
    assert!(assemble_tree(&[], "/p", true).is_empty());
}

#[rstest]
fn single_root_entry_uses_its_last_segment() {
    let tree = assembled(&[("/p/limit", "5")], "/p/limit");
    assert_eq!(tree, json!({"limit": 5}));
}

#[rstest]
fn several_root_entries_become_items() {
    let tree = assembled(&[("/p/a", "1"), ("/p/a/", "\"x\"")], "/p/a");
    let items = tree
        .get(ROOT_ITEMS_KEY)
        .and_then(Value::as_array)
        .expect("items sequence");
    assert_eq!(items.len(), 2);
    assert!(items.contains(&json!(1)));
    assert!(items.contains(&json!("x")));
}

#[rstest]
fn first_level_values_are_emitted_directly() {
    let tree = assembled(&[("/p/a", "1"), ("/p/b", "two")], "/p");
    assert_eq!(tree, json!({"a": 1, "b": "two"}));
}

#[rstest]
fn equal_depth_children_become_a_sequence() {
    let tree = assembled(
        &[("/p/user/name", "\"Ann\""), ("/p/user/age", "30")],
        "/p",
    );
    let user = tree
        .get("user")
        .and_then(Value::as_array)
        .expect("user sequence");
    assert_eq!(user.len(), 2);
    assert!(user.contains(&json!("Ann")));
    assert!(user.contains(&json!(30)));
}

#[rstest]
fn deeper_children_become_nested_mappings() {
    let tree = assembled(
        &[
            ("/p/user/profile/name", "\"Ann\""),
            ("/p/user/profile/age", "30"),
        ],
        "/p",
    );
    assert_eq!(tree, json!({"user": {"profile": {"name": "Ann", "age": 30}}}));
}

#[rstest]
fn mixed_depth_children_become_nested_mappings() {
    let tree = assembled(
        &[
            ("/p/types/0/name", "\"User\""),
            ("/p/types/0/fields/0/name", "\"id\""),
            ("/p/types/count", "1"),
        ],
        "/p",
    );
    assert_eq!(
        tree,
        json!({"types": {"0": {"name": "User", "fields": {"0": {"name": "id"}}}, "count": 1}})
    );
}

#[rstest]
fn single_deep_child_builds_a_chain() {
    let tree = assembled(&[("/p/a/b/c/d", "[1,2]")], "/p");
    assert_eq!(tree, json!({"a": {"b": {"c": {"d": [1, 2]}}}}));
}

#[rstest]
fn value_at_level_keeps_the_dot_key_beside_deeper_children() {
    let tree = assembled(&[("/p/a", "1"), ("/p/a/b/c", "2")], "/p");
    assert_eq!(tree, json!({"a": {".": 1, "b": {"c": 2}}}));
}

#[rstest]
fn scalar_addressed_as_parent_is_replaced_by_a_mapping() {
    // `b` is written as a scalar first, then used as the parent of `c`.
    let tree = assembled(&[("/p/a/b", "1"), ("/p/a/b/c", "2")], "/p");
    assert_eq!(tree, json!({"a": {"b": {"c": 2}}}));
}

#[rstest]
fn unparseable_values_stay_strings() {
    let tree = assembled(&[("/p/greeting", "hello world")], "/p");
    assert_eq!(tree, json!({"greeting": "hello world"}));
}

#[rstest]
fn insert_path_overwrites_leaves_and_replaces_sequences() {
    let mut root = Mapping::new();
    insert_path(&mut root, "a", ConfigNode::from(json!([1])));
    insert_path(&mut root, "a/b", ConfigNode::from(json!(2)));
    insert_path(&mut root, "a/b", ConfigNode::from(json!(3)));
    assert_eq!(
        Value::from(ConfigNode::Mapping(root)),
        json!({"a": {"b": 3}})
    );
}
