//! Shape conversions for [`ConfigNode`].

use rstest::rstest;
use serde_json::{Value, json};

use super::{ConfigNode, Scalar};

#[rstest]
fn lifts_nested_json_into_structural_nodes() {
    let node = ConfigNode::from(json!({"user": {"tags": ["a", 1, null, true]}}));
    let tags = node
        .get("user")
        .and_then(|user| user.get("tags"))
        .and_then(ConfigNode::as_sequence);
    assert_eq!(tags.map(<[ConfigNode]>::len), Some(4));
    assert_eq!(
        tags.and_then(|items| items.first()),
        Some(&ConfigNode::string("a"))
    );
    assert_eq!(
        tags.and_then(|items| items.get(2)),
        Some(&ConfigNode::Scalar(Scalar::Null))
    );
}

#[rstest]
#[case(json!(null))]
#[case(json!("text"))]
#[case(json!({"a": {"b": [1, 2.5, "c"]}, "d": false}))]
fn serializes_like_the_source_json(#[case] source: Value) {
    let node = ConfigNode::from(source.clone());
    let encoded = serde_json::to_value(&node).expect("serialize node");
    assert_eq!(encoded, source);
    assert_eq!(Value::from(node), source);
}

#[rstest]
fn accessors_reject_other_shapes() {
    let leaf = ConfigNode::string("x");
    assert!(leaf.as_mapping().is_none());
    assert!(leaf.as_sequence().is_none());
    assert_eq!(leaf.get("x"), None);
    assert_eq!(leaf.kind(), "scalar");
    assert_eq!(ConfigNode::empty_mapping().kind(), "mapping");
    assert_eq!(ConfigNode::Sequence(Vec::new()).as_str(), None);
}

#[rstest]
fn non_finite_floats_encode_as_json_null() {
    let node = ConfigNode::Scalar(Scalar::NonFinite(f64::INFINITY));
    assert_eq!(serde_json::to_string(&node).expect("serialize"), "null");
    assert_eq!(Value::from(node), Value::Null);
}
