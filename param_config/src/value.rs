//! Interpretation of raw parameter values.
//!
//! Schema documents decode each value as JSON and fall back to the raw text.
//! Rule documents decode each value as YAML and require a mapping or a
//! sequence. YAML values are lifted node by node so that floats JSON cannot
//! hold (`.nan`, `.inf`) keep their type.

use serde_json::{Number, Value};
use serde_yaml::Value as YamlValue;

use crate::error::{BuildError, BuildResult};
use crate::node::{ConfigNode, Mapping, Scalar};

/// Decoded value of a rules parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleValue {
    /// A YAML mapping, folded into the rules document.
    Mapping(Mapping),
    /// A YAML sequence, stored under the parameter's own key.
    Sequence(Vec<ConfigNode>),
}

/// Decodes `raw` as JSON, keeping the text itself when it is not valid JSON.
///
/// # Examples
///
/// ```rust
/// use param_config::ConfigNode;
/// use param_config::value::parse_json_value;
/// use serde_json::json;
///
/// assert_eq!(parse_json_value("30"), ConfigNode::from(json!(30)));
/// assert_eq!(parse_json_value("\"Ann\""), ConfigNode::string("Ann"));
/// assert_eq!(parse_json_value("Ann"), ConfigNode::string("Ann"));
/// ```
#[must_use]
pub fn parse_json_value(raw: &str) -> ConfigNode {
    serde_json::from_str::<Value>(raw).map_or_else(|_| ConfigNode::string(raw), ConfigNode::from)
}

/// Decodes the rules parameter `key` holding `raw` as a YAML mapping or a
/// YAML sequence.
///
/// Blank input and an explicit YAML null decode to an empty mapping. Only
/// `true` and `false` are booleans, so `yes` and `no` stay strings.
///
/// # Errors
///
/// Returns [`BuildError::ValueParse`] naming `key` when `raw` is not valid
/// YAML, holds a scalar, or uses a mapping key that is itself a collection.
pub fn parse_rule_value(key: &str, raw: &str) -> BuildResult<RuleValue> {
    if raw.trim().is_empty() {
        return Ok(RuleValue::Mapping(Mapping::new()));
    }
    let document: YamlValue = serde_yaml::from_str(raw)
        .map_err(|err| BuildError::value_parse(key, format!("invalid YAML ({err})")))?;
    match untag(document) {
        YamlValue::Null => Ok(RuleValue::Mapping(Mapping::new())),
        YamlValue::Mapping(map) => lift_mapping(key, map).map(RuleValue::Mapping),
        YamlValue::Sequence(items) => items
            .into_iter()
            .map(|item| lift_yaml(key, item))
            .collect::<BuildResult<Vec<_>>>()
            .map(RuleValue::Sequence),
        _ => Err(BuildError::value_parse(
            key,
            "expected a mapping or a sequence, found a scalar",
        )),
    }
}

fn untag(value: YamlValue) -> YamlValue {
    match value {
        YamlValue::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn lift_yaml(key: &str, value: YamlValue) -> BuildResult<ConfigNode> {
    Ok(match value {
        YamlValue::Null => ConfigNode::Scalar(Scalar::Null),
        YamlValue::Bool(flag) => ConfigNode::Scalar(Scalar::Bool(flag)),
        YamlValue::Number(number) => ConfigNode::Scalar(lift_number(&number)),
        YamlValue::String(text) => ConfigNode::string(text),
        YamlValue::Sequence(items) => ConfigNode::Sequence(
            items
                .into_iter()
                .map(|item| lift_yaml(key, item))
                .collect::<BuildResult<_>>()?,
        ),
        YamlValue::Mapping(map) => ConfigNode::Mapping(lift_mapping(key, map)?),
        YamlValue::Tagged(tagged) => lift_yaml(key, tagged.value)?,
    })
}

fn lift_mapping(key: &str, map: serde_yaml::Mapping) -> BuildResult<Mapping> {
    map.into_iter()
        .map(|(child, value)| -> BuildResult<(String, ConfigNode)> {
            Ok((mapping_key(key, child)?, lift_yaml(key, value)?))
        })
        .collect()
}

/// Scalar keys are written as their YAML text, so `1: a` yields key `"1"`.
fn mapping_key(key: &str, child: YamlValue) -> BuildResult<String> {
    match untag(child) {
        YamlValue::String(text) => Ok(text),
        YamlValue::Bool(flag) => Ok(flag.to_string()),
        YamlValue::Number(number) => Ok(number.to_string()),
        YamlValue::Null => Ok("null".to_owned()),
        _ => Err(BuildError::value_parse(key, "mapping keys must be scalars")),
    }
}

fn lift_number(number: &serde_yaml::Number) -> Scalar {
    if let Some(unsigned) = number.as_u64() {
        return Scalar::Number(unsigned.into());
    }
    if let Some(signed) = number.as_i64() {
        return Scalar::Number(signed.into());
    }
    let float = number.as_f64().unwrap_or(f64::NAN);
    Number::from_f64(float).map_or(Scalar::NonFinite(float), Scalar::Number)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{RuleValue, parse_json_value, parse_rule_value};
    use crate::error::BuildError;
    use crate::node::{ConfigNode, Scalar};

    #[rstest]
    #[case("1", json!(1))]
    #[case("true", json!(true))]
    #[case("null", json!(null))]
    #[case("[1, \"two\"]", json!([1, "two"]))]
    #[case("{\"a\": {\"b\": 2}}", json!({"a": {"b": 2}}))]
    #[case("plain text", json!("plain text"))]
    #[case("", json!(""))]
    #[case("{broken", json!("{broken"))]
    fn json_values(#[case] raw: &str, #[case] expected: serde_json::Value) {
        assert_eq!(parse_json_value(raw), ConfigNode::from(expected));
    }

    #[rstest]
    fn yaml_sequences_decode() {
        let value = parse_rule_value("/r/blockedIps", "[\"1.2.3.4\"]").expect("sequence");
        assert_eq!(
            value,
            RuleValue::Sequence(vec![ConfigNode::string("1.2.3.4")])
        );
    }

    #[rstest]
    fn yaml_mappings_decode_with_strict_booleans() {
        let value = parse_rule_value("/r/all", "enabled: yes\nlimits:\n  - 3\n").expect("mapping");
        let map = match value {
            RuleValue::Mapping(map) => map,
            other => panic!("expected mapping, got {other:?}"),
        };
        assert_eq!(map.get("enabled"), Some(&ConfigNode::string("yes")));
        assert_eq!(
            map.get("limits"),
            Some(&ConfigNode::from(json!([3])))
        );
    }

    #[rstest]
    #[case("   ")]
    #[case("")]
    fn blank_yaml_is_an_empty_mapping(#[case] raw: &str) {
        assert_eq!(
            parse_rule_value("/r/empty", raw).expect("blank"),
            RuleValue::Mapping(crate::node::Mapping::new())
        );
    }

    #[rstest]
    fn yaml_scalars_are_rejected_with_the_key() {
        let err = parse_rule_value("/r/plain", "just a sentence").expect_err("scalar");
        assert!(matches!(&err, BuildError::ValueParse { key, .. } if key == "/r/plain"));
        assert!(err.to_string().contains("/r/plain"));
    }

    #[rstest]
    #[case(".nan")]
    #[case(".inf")]
    #[case("-.inf")]
    fn non_finite_yaml_floats_stay_floats(#[case] raw: &str) {
        let value = parse_rule_value("/r/x", &format!("a: {raw}")).expect("mapping");
        let map = match value {
            RuleValue::Mapping(map) => map,
            other => panic!("expected mapping, got {other:?}"),
        };
        match map.get("a") {
            Some(ConfigNode::Scalar(Scalar::NonFinite(float))) => assert!(!float.is_finite()),
            other => panic!("expected a non-finite float, got {other:?}"),
        }
    }

    #[rstest]
    fn quoted_nan_stays_a_string() {
        let value = parse_rule_value("/r/x", "a: '.nan'").expect("mapping");
        assert_eq!(
            value,
            RuleValue::Mapping(
                [("a".to_owned(), ConfigNode::string(".nan"))]
                    .into_iter()
                    .collect()
            )
        );
    }

    #[rstest]
    fn scalar_keys_are_written_as_text() {
        let value = parse_rule_value("/r/codes", "404: missing\ntrue: yes").expect("mapping");
        let map = match value {
            RuleValue::Mapping(map) => map,
            other => panic!("expected mapping, got {other:?}"),
        };
        assert_eq!(map.get("404"), Some(&ConfigNode::string("missing")));
        assert_eq!(map.get("true"), Some(&ConfigNode::string("yes")));
    }

    #[rstest]
    fn collection_keys_are_rejected() {
        let err = parse_rule_value("/r/odd", "? [a, b]\n: c").expect_err("complex key");
        assert!(matches!(&err, BuildError::ValueParse { key, .. } if key == "/r/odd"));
    }
}
