//! Assembly of YAML rules documents.
//!
//! Rules live directly under their prefix, one parameter per rule. A value
//! holding a YAML sequence becomes the rule stored under the parameter's key;
//! a value holding a YAML mapping is merged into the document as a whole,
//! which lets one parameter carry several rules at once.

use tracing::trace;

use crate::error::{BuildError, BuildResult};
use crate::merge::merge_mappings;
use crate::node::{ConfigNode, Mapping};
use crate::path::{last_segment, relative_path};
use crate::source::Parameter;
use crate::value::{RuleValue, parse_rule_value};

/// Builds the rules document for one prefix.
///
/// # Examples
///
/// ```rust
/// use param_config::{ConfigNode, Parameter, assemble_rules};
/// use serde_json::json;
///
/// let params = [
///     Parameter::new("/r/blockedIps", "[\"1.2.3.4\"]"),
///     Parameter::new("/r/limits", "perMinute: 60"),
/// ];
/// let rules = assemble_rules(&params, "/r", true)?;
/// assert_eq!(
///     ConfigNode::Mapping(rules),
///     ConfigNode::from(json!({"blockedIps": ["1.2.3.4"], "perMinute": 60}))
/// );
/// # Ok::<_, param_config::BuildError>(())
/// ```
///
/// # Errors
///
/// - [`BuildError::UnsupportedNesting`] when a key is not directly below the
///   prefix.
/// - [`BuildError::ValueParse`] when a value is neither a mapping nor a
///   sequence.
/// - [`BuildError::DuplicateKey`] when a sequence rule's key is already
///   present in the document.
pub fn assemble_rules(params: &[Parameter], base: &str, strip_prefix: bool) -> BuildResult<Mapping> {
    let mut result = Mapping::new();
    for param in params {
        let relative = relative_path(&param.key, base, strip_prefix);
        if relative.contains('/') {
            return Err(BuildError::UnsupportedNesting {
                key: param.key.clone(),
            });
        }
        let rule_key = if relative.is_empty() {
            last_segment(&param.key)
        } else {
            relative
        };
        match parse_rule_value(&param.key, &param.value)? {
            RuleValue::Mapping(map) => {
                trace!(key = %param.key, rules = map.len(), "merging rule mapping");
                merge_mappings(&mut result, map);
            }
            RuleValue::Sequence(items) => {
                if result.contains_key(rule_key) {
                    return Err(BuildError::DuplicateKey {
                        key: rule_key.to_owned(),
                    });
                }
                result.insert(rule_key.to_owned(), ConfigNode::Sequence(items));
            }
        }
    }
    Ok(result)
}
