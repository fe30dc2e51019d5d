//! Typed schema entries read from a `types` sequence.

use crate::error::{BuildError, BuildResult};
use crate::node::{ConfigNode, Scalar};

/// A type definition and the references it makes to other types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypedEntry {
    /// Declared type name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

/// A field of a [`TypedEntry`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    /// Name of the type this field returns, if it names one.
    pub of_type: Option<String>,
    /// Arguments accepted by the field.
    pub args: Vec<Argument>,
}

/// An argument of a [`Field`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Argument {
    /// Name of the argument's input type, if it names one.
    pub of_type: Option<String>,
}

impl TypedEntry {
    /// Reads the entry at position `index` of the `types` sequence.
    ///
    /// Entries must be mappings with a string `name`. `fields` and each
    /// field's `args` are optional sequences of mappings; `ofType` is an
    /// optional string.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedSchema`] locating the first value that
    /// does not have the expected shape.
    pub fn from_node(index: usize, node: &ConfigNode) -> BuildResult<Self> {
        let location = format!("types[{index}]");
        expect_mapping(&location, node)?;
        let name = node
            .get("name")
            .and_then(ConfigNode::as_str)
            .ok_or_else(|| {
                BuildError::malformed_schema(format!("{location}.name"), "expected a string type name")
            })?
            .to_owned();
        let fields = entries_of(&format!("{location}.fields"), node.get("fields"))?
            .map(|(field_location, field)| Field::from_node(&field_location, field))
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(Self { name, fields })
    }

    /// Every type name referenced by the entry's fields and their arguments,
    /// in declaration order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().flat_map(|field| {
            field
                .of_type
                .as_deref()
                .into_iter()
                .chain(field.args.iter().filter_map(|arg| arg.of_type.as_deref()))
        })
    }
}

impl Field {
    fn from_node(location: &str, node: &ConfigNode) -> BuildResult<Self> {
        expect_mapping(location, node)?;
        let of_type = read_of_type(location, node)?;
        let args = entries_of(&format!("{location}.args"), node.get("args"))?
            .map(|(arg_location, arg)| -> BuildResult<Argument> {
                expect_mapping(&arg_location, arg)?;
                Ok(Argument {
                    of_type: read_of_type(&arg_location, arg)?,
                })
            })
            .collect::<BuildResult<Vec<_>>>()?;
        Ok(Self { of_type, args })
    }
}

fn expect_mapping(location: &str, node: &ConfigNode) -> BuildResult<()> {
    if node.as_mapping().is_some() {
        Ok(())
    } else {
        Err(BuildError::malformed_schema(
            location,
            format!("expected a mapping, found a {}", node.kind()),
        ))
    }
}

/// Iterates an optional sequence, pairing each element with its location.
fn entries_of<'n>(
    location: &str,
    node: Option<&'n ConfigNode>,
) -> BuildResult<impl Iterator<Item = (String, &'n ConfigNode)> + use<'n>> {
    let items = match node {
        None | Some(ConfigNode::Scalar(Scalar::Null)) => &[][..],
        Some(ConfigNode::Sequence(items)) => items.as_slice(),
        Some(other) => {
            return Err(BuildError::malformed_schema(
                location,
                format!("expected a sequence, found a {}", other.kind()),
            ));
        }
    };
    let owned_location = location.to_owned();
    Ok(items
        .iter()
        .enumerate()
        .map(move |(index, item)| (format!("{owned_location}[{index}]"), item)))
}

fn read_of_type(location: &str, node: &ConfigNode) -> BuildResult<Option<String>> {
    match node.get("ofType") {
        None | Some(ConfigNode::Scalar(Scalar::Null)) => Ok(None),
        Some(ConfigNode::Scalar(Scalar::String(name))) => Ok(Some(name.clone())),
        Some(other) => Err(BuildError::malformed_schema(
            format!("{location}.ofType"),
            format!("expected a type name, found a {}", other.kind()),
        )),
    }
}
