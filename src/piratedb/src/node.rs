//! Generic attribute tree produced by the template deserializer
//!
//! Templates arrive as loosely-typed trees: scalars, lists and keyed maps,
//! where a map may carry the serializer's type tag. The JSON interchange form
//! stores the tag under the reserved `$__type` key.
//!
//! Field lookups are expected to miss; every accessor returns `Option`.

use std::collections::HashMap;

/// Reserved JSON key holding a map's type tag
pub const TYPE_TAG_KEY: &str = "$__type";

/// A node in a deserialized template tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<Node>),
    Map(Object),
}

/// A keyed map node with an optional type tag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    pub type_tag: Option<String>,
    pub fields: HashMap<String, Node>,
}

impl Object {
    pub fn new(type_tag: Option<&str>) -> Self {
        Self {
            type_tag: type_tag.map(str::to_string),
            fields: HashMap::new(),
        }
    }
}

impl Node {
    /// Parse a node tree from JSON bytes
    pub fn from_slice(data: &[u8]) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(data)?;
        Ok(Self::from(value))
    }

    /// Look up a map field. Returns `None` for absent keys and non-map nodes.
    pub fn get(&self, field: &str) -> Option<&Node> {
        match self {
            Node::Map(obj) => obj.fields.get(field),
            _ => None,
        }
    }

    /// Look up a field that is present and not null
    pub fn get_some(&self, field: &str) -> Option<&Node> {
        self.get(field).filter(|n| !n.is_null())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Type tag of a map node, with any `class `/`struct ` prefix removed
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Node::Map(obj) => obj.type_tag.as_deref().map(|tag| {
                tag.strip_prefix("class ")
                    .or_else(|| tag.strip_prefix("struct "))
                    .unwrap_or(tag)
            }),
            _ => None,
        }
    }

    /// Number of fields in a map node (the type tag is not counted)
    pub fn field_count(&self) -> usize {
        match self {
            Node::Map(obj) => obj.fields.len(),
            _ => 0,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Int(v) => Some(*v),
            Node::UInt(v) => i64::try_from(*v).ok(),
            Node::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Node::UInt(v) => Some(*v),
            other => other.as_i64().and_then(|v| u64::try_from(v).ok()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Float(v) => Some(*v),
            Node::Int(v) => Some(*v as f64),
            Node::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            Node::Int(v) => Some(*v != 0),
            Node::UInt(v) => Some(*v != 0),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Iterate over the string entries of a list field
    pub fn strings<'a>(&'a self, field: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.get(field)
            .and_then(Node::as_list)
            .unwrap_or(&[])
            .iter()
            .filter_map(Node::as_str)
    }

    /// Whether a string list field contains `needle`
    pub fn list_contains(&self, field: &str, needle: &str) -> bool {
        self.strings(field).any(|s| s == needle)
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Node::UInt(u)
                } else {
                    Node::Float(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => Node::Str(s),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => {
                let mut obj = Object::default();
                for (key, value) in map {
                    if key == TYPE_TAG_KEY {
                        obj.type_tag = value.as_str().map(str::to_string);
                    } else {
                        obj.fields.insert(key, Node::from(value));
                    }
                }
                Node::Map(obj)
            }
        }
    }
}

/// Final `/`-separated segment of the first entry of an icon list field
///
/// Returns an empty string when the field is absent or malformed.
pub fn icon_image(node: &Node, field: &str) -> String {
    node.get(field)
        .and_then(|icon| match icon {
            Node::List(items) => items.first().and_then(Node::as_str),
            other => other.as_str(),
        })
        .map(|path| path.rsplit('/').next().unwrap_or(path).to_string())
        .unwrap_or_default()
}
