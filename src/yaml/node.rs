use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 1-based line/column of a node in its source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Identity of a parsed node. Aliases of one anchor share an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Resolved type of a scalar under the YAML 1.2 core schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarTag {
    Null,
    Bool,
    Int,
    Float,
    Str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub value: String,
    pub tag: ScalarTag,
}

impl Scalar {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if self.tag != ScalarTag::Bool {
            return None;
        }
        match self.value.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        if self.tag != ScalarTag::Int {
            return None;
        }
        parse_int(&self.value)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self.tag {
            ScalarTag::Int => parse_int(&self.value).map(|v| v as f64),
            ScalarTag::Float => parse_float(&self.value),
            _ => None,
        }
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let magnitude = if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(oct) = digits.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_float(raw: &str) -> Option<f64> {
    match raw.to_ascii_lowercase().as_str() {
        ".inf" | "+.inf" => Some(f64::INFINITY),
        "-.inf" => Some(f64::NEG_INFINITY),
        ".nan" => Some(f64::NAN),
        other => other.parse::<f64>().ok(),
    }
}

#[derive(Debug)]
pub enum NodeKind {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    line: usize,
    column: usize,
    origin: Arc<str>,
}

/// A shared handle to a parsed YAML node and its source position.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    pub(crate) fn new(kind: NodeKind, position: Position, origin: Arc<str>) -> Self {
        Self(Arc::new(NodeData {
            kind,
            line: position.line,
            column: position.column,
            origin,
        }))
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.0.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.0.column
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            line: self.0.line,
            column: self.0.column,
        }
    }

    /// Location of the document this node was parsed from; empty for the root document
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.0.origin
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.0) as usize)
    }

    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match &self.0.kind {
            NodeKind::Scalar(scalar) => match scalar.tag {
                ScalarTag::Null => "null",
                ScalarTag::Bool => "a boolean",
                ScalarTag::Int => "an integer",
                ScalarTag::Float => "a number",
                ScalarTag::Str => "a string",
            },
            NodeKind::Sequence(_) => "a sequence",
            NodeKind::Mapping(_) => "a mapping",
        }
    }

    #[must_use]
    pub fn scalar(&self) -> Option<&Scalar> {
        match &self.0.kind {
            NodeKind::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// The raw text of a scalar node
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.scalar().map(|s| s.value.as_str())
    }

    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self.0.kind, NodeKind::Mapping(_))
    }

    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self.0.kind, NodeKind::Sequence(_))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(&self.0.kind, NodeKind::Scalar(s) if s.tag == ScalarTag::Null)
    }

    /// Sequence items; empty for any other kind
    #[must_use]
    pub fn items(&self) -> &[Self] {
        match &self.0.kind {
            NodeKind::Sequence(items) => items,
            _ => &[],
        }
    }

    /// Mapping entries in source order; empty for any other kind
    #[must_use]
    pub fn entries(&self) -> &[(Self, Self)] {
        match &self.0.kind {
            NodeKind::Mapping(entries) => entries,
            _ => &[],
        }
    }

    /// Key and value nodes for `key` in a mapping
    #[must_use]
    pub fn get_entry(&self, key: &str) -> Option<(&Self, &Self)> {
        self.entries()
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.get_entry(key).map(|(_, v)| v)
    }

    /// The `$ref` string when this node is a reference object
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.get(constants::REF_KEY).and_then(Self::as_str)
    }

    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.reference().is_some()
    }

    /// Resolves an RFC 6901 JSON pointer relative to this node.
    /// Anything other than the empty pointer must start with `/`.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<Self> {
        if !pointer.is_empty() && !pointer.starts_with('/') {
            return None;
        }
        let mut current = self.clone();
        for raw in pointer.split('/').skip(1) {
            let segment = decode_segment(raw);
            let next = match current.kind() {
                NodeKind::Mapping(_) => current.get(&segment).cloned(),
                NodeKind::Sequence(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| items.get(i).cloned()),
                NodeKind::Scalar(_) => None,
            }?;
            current = next;
        }
        Some(current)
    }

    /// Native value of this node. `None` when a value has no JSON form
    /// (non-finite floats).
    #[must_use]
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value;

        match &self.0.kind {
            NodeKind::Scalar(scalar) => match scalar.tag {
                ScalarTag::Null => Some(Value::Null),
                ScalarTag::Bool => scalar.as_bool().map(Value::Bool),
                ScalarTag::Int => Some(
                    scalar
                        .as_i64()
                        .map(Value::from)
                        .or_else(|| scalar.value.parse::<u64>().ok().map(Value::from))
                        .unwrap_or_else(|| Value::String(scalar.value.clone())),
                ),
                ScalarTag::Float => scalar
                    .as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number),
                ScalarTag::Str => Some(Value::String(scalar.value.clone())),
            },
            NodeKind::Sequence(items) => items
                .iter()
                .map(Self::to_json)
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            NodeKind::Mapping(entries) => {
                let mut object = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = key.as_str()?.to_string();
                    object.insert(key, value.to_json()?);
                }
                Some(Value::Object(object))
            }
        }
    }
}

fn decode_segment(raw: &str) -> String {
    let unescaped = raw.replace("~1", "/").replace("~0", "~");
    urlencoding::decode(&unescaped).map_or(unescaped.clone(), std::borrow::Cow::into_owned)
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            NodeKind::Scalar(scalar) => write!(f, "Scalar({:?} @ {})", scalar.value, self.position()),
            NodeKind::Sequence(items) => write!(f, "Sequence[{}] @ {}", items.len(), self.position()),
            NodeKind::Mapping(entries) => write!(f, "Mapping{{{}}} @ {}", entries.len(), self.position()),
        }
    }
}
