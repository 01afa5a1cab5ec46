use super::context::BuildContext;
use crate::error::Error;
use crate::yaml::{Node, Position};
use indexmap::IndexMap;

/// The `$ref` through which a value was reached
#[derive(Debug, Clone)]
pub struct Reference {
    /// The reference as written
    pub definition: String,
    /// The mapping holding the `$ref`
    pub node: Node,
}

/// A value together with the source nodes it was read from.
///
/// `value_node` is the node the value was decoded from. When the value was
/// reached through a `$ref`, that is the resolved target and `reference`
/// points back at the referring site.
#[derive(Debug, Clone)]
pub struct Positioned<T> {
    pub value: T,
    pub key_node: Option<Node>,
    pub value_node: Node,
    pub reference: Option<Reference>,
}

impl<T> Positioned<T> {
    #[must_use]
    pub const fn new(value: T, key_node: Option<Node>, value_node: Node) -> Self {
        Self {
            value,
            key_node,
            value_node,
            reference: None,
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: Option<Reference>) -> Self {
        self.reference = reference;
        self
    }

    /// Position of the value
    #[must_use]
    pub fn position(&self) -> Position {
        self.value_node.position()
    }

    /// Position of the key the value was found under
    #[must_use]
    pub fn key_position(&self) -> Option<Position> {
        self.key_node.as_ref().map(Node::position)
    }

    #[must_use]
    pub const fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Positioned<U> {
        Positioned {
            value: f(self.value),
            key_node: self.key_node,
            value_node: self.value_node,
            reference: self.reference,
        }
    }
}

pub type PositionedMap<T> = IndexMap<String, Positioned<T>>;

/// `x-` keys of an object, decoded best-effort
pub type Extensions = IndexMap<String, Positioned<serde_json::Value>>;

/// A low-level object that can be built from a mapping node.
pub trait Buildable: Sized + Send + Sync {
    /// Whether extractors resolve a `$ref` node before calling [`Buildable::build`].
    /// Types that resolve lazily receive the reference node itself.
    const RESOLVE_REFERENCES: bool = true;

    /// Builds the object from `node`, found under `key` when it has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the node has the wrong shape or a nested reference
    /// cannot be resolved.
    fn build(key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error>;
}

/// Fails with a type mismatch unless `node` is a mapping
pub(crate) fn expect_mapping(label: &str, node: &Node) -> Result<(), Error> {
    if node.is_mapping() {
        Ok(())
    } else {
        Err(Error::type_mismatch(label, "a mapping", node))
    }
}
