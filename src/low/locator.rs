//! Resolution of reference nodes to their targets through the index.

use super::base::Reference;
use super::context::BuildContext;
use crate::constants::{MAX_REFERENCE_HOPS, REF_KEY};
use crate::error::Error;
use crate::yaml::Node;
use tracing::trace;

/// Target of `node` if it is a reference the index can resolve.
///
/// Follows a single hop; `None` for non-references and unknown references.
#[must_use]
pub fn locate(node: &Node, ctx: &BuildContext) -> Option<Node> {
    let reference = node.reference()?;
    let target = ctx.index().locate_from(node.origin(), reference);
    trace!(
        target: "strata::locator",
        "{reference} @ {} -> {:?}",
        node.position(),
        target.as_ref().map(Node::position)
    );
    target
}

/// Follows `node` through any chain of references to a concrete node.
///
/// Returns the node itself when it is not a reference, along with the first
/// reference site when it was.
///
/// # Errors
///
/// Returns a reference-not-found error naming the `$ref` that has no target,
/// or a loop error when the chain never reaches a concrete node.
pub fn resolve(node: &Node, ctx: &BuildContext) -> Result<(Node, Option<Reference>), Error> {
    let Some(definition) = node.reference() else {
        return Ok((node.clone(), None));
    };
    let site = Reference {
        definition: definition.to_string(),
        node: node.clone(),
    };

    let mut current = node.clone();
    for _ in 0..MAX_REFERENCE_HOPS {
        if !current.is_reference() {
            return Ok((current, Some(site)));
        }
        current = match locate(&current, ctx) {
            Some(target) => target,
            None => return Err(not_found(&current)),
        };
    }

    if current.is_reference() {
        return Err(Error::reference_loop(&site.definition, ref_value(&site.node)));
    }
    Ok((current, Some(site)))
}

/// Error for a reference node whose target is missing
pub(crate) fn not_found(node: &Node) -> Error {
    Error::reference_not_found(node.reference().unwrap_or_default(), ref_value(node))
}

/// The `$ref` scalar of a reference object, for error positions
fn ref_value(node: &Node) -> &Node {
    node.get(REF_KEY).unwrap_or(node)
}
