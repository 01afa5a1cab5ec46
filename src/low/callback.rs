use super::base::{Buildable, Extensions, PositionedMap};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::collect_entries;
use super::path::PathItem;
use crate::constants::FIELD_CALLBACKS;
use crate::error::Error;
use crate::yaml::Node;

/// Runtime expressions mapped to the path items they call back into
#[derive(Debug, Clone)]
pub struct Callback {
    pub expressions: PositionedMap<PathItem>,
    pub extensions: Extensions,
}

impl Buildable for Callback {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        Ok(Self {
            expressions: collect_entries(FIELD_CALLBACKS, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}
