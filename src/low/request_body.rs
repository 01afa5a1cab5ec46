use super::base::{expect_mapping, Buildable, Extensions, Positioned, PositionedMap};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::extract_map;
use super::fields::scalar;
use super::media::MediaType;
use crate::constants::{FIELD_CONTENT, FIELD_DESCRIPTION, FIELD_REQUEST_BODY, FIELD_REQUIRED};
use crate::error::Error;
use crate::yaml::Node;

#[derive(Debug, Clone)]
pub struct RequestBody {
    pub description: Option<Positioned<String>>,
    pub content: Option<Positioned<PositionedMap<MediaType>>>,
    pub required: Option<Positioned<bool>>,
    pub extensions: Extensions,
}

impl Buildable for RequestBody {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_REQUEST_BODY, node)?;
        Ok(Self {
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            content: extract_map(FIELD_CONTENT, node, ctx)?,
            required: scalar(node, FIELD_REQUIRED, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}
