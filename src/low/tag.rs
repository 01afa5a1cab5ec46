use super::base::{expect_mapping, Buildable, Extensions, Positioned};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::extract_object;
use super::fields::scalar;
use crate::constants::{FIELD_DESCRIPTION, FIELD_EXTERNAL_DOCS, FIELD_NAME, FIELD_URL};
use crate::error::Error;
use crate::yaml::Node;

#[derive(Debug, Clone)]
pub struct ExternalDoc {
    pub description: Option<Positioned<String>>,
    pub url: Option<Positioned<String>>,
    pub extensions: Extensions,
}

impl Buildable for ExternalDoc {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_EXTERNAL_DOCS, node)?;
        Ok(Self {
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            url: scalar(node, FIELD_URL, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Tag {
    pub name: Option<Positioned<String>>,
    pub description: Option<Positioned<String>>,
    pub external_docs: Option<Positioned<ExternalDoc>>,
    pub extensions: Extensions,
}

impl Buildable for Tag {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("tag", node)?;
        Ok(Self {
            name: scalar(node, FIELD_NAME, ctx)?,
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            external_docs: extract_object(FIELD_EXTERNAL_DOCS, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}
