use super::base::{expect_mapping, Buildable, Extensions, Positioned, PositionedMap};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::extract_map;
use super::fields::{scalar, string_list};
use crate::constants::{FIELD_DEFAULT, FIELD_DESCRIPTION, FIELD_ENUM, FIELD_URL, FIELD_VARIABLES};
use crate::error::Error;
use crate::yaml::Node;

#[derive(Debug, Clone)]
pub struct Server {
    pub url: Option<Positioned<String>>,
    pub description: Option<Positioned<String>>,
    pub variables: Option<Positioned<PositionedMap<ServerVariable>>>,
    pub extensions: Extensions,
}

impl Buildable for Server {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("server", node)?;
        Ok(Self {
            url: scalar(node, FIELD_URL, ctx)?,
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            variables: extract_map(FIELD_VARIABLES, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerVariable {
    pub enumeration: Option<Positioned<Vec<Positioned<String>>>>,
    pub default: Option<Positioned<String>>,
    pub description: Option<Positioned<String>>,
    pub extensions: Extensions,
}

impl Buildable for ServerVariable {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("server variable", node)?;
        Ok(Self {
            enumeration: string_list(node, FIELD_ENUM, ctx)?,
            default: scalar(node, FIELD_DEFAULT, ctx)?,
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}
