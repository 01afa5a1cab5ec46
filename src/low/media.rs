use super::base::{expect_mapping, Buildable, Extensions, Positioned, PositionedMap};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::{extract_map, extract_object};
use super::fields::{any_value, scalar};
use super::parameter::Header;
use super::proxy::SchemaProxy;
use crate::constants::{
    FIELD_ALLOW_RESERVED, FIELD_CONTENT_TYPE, FIELD_DESCRIPTION, FIELD_ENCODING, FIELD_EXAMPLE,
    FIELD_EXAMPLES, FIELD_EXPLODE, FIELD_EXTERNAL_VALUE, FIELD_HEADERS, FIELD_SCHEMA, FIELD_STYLE,
    FIELD_SUMMARY, FIELD_VALUE,
};
use crate::error::Error;
use crate::yaml::Node;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MediaType {
    pub schema: Option<Positioned<Arc<SchemaProxy>>>,
    pub example: Option<Positioned<Value>>,
    pub examples: Option<Positioned<PositionedMap<Example>>>,
    pub encoding: Option<Positioned<PositionedMap<Encoding>>>,
    pub extensions: Extensions,
}

impl Buildable for MediaType {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("media type", node)?;
        Ok(Self {
            schema: extract_object(FIELD_SCHEMA, node, ctx)?,
            example: any_value(node, FIELD_EXAMPLE),
            examples: extract_map(FIELD_EXAMPLES, node, ctx)?,
            encoding: extract_map(FIELD_ENCODING, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Encoding {
    pub content_type: Option<Positioned<String>>,
    pub headers: Option<Positioned<PositionedMap<Header>>>,
    pub style: Option<Positioned<String>>,
    pub explode: Option<Positioned<bool>>,
    pub allow_reserved: Option<Positioned<bool>>,
    pub extensions: Extensions,
}

impl Buildable for Encoding {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_ENCODING, node)?;
        Ok(Self {
            content_type: scalar(node, FIELD_CONTENT_TYPE, ctx)?,
            headers: extract_map(FIELD_HEADERS, node, ctx)?,
            style: scalar(node, FIELD_STYLE, ctx)?,
            explode: scalar(node, FIELD_EXPLODE, ctx)?,
            allow_reserved: scalar(node, FIELD_ALLOW_RESERVED, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Example {
    pub summary: Option<Positioned<String>>,
    pub description: Option<Positioned<String>>,
    pub value: Option<Positioned<Value>>,
    pub external_value: Option<Positioned<String>>,
    pub extensions: Extensions,
}

impl Buildable for Example {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("example", node)?;
        Ok(Self {
            summary: scalar(node, FIELD_SUMMARY, ctx)?,
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            value: any_value(node, FIELD_VALUE),
            external_value: scalar(node, FIELD_EXTERNAL_VALUE, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}
