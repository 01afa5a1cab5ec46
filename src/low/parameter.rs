//! Parameter and Header objects
//!
//! A header is a parameter without `name` and `in`, so both share one field
//! reader.

use super::base::{expect_mapping, Buildable, Extensions, Positioned, PositionedMap};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::{extract_map, extract_object};
use super::fields::{any_value, scalar};
use super::media::{Example, MediaType};
use super::proxy::SchemaProxy;
use crate::constants::{
    FIELD_ALLOW_EMPTY_VALUE, FIELD_ALLOW_RESERVED, FIELD_CONTENT, FIELD_DEPRECATED,
    FIELD_DESCRIPTION, FIELD_EXAMPLE, FIELD_EXAMPLES, FIELD_EXPLODE, FIELD_IN, FIELD_NAME,
    FIELD_REQUIRED, FIELD_SCHEMA, FIELD_STYLE,
};
use crate::error::Error;
use crate::yaml::Node;
use serde_json::Value;
use std::sync::Arc;

/// Fields common to parameters and headers
#[derive(Debug, Clone)]
pub struct ParameterFields {
    pub description: Option<Positioned<String>>,
    pub required: Option<Positioned<bool>>,
    pub deprecated: Option<Positioned<bool>>,
    pub allow_empty_value: Option<Positioned<bool>>,
    pub style: Option<Positioned<String>>,
    pub explode: Option<Positioned<bool>>,
    pub allow_reserved: Option<Positioned<bool>>,
    pub schema: Option<Positioned<Arc<SchemaProxy>>>,
    pub example: Option<Positioned<Value>>,
    pub examples: Option<Positioned<PositionedMap<Example>>>,
    pub content: Option<Positioned<PositionedMap<MediaType>>>,
    pub extensions: Extensions,
}

impl ParameterFields {
    fn read(node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        Ok(Self {
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            required: scalar(node, FIELD_REQUIRED, ctx)?,
            deprecated: scalar(node, FIELD_DEPRECATED, ctx)?,
            allow_empty_value: scalar(node, FIELD_ALLOW_EMPTY_VALUE, ctx)?,
            style: scalar(node, FIELD_STYLE, ctx)?,
            explode: scalar(node, FIELD_EXPLODE, ctx)?,
            allow_reserved: scalar(node, FIELD_ALLOW_RESERVED, ctx)?,
            schema: extract_object(FIELD_SCHEMA, node, ctx)?,
            example: any_value(node, FIELD_EXAMPLE),
            examples: extract_map(FIELD_EXAMPLES, node, ctx)?,
            content: extract_map(FIELD_CONTENT, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: Option<Positioned<String>>,
    /// The `in` field
    pub location: Option<Positioned<String>>,
    pub fields: ParameterFields,
}

impl Buildable for Parameter {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("parameter", node)?;
        Ok(Self {
            name: scalar(node, FIELD_NAME, ctx)?,
            location: scalar(node, FIELD_IN, ctx)?,
            fields: ParameterFields::read(node, ctx)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Header {
    pub fields: ParameterFields,
}

impl Buildable for Header {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("header", node)?;
        Ok(Self {
            fields: ParameterFields::read(node, ctx)?,
        })
    }
}
