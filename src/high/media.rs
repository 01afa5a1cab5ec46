use super::schema::SchemaProxy;
use super::{extensions, map, value};
use crate::low;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    pub schema: Option<SchemaProxy>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Example>,
    pub encoding: IndexMap<String, Encoding>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::MediaType> for MediaType {
    fn from(low: &low::MediaType) -> Self {
        Self {
            schema: schema(&low.schema),
            example: value(&low.example),
            examples: map(&low.examples, Example::from),
            encoding: map(&low.encoding, Encoding::from),
            extensions: extensions(&low.extensions),
        }
    }
}

fn schema(field: &Option<low::SchemaRef>) -> Option<SchemaProxy> {
    field
        .as_ref()
        .map(|positioned| SchemaProxy::new(Arc::clone(&positioned.value)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub content_type: Option<String>,
    pub headers: IndexMap<String, Header>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub allow_reserved: Option<bool>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Encoding> for Encoding {
    fn from(low: &low::Encoding) -> Self {
        Self {
            content_type: value(&low.content_type),
            headers: map(&low.headers, Header::from),
            style: value(&low.style),
            explode: value(&low.explode),
            allow_reserved: value(&low.allow_reserved),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub value: Option<Value>,
    pub external_value: Option<String>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Example> for Example {
    fn from(low: &low::Example) -> Self {
        Self {
            summary: value(&low.summary),
            description: value(&low.description),
            value: value(&low.value),
            external_value: value(&low.external_value),
            extensions: extensions(&low.extensions),
        }
    }
}

/// Fields shared by parameters and headers
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterFields {
    pub description: Option<String>,
    pub required: Option<bool>,
    pub deprecated: Option<bool>,
    pub allow_empty_value: Option<bool>,
    pub style: Option<String>,
    pub explode: Option<bool>,
    pub allow_reserved: Option<bool>,
    pub schema: Option<SchemaProxy>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Example>,
    pub content: IndexMap<String, MediaType>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::ParameterFields> for ParameterFields {
    fn from(low: &low::ParameterFields) -> Self {
        Self {
            description: value(&low.description),
            required: value(&low.required),
            deprecated: value(&low.deprecated),
            allow_empty_value: value(&low.allow_empty_value),
            style: value(&low.style),
            explode: value(&low.explode),
            allow_reserved: value(&low.allow_reserved),
            schema: schema(&low.schema),
            example: value(&low.example),
            examples: map(&low.examples, Example::from),
            content: map(&low.content, MediaType::from),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Option<String>,
    /// The `in` field
    pub location: Option<String>,
    pub fields: ParameterFields,
}

impl Parameter {
    /// Path parameters are always required
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.location.as_deref() == Some("path") || self.fields.required.unwrap_or(false)
    }
}

impl From<&low::Parameter> for Parameter {
    fn from(low: &low::Parameter) -> Self {
        Self {
            name: value(&low.name),
            location: value(&low.location),
            fields: ParameterFields::from(&low.fields),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub fields: ParameterFields,
}

impl From<&low::Header> for Header {
    fn from(low: &low::Header) -> Self {
        Self {
            fields: ParameterFields::from(&low.fields),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    pub description: Option<String>,
    pub content: IndexMap<String, MediaType>,
    pub required: Option<bool>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::RequestBody> for RequestBody {
    fn from(low: &low::RequestBody) -> Self {
        Self {
            description: value(&low.description),
            content: map(&low.content, MediaType::from),
            required: value(&low.required),
            extensions: extensions(&low.extensions),
        }
    }
}
