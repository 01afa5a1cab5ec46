//! `OpenAPI` 3.0 Schema Object
//!
//! Scalar constraints are read directly. Every nested schema (`allOf`,
//! `oneOf`, `anyOf`, `not`, `items`, `properties` and schema-valued
//! `additionalProperties`) becomes a [`SchemaProxy`] one level deeper, so
//! building a schema never builds its children.

use super::base::{expect_mapping, Buildable, Extensions, Positioned, PositionedMap};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::extract_object;
use super::fields::{any_value, decode_any, scalar, string_list, string_map};
use super::proxy::SchemaProxy;
use super::tag::ExternalDoc;
use crate::constants::{
    FIELD_ADDITIONAL_PROPERTIES, FIELD_ALL_OF, FIELD_ANY_OF, FIELD_ATTRIBUTE, FIELD_DEFAULT,
    FIELD_DEPRECATED, FIELD_DESCRIPTION, FIELD_DISCRIMINATOR, FIELD_ENUM, FIELD_EXAMPLE,
    FIELD_EXCLUSIVE_MAXIMUM, FIELD_EXCLUSIVE_MINIMUM, FIELD_EXTERNAL_DOCS, FIELD_FORMAT,
    FIELD_ITEMS, FIELD_MAPPING, FIELD_MAXIMUM, FIELD_MAX_ITEMS, FIELD_MAX_LENGTH,
    FIELD_MAX_PROPERTIES, FIELD_MINIMUM, FIELD_MIN_ITEMS, FIELD_MIN_LENGTH, FIELD_MIN_PROPERTIES,
    FIELD_MULTIPLE_OF, FIELD_NAME, FIELD_NAMESPACE, FIELD_NOT, FIELD_NULLABLE, FIELD_ONE_OF,
    FIELD_PATTERN, FIELD_PREFIX, FIELD_PROPERTIES, FIELD_PROPERTY_NAME, FIELD_READ_ONLY,
    FIELD_REQUIRED, FIELD_TITLE, FIELD_TYPE, FIELD_UNIQUE_ITEMS, FIELD_WRAPPED, FIELD_WRITE_ONLY,
    FIELD_XML,
};
use crate::error::Error;
use crate::yaml::Node;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// `type` as a single name or, tolerated, a list of names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl SchemaType {
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::Multiple(names) => names.iter().map(String::as_str).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names().contains(&name)
    }
}

#[derive(Debug, Clone)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Arc<SchemaProxy>),
}

pub type SchemaRef = Positioned<Arc<SchemaProxy>>;
pub type SchemaList = Positioned<Vec<SchemaRef>>;

#[derive(Debug)]
pub struct Schema {
    pub title: Option<Positioned<String>>,
    pub multiple_of: Option<Positioned<f64>>,
    pub maximum: Option<Positioned<f64>>,
    pub exclusive_maximum: Option<Positioned<bool>>,
    pub minimum: Option<Positioned<f64>>,
    pub exclusive_minimum: Option<Positioned<bool>>,
    pub max_length: Option<Positioned<u64>>,
    pub min_length: Option<Positioned<u64>>,
    pub pattern: Option<Positioned<String>>,
    pub format: Option<Positioned<String>>,
    pub max_items: Option<Positioned<u64>>,
    pub min_items: Option<Positioned<u64>>,
    pub unique_items: Option<Positioned<bool>>,
    pub max_properties: Option<Positioned<u64>>,
    pub min_properties: Option<Positioned<u64>>,
    pub required: Option<Positioned<Vec<Positioned<String>>>>,
    pub enumeration: Option<Positioned<Vec<Positioned<Value>>>>,
    pub schema_type: Option<Positioned<SchemaType>>,
    pub all_of: Option<SchemaList>,
    pub one_of: Option<SchemaList>,
    pub any_of: Option<SchemaList>,
    pub not: Option<SchemaRef>,
    pub items: Option<SchemaRef>,
    pub properties: Option<Positioned<PositionedMap<Arc<SchemaProxy>>>>,
    pub additional_properties: Option<Positioned<AdditionalProperties>>,
    pub description: Option<Positioned<String>>,
    pub default: Option<Positioned<Value>>,
    pub nullable: Option<Positioned<bool>>,
    pub discriminator: Option<Positioned<Discriminator>>,
    pub read_only: Option<Positioned<bool>>,
    pub write_only: Option<Positioned<bool>>,
    pub xml: Option<Positioned<Xml>>,
    pub external_docs: Option<Positioned<ExternalDoc>>,
    pub example: Option<Positioned<Value>>,
    pub deprecated: Option<Positioned<bool>>,
    pub extensions: Extensions,
    /// The mapping this schema was built from
    pub node: Node,
    /// Levels below the proxy that started the walk
    pub depth: usize,
    /// Built past the depth ceiling without nested schemas
    pub truncated: bool,
}

impl Schema {
    /// Builds the schema written at `node`, a resolved (non-`$ref`) mapping.
    /// Nested schemas become proxies at `depth + 1`.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch when `node` or a schema-valued field has the wrong
    /// kind, or the error of a nested object that fails to build.
    pub fn build(node: &Node, ctx: &BuildContext, depth: usize) -> Result<Self, Error> {
        Self::build_inner(node, ctx, depth, true)
    }

    /// Builds only the scalar parts of the schema at `node`
    pub(crate) fn build_truncated(node: &Node, ctx: &BuildContext, depth: usize) -> Result<Self, Error> {
        Self::build_inner(node, ctx, depth, false)
    }

    fn build_inner(node: &Node, ctx: &BuildContext, depth: usize, nested: bool) -> Result<Self, Error> {
        expect_mapping("schema", node)?;

        let mut schema = Self {
            title: scalar(node, FIELD_TITLE, ctx)?,
            multiple_of: scalar(node, FIELD_MULTIPLE_OF, ctx)?,
            maximum: scalar(node, FIELD_MAXIMUM, ctx)?,
            exclusive_maximum: scalar(node, FIELD_EXCLUSIVE_MAXIMUM, ctx)?,
            minimum: scalar(node, FIELD_MINIMUM, ctx)?,
            exclusive_minimum: scalar(node, FIELD_EXCLUSIVE_MINIMUM, ctx)?,
            max_length: scalar(node, FIELD_MAX_LENGTH, ctx)?,
            min_length: scalar(node, FIELD_MIN_LENGTH, ctx)?,
            pattern: scalar(node, FIELD_PATTERN, ctx)?,
            format: scalar(node, FIELD_FORMAT, ctx)?,
            max_items: scalar(node, FIELD_MAX_ITEMS, ctx)?,
            min_items: scalar(node, FIELD_MIN_ITEMS, ctx)?,
            unique_items: scalar(node, FIELD_UNIQUE_ITEMS, ctx)?,
            max_properties: scalar(node, FIELD_MAX_PROPERTIES, ctx)?,
            min_properties: scalar(node, FIELD_MIN_PROPERTIES, ctx)?,
            required: string_list(node, FIELD_REQUIRED, ctx)?,
            enumeration: enumeration(node),
            schema_type: schema_type(node, ctx)?,
            all_of: None,
            one_of: None,
            any_of: None,
            not: None,
            items: None,
            properties: None,
            additional_properties: None,
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            default: any_value(node, FIELD_DEFAULT),
            nullable: scalar(node, FIELD_NULLABLE, ctx)?,
            discriminator: extract_object(FIELD_DISCRIMINATOR, node, ctx)?,
            read_only: scalar(node, FIELD_READ_ONLY, ctx)?,
            write_only: scalar(node, FIELD_WRITE_ONLY, ctx)?,
            xml: extract_object(FIELD_XML, node, ctx)?,
            external_docs: extract_object(FIELD_EXTERNAL_DOCS, node, ctx)?,
            example: any_value(node, FIELD_EXAMPLE),
            deprecated: scalar(node, FIELD_DEPRECATED, ctx)?,
            extensions: extract_extensions(node),
            node: node.clone(),
            depth,
            truncated: !nested,
        };

        if nested {
            let child = depth + 1;
            schema.all_of = schema_list(FIELD_ALL_OF, node, ctx, child)?;
            schema.one_of = schema_list(FIELD_ONE_OF, node, ctx, child)?;
            schema.any_of = schema_list(FIELD_ANY_OF, node, ctx, child)?;
            schema.not = single_schema(FIELD_NOT, node, ctx, child)?;
            schema.items = items(node, ctx, child)?;
            schema.properties = properties(node, ctx, child)?;
            schema.additional_properties = additional_properties(node, ctx, child)?;
        }
        Ok(schema)
    }

    /// Whether `name` is listed in `required`
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.value.iter().any(|r| r.value == name))
    }

    /// Every nested schema proxy, in field order
    #[must_use]
    pub fn children(&self) -> Vec<&Arc<SchemaProxy>> {
        let lists = [&self.all_of, &self.one_of, &self.any_of];
        let mut children: Vec<_> = lists
            .into_iter()
            .flatten()
            .flat_map(|list| list.value.iter().map(|proxy| &proxy.value))
            .collect();
        children.extend(self.not.iter().chain(&self.items).map(|proxy| &proxy.value));
        if let Some(properties) = &self.properties {
            children.extend(properties.value.values().map(|proxy| &proxy.value));
        }
        if let Some(Positioned {
            value: AdditionalProperties::Schema(proxy),
            ..
        }) = &self.additional_properties
        {
            children.push(proxy);
        }
        children
    }
}

fn enumeration(node: &Node) -> Option<Positioned<Vec<Positioned<Value>>>> {
    let (key, value) = node.get_entry(FIELD_ENUM)?;
    let values = value
        .items()
        .iter()
        .filter_map(|item| decode_any(item).map(|v| Positioned::new(v, None, item.clone())))
        .collect();
    Some(Positioned::new(values, Some(key.clone()), value.clone()))
}

fn schema_type(node: &Node, ctx: &BuildContext) -> Result<Option<Positioned<SchemaType>>, Error> {
    if node.get(FIELD_TYPE).is_some_and(Node::is_sequence) {
        return Ok(string_list(node, FIELD_TYPE, ctx)?.map(|names| {
            names.map(|list| SchemaType::Multiple(list.into_iter().map(|n| n.value).collect()))
        }));
    }
    Ok(scalar::<String>(node, FIELD_TYPE, ctx)?.map(|name| name.map(SchemaType::Single)))
}

fn proxy_ref(key: Option<&Node>, value: &Node, ctx: &BuildContext, depth: usize) -> SchemaRef {
    Positioned::new(SchemaProxy::new(key, value, ctx, depth), key.cloned(), value.clone())
}

fn schema_list(label: &str, node: &Node, ctx: &BuildContext, depth: usize) -> Result<Option<SchemaList>, Error> {
    let Some((key, value)) = node.get_entry(label) else {
        return Ok(None);
    };
    if !value.is_sequence() {
        return Err(Error::type_mismatch(label, "a sequence of schemas", value));
    }
    let proxies = ctx.fan_out_in_cell(value.items(), |item| proxy_ref(None, item, ctx, depth));
    Ok(Some(Positioned::new(proxies, Some(key.clone()), value.clone())))
}

fn single_schema(label: &str, node: &Node, ctx: &BuildContext, depth: usize) -> Result<Option<SchemaRef>, Error> {
    let Some((key, value)) = node.get_entry(label) else {
        return Ok(None);
    };
    if !value.is_mapping() {
        return Err(Error::type_mismatch(label, "a schema", value));
    }
    Ok(Some(proxy_ref(Some(key), value, ctx, depth)))
}

/// `items` is a single schema. A sequence contributes its first element.
fn items(node: &Node, ctx: &BuildContext, depth: usize) -> Result<Option<SchemaRef>, Error> {
    let Some((key, value)) = node.get_entry(FIELD_ITEMS) else {
        return Ok(None);
    };
    if value.is_mapping() {
        return Ok(Some(proxy_ref(Some(key), value, ctx, depth)));
    }
    match value.items() {
        [first, rest @ ..] => {
            if !rest.is_empty() {
                warn!(
                    target: "strata::schema",
                    "'items' at {} lists {} schemas; using the first and dropping {}",
                    value.position(),
                    rest.len() + 1,
                    rest.len()
                );
            }
            Ok(Some(proxy_ref(Some(key), first, ctx, depth)))
        }
        [] => Err(Error::type_mismatch(FIELD_ITEMS, "a schema", value)),
    }
}

fn properties(
    node: &Node,
    ctx: &BuildContext,
    depth: usize,
) -> Result<Option<Positioned<PositionedMap<Arc<SchemaProxy>>>>, Error> {
    let Some((key, value)) = node.get_entry(FIELD_PROPERTIES) else {
        return Ok(None);
    };
    if !value.is_mapping() {
        return Err(Error::type_mismatch(FIELD_PROPERTIES, "a mapping of schemas", value));
    }
    let built = ctx.fan_out_in_cell(value.entries(), |(key, schema)| {
        key.as_str()
            .map(|name| (name.to_string(), proxy_ref(Some(key), schema, ctx, depth)))
    });
    Ok(Some(Positioned::new(
        built.into_iter().flatten().collect(),
        Some(key.clone()),
        value.clone(),
    )))
}

fn additional_properties(
    node: &Node,
    ctx: &BuildContext,
    depth: usize,
) -> Result<Option<Positioned<AdditionalProperties>>, Error> {
    let Some((key, value)) = node.get_entry(FIELD_ADDITIONAL_PROPERTIES) else {
        return Ok(None);
    };
    let additional = if let Some(flag) = value.scalar().and_then(|s| s.as_bool()) {
        AdditionalProperties::Bool(flag)
    } else if value.is_mapping() {
        AdditionalProperties::Schema(SchemaProxy::new(Some(key), value, ctx, depth))
    } else {
        return Err(Error::type_mismatch(
            FIELD_ADDITIONAL_PROPERTIES,
            "a boolean or a schema",
            value,
        ));
    };
    Ok(Some(Positioned::new(additional, Some(key.clone()), value.clone())))
}

#[derive(Debug, Clone)]
pub struct Discriminator {
    pub property_name: Option<Positioned<String>>,
    pub mapping: Option<Positioned<IndexMap<String, Positioned<String>>>>,
    pub extensions: Extensions,
}

impl Buildable for Discriminator {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_DISCRIMINATOR, node)?;
        Ok(Self {
            property_name: scalar(node, FIELD_PROPERTY_NAME, ctx)?,
            mapping: string_map(node, FIELD_MAPPING, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Xml {
    pub name: Option<Positioned<String>>,
    pub namespace: Option<Positioned<String>>,
    pub prefix: Option<Positioned<String>>,
    pub attribute: Option<Positioned<bool>>,
    pub wrapped: Option<Positioned<bool>>,
    pub extensions: Extensions,
}

impl Buildable for Xml {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_XML, node)?;
        Ok(Self {
            name: scalar(node, FIELD_NAME, ctx)?,
            namespace: scalar(node, FIELD_NAMESPACE, ctx)?,
            prefix: scalar(node, FIELD_PREFIX, ctx)?,
            attribute: scalar(node, FIELD_ATTRIBUTE, ctx)?,
            wrapped: scalar(node, FIELD_WRAPPED, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}
