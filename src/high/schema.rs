use super::info::ExternalDoc;
use super::{entries, extensions, list, map, object, strings, value, Low};
use crate::error::Error;
use crate::low;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Lazy handle to a schema. Each call to [`SchemaProxy::schema`] projects the
/// cached low-level schema afresh.
#[derive(Clone)]
pub struct SchemaProxy {
    low: Arc<low::SchemaProxy>,
}

impl SchemaProxy {
    #[must_use]
    pub const fn new(low: Arc<low::SchemaProxy>) -> Self {
        Self { low }
    }

    /// The schema, or `None` when it cannot be built
    #[must_use]
    pub fn schema(&self) -> Option<Schema> {
        self.low.schema().map(Schema::new)
    }

    #[must_use]
    pub fn build_error(&self) -> Option<Arc<Error>> {
        self.low.build_error()
    }

    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.low.is_reference()
    }

    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.low.reference()
    }

    #[must_use]
    pub const fn go_low(&self) -> &Arc<low::SchemaProxy> {
        &self.low
    }
}

/// Proxies are equal when they stand for the same written schema
impl PartialEq for SchemaProxy {
    fn eq(&self, other: &Self) -> bool {
        self.low.value_node().same(other.low.value_node())
    }
}

impl fmt::Debug for SchemaProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.low, f)
    }
}

fn proxy(field: &Option<low::SchemaRef>) -> Option<SchemaProxy> {
    field
        .as_ref()
        .map(|positioned| SchemaProxy::new(Arc::clone(&positioned.value)))
}

fn proxies(field: &Option<low::SchemaList>) -> Vec<SchemaProxy> {
    list(field, |proxy| SchemaProxy::new(Arc::clone(proxy)))
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(SchemaProxy),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub title: Option<String>,
    pub multiple_of: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_maximum: Option<bool>,
    pub minimum: Option<f64>,
    pub exclusive_minimum: Option<bool>,
    pub max_length: Option<u64>,
    pub min_length: Option<u64>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    pub max_items: Option<u64>,
    pub min_items: Option<u64>,
    pub unique_items: Option<bool>,
    pub max_properties: Option<u64>,
    pub min_properties: Option<u64>,
    pub required: Vec<String>,
    pub enumeration: Vec<Value>,
    /// Type names; one entry in a well-formed 3.0 document
    pub schema_type: Vec<String>,
    pub all_of: Vec<SchemaProxy>,
    pub one_of: Vec<SchemaProxy>,
    pub any_of: Vec<SchemaProxy>,
    pub not: Option<SchemaProxy>,
    pub items: Option<SchemaProxy>,
    pub properties: IndexMap<String, SchemaProxy>,
    pub additional_properties: Option<AdditionalProperties>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub nullable: Option<bool>,
    pub discriminator: Option<Discriminator>,
    pub read_only: Option<bool>,
    pub write_only: Option<bool>,
    pub xml: Option<Xml>,
    pub external_docs: Option<ExternalDoc>,
    pub example: Option<Value>,
    pub deprecated: Option<bool>,
    pub extensions: IndexMap<String, Value>,
    pub truncated: bool,
    low: Low<Arc<low::Schema>>,
}

impl Schema {
    #[must_use]
    pub fn new(low: Arc<low::Schema>) -> Self {
        let schema = &*low;
        Self {
            title: value(&schema.title),
            multiple_of: value(&schema.multiple_of),
            maximum: value(&schema.maximum),
            exclusive_maximum: value(&schema.exclusive_maximum),
            minimum: value(&schema.minimum),
            exclusive_minimum: value(&schema.exclusive_minimum),
            max_length: value(&schema.max_length),
            min_length: value(&schema.min_length),
            pattern: value(&schema.pattern),
            format: value(&schema.format),
            max_items: value(&schema.max_items),
            min_items: value(&schema.min_items),
            unique_items: value(&schema.unique_items),
            max_properties: value(&schema.max_properties),
            min_properties: value(&schema.min_properties),
            required: strings(&schema.required),
            enumeration: list(&schema.enumeration, Value::clone),
            schema_type: schema
                .schema_type
                .as_ref()
                .map(|t| t.value.names().into_iter().map(str::to_string).collect())
                .unwrap_or_default(),
            all_of: proxies(&schema.all_of),
            one_of: proxies(&schema.one_of),
            any_of: proxies(&schema.any_of),
            not: proxy(&schema.not),
            items: proxy(&schema.items),
            properties: schema
                .properties
                .as_ref()
                .map(|properties| {
                    entries(&properties.value, |proxy| SchemaProxy::new(Arc::clone(proxy)))
                })
                .unwrap_or_default(),
            additional_properties: object(&schema.additional_properties, |additional| {
                match additional {
                    low::AdditionalProperties::Bool(flag) => AdditionalProperties::Bool(*flag),
                    low::AdditionalProperties::Schema(proxy) => {
                        AdditionalProperties::Schema(SchemaProxy::new(Arc::clone(proxy)))
                    }
                }
            }),
            description: value(&schema.description),
            default: value(&schema.default),
            nullable: value(&schema.nullable),
            discriminator: object(&schema.discriminator, Discriminator::from),
            read_only: value(&schema.read_only),
            write_only: value(&schema.write_only),
            xml: object(&schema.xml, Xml::from),
            external_docs: object(&schema.external_docs, ExternalDoc::from),
            example: value(&schema.example),
            deprecated: value(&schema.deprecated),
            extensions: extensions(&schema.extensions),
            truncated: schema.truncated,
            low: Low::new(Arc::clone(&low)),
        }
    }

    #[must_use]
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }

    /// The cached low-level schema this was projected from
    #[must_use]
    pub const fn go_low(&self) -> &Arc<low::Schema> {
        self.low.get()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discriminator {
    pub property_name: Option<String>,
    pub mapping: IndexMap<String, String>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Discriminator> for Discriminator {
    fn from(low: &low::Discriminator) -> Self {
        Self {
            property_name: value(&low.property_name),
            mapping: map(&low.mapping, String::clone),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Xml {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub attribute: Option<bool>,
    pub wrapped: Option<bool>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Xml> for Xml {
    fn from(low: &low::Xml) -> Self {
        Self {
            name: value(&low.name),
            namespace: value(&low.namespace),
            prefix: value(&low.prefix),
            attribute: value(&low.attribute),
            wrapped: value(&low.wrapped),
            extensions: extensions(&low.extensions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildConfig, DepthPolicy};
    use crate::low::DocumentBuilder;
    use crate::yaml::parse_document;

    const RICE_NICE: &str = r"openapi: 3.0.1
components:
  schemas:
    rice:
      type: string
    nice:
      properties:
        rice:
          $ref: '#/components/schemas/rice'
";

    fn schema_named(outcome: &low::BuildOutcome, name: &str) -> SchemaProxy {
        let components = outcome.document.components.as_ref().unwrap();
        let schemas = components.value.schemas.as_ref().unwrap();
        SchemaProxy::new(Arc::clone(&schemas.value[name].value))
    }

    #[test]
    fn test_projections_of_one_node_are_equal() {
        let root = parse_document(RICE_NICE, "").unwrap();
        let builder = DocumentBuilder::new(BuildConfig::default());

        let first = builder.build_from_node(root.clone()).unwrap();
        // Warm the first session's cache before projecting
        let warm = schema_named(&first, "nice").schema().unwrap();
        assert!(warm.properties["rice"].schema().is_some());

        let second = builder.build_from_node(root).unwrap();
        let cold = schema_named(&second, "nice").schema().unwrap();

        assert_eq!(warm, cold);
        assert_eq!(
            warm.properties["rice"].schema(),
            cold.properties["rice"].schema()
        );
        assert!(!Arc::ptr_eq(warm.go_low(), cold.go_low()));
    }

    #[test]
    fn test_each_call_projects_afresh_from_one_cached_schema() {
        let outcome = DocumentBuilder::new(BuildConfig::default())
            .build_from_str(RICE_NICE)
            .unwrap();
        let nice = schema_named(&outcome, "nice");
        let a = nice.schema().unwrap();
        let b = nice.schema().unwrap();
        assert_eq!(a, b);
        assert!(Arc::ptr_eq(a.go_low(), b.go_low()));

        let rice = a.properties["rice"].schema().unwrap();
        assert_eq!(rice.schema_type, ["string"]);
        assert!(a.properties["rice"].is_reference());
        assert_eq!(
            a.properties["rice"].reference(),
            Some("#/components/schemas/rice")
        );
    }

    #[test]
    fn test_truncated_schema_is_visible() {
        let mut content = String::from("openapi: 3.0.0\ncomponents:\n  schemas:\n    deep:\n");
        let mut indent = String::from("      ");
        for _ in 0..5 {
            content.push_str(&format!("{indent}properties:\n{indent}  next:\n"));
            indent.push_str("    ");
        }
        content.push_str(&format!("{indent}type: string\n"));

        let config = BuildConfig::default().with_max_depth(2, DepthPolicy::Truncate);
        let outcome = DocumentBuilder::new(config).build_from_str(&content).unwrap();
        let mut schema = schema_named(&outcome, "deep").schema().unwrap();
        let mut levels = 0;
        while let Some(next) = schema.properties.get("next") {
            schema = next.schema().unwrap();
            levels += 1;
        }
        assert_eq!(levels, 3);
        assert!(schema.truncated);
    }

    #[test]
    fn test_additional_properties_and_discriminator() {
        let outcome = DocumentBuilder::new(BuildConfig::default())
            .build_from_str(
                "openapi: 3.0.0\ncomponents:\n  schemas:\n    Bag:\n      additionalProperties:\n        type: integer\n      discriminator:\n        propertyName: kind\n        mapping:\n          a: '#/components/schemas/A'\n      x-internal: true\n",
            )
            .unwrap();
        let bag = schema_named(&outcome, "Bag").schema().unwrap();
        let Some(AdditionalProperties::Schema(extra)) = &bag.additional_properties else {
            panic!("expected a schema, got {:?}", bag.additional_properties);
        };
        assert_eq!(extra.schema().unwrap().schema_type, ["integer"]);
        let discriminator = bag.discriminator.as_ref().unwrap();
        assert_eq!(discriminator.property_name.as_deref(), Some("kind"));
        assert_eq!(discriminator.mapping["a"], "#/components/schemas/A");
        assert_eq!(bag.extensions["x-internal"], Value::Bool(true));
    }
}
