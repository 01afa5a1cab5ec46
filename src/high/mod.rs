//! High-level `OpenAPI` 3.0 model
//!
//! A plain-data projection of the low-level model: positions are stripped,
//! absent lists and maps are empty, and extensions are bare JSON values.
//! Structural objects keep a [`Low`] back-reference to the object they were
//! projected from, reachable through `go_low()`.

mod components;
mod document;
mod info;
mod media;
mod path;
mod response;
mod schema;
mod security;

pub use components::Components;
pub use document::Document;
pub use info::{Contact, ExternalDoc, Info, License, Server, ServerVariable, Tag};
pub use media::{Encoding, Example, Header, MediaType, Parameter, ParameterFields, RequestBody};
pub use path::{Callback, Operation, PathItem, Paths};
pub use response::{Link, Response, Responses};
pub use schema::{AdditionalProperties, Discriminator, Schema, SchemaProxy, Xml};
pub use security::{OAuthFlow, OAuthFlows, SecurityRequirement, SecurityScheme};

use crate::low::{Extensions, Positioned, PositionedMap};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Back-reference from a high-level object to its low-level source.
///
/// Two back-references always compare equal, so projections of the same
/// source are `==` whichever session built them.
#[derive(Clone, Copy)]
pub struct Low<P>(P);

impl<P> Low<P> {
    #[must_use]
    pub const fn new(source: P) -> Self {
        Self(source)
    }

    #[must_use]
    pub const fn get(&self) -> &P {
        &self.0
    }
}

impl<P> PartialEq for Low<P> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<P> fmt::Debug for Low<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Low(..)")
    }
}

fn value<T: Clone>(field: &Option<Positioned<T>>) -> Option<T> {
    field.as_ref().map(|positioned| positioned.value.clone())
}

fn object<'a, T, H>(field: &'a Option<Positioned<T>>, project: impl FnOnce(&'a T) -> H) -> Option<H> {
    field.as_ref().map(|positioned| project(&positioned.value))
}

fn list<'a, T, H>(
    field: &'a Option<Positioned<Vec<Positioned<T>>>>,
    project: impl Fn(&'a T) -> H,
) -> Vec<H> {
    field
        .iter()
        .flat_map(|list| &list.value)
        .map(|item| project(&item.value))
        .collect()
}

fn entries<'a, T, H>(map: &'a PositionedMap<T>, project: impl Fn(&'a T) -> H) -> IndexMap<String, H> {
    map.iter()
        .map(|(name, entry)| (name.clone(), project(&entry.value)))
        .collect()
}

fn map<'a, T, H>(
    field: &'a Option<Positioned<PositionedMap<T>>>,
    project: impl Fn(&'a T) -> H,
) -> IndexMap<String, H> {
    field
        .as_ref()
        .map(|map| entries(&map.value, project))
        .unwrap_or_default()
}

fn strings(field: &Option<Positioned<Vec<Positioned<String>>>>) -> Vec<String> {
    list(field, String::clone)
}

fn extensions(extensions: &Extensions) -> IndexMap<String, Value> {
    extensions
        .iter()
        .map(|(key, value)| (key.clone(), value.value.clone()))
        .collect()
}
