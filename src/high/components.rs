use super::media::{Example, Header, Parameter, RequestBody};
use super::path::Callback;
use super::response::{Link, Response};
use super::schema::SchemaProxy;
use super::security::SecurityScheme;
use super::{extensions, map, Low};
use crate::low;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Components<'a> {
    pub schemas: IndexMap<String, SchemaProxy>,
    pub responses: IndexMap<String, Response>,
    pub parameters: IndexMap<String, Parameter>,
    pub examples: IndexMap<String, Example>,
    pub request_bodies: IndexMap<String, RequestBody>,
    pub headers: IndexMap<String, Header>,
    pub security_schemes: IndexMap<String, SecurityScheme>,
    pub links: IndexMap<String, Link>,
    pub callbacks: IndexMap<String, Callback<'a>>,
    pub extensions: IndexMap<String, Value>,
    low: Low<&'a low::Components>,
}

impl<'a> Components<'a> {
    /// The named schema, unresolved
    #[must_use]
    pub fn schema(&self, name: &str) -> Option<&SchemaProxy> {
        self.schemas.get(name)
    }

    #[must_use]
    pub const fn go_low(&self) -> &'a low::Components {
        self.low.0
    }
}

impl<'a> From<&'a low::Components> for Components<'a> {
    fn from(low: &'a low::Components) -> Self {
        Self {
            schemas: map(&low.schemas, |proxy| SchemaProxy::new(Arc::clone(proxy))),
            responses: map(&low.responses, Response::from),
            parameters: map(&low.parameters, Parameter::from),
            examples: map(&low.examples, Example::from),
            request_bodies: map(&low.request_bodies, RequestBody::from),
            headers: map(&low.headers, Header::from),
            security_schemes: map(&low.security_schemes, SecurityScheme::from),
            links: map(&low.links, Link::from),
            callbacks: map(&low.callbacks, Callback::from),
            extensions: extensions(&low.extensions),
            low: Low::new(low),
        }
    }
}
