use super::info::{servers, ExternalDoc, Server};
use super::media::{Parameter, RequestBody};
use super::response::Responses;
use super::security::SecurityRequirement;
use super::{entries, extensions, list, map, object, strings, value, Low};
use crate::low::{self, HttpMethod};
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Paths<'a> {
    pub items: IndexMap<String, PathItem<'a>>,
    pub extensions: IndexMap<String, Value>,
}

impl<'a> From<&'a low::Paths> for Paths<'a> {
    fn from(low: &'a low::Paths) -> Self {
        Self {
            items: entries(&low.paths, PathItem::from),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathItem<'a> {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub get: Option<Operation<'a>>,
    pub put: Option<Operation<'a>>,
    pub post: Option<Operation<'a>>,
    pub delete: Option<Operation<'a>>,
    pub options: Option<Operation<'a>>,
    pub head: Option<Operation<'a>>,
    pub patch: Option<Operation<'a>>,
    pub trace: Option<Operation<'a>>,
    pub servers: Vec<Server>,
    pub parameters: Vec<Parameter>,
    pub extensions: IndexMap<String, Value>,
    low: Low<&'a low::PathItem>,
}

impl<'a> PathItem<'a> {
    #[must_use]
    pub const fn operation(&self, method: HttpMethod) -> Option<&Operation<'a>> {
        let slot = match method {
            HttpMethod::Get => &self.get,
            HttpMethod::Put => &self.put,
            HttpMethod::Post => &self.post,
            HttpMethod::Delete => &self.delete,
            HttpMethod::Options => &self.options,
            HttpMethod::Head => &self.head,
            HttpMethod::Patch => &self.patch,
            HttpMethod::Trace => &self.trace,
        };
        slot.as_ref()
    }

    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation<'a>)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }

    #[must_use]
    pub const fn go_low(&self) -> &'a low::PathItem {
        self.low.0
    }
}

impl<'a> From<&'a low::PathItem> for PathItem<'a> {
    fn from(low: &'a low::PathItem) -> Self {
        Self {
            summary: value(&low.summary),
            description: value(&low.description),
            get: object(&low.get, Operation::from),
            put: object(&low.put, Operation::from),
            post: object(&low.post, Operation::from),
            delete: object(&low.delete, Operation::from),
            options: object(&low.options, Operation::from),
            head: object(&low.head, Operation::from),
            patch: object(&low.patch, Operation::from),
            trace: object(&low.trace, Operation::from),
            servers: servers(&low.servers),
            parameters: list(&low.parameters, Parameter::from),
            extensions: extensions(&low.extensions),
            low: Low::new(low),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation<'a> {
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDoc>,
    pub operation_id: Option<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub responses: Option<Responses>,
    pub callbacks: IndexMap<String, Callback<'a>>,
    pub deprecated: Option<bool>,
    pub security: Vec<SecurityRequirement>,
    pub servers: Vec<Server>,
    pub extensions: IndexMap<String, Value>,
    low: Low<&'a low::Operation>,
}

impl<'a> Operation<'a> {
    #[must_use]
    pub const fn go_low(&self) -> &'a low::Operation {
        self.low.0
    }
}

impl<'a> From<&'a low::Operation> for Operation<'a> {
    fn from(low: &'a low::Operation) -> Self {
        Self {
            tags: strings(&low.tags),
            summary: value(&low.summary),
            description: value(&low.description),
            external_docs: object(&low.external_docs, ExternalDoc::from),
            operation_id: value(&low.operation_id),
            parameters: list(&low.parameters, Parameter::from),
            request_body: object(&low.request_body, RequestBody::from),
            responses: object(&low.responses, Responses::from),
            callbacks: map(&low.callbacks, Callback::from),
            deprecated: value(&low.deprecated),
            security: list(&low.security, SecurityRequirement::from),
            servers: servers(&low.servers),
            extensions: extensions(&low.extensions),
            low: Low::new(low),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Callback<'a> {
    pub expressions: IndexMap<String, PathItem<'a>>,
    pub extensions: IndexMap<String, Value>,
}

impl<'a> From<&'a low::Callback> for Callback<'a> {
    fn from(low: &'a low::Callback) -> Self {
        Self {
            expressions: entries(&low.expressions, PathItem::from),
            extensions: extensions(&low.extensions),
        }
    }
}
