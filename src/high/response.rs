use super::info::Server;
use super::media::{Header, MediaType};
use super::{entries, extensions, map, object, value};
use crate::low;
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub description: Option<String>,
    pub headers: IndexMap<String, Header>,
    pub content: IndexMap<String, MediaType>,
    pub links: IndexMap<String, Link>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Response> for Response {
    fn from(low: &low::Response) -> Self {
        Self {
            description: value(&low.description),
            headers: map(&low.headers, Header::from),
            content: map(&low.content, MediaType::from),
            links: map(&low.links, Link::from),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Responses {
    pub default: Option<Response>,
    /// Status codes in document order
    pub codes: IndexMap<String, Response>,
    pub extensions: IndexMap<String, Value>,
}

impl Responses {
    /// The response for `code`, falling back to `default`
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Response> {
        self.codes.get(code).or(self.default.as_ref())
    }
}

impl From<&low::Responses> for Responses {
    fn from(low: &low::Responses) -> Self {
        Self {
            default: object(&low.default, Response::from),
            codes: entries(&low.codes, Response::from),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub operation_ref: Option<String>,
    pub operation_id: Option<String>,
    pub parameters: IndexMap<String, Value>,
    pub request_body: Option<Value>,
    pub description: Option<String>,
    pub server: Option<Server>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Link> for Link {
    fn from(low: &low::Link) -> Self {
        Self {
            operation_ref: value(&low.operation_ref),
            operation_id: value(&low.operation_id),
            parameters: map(&low.parameters, Value::clone),
            request_body: value(&low.request_body),
            description: value(&low.description),
            server: object(&low.server, Server::from),
            extensions: extensions(&low.extensions),
        }
    }
}
