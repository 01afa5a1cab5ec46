use super::{extensions, list, map, object, strings, value};
use crate::low;
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<License>,
    pub version: Option<String>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Info> for Info {
    fn from(low: &low::Info) -> Self {
        Self {
            title: value(&low.title),
            description: value(&low.description),
            terms_of_service: value(&low.terms_of_service),
            contact: object(&low.contact, Contact::from),
            license: object(&low.license, License::from),
            version: value(&low.version),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Contact> for Contact {
    fn from(low: &low::Contact) -> Self {
        Self {
            name: value(&low.name),
            url: value(&low.url),
            email: value(&low.email),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::License> for License {
    fn from(low: &low::License) -> Self {
        Self {
            name: value(&low.name),
            url: value(&low.url),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub url: Option<String>,
    pub description: Option<String>,
    pub variables: IndexMap<String, ServerVariable>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Server> for Server {
    fn from(low: &low::Server) -> Self {
        Self {
            url: value(&low.url),
            description: value(&low.description),
            variables: map(&low.variables, ServerVariable::from),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerVariable {
    pub enumeration: Vec<String>,
    pub default: Option<String>,
    pub description: Option<String>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::ServerVariable> for ServerVariable {
    fn from(low: &low::ServerVariable) -> Self {
        Self {
            enumeration: strings(&low.enumeration),
            default: value(&low.default),
            description: value(&low.description),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalDoc {
    pub description: Option<String>,
    pub url: Option<String>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::ExternalDoc> for ExternalDoc {
    fn from(low: &low::ExternalDoc) -> Self {
        Self {
            description: value(&low.description),
            url: value(&low.url),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDoc>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::Tag> for Tag {
    fn from(low: &low::Tag) -> Self {
        Self {
            name: value(&low.name),
            description: value(&low.description),
            external_docs: object(&low.external_docs, ExternalDoc::from),
            extensions: extensions(&low.extensions),
        }
    }
}

/// Projects a list of servers, used at document, path and operation level
pub(super) fn servers(field: &Option<low::Positioned<Vec<low::Positioned<low::Server>>>>) -> Vec<Server> {
    list(field, Server::from)
}
