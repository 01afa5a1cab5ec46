//! Paths, path items and operations
//!
//! Path entries and the eight operation slots of a path item are built
//! concurrently. A failing path or operation is left out and its error is
//! recorded; a verb that is not written is simply `None`.

use super::base::{expect_mapping, Buildable, Extensions, Positioned, PositionedMap};
use super::callback::Callback;
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::{collect_entries, extract_array, extract_map, extract_object};
use super::fields::{scalar, string_list};
use super::parameter::Parameter;
use super::request_body::RequestBody;
use super::response::Responses;
use super::security::SecurityRequirement;
use super::server::Server;
use super::tag::ExternalDoc;
use crate::constants::{
    FIELD_CALLBACKS, FIELD_DEPRECATED, FIELD_DESCRIPTION, FIELD_EXTERNAL_DOCS, FIELD_OPERATION_ID,
    FIELD_PARAMETERS, FIELD_PATHS, FIELD_REQUEST_BODY, FIELD_RESPONSES, FIELD_SECURITY,
    FIELD_SERVERS, FIELD_SUMMARY, FIELD_TAGS, HTTP_METHOD_DELETE, HTTP_METHOD_GET,
    HTTP_METHOD_HEAD, HTTP_METHOD_OPTIONS, HTTP_METHOD_PATCH, HTTP_METHOD_POST, HTTP_METHOD_PUT,
    HTTP_METHOD_TRACE,
};
use crate::error::Error;
use crate::yaml::Node;
use std::fmt;

/// The operations a path item can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// The path item key for this method
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => HTTP_METHOD_GET,
            Self::Put => HTTP_METHOD_PUT,
            Self::Post => HTTP_METHOD_POST,
            Self::Delete => HTTP_METHOD_DELETE,
            Self::Options => HTTP_METHOD_OPTIONS,
            Self::Head => HTTP_METHOD_HEAD,
            Self::Patch => HTTP_METHOD_PATCH,
            Self::Trace => HTTP_METHOD_TRACE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

#[derive(Debug, Clone)]
pub struct Paths {
    pub paths: PositionedMap<PathItem>,
    pub extensions: Extensions,
}

impl Buildable for Paths {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        Ok(Self {
            paths: collect_entries(FIELD_PATHS, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

type OperationSlot = Option<Positioned<Operation>>;

#[derive(Debug, Clone)]
pub struct PathItem {
    pub summary: Option<Positioned<String>>,
    pub description: Option<Positioned<String>>,
    pub get: OperationSlot,
    pub put: OperationSlot,
    pub post: OperationSlot,
    pub delete: OperationSlot,
    pub options: OperationSlot,
    pub head: OperationSlot,
    pub patch: OperationSlot,
    pub trace: OperationSlot,
    pub servers: Option<Positioned<Vec<Positioned<Server>>>>,
    pub parameters: Option<Positioned<Vec<Positioned<Parameter>>>>,
    pub extensions: Extensions,
}

impl PathItem {
    #[must_use]
    pub const fn operation(&self, method: HttpMethod) -> Option<&Positioned<Operation>> {
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

    /// Present operations in declaration order of [`HttpMethod::ALL`]
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Positioned<Operation>)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }
}

impl Buildable for PathItem {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("path item", node)?;

        let mut slots = build_slots::<Operation>(node, ctx).into_iter();
        let mut next = || slots.next().flatten();

        Ok(Self {
            get: next(),
            put: next(),
            post: next(),
            delete: next(),
            options: next(),
            head: next(),
            patch: next(),
            trace: next(),
            summary: scalar(node, FIELD_SUMMARY, ctx)?,
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            servers: extract_array(FIELD_SERVERS, node, ctx)?,
            parameters: extract_array(FIELD_PARAMETERS, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

/// One slot per [`HttpMethod::ALL`] entry, in that order whatever order they finish in
fn build_slots<T: Buildable>(node: &Node, ctx: &BuildContext) -> Vec<Option<Positioned<T>>> {
    ctx.fan_out(&HttpMethod::ALL, |method| {
        if ctx.is_cancelled() {
            return None;
        }
        ctx.settle(method.as_str(), extract_object::<T>(method.as_str(), node, ctx))
            .flatten()
    })
}

#[derive(Debug, Clone)]
pub struct Operation {
    pub tags: Option<Positioned<Vec<Positioned<String>>>>,
    pub summary: Option<Positioned<String>>,
    pub description: Option<Positioned<String>>,
    pub external_docs: Option<Positioned<ExternalDoc>>,
    pub operation_id: Option<Positioned<String>>,
    pub parameters: Option<Positioned<Vec<Positioned<Parameter>>>>,
    pub request_body: Option<Positioned<RequestBody>>,
    pub responses: Option<Positioned<Responses>>,
    pub callbacks: Option<Positioned<PositionedMap<Callback>>>,
    pub deprecated: Option<Positioned<bool>>,
    pub security: Option<Positioned<Vec<Positioned<SecurityRequirement>>>>,
    pub servers: Option<Positioned<Vec<Positioned<Server>>>>,
    pub extensions: Extensions,
}

impl Buildable for Operation {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("operation", node)?;
        Ok(Self {
            tags: string_list(node, FIELD_TAGS, ctx)?,
            summary: scalar(node, FIELD_SUMMARY, ctx)?,
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            external_docs: extract_object(FIELD_EXTERNAL_DOCS, node, ctx)?,
            operation_id: scalar(node, FIELD_OPERATION_ID, ctx)?,
            parameters: extract_array(FIELD_PARAMETERS, node, ctx)?,
            request_body: extract_object(FIELD_REQUEST_BODY, node, ctx)?,
            responses: extract_object(FIELD_RESPONSES, node, ctx)?,
            callbacks: extract_map(FIELD_CALLBACKS, node, ctx)?,
            deprecated: scalar(node, FIELD_DEPRECATED, ctx)?,
            security: extract_array(FIELD_SECURITY, node, ctx)?,
            servers: extract_array(FIELD_SERVERS, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}
