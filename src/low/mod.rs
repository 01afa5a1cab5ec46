//! Low-level `OpenAPI` 3.0 model
//!
//! Every field keeps the source nodes it was read from, and the `$ref` it was
//! reached through. Schemas are built lazily behind [`SchemaProxy`] handles and
//! deduplicated per build session by [`SchemaCache`].

mod base;
mod cache;
mod callback;
mod components;
mod context;
mod document;
mod extensions;
mod extract;
mod fields;
mod info;
mod link;
pub mod locator;
mod media;
mod parameter;
mod path;
mod proxy;
mod request_body;
mod response;
mod schema;
mod security;
mod server;
mod tag;

pub use base::{Buildable, Extensions, Positioned, PositionedMap, Reference};
pub use cache::{SchemaCache, SchemaResult};
pub use callback::Callback;
pub use components::Components;
pub use context::{BuildContext, BuildSession, CancellationToken};
pub use document::{BuildOutcome, BuildPhase, Document, DocumentBuilder};
pub use extensions::{extract_extensions, is_extension};
pub use extract::{
    build_positioned, collect_entries, extract_array, extract_map, extract_map_collected,
    extract_object,
};
pub use fields::{any_value, decode_any, scalar, string_list, string_map, FromScalar};
pub use info::{Contact, Info, License};
pub use link::Link;
pub use media::{Encoding, Example, MediaType};
pub use parameter::{Header, Parameter, ParameterFields};
pub use path::{HttpMethod, Operation, PathItem, Paths};
pub use proxy::SchemaProxy;
pub use request_body::RequestBody;
pub use response::{Response, Responses};
pub use schema::{AdditionalProperties, Discriminator, Schema, SchemaList, SchemaRef, SchemaType, Xml};
pub use security::{OAuthFlow, OAuthFlows, SecurityRequirement, SecurityScheme};
pub use server::{Server, ServerVariable};
pub use tag::{ExternalDoc, Tag};
