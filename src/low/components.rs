use super::base::{expect_mapping, Buildable, Extensions, Positioned, PositionedMap};
use super::callback::Callback;
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::extract_map_collected;
use super::link::Link;
use super::media::Example;
use super::parameter::{Header, Parameter};
use super::proxy::SchemaProxy;
use super::request_body::RequestBody;
use super::response::Response;
use super::security::SecurityScheme;
use crate::constants::{
    COMPONENT_CALLBACKS, COMPONENT_EXAMPLES, COMPONENT_HEADERS, COMPONENT_LINKS,
    COMPONENT_PARAMETERS, COMPONENT_REQUEST_BODIES, COMPONENT_RESPONSES, COMPONENT_SCHEMAS,
    COMPONENT_SECURITY_SCHEMES, FIELD_COMPONENTS,
};
use crate::error::Error;
use crate::yaml::Node;
use std::sync::Arc;
use tracing::debug;

type Category<T> = Option<Positioned<PositionedMap<T>>>;

/// Named, reusable definitions. Keys starting with `x-` are extensions, never entries.
#[derive(Debug, Clone)]
pub struct Components {
    pub schemas: Category<Arc<SchemaProxy>>,
    pub responses: Category<Response>,
    pub parameters: Category<Parameter>,
    pub examples: Category<Example>,
    pub request_bodies: Category<RequestBody>,
    pub headers: Category<Header>,
    pub security_schemes: Category<SecurityScheme>,
    pub links: Category<Link>,
    pub callbacks: Category<Callback>,
    pub extensions: Extensions,
}

/// Builds one category, recording a category-level failure
fn category<T: Buildable>(label: &str, node: &Node, ctx: &BuildContext) -> Category<T> {
    if ctx.is_cancelled() {
        return None;
    }
    let built = ctx
        .settle(label, extract_map_collected(label, node, ctx))
        .flatten();
    if let Some(entries) = &built {
        debug!(target: "strata::components", "{label}: {} entries", entries.value.len());
    }
    built
}

impl Buildable for Components {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_COMPONENTS, node)?;

        let mut schemas = None;
        let mut responses = None;
        let mut parameters = None;
        let mut examples = None;
        let mut request_bodies = None;
        let mut headers = None;
        let mut security_schemes = None;
        let mut links = None;
        let mut callbacks = None;

        ctx.install(|| {
            rayon::scope(|s| {
                s.spawn(|_| schemas = category(COMPONENT_SCHEMAS, node, ctx));
                s.spawn(|_| responses = category(COMPONENT_RESPONSES, node, ctx));
                s.spawn(|_| parameters = category(COMPONENT_PARAMETERS, node, ctx));
                s.spawn(|_| examples = category(COMPONENT_EXAMPLES, node, ctx));
                s.spawn(|_| request_bodies = category(COMPONENT_REQUEST_BODIES, node, ctx));
                s.spawn(|_| headers = category(COMPONENT_HEADERS, node, ctx));
                s.spawn(|_| security_schemes = category(COMPONENT_SECURITY_SCHEMES, node, ctx));
                s.spawn(|_| links = category(COMPONENT_LINKS, node, ctx));
                s.spawn(|_| callbacks = category(COMPONENT_CALLBACKS, node, ctx));
            });
        });

        Ok(Self {
            schemas,
            responses,
            parameters,
            examples,
            request_bodies,
            headers,
            security_schemes,
            links,
            callbacks,
            extensions: extract_extensions(node),
        })
    }
}
