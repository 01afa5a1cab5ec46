use super::base::{expect_mapping, Buildable, Extensions, Positioned};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::extract_object;
use super::fields::{any_value, decode_any, scalar};
use super::server::Server;
use crate::constants::{
    FIELD_DESCRIPTION, FIELD_OPERATION_ID, FIELD_OPERATION_REF, FIELD_PARAMETERS,
    FIELD_REQUEST_BODY, FIELD_SERVER,
};
use crate::error::Error;
use crate::yaml::Node;
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Link {
    pub operation_ref: Option<Positioned<String>>,
    pub operation_id: Option<Positioned<String>>,
    /// Parameter names to values or runtime expressions
    pub parameters: Option<Positioned<IndexMap<String, Positioned<Value>>>>,
    pub request_body: Option<Positioned<Value>>,
    pub description: Option<Positioned<String>>,
    pub server: Option<Positioned<Server>>,
    pub extensions: Extensions,
}

impl Buildable for Link {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("link", node)?;
        Ok(Self {
            operation_ref: scalar(node, FIELD_OPERATION_REF, ctx)?,
            operation_id: scalar(node, FIELD_OPERATION_ID, ctx)?,
            parameters: link_parameters(node),
            request_body: any_value(node, FIELD_REQUEST_BODY),
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            server: extract_object(FIELD_SERVER, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

fn link_parameters(node: &Node) -> Option<Positioned<IndexMap<String, Positioned<Value>>>> {
    let (key, value) = node.get_entry(FIELD_PARAMETERS)?;
    let parameters = value
        .entries()
        .iter()
        .filter_map(|(name, expression)| {
            let decoded = decode_any(expression)?;
            Some((
                name.as_str()?.to_string(),
                Positioned::new(decoded, Some(name.clone()), expression.clone()),
            ))
        })
        .collect();
    Some(Positioned::new(parameters, Some(key.clone()), value.clone()))
}
