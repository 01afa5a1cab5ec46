use super::base::{expect_mapping, Buildable, Extensions, Positioned};
use super::context::BuildContext;
use super::extensions::{extract_extensions, is_extension};
use super::extract::extract_object;
use super::fields::{scalar, string_list, string_map};
use crate::constants::{
    FIELD_AUTHORIZATION_URL, FIELD_BEARER_FORMAT, FIELD_DESCRIPTION, FIELD_FLOWS, FIELD_IN,
    FIELD_NAME, FIELD_OPEN_ID_CONNECT_URL, FIELD_REFRESH_URL, FIELD_SCHEME, FIELD_SCOPES,
    FIELD_SECURITY, FIELD_TOKEN_URL, FIELD_TYPE, FLOW_AUTHORIZATION_CODE,
    FLOW_CLIENT_CREDENTIALS, FLOW_IMPLICIT, FLOW_PASSWORD,
};
use crate::error::Error;
use crate::yaml::Node;
use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct SecurityScheme {
    pub scheme_type: Option<Positioned<String>>,
    pub description: Option<Positioned<String>>,
    pub name: Option<Positioned<String>>,
    /// The `in` field
    pub location: Option<Positioned<String>>,
    pub scheme: Option<Positioned<String>>,
    pub bearer_format: Option<Positioned<String>>,
    pub flows: Option<Positioned<OAuthFlows>>,
    pub open_id_connect_url: Option<Positioned<String>>,
    pub extensions: Extensions,
}

impl Buildable for SecurityScheme {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("security scheme", node)?;
        Ok(Self {
            scheme_type: scalar(node, FIELD_TYPE, ctx)?,
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            name: scalar(node, FIELD_NAME, ctx)?,
            location: scalar(node, FIELD_IN, ctx)?,
            scheme: scalar(node, FIELD_SCHEME, ctx)?,
            bearer_format: scalar(node, FIELD_BEARER_FORMAT, ctx)?,
            flows: extract_object(FIELD_FLOWS, node, ctx)?,
            open_id_connect_url: scalar(node, FIELD_OPEN_ID_CONNECT_URL, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct OAuthFlows {
    pub implicit: Option<Positioned<OAuthFlow>>,
    pub password: Option<Positioned<OAuthFlow>>,
    pub client_credentials: Option<Positioned<OAuthFlow>>,
    pub authorization_code: Option<Positioned<OAuthFlow>>,
    pub extensions: Extensions,
}

impl Buildable for OAuthFlows {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_FLOWS, node)?;
        Ok(Self {
            implicit: extract_object(FLOW_IMPLICIT, node, ctx)?,
            password: extract_object(FLOW_PASSWORD, node, ctx)?,
            client_credentials: extract_object(FLOW_CLIENT_CREDENTIALS, node, ctx)?,
            authorization_code: extract_object(FLOW_AUTHORIZATION_CODE, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct OAuthFlow {
    pub authorization_url: Option<Positioned<String>>,
    pub token_url: Option<Positioned<String>>,
    pub refresh_url: Option<Positioned<String>>,
    pub scopes: Option<Positioned<IndexMap<String, Positioned<String>>>>,
    pub extensions: Extensions,
}

impl Buildable for OAuthFlow {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("OAuth flow", node)?;
        Ok(Self {
            authorization_url: scalar(node, FIELD_AUTHORIZATION_URL, ctx)?,
            token_url: scalar(node, FIELD_TOKEN_URL, ctx)?,
            refresh_url: scalar(node, FIELD_REFRESH_URL, ctx)?,
            scopes: string_map(node, FIELD_SCOPES, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

/// Security scheme names mapped to the scopes they require.
/// An empty requirement makes security optional.
#[derive(Debug, Clone)]
pub struct SecurityRequirement {
    pub requirements: IndexMap<String, Positioned<Vec<Positioned<String>>>>,
}

impl Buildable for SecurityRequirement {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_SECURITY, node)?;
        let mut requirements = IndexMap::new();
        for (key, _) in node.entries() {
            let Some(name) = key.as_str().filter(|name| !is_extension(name)) else {
                continue;
            };
            if let Some(scopes) = string_list(node, name, ctx)? {
                requirements.insert(name.to_string(), scopes);
            }
        }
        Ok(Self { requirements })
    }
}
