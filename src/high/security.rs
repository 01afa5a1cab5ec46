use super::{extensions, map, object, value};
use crate::low;
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct SecurityScheme {
    pub scheme_type: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub scheme: Option<String>,
    pub bearer_format: Option<String>,
    pub flows: Option<OAuthFlows>,
    pub open_id_connect_url: Option<String>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::SecurityScheme> for SecurityScheme {
    fn from(low: &low::SecurityScheme) -> Self {
        Self {
            scheme_type: value(&low.scheme_type),
            description: value(&low.description),
            name: value(&low.name),
            location: value(&low.location),
            scheme: value(&low.scheme),
            bearer_format: value(&low.bearer_format),
            flows: object(&low.flows, OAuthFlows::from),
            open_id_connect_url: value(&low.open_id_connect_url),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OAuthFlows {
    pub implicit: Option<OAuthFlow>,
    pub password: Option<OAuthFlow>,
    pub client_credentials: Option<OAuthFlow>,
    pub authorization_code: Option<OAuthFlow>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::OAuthFlows> for OAuthFlows {
    fn from(low: &low::OAuthFlows) -> Self {
        Self {
            implicit: object(&low.implicit, OAuthFlow::from),
            password: object(&low.password, OAuthFlow::from),
            client_credentials: object(&low.client_credentials, OAuthFlow::from),
            authorization_code: object(&low.authorization_code, OAuthFlow::from),
            extensions: extensions(&low.extensions),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OAuthFlow {
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
    pub scopes: IndexMap<String, String>,
    pub extensions: IndexMap<String, Value>,
}

impl From<&low::OAuthFlow> for OAuthFlow {
    fn from(low: &low::OAuthFlow) -> Self {
        Self {
            authorization_url: value(&low.authorization_url),
            token_url: value(&low.token_url),
            refresh_url: value(&low.refresh_url),
            scopes: map(&low.scopes, String::clone),
            extensions: extensions(&low.extensions),
        }
    }
}

/// Scheme names mapped to required scopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityRequirement {
    pub requirements: IndexMap<String, Vec<String>>,
}

impl From<&low::SecurityRequirement> for SecurityRequirement {
    fn from(low: &low::SecurityRequirement) -> Self {
        Self {
            requirements: low
                .requirements
                .iter()
                .map(|(name, scopes)| {
                    let scopes = scopes.value.iter().map(|scope| scope.value.clone());
                    (name.clone(), scopes.collect())
                })
                .collect(),
        }
    }
}
