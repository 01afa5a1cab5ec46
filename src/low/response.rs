use super::base::{expect_mapping, Buildable, Extensions, Positioned, PositionedMap};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::{collect_entries, extract_map};
use super::fields::scalar;
use super::link::Link;
use super::media::MediaType;
use super::parameter::Header;
use crate::constants::{
    FIELD_CONTENT, FIELD_DEFAULT, FIELD_DESCRIPTION, FIELD_HEADERS, FIELD_LINKS, FIELD_RESPONSES,
};
use crate::error::Error;
use crate::yaml::Node;

#[derive(Debug, Clone)]
pub struct Response {
    pub description: Option<Positioned<String>>,
    pub headers: Option<Positioned<PositionedMap<Header>>>,
    pub content: Option<Positioned<PositionedMap<MediaType>>>,
    pub links: Option<Positioned<PositionedMap<Link>>>,
    pub extensions: Extensions,
}

impl Buildable for Response {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping("response", node)?;
        Ok(Self {
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            headers: extract_map(FIELD_HEADERS, node, ctx)?,
            content: extract_map(FIELD_CONTENT, node, ctx)?,
            links: extract_map(FIELD_LINKS, node, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

/// An operation's responses: `default` plus one entry per status code
#[derive(Debug, Clone)]
pub struct Responses {
    pub default: Option<Positioned<Response>>,
    pub codes: PositionedMap<Response>,
    pub extensions: Extensions,
}

impl Responses {
    /// The response for `code`, falling back to `default`
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Positioned<Response>> {
        self.codes.get(code).or(self.default.as_ref())
    }
}

impl Buildable for Responses {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        let mut codes = collect_entries::<Response>(FIELD_RESPONSES, node, ctx)?;
        let default = codes.shift_remove(FIELD_DEFAULT);
        Ok(Self {
            default,
            codes,
            extensions: extract_extensions(node),
        })
    }
}
