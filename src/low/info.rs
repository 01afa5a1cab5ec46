use super::base::{expect_mapping, Buildable, Extensions, Positioned};
use super::context::BuildContext;
use super::extensions::extract_extensions;
use super::extract::extract_object;
use super::fields::scalar;
use crate::constants::{
    FIELD_CONTACT, FIELD_DESCRIPTION, FIELD_EMAIL, FIELD_INFO, FIELD_LICENSE, FIELD_NAME,
    FIELD_TERMS_OF_SERVICE, FIELD_TITLE, FIELD_URL, FIELD_VERSION,
};
use crate::error::Error;
use crate::yaml::Node;

#[derive(Debug, Clone)]
pub struct Info {
    pub title: Option<Positioned<String>>,
    pub description: Option<Positioned<String>>,
    pub terms_of_service: Option<Positioned<String>>,
    pub contact: Option<Positioned<Contact>>,
    pub license: Option<Positioned<License>>,
    pub version: Option<Positioned<String>>,
    pub extensions: Extensions,
}

impl Buildable for Info {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_INFO, node)?;
        Ok(Self {
            title: scalar(node, FIELD_TITLE, ctx)?,
            description: scalar(node, FIELD_DESCRIPTION, ctx)?,
            terms_of_service: scalar(node, FIELD_TERMS_OF_SERVICE, ctx)?,
            contact: extract_object(FIELD_CONTACT, node, ctx)?,
            license: extract_object(FIELD_LICENSE, node, ctx)?,
            version: scalar(node, FIELD_VERSION, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Contact {
    pub name: Option<Positioned<String>>,
    pub url: Option<Positioned<String>>,
    pub email: Option<Positioned<String>>,
    pub extensions: Extensions,
}

impl Buildable for Contact {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_CONTACT, node)?;
        Ok(Self {
            name: scalar(node, FIELD_NAME, ctx)?,
            url: scalar(node, FIELD_URL, ctx)?,
            email: scalar(node, FIELD_EMAIL, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}

#[derive(Debug, Clone)]
pub struct License {
    pub name: Option<Positioned<String>>,
    pub url: Option<Positioned<String>>,
    pub extensions: Extensions,
}

impl Buildable for License {
    fn build(_key: Option<&Node>, node: &Node, ctx: &BuildContext) -> Result<Self, Error> {
        expect_mapping(FIELD_LICENSE, node)?;
        Ok(Self {
            name: scalar(node, FIELD_NAME, ctx)?,
            url: scalar(node, FIELD_URL, ctx)?,
            extensions: extract_extensions(node),
        })
    }
}
