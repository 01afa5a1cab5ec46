//! Handler for `strata refs`.

use super::os_source;
use crate::cli::SourceArgs;
use crate::error::{Error, JsonError};
use crate::index::SpecIndex;
use crate::rolodex::DefaultRolodex;
use crate::yaml::{parse_document, Node};
use serde::Serialize;
use std::fmt::Write as _;

/// One `$ref` and where it leads
#[derive(Debug, Serialize)]
pub struct ReferenceLine {
    pub definition: String,
    /// `line:column` of the `$ref`, prefixed with its document when external
    pub site: String,
    /// `line:column` of the target, `None` when it cannot be found
    pub target: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefsReport {
    pub references: Vec<ReferenceLine>,
    pub errors: Vec<JsonError>,
}

pub fn execute(source: &SourceArgs) -> Result<RefsReport, Error> {
    let (content, config) = os_source(source)?;
    config.validate()?;
    let rolodex = DefaultRolodex::from_config(&config)?;
    let root = parse_document(&content, "")?;
    let index = SpecIndex::build(root, &config, Some(&rolodex));
    Ok(report(&index))
}

#[must_use]
pub fn report(index: &SpecIndex) -> RefsReport {
    let references = index
        .reference_sites()
        .iter()
        .map(|site| ReferenceLine {
            definition: site.definition.clone(),
            site: location(site.node.get(crate::constants::REF_KEY).unwrap_or(&site.node)),
            target: index.locate_reference(&site.key).as_ref().map(location),
        })
        .collect();
    RefsReport {
        references,
        errors: index.errors().iter().map(Error::to_json).collect(),
    }
}

fn location(node: &Node) -> String {
    let position = node.position();
    if node.origin().is_empty() {
        position.to_string()
    } else {
        format!("{}:{position}", node.origin())
    }
}

#[must_use]
pub fn render(report: &RefsReport) -> String {
    let mut out = String::new();
    for line in &report.references {
        let target = line.target.as_deref().unwrap_or("(not found)");
        let _ = writeln!(out, "{}  {} -> {target}", line.site, line.definition);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_sites_and_targets() {
        let root = parse_document(
            "components:\n  schemas:\n    A:\n      $ref: '#/components/schemas/B'\n    B:\n      type: string\n    C:\n      $ref: '#/components/schemas/Z'\n",
            "",
        )
        .unwrap();
        let index = SpecIndex::new(root);
        let report = report(&index);
        assert_eq!(report.references.len(), 2);
        assert_eq!(report.errors.len(), 1);

        let rendered = render(&report);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "4:13  #/components/schemas/B -> 6:7");
        assert_eq!(lines[1], "8:13  #/components/schemas/Z -> (not found)");
    }
}
