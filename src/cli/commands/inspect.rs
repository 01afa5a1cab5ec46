//! Handler for `strata inspect`.

use super::os_source;
use crate::cli::{OutputFormat, SourceArgs};
use crate::config::{BuildConfig, DepthPolicy};
use crate::error::{Error, JsonError};
use crate::high;
use crate::index::CircularReference;
use crate::low::{BuildOutcome, DocumentBuilder, SchemaProxy};
use crate::yaml::NodeId;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::debug;

/// Overrides applied to the loaded build configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct InspectOptions {
    pub max_depth: Option<usize>,
    pub truncate: bool,
    pub resolve_schemas: bool,
}

impl InspectOptions {
    fn apply(self, config: &mut BuildConfig) {
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if self.truncate {
            config.depth_policy = DepthPolicy::Truncate;
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub file: String,
    pub version: Option<String>,
    pub title: Option<String>,
    pub paths: usize,
    pub operations: usize,
    pub schemas: usize,
    pub references: usize,
    pub circular_references: Vec<CircularReference>,
    pub errors: Vec<JsonError>,
    /// Schemas that failed to build; only filled with `--resolve-schemas`
    pub schema_errors: Vec<JsonError>,
}

impl InspectReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || !self.schema_errors.is_empty()
    }
}

pub fn execute(source: &SourceArgs, options: InspectOptions) -> Result<InspectReport, Error> {
    let (content, mut config) = os_source(source)?;
    options.apply(&mut config);

    let builder = DocumentBuilder::new(config).with_default_rolodex()?;
    let outcome = builder.build_from_str(&content)?;
    let mut report = summarize(&source.file.display().to_string(), &outcome);
    if options.resolve_schemas {
        report.schema_errors = resolve_schemas(&outcome);
    }
    Ok(report)
}

/// Summarizes a finished build
#[must_use]
pub fn summarize(file: &str, outcome: &BuildOutcome) -> InspectReport {
    let document = high::Document::from(&outcome.document);
    InspectReport {
        file: file.to_string(),
        version: document.version.clone(),
        title: document.info.as_ref().and_then(|info| info.title.clone()),
        paths: document.paths.as_ref().map_or(0, |paths| paths.items.len()),
        operations: document.operation_count(),
        schemas: document
            .components
            .as_ref()
            .map_or(0, |components| components.schemas.len()),
        references: outcome.document.index().mapped_references().len(),
        circular_references: outcome.circular_references.clone(),
        errors: outcome.errors.iter().map(Error::to_json).collect(),
        schema_errors: Vec::new(),
    }
}

/// Resolves every component schema and everything reachable from it,
/// collecting the build errors the proxies hold.
#[must_use]
pub fn resolve_schemas(outcome: &BuildOutcome) -> Vec<JsonError> {
    let Some(schemas) = outcome
        .document
        .components
        .as_ref()
        .and_then(|components| components.value.schemas.as_ref())
    else {
        return Vec::new();
    };

    let mut pending: Vec<Arc<SchemaProxy>> = schemas
        .value
        .values()
        .map(|proxy| Arc::clone(&proxy.value))
        .collect();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut errors = Vec::new();

    while let Some(proxy) = pending.pop() {
        match proxy.resolve() {
            Ok(schema) => {
                if seen.insert(schema.node.id()) {
                    pending.extend(schema.children().into_iter().cloned());
                }
            }
            Err(error) => errors.push(error.to_json()),
        }
    }
    debug!(target: "strata::cli", "resolved {} schemas, {} failed", seen.len(), errors.len());

    errors.sort_by(|a, b| (a.line, a.column, &a.message).cmp(&(b.line, b.column, &b.message)));
    errors.dedup_by(|a, b| a.line == b.line && a.column == b.column && a.message == b.message);
    errors
}

/// Renders a report in the requested format
pub fn render(report: &InspectReport, format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.file);
    let _ = writeln!(
        out,
        "  OpenAPI {}  {}",
        report.version.as_deref().unwrap_or("(no version)"),
        report.title.as_deref().unwrap_or("(untitled)")
    );
    let _ = writeln!(
        out,
        "  {} paths, {} operations, {} schemas, {} references",
        report.paths, report.operations, report.schemas, report.references
    );

    if !report.circular_references.is_empty() {
        let _ = writeln!(out, "\nCircular references:");
        for circular in &report.circular_references {
            let _ = writeln!(out, "  {}", circular.journey.join(" -> "));
        }
    }

    for (heading, errors) in [("Errors", &report.errors), ("Schema errors", &report.schema_errors)] {
        if errors.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{heading}:");
        for error in errors {
            match (error.line, error.column) {
                (Some(line), Some(column)) => {
                    let _ = writeln!(out, "  {line}:{column}  {}", error.message);
                }
                _ => {
                    let _ = writeln!(out, "  {}", error.message);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(content: &str) -> BuildOutcome {
        DocumentBuilder::new(BuildConfig::default())
            .build_from_str(content)
            .unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let outcome = outcome(
            "openapi: 3.0.0\ninfo:\n  title: Demo\n  version: '1'\npaths:\n  /a:\n    get:\n      responses: {}\n    post:\n      responses: {}\n  /b:\n    get:\n      responses: {}\ncomponents:\n  schemas:\n    A:\n      $ref: '#/components/schemas/B'\n    B:\n      type: string\n",
        );
        let report = summarize("demo.yaml", &outcome);
        assert_eq!(report.title.as_deref(), Some("Demo"));
        assert_eq!(report.paths, 2);
        assert_eq!(report.operations, 3);
        assert_eq!(report.schemas, 2);
        assert_eq!(report.references, 1);
        assert!(!report.has_errors());

        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("2 paths, 3 operations, 2 schemas, 1 references"));
        let json: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["operations"], 3);
        assert!(render(&report, OutputFormat::Yaml).unwrap().contains("schemas: 2"));
    }

    #[test]
    fn test_resolve_schemas_reports_proxy_errors_once() {
        let outcome = outcome(
            "openapi: 3.0.0\ncomponents:\n  schemas:\n    A:\n      properties:\n        b:\n          $ref: '#/components/schemas/Gone'\n        self:\n          $ref: '#/components/schemas/A'\n    C:\n      items:\n        $ref: '#/components/schemas/Gone'\n",
        );
        let errors = resolve_schemas(&outcome);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.message.contains("'#/components/schemas/Gone'")));
        assert_eq!(errors[0].line, Some(7));
        assert_eq!(errors[1].line, Some(12));
    }

    #[test]
    fn test_text_lists_errors_with_positions() {
        let outcome = outcome("openapi: 3.0.0\npaths:\n  /a:\n    $ref: '#/nowhere'\n");
        let report = summarize("broken.yaml", &outcome);
        assert!(report.has_errors());
        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("Errors:\n  4:11  Reference: reference cannot be found: '#/nowhere'"));
    }
}
