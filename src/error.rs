use crate::yaml::{Node, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("YAML syntax error: {0}")]
    YamlSyntax(#[from] yaml_rust2::scanner::ScanError),
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{kind}: {message}")]
    Internal {
        kind: ErrorKind,
        message: String,
        context: Option<ErrorContext>,
    },
}

/// Classification of errors raised by the model builders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A `$ref` has no target in the index
    ReferenceNotFound,
    /// A node has the wrong YAML kind for the field being built
    TypeMismatch,
    /// Schema nesting went past the configured ceiling
    ExcessiveDepth,
    /// The input is not an `OpenAPI` document we can build
    InvalidDocument,
    /// An external document could not be opened
    Rolodex,
    /// Invalid build configuration
    Config,
    /// The build was cancelled through its token
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ReferenceNotFound => "Reference",
            Self::TypeMismatch => "Type",
            Self::ExcessiveDepth => "Depth",
            Self::InvalidDocument => "Document",
            Self::Rolodex => "Rolodex",
            Self::Config => "Configuration",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// Additional detail attached to an internal error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Where in the source the problem was found
    pub position: Option<Position>,
    /// The `$ref` involved, if any
    pub reference: Option<String>,
    /// A hint for the user
    pub suggestion: Option<String>,
}

/// JSON representation of an error for structured output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub error_type: String,
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub context: Option<String>,
}

impl Error {
    fn internal(kind: ErrorKind, message: String, context: ErrorContext) -> Self {
        Self::Internal {
            kind,
            message,
            context: Some(context),
        }
    }

    /// A `$ref` could not be located. `node` is the `$ref` site.
    #[must_use]
    pub fn reference_not_found(reference: &str, node: &Node) -> Self {
        let position = node.position();
        Self::internal(
            ErrorKind::ReferenceNotFound,
            format!(
                "reference cannot be found: '{reference}' at line {} col {}",
                position.line, position.column
            ),
            ErrorContext {
                position: Some(position),
                reference: Some(reference.to_string()),
                suggestion: Some(
                    "Check that the referenced component exists and the pointer is spelled correctly."
                        .to_string(),
                ),
            },
        )
    }

    /// A chain of references loops back on itself before reaching a value
    #[must_use]
    pub fn reference_loop(reference: &str, node: &Node) -> Self {
        let position = node.position();
        Self::internal(
            ErrorKind::ReferenceNotFound,
            format!(
                "reference '{reference}' at line {} col {} only resolves to other references",
                position.line, position.column
            ),
            ErrorContext {
                position: Some(position),
                reference: Some(reference.to_string()),
                suggestion: None,
            },
        )
    }

    /// `node` has a different YAML kind than `label` requires
    #[must_use]
    pub fn type_mismatch(label: &str, expected: &str, node: &Node) -> Self {
        let position = node.position();
        Self::internal(
            ErrorKind::TypeMismatch,
            format!(
                "'{label}' must be {expected}, found {} at line {} col {}",
                node.kind_name(),
                position.line,
                position.column
            ),
            ErrorContext {
                position: Some(position),
                ..ErrorContext::default()
            },
        )
    }

    #[must_use]
    pub fn too_deep(depth: usize, max_depth: usize, node: &Node) -> Self {
        let position = node.position();
        Self::internal(
            ErrorKind::ExcessiveDepth,
            format!(
                "schema is too nested to build: depth {depth} exceeds the limit of {max_depth} at line {} col {}",
                position.line, position.column
            ),
            ErrorContext {
                position: Some(position),
                reference: None,
                suggestion: Some(
                    "Raise max_depth or use the truncate depth policy.".to_string(),
                ),
            },
        )
    }

    #[must_use]
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::internal(
            ErrorKind::InvalidDocument,
            message.into(),
            ErrorContext::default(),
        )
    }

    #[must_use]
    pub fn invalid_document_at(message: impl Into<String>, node: &Node) -> Self {
        Self::internal(
            ErrorKind::InvalidDocument,
            message.into(),
            ErrorContext {
                position: Some(node.position()),
                ..ErrorContext::default()
            },
        )
    }

    #[must_use]
    pub fn rolodex(location: &str, reason: impl fmt::Display) -> Self {
        Self::internal(
            ErrorKind::Rolodex,
            format!("unable to open '{location}': {reason}"),
            ErrorContext {
                position: None,
                reference: Some(location.to_string()),
                suggestion: None,
            },
        )
    }

    #[must_use]
    pub fn rolodex_disabled(location: &str, capability: &str) -> Self {
        Self::internal(
            ErrorKind::Rolodex,
            format!("unable to open '{location}': {capability} references are disabled"),
            ErrorContext {
                position: None,
                reference: Some(location.to_string()),
                suggestion: Some(format!(
                    "Enable allow_{capability}_references in the build configuration."
                )),
            },
        )
    }

    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::internal(
            ErrorKind::Config,
            format!("Invalid configuration: {}", message.into()),
            ErrorContext::default(),
        )
    }

    #[must_use]
    pub fn cancelled(stage: &str) -> Self {
        Self::internal(
            ErrorKind::Cancelled,
            format!("build cancelled while {stage}"),
            ErrorContext::default(),
        )
    }

    /// The kind of an internal error, `None` for wrapped library errors
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Internal { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Source position the error points at, if known
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Internal { context, .. } => context.as_ref().and_then(|c| c.position),
            Self::YamlSyntax(scan) => Some(Position {
                line: scan.marker().line(),
                column: scan.marker().col() + 1,
            }),
            _ => None,
        }
    }

    /// Convert error to JSON representation for structured output
    #[must_use]
    pub fn to_json(&self) -> JsonError {
        let (error_type, context) = match self {
            Self::Internal { kind, context, .. } => (
                format!("{kind:?}"),
                context.as_ref().and_then(|c| c.suggestion.clone()),
            ),
            Self::Io(io_err) => {
                let context = match io_err.kind() {
                    std::io::ErrorKind::NotFound => Some(crate::constants::ERR_FILE_NOT_FOUND),
                    std::io::ErrorKind::PermissionDenied => Some(crate::constants::ERR_PERMISSION),
                    _ => None,
                };
                ("FileSystem".to_string(), context.map(str::to_string))
            }
            Self::Network(_) => ("Network".to_string(), Some(crate::constants::ERR_CONNECTION.to_string())),
            Self::YamlSyntax(_) => ("YAMLSyntax".to_string(), Some(crate::constants::ERR_YAML_SYNTAX.to_string())),
            Self::Yaml(_) => ("YAMLParsing".to_string(), None),
            Self::Json(_) => ("JSONParsing".to_string(), None),
            Self::Toml(_) => ("TOMLParsing".to_string(), Some(crate::constants::ERR_TOML_SYNTAX.to_string())),
        };
        let position = self.position();

        JsonError {
            error_type,
            message: self.to_string(),
            line: position.map(|p| p.line),
            column: position.map(|p| p.column),
            context,
        }
    }
}
