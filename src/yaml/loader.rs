//! Builds positioned [`Node`] trees from the YAML event stream.

use super::node::{Node, NodeKind, Position, Scalar, ScalarTag};
use crate::error::Error;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

static INT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([-+]?[0-9]+|0o[0-7]+|0x[0-9a-fA-F]+)$").expect("Regex pattern is hardcoded and valid")
});

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?|[-+]?\.(inf|Inf|INF)|\.(nan|NaN|NAN))$")
        .expect("Regex pattern is hardcoded and valid")
});

/// Parses the first document of `content` into a positioned tree.
///
/// `origin` is recorded on every node and names the document for relative
/// reference resolution; the root document uses the empty string.
///
/// # Errors
///
/// Returns an error if the content is not well-formed YAML or contains no document.
pub fn parse_document(content: &str, origin: &str) -> Result<Node, Error> {
    let mut builder = TreeBuilder::new(origin);
    let mut parser = Parser::new(content.chars());
    parser.load(&mut builder, false)?;
    builder
        .root
        .ok_or_else(|| Error::invalid_document(format!("'{}' contains no YAML document", display_origin(origin))))
}

fn display_origin(origin: &str) -> &str {
    if origin.is_empty() {
        "root document"
    } else {
        origin
    }
}

/// Resolves the type of a plain scalar
fn resolve_tag(value: &str) -> ScalarTag {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => ScalarTag::Null,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => ScalarTag::Bool,
        v if INT_PATTERN.is_match(v) => ScalarTag::Int,
        v if FLOAT_PATTERN.is_match(v) => ScalarTag::Float,
        _ => ScalarTag::Str,
    }
}

enum Frame {
    Sequence {
        items: Vec<Node>,
        anchor: usize,
        position: Position,
    },
    Mapping {
        entries: Vec<(Node, Node)>,
        pending_key: Option<Node>,
        anchor: usize,
        position: Position,
    },
}

struct TreeBuilder {
    origin: Arc<str>,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    root: Option<Node>,
}

impl TreeBuilder {
    fn new(origin: &str) -> Self {
        Self {
            origin: Arc::from(origin),
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
        }
    }

    fn finish(&mut self, node: Node, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
        self.attach(node);
    }

    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                position,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push((key, node)),
                None => {
                    // block mappings are marked at the first ':', so they start at their first key
                    if entries.is_empty() && node.position() < *position {
                        *position = node.position();
                    }
                    *pending_key = Some(node);
                }
            },
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
        }
    }
}

fn position_of(mark: Marker) -> Position {
    Position {
        line: mark.line(),
        column: mark.col() + 1,
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event, mark: Marker) {
        match event {
            Event::Scalar(value, style, anchor, ..) => {
                let tag = if matches!(style, TScalarStyle::Plain) {
                    resolve_tag(&value)
                } else {
                    ScalarTag::Str
                };
                let node = Node::new(
                    NodeKind::Scalar(Scalar { value, tag }),
                    position_of(mark),
                    Arc::clone(&self.origin),
                );
                self.finish(node, anchor);
            }
            Event::SequenceStart(anchor, ..) => self.stack.push(Frame::Sequence {
                items: Vec::new(),
                anchor,
                position: position_of(mark),
            }),
            Event::MappingStart(anchor, ..) => self.stack.push(Frame::Mapping {
                entries: Vec::new(),
                pending_key: None,
                anchor,
                position: position_of(mark),
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let Some(frame) = self.stack.pop() else {
                    return;
                };
                let (kind, anchor, position) = match frame {
                    Frame::Sequence {
                        items,
                        anchor,
                        position,
                    } => (NodeKind::Sequence(items), anchor, position),
                    Frame::Mapping {
                        entries,
                        anchor,
                        position,
                        ..
                    } => (NodeKind::Mapping(entries), anchor, position),
                };
                let node = Node::new(kind, position, Arc::clone(&self.origin));
                self.finish(node, anchor);
            }
            Event::Alias(anchor) => {
                let node = self.anchors.get(&anchor).cloned().unwrap_or_else(|| {
                    Node::new(
                        NodeKind::Scalar(Scalar {
                            value: String::new(),
                            tag: ScalarTag::Null,
                        }),
                        position_of(mark),
                        Arc::clone(&self.origin),
                    )
                });
                self.attach(node);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_input() {
        let root = parse_document(r#"{"openapi": "3.0.1", "paths": {"/a": {}}}"#, "").unwrap();
        assert_eq!(root.get("openapi").unwrap().as_str(), Some("3.0.1"));
        assert!(root.get("paths").unwrap().get("/a").unwrap().is_mapping());
    }

    #[test]
    fn test_parse_rejects_empty_stream() {
        let err = parse_document("", "").unwrap_err();
        assert!(err.to_string().contains("contains no YAML document"));
    }

    #[test]
    fn test_parse_reports_syntax_errors() {
        let err = parse_document("a: [1, 2", "").unwrap_err();
        assert!(matches!(err, Error::YamlSyntax(_)));
        assert!(err.position().is_some());
    }

    #[test]
    fn test_block_mapping_starts_at_first_key() {
        let root = parse_document("openapi: 3.0.0\ninfo:\n  title: Pets\n  version: '1'\n", "").unwrap();
        assert_eq!(root.position(), Position { line: 1, column: 1 });
        let info = root.get("info").unwrap();
        assert_eq!(info.position(), Position { line: 3, column: 3 });

        let nested = parse_document("a:\n  b:\n      c: 1\n", "").unwrap();
        let b = nested.pointer("/a/b").unwrap();
        assert_eq!(b.position(), Position { line: 3, column: 7 });
    }

    #[test]
    fn test_flow_mapping_starts_at_brace() {
        let root = parse_document("a: {b: 1}\nc: [{d: 2}]\n", "").unwrap();
        assert_eq!(root.get("a").unwrap().position(), Position { line: 1, column: 4 });
        let d = root.pointer("/c/0").unwrap();
        assert_eq!(d.position(), Position { line: 2, column: 5 });
    }

    #[test]
    fn test_origin_is_recorded() {
        let root = parse_document("a: b\n", "schemas/pet.yaml").unwrap();
        assert_eq!(root.get("a").unwrap().origin(), "schemas/pet.yaml");
    }

    #[test]
    fn test_resolve_tag() {
        assert_eq!(resolve_tag("-12"), ScalarTag::Int);
        assert_eq!(resolve_tag("1e3"), ScalarTag::Float);
        assert_eq!(resolve_tag(".inf"), ScalarTag::Float);
        assert_eq!(resolve_tag("3.0.3"), ScalarTag::Str);
        assert_eq!(resolve_tag("yes"), ScalarTag::Str);
    }
}
