//! Detection of reference cycles across the indexed documents.

use super::SpecIndex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A chain of references that returns to where it started
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircularReference {
    /// Reference keys in walk order; the last entry repeats `loop_point`
    pub journey: Vec<String>,
    /// The reference the walk returned to
    pub loop_point: String,
}

impl CircularReference {
    /// A reference whose target refers straight back to itself
    #[must_use]
    pub fn is_self_reference(&self) -> bool {
        self.journey.len() == 2
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

struct Walk<'a> {
    edges: HashMap<&'a str, Vec<String>>,
    state: HashMap<String, Visit>,
    stack: Vec<String>,
    seen: HashSet<Vec<String>>,
    found: Vec<CircularReference>,
}

pub(super) fn find(index: &SpecIndex) -> Vec<CircularReference> {
    let edges = index
        .mapped_references()
        .iter()
        .map(|(key, target)| {
            let below = super::reference_nodes(target)
                .into_iter()
                .filter_map(|node| {
                    node.reference()
                        .map(|definition| index.reference_key(node.origin(), definition))
                })
                .collect();
            (key.as_str(), below)
        })
        .collect();

    let mut walk = Walk {
        edges,
        state: HashMap::new(),
        stack: Vec::new(),
        seen: HashSet::new(),
        found: Vec::new(),
    };
    for key in index.mapped_references().keys() {
        if !walk.state.contains_key(key) {
            walk.visit(key);
        }
    }
    walk.found
}

impl Walk<'_> {
    fn visit(&mut self, key: &str) {
        self.state.insert(key.to_string(), Visit::InProgress);
        self.stack.push(key.to_string());

        let next_keys = self.edges.get(key).cloned().unwrap_or_default();
        for next in next_keys {
            match self.state.get(&next) {
                Some(Visit::InProgress) => self.record(&next),
                Some(Visit::Done) => {}
                None if self.edges.contains_key(next.as_str()) => self.visit(&next),
                None => {}
            }
        }

        self.stack.pop();
        self.state.insert(key.to_string(), Visit::Done);
    }

    fn record(&mut self, loop_point: &str) {
        let Some(start) = self.stack.iter().position(|k| k == loop_point) else {
            return;
        };
        let mut journey: Vec<String> = self.stack[start..].to_vec();

        let mut members = journey.clone();
        members.sort();
        if !self.seen.insert(members) {
            return;
        }

        journey.push(loop_point.to_string());
        self.found.push(CircularReference {
            journey,
            loop_point: loop_point.to_string(),
        });
    }
}
