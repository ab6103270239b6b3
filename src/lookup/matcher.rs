//! Prefix matching against a frozen database.

use serde::Serialize;

use crate::db::tree::{Database, PrefixNode, Props};
use crate::lookup::merge::merge;
use crate::observability::metrics;

/// One segment of a decomposed number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchPart {
    /// Consumed slice of the query.
    pub digits: String,
    /// Properties of every node matched at this depth.
    pub props: Props,
}

impl MatchPart {
    pub fn new(digits: impl Into<String>, props: Props) -> Self {
        Self {
            digits: digits.into(),
            props,
        }
    }

    /// A part that matched nothing.
    pub fn unmatched(digits: impl Into<String>) -> Self {
        Self::new(digits, Props::new())
    }
}

/// A part during matching: digits borrowed from the query, props borrowed
/// from the tree. Layers are applied in order, later layers win.
#[derive(Debug, Clone)]
pub(crate) struct Part<'q, 'db> {
    pub(crate) digits: &'q str,
    pub(crate) layers: Vec<&'db Props>,
}

impl<'q, 'db> Part<'q, 'db> {
    pub(crate) fn unmatched(digits: &'q str) -> Self {
        Self {
            digits,
            layers: Vec::new(),
        }
    }

    fn resolve(self) -> MatchPart {
        let mut props = Props::new();
        for layer in self.layers {
            props.merge_from(layer);
        }
        MatchPart::new(self.digits, props)
    }
}

impl Database {
    /// Decompose `number` into labelled parts.
    ///
    /// The concatenated digits of the result always equal `number`. When
    /// nothing matches the result is `[(number, {})]`.
    pub fn info(&self, number: &str) -> Vec<MatchPart> {
        metrics::record_lookup();
        if number.is_empty() {
            return vec![MatchPart::unmatched("")];
        }
        self.find(number, self.roots())
            .into_iter()
            .map(Part::resolve)
            .collect()
    }

    /// The digit parts of [`Database::info`].
    pub fn split(&self, number: &str) -> Vec<String> {
        self.info(number).into_iter().map(|part| part.digits).collect()
    }

    fn find<'q, 'db>(&'db self, number: &'q str, nodes: &'db [PrefixNode]) -> Vec<Part<'q, 'db>> {
        if number.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Vec<Part<'q, 'db>>> = Vec::new();
        for node in nodes {
            let Some((head, tail)) = node.match_prefix(number) else {
                continue;
            };
            let mut candidate = vec![Part {
                digits: head,
                layers: vec![node.props()],
            }];
            candidate.extend(self.find(tail, self.children(node)));
            candidates.push(candidate);
        }

        match candidates.len() {
            0 => vec![Part::unmatched(number)],
            1 => candidates.swap_remove(0),
            _ => merge(number, candidates),
        }
    }
}
