//! Frozen prefix tree.
//!
//! # Responsibilities
//! - Own every node of a database in one arena
//! - Expose children as contiguous slices of the arena
//! - Compare databases structurally, independent of arena layout
//!
//! # Design Decisions
//! - Sibling lists are contiguous, so children are `&[PrefixNode]`
//! - Props are shared per source line through `Arc`
//! - Built only through `TreeBuilder`; no mutation afterwards

use std::ops::Range;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::db::loader::PendingLine;

/// Property map attached to a prefix node.
///
/// Stored as a vector sorted by key. Keys are unique; inserting an
/// existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Props {
    entries: Vec<(String, String)>,
}

impl Props {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.binary_search_by(|(k, _)| k.as_str().cmp(&key)) {
            Ok(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            Err(idx) => {
                self.entries.insert(idx, (key, value));
                None
            }
        }
    }

    /// Look up a property value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|idx| self.entries[idx].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Union `other` into `self`; values from `other` win on collision.
    pub fn merge_from(&mut self, other: &Props) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}

impl Serialize for Props {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One node of the prefix tree.
#[derive(Debug, Clone)]
pub struct PrefixNode {
    low: String,
    high: String,
    props: Arc<Props>,
    children: Range<usize>,
}

impl PrefixNode {
    /// Number of digits this node consumes.
    pub fn length(&self) -> usize {
        self.low.len()
    }

    /// Inclusive lower bound.
    pub fn low(&self) -> &str {
        &self.low
    }

    /// Inclusive upper bound.
    pub fn high(&self) -> &str {
        &self.high
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Split `number` into the consumed prefix and the remainder when the
    /// prefix falls inside this node's range.
    pub fn match_prefix<'q>(&self, number: &'q str) -> Option<(&'q str, &'q str)> {
        let head = number.get(..self.length())?;
        if self.low.as_str() <= head && head <= self.high.as_str() {
            Some((head, &number[self.length()..]))
        } else {
            None
        }
    }

    /// True when both nodes were written on the same source line.
    pub(crate) fn shares_line_with(&self, other: &PrefixNode) -> bool {
        Arc::ptr_eq(&self.props, &other.props) && self.children == other.children
    }
}

/// An immutable prefix database.
#[derive(Debug, Clone, Default)]
pub struct Database {
    nodes: Vec<PrefixNode>,
    roots: Range<usize>,
}

impl Database {
    /// Freeze builder lines into the arena layout.
    pub(crate) fn freeze(lines: Vec<PendingLine>) -> Self {
        let mut nodes = Vec::new();
        let roots = freeze_level(lines, &mut nodes);
        Self { nodes, roots }
    }

    /// Top-level nodes in file order.
    pub fn roots(&self) -> &[PrefixNode] {
        &self.nodes[self.roots.clone()]
    }

    /// Children of `node` in file order.
    ///
    /// `node` must belong to this database.
    pub fn children(&self, node: &PrefixNode) -> &[PrefixNode] {
        &self.nodes[node.children.clone()]
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Length of the longest root-to-leaf path (0 for an empty database).
    pub fn depth(&self) -> usize {
        self.level_depth(self.roots())
    }

    fn level_depth(&self, nodes: &[PrefixNode]) -> usize {
        nodes
            .iter()
            .map(|node| 1 + self.level_depth(self.children(node)))
            .max()
            .unwrap_or(0)
    }

    fn level_eq(&self, ours: &[PrefixNode], other: &Database, theirs: &[PrefixNode]) -> bool {
        ours.len() == theirs.len()
            && ours.iter().zip(theirs).all(|(a, b)| {
                a.low == b.low
                    && a.high == b.high
                    && a.props == b.props
                    && self.level_eq(self.children(a), other, other.children(b))
            })
    }
}

impl PartialEq for Database {
    fn eq(&self, other: &Self) -> bool {
        self.level_eq(self.roots(), other, other.roots())
    }
}

impl Eq for Database {}

/// Lay out one sibling list contiguously, then recurse into each line's
/// children. Every range of a line points at the same child span.
fn freeze_level(lines: Vec<PendingLine>, nodes: &mut Vec<PrefixNode>) -> Range<usize> {
    let start = nodes.len();
    let mut owners = Vec::with_capacity(lines.len());

    for line in lines {
        let props = Arc::new(line.props);
        let first = nodes.len();
        for range in line.ranges {
            nodes.push(PrefixNode {
                low: range.low,
                high: range.high,
                props: Arc::clone(&props),
                children: 0..0,
            });
        }
        owners.push((first..nodes.len(), line.children));
    }

    let span = start..nodes.len();
    for (owned, children) in owners {
        if children.is_empty() {
            continue;
        }
        let child_span = freeze_level(children, nodes);
        for node in &mut nodes[owned] {
            node.children = child_span.clone();
        }
    }
    span
}
