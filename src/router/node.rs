//! Route trie: per-method forests of segment nodes stored in one arena.

use std::collections::HashMap;
use std::fmt;

use crate::parser::Method;
use crate::router::handler::Handler;

/// Index of a node in the [`RouteTree`] arena.
pub(crate) type NodeId = usize;

/// One segment of a registered pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches only the identical literal text.
    Fixed(String),
    /// Matches any one segment and binds it to the name.
    Variable(String),
}

impl Segment {
    /// Classify a raw pattern segment.
    ///
    /// `:name` and `{name}` are variables; anything else, including malformed
    /// delimiters such as `{name` or a bare `:`, is taken literally.
    pub fn parse(raw: &str) -> Self {
        if let Some(name) = raw.strip_prefix(':').filter(|name| !name.is_empty()) {
            return Segment::Variable(name.to_string());
        }
        if let Some(name) = raw
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|name| !name.is_empty())
        {
            return Segment::Variable(name.to_string());
        }
        Segment::Fixed(raw.to_string())
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Segment::Fixed(_))
    }

    /// Whether a request segment may continue a match through this segment.
    #[inline]
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Segment::Fixed(text) => text == value,
            Segment::Variable(_) => true,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Fixed(text) => f.write_str(text),
            Segment::Variable(name) => write!(f, "{{{name}}}"),
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) segment: Segment,
    /// Insertion order; it decides backtracking precedence.
    pub(crate) children: Vec<NodeId>,
    pub(crate) handlers: Vec<Handler>,
}

impl Node {
    fn new(segment: Segment) -> Self {
        Self {
            segment,
            children: Vec::new(),
            handlers: Vec::new(),
        }
    }

    pub(crate) fn is_terminal(&self) -> bool {
        !self.handlers.is_empty()
    }
}

/// All registered routes. Nodes are never removed.
#[derive(Clone, Default)]
pub(crate) struct RouteTree {
    nodes: Vec<Node>,
    roots: HashMap<Method, Vec<NodeId>>,
}

impl RouteTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Root nodes for `method` in registration order.
    pub(crate) fn roots(&self, method: Method) -> Option<&[NodeId]> {
        self.roots.get(&method).map(Vec::as_slice)
    }

    pub(crate) fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        self.roots.keys().copied()
    }

    /// Merge the segment chain of a pattern into the forest for `method` and
    /// append `handlers` to the node it ends on.
    ///
    /// At every depth the first structurally equal node (same kind, same text)
    /// is reused; the remainder of the chain is attached as a new branch.
    /// Registering an identical pattern again accumulates handlers.
    pub(crate) fn insert(&mut self, method: Method, segments: Vec<Segment>, handlers: Vec<Handler>) -> NodeId {
        let mut segments = segments.into_iter();
        // A split pattern always has at least one segment.
        let first = segments.next().unwrap_or(Segment::Fixed(String::new()));

        let existing_root = self
            .roots
            .get(&method)
            .and_then(|roots| roots.iter().copied().find(|&id| self.nodes[id].segment == first));
        let mut current = match existing_root {
            Some(id) => id,
            None => {
                let id = self.alloc(first);
                self.roots.entry(method).or_default().push(id);
                id
            }
        };

        for segment in segments {
            let existing_child = self.nodes[current]
                .children
                .iter()
                .copied()
                .find(|&id| self.nodes[id].segment == segment);
            current = match existing_child {
                Some(id) => id,
                None => {
                    let id = self.alloc(segment);
                    self.nodes[current].children.push(id);
                    id
                }
            };
        }

        self.nodes[current].handlers.extend(handlers);
        current
    }

    fn alloc(&mut self, segment: Segment) -> NodeId {
        self.nodes.push(Node::new(segment));
        self.nodes.len() - 1
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}
