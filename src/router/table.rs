//! Route table reconstruction for diagnostics.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::parser::Method;
use crate::router::node::RouteTree;

/// One registered route as shown in the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub method: Method,
    /// The pattern with variables rendered as `{name}`.
    pub path: String,
    /// Display names of the handler chain, in call order.
    pub handlers: Vec<String>,
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<6} {} -> {}", self.method.as_str(), self.path, self.handlers.join(" + "))
    }
}

/// Walk every forest breadth-first and collect its terminal nodes, sorted by
/// path and then by canonical method order.
pub(crate) fn collect(tree: &RouteTree) -> Vec<RouteEntry> {
    let mut entries = Vec::new();
    let mut queue = VecDeque::new();

    for method in tree.methods() {
        for &root in tree.roots(method).unwrap_or_default() {
            queue.push_back((root, format!("/{}", tree.node(root).segment)));
        }

        while let Some((id, path)) = queue.pop_front() {
            let node = tree.node(id);
            for &child in &node.children {
                queue.push_back((child, format!("{path}/{}", tree.node(child).segment)));
            }
            if node.is_terminal() {
                entries.push(RouteEntry {
                    method,
                    path,
                    handlers: node.handlers.iter().map(|h| h.name().to_string()).collect(),
                });
            }
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path).then(a.method.cmp(&b.method)));
    entries
}
