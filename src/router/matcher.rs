//! Request-time path matching.

use std::ops::Range;

use crate::router::node::{NodeId, RouteTree};

/// One level of the search stack: a node and the next child to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) node: NodeId,
    next_child: usize,
}

impl Frame {
    fn new(node: NodeId) -> Self {
        Self { node, next_child: 0 }
    }
}

/// Depth-first search with explicit backtracking for a node chain whose length
/// equals the number of request segments.
///
/// Roots and children are tried in insertion order and the first complete
/// chain wins. On success `stack` holds one frame per segment, root first;
/// on failure it is left empty. The chain is structural: the caller decides
/// whether its last node carries handlers.
pub(crate) fn find_path(
    tree: &RouteTree,
    roots: &[NodeId],
    path: &str,
    segments: &[Range<usize>],
    stack: &mut Vec<Frame>,
) -> bool {
    stack.clear();
    let Some(first) = segments.first() else {
        return false;
    };
    let first = &path[first.clone()];

    for &root in roots {
        if !tree.node(root).segment.accepts(first) {
            continue;
        }
        stack.push(Frame::new(root));

        while !stack.is_empty() {
            let depth = stack.len();
            if depth == segments.len() {
                return true;
            }

            let value = &path[segments[depth].clone()];
            let top = &mut stack[depth - 1];
            let children = &tree.node(top.node).children;
            let mut next = None;
            while top.next_child < children.len() {
                let child = children[top.next_child];
                top.next_child += 1;
                if tree.node(child).segment.accepts(value) {
                    next = Some(child);
                    break;
                }
            }

            match next {
                Some(child) => stack.push(Frame::new(child)),
                None => {
                    stack.pop();
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Method;
    use crate::router::handler::Handler;
    use crate::router::node::Segment;
    use crate::router::split::split_bounds;

    fn tree_with(patterns: &[&str]) -> RouteTree {
        let mut tree = RouteTree::new();
        for pattern in patterns {
            let segments = crate::router::split_path(pattern).into_iter().map(Segment::parse).collect();
            tree.insert(Method::GET, segments, vec![Handler::named(pattern.to_string(), |_| {})]);
        }
        tree
    }

    fn matched(tree: &RouteTree, request: &str) -> Option<Vec<String>> {
        let mut bounds = Vec::new();
        split_bounds(request, &mut bounds);
        let mut stack = Vec::new();
        let roots = tree.roots(Method::GET)?;
        find_path(tree, roots, request, &bounds, &mut stack)
            .then(|| stack.iter().map(|frame| tree.node(frame.node).segment.to_string()).collect())
    }

    #[test]
    fn test_fixed_beats_later_variable() {
        let tree = tree_with(&["/users/new", "/users/{id}"]);
        assert_eq!(matched(&tree, "/users/new").unwrap(), vec!["users", "new"]);
        assert_eq!(matched(&tree, "/users/42").unwrap(), vec!["users", "{id}"]);
    }

    #[test]
    fn test_earlier_variable_shadows_later_fixed() {
        let tree = tree_with(&["/users/{id}", "/users/new"]);
        assert_eq!(matched(&tree, "/users/new").unwrap(), vec!["users", "{id}"]);
    }

    #[test]
    fn test_backtracks_out_of_dead_branch() {
        let tree = tree_with(&["/a/{x}/c", "/a/b/d"]);
        // {x} is tried first for "b" and fails at depth 2, then fixed "b" succeeds.
        assert_eq!(matched(&tree, "/a/b/d").unwrap(), vec!["a", "b", "d"]);
        assert_eq!(matched(&tree, "/a/b/c").unwrap(), vec!["a", "{x}", "c"]);
        assert!(matched(&tree, "/a/b/e").is_none());
    }

    #[test]
    fn test_falls_through_to_next_root() {
        let tree = tree_with(&["/{first}/x", "/a/y"]);
        assert_eq!(matched(&tree, "/a/y").unwrap(), vec!["a", "y"]);
        assert_eq!(matched(&tree, "/q/x").unwrap(), vec!["{first}", "x"]);
    }

    #[test]
    fn test_segment_count_must_match() {
        let tree = tree_with(&["/a/b"]);
        assert!(matched(&tree, "/a").is_some(), "structural prefix still matches");
        assert!(matched(&tree, "/a/b/c").is_none());
        assert!(matched(&tree, "/b").is_none());
    }

    #[test]
    fn test_root_path() {
        let tree = tree_with(&["/", "/a"]);
        assert_eq!(matched(&tree, "/").unwrap(), vec![""]);
        assert_eq!(matched(&tree, "").unwrap(), vec![""]);
    }

    #[test]
    fn test_stack_is_empty_after_failure() {
        let tree = tree_with(&["/a/b"]);
        let mut bounds = Vec::new();
        split_bounds("/a/x", &mut bounds);
        let mut stack = vec![Frame::new(99)];
        let roots = tree.roots(Method::GET).unwrap();
        assert!(!find_path(&tree, roots, "/a/x", &bounds, &mut stack));
        assert!(stack.is_empty());
    }
}
