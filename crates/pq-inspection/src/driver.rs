//! The generic ancestor traversal driver (C5, §4.5).
//!
//! The driver is deliberately generic over the expansion function so the
//! same walk can later back a sibling-search or subtree-search without
//! change; for inspection, expansion is always "the parent, if any",
//! reducing the breadth-first walk to a straight line upward. The driver
//! never recurses through the same node twice — callers guarantee
//! acyclicity (parent chains are trees).

use std::collections::VecDeque;

use pq_ast::NodeIdMap;
use pq_ast::XorNode;

use crate::error::InspectionError;

/// Visits `root`, then each node yielded by `expand`, breadth-first, until
/// the frontier is empty, `early_exit` reports true, or `visit` fails.
///
/// On failure, propagates the error immediately; the caller receives no
/// partial `state`.
pub fn traverse<'a, S>(
    state: &mut S,
    root: XorNode<'a>,
    map: &'a NodeIdMap,
    mut expand: impl FnMut(&'a NodeIdMap, XorNode<'a>) -> Vec<XorNode<'a>>,
    mut visit: impl FnMut(&mut S, &'a NodeIdMap, XorNode<'a>) -> Result<(), InspectionError>,
    mut early_exit: impl FnMut(&S) -> bool,
) -> Result<(), InspectionError> {
    let mut frontier: VecDeque<XorNode<'a>> = VecDeque::new();
    frontier.push_back(root);

    while let Some(node) = frontier.pop_front() {
        visit(state, map, node)?;
        if early_exit(state) {
            return Ok(());
        }
        for next in expand(map, node) {
            frontier.push_back(next);
        }
    }

    Ok(())
}

/// The expansion function used for inspection: the node's parent, if any.
pub fn expand_to_parent<'a>(map: &'a NodeIdMap, node: XorNode<'a>) -> Vec<XorNode<'a>> {
    map.maybe_parent_xor(node.id()).into_iter().collect()
}
