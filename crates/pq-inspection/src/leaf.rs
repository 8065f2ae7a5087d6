//! The leaf selector (C4, §4.4).

use pq_ast::NodeId;
use pq_ast::NodeIdMap;
use pq_ast::Position;

/// Picks the leaf at or nearest-left-of `position`.
///
/// A leaf whose start exactly equals `position` is *not* selected — the
/// caret sits to the immediate left of the character at `position`, so the
/// leaf immediately preceding it is the one selected. Returns `None` if no
/// leaf precedes `position` at all, in which case inspection should return
/// the default (empty) inspection without traversing (§4.4).
pub fn select_leaf(position: Position, leaf_ids: &[NodeId], map: &NodeIdMap) -> Option<NodeId> {
    let mut best: Option<(NodeId, u32)> = None;

    for &leaf_id in leaf_ids {
        let Ok(node) = map.expect_ast(leaf_id) else {
            continue;
        };
        let Some(range) = node.token_range() else {
            continue;
        };
        let start = range.start.as_position();
        if !start.strictly_precedes(&position) {
            continue;
        }

        let code_unit = range.start.code_unit;
        match best {
            None => best = Some((leaf_id, code_unit)),
            Some((_, best_code_unit)) if code_unit > best_code_unit => {
                best = Some((leaf_id, code_unit))
            }
            Some(_) => {}
        }
    }

    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pq_ast::AstNode;
    use pq_ast::NodeKind;
    use pq_ast::TokenPosition;
    use pq_ast::TokenRange;

    fn leaf(map: &mut NodeIdMap, id: u32, col: u32, len: u32) -> NodeId {
        let node_id = NodeId::new(id);
        let start = TokenPosition::new(0, col, col);
        let end = TokenPosition::new(0, col + len, col + len);
        map.insert_ast(
            AstNode::new_leaf(node_id, NodeKind::Identifier, None, TokenRange::new(start, end), "x"),
            None,
        );
        node_id
    }

    #[test]
    fn selects_nearest_preceding_leaf() {
        let mut map = NodeIdMap::new();
        let a = leaf(&mut map, 1, 0, 1);
        let b = leaf(&mut map, 2, 5, 1);
        let ids = vec![a, b];

        assert_eq!(select_leaf(Position::new(0, 3), &ids, &map), Some(a));
        assert_eq!(select_leaf(Position::new(0, 6), &ids, &map), Some(b));
    }

    #[test]
    fn caret_on_leaf_start_selects_predecessor() {
        let mut map = NodeIdMap::new();
        let a = leaf(&mut map, 1, 0, 1);
        let b = leaf(&mut map, 2, 5, 1);
        let ids = vec![a, b];

        // The caret sits exactly at b's start, so b is not selected.
        assert_eq!(select_leaf(Position::new(0, 5), &ids, &map), Some(a));
    }

    #[test]
    fn no_preceding_leaf_returns_none() {
        let mut map = NodeIdMap::new();
        let a = leaf(&mut map, 1, 5, 1);
        let ids = vec![a];

        assert_eq!(select_leaf(Position::new(0, 0), &ids, &map), None);
    }
}
