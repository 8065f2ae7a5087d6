//! Position-driven semantic inspection for Power Query / M documents.
//!
//! Given a parsed document (a [`pq_ast::NodeIdMap`] plus the list of its leaf
//! ids) and a caret [`pq_ast::Position`], [`try_from`] produces the semantic
//! context at that caret: the enclosing syntactic ancestors, the in-scope
//! identifier bindings, and — if the caret points at an identifier — a
//! resolution to the AST node that defines it.
//!
//! # Scheduling model
//!
//! [`try_from`] is synchronous and pure: it reads `map`, writes only its own
//! accumulator, and returns. There is no caching between invocations and no
//! cross-document resolution. Multiple inspections may run concurrently
//! against the same [`pq_ast::NodeIdMap`] as long as it is not being mutated
//! (i.e. the producer has finished populating it); the map is read-only
//! during inspection and may be safely aliased by many concurrent readers.
//!
//! # Contract this crate relies on from a parser
//!
//! This crate does not parse M source itself — lexing and parsing are
//! external collaborators named only by their contract (spec §1, §6): a
//! parser populates a [`pq_ast::NodeIdMap`] (inserting AST leaves/nodes and,
//! for productions it was interrupted mid-way through, context nodes) and
//! supplies the list of all leaf ids. Every leaf id must appear in that list.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]

mod driver;
mod error;
mod leaf;
mod result;
mod scope;
mod visitor;

use pq_ast::NodeId;
use pq_ast::NodeIdMap;
use pq_ast::NodeKind;
use pq_ast::Position;
use pq_ast::XorNode;
use tracing::debug;
use tracing::instrument;

pub use error::InspectionError;
pub use error::TriedInspection;
pub use result::AncestorDescriptor;
pub use result::Inspected;
pub use result::PositionIdentifier;
pub use scope::AncestorRole;
pub use scope::Scope;

/// Produces the semantic context at `position` within the document described
/// by `map` and `leaf_ids` (§6, the entry point).
///
/// Returns the default (empty) inspection, not an error, if no leaf precedes
/// `position` (§4.4, §7).
#[instrument(level = "debug", skip(map, leaf_ids))]
pub fn try_from<'a>(
    position: Position,
    map: &'a NodeIdMap,
    leaf_ids: &[NodeId],
) -> TriedInspection<'a> {
    let Some(leaf_id) = leaf::select_leaf(position, leaf_ids, map) else {
        debug!(%position, "no leaf precedes the caret; returning default inspection");
        return Ok(Inspected::default_inspection());
    };

    let root = map
        .xor_node(leaf_id)
        .ok_or_else(|| InspectionError::from(pq_ast::MapError::NodeNotFound(leaf_id)))?;
    debug!(leaf = %leaf_id, "selected caret leaf");

    let (caret_identifier, caret_identifier_node_id) = effective_caret_identifier(map, root);

    let mut state = visitor::State::new(caret_identifier.clone(), caret_identifier_node_id);
    driver::traverse(
        &mut state,
        root,
        map,
        driver::expand_to_parent,
        visitor::visit_ancestor,
        |_| false,
    )?;

    let visitor::State {
        nodes,
        scope,
        mut maybe_position_identifier,
        ..
    } = state;

    if maybe_position_identifier.is_none() {
        if let Some(identifier) = caret_identifier {
            maybe_position_identifier = Some(PositionIdentifier::Undefined { identifier });
        }
    }

    Ok(Inspected {
        nodes,
        scope,
        maybe_position_identifier,
    })
}

/// Determines the identifier text (if any) that the caret leaf names, and the
/// id of the node that text belongs to, handling the `@name`
/// recursive-self-reference sugar (§3, "Identifier kinds"): the effective
/// identifier of an `@` constant whose parent is an `IdentifierExpression` is
/// the sibling identifier's text and node id.
fn effective_caret_identifier(map: &NodeIdMap, leaf: XorNode<'_>) -> (Option<String>, Option<NodeId>) {
    if leaf.kind().is_identifier_leaf() {
        return (leaf.leaf_text().map(str::to_string), Some(leaf.id()));
    }

    if leaf.kind() != NodeKind::Constant || leaf.leaf_text() != Some("@") {
        return (None, None);
    }

    let Some(parent) = map.maybe_parent_xor(leaf.id()) else {
        return (None, None);
    };
    if parent.kind() != NodeKind::IdentifierExpression {
        return (None, None);
    }

    let Some(&sibling_id) = map
        .child_ids_of_kind(parent.id(), &[NodeKind::Identifier, NodeKind::GeneralizedIdentifier])
        .first()
    else {
        return (None, None);
    };
    let text = map.xor_node(sibling_id).and_then(XorNode::leaf_text).map(str::to_string);
    (text, Some(sibling_id))
}
