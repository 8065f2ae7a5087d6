//! Scope accumulation: the `name = value` pair helper shared by let-bindings,
//! record/section fields, and the public [`Scope`] / [`AncestorRole`] types.

use indexmap::IndexMap;
use pq_ast::NodeId;
use pq_ast::NodeIdMap;
use pq_ast::NodeKind;
use pq_ast::XorNode;

/// The in-scope identifier bindings visible at the caret.
///
/// Keys are unique identifier texts; iteration order is insertion order,
/// which — because ancestors are visited nearest-first and scope insertion
/// uses first-write-wins — also reflects the shadowing order closest binding
/// first (§9, "Shadowing direction").
pub type Scope<'a> = IndexMap<String, XorNode<'a>>;

/// The syntactic role an ancestor plays relative to its own parent.
///
/// Captures enough position to let a consumer reason about autocompletion
/// context (§3, "nodes").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AncestorRole {
    /// The `index`-th positional argument of a function-expression parameter
    /// list.
    FunctionArgument {
        /// Zero-based argument position.
        index: usize,
    },
    /// The value expression of a record field named `name`.
    RecordFieldValue {
        /// The field's name.
        name: String,
    },
    /// The right-hand side of the let-binding named `name`.
    LetBindingRhs {
        /// The binding's name.
        name: String,
    },
    /// The `in` body of a let-expression.
    LetBody,
    /// The body of an each-expression.
    EachBody,
    /// The value expression of a section member named `name`.
    SectionMemberValue {
        /// The member's name.
        name: String,
    },
    /// A role not captured by a more specific variant above.
    Other,
}

/// Extracts the `(name, value)` shape shared by let-bindings
/// (`IdentifierPairedExpression`), record/section fields
/// (`GeneralizedIdentifierPairedExpression`), and section members
/// (`SectionMember`): a name leaf of one of `name_kinds` plus exactly one
/// other child acting as the value.
///
/// Returns `None` (never an error) if `pair_id`'s children don't yet contain
/// both a name and a value — this is the normal shape of a context node
/// whose production the parser has not finished (§9, "Mixed AST/Context
/// handling").
pub fn name_value_pair(
    map: &NodeIdMap,
    pair_id: NodeId,
    name_kinds: &[NodeKind],
) -> Option<(String, NodeId)> {
    let name_id = *map.child_ids_of_kind(pair_id, name_kinds).first()?;
    let name_text = map.xor_node(name_id)?.leaf_text()?.to_string();

    let value_id = map
        .child_ids(pair_id)
        .iter()
        .copied()
        .find(|&child_id| child_id != name_id)?;

    Some((name_text, value_id))
}
