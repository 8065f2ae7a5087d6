//! The inspection visitor (C6, §4.6): per-ancestor scope/binding extraction
//! and position-identifier resolution.

use std::collections::HashMap;

use pq_ast::NodeId;
use pq_ast::NodeIdMap;
use pq_ast::NodeKind;
use pq_ast::XorNode;
use tracing::trace;

use crate::error::InspectionError;
use crate::result::AncestorDescriptor;
use crate::result::PositionIdentifier;
use crate::scope::name_value_pair;
use crate::scope::AncestorRole;
use crate::scope::Scope;

/// The identifier kinds that can appear on the left of a name/value pair.
const NAME_KINDS: [NodeKind; 2] = [NodeKind::Identifier, NodeKind::GeneralizedIdentifier];

/// Mutable accumulator threaded through the ancestor walk.
pub(crate) struct State<'a> {
    /// The literal text of the identifier at the caret, if the caret leaf is
    /// an identifier (or an `@` whose parent is an `IdentifierExpression`).
    pub(crate) caret_identifier: Option<String>,
    /// The id of the identifier node `caret_identifier` names: the caret leaf
    /// itself in the plain case, or the sibling identifier when the caret sat
    /// on an `@`. `None` when the caret is not on an identifier at all.
    caret_identifier_node_id: Option<NodeId>,
    /// Set while walking up from inside an `@name` self-reference, cleared
    /// once the nearest enclosing let-binding or section-member resolves it.
    pending_self_reference: Option<String>,
    /// The id of the previously visited node, used to determine whether a
    /// let-expression ancestor was reached via one of its own bindings' RHS
    /// (only preceding bindings visible) or via its body (all visible).
    came_from: Option<NodeId>,
    /// `true` only for the very first node visited (the caret leaf itself),
    /// which contributes no ancestor descriptor of its own.
    is_root: bool,
    /// For each identifier node on the LHS of a let/section/record binding,
    /// the binding's value node (§4.6 step 4).
    assignment_key_node_id_map: HashMap<NodeId, NodeId>,
    /// Accumulated output.
    pub(crate) nodes: Vec<AncestorDescriptor<'a>>,
    pub(crate) scope: Scope<'a>,
    pub(crate) maybe_position_identifier: Option<PositionIdentifier<'a>>,
}

impl<'a> State<'a> {
    /// Creates a fresh accumulator for one inspection call.
    pub(crate) fn new(caret_identifier: Option<String>, caret_identifier_node_id: Option<NodeId>) -> Self {
        Self {
            caret_identifier,
            caret_identifier_node_id,
            pending_self_reference: None,
            came_from: None,
            is_root: true,
            assignment_key_node_id_map: HashMap::new(),
            nodes: Vec::new(),
            scope: Scope::new(),
            maybe_position_identifier: None,
        }
    }

    /// Inserts a scope binding unless one is already present.
    ///
    /// A name already present in scope was contributed by a nearer (deeper)
    /// ancestor and shadows this one (§9, "Shadowing direction").
    fn insert_scope(&mut self, name: String, node: XorNode<'a>) {
        self.scope.entry(name).or_insert(node);
    }
}

/// Visits one ancestor, performing the four ordered steps of §4.6.
pub(crate) fn visit_ancestor<'a>(
    state: &mut State<'a>,
    map: &'a NodeIdMap,
    node: XorNode<'a>,
) -> Result<(), InspectionError> {
    // Step 1: ancestor descriptor (skipped for the caret leaf itself).
    if !state.is_root {
        let role = match map.maybe_parent_xor(node.id()) {
            Some(parent) => describe_role(map, node, parent),
            None => AncestorRole::Other,
        };
        state.nodes.push(AncestorDescriptor { node, role });
    }

    // Step 2: scope contribution.
    match node.kind() {
        NodeKind::EachExpression => inject_each_parameter(state, map, node.id()),
        NodeKind::FunctionExpression => inject_function_parameters(state, map, node.id()),
        NodeKind::LetExpression => inject_let_bindings(state, map, node.id()),
        NodeKind::RecordExpression | NodeKind::RecordLiteral => inject_record_fields(state, map, node.id()),
        NodeKind::Section => inject_section_members(state, map, node.id()),
        NodeKind::IdentifierExpression => detect_self_reference(state, map, node.id()),
        _ => {}
    }

    // Step 3: position-identifier resolution. Once set, never overwritten.
    if state.maybe_position_identifier.is_none() {
        if let Some(identifier) = state.caret_identifier.clone() {
            if let Some(&definition) = state.scope.get(&identifier) {
                trace!(%identifier, "resolved caret identifier in scope");
                state.maybe_position_identifier = Some(PositionIdentifier::Local {
                    identifier,
                    definition,
                });
            } else if let Some(definition) = state
                .caret_identifier_node_id
                .and_then(|id| state.assignment_key_node_id_map.get(&id))
                .and_then(|&value_id| map.xor_node(value_id))
            {
                // The caret sits on the name in a binding's own LHS, which the
                // RHS-visibility rule (step 2) keeps out of `scope` until
                // after its own definition. Step 4's bookkeeping resolves it
                // without re-walking the tree.
                trace!(%identifier, "resolved caret identifier via assignment-key bookkeeping");
                state.maybe_position_identifier = Some(PositionIdentifier::Local {
                    identifier,
                    definition,
                });
            }
        }
    }

    state.came_from = Some(node.id());
    state.is_root = false;
    Ok(())
}

/// Injects the implicit `_` parameter of an each-expression.
fn inject_each_parameter<'a>(state: &mut State<'a>, map: &'a NodeIdMap, each_id: NodeId) {
    let Some(&param_id) = map.child_ids_of_kind(each_id, &[NodeKind::Parameter]).first() else {
        // A context node mid-parse may not have its implicit parameter yet.
        return;
    };
    if let Some(param_node) = map.xor_node(param_id) {
        state.insert_scope("_".to_string(), param_node);
    }
}

/// Injects each formal parameter of a function-expression.
fn inject_function_parameters<'a>(state: &mut State<'a>, map: &'a NodeIdMap, func_id: NodeId) {
    for param_id in map.child_ids_of_kind(func_id, &[NodeKind::Parameter]) {
        let Some(param_node) = map.xor_node(param_id) else {
            continue;
        };
        let Some(text) = param_node.leaf_text() else {
            continue;
        };
        state.insert_scope(text.to_string(), param_node);
    }
}

/// Injects let-bindings visible at the caret, honoring the RHS-visibility
/// rule, and records assignment-key bookkeeping / resolves a pending
/// self-reference for every binding regardless of visibility.
fn inject_let_bindings<'a>(state: &mut State<'a>, map: &'a NodeIdMap, let_id: NodeId) {
    let pairs = map.child_ids_of_kind(let_id, &[NodeKind::IdentifierPairedExpression]);
    // If we ascended from one of the let's own bindings, only the bindings
    // textually preceding it are visible; otherwise (we ascended from the
    // `in` body) every binding is visible.
    let rhs_index = state.came_from.and_then(|prev| pairs.iter().position(|&p| p == prev));

    for (index, &pair_id) in pairs.iter().enumerate() {
        let Some((name, value_id)) = name_value_pair(map, pair_id, &NAME_KINDS) else {
            continue;
        };
        let Some(value_node) = map.xor_node(value_id) else {
            continue;
        };

        if let Some(&lhs_id) = map.child_ids_of_kind(pair_id, &NAME_KINDS).first() {
            state.assignment_key_node_id_map.insert(lhs_id, value_id);
        }

        if state.pending_self_reference.as_deref() == Some(name.as_str()) {
            state.insert_scope(name.clone(), value_node);
            state.pending_self_reference = None;
            continue;
        }

        let visible = match rhs_index {
            Some(rhs) => index < rhs,
            None => true,
        };
        if visible {
            state.insert_scope(name, value_node);
        }
    }
}

/// Injects record/record-literal field names, all unconditionally visible.
fn inject_record_fields<'a>(state: &mut State<'a>, map: &'a NodeIdMap, record_id: NodeId) {
    for pair_id in map.child_ids_of_kind(record_id, &[NodeKind::GeneralizedIdentifierPairedExpression]) {
        let Some((name, value_id)) = name_value_pair(map, pair_id, &NAME_KINDS) else {
            continue;
        };
        if let Some(value_node) = map.xor_node(value_id) {
            state.insert_scope(name, value_node);
        }
    }
}

/// Injects section top-level member names.
fn inject_section_members<'a>(state: &mut State<'a>, map: &'a NodeIdMap, section_id: NodeId) {
    for member_id in map.child_ids_of_kind(section_id, &[NodeKind::SectionMember]) {
        let Some((name, value_id)) = name_value_pair(map, member_id, &NAME_KINDS) else {
            continue;
        };
        let Some(value_node) = map.xor_node(value_id) else {
            continue;
        };

        if let Some(&lhs_id) = map.child_ids_of_kind(member_id, &NAME_KINDS).first() {
            state.assignment_key_node_id_map.insert(lhs_id, value_id);
        }

        if state.pending_self_reference.as_deref() == Some(name.as_str()) {
            state.insert_scope(name.clone(), value_node);
            state.pending_self_reference = None;
            continue;
        }

        state.insert_scope(name, value_node);
    }
}

/// Detects `@name`: a leading `@` constant child marks this
/// identifier-expression as a recursive self-reference. Records the name so
/// the nearest enclosing let-binding or section-member can bind it to
/// itself, supporting recursion.
fn detect_self_reference(state: &mut State<'_>, map: &NodeIdMap, expr_id: NodeId) {
    let has_at_sign = map
        .child_ids_of_kind(expr_id, &[NodeKind::Constant])
        .iter()
        .any(|&id| map.xor_node(id).and_then(XorNode::leaf_text) == Some("@"));
    if !has_at_sign {
        return;
    }
    let Some(&name_id) = map.child_ids_of_kind(expr_id, &NAME_KINDS).first() else {
        return;
    };
    if let Some(text) = map.xor_node(name_id).and_then(XorNode::leaf_text) {
        state.pending_self_reference = Some(text.to_string());
    }
}

/// Computes the syntactic role `node` plays relative to `parent` (§3,
/// "nodes").
fn describe_role<'a>(map: &'a NodeIdMap, node: XorNode<'a>, parent: XorNode<'a>) -> AncestorRole {
    match parent.kind() {
        NodeKind::InvokeExpression => {
            let args = map.child_ids(parent.id());
            let index = args
                .iter()
                .skip(1) // the first child is the invoked expression itself
                .position(|&id| id == node.id());
            match index {
                Some(index) => AncestorRole::FunctionArgument { index },
                None => AncestorRole::Other,
            }
        }
        NodeKind::LetExpression => match node.kind() {
            NodeKind::IdentifierPairedExpression => {
                match name_value_pair(map, node.id(), &NAME_KINDS) {
                    Some((name, _)) => AncestorRole::LetBindingRhs { name },
                    None => AncestorRole::Other,
                }
            }
            _ => AncestorRole::LetBody,
        },
        NodeKind::RecordExpression | NodeKind::RecordLiteral => match node.kind() {
            NodeKind::GeneralizedIdentifierPairedExpression => {
                match name_value_pair(map, node.id(), &NAME_KINDS) {
                    Some((name, _)) => AncestorRole::RecordFieldValue { name },
                    None => AncestorRole::Other,
                }
            }
            _ => AncestorRole::Other,
        },
        NodeKind::Section => match node.kind() {
            NodeKind::SectionMember => match name_value_pair(map, node.id(), &NAME_KINDS) {
                Some((name, _)) => AncestorRole::SectionMemberValue { name },
                None => AncestorRole::Other,
            },
            _ => AncestorRole::Other,
        },
        NodeKind::EachExpression => AncestorRole::EachBody,
        _ => AncestorRole::Other,
    }
}
