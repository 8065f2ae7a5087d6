//! `NodeIdMap`: the document-wide, id-indexed structural index.

use std::collections::HashMap;

use smallvec::SmallVec;
use thiserror::Error;

use crate::kind::NodeKind;
use crate::node::AstNode;
use crate::node::ContextNode;
use crate::node::NodeId;
use crate::node::XorNode;

/// Structural contradictions in a [`NodeIdMap`] that inspection treats as
/// fatal bugs rather than recoverable conditions (§7, "Invariant
/// violations").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    /// `expect_ast`/`expect_context` was called with an id absent from the
    /// map entirely.
    #[error("node {0} does not exist in the node-id map")]
    NodeNotFound(NodeId),
    /// `expect_ast` was called on an id that resolves to a context node (or
    /// vice versa).
    #[error("node {id} was expected to be {expected}, but is not")]
    WrongVariant {
        /// The id that was looked up.
        id: NodeId,
        /// What the caller expected to find.
        expected: &'static str,
    },
}

/// The document-wide index over AST leaves/nodes and parser-context nodes.
///
/// All operations are O(1) or O(children) (§4.3).
#[derive(Debug, Default)]
pub struct NodeIdMap {
    ast_nodes: HashMap<NodeId, AstNode>,
    context_nodes: HashMap<NodeId, ContextNode>,
    parent_by_id: HashMap<NodeId, NodeId>,
    child_ids_by_id: HashMap<NodeId, SmallVec<[NodeId; 4]>>,
}

impl NodeIdMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a completed AST node, linking it to `parent` if given.
    ///
    /// The parent's child list is appended to, so callers must insert
    /// children in source order for the ordering invariant (§3) to hold.
    pub fn insert_ast(&mut self, node: AstNode, parent: Option<NodeId>) {
        let id = node.id();
        self.ast_nodes.insert(id, node);
        self.link(id, parent);
    }

    /// Inserts an in-progress parser-context node, linking it to `parent` if
    /// given.
    pub fn insert_context(&mut self, node: ContextNode, parent: Option<NodeId>) {
        let id = node.id();
        self.context_nodes.insert(id, node);
        self.link(id, parent);
    }

    /// Records the parent/child relationship for a freshly inserted node.
    fn link(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(parent_id) = parent {
            self.parent_by_id.insert(id, parent_id);
            self.child_ids_by_id.entry(parent_id).or_default().push(id);
        }
    }

    /// Looks up a node by id, preferring the AST form if (transiently, during
    /// a context-to-AST promotion) both maps contain an entry for it.
    pub fn xor_node(&self, id: NodeId) -> Option<XorNode<'_>> {
        if let Some(n) = self.ast_nodes.get(&id) {
            Some(XorNode::Ast(n))
        } else {
            self.context_nodes.get(&id).map(XorNode::Context)
        }
    }

    /// Returns the AST node for `id`, or an error if `id` is absent or names
    /// a context node.
    pub fn expect_ast(&self, id: NodeId) -> Result<&AstNode, MapError> {
        match self.ast_nodes.get(&id) {
            Some(n) => Ok(n),
            None => {
                if self.context_nodes.contains_key(&id) {
                    Err(MapError::WrongVariant {
                        id,
                        expected: "an AST node",
                    })
                } else {
                    Err(MapError::NodeNotFound(id))
                }
            }
        }
    }

    /// Returns the context node for `id`, or an error if `id` is absent or
    /// names an AST node.
    pub fn expect_context(&self, id: NodeId) -> Result<&ContextNode, MapError> {
        match self.context_nodes.get(&id) {
            Some(n) => Ok(n),
            None => {
                if self.ast_nodes.contains_key(&id) {
                    Err(MapError::WrongVariant {
                        id,
                        expected: "a context node",
                    })
                } else {
                    Err(MapError::NodeNotFound(id))
                }
            }
        }
    }

    /// Returns the parent of `id` as a [`XorNode`], or `None` if `id` is the
    /// root (or unknown).
    pub fn maybe_parent_xor(&self, id: NodeId) -> Option<XorNode<'_>> {
        let parent_id = *self.parent_by_id.get(&id)?;
        self.xor_node(parent_id)
    }

    /// Returns the parent id of `id`, or `None` if `id` is the root.
    pub fn maybe_parent_id(&self, id: NodeId) -> Option<NodeId> {
        self.parent_by_id.get(&id).copied()
    }

    /// Returns the ordered child ids of `id`. Empty if `id` is unknown or a
    /// leaf.
    pub fn child_ids(&self, id: NodeId) -> &[NodeId] {
        self.child_ids_by_id
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the ordered children of `id` whose kind lies in `kinds`,
    /// preserving source order.
    pub fn child_ids_of_kind(&self, id: NodeId, kinds: &[NodeKind]) -> Vec<NodeId> {
        self.child_ids(id)
            .iter()
            .copied()
            .filter(|child_id| {
                self.xor_node(*child_id)
                    .is_some_and(|x| kinds.contains(&x.kind()))
            })
            .collect()
    }

    /// Returns the deepest, right-most AST leaf in the subtree rooted at
    /// `id` that satisfies `predicate`, or `None` if no such leaf exists.
    ///
    /// Used to locate the last name in a dotted identifier chain.
    pub fn maybe_right_most_leaf_where(
        &self,
        id: NodeId,
        predicate: impl Fn(&AstNode) -> bool,
    ) -> Option<NodeId> {
        let children = self.child_ids(id);
        for child_id in children.iter().rev() {
            if let Some(found) = self.maybe_right_most_leaf_where(*child_id, &predicate) {
                return Some(found);
            }
        }
        match self.ast_nodes.get(&id) {
            Some(n) if n.is_leaf() && predicate(n) => Some(id),
            _ => None,
        }
    }
}
