//! Result assembly (C7, §4.7): freezing accumulated state into the public,
//! immutable [`Inspected`] record.

use pq_ast::XorNode;

use crate::scope::AncestorRole;
use crate::scope::Scope;

/// One ancestor of the caret, nearest enclosing first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorDescriptor<'a> {
    /// The ancestor node itself.
    pub node: XorNode<'a>,
    /// This node's role relative to its own parent.
    pub role: AncestorRole,
}

/// The caret-at-identifier outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionIdentifier<'a> {
    /// The identifier at the caret resolved to a binding.
    Local {
        /// The identifier's literal text.
        identifier: String,
        /// The node that binds it.
        definition: XorNode<'a>,
    },
    /// The identifier at the caret did not resolve in scope. Not an error
    /// (§7).
    Undefined {
        /// The identifier's literal text.
        identifier: String,
    },
}

/// The semantic context at a caret position (§3, "Inspected").
///
/// Borrows from the [`pq_ast::NodeIdMap`] the inspection was run against;
/// nothing here outlives that map, and nothing is cached between
/// invocations — each call to [`crate::try_from`] is a pure function of its
/// inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspected<'a> {
    /// Ancestor descriptors, nearest enclosing first.
    pub nodes: Vec<AncestorDescriptor<'a>>,
    /// Identifier bindings visible at the caret.
    pub scope: Scope<'a>,
    /// The caret-at-identifier resolution, if the caret pointed at one.
    pub maybe_position_identifier: Option<PositionIdentifier<'a>>,
}

impl<'a> Inspected<'a> {
    /// The inspection returned when no leaf precedes the caret (§4.4):
    /// empty ancestors, empty scope, no position identifier.
    pub fn default_inspection() -> Self {
        Self {
            nodes: Vec::new(),
            scope: Scope::new(),
            maybe_position_identifier: None,
        }
    }
}
