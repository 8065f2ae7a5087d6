//! The node-kind enumeration consumed from the parser.
//!
//! This is the subset of M node kinds the inspection engine needs to know
//! about by name (§6 of the spec lists these as the minimum the parser must
//! produce). A real parser's `NodeKind` enumeration is larger; inspection
//! only branches on the kinds below, treating everything else uniformly via
//! [`crate::XorNode`]/[`crate::NodeIdMap`] navigation.

use std::fmt;

/// The kind of an AST or parser-context node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NodeKind {
    /// A literal constant token, e.g. `@`, `+`, `in`, `each`.
    Constant,
    /// A plain identifier token.
    Identifier,
    /// An identifier that may be a quoted/generalized name (record and
    /// section-member keys).
    GeneralizedIdentifier,
    /// `identifier` or `@identifier`, wrapping an [`NodeKind::Identifier`]
    /// and, for the recursive form, a leading `@` [`NodeKind::Constant`].
    IdentifierExpression,
    /// `each <body>`.
    EachExpression,
    /// `(params) => body`.
    FunctionExpression,
    /// A single formal parameter of a [`NodeKind::FunctionExpression`] or the
    /// implicit parameter of an [`NodeKind::EachExpression`].
    Parameter,
    /// `let bindings in body`.
    LetExpression,
    /// `name = value`, used for let-bindings.
    IdentifierPairedExpression,
    /// `[ fields ]`.
    RecordExpression,
    /// `[ fields ]` written as a literal (no distinct shape from
    /// [`NodeKind::RecordExpression`] for inspection purposes).
    RecordLiteral,
    /// `name = value`, used for record fields and section members.
    GeneralizedIdentifierPairedExpression,
    /// A top-level `section ... ;` document.
    Section,
    /// A single `name = value;` member of a [`NodeKind::Section`].
    SectionMember,
    /// A binary or unary operator expression; inspection does not
    /// distinguish these internally, but they appear in ancestor chains.
    ArithmeticExpression,
    /// `fn(args)`.
    InvokeExpression,
    /// An ordered list of [`NodeKind::FunctionExpression`] parameters.
    ParameterList,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl NodeKind {
    /// Whether this kind is one of the two identifier leaf kinds (§3,
    /// "Identifier kinds").
    pub fn is_identifier_leaf(self) -> bool {
        matches!(self, Self::Identifier | Self::GeneralizedIdentifier)
    }
}
