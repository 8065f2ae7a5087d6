//! Node identity and the node-id map for Power Query / M documents.
//!
//! This crate is the data model consumed by `pq-inspection`: it has no
//! notion of a caret position or of scope. A parser (not implemented here;
//! see the crate-level docs of `pq-inspection` for the contract it is
//! expected to satisfy) populates a [`NodeIdMap`] by calling
//! [`NodeIdMap::insert_ast`] and [`NodeIdMap::insert_context`] as it builds
//! up a document's concrete syntax, including context nodes for productions
//! it has started but not finished.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]

mod kind;
mod map;
mod node;
mod position;

pub use kind::NodeKind;
pub use map::MapError;
pub use map::NodeIdMap;
pub use node::AstNode;
pub use node::AttributeIndex;
pub use node::ContextNode;
pub use node::NodeId;
pub use node::XorNode;
pub use position::Position;
pub use position::TokenPosition;
pub use position::TokenRange;
