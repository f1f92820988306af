//! DOM arena: slotmap-backed element tree with attribute, class and text queries.

pub mod attrs;
pub mod markup;
pub mod node;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::Dom;
