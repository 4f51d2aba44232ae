//! An in-memory document tree for AST consumers. The tree is an arena of
//! nodes addressed by index: children are owned by the arena, parent links
//! are plain back-indices that are never serialized, so no reference cycles
//! exist anywhere.

pub use builder::TreeBuilder;
pub use node::{Node, NodeId, NodeKind, TreeDocument};

mod builder;
mod node;

/// Parse a complete document into a tree in one pass.
pub fn parse_to_tree(content: &str) -> TreeDocument {
    let mut parser = stream_markdown::Parser::new(TreeBuilder::new());
    parser.add(content);
    parser.flush();
    parser.into_renderer().finish()
}
