//! Tree-sitter powered C++ front end for the plugin metadata toolchain.
//!
//! This crate wraps the Tree-sitter C++ grammar behind a small API used by the
//! source inspector:
//!
//! - [`Parser`] produces a [`ParseResult`] holding the syntax tree and the
//!   source it was built from.
//! - [`preorder`] walks every node of a tree in document order.
//! - [`node_text`] and [`first_descendant`] give cheap access to the source
//!   behind a node.
//!
//! Tree-sitter is error tolerant: plugin sources that include macros or
//! headers the grammar cannot see still produce a tree, with `ERROR` nodes
//! marking the parts that failed. Callers decide whether a partially broken
//! tree is still useful.
//!
//! # Example
//!
//! ```
//! use ibp_syntax::{Parser, node_text, preorder};
//!
//! let mut parser = Parser::new()?;
//! let parsed = parser.parse("void Filter::setRadius(int radius) {}")?;
//! let names: Vec<&str> = preorder(parsed.root_node())
//!     .filter(|node| node.kind() == "identifier")
//!     .map(|node| node_text(node, parsed.source()))
//!     .collect();
//! assert!(names.contains(&"setRadius"));
//! # Ok::<(), ibp_syntax::SyntaxError>(())
//! ```

mod error;
mod node;
mod parser;
mod position;

pub use error::SyntaxError;
pub use node::{Preorder, first_descendant, node_text, preorder};
pub use parser::{ErrorSite, ParseResult, Parser};
pub use tree_sitter::Node;
