//! The C++ parser and its output.

use tree_sitter::{Language, Node, Tree};

use crate::error::SyntaxError;
use crate::node::{node_text, preorder};
use crate::position::point_to_one_based;

/// Longest excerpt kept for an error site, in characters.
const EXCERPT_CHARS: usize = 40;

/// A Tree-sitter parser loaded with the C++ grammar.
///
/// One parser can be reused for any number of sources.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Loads the C++ grammar.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParserInitError`] if the grammar was built for
    /// an incompatible Tree-sitter ABI.
    pub fn new() -> Result<Self, SyntaxError> {
        let cpp: Language = tree_sitter_cpp::LANGUAGE.into();
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&cpp)
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses `source`, keeping a copy of it alongside the tree.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::ParseError`] when Tree-sitter gives up without
    /// a tree. Malformed C++ still yields a tree with error nodes.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        self.inner
            .parse(source, None)
            .map(|tree| ParseResult {
                tree,
                source: source.to_owned(),
            })
            .ok_or_else(|| SyntaxError::parse("no syntax tree produced"))
    }
}

/// A syntax tree together with the source it describes.
#[derive(Debug)]
pub struct ParseResult {
    tree: Tree,
    source: String,
}

impl ParseResult {
    /// The translation unit node.
    #[must_use]
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The parsed text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` if any node is an error or was inserted as missing.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.root_node().has_error()
    }

    /// Every error and missing node, in document order.
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorSite> {
        preorder(self.root_node())
            .filter(|node| node.is_error() || node.is_missing())
            .map(|node| ErrorSite::at(node, &self.source))
            .collect()
    }
}

/// Where Tree-sitter had to recover from malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSite {
    /// One-based line.
    pub line: u32,
    /// One-based column.
    pub column: u32,
    /// `true` for a token the parser assumed, such as a closing brace.
    pub missing: bool,
    /// Start of the offending text, on one line.
    pub excerpt: String,
}

impl ErrorSite {
    fn at(node: Node<'_>, source: &str) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        let excerpt = node_text(node, source)
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(EXCERPT_CHARS)
            .collect();
        Self {
            line,
            column,
            missing: node.is_missing(),
            excerpt,
        }
    }
}
