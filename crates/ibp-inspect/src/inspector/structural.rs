//! Tree-sitter based inspection.

use ibp_syntax::{Node, ParseResult, Parser, first_descendant, node_text, preorder};

use super::{Inspector, collapse_whitespace};
use crate::error::InspectError;
use crate::model::{PluginMetadata, RawProperties, RawProperty};
use crate::normalize;

const PARAMETER_KINDS: [&str; 2] = ["parameter_declaration", "optional_parameter_declaration"];

/// Inspector that walks a C++ syntax tree.
///
/// A fresh parser is created for each source, so the inspector itself holds
/// no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralInspector;

impl StructuralInspector {
    /// Creates a structural inspector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse(self, source: &str) -> Result<ParseResult, InspectError> {
        let mut parser = Parser::new()?;
        Ok(parser.parse(source)?)
    }
}

impl Inspector for StructuralInspector {
    fn metadata(&self, source: &str) -> Result<PluginMetadata, InspectError> {
        let parsed = self.parse(source)?;
        let mut metadata = PluginMetadata::default();

        for call in preorder(parsed.root_node()).filter(|node| node.kind() == "call_expression") {
            if let Some((key, value)) = insert_pair(call, parsed.source()) {
                metadata.record(&key, &value);
            }
        }

        if metadata.is_empty() {
            reject_broken(&parsed)?;
        }
        Ok(metadata)
    }

    fn mutators(&self, source: &str) -> Result<RawProperties, InspectError> {
        let parsed = self.parse(source)?;
        let mut properties = RawProperties::new();

        for declarator in
            preorder(parsed.root_node()).filter(|node| node.kind() == "function_declarator")
        {
            if let Some(property) = mutator(declarator, parsed.source()) {
                properties.entry(property.name.clone()).or_insert(property);
            }
        }

        if properties.is_empty() {
            reject_broken(&parsed)?;
        }
        Ok(properties)
    }
}

/// Fails when an empty result coincides with syntax errors, so the caller
/// treats the tree as unusable rather than as a source with no matches.
fn reject_broken(parsed: &ParseResult) -> Result<(), InspectError> {
    if !parsed.has_errors() {
        return Ok(());
    }
    let errors = parsed.errors();
    let line = errors.first().map_or(1, |error| error.line);
    Err(InspectError::BrokenTree {
        count: errors.len(),
        line,
    })
}

/// Recovers `(key, value)` from `<expr>.insert("key", ..."value"...)`.
fn insert_pair(call: Node<'_>, source: &str) -> Option<(String, String)> {
    let callee = call.child_by_field_name("function")?;
    if callee_member(callee, source)? != "insert" {
        return None;
    }

    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let mut named = arguments
        .named_children(&mut cursor)
        .filter(|node| node.kind() != "comment");
    let key_arg = named.next()?;
    let value_arg = named.next()?;

    let key = string_contents(first_descendant(key_arg, "string_literal")?, source);
    if key != "name" && key != "description" {
        return None;
    }
    let value = string_contents(first_descendant(value_arg, "string_literal")?, source);
    Some((key.to_owned(), value.to_owned()))
}

fn callee_member<'src>(callee: Node<'_>, source: &'src str) -> Option<&'src str> {
    match callee.kind() {
        "field_expression" => callee
            .child_by_field_name("field")
            .map(|field| node_text(field, source)),
        "identifier" => Some(node_text(callee, source)),
        _ => None,
    }
}

fn string_contents<'src>(literal: Node<'_>, source: &'src str) -> &'src str {
    let text = node_text(literal, source);
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}

/// Recovers a property from a one-parameter `set*` function declarator.
fn mutator(declarator: Node<'_>, source: &str) -> Option<RawProperty> {
    let identifier = declared_name(declarator.child_by_field_name("declarator")?)?;
    let name = normalize::mutator_name(node_text(identifier, source))?;

    let parameters = declarator.child_by_field_name("parameters")?;
    let mut cursor = parameters.walk();
    let mut params = parameters
        .named_children(&mut cursor)
        .filter(|node| PARAMETER_KINDS.contains(&node.kind()));
    let parameter = params.next()?;
    if params.next().is_some() {
        return None;
    }

    let declared_type = parameter_type(parameter, source)?;
    Some(RawProperty::new(name, declared_type))
}

/// Resolves the unqualified name of a declarator (`Filter::setRadius` →
/// `setRadius`).
fn declared_name(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "identifier" | "field_identifier" => Some(node),
        "qualified_identifier" => declared_name(node.child_by_field_name("name")?),
        _ => None,
    }
}

/// Returns the parameter text without its name or default value.
fn parameter_type(parameter: Node<'_>, source: &str) -> Option<String> {
    let declarator = parameter.child_by_field_name("declarator");
    let end = parameter
        .child_by_field_name("default_value")
        .and(declarator)
        .map_or(parameter.end_byte(), |node| node.end_byte());
    let start = parameter.start_byte();
    let name = declarator.and_then(|node| first_descendant(node, "identifier"));

    let text = match name {
        Some(ident) => {
            let head = source.get(start..ident.start_byte())?;
            let tail = source.get(ident.end_byte()..end)?;
            format!("{head} {tail}")
        }
        None => source.get(start..end)?.to_owned(),
    };

    let collapsed = collapse_whitespace(&text);
    (!collapsed.is_empty()).then_some(collapsed)
}
