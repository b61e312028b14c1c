use crate::define_parser;
use crate::parser::ParseError;
use tree_sitter::Node;

define_parser!(JS_PARSER, tree_sitter_javascript::LANGUAGE);

/// One top-level statement from a parsed script.
///
/// Only the shape the migration consumes is modeled; every other statement
/// kind collapses into `Other` and is skipped downstream.
#[derive(Debug, Clone)]
pub enum TopLevel {
    Function(FunctionDecl),
    Other,
}

/// A top-level function declaration: its name (absent for anonymous
/// declarations), whether it is `async`, and the exact byte range of the
/// declaration in the original source.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub is_async: bool,
    pub start: usize,
    pub end: usize,
}

/// Parse `source` as a plain (non-module) script and return its top-level
/// statement sequence in source order.
pub fn parse_script(source: &str) -> Result<Vec<TopLevel>, ParseError> {
    let tree = JS_PARSER
        .with(|parser| parser.borrow_mut().parse(source, None))
        .ok_or_else(|| ParseError::Syntax("parser produced no tree".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        let msg = match first_error(root) {
            Some(node) => {
                let pos = node.start_position();
                format!(
                    "syntax error at line {}, column {}",
                    pos.row + 1,
                    pos.column + 1
                )
            }
            None => "syntax error".to_string(),
        };
        return Err(ParseError::Syntax(msg));
    }

    let source_bytes = source.as_bytes();
    let mut cursor = root.walk();
    let mut body = Vec::new();

    for node in root.children(&mut cursor) {
        match node.kind() {
            // Generators are plain declarations too; arrow functions and
            // class methods never appear at statement level under this kind.
            "function_declaration" | "generator_function_declaration" => {
                let name = node
                    .child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source_bytes).ok())
                    .map(str::to_string);
                let is_async = node.child(0).is_some_and(|c| c.kind() == "async");
                body.push(TopLevel::Function(FunctionDecl {
                    name,
                    is_async,
                    start: node.start_byte(),
                    end: node.end_byte(),
                }));
            }
            _ => body.push(TopLevel::Other),
        }
    }

    Ok(body)
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(err) = first_error(child) {
            return Some(err);
        }
    }
    None
}
