//! Recursive descent parser for the edit-and-continue syntax subset.
//!
//! Produces an immutable [`SyntaxTree`]. Parsing never fails: malformed input
//! yields missing (zero-width) tokens and `Error` nodes, and the problems are
//! reported in [`ParseOutput::errors`].
//!
//! # Grammar Coverage
//!
//! - Type declarations: classes, structs, interfaces, records and record
//!   structs, with primary-constructor parameter lists and base lists
//! - Members: fields, methods, constructors with `this(...)`/`base(...)`
//!   initializers, properties and indexers with accessor lists, arrow bodies
//!   and property initializers
//! - Statements: blocks, locals, local functions, control flow, `yield`,
//!   top-level (global) statements
//! - Expressions: operators, invocations, member/element access, object
//!   creation, `await`, simple and parenthesized lambdas

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;
pub use recovery::TokenSet;

use enc_ir::SyntaxTree;

/// Result of parsing a source file.
#[derive(Debug)]
pub struct ParseOutput {
    pub tree: SyntaxTree,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    /// Check if any lexical or syntax errors were reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a complete source file.
pub fn parse(source: &str) -> ParseOutput {
    let lexed = enc_lexer::lex(source);
    let mut parser = grammar::Parser::new(source, &lexed.tokens);
    parser.compilation_unit();
    let (tree, syntax_errors) = parser.finish();

    let mut errors: Vec<ParseError> = lexed.errors.into_iter().map(ParseError::from).collect();
    errors.extend(syntax_errors);

    tracing::debug!(
        nodes = tree.node_count(),
        tokens = tree.token_count(),
        errors = errors.len(),
        "parsed source"
    );
    ParseOutput { tree, errors }
}

#[cfg(test)]
mod tests;
