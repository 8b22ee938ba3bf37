//! Extension traits for derived languages.
//!
//! A dialect adds grammar productions and code-generation rules by
//! implementing these traits and handing instances to
//! [`Parser::with_extensions`](crate::Parser::with_extensions) and
//! [`Generator::with_extensions`](crate::Generator::with_extensions).
//! Rules are consulted in registration order; the first `Some` wins and the
//! base behavior runs only when every rule declines. The base compiler has
//! no knowledge of any dialect.

use crate::ast::{Expression, Statement};
use crate::generator::{GenerateError, Generator};
use crate::parser::{ParseError, Parser};

/// A grammar extension.
///
/// Both hooks look at the parser's current token and either claim the
/// construct (`Some(...)`, consuming tokens through the parser's public
/// token management) or decline (`None`, leaving the position untouched).
pub trait SyntaxExtension {
    /// Try to parse a statement starting at the current token.
    fn parse_statement(&self, parser: &mut Parser) -> Option<Result<Statement, ParseError>>;

    /// Try to parse a primary expression starting at the current token.
    fn parse_primary(&self, _parser: &mut Parser) -> Option<Result<Expression, ParseError>> {
        None
    }
}

/// A code-generation extension.
///
/// Each hook returns `Some(output)` to claim the node or name, or `None` to
/// fall through to the next rule and finally the base generator.
pub trait CodegenExtension {
    /// Emit a statement, typically by downcasting a
    /// [`Statement::Custom`](crate::ast::Statement::Custom) node.
    fn visit_statement(
        &self,
        _generator: &Generator<'_>,
        _stmt: &Statement,
    ) -> Option<Result<String, GenerateError>> {
        None
    }

    /// Emit an expression.
    fn visit_expression(
        &self,
        _generator: &Generator<'_>,
        _expr: &Expression,
    ) -> Option<Result<String, GenerateError>> {
        None
    }

    /// Translate a member access `object.property` to a replacement text.
    fn resolve_access(&self, _object: &str, _property: &str) -> Option<String> {
        None
    }

    /// Translate a bare call `name(...)` to a replacement callee text.
    fn resolve_call(&self, _name: &str) -> Option<String> {
        None
    }
}
