//! Parse error types.

use crate::token::{Span, Token};
use std::fmt;

/// A parse error with location and contextual information.
///
/// Parsing is fail-fast: the first error aborts the file's compilation with
/// no recovery and no partial AST.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,

    /// Source location of the error
    pub span: Span,

    /// Human-readable error message
    pub message: String,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token found
    UnexpectedToken { expected: Vec<Token>, found: Token },

    /// Unexpected end of file
    UnexpectedEof { expected: Vec<Token> },

    /// Invalid syntax
    InvalidSyntax { reason: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Create an "unexpected token" error.
    pub fn unexpected_token(expected: Vec<Token>, found: Token, span: Span) -> Self {
        let message = if expected.len() == 1 {
            format!("Expected '{}', found '{}'", expected[0], found)
        } else {
            let names: Vec<String> = expected.iter().map(|t| format!("'{}'", t)).collect();
            format!("Expected one of {}, found '{}'", names.join(", "), found)
        };

        Self {
            kind: ParseErrorKind::UnexpectedToken { expected, found },
            span,
            message,
        }
    }

    /// Create an "unexpected EOF" error.
    pub fn unexpected_eof(expected: Vec<Token>, span: Span) -> Self {
        let message = if expected.len() == 1 {
            format!("Unexpected end of file, expected '{}'", expected[0])
        } else {
            let names: Vec<String> = expected.iter().map(|t| format!("'{}'", t)).collect();
            format!("Unexpected end of file, expected one of {}", names.join(", "))
        };

        Self {
            kind: ParseErrorKind::UnexpectedEof { expected },
            span,
            message,
        }
    }

    /// Create an "invalid syntax" error.
    pub fn invalid_syntax(reason: impl Into<String>, span: Span) -> Self {
        let reason = reason.into();
        Self {
            kind: ParseErrorKind::InvalidSyntax {
                reason: reason.clone(),
            },
            span,
            message: format!("Invalid syntax: {}", reason),
        }
    }
}
