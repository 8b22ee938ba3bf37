//! Recursive-descent parser for the Chord language.
//!
//! The parser owns the token stream and a per-file [`SymbolTable`] that it
//! fills as a side effect of parsing declarations. It is fail-fast: the
//! first error aborts with no recovery and no partial AST.
//!
//! Token management is public so [`SyntaxExtension`] rules can drive the
//! same machinery the base grammar uses.

mod error;
mod expr;
mod stmt;

pub use error::{ParseError, ParseErrorKind};

use crate::ast::Statement;
use crate::extension::SyntaxExtension;
use crate::symbols::SymbolTable;
use crate::token::{Span, Token};
use std::rc::Rc;

pub struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
    symbols: SymbolTable,
    extensions: Vec<Rc<dyn SyntaxExtension>>,
    /// Name of the class whose body is being parsed, for constructor
    /// detection.
    class_context: Option<String>,
}

impl Parser {
    pub fn new(tokens: Vec<(Token, Span)>) -> Self {
        Self::with_extensions(tokens, Vec::new())
    }

    /// Build a parser with grammar extension rules, consulted in order
    /// before every base statement and primary-expression production.
    pub fn with_extensions(
        tokens: Vec<(Token, Span)>,
        extensions: Vec<Rc<dyn SyntaxExtension>>,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            symbols: SymbolTable::new(),
            extensions,
            class_context: None,
        }
    }

    /// Parse the whole token stream into top-level statements plus the
    /// symbol table accumulated along the way.
    pub fn parse(mut self) -> Result<(Vec<Statement>, SymbolTable), ParseError> {
        let mut statements = Vec::new();
        while !self.at_eof() {
            statements.push(self.parse_statement()?);
        }
        Ok((statements, self.symbols))
    }

    // ===== Token management =====

    /// The current token. `Eof` once the stream is exhausted.
    pub fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|(token, _)| token)
            .unwrap_or(&Token::Eof)
    }

    pub fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| *span)
            .unwrap_or_else(|| {
                self.tokens
                    .last()
                    .map(|(_, span)| *span)
                    .unwrap_or_else(|| Span::new(0, 0, 1, 1))
            })
    }

    /// Look one token ahead without consuming.
    pub fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos + 1)
            .map(|(token, _)| token)
            .unwrap_or(&Token::Eof)
    }

    /// Consume and return the current token.
    pub fn advance(&mut self) -> (Token, Span) {
        let result = self
            .tokens
            .get(self.pos)
            .cloned()
            .unwrap_or((Token::Eof, self.current_span()));
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        result
    }

    /// Whether the current token has the same discriminant as `token`
    /// (payload variants match regardless of payload).
    pub fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(token)
    }

    pub fn check_any(&self, tokens: &[Token]) -> bool {
        tokens.iter().any(|token| self.check(token))
    }

    /// Consume the current token if it matches, error otherwise.
    pub fn expect(&mut self, token: Token) -> Result<Span, ParseError> {
        if self.check(&token) {
            Ok(self.advance().1)
        } else if self.at_eof() {
            Err(ParseError::unexpected_eof(vec![token], self.current_span()))
        } else {
            Err(ParseError::unexpected_token(
                vec![token],
                self.current().clone(),
                self.current_span(),
            ))
        }
    }

    pub fn expect_any(&mut self, tokens: &[Token]) -> Result<(Token, Span), ParseError> {
        if self.check_any(tokens) {
            Ok(self.advance())
        } else if self.at_eof() {
            Err(ParseError::unexpected_eof(
                tokens.to_vec(),
                self.current_span(),
            ))
        } else {
            Err(ParseError::unexpected_token(
                tokens.to_vec(),
                self.current().clone(),
                self.current_span(),
            ))
        }
    }

    /// Consume an identifier and return its name.
    pub fn expect_identifier(&mut self) -> Result<(String, Span), ParseError> {
        match self.advance() {
            (Token::Identifier(name), span) => Ok((name, span)),
            (Token::Eof, span) => Err(ParseError::unexpected_eof(
                vec![Token::Identifier(String::new())],
                span,
            )),
            (found, span) => Err(ParseError::unexpected_token(
                vec![Token::Identifier(String::new())],
                found,
                span,
            )),
        }
    }

    /// Consume a text literal and return its decoded contents.
    pub fn expect_text(&mut self) -> Result<(String, Span), ParseError> {
        match self.advance() {
            (Token::Text(value), span) => Ok((value, span)),
            (Token::Eof, span) => Err(ParseError::unexpected_eof(
                vec![Token::Text(String::new())],
                span,
            )),
            (found, span) => Err(ParseError::unexpected_token(
                vec![Token::Text(String::new())],
                found,
                span,
            )),
        }
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    // ===== Extension support =====

    /// The symbol table, for extension rules that register declarations.
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// The class whose body is currently being parsed, if any.
    pub fn class_context(&self) -> Option<&str> {
        self.class_context.as_deref()
    }

    pub(crate) fn enter_class(&mut self, name: String) -> Option<String> {
        self.class_context.replace(name)
    }

    pub(crate) fn exit_class(&mut self, previous: Option<String>) {
        self.class_context = previous;
    }

    /// Offer the current position to each syntax extension in order; the
    /// first rule returning `Some` wins. Rules must leave the position
    /// untouched when declining.
    pub(crate) fn try_extension_statement(&mut self) -> Option<Result<Statement, ParseError>> {
        for index in 0..self.extensions.len() {
            let ext = Rc::clone(&self.extensions[index]);
            if let Some(result) = ext.parse_statement(self) {
                return Some(result);
            }
        }
        None
    }

    pub(crate) fn try_extension_primary(
        &mut self,
    ) -> Option<Result<crate::ast::Expression, ParseError>> {
        for index in 0..self.extensions.len() {
            let ext = Rc::clone(&self.extensions[index]);
            if let Some(result) = ext.parse_primary(self) {
                return Some(result);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn tokens(source: &str) -> Vec<(Token, Span)> {
        Lexer::new(source).tokenize().expect("lexing should succeed")
    }

    #[test]
    fn test_current_and_peek() {
        let parser = Parser::new(tokens("var x"));
        assert_eq!(parser.current(), &Token::Var);
        assert_eq!(parser.peek(), &Token::Identifier("x".to_string()));
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut parser = Parser::new(tokens("var"));
        assert_eq!(parser.advance().0, Token::Var);
        assert_eq!(parser.advance().0, Token::Eof);
        assert_eq!(parser.advance().0, Token::Eof);
        assert!(parser.at_eof());
    }

    #[test]
    fn test_check_matches_payload_variants_by_discriminant() {
        let parser = Parser::new(tokens("nombre"));
        assert!(parser.check(&Token::Identifier(String::new())));
        assert!(!parser.check(&Token::Text(String::new())));
    }

    #[test]
    fn test_expect_reports_expected_and_found() {
        let mut parser = Parser::new(tokens("var"));
        let err = parser.expect(Token::Class).unwrap_err();
        match err.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                assert_eq!(expected, vec![Token::Class]);
                assert_eq!(found, Token::Var);
            }
            other => panic!("Expected UnexpectedToken, got {:?}", other),
        }
    }

    #[test]
    fn test_expect_at_eof() {
        let mut parser = Parser::new(tokens(""));
        let err = parser.expect(Token::Class).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedEof { .. }));
    }
}
