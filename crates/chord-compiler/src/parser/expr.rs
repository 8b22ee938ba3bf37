//! Expression productions.
//!
//! Chord has a single precedence level: binary operators chain flat and
//! left-associative, so `1 mas 2 por 3` means `(1 + 2) * 3`. This is
//! deliberate language behavior, pinned by tests.

use super::{ParseError, Parser};
use crate::ast::{BinaryOp, Expression, Literal, ObjectProperty};
use crate::token::Token;

impl Parser {
    /// Parse a full expression: a flat binary chain followed by an optional
    /// `es` assignment whose target is the whole chain parsed so far.
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_primary()?;

        while self.current().is_binary_operator() {
            let (token, _) = self.advance();
            let op = binary_op(&token);
            let right = self.parse_primary()?;
            let span = left.span().merge(&right.span());
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        if self.check(&Token::Assign) {
            self.advance();
            let value = self.parse_expression()?;
            let span = left.span().merge(&value.span());
            return Ok(Expression::Assign {
                target: Box::new(left),
                value: Box::new(value),
                span,
            });
        }

        Ok(left)
    }

    /// Parse a primary expression. Extension rules are consulted first.
    pub fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        if let Some(result) = self.try_extension_primary() {
            return result;
        }

        match self.current().clone() {
            // js("...") — verbatim JavaScript passthrough
            Token::Raw => {
                let start = self.advance().1;
                self.expect(Token::LeftParen)?;
                let (content, _) = self.expect_text()?;
                let end = self.expect(Token::RightParen)?;
                Ok(Expression::Raw(content, start.merge(&end)))
            }
            Token::Space => {
                let (_, span) = self.advance();
                Ok(Expression::Literal(Literal::Text(" ".to_string()), span))
            }
            Token::Newline => {
                let (_, span) = self.advance();
                Ok(Expression::Literal(Literal::Text("\n".to_string()), span))
            }
            Token::Super => {
                let (_, span) = self.advance();
                self.parse_call_chain(Expression::Super(span))
            }
            Token::This => {
                let (_, span) = self.advance();
                self.parse_call_chain(Expression::This(span))
            }
            Token::Identifier(name) => {
                let (_, span) = self.advance();
                self.parse_call_chain(Expression::Identifier(name, span))
            }
            Token::Number(n) => {
                let (_, span) = self.advance();
                Ok(Expression::Literal(Literal::Number(n), span))
            }
            Token::Text(s) => {
                let (_, span) = self.advance();
                Ok(Expression::Literal(Literal::Text(s), span))
            }
            Token::Bool(b) => {
                let (_, span) = self.advance();
                Ok(Expression::Literal(Literal::Bool(b), span))
            }
            Token::Undefined => {
                let (_, span) = self.advance();
                Ok(Expression::Literal(Literal::Undefined, span))
            }
            Token::New => {
                let start = self.advance().1;
                let (name, name_span) = self.expect_identifier()?;
                let callee = self.parse_call_chain(Expression::Identifier(name, name_span))?;
                let span = start.merge(&callee.span());
                Ok(Expression::New {
                    callee: Box::new(callee),
                    span,
                })
            }
            Token::Not => {
                let start = self.advance().1;
                let operand = self.parse_primary()?;
                let span = start.merge(&operand.span());
                Ok(Expression::Not(Box::new(operand), span))
            }
            Token::TypeOf => {
                let start = self.advance().1;
                let operand = self.parse_primary()?;
                let span = start.merge(&operand.span());
                Ok(Expression::TypeOf(Box::new(operand), span))
            }
            Token::LeftBracket => self.parse_list_literal(),
            Token::LeftParen => {
                let start = self.advance().1;
                let inner = self.parse_expression()?;
                let end = self.expect(Token::RightParen)?;
                Ok(Expression::Grouping(Box::new(inner), start.merge(&end)))
            }
            Token::LeftBrace => self.parse_object_literal(),
            Token::Eof => Err(ParseError::invalid_syntax(
                "Unexpected end of input in expression",
                self.current_span(),
            )),
            found => Err(ParseError::invalid_syntax(
                format!("Token '{}' cannot start an expression", found),
                self.current_span(),
            )),
        }
    }

    /// Postfix chain: a greedy `.prop` member chain, then at most one
    /// trailing parenthesized argument list.
    pub fn parse_call_chain(&mut self, start: Expression) -> Result<Expression, ParseError> {
        let mut node = start;

        while self.check(&Token::Dot) {
            self.advance();
            let (property, prop_span) = self.expect_identifier()?;
            let span = node.span().merge(&prop_span);
            node = Expression::Member {
                object: Box::new(node),
                property,
                span,
            };
        }

        if self.check(&Token::LeftParen) {
            self.advance();
            let mut args = Vec::new();
            while !self.check(&Token::RightParen) {
                args.push(self.parse_expression()?);
                if self.check(&Token::Comma) {
                    self.advance();
                }
            }
            let end = self.expect(Token::RightParen)?;
            let span = node.span().merge(&end);
            return Ok(Expression::Call {
                callee: Box::new(node),
                args,
                span,
            });
        }

        Ok(node)
    }

    fn parse_list_literal(&mut self) -> Result<Expression, ParseError> {
        let start = self.expect(Token::LeftBracket)?;
        let mut elements = Vec::new();
        while !self.check(&Token::RightBracket) {
            elements.push(self.parse_expression()?);
            if self.check(&Token::Comma) {
                self.advance();
            }
        }
        let end = self.expect(Token::RightBracket)?;
        Ok(Expression::List(elements, start.merge(&end)))
    }

    fn parse_object_literal(&mut self) -> Result<Expression, ParseError> {
        let start = self.expect(Token::LeftBrace)?;
        let mut properties = Vec::new();

        while !self.check(&Token::RightBrace) {
            // Text keys keep their quotes in the output
            let key = match self.advance() {
                (Token::Identifier(name), _) => name,
                (Token::Text(text), _) => format!("\"{}\"", text),
                (found, span) => {
                    return Err(ParseError::unexpected_token(
                        vec![Token::Identifier(String::new()), Token::Text(String::new())],
                        found,
                        span,
                    ))
                }
            };
            self.expect(Token::Colon)?;
            let value = self.parse_expression()?;
            properties.push(ObjectProperty { key, value });

            if self.check(&Token::Comma) {
                self.advance();
            }
        }

        let end = self.expect(Token::RightBrace)?;
        Ok(Expression::Object(properties, start.merge(&end)))
    }
}

fn binary_op(token: &Token) -> BinaryOp {
    match token {
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Sub,
        Token::Star => BinaryOp::Mul,
        Token::Slash => BinaryOp::Div,
        Token::Percent => BinaryOp::Rem,
        Token::Power => BinaryOp::Pow,
        Token::Greater => BinaryOp::Greater,
        Token::Less => BinaryOp::Less,
        Token::GreaterEqual => BinaryOp::GreaterEqual,
        Token::LessEqual => BinaryOp::LessEqual,
        Token::EqualEqual => BinaryOp::Equal,
        Token::StrictEqual => BinaryOp::StrictEqual,
        Token::And => BinaryOp::And,
        Token::Or => BinaryOp::Or,
        other => unreachable!("not a binary operator: {}", other),
    }
}
