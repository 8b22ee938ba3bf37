//! Statement productions.

use super::{ParseError, Parser};
use crate::ast::{
    ClassDecl, ElseBranch, ExportStmt, Expression, ForInStmt, FunctionDecl, IfStmt, ImportStmt,
    Literal, PropertyDecl, ReturnStmt, Statement, VariableDecl,
};
use crate::symbols::{SymbolFlags, SymbolKind};
use crate::token::{Span, Token};

impl Parser {
    /// Parse one statement. Extension rules are consulted first; the base
    /// grammar runs only when every rule declines.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        if let Some(result) = self.try_extension_statement() {
            return result;
        }

        match self.current() {
            Token::Async => {
                self.advance();
                let is_static = if self.check(&Token::Static) {
                    self.advance();
                    true
                } else {
                    false
                };
                let func = self.parse_function_declaration(false, is_static, true)?;
                Ok(Statement::Function(func))
            }
            Token::If => Ok(Statement::If(self.parse_if_statement()?)),
            Token::For => self.parse_for_statement(),
            Token::Class => self.parse_class_declaration(),
            Token::Static => {
                self.advance();
                match self.current() {
                    Token::Prop => {
                        let mut prop = self.parse_property()?;
                        prop.is_static = true;
                        Ok(Statement::Property(prop))
                    }
                    Token::Function => {
                        let func = self.parse_function_declaration(false, true, false)?;
                        Ok(Statement::Function(func))
                    }
                    _ => Err(ParseError::unexpected_token(
                        vec![Token::Prop, Token::Function],
                        self.current().clone(),
                        self.current_span(),
                    )),
                }
            }
            Token::Function => {
                let func = self.parse_function_declaration(false, false, false)?;
                Ok(Statement::Function(func))
            }
            Token::Prop => Ok(Statement::Property(self.parse_property()?)),
            Token::Var => self.parse_variable_declaration(),
            Token::Break => {
                let (_, span) = self.advance();
                Ok(Statement::Break(span))
            }
            Token::Continue => {
                let (_, span) = self.advance();
                Ok(Statement::Continue(span))
            }
            Token::Return => self.parse_return_statement(),
            Token::Export => self.parse_export_statement(),
            Token::Import => self.parse_import_statement(),
            Token::Identifier(name) => {
                // A method named like the enclosing class is its constructor.
                if self.class_context() == Some(name.as_str())
                    && matches!(self.peek(), Token::LeftParen)
                {
                    let func = self.parse_function_declaration(true, false, false)?;
                    return Ok(Statement::Function(func));
                }
                Ok(Statement::Expression(self.parse_expression()?))
            }
            _ => Ok(Statement::Expression(self.parse_expression()?)),
        }
    }

    fn parse_class_declaration(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect(Token::Class)?;
        let (name, _) = self.expect_identifier()?;

        let superclass = if self.check(&Token::Extends) {
            self.advance();
            Some(self.expect_identifier()?.0)
        } else {
            None
        };

        self.expect(Token::LeftBrace)?;

        let previous = self.enter_class(name.clone());
        let mut members = Vec::new();
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            match self.parse_statement() {
                Ok(member) => members.push(member),
                Err(err) => {
                    self.exit_class(previous);
                    return Err(err);
                }
            }
        }
        self.exit_class(previous);

        let end = self.expect(Token::RightBrace)?;

        self.symbols_mut()
            .define(&name, SymbolKind::Class, SymbolFlags::default());

        Ok(Statement::Class(ClassDecl {
            name,
            superclass,
            members,
            span: start.merge(&end),
        }))
    }

    fn parse_function_declaration(
        &mut self,
        is_constructor: bool,
        is_static: bool,
        is_async: bool,
    ) -> Result<FunctionDecl, ParseError> {
        let (name, start) = if is_constructor {
            self.expect_identifier()?
        } else {
            let start = self.expect(Token::Function)?;
            let (name, _) = self.expect_identifier()?;
            (name, start)
        };

        self.expect(Token::LeftParen)?;
        let mut params = Vec::new();
        while !self.check(&Token::RightParen) {
            params.push(self.expect_identifier()?.0);
            if self.check(&Token::Comma) {
                self.advance();
            }
        }
        self.expect(Token::RightParen)?;

        self.expect(Token::LeftBrace)?;

        // The body is ordinary statement context: the enclosing class name
        // must not turn calls on it into constructor declarations.
        let enclosing = self.class_context.take();
        let mut body = Vec::new();
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            match self.parse_statement() {
                Ok(stmt) => body.push(stmt),
                Err(err) => {
                    self.exit_class(enclosing);
                    return Err(err);
                }
            }
        }
        self.exit_class(enclosing);

        let end = self.expect(Token::RightBrace)?;

        self.symbols_mut().define(
            &name,
            SymbolKind::Function,
            SymbolFlags {
                is_async,
                is_static,
                ..Default::default()
            },
        );

        Ok(FunctionDecl {
            name,
            params,
            body,
            is_async,
            is_static,
            is_constructor,
            span: start.merge(&end),
        })
    }

    fn parse_property(&mut self) -> Result<PropertyDecl, ParseError> {
        let start = self.expect(Token::Prop)?;
        let (name, name_span) = self.expect_identifier()?;

        let value = if self.check(&Token::Assign) {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };

        let end = value.as_ref().map(|v| v.span()).unwrap_or(name_span);

        self.symbols_mut()
            .define(&name, SymbolKind::Property, SymbolFlags::default());

        Ok(PropertyDecl {
            name,
            value,
            is_static: false,
            span: start.merge(&end),
        })
    }

    fn parse_variable_declaration(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect(Token::Var)?;
        let (name, name_span) = self.expect_identifier()?;

        // Without `es` the declaration defaults to the undefined literal.
        let value = if self.check(&Token::Assign) {
            self.advance();
            self.parse_expression()?
        } else {
            Expression::Literal(Literal::Undefined, name_span)
        };

        self.symbols_mut()
            .define(&name, SymbolKind::Variable, SymbolFlags::default());

        let span = start.merge(&value.span());
        Ok(Statement::Variable(VariableDecl { name, value, span }))
    }

    fn parse_if_statement(&mut self) -> Result<IfStmt, ParseError> {
        let start = self.expect(Token::If)?;
        self.parse_conditional(start)
    }

    /// The `(cond) { ... }` form shared by `si` and `ademas`, plus the
    /// optional continuation.
    fn parse_conditional(&mut self, start: Span) -> Result<IfStmt, ParseError> {
        self.expect(Token::LeftParen)?;
        let condition = self.parse_expression()?;
        self.expect(Token::RightParen)?;

        self.expect(Token::LeftBrace)?;
        let mut consequent = Vec::new();
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            consequent.push(self.parse_statement()?);
        }
        let mut end = self.expect(Token::RightBrace)?;

        let alternate = match self.current() {
            Token::ElseIf => {
                let (_, elseif) = self.advance();
                let chained = self.parse_conditional(elseif)?;
                end = chained.span;
                Some(ElseBranch::If(Box::new(chained)))
            }
            Token::Else => {
                self.advance();
                self.expect(Token::LeftBrace)?;
                let mut block = Vec::new();
                while !self.check(&Token::RightBrace) && !self.at_eof() {
                    block.push(self.parse_statement()?);
                }
                end = self.expect(Token::RightBrace)?;
                Some(ElseBranch::Block(block))
            }
            _ => None,
        };

        Ok(IfStmt {
            condition,
            consequent,
            alternate,
            span: start.merge(&end),
        })
    }

    fn parse_for_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect(Token::For)?;
        self.expect(Token::LeftParen)?;
        let (variable, _) = self.expect_identifier()?;
        self.expect(Token::In)?;
        let iterable = self.parse_expression()?;
        self.expect(Token::RightParen)?;

        self.expect(Token::LeftBrace)?;
        let mut body = Vec::new();
        while !self.check(&Token::RightBrace) && !self.at_eof() {
            body.push(self.parse_statement()?);
        }
        let end = self.expect(Token::RightBrace)?;

        Ok(Statement::ForIn(ForInStmt {
            variable,
            iterable,
            body,
            span: start.merge(&end),
        }))
    }

    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        let (_, start) = self.advance();

        // `devolver` at the end of a block has no value.
        let value = match self.current() {
            Token::RightBrace | Token::Else | Token::ElseIf | Token::Eof => None,
            _ => Some(self.parse_expression()?),
        };

        let span = value
            .as_ref()
            .map(|v| start.merge(&v.span()))
            .unwrap_or(start);
        Ok(Statement::Return(ReturnStmt { value, span }))
    }

    fn parse_export_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect(Token::Export)?;
        let inner = self.parse_statement()?;

        // The inner declaration registered itself; flip its exported flag.
        let declared = match &inner {
            Statement::Class(decl) => Some(decl.name.clone()),
            Statement::Function(decl) => Some(decl.name.clone()),
            Statement::Property(decl) => Some(decl.name.clone()),
            Statement::Variable(decl) => Some(decl.name.clone()),
            _ => None,
        };
        if let Some(name) = declared {
            self.symbols_mut().mark_exported(&name);
        }

        let span = start.merge(&inner.span());
        Ok(Statement::Export(ExportStmt {
            inner: Box::new(inner),
            span,
        }))
    }

    fn parse_import_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.expect(Token::Import)?;
        self.expect(Token::LeftBrace)?;

        let mut names = Vec::new();
        while !self.check(&Token::RightBrace) {
            names.push(self.expect_identifier()?.0);
            if self.check(&Token::Comma) {
                self.advance();
            }
        }
        self.expect(Token::RightBrace)?;

        self.expect(Token::From)?;
        let (path, end) = self.expect_text()?;

        Ok(Statement::Import(ImportStmt {
            names,
            path,
            span: start.merge(&end),
        }))
    }
}
