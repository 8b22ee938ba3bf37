//! Grammar rules for the DisChord statements.
//!
//! The DisChord keywords (`encender`, `evento`, `crear`) lex as plain
//! identifiers; the rules match on the identifier text before the base
//! statement dispatch runs, so the base lexer needs no changes.

use crate::nodes::{BotDecl, EmbedComponent, EmbedDecl, EventDecl, MessageDecl};
use chord_compiler::ast::Statement;
use chord_compiler::extension::SyntaxExtension;
use chord_compiler::token::Token;
use chord_compiler::{ParseError, Parser};
use std::rc::Rc;

pub struct DisChordSyntax;

impl SyntaxExtension for DisChordSyntax {
    fn parse_statement(&self, parser: &mut Parser) -> Option<Result<Statement, ParseError>> {
        match parser.current() {
            Token::Identifier(name) => match name.as_str() {
                "encender" => Some(parse_bot_declaration(parser)),
                "evento" => Some(parse_event_declaration(parser)),
                "crear" => Some(parse_creation(parser)),
                _ => None,
            },
            _ => None,
        }
    }
}

fn parse_bot_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let (_, start) = parser.advance(); // encender

    let (target, target_span) = parser.expect_identifier()?;
    if target != "bot" {
        return Err(ParseError::invalid_syntax(
            format!("Expected 'bot' after 'encender', found '{}'", target),
            target_span,
        ));
    }

    let config = parser.parse_primary()?;
    let span = start.merge(&config.span());
    Ok(Statement::Custom(Rc::new(BotDecl { config, span })))
}

fn parse_event_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let (_, start) = parser.advance(); // evento
    let (name, _) = parser.expect_identifier()?;

    parser.expect(Token::LeftBrace)?;
    let mut body = Vec::new();
    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        body.push(parser.parse_statement()?);
    }
    let end = parser.expect(Token::RightBrace)?;

    Ok(Statement::Custom(Rc::new(EventDecl {
        name,
        body,
        span: start.merge(&end),
    })))
}

fn parse_creation(parser: &mut Parser) -> Result<Statement, ParseError> {
    let (_, start) = parser.advance(); // crear

    match parser.current() {
        Token::Identifier(kind) if kind == "mensaje" => {
            parser.advance();
            let config = parser.parse_primary()?;
            let span = start.merge(&config.span());
            Ok(Statement::Custom(Rc::new(MessageDecl { config, span })))
        }
        Token::Identifier(kind) if kind == "embed" => {
            parser.advance();
            parser.expect(Token::LeftBrace)?;

            let mut components = Vec::new();
            while !parser.check(&Token::RightBrace) && !parser.at_eof() {
                components.push(parse_embed_component(parser)?);
            }
            let end = parser.expect(Token::RightBrace)?;

            Ok(Statement::Custom(Rc::new(EmbedDecl {
                components,
                span: start.merge(&end),
            })))
        }
        found => Err(ParseError::invalid_syntax(
            format!("Expected 'mensaje' or 'embed' after 'crear', found '{}'", found),
            parser.current_span(),
        )),
    }
}

fn parse_embed_component(parser: &mut Parser) -> Result<EmbedComponent, ParseError> {
    let (component, span) = parser.expect_identifier()?;

    match component.as_str() {
        "canal" => Ok(EmbedComponent::Channel(parser.parse_primary()?)),
        "titulo" => Ok(EmbedComponent::Title(parser.parse_primary()?)),
        "descripcion" => Ok(EmbedComponent::Description(parser.parse_primary()?)),
        "color" => Ok(EmbedComponent::Color(parser.parse_primary()?)),
        "hora" => Ok(EmbedComponent::Timestamp),
        "imagen" => Ok(EmbedComponent::Image(parser.parse_primary()?)),
        "cartel" => Ok(EmbedComponent::Thumbnail(parser.parse_primary()?)),
        "autor" => parse_embed_author(parser),
        "pie" => parse_embed_footer(parser),
        "agregarCampo" => parse_embed_field(parser),
        other => Err(ParseError::invalid_syntax(
            format!("'{}' is not an embed component", other),
            span,
        )),
    }
}

/// `autor` alone uses the client's identity; `autor { nombre "..." icono
/// "..." }` overrides either part.
fn parse_embed_author(parser: &mut Parser) -> Result<EmbedComponent, ParseError> {
    let mut name = None;
    let mut icon_url = None;

    if parser.check(&Token::LeftBrace) {
        parser.advance();

        if matches!(parser.current(), Token::Identifier(key) if key == "nombre") {
            parser.advance();
            name = Some(parser.expect_text()?.0);
        }
        if matches!(parser.current(), Token::Identifier(key) if key == "icono") {
            parser.advance();
            icon_url = Some(parser.expect_text()?.0);
        }

        parser.expect(Token::RightBrace)?;
    }

    Ok(EmbedComponent::Author { name, icon_url })
}

fn parse_embed_footer(parser: &mut Parser) -> Result<EmbedComponent, ParseError> {
    parser.expect(Token::LeftBrace)?;

    let mut text = None;
    let mut icon_url = None;

    if matches!(parser.current(), Token::Identifier(key) if key == "texto") {
        parser.advance();
        text = Some(parser.expect_text()?.0);

        if matches!(parser.current(), Token::Identifier(key) if key == "icono") {
            parser.advance();
            icon_url = Some(parser.expect_text()?.0);
        }
    }

    parser.expect(Token::RightBrace)?;
    Ok(EmbedComponent::Footer { text, icon_url })
}

/// `agregarCampo { nombre "..." valor "..." plano verdadero }` — the key
/// names are positional, not checked.
fn parse_embed_field(parser: &mut Parser) -> Result<EmbedComponent, ParseError> {
    parser.expect(Token::LeftBrace)?;

    parser.expect_identifier()?;
    let (name, _) = parser.expect_text()?;
    parser.expect_identifier()?;
    let (value, _) = parser.expect_text()?;
    parser.expect_identifier()?;
    let inline = match parser.advance() {
        (Token::Bool(b), _) => b,
        (found, span) => {
            return Err(ParseError::unexpected_token(
                vec![Token::Bool(false)],
                found,
                span,
            ))
        }
    };

    parser.expect(Token::RightBrace)?;
    Ok(EmbedComponent::Field {
        name,
        value,
        inline,
    })
}
