//! Lexer for the Chord programming language.
//!
//! Built on the logos library. Source text goes in, `Vec<(Token, Span)>`
//! comes out with precise line/column information and a trailing `Eof`.

use crate::token::{Span, Token};
use logos::Logos;
use thiserror::Error;

/// Logos-based token enum for lexing.
///
/// Used internally for tokenization and converted to the public `Token`
/// enum afterwards (the public enum carries an `Eof` variant logos has no
/// pattern for).
#[derive(Logos, Debug, Clone, PartialEq)]
enum LogosToken {
    // Whitespace (skip)
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,

    // Comments (skip): `#` to end of line
    #[regex(r"#[^\n]*", logos::skip)]
    LineComment,

    // Keywords (must come before identifiers)
    #[token("clase")]
    Class,

    #[token("extiende")]
    Extends,

    #[token("prop")]
    Prop,

    #[token("fijar")]
    Static,

    #[token("funcion")]
    Function,

    #[token("var")]
    Var,

    #[token("@asincrono")]
    Async,

    #[token("esta")]
    This,

    #[token("super")]
    Super,

    #[token("nuevo")]
    New,

    #[token("si")]
    If,

    #[token("sino")]
    Else,

    #[token("ademas")]
    ElseIf,

    #[token("para")]
    For,

    #[token("en")]
    In,

    #[token("pasar")]
    Continue,

    #[token("salir")]
    Break,

    #[token("devolver")]
    Return,

    #[token("importar")]
    Import,

    #[token("exportar")]
    Export,

    #[token("desde")]
    From,

    // Word-spelled operators. `mayor_igual`/`menor_igual` must come before
    // `mayor`/`menor` so logos does not split them at the underscore,
    // likewise `igual_tipado` before `igual`.
    #[token("mas")]
    Plus,

    #[token("menos")]
    Minus,

    #[token("por")]
    Star,

    #[token("entre")]
    Slash,

    #[token("resto")]
    Percent,

    #[token("exp")]
    Power,

    #[token("mayor_igual")]
    GreaterEqual,

    #[token("menor_igual")]
    LessEqual,

    #[token("mayor")]
    Greater,

    #[token("menor")]
    Less,

    #[token("igual_tipado")]
    StrictEqual,

    #[token("igual")]
    EqualEqual,

    // One-character keywords tie with the identifier regex on priority, so
    // they need an explicit bump.
    #[token("y", priority = 3)]
    And,

    #[token("o", priority = 3)]
    Or,

    #[token("no")]
    Not,

    #[token("es")]
    Assign,

    #[token("js")]
    Raw,

    #[token("tipo")]
    TypeOf,

    #[token("indefinido")]
    Undefined,

    #[token("intro")]
    Newline,

    #[token("espacio")]
    Space,

    #[token("verdadero")]
    True,

    #[token("falso")]
    False,

    // Punctuation
    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    // Literals
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),

    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    Text(String),

    // Identifiers (after keywords)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
}

fn parse_number(lex: &mut logos::Lexer<LogosToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &mut logos::Lexer<LogosToken>) -> Option<String> {
    let s = lex.slice();
    let inner = &s[1..s.len() - 1]; // Remove quotes
    Some(unescape_string(inner))
}

fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('\'') => result.push('\''),
                Some('0') => result.push('\0'),
                Some(c) => result.push(c),
                None => break,
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unexpected character '{char}' at {}:{}", span.line, span.column)]
    UnexpectedCharacter { char: char, span: Span },

    #[error("Unterminated string literal at {}:{}", span.line, span.column)]
    UnterminatedString { span: Span },
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<(Token, Span)>, Vec<LexError>> {
        let mut logos_lexer = LogosToken::lexer(self.source);
        let mut line = 1u32;
        let mut column = 1u32;
        let mut last_end = 0;

        while let Some(token_result) = logos_lexer.next() {
            let range = logos_lexer.span();

            // Update line and column based on skipped text
            for c in self.source[last_end..range.start].chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }

            let span = Span::new(range.start, range.end, line, column);

            match token_result {
                Ok(logos_token) => {
                    let token = convert_token(logos_token);
                    self.tokens.push((token, span));
                }
                Err(_) => {
                    let char = self.source[range.start..].chars().next().unwrap_or('\0');
                    if char == '"' {
                        self.errors.push(LexError::UnterminatedString { span });
                    } else {
                        self.errors.push(LexError::UnexpectedCharacter { char, span });
                    }
                }
            }

            // Update column for this token
            for c in self.source[range.start..range.end].chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }

            last_end = range.end;
        }

        // Add EOF token
        let eof_span = Span::new(self.source.len(), self.source.len(), line, column);
        self.tokens.push((Token::Eof, eof_span));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }
}

fn convert_token(logos_token: LogosToken) -> Token {
    match logos_token {
        LogosToken::Whitespace | LogosToken::LineComment => unreachable!("skipped by logos"),
        LogosToken::Class => Token::Class,
        LogosToken::Extends => Token::Extends,
        LogosToken::Prop => Token::Prop,
        LogosToken::Static => Token::Static,
        LogosToken::Function => Token::Function,
        LogosToken::Var => Token::Var,
        LogosToken::Async => Token::Async,
        LogosToken::This => Token::This,
        LogosToken::Super => Token::Super,
        LogosToken::New => Token::New,
        LogosToken::If => Token::If,
        LogosToken::Else => Token::Else,
        LogosToken::ElseIf => Token::ElseIf,
        LogosToken::For => Token::For,
        LogosToken::In => Token::In,
        LogosToken::Continue => Token::Continue,
        LogosToken::Break => Token::Break,
        LogosToken::Return => Token::Return,
        LogosToken::Import => Token::Import,
        LogosToken::Export => Token::Export,
        LogosToken::From => Token::From,
        LogosToken::Plus => Token::Plus,
        LogosToken::Minus => Token::Minus,
        LogosToken::Star => Token::Star,
        LogosToken::Slash => Token::Slash,
        LogosToken::Percent => Token::Percent,
        LogosToken::Power => Token::Power,
        LogosToken::Greater => Token::Greater,
        LogosToken::Less => Token::Less,
        LogosToken::GreaterEqual => Token::GreaterEqual,
        LogosToken::LessEqual => Token::LessEqual,
        LogosToken::EqualEqual => Token::EqualEqual,
        LogosToken::StrictEqual => Token::StrictEqual,
        LogosToken::And => Token::And,
        LogosToken::Or => Token::Or,
        LogosToken::Not => Token::Not,
        LogosToken::Assign => Token::Assign,
        LogosToken::Raw => Token::Raw,
        LogosToken::TypeOf => Token::TypeOf,
        LogosToken::Undefined => Token::Undefined,
        LogosToken::Newline => Token::Newline,
        LogosToken::Space => Token::Space,
        LogosToken::True => Token::Bool(true),
        LogosToken::False => Token::Bool(false),
        LogosToken::LeftParen => Token::LeftParen,
        LogosToken::RightParen => Token::RightParen,
        LogosToken::LeftBrace => Token::LeftBrace,
        LogosToken::RightBrace => Token::RightBrace,
        LogosToken::LeftBracket => Token::LeftBracket,
        LogosToken::RightBracket => Token::RightBracket,
        LogosToken::Dot => Token::Dot,
        LogosToken::Comma => Token::Comma,
        LogosToken::Colon => Token::Colon,
        LogosToken::Number(n) => Token::Number(n),
        LogosToken::Text(s) => Token::Text(s),
        LogosToken::Identifier(name) => Token::Identifier(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .tokenize()
            .expect("lexing should succeed")
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = lex("var x es 5");
        assert_eq!(
            tokens,
            vec![
                Token::Var,
                Token::Identifier("x".to_string()),
                Token::Assign,
                Token::Number(5.0),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_compound_operators_lex_whole() {
        // `mayor_igual` must not split into `mayor` + `_igual`
        let tokens = lex("a mayor_igual b menor_igual c igual_tipado d");
        assert_eq!(tokens[1], Token::GreaterEqual);
        assert_eq!(tokens[3], Token::LessEqual);
        assert_eq!(tokens[5], Token::StrictEqual);
    }

    #[test]
    fn test_comments_and_whitespace_skipped() {
        let tokens = lex("var x # esto es un comentario\nvar z");
        assert_eq!(
            tokens,
            vec![
                Token::Var,
                Token::Identifier("x".to_string()),
                Token::Var,
                Token::Identifier("z".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_single_letter_operators_are_keywords() {
        // `y` and `o` are operators, never identifiers
        let tokens = lex("a y b o c");
        assert_eq!(tokens[1], Token::And);
        assert_eq!(tokens[3], Token::Or);
    }

    #[test]
    fn test_string_escapes() {
        let tokens = lex(r#""hola\nmundo""#);
        assert_eq!(tokens[0], Token::Text("hola\nmundo".to_string()));
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = Lexer::new("var x\nvar y").tokenize().unwrap();
        let (_, span) = &tokens[2]; // second `var`
        assert_eq!(span.line, 2);
        assert_eq!(span.column, 1);
        let (_, span) = &tokens[3]; // `y`
        assert_eq!(span.line, 2);
        assert_eq!(span.column, 5);
    }

    #[test]
    fn test_booleans() {
        let tokens = lex("verdadero falso");
        assert_eq!(tokens[0], Token::Bool(true));
        assert_eq!(tokens[1], Token::Bool(false));
    }

    #[test]
    fn test_unexpected_character() {
        let errors = Lexer::new("var x es 5 $").tokenize().unwrap_err();
        assert!(matches!(
            errors[0],
            LexError::UnexpectedCharacter { char: '$', .. }
        ));
    }

    #[test]
    fn test_eof_always_last() {
        let tokens = lex("");
        assert_eq!(tokens, vec![Token::Eof]);
    }
}
