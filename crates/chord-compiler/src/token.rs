//! Token and source-span types for the Chord language.

use std::fmt;

/// A lexical token.
///
/// Keywords are the Spanish surface forms of the language; payload-carrying
/// variants hold the decoded literal or identifier text. The lexer appends a
/// synthetic [`Token::Eof`] so the parser never indexes past the end of the
/// stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Declarations
    Class,      // clase
    Extends,    // extiende
    Prop,       // prop
    Static,     // fijar
    Function,   // funcion
    Var,        // var
    Async,      // @asincrono

    // Object model
    This,    // esta
    Super,   // super
    New,     // nuevo

    // Control flow
    If,       // si
    Else,     // sino
    ElseIf,   // ademas
    For,      // para
    In,       // en
    Continue, // pasar
    Break,    // salir
    Return,   // devolver

    // Modules
    Import, // importar
    Export, // exportar
    From,   // desde

    // Operators (word-spelled)
    Plus,         // mas
    Minus,        // menos
    Star,         // por
    Slash,        // entre
    Percent,      // resto
    Power,        // exp
    Greater,      // mayor
    Less,         // menor
    GreaterEqual, // mayor_igual
    LessEqual,    // menor_igual
    EqualEqual,   // igual
    StrictEqual,  // igual_tipado
    And,          // y
    Or,           // o
    Not,          // no

    // Assignment and misc keywords
    Assign,    // es
    Raw,       // js
    TypeOf,    // tipo
    Undefined, // indefinido
    Newline,   // intro (the "\n" literal)
    Space,     // espacio (the " " literal)

    // Punctuation
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Dot,          // .
    Comma,        // ,
    Colon,        // :

    // Literals and identifiers
    Number(f64),
    Text(String),
    Bool(bool),
    Identifier(String),

    // End of input (synthetic)
    Eof,
}

impl Token {
    /// The binary operators, in the single precedence level Chord has.
    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            Token::Plus
                | Token::Minus
                | Token::Star
                | Token::Slash
                | Token::Percent
                | Token::Power
                | Token::Greater
                | Token::Less
                | Token::GreaterEqual
                | Token::LessEqual
                | Token::EqualEqual
                | Token::StrictEqual
                | Token::And
                | Token::Or
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Class => write!(f, "clase"),
            Token::Extends => write!(f, "extiende"),
            Token::Prop => write!(f, "prop"),
            Token::Static => write!(f, "fijar"),
            Token::Function => write!(f, "funcion"),
            Token::Var => write!(f, "var"),
            Token::Async => write!(f, "@asincrono"),
            Token::This => write!(f, "esta"),
            Token::Super => write!(f, "super"),
            Token::New => write!(f, "nuevo"),
            Token::If => write!(f, "si"),
            Token::Else => write!(f, "sino"),
            Token::ElseIf => write!(f, "ademas"),
            Token::For => write!(f, "para"),
            Token::In => write!(f, "en"),
            Token::Continue => write!(f, "pasar"),
            Token::Break => write!(f, "salir"),
            Token::Return => write!(f, "devolver"),
            Token::Import => write!(f, "importar"),
            Token::Export => write!(f, "exportar"),
            Token::From => write!(f, "desde"),
            Token::Plus => write!(f, "mas"),
            Token::Minus => write!(f, "menos"),
            Token::Star => write!(f, "por"),
            Token::Slash => write!(f, "entre"),
            Token::Percent => write!(f, "resto"),
            Token::Power => write!(f, "exp"),
            Token::Greater => write!(f, "mayor"),
            Token::Less => write!(f, "menor"),
            Token::GreaterEqual => write!(f, "mayor_igual"),
            Token::LessEqual => write!(f, "menor_igual"),
            Token::EqualEqual => write!(f, "igual"),
            Token::StrictEqual => write!(f, "igual_tipado"),
            Token::And => write!(f, "y"),
            Token::Or => write!(f, "o"),
            Token::Not => write!(f, "no"),
            Token::Assign => write!(f, "es"),
            Token::Raw => write!(f, "js"),
            Token::TypeOf => write!(f, "tipo"),
            Token::Undefined => write!(f, "indefinido"),
            Token::Newline => write!(f, "intro"),
            Token::Space => write!(f, "espacio"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Number(n) => write!(f, "{}", n),
            Token::Text(s) => write!(f, "\"{}\"", s),
            Token::Bool(b) => write!(f, "{}", b),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Eof => write!(f, "<eof>"),
        }
    }
}

/// Source location of a token or AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// The smallest span covering both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line.min(other.line),
            column: self.column.min(other.column),
        }
    }
}
