//! Chord Language Compiler
//!
//! Chord is a small programming language with Spanish keywords that compiles
//! to JavaScript (ES module) source text. This crate implements the whole
//! pipeline: lexical analysis, recursive-descent parsing with incremental
//! symbol registration, and tree-to-text code generation.
//!
//! Derived languages extend the grammar and the code generator through the
//! rule traits in [`extension`] without modifying the base compiler; see the
//! `chord-dischord` crate for the Discord-bot dialect built this way.

pub mod ast;
pub mod corelib;
pub mod extension;
pub mod generator;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod token;

// Re-exports for convenience
pub use generator::{GenerateError, Generator};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use symbols::{Symbol, SymbolFlags, SymbolKind, SymbolTable};
pub use token::{Span, Token};
