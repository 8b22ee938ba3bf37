//! DisChord: a Discord-bot dialect of the Chord language.
//!
//! DisChord adds four statements to Chord — `encender bot`, `evento`,
//! `crear mensaje` and `crear embed` — and a name-translation layer for the
//! Discord runtime (the Seyfert client). It plugs into the base compiler
//! through its extension traits; the base compiler knows nothing about it.
//!
//! ```no_run
//! use std::rc::Rc;
//! use chord_compiler::{Lexer, Parser, Generator};
//! use chord_dischord::{DisChordSyntax, DisChordCodegen};
//!
//! let tokens = Lexer::new("evento encendido { }").tokenize().unwrap();
//! let parser = Parser::with_extensions(tokens, vec![Rc::new(DisChordSyntax)]);
//! let (ast, symbols) = parser.parse().unwrap();
//!
//! let codegen = DisChordCodegen::new();
//! let generator = Generator::with_extensions(&symbols, vec![Box::new(codegen.clone())]);
//! let output = generator.generate(&ast).unwrap();
//! let side_artifacts = codegen.take_artifacts();
//! ```

pub mod generator;
pub mod nodes;
pub mod parser;
pub mod tables;

pub use generator::{DisChordCodegen, SideArtifact};
pub use parser::DisChordSyntax;
