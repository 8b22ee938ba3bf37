//! Chord command-line compiler.
//!
//! `chord build` compiles a `.chord` file, or every `.chord` file under a
//! directory, into JavaScript modules; `chord check` parses without writing
//! output. The DisChord dialect is enabled by default and switched off with
//! `--no-dischord`. Every file compiles independently: its own lexer,
//! parser, symbol table and generator.

mod diagnostics;

use anyhow::{bail, Context};
use chord_compiler::{Generator, Lexer, Parser as ChordParser};
use chord_dischord::{DisChordCodegen, DisChordSyntax};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "chord")]
#[command(about = "Chord programming language compiler", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile Chord sources to JavaScript modules
    Build {
        /// A .chord file or a directory to compile recursively
        path: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        out_dir: PathBuf,
        /// Print an intermediate stage for each file
        #[arg(long, value_enum)]
        emit: Option<Emit>,
        /// Compile plain Chord without the DisChord dialect
        #[arg(long)]
        no_dischord: bool,
    },

    /// Parse sources and report diagnostics without writing output
    Check {
        /// A .chord file or a directory to check recursively
        path: PathBuf,
        /// Check plain Chord without the DisChord dialect
        #[arg(long)]
        no_dischord: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Emit {
    /// The token stream after lexing
    Tokens,
    /// The parsed syntax tree
    Ast,
    /// The symbol table as JSON
    Symbols,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            path,
            out_dir,
            emit,
            no_dischord,
        } => {
            let files = discover_files(&path)?;
            let root = if path.is_dir() {
                path.clone()
            } else {
                path.parent().unwrap_or(Path::new(".")).to_path_buf()
            };

            for file in &files {
                println!("Compiling: {}", file.display());
                compile_file(file, &root, &out_dir, emit, !no_dischord)?;
            }
            println!("Compiled {} file(s) to {}", files.len(), out_dir.display());
        }
        Commands::Check { path, no_dischord } => {
            let files = discover_files(&path)?;
            for file in &files {
                check_file(file, !no_dischord)?;
                println!("OK: {}", file.display());
            }
        }
    }

    Ok(())
}

/// A single `.chord` file, or every `.chord` file under a directory.
fn discover_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("No such file or directory: {}", path.display());
    }

    let pattern = format!("{}/**/*.chord", path.display());
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid search pattern '{}'", pattern))?
        .collect::<Result<_, _>>()?;
    files.sort();

    if files.is_empty() {
        bail!("No .chord files found under {}", path.display());
    }
    Ok(files)
}

struct Compiled {
    output: String,
    artifacts: Vec<chord_dischord::SideArtifact>,
}

/// Lex and parse one file's source text, rendering diagnostics on failure.
fn parse_source(
    path: &Path,
    source: &str,
    emit: Option<Emit>,
    dischord: bool,
) -> anyhow::Result<(Vec<chord_compiler::ast::Statement>, chord_compiler::SymbolTable)> {
    let display = path.display().to_string();

    let tokens = match Lexer::new(source).tokenize() {
        Ok(tokens) => tokens,
        Err(errors) => {
            for error in &errors {
                let span = match error {
                    chord_compiler::LexError::UnexpectedCharacter { span, .. } => *span,
                    chord_compiler::LexError::UnterminatedString { span } => *span,
                };
                diagnostics::report(&display, source, span, &error.to_string());
            }
            bail!("{}: {} lexical error(s)", display, errors.len());
        }
    };

    if let Some(Emit::Tokens) = emit {
        println!("{:#?}", tokens);
    }

    let parser = if dischord {
        ChordParser::with_extensions(tokens, vec![Rc::new(DisChordSyntax)])
    } else {
        ChordParser::new(tokens)
    };

    let (ast, symbols) = match parser.parse() {
        Ok(parsed) => parsed,
        Err(error) => {
            diagnostics::report(&display, source, error.span, &error.message);
            bail!("{}: {}", display, error);
        }
    };

    match emit {
        Some(Emit::Ast) => println!("{:#?}", ast),
        Some(Emit::Symbols) => println!("{}", serde_json::to_string_pretty(&symbols)?),
        _ => {}
    }

    Ok((ast, symbols))
}

/// Run the full pipeline on one file's source text.
fn compile_source(
    path: &Path,
    source: &str,
    emit: Option<Emit>,
    dischord: bool,
) -> anyhow::Result<Compiled> {
    let display = path.display().to_string();
    let (ast, symbols) = parse_source(path, source, emit, dischord)?;

    let codegen = DisChordCodegen::new();
    let generator = if dischord {
        Generator::with_extensions(&symbols, vec![Box::new(codegen.clone())])
    } else {
        Generator::new(&symbols)
    };

    let output = generator
        .generate(&ast)
        .with_context(|| format!("{}: generation failed", display))?;

    Ok(Compiled {
        output,
        artifacts: codegen.take_artifacts(),
    })
}

fn compile_file(
    path: &Path,
    root: &Path,
    out_dir: &Path,
    emit: Option<Emit>,
    dischord: bool,
) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;

    let compiled = compile_source(path, &source, emit, dischord)?;

    // Mirror the source layout under the output directory
    let relative = path.strip_prefix(root).unwrap_or(path);
    let target = out_dir.join(relative).with_extension("mjs");
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    std::fs::write(&target, &compiled.output)
        .with_context(|| format!("Cannot write {}", target.display()))?;

    // Side artifacts land next to the output directory, at the project root
    let artifact_root = out_dir.parent().filter(|p| !p.as_os_str().is_empty());
    let artifact_root = artifact_root.unwrap_or(Path::new("."));
    for artifact in &compiled.artifacts {
        let artifact_path = artifact_root.join(&artifact.filename);
        std::fs::write(&artifact_path, &artifact.contents)
            .with_context(|| format!("Cannot write {}", artifact_path.display()))?;
    }

    Ok(())
}

fn check_file(path: &Path, dischord: bool) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    parse_source(path, &source, None, dischord)?;
    Ok(())
}
