//! Tests for statement parsing

use chord_compiler::ast::*;
use chord_compiler::{Lexer, Parser, SymbolKind, SymbolTable};

fn parse(source: &str) -> (Vec<Statement>, SymbolTable) {
    let tokens = Lexer::new(source).tokenize().expect("lexing should succeed");
    Parser::new(tokens).parse().expect("parsing should succeed")
}

fn parse_err(source: &str) -> chord_compiler::ParseError {
    let tokens = Lexer::new(source).tokenize().expect("lexing should succeed");
    Parser::new(tokens)
        .parse()
        .expect_err("parsing should fail")
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_var_declaration() {
    let (statements, symbols) = parse("var x es 42");

    assert_eq!(statements.len(), 1);
    match &statements[0] {
        Statement::Variable(decl) => {
            assert_eq!(decl.name, "x");
            assert!(matches!(
                decl.value,
                Expression::Literal(Literal::Number(n), _) if n == 42.0
            ));
        }
        _ => panic!("Expected variable declaration"),
    }
    assert_eq!(symbols.lookup("x").unwrap().kind, SymbolKind::Variable);
}

#[test]
fn test_var_without_initializer_defaults_to_undefined() {
    let (statements, symbols) = parse("var x");

    match &statements[0] {
        Statement::Variable(decl) => assert!(matches!(
            decl.value,
            Expression::Literal(Literal::Undefined, _)
        )),
        _ => panic!("Expected variable declaration"),
    }
    assert_eq!(symbols.lookup("x").unwrap().kind, SymbolKind::Variable);
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_parse_function_declaration() {
    let (statements, symbols) = parse("funcion saludar(nombre) { devolver nombre }");

    assert_eq!(statements.len(), 1);
    match &statements[0] {
        Statement::Function(decl) => {
            assert_eq!(decl.name, "saludar");
            assert_eq!(decl.params, vec!["nombre"]);
            assert_eq!(decl.body.len(), 1);
            assert!(!decl.is_async);
            assert!(!decl.is_static);
            assert!(!decl.is_constructor);
        }
        _ => panic!("Expected function declaration"),
    }
    let symbol = symbols.lookup("saludar").unwrap();
    assert_eq!(symbol.kind, SymbolKind::Function);
    assert!(!symbol.flags.is_async);
}

#[test]
fn test_parse_async_function() {
    let (statements, symbols) = parse("@asincrono funcion cargar() { }");

    match &statements[0] {
        Statement::Function(decl) => assert!(decl.is_async),
        _ => panic!("Expected function declaration"),
    }
    assert!(symbols.lookup("cargar").unwrap().flags.is_async);
}

#[test]
fn test_parse_return_without_value() {
    let (statements, _) = parse("funcion nada() { devolver }");

    match &statements[0] {
        Statement::Function(decl) => match &decl.body[0] {
            Statement::Return(ret) => assert!(ret.value.is_none()),
            _ => panic!("Expected return statement"),
        },
        _ => panic!("Expected function declaration"),
    }
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_parse_class_with_superclass() {
    let (statements, symbols) = parse("clase Perro extiende Animal { }");

    match &statements[0] {
        Statement::Class(decl) => {
            assert_eq!(decl.name, "Perro");
            assert_eq!(decl.superclass.as_deref(), Some("Animal"));
            assert!(decl.members.is_empty());
        }
        _ => panic!("Expected class declaration"),
    }
    assert_eq!(symbols.lookup("Perro").unwrap().kind, SymbolKind::Class);
}

#[test]
fn test_method_named_like_class_is_constructor() {
    let source = r#"
        clase Persona {
            Persona(nombre) {
                esta.nombre es nombre
            }

            funcion saludar() { }
        }
    "#;
    let (statements, _) = parse(source);

    match &statements[0] {
        Statement::Class(decl) => {
            assert_eq!(decl.members.len(), 2);
            match &decl.members[0] {
                Statement::Function(func) => {
                    assert!(func.is_constructor);
                    assert_eq!(func.params, vec!["nombre"]);
                }
                _ => panic!("Expected constructor"),
            }
            match &decl.members[1] {
                Statement::Function(func) => {
                    assert!(!func.is_constructor);
                    assert_eq!(func.name, "saludar");
                }
                _ => panic!("Expected method"),
            }
        }
        _ => panic!("Expected class declaration"),
    }
}

#[test]
fn test_class_name_call_inside_method_is_plain_call() {
    // The constructor heuristic applies to direct class-body statements
    // only, not to method bodies.
    let source = r#"
        clase Bot {
            Bot() { }

            funcion reiniciar() {
                Bot()
            }
        }
    "#;
    let (statements, _) = parse(source);

    match &statements[0] {
        Statement::Class(decl) => match &decl.members[1] {
            Statement::Function(func) => {
                assert!(!func.is_constructor);
                assert!(matches!(
                    func.body[0],
                    Statement::Expression(Expression::Call { .. })
                ));
            }
            _ => panic!("Expected method"),
        },
        _ => panic!("Expected class declaration"),
    }
}

#[test]
fn test_class_name_call_outside_class_is_plain_call() {
    // Outside a class body, `Persona(...)` is an ordinary call
    let (statements, _) = parse("Persona(1)");
    assert!(matches!(
        statements[0],
        Statement::Expression(Expression::Call { .. })
    ));
}

#[test]
fn test_static_members() {
    let source = r#"
        clase Contador {
            fijar prop total es 0

            fijar funcion incrementar() { }

            @asincrono fijar funcion sincronizar() { }
        }
    "#;
    let (statements, symbols) = parse(source);

    match &statements[0] {
        Statement::Class(decl) => {
            match &decl.members[0] {
                Statement::Property(prop) => {
                    assert!(prop.is_static);
                    assert!(prop.value.is_some());
                }
                _ => panic!("Expected property"),
            }
            match &decl.members[1] {
                Statement::Function(func) => assert!(func.is_static && !func.is_async),
                _ => panic!("Expected static method"),
            }
            match &decl.members[2] {
                Statement::Function(func) => assert!(func.is_static && func.is_async),
                _ => panic!("Expected async static method"),
            }
        }
        _ => panic!("Expected class declaration"),
    }
    assert!(symbols.lookup("sincronizar").unwrap().flags.is_async);
}

// ============================================================================
// Control flow
// ============================================================================

#[test]
fn test_parse_if_else_chain() {
    let source = r#"
        si (x mayor 10) {
            pasar
        } ademas (x mayor 5) {
            salir
        } sino {
            devolver
        }
    "#;
    let (statements, _) = parse(source);

    match &statements[0] {
        Statement::If(stmt) => {
            assert_eq!(stmt.consequent.len(), 1);
            match stmt.alternate.as_ref().expect("Expected else branch") {
                ElseBranch::If(chained) => match chained.alternate.as_ref() {
                    Some(ElseBranch::Block(block)) => assert_eq!(block.len(), 1),
                    other => panic!("Expected final else block, got {:?}", other),
                },
                other => panic!("Expected chained if, got {:?}", other),
            }
        }
        _ => panic!("Expected if statement"),
    }
}

#[test]
fn test_parse_for_in() {
    let (statements, _) = parse("para (item en lista) { pasar }");

    match &statements[0] {
        Statement::ForIn(stmt) => {
            assert_eq!(stmt.variable, "item");
            assert!(matches!(stmt.iterable, Expression::Identifier(ref name, _) if name == "lista"));
            assert_eq!(stmt.body.len(), 1);
        }
        _ => panic!("Expected for statement"),
    }
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_parse_import() {
    let (statements, _) = parse("importar { Animal, Perro } desde \"./animales\"");

    match &statements[0] {
        Statement::Import(stmt) => {
            assert_eq!(stmt.names, vec!["Animal", "Perro"]);
            assert_eq!(stmt.path, "./animales");
        }
        _ => panic!("Expected import statement"),
    }
}

#[test]
fn test_export_marks_symbol() {
    let (statements, symbols) = parse("exportar clase Animal { }");

    match &statements[0] {
        Statement::Export(stmt) => {
            assert!(matches!(*stmt.inner, Statement::Class(_)));
        }
        _ => panic!("Expected export statement"),
    }
    assert!(symbols.lookup("Animal").unwrap().flags.is_exported);
}

// ============================================================================
// Symbol table behavior
// ============================================================================

#[test]
fn test_redeclaration_is_last_write_wins() {
    let (_, symbols) = parse("var x es 1\n@asincrono funcion x() { }");

    let symbol = symbols.lookup("x").unwrap();
    assert_eq!(symbol.kind, SymbolKind::Function);
    assert!(symbol.flags.is_async);
}

#[test]
fn test_parsers_share_no_state() {
    let (_, first) = parse("var x es 1");
    let (statements, second) = parse("var z es 2");

    assert!(first.lookup("z").is_none());
    assert!(second.lookup("x").is_none());
    assert_eq!(statements.len(), 1);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unexpected_token_is_fatal() {
    let err = parse_err("clase { }");
    assert!(matches!(
        err.kind,
        chord_compiler::ParseErrorKind::UnexpectedToken { .. }
    ));
}

#[test]
fn test_error_carries_location() {
    let err = parse_err("var 5 es 5");
    assert_eq!(err.span.line, 1);
    assert!(err.span.column > 1);
}
