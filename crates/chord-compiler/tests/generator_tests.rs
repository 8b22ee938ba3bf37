//! Tests for JavaScript generation

use chord_compiler::ast::{CustomNode, Statement};
use chord_compiler::token::Span;
use chord_compiler::{GenerateError, Generator, Lexer, Parser};
use std::any::Any;
use std::rc::Rc;

fn generate(source: &str) -> String {
    let tokens = Lexer::new(source).tokenize().expect("lexing should succeed");
    let (ast, symbols) = Parser::new(tokens).parse().expect("parsing should succeed");
    Generator::new(&symbols)
        .generate(&ast)
        .expect("generation should succeed")
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_flat_chain_regenerates_in_order() {
    assert_eq!(generate("1 mas 2 por 3"), "1 + 2 * 3;");
}

#[test]
fn test_operator_table() {
    assert_eq!(generate("a entre b"), "a / b;");
    assert_eq!(generate("a resto b"), "a % b;");
    assert_eq!(generate("a exp b"), "a ** b;");
    assert_eq!(generate("a igual b"), "a == b;");
    assert_eq!(generate("a igual_tipado b"), "a === b;");
    assert_eq!(generate("a y b o c"), "a && b || c;");
}

#[test]
fn test_not_wraps_operand() {
    assert_eq!(generate("no listo"), "!(listo);");
}

#[test]
fn test_typeof_uses_spanish_names() {
    let output = generate("tipo 5");
    assert!(output.contains("[typeof (5)]"));
    assert!(output.contains("\"number\": \"numero\""));
}

#[test]
fn test_string_literals_are_escaped() {
    assert_eq!(generate("\"hola\" mas intro"), "\"hola\" + \"\\n\";");
}

#[test]
fn test_raw_passthrough_is_verbatim() {
    assert_eq!(generate("js(\"process.exit(0)\")"), "process.exit(0);");
}

// ============================================================================
// Await insertion
// ============================================================================

#[test]
fn test_async_function_call_is_awaited() {
    let output = generate("@asincrono funcion cargar() { }\ncargar()");
    assert!(output.contains("await cargar();"), "output: {}", output);
}

#[test]
fn test_non_async_call_is_not_awaited() {
    let output = generate("funcion cargar() { }\ncargar()");
    assert!(!output.contains("await"), "output: {}", output);
}

#[test]
fn test_async_method_call_is_awaited() {
    let source = r#"
        clase Bot {
            @asincrono funcion conectar() { }
        }
        var bot es nuevo Bot()
        bot.conectar()
    "#;
    let output = generate(source);
    assert!(output.contains("await bot.conectar();"), "output: {}", output);
}

// ============================================================================
// Corelib translation
// ============================================================================

#[test]
fn test_consola_is_fully_replaced() {
    assert_eq!(generate("consola.imprimir(\"hola\")"), "console.log(\"hola\");");
    assert_eq!(generate("consola.limpiar()"), "console.clear();");
}

#[test]
fn test_method_rename_applies_to_any_object() {
    assert_eq!(generate("nombres.agregar(\"Ana\")"), "nombres.push(\"Ana\");");
    assert_eq!(generate("texto.mayusculas()"), "texto.toUpperCase();");
}

#[test]
fn test_unknown_member_passes_through() {
    assert_eq!(generate("objeto.propia()"), "objeto.propia();");
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_variable_declaration() {
    assert_eq!(generate("var x es 5"), "let x = 5;");
    assert_eq!(generate("var x"), "let x = undefined;");
}

#[test]
fn test_valueless_property_defaults_to_undefined() {
    let output = generate("clase Config { prop nombre }");
    assert!(output.contains("nombre = undefined;"), "output: {}", output);
}

#[test]
fn test_class_with_constructor_and_inheritance() {
    let source = r#"
        clase Perro extiende Animal {
            Perro(nombre) {
                esta.nombre es nombre
            }

            fijar prop patas es 4

            @asincrono funcion ladrar() { }
        }
    "#;
    let output = generate(source);

    assert!(output.starts_with("class Perro extends Animal {"), "output: {}", output);
    assert!(output.contains("constructor(nombre) {"), "output: {}", output);
    assert!(output.contains("this.nombre = nombre;"), "output: {}", output);
    assert!(output.contains("static patas = 4;"), "output: {}", output);
    assert!(output.contains("async ladrar() {"), "output: {}", output);
}

#[test]
fn test_rango_two_args() {
    let output = generate("para (i en rango(2, 5)) { pasar }");
    assert!(
        output.starts_with("for (let i = 2; i < 5; i++) {"),
        "output: {}",
        output
    );
    assert!(output.contains("    continue;"), "output: {}", output);
}

#[test]
fn test_rango_one_arg_starts_at_zero() {
    let output = generate("para (i en rango(5)) { }");
    assert!(
        output.starts_with("for (let i = 0; i < 5; i++) {"),
        "output: {}",
        output
    );
}

#[test]
fn test_generic_iterable_loop() {
    let output = generate("para (clave en config) { }");
    assert!(
        output.contains("Array.isArray(config) ? config : Object.keys(config)"),
        "output: {}",
        output
    );
}

#[test]
fn test_if_else_chain_output() {
    let source = "si (x mayor 1) { salir } ademas (x mayor 0) { pasar } sino { devolver }";
    let output = generate(source);

    assert!(output.contains("if (x > 1) {"), "output: {}", output);
    assert!(output.contains("} else if (x > 0) {"), "output: {}", output);
    assert!(output.contains("} else {"), "output: {}", output);
    // Block statements take no trailing semicolon at top level
    assert!(!output.ends_with(';'), "output: {}", output);
}

#[test]
fn test_import_appends_mjs_to_relative_paths() {
    assert_eq!(
        generate("importar { Animal } desde \"./animales\""),
        "import { Animal } from \"./animales.mjs\";"
    );
    // Bare module specifiers are untouched
    assert_eq!(
        generate("importar { Client } desde \"seyfert\""),
        "import { Client } from \"seyfert\";"
    );
}

#[test]
fn test_export_forms() {
    let output = generate("exportar clase Animal { }");
    assert!(output.starts_with("export class Animal"), "output: {}", output);

    assert_eq!(generate("var x es 1\nexportar x"), "let x = 1;\nexport { x };");
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_generation_is_deterministic() {
    let source = r#"
        clase Saludo {
            Saludo(nombre) { esta.nombre es nombre }
        }
        var s es nuevo Saludo("Ana")
        consola.imprimir({ a: 1, b: [1, 2], c: "tres" })
    "#;
    let first = generate(source);
    let second = generate(source);
    assert_eq!(first, second);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_invalid_assignment_target_fails_at_generation() {
    let tokens = Lexer::new("1 mas 2 es 3").tokenize().unwrap();
    let (ast, symbols) = Parser::new(tokens).parse().unwrap();

    let err = Generator::new(&symbols).generate(&ast).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidAssignmentTarget { .. }));
}

#[test]
fn test_grouped_identifier_is_valid_assignment_target() {
    assert_eq!(generate("(x) es 5"), "(x) = 5;");
}

#[derive(Debug)]
struct Unclaimed;

impl CustomNode for Unclaimed {
    fn tag(&self) -> &'static str {
        "unclaimed"
    }

    fn span(&self) -> Span {
        Span::new(0, 0, 1, 1)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_unclaimed_custom_node_is_fatal() {
    let tokens = Lexer::new("").tokenize().unwrap();
    let (_, symbols) = Parser::new(tokens).parse().unwrap();

    let ast = vec![Statement::Custom(Rc::new(Unclaimed))];
    let err = Generator::new(&symbols).generate(&ast).unwrap_err();
    match err {
        GenerateError::UnknownConstruct { tag } => assert_eq!(tag, "unclaimed"),
        other => panic!("Expected UnknownConstruct, got {:?}", other),
    }
}
