//! Tests for the DisChord dialect

use chord_compiler::ast::Statement;
use chord_compiler::{Generator, Lexer, Parser};
use chord_dischord::{DisChordCodegen, DisChordSyntax};
use std::rc::Rc;

fn parse(source: &str) -> (Vec<Statement>, chord_compiler::SymbolTable) {
    let tokens = Lexer::new(source).tokenize().expect("lexing should succeed");
    Parser::with_extensions(tokens, vec![Rc::new(DisChordSyntax)])
        .parse()
        .expect("parsing should succeed")
}

fn compile(source: &str) -> (String, Vec<chord_dischord::SideArtifact>) {
    let (ast, symbols) = parse(source);
    let codegen = DisChordCodegen::new();
    let generator = Generator::with_extensions(&symbols, vec![Box::new(codegen.clone())]);
    let output = generator.generate(&ast).expect("generation should succeed");
    (output, codegen.take_artifacts())
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_event_name_is_translated() {
    let (output, _) = compile("evento mensajeCreado { consola.imprimir(\"hola\") }");

    assert!(
        output.starts_with("client.on('messageCreate', async (context) => {"),
        "output: {}",
        output
    );
    assert!(output.contains("    console.log(\"hola\");"), "output: {}", output);
    assert!(output.ends_with("});"), "output: {}", output);
}

#[test]
fn test_encendido_maps_to_bot_ready() {
    let (output, _) = compile("evento encendido { }");
    assert!(output.contains("client.on('botReady'"), "output: {}", output);
}

#[test]
fn test_unknown_event_name_passes_through() {
    let (output, _) = compile("evento misterioso { }");
    assert!(output.contains("client.on('misterioso'"), "output: {}", output);
}

// ============================================================================
// Bot bootstrap
// ============================================================================

#[test]
fn test_bot_bootstrap_and_config_artifact() {
    let source = r#"
        encender bot {
            token: "abc123",
            intenciones: ["Servidores", "Mensajes", "ContenidoMensajes"],
            prefijo: "?"
        }
    "#;
    let (output, artifacts) = compile(source);

    assert!(output.contains("import { Client } from \"seyfert\";"), "output: {}", output);
    assert!(output.contains("prefix: () => [ \"?\" ]"), "output: {}", output);

    assert_eq!(artifacts.len(), 1);
    let config = &artifacts[0];
    assert_eq!(config.filename, "seyfert.config.mjs");
    assert!(config.contents.contains("token: \"abc123\""), "config: {}", config.contents);
    assert!(
        config.contents.contains("GatewayIntentBits.Guilds"),
        "config: {}",
        config.contents
    );
    assert!(
        config.contents.contains("GatewayIntentBits.GuildMessages"),
        "config: {}",
        config.contents
    );
    assert!(
        config.contents.contains("GatewayIntentBits.MessageContent"),
        "config: {}",
        config.contents
    );
}

#[test]
fn test_bot_defaults() {
    let (output, artifacts) = compile("encender bot { }");

    assert!(output.contains("prefix: () => [ \"!\" ]"), "output: {}", output);
    assert!(artifacts[0].contents.contains("token: \"\""));
    assert!(artifacts[0].contents.contains("intents: []"));
}

#[test]
fn test_unknown_intent_degrades_to_guilds() {
    let (_, artifacts) = compile("encender bot { intenciones: [\"Inventado\"] }");
    assert!(
        artifacts[0].contents.contains("GatewayIntentBits.Guilds"),
        "config: {}",
        artifacts[0].contents
    );
}

// ============================================================================
// Messages and embeds
// ============================================================================

#[test]
fn test_message_replies_in_context() {
    let (output, _) = compile("evento mensajeCreado { crear mensaje { contenido: \"hola\" } }");
    assert!(
        output.contains("await context.write({ content: \"hola\" });"),
        "output: {}",
        output
    );
}

#[test]
fn test_message_with_channel_writes_explicitly() {
    let (output, _) =
        compile("evento mensajeCreado { crear mensaje { contenido: \"hola\", canal: destino } }");
    assert!(
        output.contains("await client.messages.write(destino, { content: \"hola\" });"),
        "output: {}",
        output
    );
}

#[test]
fn test_embed_components() {
    let source = r#"
        evento mensajeCreado {
            crear embed {
                titulo "Aviso"
                descripcion "Algo pasó"
                color Rojo
                hora
                agregarCampo { nombre "Uno" valor "1" plano verdadero }
            }
        }
    "#;
    let (output, _) = compile(source);

    assert!(output.contains("title: \"Aviso\""), "output: {}", output);
    assert!(output.contains("description: \"Algo pasó\""), "output: {}", output);
    assert!(output.contains("color: EmbedColors.Red"), "output: {}", output);
    assert!(
        output.contains("timestamp: new Date().toISOString()"),
        "output: {}",
        output
    );
    assert!(
        output.contains("fields: [{ name: \"Uno\", value: \"1\", inline: true }]"),
        "output: {}",
        output
    );
    assert!(output.contains("await context.write({ embeds: ["), "output: {}", output);
}

#[test]
fn test_embed_author_defaults_to_client_identity() {
    let (output, _) = compile("evento encendido { crear embed { titulo \"x\" autor } }");
    assert!(
        output.contains("author: { name: client.me.username, iconUrl: client.me.avatarURL() }"),
        "output: {}",
        output
    );
}

// ============================================================================
// Name translation
// ============================================================================

#[test]
fn test_imprimir_goes_to_client_logger() {
    let (output, _) = compile("evento encendido { imprimir(\"listo\") }");
    assert!(
        output.contains("client.logger.info(\"listo\");"),
        "output: {}",
        output
    );
}

#[test]
fn test_usuario_nombre_is_rewritten() {
    let (output, _) = compile("evento encendido { consola.imprimir(usuario.nombre) }");
    assert!(output.contains("usuario.username"), "output: {}", output);
}

#[test]
fn test_base_corelib_still_applies() {
    let (output, _) = compile("evento mensajeCreado { lista.agregar(1) }");
    assert!(output.contains("lista.push(1);"), "output: {}", output);
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_base_grammar_unaffected() {
    // Plain Chord statements still parse with the extension installed
    let (output, artifacts) = compile("var x es 5\nconsola.imprimir(x)");
    assert_eq!(output, "let x = 5;\nconsole.log(x);");
    assert!(artifacts.is_empty());
}

#[test]
fn test_dischord_keywords_stay_identifiers_elsewhere() {
    // `evento` used as a plain variable name is untouched... but as a
    // statement head it belongs to DisChord, so use a different name here.
    let (output, _) = compile("var crear_algo es 1");
    assert_eq!(output, "let crear_algo = 1;");
}

#[test]
fn test_custom_nodes_fail_without_codegen_rules() {
    // Parsed with the dialect but generated without it: the custom node
    // reaches the base generator and fails fatally.
    let (ast, symbols) = parse("evento encendido { }");
    let err = Generator::new(&symbols).generate(&ast).unwrap_err();
    assert!(matches!(
        err,
        chord_compiler::GenerateError::UnknownConstruct { .. }
    ));
}
