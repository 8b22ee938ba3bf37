//! Code-generation rules for the DisChord statements.
//!
//! The rules target the Seyfert client library. `encender bot` additionally
//! produces a `seyfert.config.mjs` side artifact; artifacts are collected
//! here and written to disk by the caller, never by the generator.

use crate::nodes::{BotDecl, EmbedComponent, EmbedDecl, EventDecl, MessageDecl};
use crate::tables::{ACCESS, CALLS, EMBED_COLORS, EVENTS, INTENTS};
use chord_compiler::ast::{Expression, Literal, ObjectProperty, Statement};
use chord_compiler::extension::CodegenExtension;
use chord_compiler::{GenerateError, Generator};
use std::cell::RefCell;
use std::rc::Rc;

/// A file the compilation produces next to the main output.
#[derive(Debug, Clone, PartialEq)]
pub struct SideArtifact {
    pub filename: String,
    pub contents: String,
}

/// The DisChord codegen rules. Cloning shares the artifact collection, so
/// the caller keeps a handle to drain after generation.
#[derive(Clone, Default)]
pub struct DisChordCodegen {
    artifacts: Rc<RefCell<Vec<SideArtifact>>>,
}

impl DisChordCodegen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the side artifacts collected during generation.
    pub fn take_artifacts(&self) -> Vec<SideArtifact> {
        self.artifacts.borrow_mut().drain(..).collect()
    }
}

impl CodegenExtension for DisChordCodegen {
    fn visit_statement(
        &self,
        generator: &Generator<'_>,
        stmt: &Statement,
    ) -> Option<Result<String, GenerateError>> {
        let Statement::Custom(node) = stmt else {
            return None;
        };

        if let Some(bot) = node.as_any().downcast_ref::<BotDecl>() {
            return Some(self.generate_bot_init(generator, bot));
        }
        if let Some(event) = node.as_any().downcast_ref::<EventDecl>() {
            return Some(generate_event(generator, event));
        }
        if let Some(message) = node.as_any().downcast_ref::<MessageDecl>() {
            return Some(generate_message(generator, message));
        }
        if let Some(embed) = node.as_any().downcast_ref::<EmbedDecl>() {
            return Some(generate_embed(generator, embed));
        }

        None
    }

    fn resolve_access(&self, object: &str, property: &str) -> Option<String> {
        ACCESS.get(&(object, property)).map(|s| s.to_string())
    }

    fn resolve_call(&self, name: &str) -> Option<String> {
        CALLS.get(name).map(|s| s.to_string())
    }
}

impl DisChordCodegen {
    fn generate_bot_init(
        &self,
        generator: &Generator<'_>,
        bot: &BotDecl,
    ) -> Result<String, GenerateError> {
        let prefix = match config_value(&bot.config, "prefijo") {
            Some(value) => generator.visit_expression(value)?,
            None => "\"!\"".to_string(),
        };

        let config = self.generate_seyfert_config(generator, bot)?;
        self.artifacts.borrow_mut().push(SideArtifact {
            filename: "seyfert.config.mjs".to_string(),
            contents: config,
        });

        Ok(format!(
            r#"import {{ Client }} from "seyfert";

const client = new Client({{
  commands: {{
    prefix: () => [ {prefix} ],
    reply: () => true
  }}
}});

client.setServices({{
  cache: {{
    disabledCache: {{ bans: true, emojis: true, stickers: true, roles: true, presences: true }}
  }}
}});

client.start().then(async () => {{
  await client.uploadCommands().catch(error => console.log(error));
}});

process.on('unhandledRejection', async (err) => {{
  console.error(err);
}});"#
        ))
    }

    fn generate_seyfert_config(
        &self,
        generator: &Generator<'_>,
        bot: &BotDecl,
    ) -> Result<String, GenerateError> {
        let token = match config_value(&bot.config, "token") {
            Some(value) => generator.visit_expression(value)?,
            None => "\"\"".to_string(),
        };

        let intents = match config_value(&bot.config, "intenciones") {
            Some(Expression::List(items, _)) => {
                let members: Vec<String> = items
                    .iter()
                    .map(|item| {
                        let name = match item {
                            Expression::Literal(Literal::Text(name), _) => name.as_str(),
                            _ => "",
                        };
                        // Unknown intents degrade to the baseline
                        let member = INTENTS.get(name).copied().unwrap_or("Guilds");
                        format!("    GatewayIntentBits.{}", member)
                    })
                    .collect();
                format!("[\n{}\n  ]", members.join(",\n"))
            }
            _ => "[]".to_string(),
        };

        Ok(format!(
            r#"import {{ GatewayIntentBits }} from "seyfert/lib/types/index.js";
import {{ config }} from "seyfert";

export default config.bot({{
  token: {token},
  intents: {intents},
  locations: {{
    base: "dist",
    commands: "commands",
    events: "events",
    components: "components"
  }}
}});"#
        ))
    }
}

fn generate_event(generator: &Generator<'_>, event: &EventDecl) -> Result<String, GenerateError> {
    let name = EVENTS
        .get(event.name.as_str())
        .copied()
        .unwrap_or(event.name.as_str());
    let body = generator.generate_block(&event.body, "    ")?;
    Ok(format!(
        "client.on('{}', async (context) => {{\n{}\n}});",
        name, body
    ))
}

/// `crear mensaje` replies in the handler's context, or writes to an
/// explicit channel when the config names one.
fn generate_message(
    generator: &Generator<'_>,
    message: &MessageDecl,
) -> Result<String, GenerateError> {
    let Expression::Object(properties, _) = &message.config else {
        let config = generator.visit_expression(&message.config)?;
        return Ok(format!("await context.write({})", config));
    };

    let mut channel = None;
    let mut parts = Vec::new();
    for property in properties {
        if property.key == "canal" {
            channel = Some(generator.visit_expression(&property.value)?);
            continue;
        }
        let key = translate_message_key(&property.key);
        parts.push(format!(
            "{}: {}",
            key,
            generator.visit_expression(&property.value)?
        ));
    }
    let body = format!("{{ {} }}", parts.join(", "));

    Ok(match channel {
        Some(channel) => format!("await client.messages.write({}, {})", channel, body),
        None => format!("await context.write({})", body),
    })
}

fn translate_message_key(key: &str) -> &str {
    match key {
        "contenido" => "content",
        other => other,
    }
}

fn generate_embed(generator: &Generator<'_>, embed: &EmbedDecl) -> Result<String, GenerateError> {
    let mut channel = None;
    let mut parts = Vec::new();
    let mut fields = Vec::new();

    for component in &embed.components {
        match component {
            EmbedComponent::Channel(expr) => {
                channel = Some(generator.visit_expression(expr)?);
            }
            EmbedComponent::Title(expr) => {
                parts.push(format!("title: {}", generator.visit_expression(expr)?));
            }
            EmbedComponent::Description(expr) => {
                parts.push(format!("description: {}", generator.visit_expression(expr)?));
            }
            EmbedComponent::Color(expr) => {
                parts.push(format!("color: {}", generate_color(generator, expr)?));
            }
            EmbedComponent::Timestamp => {
                parts.push("timestamp: new Date().toISOString()".to_string());
            }
            EmbedComponent::Image(expr) => {
                parts.push(format!(
                    "image: {{ url: {} }}",
                    generator.visit_expression(expr)?
                ));
            }
            EmbedComponent::Thumbnail(expr) => {
                parts.push(format!(
                    "thumbnail: {{ url: {} }}",
                    generator.visit_expression(expr)?
                ));
            }
            EmbedComponent::Author { name, icon_url } => {
                let name = name
                    .as_ref()
                    .map(|n| quote(n))
                    .unwrap_or_else(|| "client.me.username".to_string());
                let icon = icon_url
                    .as_ref()
                    .map(|i| quote(i))
                    .unwrap_or_else(|| "client.me.avatarURL()".to_string());
                parts.push(format!("author: {{ name: {}, iconUrl: {} }}", name, icon));
            }
            EmbedComponent::Footer { text, icon_url } => {
                let text = text
                    .as_ref()
                    .map(|t| quote(t))
                    .unwrap_or_else(|| "client.me.username".to_string());
                let mut footer = format!("text: {}", text);
                if let Some(icon) = icon_url {
                    footer.push_str(&format!(", iconUrl: {}", quote(icon)));
                }
                parts.push(format!("footer: {{ {} }}", footer));
            }
            EmbedComponent::Field {
                name,
                value,
                inline,
            } => {
                fields.push(format!(
                    "{{ name: {}, value: {}, inline: {} }}",
                    quote(name),
                    quote(value),
                    inline
                ));
            }
        }
    }

    if !fields.is_empty() {
        parts.push(format!("fields: [{}]", fields.join(", ")));
    }

    let embed_object = format!("{{ {} }}", parts.join(", "));

    Ok(match channel {
        Some(channel) => format!(
            "await client.messages.write({}, {{ embeds: [{}] }})",
            channel, embed_object
        ),
        None => format!("await context.write({{ embeds: [{}] }})", embed_object),
    })
}

/// Color names resolve through the palette; anything else passes through as
/// a plain expression.
fn generate_color(generator: &Generator<'_>, expr: &Expression) -> Result<String, GenerateError> {
    if let Expression::Identifier(name, _) = expr {
        if let Some(member) = EMBED_COLORS.get(name.as_str()) {
            return Ok(format!("EmbedColors.{}", member));
        }
    }
    generator.visit_expression(expr)
}

/// Find a key in the bot's config object literal.
fn config_value<'a>(config: &'a Expression, key: &str) -> Option<&'a Expression> {
    match config {
        Expression::Object(properties, _) => properties
            .iter()
            .find(|ObjectProperty { key: k, .. }| k == key)
            .map(|property| &property.value),
        _ => None,
    }
}

fn quote(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    format!("\"{}\"", escaped)
}
