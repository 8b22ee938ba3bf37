//! Custom AST nodes contributed by the DisChord grammar.

use chord_compiler::ast::{CustomNode, Expression, Statement};
use chord_compiler::token::Span;
use std::any::Any;

/// `encender bot { token: ..., intenciones: [...], prefijo: ... }`
#[derive(Debug)]
pub struct BotDecl {
    pub config: Expression,
    pub span: Span,
}

impl CustomNode for BotDecl {
    fn tag(&self) -> &'static str {
        "encender_bot"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    // Emits a multi-statement bootstrap carrying its own terminators
    fn self_terminating(&self) -> bool {
        true
    }
}

/// `evento nombre { cuerpo }`
#[derive(Debug)]
pub struct EventDecl {
    pub name: String,
    pub body: Vec<Statement>,
    pub span: Span,
}

impl CustomNode for EventDecl {
    fn tag(&self) -> &'static str {
        "evento"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn self_terminating(&self) -> bool {
        true
    }
}

/// `crear mensaje { contenido: ..., canal: ... }`
#[derive(Debug)]
pub struct MessageDecl {
    pub config: Expression,
    pub span: Span,
}

impl CustomNode for MessageDecl {
    fn tag(&self) -> &'static str {
        "crear_mensaje"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `crear embed { titulo ... descripcion ... }`
#[derive(Debug)]
pub struct EmbedDecl {
    pub components: Vec<EmbedComponent>,
    pub span: Span,
}

impl CustomNode for EmbedDecl {
    fn tag(&self) -> &'static str {
        "crear_embed"
    }

    fn span(&self) -> Span {
        self.span
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One component of a `crear embed` block.
#[derive(Debug)]
pub enum EmbedComponent {
    /// `canal <expr>` — send to a channel instead of replying in context.
    Channel(Expression),
    Title(Expression),
    Description(Expression),
    Color(Expression),
    /// `hora` — stamps the embed with the current time.
    Timestamp,
    Image(Expression),
    Thumbnail(Expression),
    /// `autor { nombre "..." icono "..." }`; both parts default to the
    /// running client's identity.
    Author {
        name: Option<String>,
        icon_url: Option<String>,
    },
    /// `pie { texto "..." [icono "..."] }`
    Footer {
        text: Option<String>,
        icon_url: Option<String>,
    },
    /// `agregarCampo { nombre "..." valor "..." plano verdadero }`
    Field {
        name: String,
        value: String,
        inline: bool,
    },
}
