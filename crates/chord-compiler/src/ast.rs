//! Abstract syntax tree for the Chord language.
//!
//! Statements and expressions are closed enums matched exhaustively
//! everywhere; grammar extensions contribute nodes through the single
//! [`Statement::Custom`] variant and the [`CustomNode`] trait instead of
//! widening the unions.

use crate::token::Span;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A top-level or block-level statement.
#[derive(Debug, Clone)]
pub enum Statement {
    Class(ClassDecl),
    Function(FunctionDecl),
    Property(PropertyDecl),
    Variable(VariableDecl),
    If(IfStmt),
    ForIn(ForInStmt),
    Break(Span),
    Continue(Span),
    Return(ReturnStmt),
    Export(ExportStmt),
    Import(ImportStmt),
    Expression(Expression),
    /// A node contributed by a grammar extension.
    Custom(Rc<dyn CustomNode>),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Class(decl) => decl.span,
            Statement::Function(decl) => decl.span,
            Statement::Property(decl) => decl.span,
            Statement::Variable(decl) => decl.span,
            Statement::If(stmt) => stmt.span,
            Statement::ForIn(stmt) => stmt.span,
            Statement::Break(span) | Statement::Continue(span) => *span,
            Statement::Return(stmt) => stmt.span,
            Statement::Export(stmt) => stmt.span,
            Statement::Import(stmt) => stmt.span,
            Statement::Expression(expr) => expr.span(),
            Statement::Custom(node) => node.span(),
        }
    }

    /// Whether the emitted statement already ends itself (block forms) and
    /// must not receive a `;` terminator.
    pub fn self_terminating(&self) -> bool {
        match self {
            Statement::Class(_)
            | Statement::Function(_)
            | Statement::If(_)
            | Statement::ForIn(_) => true,
            Statement::Export(stmt) => stmt.inner.self_terminating(),
            Statement::Custom(node) => node.self_terminating(),
            _ => false,
        }
    }
}

/// A statement node defined outside the base grammar.
///
/// Parsing extensions return these boxed behind `Statement::Custom`; codegen
/// extensions downcast through `as_any` to recover the concrete node. `tag`
/// identifies the node in diagnostics when no codegen rule claims it.
pub trait CustomNode: fmt::Debug {
    /// Stable name used in "unknown construct" diagnostics.
    fn tag(&self) -> &'static str;

    fn span(&self) -> Span;

    fn as_any(&self) -> &dyn Any;

    /// Block-shaped nodes return `true` to suppress the `;` terminator.
    fn self_terminating(&self) -> bool {
        false
    }
}

/// `clase Nombre [extiende Base] { miembros }`
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub superclass: Option<String>,
    pub members: Vec<Statement>,
    pub span: Span,
}

/// `[@asincrono] [fijar] funcion nombre(params) { cuerpo }`, or a class
/// constructor (a method named like its class).
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Statement>,
    pub is_async: bool,
    pub is_static: bool,
    pub is_constructor: bool,
    pub span: Span,
}

/// `[fijar] prop nombre [es valor]`
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    pub name: String,
    pub value: Option<Expression>,
    pub is_static: bool,
    pub span: Span,
}

/// `var nombre es valor`
#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub name: String,
    pub value: Expression,
    pub span: Span,
}

/// `si (cond) { ... } [ademas (cond) { ... }]* [sino { ... }]`
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expression,
    pub consequent: Vec<Statement>,
    pub alternate: Option<ElseBranch>,
    pub span: Span,
}

/// The `ademas`/`sino` continuation of an `si` statement.
#[derive(Debug, Clone)]
pub enum ElseBranch {
    /// `ademas (cond) { ... }` — a chained conditional.
    If(Box<IfStmt>),
    /// `sino { ... }` — the final branch.
    Block(Vec<Statement>),
}

/// `para variable en iterable { cuerpo }`
#[derive(Debug, Clone)]
pub struct ForInStmt {
    pub variable: String,
    pub iterable: Expression,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// `devolver [expr]`
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expression>,
    pub span: Span,
}

/// `exportar <declaracion>`
#[derive(Debug, Clone)]
pub struct ExportStmt {
    pub inner: Box<Statement>,
    pub span: Span,
}

/// `importar { a, b } desde "ruta"`
#[derive(Debug, Clone)]
pub struct ImportStmt {
    pub names: Vec<String>,
    pub path: String,
    pub span: Span,
}

/// An expression.
#[derive(Debug, Clone)]
pub enum Expression {
    Literal(Literal, Span),
    Identifier(String, Span),
    This(Span),
    Super(Span),
    /// Flat binary chain: one precedence level, left-associative.
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
        span: Span,
    },
    /// `no expr` → `!(expr)`
    Not(Box<Expression>, Span),
    /// `tipo expr` → `typeof` with Spanish type names
    TypeOf(Box<Expression>, Span),
    /// `target es value` — any expression may appear on the left; validity
    /// is checked at generation time.
    Assign {
        target: Box<Expression>,
        value: Box<Expression>,
        span: Span,
    },
    List(Vec<Expression>, Span),
    /// Ordered key/value pairs; order is preserved in the output.
    Object(Vec<ObjectProperty>, Span),
    Member {
        object: Box<Expression>,
        property: String,
        span: Span,
    },
    Call {
        callee: Box<Expression>,
        args: Vec<Expression>,
        span: Span,
    },
    /// `nuevo Clase(args)` — the callee is a full member/call chain, so
    /// `nuevo modulo.Clase(...)` works too.
    New { callee: Box<Expression>, span: Span },
    Grouping(Box<Expression>, Span),
    /// `js("...")` — verbatim JavaScript passthrough.
    Raw(String, Span),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(_, span)
            | Expression::Identifier(_, span)
            | Expression::This(span)
            | Expression::Super(span)
            | Expression::Not(_, span)
            | Expression::TypeOf(_, span)
            | Expression::List(_, span)
            | Expression::Object(_, span)
            | Expression::Grouping(_, span)
            | Expression::Raw(_, span) => *span,
            Expression::Binary { span, .. }
            | Expression::Assign { span, .. }
            | Expression::Member { span, .. }
            | Expression::Call { span, .. }
            | Expression::New { span, .. } => *span,
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    Bool(bool),
    Undefined,
}

/// One `clave: valor` entry of an object literal.
#[derive(Debug, Clone)]
pub struct ObjectProperty {
    pub key: String,
    pub value: Expression,
}

/// Binary operators, word-spelled in the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,          // mas
    Sub,          // menos
    Mul,          // por
    Div,          // entre
    Rem,          // resto
    Pow,          // exp
    Greater,      // mayor
    Less,         // menor
    GreaterEqual, // mayor_igual
    LessEqual,    // menor_igual
    Equal,        // igual
    StrictEqual,  // igual_tipado
    And,          // y
    Or,           // o
}

impl BinaryOp {
    /// The JavaScript spelling of the operator.
    pub fn as_js(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Greater => ">",
            BinaryOp::Less => "<",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Equal => "==",
            BinaryOp::StrictEqual => "===",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}
