//! JavaScript code generation.
//!
//! The generator walks the finished AST with read-only access to the symbol
//! table and produces ES-module source text. It never mutates the tree or
//! the table, so generating twice yields byte-identical output.

use crate::ast::{
    ClassDecl, ElseBranch, Expression, ForInStmt, FunctionDecl, IfStmt, Literal, PropertyDecl,
    Statement,
};
use crate::corelib;
use crate::extension::CodegenExtension;
use crate::symbols::SymbolTable;
use crate::token::Span;
use thiserror::Error;

/// Spanish names for `typeof` results, emitted as an inline lookup table.
const TYPE_NAMES: &str = r#"{ "number": "numero", "string": "texto", "boolean": "booleano", "undefined": "indefinido", "object": "objeto" }"#;

/// A code-generation error. Fatal: no partial output is ever produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("Unknown construct '{tag}': no generation rule claimed it")]
    UnknownConstruct { tag: String },

    #[error("Invalid assignment target at {}:{}: not a storage location", span.line, span.column)]
    InvalidAssignmentTarget { span: Span },
}

pub struct Generator<'a> {
    symbols: &'a SymbolTable,
    extensions: Vec<Box<dyn CodegenExtension>>,
}

impl<'a> Generator<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self::with_extensions(symbols, Vec::new())
    }

    /// Build a generator with codegen extension rules, consulted in order
    /// before every base emission.
    pub fn with_extensions(
        symbols: &'a SymbolTable,
        extensions: Vec<Box<dyn CodegenExtension>>,
    ) -> Self {
        Self {
            symbols,
            extensions,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.symbols
    }

    /// Generate the whole program: one line per top-level statement,
    /// `;`-terminated except self-terminating block forms.
    pub fn generate(&self, statements: &[Statement]) -> Result<String, GenerateError> {
        let lines: Vec<String> = statements
            .iter()
            .map(|stmt| self.statement_line(stmt))
            .collect::<Result<_, _>>()?;
        Ok(lines.join("\n"))
    }

    fn statement_line(&self, stmt: &Statement) -> Result<String, GenerateError> {
        let code = self.visit_statement(stmt)?;
        if stmt.self_terminating() {
            Ok(code)
        } else {
            Ok(format!("{};", code))
        }
    }

    /// Emit a statement body with each statement on its own indented line.
    /// The terminator rule is the same one `generate` applies at top level.
    pub fn generate_block(
        &self,
        statements: &[Statement],
        indent: &str,
    ) -> Result<String, GenerateError> {
        let lines: Vec<String> = statements
            .iter()
            .map(|stmt| Ok(format!("{}{}", indent, self.statement_line(stmt)?)))
            .collect::<Result<_, _>>()?;
        Ok(lines.join("\n"))
    }

    /// Emit one statement, without terminator. Extension rules first.
    pub fn visit_statement(&self, stmt: &Statement) -> Result<String, GenerateError> {
        for ext in &self.extensions {
            if let Some(result) = ext.visit_statement(self, stmt) {
                return result;
            }
        }

        match stmt {
            Statement::Class(decl) => self.generate_class(decl),
            Statement::Function(decl) => self.generate_function(decl),
            Statement::Property(decl) => self.generate_property(decl),
            Statement::Variable(decl) => Ok(format!(
                "let {} = {}",
                decl.name,
                self.visit_expression(&decl.value)?
            )),
            Statement::If(stmt) => self.generate_if(stmt),
            Statement::ForIn(stmt) => self.generate_for(stmt),
            Statement::Break(_) => Ok("break".to_string()),
            Statement::Continue(_) => Ok("continue".to_string()),
            Statement::Return(stmt) => match &stmt.value {
                Some(value) => Ok(format!("return {}", self.visit_expression(value)?)),
                None => Ok("return".to_string()),
            },
            Statement::Export(stmt) => self.generate_export(&stmt.inner),
            Statement::Import(stmt) => {
                let names = stmt.names.join(", ");
                let mut path = stmt.path.clone();
                // Relative imports point at compiled output
                if !path.ends_with(".mjs") && (path.starts_with("./") || path.starts_with("../")) {
                    path.push_str(".mjs");
                }
                Ok(format!("import {{ {} }} from \"{}\"", names, path))
            }
            Statement::Expression(expr) => self.visit_expression(expr),
            Statement::Custom(node) => Err(GenerateError::UnknownConstruct {
                tag: node.tag().to_string(),
            }),
        }
    }

    fn generate_class(&self, decl: &ClassDecl) -> Result<String, GenerateError> {
        let inheritance = decl
            .superclass
            .as_ref()
            .map(|name| format!(" extends {}", name))
            .unwrap_or_default();

        let members: Vec<String> = decl
            .members
            .iter()
            .map(|member| {
                let code = match member {
                    Statement::Function(func) => self.generate_method(func)?,
                    other => self.visit_statement(other)?,
                };
                Ok(format!("  {};", code))
            })
            .collect::<Result<_, GenerateError>>()?;

        Ok(format!(
            "class {}{} {{\n{}\n}}",
            decl.name,
            inheritance,
            members.join("\n\n")
        ))
    }

    /// A class member: constructor, instance method or static method.
    fn generate_method(&self, decl: &FunctionDecl) -> Result<String, GenerateError> {
        let params = decl.params.join(", ");
        let body = self.generate_block(&decl.body, "    ")?;
        let async_prefix = if decl.is_async { "async " } else { "" };

        if decl.is_constructor {
            return Ok(format!("constructor({}) {{\n{}\n  }}", params, body));
        }

        let static_prefix = if decl.is_static { "static " } else { "" };
        Ok(format!(
            "{}{}{}({}) {{\n{}\n  }}",
            static_prefix, async_prefix, decl.name, params, body
        ))
    }

    /// A free function.
    fn generate_function(&self, decl: &FunctionDecl) -> Result<String, GenerateError> {
        let params = decl.params.join(", ");
        let body = self.generate_block(&decl.body, "    ")?;
        let async_prefix = if decl.is_async { "async " } else { "" };
        Ok(format!(
            "{}function {}({}) {{\n{}\n}}",
            async_prefix, decl.name, params, body
        ))
    }

    fn generate_property(&self, decl: &PropertyDecl) -> Result<String, GenerateError> {
        let static_prefix = if decl.is_static { "static " } else { "" };
        match &decl.value {
            Some(value) => Ok(format!(
                "{}{} = {}",
                static_prefix,
                decl.name,
                self.visit_expression(value)?
            )),
            None => Ok(format!("{}{} = undefined", static_prefix, decl.name)),
        }
    }

    fn generate_if(&self, stmt: &IfStmt) -> Result<String, GenerateError> {
        let test = self.visit_expression(&stmt.condition)?;
        let consequent = self.generate_block(&stmt.consequent, "    ")?;
        let mut result = format!("if ({}) {{\n{}\n}}", test, consequent);

        match &stmt.alternate {
            Some(ElseBranch::If(chained)) => {
                result.push_str(" else ");
                result.push_str(&self.generate_if(chained)?);
            }
            Some(ElseBranch::Block(block)) => {
                let alternate = self.generate_block(block, "    ")?;
                result.push_str(&format!(" else {{\n{}\n}}", alternate));
            }
            None => {}
        }

        Ok(result)
    }

    fn generate_for(&self, stmt: &ForInStmt) -> Result<String, GenerateError> {
        let body = self.generate_block(&stmt.body, "    ")?;

        // `rango(n)` / `rango(a, b)` specializes to a counted loop
        if let Expression::Call { callee, args, .. } = &stmt.iterable {
            if matches!(callee.as_ref(), Expression::Identifier(name, _) if name == "rango") {
                let (start, end) = match args.as_slice() {
                    [end] => ("0".to_string(), self.visit_expression(end)?),
                    [start, end] => (self.visit_expression(start)?, self.visit_expression(end)?),
                    _ => ("0".to_string(), "0".to_string()),
                };
                return Ok(format!(
                    "for (let {var} = {start}; {var} < {end}; {var}++) {{\n{body}\n}}",
                    var = stmt.variable,
                ));
            }
        }

        let iterable = self.visit_expression(&stmt.iterable)?;
        Ok(format!(
            "for (let {var} of (Array.isArray({it}) ? {it} : Object.keys({it}))) {{\n{body}\n}}",
            var = stmt.variable,
            it = iterable,
        ))
    }

    fn generate_export(&self, inner: &Statement) -> Result<String, GenerateError> {
        // `exportar nombre` re-exports an existing binding
        if let Statement::Expression(Expression::Identifier(name, _)) = inner {
            return Ok(format!("export {{ {} }}", name));
        }
        Ok(format!("export {}", self.visit_statement(inner)?))
    }

    /// Emit one expression. Extension rules first.
    pub fn visit_expression(&self, expr: &Expression) -> Result<String, GenerateError> {
        for ext in &self.extensions {
            if let Some(result) = ext.visit_expression(self, expr) {
                return result;
            }
        }

        match expr {
            Expression::Literal(literal, _) => Ok(generate_literal(literal)),
            Expression::Identifier(name, _) => Ok(name.clone()),
            Expression::This(_) => Ok("this".to_string()),
            Expression::Super(_) => Ok("super".to_string()),
            Expression::Binary {
                op, left, right, ..
            } => Ok(format!(
                "{} {} {}",
                self.visit_expression(left)?,
                op.as_js(),
                self.visit_expression(right)?
            )),
            Expression::Not(operand, _) => {
                Ok(format!("!({})", self.visit_expression(operand)?))
            }
            Expression::TypeOf(operand, _) => Ok(format!(
                "{}[typeof ({})]",
                TYPE_NAMES,
                self.visit_expression(operand)?
            )),
            Expression::Assign { target, value, .. } => {
                if !is_storage_target(target) {
                    return Err(GenerateError::InvalidAssignmentTarget {
                        span: target.span(),
                    });
                }
                Ok(format!(
                    "{} = {}",
                    self.visit_expression(target)?,
                    self.visit_expression(value)?
                ))
            }
            Expression::List(elements, _) => {
                let elements: Vec<String> = elements
                    .iter()
                    .map(|el| self.visit_expression(el))
                    .collect::<Result<_, _>>()?;
                Ok(format!("[{}]", elements.join(", ")))
            }
            Expression::Object(properties, _) => {
                let props: Vec<String> = properties
                    .iter()
                    .map(|p| Ok(format!("{}: {}", p.key, self.visit_expression(&p.value)?)))
                    .collect::<Result<_, GenerateError>>()?;
                Ok(format!("{{ {} }}", props.join(", ")))
            }
            Expression::Member {
                object, property, ..
            } => self.generate_access(object, property),
            Expression::Call { callee, args, .. } => self.generate_call(callee, args),
            Expression::New { callee, .. } => {
                Ok(format!("new {}", self.visit_expression(callee)?))
            }
            Expression::Grouping(inner, _) => {
                Ok(format!("({})", self.visit_expression(inner)?))
            }
            Expression::Raw(code, _) => Ok(code.clone()),
        }
    }

    /// Resolve `object.property`: extensions, then the exact static corelib
    /// class, then a method rename on any corelib class, then the literal
    /// name.
    fn generate_access(&self, object: &Expression, property: &str) -> Result<String, GenerateError> {
        if let Expression::Identifier(name, _) = object {
            for ext in &self.extensions {
                if let Some(replacement) = ext.resolve_access(name, property) {
                    return Ok(replacement);
                }
            }

            if let Some(replacement) = corelib::static_replacement(name, property) {
                return Ok(replacement.to_string());
            }
        }

        let object_code = self.visit_expression(object)?;
        if let Some(translated) = corelib::method_translation(property) {
            return Ok(format!("{}.{}", object_code, translated));
        }

        Ok(format!("{}.{}", object_code, property))
    }

    fn generate_call(
        &self,
        callee: &Expression,
        args: &[Expression],
    ) -> Result<String, GenerateError> {
        let args: Vec<String> = args
            .iter()
            .map(|arg| self.visit_expression(arg))
            .collect::<Result<_, _>>()?;
        let args = args.join(", ");

        let (translation, is_async) = match callee {
            Expression::Member {
                object, property, ..
            } => {
                let translation = self.generate_access(object, property)?;
                let is_async = self
                    .symbols
                    .lookup(property)
                    .map(|symbol| symbol.flags.is_async)
                    .unwrap_or(false);
                (translation, is_async)
            }
            Expression::Identifier(name, _) => {
                let translation = self
                    .extensions
                    .iter()
                    .find_map(|ext| ext.resolve_call(name))
                    .unwrap_or_else(|| name.clone());
                let is_async = self
                    .symbols
                    .lookup(name)
                    .map(|symbol| symbol.flags.is_async)
                    .unwrap_or(false);
                (translation, is_async)
            }
            other => (self.visit_expression(other)?, false),
        };

        let await_prefix = if is_async { "await " } else { "" };
        Ok(format!("{}{}({})", await_prefix, translation, args))
    }
}

/// Only identifiers, member accesses, and groupings of those denote
/// storage locations.
fn is_storage_target(expr: &Expression) -> bool {
    match expr {
        Expression::Identifier(..) | Expression::Member { .. } => true,
        Expression::Grouping(inner, _) => is_storage_target(inner),
        _ => false,
    }
}

fn generate_literal(literal: &Literal) -> String {
    match literal {
        Literal::Number(n) => format!("{}", n),
        Literal::Text(s) => format!("\"{}\"", escape_js_string(s)),
        Literal::Bool(true) => "true".to_string(),
        Literal::Bool(false) => "false".to_string(),
        Literal::Undefined => "undefined".to_string(),
    }
}

fn escape_js_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_js_string() {
        assert_eq!(escape_js_string("hola\nmundo"), "hola\\nmundo");
        assert_eq!(escape_js_string("di \"hola\""), "di \\\"hola\\\"");
    }

    #[test]
    fn test_number_formatting_drops_trailing_zero() {
        assert_eq!(generate_literal(&Literal::Number(5.0)), "5");
        assert_eq!(generate_literal(&Literal::Number(2.5)), "2.5");
    }
}
