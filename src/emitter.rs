//! NovaScript → Python emitter.
//! Walks the AST and produces Python source, one line at a time.

use log::{debug, trace};

use crate::ast::{Expr, Param, Program, Stmt};
use crate::symbols::SymbolTable;

const INDENT: &str = "    ";

/// Output lines plus the current indentation level.
#[derive(Debug, Default)]
pub struct Writer {
    indent: usize,
    lines: Vec<String>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Every line carries the indent prefix, blank ones included.
    pub fn emit_line(&mut self, s: &str) {
        self.lines.push(format!("{}{}", INDENT.repeat(self.indent), s));
    }

    pub fn emit_newline(&mut self) {
        self.emit_line("");
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Result of one generation run.
#[derive(Debug)]
pub struct Generated {
    pub code: String,
    pub symbols: SymbolTable,
}

pub fn emit_program(program: &Program) -> Generated {
    let mut out = Writer::new();
    let mut symbols = SymbolTable::new();

    out.emit_line("# Generated Python code");
    if let Some(description) = present(&program.description) {
        out.emit_line(&format!("# Description: {}", description));
    }
    if let Some(author) = present(&program.author) {
        out.emit_line(&format!("# Author: {}", author));
    }
    if let Some(date) = present(&program.date) {
        out.emit_line(&format!("# Date: {}", date));
    }
    out.emit_newline();

    for stmt in &program.body {
        emit_statement(stmt, &mut out, &mut symbols);
    }

    debug!(
        "generated {} lines, {} declared variables",
        out.lines().len(),
        symbols.len()
    );
    let code = out.finish();
    debug!("\n--- Generated Python ---\n{code}\n------------------------");
    Generated { code, symbols }
}

/// Metadata with an empty value is treated as absent.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// === Statements ===

pub fn emit_statement(stmt: &Stmt, out: &mut Writer, symbols: &mut SymbolTable) {
    match stmt {
        Stmt::FunctionDecl {
            name,
            params,
            return_type,
            body,
        } => emit_function(name, params, return_type.as_deref(), body, out, symbols),
        Stmt::VariableDecl { name, ty, value } => {
            let value = emit_expression(value);
            trace!("declare {ty} {name} = {value}");
            out.emit_line(&format!("{} = {}", name, value));
            symbols.define(name, *ty, value);
        }
        Stmt::Assignment { target, value } => {
            out.emit_line(&format!("{} = {}", target, emit_expression(value)));
        }
        Stmt::Display(value) => {
            out.emit_line(&format!("print({})", emit_expression(value)));
        }
    }
}

fn emit_function(
    name: &str,
    params: &[Param],
    return_type: Option<&str>,
    body: &[Stmt],
    out: &mut Writer,
    symbols: &mut SymbolTable,
) {
    let names = params
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    out.emit_line(&format!("def {}({}):", name, names));
    out.indent();

    // Type annotations are informational only
    for param in params {
        if let Some(ty) = &param.ty {
            out.emit_line(&format!("# Parameter {}: {}", param.name, ty));
        }
    }
    if let Some(ty) = return_type {
        out.emit_line(&format!("# Returns: {}", ty));
    }

    for stmt in body {
        emit_statement(stmt, out, symbols);
    }

    out.dedent();
    out.emit_newline();
}

// === Expressions ===

pub fn emit_expression(expr: &Expr) -> String {
    match expr {
        Expr::BinaryOp { left, op, right } => format!(
            "({} {} {})",
            emit_expression(left),
            op.symbol(),
            emit_expression(right)
        ),
        Expr::Number(value) => format_float(*value),
        // Emitted verbatim: embedded quotes and backslashes are not escaped.
        Expr::String(value) => format!("\"{}\"", value),
        Expr::Boolean(true) => "True".to_string(),
        Expr::Boolean(false) => "False".to_string(),
        Expr::Identifier(name) => name.clone(),
    }
}

/// Python's `repr(float)`: shortest round-trip digits, `.0` on integral
/// values, scientific notation outside `1e-4 <= |v| < 1e16`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sci = format!("{:e}", value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..16).contains(&exp) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}
