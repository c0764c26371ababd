//! Syntax tree produced by the parser and consumed by the emitter.

use std::fmt;

/// A whole NovaScript program: the optional header metadata plus its statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub description: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FunctionDecl {
        name: String,
        params: Vec<Param>,
        return_type: Option<String>,
        body: Vec<Stmt>,
    },
    /// `num x = ...`; the declared type is recorded, never checked.
    VariableDecl {
        name: String,
        ty: VarType,
        value: Expr,
    },
    Assignment {
        target: String,
        value: Expr,
    },
    Display(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    Number(f64),
    String(String),
    Boolean(bool),
    Identifier(String),
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Num,
    Str,
    Bool,
    List,
}

impl VarType {
    pub fn as_str(self) -> &'static str {
        match self {
            VarType::Num => "num",
            VarType::Str => "str",
            VarType::Bool => "bool",
            VarType::List => "list",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        }
    }
}
