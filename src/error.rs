//! Error types shared by the lexer, parser and the `compile` entry point.

use thiserror::Error;

use crate::lexer::TokenKind;

pub type CompileResult<T> = Result<T, CompileError>;

/// A character that no lexical rule accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Invalid character '{ch}' at line {line}, column {column}")]
    InvalidCharacter { ch: char, line: usize, column: usize },
}

/// The first grammar violation found in a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Expected {expected}, got {found} at line {line}, column {column}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        line: usize,
        column: usize,
    },

    /// A token that cannot start a statement.
    #[error("Unexpected token {found} at line {line}, column {column}")]
    UnexpectedStatement {
        found: TokenKind,
        line: usize,
        column: usize,
    },

    /// A token that cannot start an operand.
    #[error("Unexpected factor token: {found} at line {line}, column {column}")]
    UnexpectedFactor {
        found: TokenKind,
        line: usize,
        column: usize,
    },

    #[error("Unexpected end of file at line {line}, column {column}")]
    UnexpectedEof { line: usize, column: usize },

    /// A NUMBER lexeme such as `1.2.3` that is not a float.
    #[error("Invalid number literal '{text}' at line {line}, column {column}")]
    InvalidNumber {
        text: String,
        line: usize,
        column: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CompileError {
    /// Source position the diagnostic points at.
    pub fn position(&self) -> (usize, usize) {
        match self {
            CompileError::Lex(LexError::InvalidCharacter { line, column, .. }) => (*line, *column),
            CompileError::Parse(err) => match err {
                ParseError::UnexpectedToken { line, column, .. }
                | ParseError::UnexpectedStatement { line, column, .. }
                | ParseError::UnexpectedFactor { line, column, .. }
                | ParseError::UnexpectedEof { line, column }
                | ParseError::InvalidNumber { line, column, .. } => (*line, *column),
            },
        }
    }
}
