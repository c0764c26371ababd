pub mod ast;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbols;

use lexer::Lexer;
use parser::Parser;

pub use error::{CompileError, CompileResult, LexError, ParseError};

/// Transpile NovaScript source code to Python
pub fn transpile(source: &str) -> CompileResult<String> {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer)?;
    let program = parser.parse_program()?;

    Ok(emitter::emit_program(&program).code)
}

/// Like [`transpile`], but failures come back as a `Compilation error: ...`
/// string instead of an `Err`.
pub fn compile(source: &str) -> String {
    match transpile(source) {
        Ok(code) => code,
        Err(e) => format!("Compilation error: {}", e),
    }
}

/// Object-style handle on the pipeline. Holds no state between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct Compiler;

impl Compiler {
    pub fn new() -> Self {
        Compiler
    }

    pub fn compile(&self, source: &str) -> String {
        compile(source)
    }
}
