//! Recursive-descent parser for NovaScript.
//!
//! Each grammar rule is one method. Tokens are pulled from the lexer as they
//! are needed; the parser keeps the current token plus at most one buffered
//! token of lookahead, used only to recognise metadata lines.
//!
//! ```text
//! program      := PROGRAM BEGIN metadata* statement* PROGRAM END
//! metadata     := IDENTIFIER STRING
//! statement    := COMMENT | function_decl | variable_decl | assignment | display
//! function_decl:= FUNC IDENTIFIER LPAREN params? RPAREN (RETURN IDENTIFIER)? statement* END
//! params       := param (COMMA param)*
//! param        := IDENTIFIER (COLON IDENTIFIER)?
//! variable_decl:= (NUM|STR|BOOL|LIST) IDENTIFIER ASSIGN expression
//! assignment   := IDENTIFIER ASSIGN expression
//! display      := DISPLAY expression
//! expression   := term ((PLUS|MINUS) term)*
//! term         := factor ((MULTIPLY|DIVIDE) factor)*
//! factor       := NUMBER | STRING | TRUE | FALSE | IDENTIFIER | LPAREN expression RPAREN
//! ```

use log::debug;

use crate::ast::{BinaryOperator, Expr, Param, Program, Stmt, VarType};
use crate::error::{CompileError, CompileResult, ParseError};
use crate::lexer::{Lexer, Token, TokenKind};

pub struct Parser {
    lexer: Lexer,
    current: Token,
    peeked: Option<Token>,
}

impl Parser {
    /// Reads the first token immediately, so a lexical error at the very
    /// start of the input surfaces here.
    pub fn new(mut lexer: Lexer) -> CompileResult<Self> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            peeked: None,
        })
    }

    pub fn parse_program(&mut self) -> CompileResult<Program> {
        let mut program = Program::default();

        self.eat(TokenKind::Program)?;
        self.eat(TokenKind::Begin)?;

        while self.current.kind == TokenKind::Identifier
            && self.peek()?.kind == TokenKind::String
        {
            let key = self.eat(TokenKind::Identifier)?.text.to_uppercase();
            let value = self.eat(TokenKind::String)?.text;
            match key.as_str() {
                "DESCRIPTION" => program.description = Some(value),
                "AUTHOR" => program.author = Some(value),
                "DATE" => program.date = Some(value),
                _ => debug!("ignoring unknown metadata key {key}"),
            }
        }

        while self.current.kind != TokenKind::Program {
            if self.current.kind == TokenKind::Eof {
                return Err(self.unexpected_eof());
            }
            if let Some(stmt) = self.parse_statement()? {
                debug!("parsed top-level statement: {}", describe(&stmt));
                program.body.push(stmt);
            }
        }

        self.eat(TokenKind::Program)?;
        self.eat(TokenKind::End)?;

        Ok(program)
    }

    // === Statements ===

    /// Comments parse to `None`.
    fn parse_statement(&mut self) -> CompileResult<Option<Stmt>> {
        let stmt = match self.current.kind {
            TokenKind::Comment => {
                self.advance()?;
                return Ok(None);
            }
            TokenKind::Func => self.parse_function()?,
            TokenKind::Num | TokenKind::Str | TokenKind::Bool | TokenKind::List => {
                self.parse_variable_declaration()?
            }
            TokenKind::Identifier => self.parse_assignment()?,
            TokenKind::Display => self.parse_display()?,
            found => {
                return Err(ParseError::UnexpectedStatement {
                    found,
                    line: self.current.line,
                    column: self.current.column,
                }
                .into())
            }
        };
        Ok(Some(stmt))
    }

    fn parse_function(&mut self) -> CompileResult<Stmt> {
        self.eat(TokenKind::Func)?;
        let name = self.eat(TokenKind::Identifier)?.text;

        self.eat(TokenKind::LParen)?;
        let mut params = Vec::new();
        if self.current.kind != TokenKind::RParen {
            loop {
                params.push(self.parse_param()?);
                if self.current.kind != TokenKind::Comma {
                    break;
                }
                self.eat(TokenKind::Comma)?;
            }
        }
        self.eat(TokenKind::RParen)?;

        let return_type = if self.current.kind == TokenKind::Return {
            self.eat(TokenKind::Return)?;
            Some(self.eat(TokenKind::Identifier)?.text)
        } else {
            None
        };

        let mut body = Vec::new();
        while self.current.kind != TokenKind::End {
            if self.current.kind == TokenKind::Eof {
                return Err(self.unexpected_eof());
            }
            if let Some(stmt) = self.parse_statement()? {
                body.push(stmt);
            }
        }
        self.eat(TokenKind::End)?;

        Ok(Stmt::FunctionDecl {
            name,
            params,
            return_type,
            body,
        })
    }

    fn parse_param(&mut self) -> CompileResult<Param> {
        let name = self.eat(TokenKind::Identifier)?.text;
        let ty = if self.current.kind == TokenKind::Colon {
            self.eat(TokenKind::Colon)?;
            Some(self.eat(TokenKind::Identifier)?.text)
        } else {
            None
        };
        Ok(Param { name, ty })
    }

    fn parse_variable_declaration(&mut self) -> CompileResult<Stmt> {
        let ty = match self.current.kind {
            TokenKind::Num => VarType::Num,
            TokenKind::Str => VarType::Str,
            TokenKind::Bool => VarType::Bool,
            TokenKind::List => VarType::List,
            found => {
                return Err(ParseError::UnexpectedStatement {
                    found,
                    line: self.current.line,
                    column: self.current.column,
                }
                .into())
            }
        };
        self.advance()?;

        let name = self.eat(TokenKind::Identifier)?.text;
        self.eat(TokenKind::Assign)?;
        let value = self.parse_expression()?;

        Ok(Stmt::VariableDecl { name, ty, value })
    }

    fn parse_assignment(&mut self) -> CompileResult<Stmt> {
        let target = self.eat(TokenKind::Identifier)?.text;
        self.eat(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        Ok(Stmt::Assignment { target, value })
    }

    fn parse_display(&mut self) -> CompileResult<Stmt> {
        self.eat(TokenKind::Display)?;
        Ok(Stmt::Display(self.parse_expression()?))
    }

    // === Expressions ===

    fn parse_expression(&mut self) -> CompileResult<Expr> {
        let mut node = self.parse_term()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_term()?;
            node = Expr::binary(node, op, right);
        }
        Ok(node)
    }

    fn parse_term(&mut self) -> CompileResult<Expr> {
        let mut node = self.parse_factor()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Multiply => BinaryOperator::Mul,
                TokenKind::Divide => BinaryOperator::Div,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_factor()?;
            node = Expr::binary(node, op, right);
        }
        Ok(node)
    }

    fn parse_factor(&mut self) -> CompileResult<Expr> {
        match self.current.kind {
            TokenKind::Number => {
                let token = self.eat(TokenKind::Number)?;
                let value = token.text.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    text: token.text.clone(),
                    line: token.line,
                    column: token.column,
                })?;
                Ok(Expr::Number(value))
            }
            TokenKind::String => Ok(Expr::String(self.eat(TokenKind::String)?.text)),
            TokenKind::True => {
                self.advance()?;
                Ok(Expr::Boolean(true))
            }
            TokenKind::False => {
                self.advance()?;
                Ok(Expr::Boolean(false))
            }
            TokenKind::Identifier => Ok(Expr::Identifier(self.eat(TokenKind::Identifier)?.text)),
            TokenKind::LParen => {
                self.eat(TokenKind::LParen)?;
                let node = self.parse_expression()?;
                self.eat(TokenKind::RParen)?;
                Ok(node)
            }
            found => Err(ParseError::UnexpectedFactor {
                found,
                line: self.current.line,
                column: self.current.column,
            }
            .into()),
        }
    }

    // === Token stream ===

    /// Consume the current token if it has the expected kind and return it.
    fn eat(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.current.kind != kind {
            return Err(ParseError::UnexpectedToken {
                expected: kind,
                found: self.current.kind,
                line: self.current.line,
                column: self.current.column,
            }
            .into());
        }
        self.advance()
    }

    /// Move to the next token, returning the one just left behind.
    fn advance(&mut self) -> CompileResult<Token> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn peek(&mut self) -> CompileResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    fn unexpected_eof(&self) -> CompileError {
        ParseError::UnexpectedEof {
            line: self.current.line,
            column: self.current.column,
        }
        .into()
    }
}

fn describe(stmt: &Stmt) -> String {
    match stmt {
        Stmt::FunctionDecl { name, body, .. } => {
            format!("func {name} ({} body statements)", body.len())
        }
        Stmt::VariableDecl { name, ty, .. } => format!("{ty} {name}"),
        Stmt::Assignment { target, .. } => format!("assignment to {target}"),
        Stmt::Display(_) => "display".to_string(),
    }
}

/// Lex and parse a complete source text.
pub fn parse(source: &str) -> CompileResult<Program> {
    Parser::new(Lexer::new(source))?.parse_program()
}
