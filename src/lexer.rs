//! NovaScript lexer.
//! Produces tokens one at a time; the parser pulls them on demand.

use std::fmt;

use log::trace;

use crate::error::LexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Program,
    Begin,
    End,
    Func,
    Return,
    If,
    Then,
    Else,
    While,
    For,
    Do,
    In,
    Class,
    Try,
    Except,
    Use,
    Display,

    // Types
    Num,
    Str,
    Bool,
    List,

    // Literals
    Number,
    String,
    True,
    False,

    // Operators. The comparisons other than `==` have no lexing rule yet.
    Plus,
    Minus,
    Multiply,
    Divide,
    Assign,
    Equals,
    NotEquals,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,

    Identifier,
    Comment,
    Eof,
}

impl TokenKind {
    /// Reserved words are case-sensitive: the program brackets are upper case,
    /// everything else lower case.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "PROGRAM" => TokenKind::Program,
            "BEGIN" => TokenKind::Begin,
            "END" => TokenKind::End,
            "func" => TokenKind::Func,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "do" => TokenKind::Do,
            "in" => TokenKind::In,
            "class" => TokenKind::Class,
            "try" => TokenKind::Try,
            "except" => TokenKind::Except,
            "use" => TokenKind::Use,
            "display" => TokenKind::Display,
            "num" => TokenKind::Num,
            "str" => TokenKind::Str,
            "bool" => TokenKind::Bool,
            "list" => TokenKind::List,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Program => "PROGRAM",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Func => "FUNC",
            TokenKind::Return => "RETURN",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Do => "DO",
            TokenKind::In => "IN",
            TokenKind::Class => "CLASS",
            TokenKind::Try => "TRY",
            TokenKind::Except => "EXCEPT",
            TokenKind::Use => "USE",
            TokenKind::Display => "DISPLAY",
            TokenKind::Num => "NUM",
            TokenKind::Str => "STR",
            TokenKind::Bool => "BOOL",
            TokenKind::List => "LIST",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Equals => "EQUALS",
            TokenKind::NotEquals => "NOT_EQUALS",
            TokenKind::Greater => "GREATER",
            TokenKind::Less => "LESS",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Colon => "COLON",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Comment => "COMMENT",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} {:?}", self.line, self.column, self.kind, self.text)
    }
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scan the next token. Once input is exhausted every call returns EOF.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan()?;
        trace!("token {token}");
        Ok(token)
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        while let Some(c) = self.current() {
            if c.is_whitespace() {
                self.advance();
                continue;
            }

            if c == '#' {
                return Ok(self.read_line_comment());
            }
            if c == '/' && self.peek() == Some('*') {
                return Ok(self.read_block_comment());
            }
            if c.is_ascii_digit() {
                return Ok(self.read_number());
            }
            if c.is_alphabetic() || c == '_' {
                return Ok(self.read_word());
            }
            if c == '"' {
                return Ok(self.read_string());
            }

            let (line, column) = (self.line, self.column);
            if c == '=' {
                self.advance();
                if self.current() == Some('=') {
                    self.advance();
                    return Ok(Token::new(TokenKind::Equals, "==", line, column));
                }
                return Ok(Token::new(TokenKind::Assign, "=", line, column));
            }

            let kind = match c {
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Multiply,
                '/' => TokenKind::Divide,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                ',' => TokenKind::Comma,
                '.' => TokenKind::Dot,
                ':' => TokenKind::Colon,
                _ => return Err(LexError::InvalidCharacter { ch: c, line, column }),
            };
            self.advance();
            return Ok(Token::new(kind, c.to_string(), line, column));
        }

        Ok(Token::new(TokenKind::Eof, "", self.line, self.column))
    }

    // === Cursor ===

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        if self.current() == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    /// Consume characters while `pred` holds and return them.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.current().filter(|&c| pred(c)) {
            text.push(c);
            self.advance();
        }
        text
    }

    // === Token readers ===

    fn read_line_comment(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let text = self.take_while(|c| c != '\n');
        Token::new(TokenKind::Comment, text, line, column)
    }

    /// `/* ... */`. A comment left open runs to end of input.
    fn read_block_comment(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance();
        self.advance();

        let mut text = String::new();
        while let Some(c) = self.current() {
            if c == '*' && self.peek() == Some('/') {
                self.advance();
                self.advance();
                break;
            }
            text.push(c);
            self.advance();
        }
        Token::new(TokenKind::Comment, text, line, column)
    }

    /// Digits and dots, unvalidated: `1.2.3` is one NUMBER token.
    fn read_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let text = self.take_while(|c| c.is_ascii_digit() || c == '.');
        Token::new(TokenKind::Number, text, line, column)
    }

    fn read_word(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let text = self.take_while(|c| c.is_alphanumeric() || c == '_');
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, line, column)
    }

    /// No escapes and no embedded quotes. A string left open runs to end of input.
    fn read_string(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance();
        let text = self.take_while(|c| c != '"');
        if self.current() == Some('"') {
            self.advance();
        }
        Token::new(TokenKind::String, text, line, column)
    }
}

/// Lex the whole source, up to and including the first EOF token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
