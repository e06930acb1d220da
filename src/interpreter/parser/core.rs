use tracing::debug;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::lexer::{Lexer, Token, TokenKind},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A recursive-descent parser with one token of lookahead.
///
/// The parser pulls tokens from its [`Lexer`] on demand and owns no other
/// state. Statement and expression rules live in the sibling `statement`
/// and `expression` modules.
///
/// # Example
/// ```
/// use sprig::{
///     ast::Node,
///     interpreter::{lexer::Lexer, parser::core::Parser},
/// };
///
/// let program = Parser::new(Lexer::new("cout(1); x = 2;")).parse().unwrap();
///
/// assert_eq!(program.len(), 2);
/// assert!(matches!(program[1], Node::Assignment { .. }));
/// ```
pub struct Parser<'src> {
    lexer:   Lexer<'src>,
    current: Token,
}

impl<'src> Parser<'src> {
    /// Creates a parser and reads the first token.
    #[must_use]
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parses statements until the end of the input.
    ///
    /// Grammar: `program := statement*`
    ///
    /// # Errors
    /// Returns the first `ParseError` encountered; nothing is recovered.
    pub fn parse(&mut self) -> ParseResult<Vec<Node>> {
        let mut program = Vec::new();
        while !self.check(TokenKind::EndOfFile, "") {
            program.push(self.parse_statement()?);
        }

        debug!(statements = program.len(), "parsed program");
        Ok(program)
    }

    /// The token under the cursor.
    pub(super) const fn current(&self) -> &Token {
        &self.current
    }

    /// Moves to the next token, returning the one that was current.
    pub(super) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Tests the current token without consuming it. An empty `text`
    /// matches any text.
    pub(super) fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.current.is(kind, text)
    }

    /// Consumes the current token if it matches, or fails naming what was
    /// expected.
    pub(super) fn expect(&mut self, kind: TokenKind, text: &str) -> ParseResult<Token> {
        if self.check(kind, text) {
            return Ok(self.advance());
        }

        let expected = if text.is_empty() {
            kind.to_string()
        } else {
            format!("'{text}'")
        };
        Err(self.unexpected(expected))
    }

    /// Builds the error for the current token not being `expected`.
    pub(super) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let Token { kind,
                    text,
                    line,
                    column, } = &self.current;

        if *kind == TokenKind::EndOfFile {
            return ParseError::UnexpectedEndOfInput { line:   *line,
                                                      column: *column, };
        }

        ParseError::UnexpectedToken { found:    format!("{kind}('{text}')"),
                                      expected: expected.into(),
                                      line:     *line,
                                      column:   *column, }
    }
}

/// Lexes and parses a complete program.
///
/// # Errors
/// Returns a `ParseError` if the source does not match the grammar.
///
/// # Example
/// ```
/// use sprig::interpreter::parser::core::parse_source;
///
/// assert!(parse_source("fn id(x: num) num (return x;)").is_ok());
/// assert!(parse_source("x = ;").is_err());
/// ```
pub fn parse_source(source: &str) -> ParseResult<Vec<Node>> {
    Parser::new(Lexer::new(source)).parse()
}
