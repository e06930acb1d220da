use std::rc::Rc;

use crate::{
    ast::{Block, FunctionDef, LoopHeader, Node, Param},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
        value::types::ValueType,
    },
    util::stack::with_stack,
};

impl Parser<'_> {
    /// Parses a single statement.
    ///
    /// Grammar:
    /// ```text
    ///     statement := funcDecl | returnStmt | ifStmt | forStmt | exprStmt
    ///     exprStmt  := expr ';'
    /// ```
    /// The leading keyword decides the form; anything else is an expression
    /// statement terminated by `;`.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Node> {
        with_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Node> {
        match self.current().kind {
            TokenKind::Function => self.parse_function_decl(),
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            _ => {
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Punctuation, ";")?;
                Ok(expr)
            },
        }
    }

    /// Parses a function declaration.
    ///
    /// Grammar:
    /// ```text
    ///     funcDecl   := 'fn' IDENT '(' paramList? ')' returnType? block
    ///     paramList  := IDENT ':' TYPE (',' IDENT ':' TYPE)*
    ///     returnType := TYPE
    /// ```
    /// A comma directly before the closing parenthesis is rejected.
    fn parse_function_decl(&mut self) -> ParseResult<Node> {
        let keyword = self.expect(TokenKind::Function, "")?;
        let name = self.expect(TokenKind::Identifier, "")?.text;

        self.expect(TokenKind::Punctuation, "(")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::Punctuation, ")") {
            loop {
                let param = self.expect(TokenKind::Identifier, "")?.text;
                self.expect(TokenKind::OfType, "")?;
                let ty = self.parse_type()?;
                params.push(Param { name: param, ty });

                if !self.check(TokenKind::Punctuation, ",") {
                    break;
                }
                self.advance();

                if self.check(TokenKind::Punctuation, ")") {
                    return Err(ParseError::TrailingComma { line:   self.current().line,
                                                           column: self.current().column, });
                }
            }
        }
        self.expect(TokenKind::Punctuation, ")")?;

        let return_type = if self.check(TokenKind::Type, "") {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(Node::FunctionDecl(Rc::new(FunctionDef { name,
                                                    params,
                                                    return_type,
                                                    body,
                                                    line: keyword.line })))
    }

    /// Parses a type keyword into its tag.
    fn parse_type(&mut self) -> ParseResult<ValueType> {
        let token = self.expect(TokenKind::Type, "")?;
        ValueType::from_annotation(&token.text).ok_or(ParseError::UnknownType { name:   token.text,
                                                                                line:   token.line,
                                                                                column:
                                                                                    token.column, })
    }

    /// Parses a block delimited by `( )` or `{ }`.
    ///
    /// Grammar: `block := '(' statement* ')' | '{' statement* '}'`
    ///
    /// The closing delimiter must match the opening one.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let (opening, closing) = if self.check(TokenKind::Punctuation, "{") {
            ("{", "}")
        } else if self.check(TokenKind::Punctuation, "(") {
            ("(", ")")
        } else {
            return Err(self.unexpected("'(' or '{'"));
        };

        let open = self.expect(TokenKind::Punctuation, opening)?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::Punctuation, closing) {
            if self.check(TokenKind::EndOfFile, "") {
                return Err(self.unexpected(format!("'{closing}'")));
            }
            statements.push(self.parse_statement()?);
        }
        self.advance();

        Ok(Block { statements,
                   line: open.line })
    }

    /// Parses `if (condition) block`. There is no `else` arm.
    fn parse_if(&mut self) -> ParseResult<Node> {
        let keyword = self.expect(TokenKind::If, "")?;

        self.expect(TokenKind::Punctuation, "(")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Punctuation, ")")?;

        let body = self.parse_block()?;

        Ok(Node::If { condition: Box::new(condition),
                      body,
                      line: keyword.line })
    }

    /// Parses either loop form.
    ///
    /// Grammar: `forStmt := 'for' '(' expr (';' expr)? ')' block`
    ///
    /// With a `;` the header is a counting loop (`for(i = 0; 10)`), without
    /// one it is a condition-only loop (`for(x < 10)`).
    fn parse_for(&mut self) -> ParseResult<Node> {
        let keyword = self.expect(TokenKind::For, "")?;

        self.expect(TokenKind::Punctuation, "(")?;
        let first = self.parse_expression()?;

        let header = if self.check(TokenKind::Punctuation, ";") {
            self.advance();
            let limit = self.parse_expression()?;
            LoopHeader::Counting { init:  Box::new(first),
                                   limit: Box::new(limit), }
        } else {
            LoopHeader::Condition(Box::new(first))
        };

        self.expect(TokenKind::Punctuation, ")")?;
        let body = self.parse_block()?;

        Ok(Node::For { header,
                       body,
                       line: keyword.line })
    }

    /// Parses `return expr;`.
    fn parse_return(&mut self) -> ParseResult<Node> {
        let keyword = self.expect(TokenKind::Return, "")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Punctuation, ";")?;

        Ok(Node::Return { value: Box::new(value),
                          line:  keyword.line, })
    }
}
