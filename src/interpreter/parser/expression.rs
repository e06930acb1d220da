use crate::{
    ast::{BinaryOperator, Node},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
    util::stack::with_stack,
};

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// Grammar:
    /// ```text
    ///     expr := IDENT '=' expr
    ///           | primary (OP primary)*
    /// ```
    /// Assignment is right-associative. Binary operators have no precedence
    /// levels and fold strictly left to right, so `2+3*4` is `(2+3)*4`;
    /// parentheses are the only way to group.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Node> {
        with_stack(|| self.parse_expression_inner())
    }

    fn parse_expression_inner(&mut self) -> ParseResult<Node> {
        let left = match self.parse_primary()? {
            Node::Identifier { name, line } if self.check(TokenKind::Operator, "=") => {
                self.advance();
                let value = self.parse_expression()?;
                return Ok(Node::Assignment { target: name,
                                             value: Box::new(value),
                                             line });
            },
            other => other,
        };

        let mut left = left;
        while self.check(TokenKind::Operator, "") {
            let token = self.advance();
            let op = BinaryOperator::from_symbol(&token.text).ok_or_else(|| {
                         ParseError::UnexpectedToken { found:    format!("{}('{}')",
                                                                         token.kind, token.text),
                                                       expected: "a binary operator".to_string(),
                                                       line:     token.line,
                                                       column:   token.column, }
                     })?;
            let right = self.parse_primary()?;

            left = Node::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: token.line };
        }

        Ok(left)
    }

    /// Parses a primary (atomic) expression.
    ///
    /// Grammar:
    /// ```text
    ///     primary := IDENT ('(' arguments ')')?
    ///              | '(' expr ')'
    ///              | '[' arguments ']'
    ///              | INT | FLOAT | STRING | BOOL
    /// ```
    fn parse_primary(&mut self) -> ParseResult<Node> {
        match self.current().kind {
            TokenKind::Identifier => {
                let name = self.advance();
                if self.check(TokenKind::Punctuation, "(") {
                    self.advance();
                    let arguments = self.parse_comma_separated(")")?;
                    return Ok(Node::FunctionCall { name: name.text,
                                                   arguments,
                                                   line: name.line });
                }

                Ok(Node::Identifier { name: name.text,
                                      line: name.line, })
            },
            TokenKind::Punctuation if self.check(TokenKind::Punctuation, "(") => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Punctuation, ")")?;
                Ok(expr)
            },
            TokenKind::Punctuation if self.check(TokenKind::Punctuation, "[") => {
                let open = self.advance();
                let elements = self.parse_comma_separated("]")?;
                Ok(Node::ArrayLiteral { elements,
                                        line: open.line })
            },
            TokenKind::Integer => {
                let token = self.advance();
                let value = token.text
                                 .parse::<i64>()
                                 .map_err(|_| ParseError::LiteralTooLarge { literal: token.text.clone(),
                                                                            line:    token.line,
                                                                            column:  token.column, })?;
                Ok(Node::IntLiteral { value,
                                      line: token.line })
            },
            TokenKind::Float => {
                let token = self.advance();
                let value = token.text
                                 .parse::<f64>()
                                 .map_err(|_| ParseError::UnexpectedToken { found:    format!("Float('{}')", token.text),
                                                                            expected: "a decimal number".to_string(),
                                                                            line:     token.line,
                                                                            column:   token.column, })?;
                Ok(Node::FloatLiteral { value,
                                        line: token.line })
            },
            TokenKind::String => {
                let token = self.advance();
                Ok(Node::StringLiteral { value: token.text,
                                         line:  token.line, })
            },
            TokenKind::Boolean => {
                let token = self.advance();
                Ok(Node::BoolLiteral { value: token.text == "true",
                                       line:  token.line, })
            },
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// Parses a comma-separated list of expressions up to and including
    /// `closing`.
    ///
    /// Shared by call arguments and array literals. An immediately closing
    /// list is empty, and a comma before the closing token is tolerated.
    fn parse_comma_separated(&mut self, closing: &str) -> ParseResult<Vec<Node>> {
        let mut items = Vec::new();

        while !self.check(TokenKind::Punctuation, closing) {
            items.push(self.parse_expression()?);

            if self.check(TokenKind::Punctuation, ",") {
                self.advance();
            } else if !self.check(TokenKind::Punctuation, closing) {
                return Err(self.unexpected(format!("',' or '{closing}'")));
            }
        }
        self.advance();

        Ok(items)
    }
}
