use std::fmt;

use logos::Logos;

/// The keyword that introduces a function declaration.
pub const FUNCTION_KEYWORD: &str = "fn";
/// Keywords that name a parameter or return type.
pub const TYPE_KEYWORDS: &[&str] = &["num", "flo", "str", "bool", "arr"];
/// Keywords that introduce control flow.
pub const CONTROL_KEYWORDS: &[&str] = &["if", "else", "for", "return"];

/// The raw lexical classes recognised by the state machine.
///
/// These carry no payload; [`Lexer`] turns them into [`Token`]s, classifying
/// words into keywords and deciding where a `-` belongs to a literal.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(extras = LexerExtras)]
enum RawToken {
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f\x0B]+", logos::skip)]
    Ignored,
    /// `\n`
    #[token("\n", newline)]
    NewLine,
    /// `# line comments`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Identifiers and keywords.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,
    /// `42`
    #[regex(r"[0-9]+")]
    Integer,
    /// `3.14`, `2.`
    #[regex(r"[0-9]+\.[0-9]*")]
    Float,
    /// `-42`; split back into `-` and `42` after an operand.
    #[regex(r"-[0-9]+")]
    NegativeInteger,
    /// `-3.14`; split back into `-` and `3.14` after an operand.
    #[regex(r"-[0-9]+\.[0-9]*")]
    NegativeFloat,
    /// `"text"` or `'text'`; the closing quote is optional.
    #[regex(r#""[^"\n]*"?"#, allow_greedy = true)]
    #[regex(r"'[^'\n]*'?", allow_greedy = true)]
    String,
    /// `+ - * / = < > !`, `== <= >= !=` and `&& ||`.
    #[regex(r"[-+*/=<>!]")]
    #[token("==")]
    #[token("<=")]
    #[token(">=")]
    #[token("!=")]
    #[token("&&")]
    #[token("||")]
    Operator,
    /// `:`
    #[token(":")]
    Colon,
    /// `( ) { } [ ] , ;`
    #[regex(r"[(){}\[\],;]")]
    Punctuation,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset where it starts so that
/// tokens can report a line and column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

fn newline(lex: &mut logos::Lexer<RawToken>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}

/// The category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Integer literal such as `42` or `-7`.
    Integer,
    /// Float literal such as `3.14`.
    Float,
    /// String literal; the token text excludes the quotes.
    String,
    /// `true` or `false`.
    Boolean,
    /// A plain name.
    Identifier,
    /// `fn`
    Function,
    /// `num`, `flo`, `str`, `bool` or `arr`.
    Type,
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`
    For,
    /// `return`
    Return,
    /// `:` between a parameter name and its type.
    OfType,
    /// An arithmetic, comparison, logical or assignment operator.
    Operator,
    /// `( ) { } [ ] , ;`
    Punctuation,
    /// The end of the source; repeated forever once reached.
    EndOfFile,
    /// Any character the lexer does not recognise.
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Identifier => "Identifier",
            Self::Function => "Function",
            Self::Type => "Type",
            Self::If => "If",
            Self::Else => "Else",
            Self::For => "For",
            Self::Return => "Return",
            Self::OfType => "OfType",
            Self::Operator => "Operator",
            Self::Punctuation => "Punctuation",
            Self::EndOfFile => "EOF",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text together with the
/// 1-based line and column it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:   TokenKind,
    /// The token text. String literals exclude their quotes.
    pub text:   String,
    /// Line of the first character.
    pub line:   usize,
    /// Column of the first character, counted in bytes.
    pub column: usize,
}

impl Token {
    /// Returns `true` if the token has the given kind and, when `text` is
    /// not empty, the given text.
    #[must_use]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && (text.is_empty() || self.text == text)
    }

    /// Whether a `-` directly after this token is a subtraction.
    fn ends_operand(&self) -> bool {
        match self.kind {
            TokenKind::Integer
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::Boolean
            | TokenKind::Identifier => true,
            TokenKind::Punctuation => self.text == ")" || self.text == "]",
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}') at {}:{}", self.kind, self.text, self.line, self.column)
    }
}

/// Converts source text into a lazy sequence of [`Token`]s.
///
/// The lexer never fails: characters it does not recognise become
/// [`TokenKind::Unknown`] tokens and unterminated strings end at the end of
/// the line. Once the input is exhausted [`Lexer::next_token`] keeps
/// returning an end-of-file token. Iterating stops before end-of-file.
///
/// # Example
/// ```
/// use sprig::interpreter::lexer::{Lexer, TokenKind};
///
/// let kinds: Vec<TokenKind> = Lexer::new("x = 1.5;").map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Identifier,
///                 TokenKind::Operator,
///                 TokenKind::Float,
///                 TokenKind::Punctuation]);
/// ```
pub struct Lexer<'src> {
    inner:        logos::Lexer<'src, RawToken>,
    pending:      Option<Token>,
    ends_operand: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { inner:        RawToken::lexer_with_extras(source, LexerExtras::default()),
               pending:      None,
               ends_operand: false, }
    }

    /// Returns the next token, or an end-of-file token once the source is
    /// exhausted.
    pub fn next_token(&mut self) -> Token {
        let token = match self.pending.take() {
            Some(token) => token,
            None => match self.inner.next() {
                Some(Ok(raw)) => self.classify(raw),
                Some(Err(())) => self.token_here(TokenKind::Unknown, self.inner.slice()),
                None => return self.end_of_file(),
            },
        };

        self.ends_operand = token.ends_operand();
        token
    }

    fn classify(&mut self, raw: RawToken) -> Token {
        let slice = self.inner.slice();
        match raw {
            RawToken::Word => self.token_here(classify_word(slice), slice),
            RawToken::Integer => self.token_here(TokenKind::Integer, slice),
            RawToken::Float => self.token_here(TokenKind::Float, slice),
            RawToken::NegativeInteger | RawToken::NegativeFloat => {
                let kind = if raw == RawToken::NegativeFloat {
                    TokenKind::Float
                } else {
                    TokenKind::Integer
                };

                if !self.ends_operand {
                    return self.token_here(kind, slice);
                }

                let minus = self.token_here(TokenKind::Operator, "-");
                self.pending = Some(Token { kind,
                                            text: slice[1..].to_string(),
                                            line: minus.line,
                                            column: minus.column + 1 });
                minus
            },
            RawToken::String => {
                let quote = &slice[..1];
                let body = &slice[1..];
                let body = body.strip_suffix(quote).unwrap_or(body);
                self.token_here(TokenKind::String, body)
            },
            RawToken::Operator => self.token_here(TokenKind::Operator, slice),
            RawToken::Colon => self.token_here(TokenKind::OfType, slice),
            RawToken::Punctuation => self.token_here(TokenKind::Punctuation, slice),
            // Their callbacks skip them, so logos never yields these.
            RawToken::Ignored | RawToken::NewLine | RawToken::Comment => {
                self.token_here(TokenKind::Unknown, slice)
            },
        }
    }

    fn token_here(&self, kind: TokenKind, text: &str) -> Token {
        let start = self.inner.span().start;
        Token { kind,
                text: text.to_string(),
                line: self.inner.extras.line,
                column: start - self.inner.extras.line_start + 1 }
    }

    fn end_of_file(&self) -> Token {
        let end = self.inner.source().len();
        Token { kind:   TokenKind::EndOfFile,
                text:   String::new(),
                line:   self.inner.extras.line,
                column: end.saturating_sub(self.inner.extras.line_start) + 1, }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::EndOfFile).then_some(token)
    }
}

/// Classifies a word as the function keyword, a type keyword, a control
/// keyword, a boolean literal or an identifier, in that order.
fn classify_word(word: &str) -> TokenKind {
    if word == FUNCTION_KEYWORD {
        return TokenKind::Function;
    }
    if TYPE_KEYWORDS.contains(&word) {
        return TokenKind::Type;
    }
    if CONTROL_KEYWORDS.contains(&word) {
        return match word {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            _ => TokenKind::Return,
        };
    }
    if word == "true" || word == "false" {
        return TokenKind::Boolean;
    }
    TokenKind::Identifier
}
