use std::{fmt, fmt::Write as _, rc::Rc};

use crate::interpreter::value::types::ValueType;

/// A binary operator as written between two primaries.
///
/// Every operator the lexer produces can appear in a binary chain, including
/// `=` after a non-identifier and a lone `!`. Operators that have no meaning
/// for their operands are rejected at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `=` in operator position.
    Assign,
    /// `!` in operator position.
    Not,
}

impl BinaryOperator {
    /// Maps operator token text to an operator.
    ///
    /// # Example
    /// ```
    /// use sprig::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol("<="), Some(BinaryOperator::LessEqual));
    /// assert_eq!(BinaryOperator::from_symbol("%"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            "&&" => Self::And,
            "||" => Self::Or,
            "=" => Self::Assign,
            "!" => Self::Not,
            _ => return None,
        })
    }

    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Assign => "=",
            Self::Not => "!",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A declared function parameter: `name: type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Name bound inside the function body.
    pub name: String,
    /// Exact type every argument must have.
    pub ty:   ValueType,
}

/// A function declaration, shared between the syntax tree and the function
/// registry.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Name of the function.
    pub name:        String,
    /// Declared parameters, in order.
    pub params:      Vec<Param>,
    /// Declared return type, checked only on explicit `return`.
    pub return_type: Option<ValueType>,
    /// Statements of the function body.
    pub body:        Block,
    /// Line number in the source code.
    pub line:        usize,
}

/// A sequence of statements that gets its own scope when evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Node>,
    /// Line number of the opening delimiter.
    pub line:       usize,
}

/// The header of a `for` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopHeader {
    /// `for(i = 0; limit)`: assign, then count up by one while `i < limit`.
    Counting {
        /// The initialising expression, expected to be an assignment.
        init:  Box<Node>,
        /// Re-evaluated before every iteration.
        limit: Box<Node>,
    },
    /// `for(condition)`: loop while the condition is truthy.
    Condition(Box<Node>),
}

/// An abstract syntax tree node.
///
/// Nodes exclusively own their children and are never mutated after
/// parsing. Function declarations sit behind an [`Rc`] so the function
/// registry can keep the body alive after the declaring statement list is
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `fn name(params) type? block`
    FunctionDecl(Rc<FunctionDef>),
    /// `name(arguments)`
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Argument expressions, evaluated in the caller's scope.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `return value;`
    Return {
        /// The returned expression.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if (condition) block`
    If {
        /// The condition expression.
        condition: Box<Self>,
        /// Evaluated when the condition is truthy.
        body:      Block,
        /// Line number in the source code.
        line:      usize,
    },
    /// `for (header) block`
    For {
        /// Counting or condition-only header.
        header: LoopHeader,
        /// The loop body.
        body:   Block,
        /// Line number in the source code.
        line:   usize,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// An integer literal.
    IntLiteral {
        /// The literal value.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A float literal.
    FloatLiteral {
        /// The literal value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal.
    StringLiteral {
        /// The literal text, without quotes.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// `true` or `false`.
    BoolLiteral {
        /// The literal value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// `[a, b, c]`
    ArrayLiteral {
        /// Element expressions.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `left op right`
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `target = value`
    Assignment {
        /// Name of the variable being assigned.
        target: String,
        /// The assigned expression.
        value:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Node {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use sprig::ast::Node;
    ///
    /// let node = Node::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(node.line_number(), 5);
    /// ```
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::FunctionDecl(def) => def.line,
            Self::FunctionCall { line, .. }
            | Self::Return { line, .. }
            | Self::If { line, .. }
            | Self::For { line, .. }
            | Self::Identifier { line, .. }
            | Self::IntLiteral { line, .. }
            | Self::FloatLiteral { line, .. }
            | Self::StringLiteral { line, .. }
            | Self::BoolLiteral { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Assignment { line, .. } => *line,
        }
    }
}

/// Renders a parsed program as an indented tree, one node per line.
///
/// # Example
/// ```
/// use sprig::{ast::dump, interpreter::parser::core::parse_source};
///
/// let program = parse_source("x = 1 + 2;").unwrap();
///
/// assert_eq!(dump(&program),
///            "Assignment: x\n  BinaryOp: +\n    IntLiteral: 1\n    IntLiteral: 2\n");
/// ```
#[must_use]
pub fn dump(program: &[Node]) -> String {
    let mut out = String::new();
    for node in program {
        dump_node(&mut out, node, 0);
    }
    out
}

fn dump_line(out: &mut String, depth: usize, label: &str, payload: &dyn fmt::Display) {
    let _ = writeln!(out, "{:indent$}{label}: {payload}", "", indent = depth * 2);
}

fn dump_block(out: &mut String, block: &Block, depth: usize) {
    dump_line(out, depth, "Block", &block.statements.len());
    for statement in &block.statements {
        dump_node(out, statement, depth + 1);
    }
}

fn dump_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::FunctionDecl(def) => {
            dump_line(out, depth, "FunctionDecl", &def.name);
            let params = def.params
                            .iter()
                            .map(|p| format!("{}:{}", p.name, p.ty))
                            .collect::<Vec<_>>()
                            .join(", ");
            dump_line(out, depth + 1, "ParamList", &params);
            if let Some(ty) = def.return_type {
                dump_line(out, depth + 1, "ReturnType", &ty);
            }
            dump_block(out, &def.body, depth + 1);
        },
        Node::FunctionCall { name, arguments, .. } => {
            dump_line(out, depth, "FunctionCall", name);
            for argument in arguments {
                dump_node(out, argument, depth + 1);
            }
        },
        Node::Return { value, .. } => {
            dump_line(out, depth, "Return", &"return");
            dump_node(out, value, depth + 1);
        },
        Node::If { condition, body, .. } => {
            dump_line(out, depth, "If", &"if");
            dump_node(out, condition, depth + 1);
            dump_block(out, body, depth + 1);
        },
        Node::For { header, body, .. } => {
            dump_line(out, depth, "For", &"for");
            match header {
                LoopHeader::Counting { init, limit } => {
                    dump_line(out, depth + 1, "ForLoop", &"loop");
                    dump_node(out, init, depth + 2);
                    dump_node(out, limit, depth + 2);
                },
                LoopHeader::Condition(condition) => {
                    dump_line(out, depth + 1, "While", &"while");
                    dump_node(out, condition, depth + 2);
                },
            }
            dump_block(out, body, depth + 1);
        },
        Node::Identifier { name, .. } => dump_line(out, depth, "Identifier", name),
        Node::IntLiteral { value, .. } => dump_line(out, depth, "IntLiteral", value),
        Node::FloatLiteral { value, .. } => dump_line(out, depth, "FloatLiteral", value),
        Node::StringLiteral { value, .. } => dump_line(out, depth, "StringLiteral", value),
        Node::BoolLiteral { value, .. } => dump_line(out, depth, "BoolLiteral", value),
        Node::ArrayLiteral { elements, .. } => {
            dump_line(out, depth, "ArrayLiteral", &elements.len());
            for element in elements {
                dump_node(out, element, depth + 1);
            }
        },
        Node::BinaryOp { left, op, right, .. } => {
            dump_line(out, depth, "BinaryOp", op);
            dump_node(out, left, depth + 1);
            dump_node(out, right, depth + 1);
        },
        Node::Assignment { target, value, .. } => {
            dump_line(out, depth, "Assignment", target);
            dump_node(out, value, depth + 1);
        },
    }
}
