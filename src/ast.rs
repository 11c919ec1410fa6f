//! # Parmap Configuration Language - Abstract Syntax Tree
//!
//! This module defines the syntax tree for the parmap configuration
//! language, a small declarative format for describing named, parameterized
//! objects.
//!
//! ## The Expression
//!
//! Everything is an expression: a (possibly dotted) name followed by a
//! parenthesized, `;`-separated list of `name=value` parameters:
//!
//! ```text
//! sim(dT=0.01;terrain=hilly(h=1.5;w=10);agents=[agent(sensors=[s.a.r;s.a.rv])])
//! ```
//!
//! A parameter value is one of six shapes: a number, a bare string, a nested
//! expression, or a homogeneous `[a;b;c]` list of any of the three. The
//! grammar is whitespace-free by construction - no rule tolerates blanks
//! between tokens.
//!
//! ## The Join Operator
//!
//! The language's only computation. `(name=value)*list` takes a list of
//! expressions and augments every element with one extra parameter:
//!
//! - a scalar value broadcasts, keeping the list's length:
//!   `(a=1)*[foo();bar()]` is `[foo(a=1);bar(a=1)]`
//! - a list value cross-multiplies, one variant per combination:
//!   `(a=[1;2])*[foo();bar()]` is `[foo(a=1);foo(a=2);bar(a=1);bar(a=2)]`
//!
//! Joins chain and apply right to left, so `(a=1)*(b=[1;2])*[foo()]`
//! first expands `b` over the literal list, then broadcasts `a` over the
//! result. One templated expression stands in for a whole grid of variants.
//!
//! ## Positions
//!
//! Every node records the [`Token`] range it was parsed from. Sequencing
//! works purely by offset: each production resumes exactly where its
//! predecessor ended, which is also what makes error offsets precise.

use crate::lexer::Token;

/// A number literal. Stored as `f64`; integer interpretation happens at
/// accessor time, never during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberNode {
    pub token: Token,
    pub value: f64,
}

/// A bare string literal (a letter followed by letters, digits, or
/// underscores). The grammar has no quoting; anything fancier than a bare
/// word is not a string.
#[derive(Debug, Clone, PartialEq)]
pub struct StringNode {
    pub token: Token,
    pub value: String,
}

/// A named expression: `name(p1=v1;p2=v2)`.
///
/// The name may be dotted (`s.a.rw`); parameter names may not.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprNode {
    pub token: Token,
    pub name: String,
    pub params: Vec<ParamNode>,
}

/// One `name=value` parameter binding inside an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamNode {
    pub token: Token,
    pub name: String,
    pub value: ValueNode,
}

/// The six shapes a parameter value can take.
///
/// List variants are homogeneous; the parser decides which list production
/// applies by trying them in a fixed order (expressions, then numbers, then
/// strings), so `[]` always parses as an empty expression list.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    Number(NumberNode),
    String(StringNode),
    Expr(ExprNode),
    NumberList { token: Token, items: Vec<NumberNode> },
    StringList { token: Token, items: Vec<StringNode> },
    ExprList { token: Token, items: Vec<ExprNode> },
}

impl ValueNode {
    /// The token range this value was parsed from. The enclosing production
    /// resumes at its `end`.
    pub fn token(&self) -> Token {
        match self {
            ValueNode::Number(n) => n.token,
            ValueNode::String(s) => s.token,
            ValueNode::Expr(e) => e.token,
            ValueNode::NumberList { token, .. } => *token,
            ValueNode::StringList { token, .. } => *token,
            ValueNode::ExprList { token, .. } => *token,
        }
    }
}
