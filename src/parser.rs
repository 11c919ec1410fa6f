use std::cell::RefCell;

use crate::ast::{ExprNode, NumberNode, ParamNode, StringNode, ValueNode};
use crate::lexer::{Token, TokenKind};
use crate::map::NamedParamMap;

/// Hard bound on grammar recursion (nested expressions and chained joins).
/// Runaway nesting surfaces as a [`ParseError`] instead of a stack overflow.
const MAX_DEPTH: usize = 128;

/// A grammar violation.
///
/// Raised once per parse and not recoverable: either the input is fixed or
/// the parse is abandoned. Carries the offset at which matching was
/// attempted and the unconsumed remainder of the input.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token of the given kind was required at `offset` but the source
    /// does not match there.
    UnexpectedToken {
        expected: TokenKind,
        offset: usize,
        remainder: String,
    },
    /// None of the value alternatives matched after a `name=`.
    InvalidValue { offset: usize, remainder: String },
    /// A well-formed prefix was parsed but text remains.
    TrailingInput { offset: usize, remainder: String },
    /// The recursion depth guard tripped.
    TooDeep { offset: usize },
}

impl ParseError {
    /// Byte offset at which matching was attempted.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { offset, .. } => *offset,
            ParseError::InvalidValue { offset, .. } => *offset,
            ParseError::TrailingInput { offset, .. } => *offset,
            ParseError::TooDeep { offset } => *offset,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected,
                offset,
                remainder,
            } => write!(
                f,
                "cannot find {} token at offset {}: `{}` does not match {}",
                expected,
                offset,
                remainder,
                expected.pattern()
            ),
            ParseError::InvalidValue { offset, remainder } => write!(
                f,
                "cannot find a valid parameter value at offset {}: `{}`",
                offset, remainder
            ),
            ParseError::TrailingInput { offset, remainder } => write!(
                f,
                "unexpected trailing input at offset {}: `{}`",
                offset, remainder
            ),
            ParseError::TooDeep { offset } => write!(
                f,
                "expression nesting exceeds the depth limit at offset {}",
                offset
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one configuration expression into its queryable map.
///
/// The whole input must be consumed; trailing text is a grammar violation.
///
/// # Examples
///
/// ```
/// use parmap_lang::parse;
///
/// let map = parse("foo(a=1.5;b=hello)").unwrap();
/// assert_eq!(map.name(), "foo");
/// assert_eq!(map.number("a"), Some(1.5));
/// assert_eq!(map.string("b"), Some("hello"));
/// ```
pub fn parse(text: &str) -> Result<NamedParamMap, ParseError> {
    parse_tree(text).map(|node| NamedParamMap::from(&node))
}

/// Parse one configuration expression into its syntax tree, without
/// building the map.
pub fn parse_tree(text: &str) -> Result<ExprNode, ParseError> {
    let parser = Parser::new(text);
    let node = match parser.expression(0, 0) {
        Ok(node) => node,
        Err(err) => return Err(parser.deepest_or(err)),
    };
    parser.check_consumed(node.token.end)?;
    Ok(node)
}

/// Parse a top-level list of expressions - a bracketed list or a join form -
/// into one map per expanded variant.
///
/// # Examples
///
/// ```
/// use parmap_lang::parse_list;
///
/// let maps = parse_list("(a=[1;2])*[foo();bar()]").unwrap();
/// assert_eq!(maps.len(), 4);
/// assert_eq!(maps[0].name(), "foo");
/// assert_eq!(maps[0].number("a"), Some(1.0));
/// ```
pub fn parse_list(text: &str) -> Result<Vec<NamedParamMap>, ParseError> {
    let parser = Parser::new(text);
    let (token, items) = match parser.expr_list(0, 0) {
        Ok(parsed) => parsed,
        Err(err) => return Err(parser.deepest_or(err)),
    };
    parser.check_consumed(token.end)?;
    Ok(items.iter().map(NamedParamMap::from).collect())
}

struct Parser<'a> {
    src: &'a str,
    // Furthest failure seen so far. Backtracking discards errors from
    // abandoned alternatives; when the whole parse fails, the deepest one
    // is the informative one to report.
    deepest: RefCell<Option<ParseError>>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser {
            src,
            deepest: RefCell::new(None),
        }
    }

    fn record(&self, err: ParseError) -> ParseError {
        let mut slot = self.deepest.borrow_mut();
        let keep = match slot.as_ref() {
            Some(prev) => err.offset() >= prev.offset(),
            None => true,
        };
        if keep {
            *slot = Some(err.clone());
        }
        err
    }

    fn deepest_or(&self, err: ParseError) -> ParseError {
        self.deepest.borrow().clone().unwrap_or(err)
    }

    fn remainder(&self, i: usize) -> String {
        self.src[i..].to_string()
    }

    fn check_consumed(&self, end: usize) -> Result<(), ParseError> {
        if end == self.src.len() {
            Ok(())
        } else {
            let err = self.record(ParseError::TrailingInput {
                offset: end,
                remainder: self.remainder(end),
            });
            Err(self.deepest_or(err))
        }
    }

    fn token(&self, kind: TokenKind, i: usize) -> Result<Token, ParseError> {
        kind.next(self.src, i).ok_or_else(|| {
            self.record(ParseError::UnexpectedToken {
                expected: kind,
                offset: i,
                remainder: self.remainder(i),
            })
        })
    }

    fn number(&self, i: usize) -> Result<NumberNode, ParseError> {
        let token = self.token(TokenKind::Num, i)?;
        let value = self.src[token.start..token.end]
            .parse::<f64>()
            .expect("NUM tokens are valid float literals");
        Ok(NumberNode { token, value })
    }

    fn bare_string(&self, i: usize) -> Result<StringNode, ParseError> {
        let token = self.token(TokenKind::BareString, i)?;
        Ok(StringNode {
            token,
            value: self.src[token.start..token.end].to_string(),
        })
    }

    /// `name(param;param;...)`
    fn expression(&self, i: usize, depth: usize) -> Result<ExprNode, ParseError> {
        if depth > MAX_DEPTH {
            return Err(self.record(ParseError::TooDeep { offset: i }));
        }
        let name_t = self.token(TokenKind::Name, i)?;
        let open = self.token(TokenKind::OpenContent, name_t.end)?;
        let (params, end) = self.param_seq(open.end, depth)?;
        let close = self.token(TokenKind::ClosedContent, end)?;
        Ok(ExprNode {
            token: Token::new(name_t.start, close.end),
            name: self.src[name_t.start..name_t.end].to_string(),
            params,
        })
    }

    /// `name=value`
    fn param(&self, i: usize, depth: usize) -> Result<ParamNode, ParseError> {
        let name_t = self.token(TokenKind::BareString, i)?;
        let assign = self.token(TokenKind::Assign, name_t.end)?;
        let value = self.value(assign.end, depth)?;
        let end = value.token().end;
        Ok(ParamNode {
            token: Token::new(name_t.start, end),
            name: self.src[name_t.start..name_t.end].to_string(),
            value,
        })
    }

    /// Value alternatives in fixed priority order; the first success wins
    /// and the rest are never attempted. Failed attempts leave no trace on
    /// the input position.
    fn value(&self, i: usize, depth: usize) -> Result<ValueNode, ParseError> {
        if let Ok(node) = self.expression(i, depth + 1) {
            return Ok(ValueNode::Expr(node));
        }
        if let Ok(node) = self.number(i) {
            return Ok(ValueNode::Number(node));
        }
        if let Ok(node) = self.bare_string(i) {
            return Ok(ValueNode::String(node));
        }
        if let Ok((token, items)) = self.expr_list(i, depth + 1) {
            return Ok(ValueNode::ExprList { token, items });
        }
        if let Ok((token, items)) = self.number_list(i) {
            return Ok(ValueNode::NumberList { token, items });
        }
        if let Ok((token, items)) = self.string_list(i) {
            return Ok(ValueNode::StringList { token, items });
        }
        Err(self.record(ParseError::InvalidValue {
            offset: i,
            remainder: self.remainder(i),
        }))
    }

    /// `[item;item;...]` - possibly empty. An item is mandatory after a
    /// separator, so a failure there is a real error, not a backtrack.
    fn seq<T>(
        &self,
        i: usize,
        parse_item: impl Fn(usize) -> Result<(T, usize), ParseError>,
    ) -> Result<(Vec<T>, usize), ParseError> {
        let mut items = Vec::new();
        let mut end = i;
        match parse_item(i) {
            Ok((item, item_end)) => {
                items.push(item);
                end = item_end;
            }
            Err(_) => return Ok((items, end)),
        }
        while let Some(sep) = TokenKind::ListSep.next(self.src, end) {
            let (item, item_end) = parse_item(sep.end)?;
            items.push(item);
            end = item_end;
        }
        Ok((items, end))
    }

    fn param_seq(&self, i: usize, depth: usize) -> Result<(Vec<ParamNode>, usize), ParseError> {
        self.seq(i, |j| {
            self.param(j, depth).map(|node| {
                let end = node.token.end;
                (node, end)
            })
        })
    }

    fn number_list(&self, i: usize) -> Result<(Token, Vec<NumberNode>), ParseError> {
        let open = self.token(TokenKind::OpenList, i)?;
        let (items, end) = self.seq(open.end, |j| {
            self.number(j).map(|node| {
                let end = node.token.end;
                (node, end)
            })
        })?;
        let close = self.token(TokenKind::ClosedList, end)?;
        Ok((Token::new(open.start, close.end), items))
    }

    fn string_list(&self, i: usize) -> Result<(Token, Vec<StringNode>), ParseError> {
        let open = self.token(TokenKind::OpenList, i)?;
        let (items, end) = self.seq(open.end, |j| {
            self.bare_string(j).map(|node| {
                let end = node.token.end;
                (node, end)
            })
        })?;
        let close = self.token(TokenKind::ClosedList, end)?;
        Ok((Token::new(open.start, close.end), items))
    }

    /// A list of expressions is either a join form or a literal
    /// `[expr;expr;...]` list; the join form is tried first.
    fn expr_list(&self, i: usize, depth: usize) -> Result<(Token, Vec<ExprNode>), ParseError> {
        if depth > MAX_DEPTH {
            return Err(self.record(ParseError::TooDeep { offset: i }));
        }
        if let Ok(joined) = self.join(i, depth) {
            return Ok(joined);
        }
        let open = self.token(TokenKind::OpenList, i)?;
        let (items, end) = self.seq(open.end, |j| {
            self.expression(j, depth + 1).map(|node| {
                let end = node.token.end;
                (node, end)
            })
        })?;
        let close = self.token(TokenKind::ClosedList, end)?;
        Ok((Token::new(open.start, close.end), items))
    }

    /// `(name=value)*list` - the base list parses first, so chained joins
    /// apply right to left; the expansion then broadcasts or
    /// cross-multiplies the templated parameter over it.
    fn join(&self, i: usize, depth: usize) -> Result<(Token, Vec<ExprNode>), ParseError> {
        let open = self.token(TokenKind::OpenContent, i)?;
        let template = self.param(open.end, depth)?;
        let close = self.token(TokenKind::ClosedContent, template.token.end)?;
        let star = self.token(TokenKind::Join, close.end)?;
        let (base_token, base) = self.expr_list(star.end, depth + 1)?;
        let token = Token::new(open.start, base_token.end);
        Ok((token, expand_join(&template, &base)))
    }
}

/// Expansion of one templated parameter over a base list.
///
/// Scalar template values broadcast: every base element gains the identical
/// `name=value` binding and the list keeps its length. List values
/// cross-multiply: the result has one element per (base, item) pair,
/// enumerated base-major, each bound to one item of the template list.
/// The new parameter lands at the end of each element's parameter sequence,
/// so a join can override a parameter the base already carries.
fn expand_join(template: &ParamNode, base: &[ExprNode]) -> Vec<ExprNode> {
    let mut out = Vec::new();
    for expr in base {
        match &template.value {
            ValueNode::Number(_) | ValueNode::String(_) | ValueNode::Expr(_) => {
                out.push(with_param(expr, template.clone()));
            }
            ValueNode::NumberList { token, items } => {
                for item in items {
                    out.push(with_param(
                        expr,
                        ParamNode {
                            token: *token,
                            name: template.name.clone(),
                            value: ValueNode::Number(item.clone()),
                        },
                    ));
                }
            }
            ValueNode::StringList { token, items } => {
                for item in items {
                    out.push(with_param(
                        expr,
                        ParamNode {
                            token: *token,
                            name: template.name.clone(),
                            value: ValueNode::String(item.clone()),
                        },
                    ));
                }
            }
            ValueNode::ExprList { token, items } => {
                for item in items {
                    out.push(with_param(
                        expr,
                        ParamNode {
                            token: *token,
                            name: template.name.clone(),
                            value: ValueNode::Expr(item.clone()),
                        },
                    ));
                }
            }
        }
    }
    out
}

fn with_param(expr: &ExprNode, param: ParamNode) -> ExprNode {
    let mut params = expr.params.clone();
    params.push(param);
    ExprNode {
        token: expr.token,
        name: expr.name.clone(),
        params,
    }
}
