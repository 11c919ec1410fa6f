pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod lexer;
pub mod map;
pub mod output;
pub mod parser;

pub use ast::{ExprNode, NumberNode, ParamNode, StringNode, ValueNode};
pub use lexer::{Token, TokenKind};
pub use map::NamedParamMap;
pub use output::{to_json, to_text};
pub use parser::{parse, parse_list, parse_tree, ParseError};
