//! Property-based round-trip test: any map built from a generated syntax
//! tree must survive render-then-reparse with its contents intact.

use proptest::prelude::*;

use parmap_lang::ast::{ExprNode, NumberNode, ParamNode, StringNode, ValueNode};
use parmap_lang::lexer::Token;
use parmap_lang::{parse, NamedParamMap};

fn tok() -> Token {
    Token::new(0, 0)
}

// Dyadic rationals are exact in binary, so rendering and re-parsing cannot
// drift.
fn arb_number() -> impl Strategy<Value = f64> {
    (-8000i32..8000).prop_map(|n| f64::from(n) / 8.0)
}

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,6}"
}

fn number_node(value: f64) -> NumberNode {
    NumberNode { token: tok(), value }
}

fn string_node(value: String) -> StringNode {
    StringNode { token: tok(), value }
}

fn arb_value(depth: u32) -> BoxedStrategy<ValueNode> {
    // Scalar lists are generated non-empty: `[]` always re-parses as an
    // empty expression list, which is its own (covered) case.
    let leaf = prop_oneof![
        arb_number().prop_map(|v| ValueNode::Number(number_node(v))),
        arb_word().prop_map(|v| ValueNode::String(string_node(v))),
        prop::collection::vec(arb_number(), 1..4).prop_map(|vs| ValueNode::NumberList {
            token: tok(),
            items: vs.into_iter().map(number_node).collect(),
        }),
        prop::collection::vec(arb_word(), 1..4).prop_map(|vs| ValueNode::StringList {
            token: tok(),
            items: vs.into_iter().map(string_node).collect(),
        }),
    ];
    if depth == 0 {
        leaf.boxed()
    } else {
        prop_oneof![
            4 => leaf,
            1 => arb_expr(depth - 1).prop_map(ValueNode::Expr),
            1 => prop::collection::vec(arb_expr(depth - 1), 0..3).prop_map(|es| {
                ValueNode::ExprList {
                    token: tok(),
                    items: es,
                }
            }),
        ]
        .boxed()
    }
}

fn arb_expr(depth: u32) -> BoxedStrategy<ExprNode> {
    (
        arb_word(),
        prop::collection::vec((arb_word(), arb_value(depth)), 0..5),
    )
        .prop_map(|(name, params)| ExprNode {
            token: tok(),
            name,
            params: params
                .into_iter()
                .map(|(name, value)| ParamNode {
                    token: tok(),
                    name,
                    value,
                })
                .collect(),
        })
        .boxed()
}

proptest! {
    #[test]
    fn rendered_output_reparses_to_an_equal_map(expr in arb_expr(2)) {
        let original = NamedParamMap::from(&expr);
        let rendered = original.to_string();
        let reparsed = parse(&rendered);
        prop_assert!(reparsed.is_ok(), "rendered `{}` does not re-parse", rendered);
        prop_assert_eq!(original, reparsed.unwrap());
    }
}
