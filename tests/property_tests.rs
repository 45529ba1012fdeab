//! Property-based tests for lowering
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use infragen::backend::json::JsonLowering;
use infragen::backend::{Backend, Document, JsonBackend};
use infragen::ir::{
    ConfigType, ConfigVariable, Expression, LocalVariable, Node, NumberLiteral, ObjectItem, OutputVariable, Program,
    Resource,
};
use infragen::lower::lower_expr;
use proptest::prelude::*;

/// Decimal number text in the accepted grammar, including magnitudes that overflow binary64.
fn number_text() -> impl Strategy<Value = String> {
    "-?[0-9]{1,20}(\\.[0-9]{1,20})?([eE][+-]?[0-9]{1,3})?"
}

fn literal_value(expr: &Expression) -> Document {
    lower_expr(&JsonLowering, expr)
        .get("value")
        .cloned()
        .unwrap_or(Document::Null)
}

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}"
}

/// One declaration of any lowered kind, with a small literal body.
fn node() -> impl Strategy<Value = Node> {
    prop_oneof![
        (name(), any::<bool>()).prop_map(|(n, b)| Node::from(LocalVariable::new(n, Expression::bool(b)))),
        (name(), any::<i32>()).prop_map(|(n, i)| Node::from(OutputVariable::new(n, Expression::number(i)))),
        (name(), "[a-z:]{1,12}").prop_map(|(n, t)| Node::from(Resource::new(n, t))),
        name().prop_map(|n| Node::from(ConfigVariable::new(n, ConfigType::String))),
    ]
}

// =============================================================================
// Literal Properties
// =============================================================================

#[cfg(test)]
mod literal_tests {
    use super::*;

    proptest! {
        /// Property: boolean literals lower to exactly the same boolean
        #[test]
        fn bool_literal_is_exact(b in any::<bool>()) {
            prop_assert_eq!(literal_value(&Expression::bool(b)), Document::Bool(b));
        }

        /// Property: a numeric literal lowers to the correctly rounded binary64 of its text
        #[test]
        fn number_literal_is_nearest_f64(text in number_text()) {
            let expected: f64 = text.parse().unwrap();
            let literal = NumberLiteral::parse(&text).unwrap();
            match literal_value(&Expression::number(literal)) {
                Document::Number(n) => prop_assert_eq!(n.to_bits(), expected.to_bits()),
                other => prop_assert!(false, "expected a number, got {:?}", other),
            }
        }

        /// Property: string literals are carried through unchanged
        #[test]
        fn string_literal_is_exact(s in ".*") {
            prop_assert_eq!(literal_value(&Expression::string(s.clone())), Document::String(s));
        }

        /// Property: exactly the literal-keyed entries of an object survive
        #[test]
        fn object_keeps_only_literal_keys(keys in prop::collection::vec(name(), 0..8)) {
            let mut items: Vec<ObjectItem> = keys.iter().map(|k| ObjectItem::named(k.clone(), Expression::null())).collect();
            items.push(ObjectItem::new(Expression::scope_traversal("computed", vec![]), Expression::null()));

            let lowered = lower_expr(&JsonLowering, &Expression::object(items));
            let properties = lowered.get("properties").and_then(Document::as_object).unwrap();

            let mut distinct = keys.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(properties.len(), distinct.len());
        }
    }
}

// =============================================================================
// Program Properties
// =============================================================================

#[cfg(test)]
mod program_tests {
    use super::*;

    fn generate(program: &Program) -> Vec<u8> {
        let generated = JsonBackend::new().generate_program(program).unwrap();
        generated.files["program.json"].clone()
    }

    proptest! {
        /// Property: declarations appear in input order whatever the mix of kinds
        #[test]
        fn declaration_order_is_preserved(nodes in prop::collection::vec(node(), 0..16)) {
            let program = Program { nodes: nodes.clone(), ..Program::default() };
            let value: serde_json::Value = serde_json::from_slice(&generate(&program)).unwrap();

            let names: Vec<&str> = value["nodes"]
                .as_array()
                .unwrap()
                .iter()
                .map(|n| n["name"].as_str().unwrap())
                .collect();
            let expected: Vec<&str> = nodes.iter().map(Node::name).collect();
            prop_assert_eq!(names, expected);
        }

        /// Property: generating twice yields byte-identical output
        #[test]
        fn generation_is_idempotent(nodes in prop::collection::vec(node(), 0..16)) {
            let program = Program { nodes, ..Program::default() };
            prop_assert_eq!(generate(&program), generate(&program));
        }
    }
}
