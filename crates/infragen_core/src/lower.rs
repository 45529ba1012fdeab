//! The lowering contract every backend implements.
//!
//! A backend provides one method per representable expression variant ([`ExprLowering`]) and one per declaration
//! kind ([`NodeLowering`]). The dispatchers in this module own the only `match` over [`Expression`] and [`Node`], so
//! a new variant upstream is a compile error here rather than a silent fallthrough in some backend.
//!
//! ## Notes
//!
//! - Methods take `&self`: lowering is pure. Backends that need state build it before lowering starts.
//! - Lowering is total. Shapes a target cannot express go to [`ExprLowering::unrepresentable`], which receives the
//!   original expression so the backend can choose its own marker.
//! - Recursion is the backend's business: implementations call [`lower_expr`] on children.
//!
//! ## Examples
//!
//! ```rust
//! use infragen_core::ir::{Expression, Literal, ObjectItem, TraversalStep};
//! use infragen_core::lower::{ExprLowering, lower_expr};
//!
//! /// Counts the representable nodes of an expression tree.
//! struct Count;
//!
//! impl ExprLowering for Count {
//!     type Lowered = usize;
//!
//!     fn literal(&self, _: &Literal) -> usize { 1 }
//!     fn template(&self, parts: &[Expression]) -> usize {
//!         1 + parts.iter().map(|p| lower_expr(self, p)).sum::<usize>()
//!     }
//!     fn index(&self, c: &Expression, k: &Expression) -> usize { 1 + lower_expr(self, c) + lower_expr(self, k) }
//!     fn object_cons(&self, items: &[ObjectItem]) -> usize {
//!         1 + items.iter().map(|i| lower_expr(self, &i.value)).sum::<usize>()
//!     }
//!     fn tuple_cons(&self, items: &[Expression]) -> usize {
//!         1 + items.iter().map(|i| lower_expr(self, i)).sum::<usize>()
//!     }
//!     fn function_call(&self, _: &str, args: &[Expression]) -> usize {
//!         1 + args.iter().map(|a| lower_expr(self, a)).sum::<usize>()
//!     }
//!     fn relative_traversal(&self, source: &Expression, _: &[TraversalStep]) -> usize { 1 + lower_expr(self, source) }
//!     fn scope_traversal(&self, _: &str, _: &[TraversalStep]) -> usize { 1 }
//!     fn unrepresentable(&self, _: &Expression) -> usize { 0 }
//! }
//!
//! let expr = Expression::call("join", vec![Expression::string(","), Expression::tuple(vec![])]);
//! assert_eq!(lower_expr(&Count, &expr), 3);
//! ```

use crate::ir::{
    ConfigVariable, Expression, Literal, LocalVariable, Node, ObjectItem, OutputVariable, Resource, TraversalStep,
};

/// Per-variant expression lowering.
pub trait ExprLowering {
    /// What an expression lowers to in this backend.
    type Lowered;

    fn literal(&self, value: &Literal) -> Self::Lowered;
    fn template(&self, parts: &[Expression]) -> Self::Lowered;
    fn index(&self, collection: &Expression, key: &Expression) -> Self::Lowered;
    fn object_cons(&self, items: &[ObjectItem]) -> Self::Lowered;
    fn tuple_cons(&self, items: &[Expression]) -> Self::Lowered;
    fn function_call(&self, name: &str, args: &[Expression]) -> Self::Lowered;
    fn relative_traversal(&self, source: &Expression, traversal: &[TraversalStep]) -> Self::Lowered;
    fn scope_traversal(&self, root_name: &str, traversal: &[TraversalStep]) -> Self::Lowered;

    /// Called for every shape outside the representable set.
    fn unrepresentable(&self, expr: &Expression) -> Self::Lowered;
}

/// Dispatch one expression to its lowering method.
pub fn lower_expr<L: ExprLowering + ?Sized>(lowering: &L, expr: &Expression) -> L::Lowered {
    match expr {
        Expression::Literal { value } => lowering.literal(value),
        Expression::Template { parts } => lowering.template(parts),
        Expression::Index { collection, key } => lowering.index(collection, key),
        Expression::ObjectCons { items } => lowering.object_cons(items),
        Expression::TupleCons { items } => lowering.tuple_cons(items),
        Expression::FunctionCall { name, args } => lowering.function_call(name, args),
        Expression::RelativeTraversal { source, traversal } => lowering.relative_traversal(source, traversal),
        Expression::ScopeTraversal { root_name, traversal } => lowering.scope_traversal(root_name, traversal),
        Expression::AnonymousFunction { .. }
        | Expression::BinaryOp { .. }
        | Expression::UnaryOp { .. }
        | Expression::Conditional { .. }
        | Expression::For { .. }
        | Expression::Splat { .. }
        | Expression::Parentheses { .. }
        | Expression::TemplateJoin { .. }
        | Expression::Error { .. } => lowering.unrepresentable(expr),
    }
}

/// Per-kind declaration lowering.
pub trait NodeLowering {
    /// What a declaration lowers to in this backend.
    type Declaration;

    fn resource(&self, resource: &Resource) -> Self::Declaration;
    fn local_variable(&self, variable: &LocalVariable) -> Self::Declaration;
    fn output_variable(&self, output: &OutputVariable) -> Self::Declaration;
    fn config_variable(&self, config: &ConfigVariable) -> Self::Declaration;
}

/// Dispatch one declaration. Returns `None` for kinds outside the lowerable surface (components).
pub fn lower_node<L: NodeLowering + ?Sized>(lowering: &L, node: &Node) -> Option<L::Declaration> {
    match node {
        Node::Resource(r) => Some(lowering.resource(r)),
        Node::LocalVariable(v) => Some(lowering.local_variable(v)),
        Node::OutputVariable(o) => Some(lowering.output_variable(o)),
        Node::ConfigVariable(c) => Some(lowering.config_variable(c)),
        Node::Component(_) => None,
    }
}

/// Lower declarations in order, pairing each result with its source node. Skipped kinds are left out.
pub fn lower_nodes<'n, L: NodeLowering + ?Sized>(
    lowering: &L,
    nodes: &'n [Node],
) -> Vec<(&'n Node, L::Declaration)> {
    nodes
        .iter()
        .filter_map(|node| lower_node(lowering, node).map(|lowered| (node, lowered)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BinaryOperator, Component, ConfigType, UnaryOperator};

    /// Renders expressions back to a compact source-like form.
    struct Render;

    impl ExprLowering for Render {
        type Lowered = String;

        fn literal(&self, value: &Literal) -> String {
            match value {
                Literal::Bool(b) => b.to_string(),
                Literal::Number(n) => n.to_string(),
                Literal::String(s) => format!("{:?}", s),
                Literal::Null => "null".to_string(),
            }
        }

        fn template(&self, parts: &[Expression]) -> String {
            let parts: Vec<_> = parts.iter().map(|p| lower_expr(self, p)).collect();
            format!("tpl({})", parts.join(" "))
        }

        fn index(&self, collection: &Expression, key: &Expression) -> String {
            format!("{}[{}]", lower_expr(self, collection), lower_expr(self, key))
        }

        fn object_cons(&self, items: &[ObjectItem]) -> String {
            let items: Vec<_> = items
                .iter()
                .map(|i| format!("{}={}", lower_expr(self, &i.key), lower_expr(self, &i.value)))
                .collect();
            format!("{{{}}}", items.join(","))
        }

        fn tuple_cons(&self, items: &[Expression]) -> String {
            let items: Vec<_> = items.iter().map(|i| lower_expr(self, i)).collect();
            format!("[{}]", items.join(","))
        }

        fn function_call(&self, name: &str, args: &[Expression]) -> String {
            let args: Vec<_> = args.iter().map(|a| lower_expr(self, a)).collect();
            format!("{}({})", name, args.join(","))
        }

        fn relative_traversal(&self, source: &Expression, traversal: &[TraversalStep]) -> String {
            format!("({}){}", lower_expr(self, source), steps(traversal))
        }

        fn scope_traversal(&self, root_name: &str, traversal: &[TraversalStep]) -> String {
            format!("{}{}", root_name, steps(traversal))
        }

        fn unrepresentable(&self, expr: &Expression) -> String {
            format!("<{}>", expr.kind_name())
        }
    }

    impl NodeLowering for Render {
        type Declaration = String;

        fn resource(&self, resource: &Resource) -> String {
            format!("resource {}", resource.name)
        }

        fn local_variable(&self, variable: &LocalVariable) -> String {
            format!("{} = {}", variable.name, lower_expr(self, &variable.definition))
        }

        fn output_variable(&self, output: &OutputVariable) -> String {
            format!("output {}", output.name)
        }

        fn config_variable(&self, config: &ConfigVariable) -> String {
            format!("config {} {}", config.name, config.config_type)
        }
    }

    fn steps(traversal: &[TraversalStep]) -> String {
        traversal
            .iter()
            .map(|s| match s {
                TraversalStep::Attr { name } => format!(".{}", name),
                TraversalStep::Index { key } => format!("[{}]", key.to_i64()),
            })
            .collect()
    }

    fn var(name: &str) -> Box<Expression> {
        Box::new(Expression::scope_traversal(name, vec![]))
    }

    #[test]
    fn test_representable_variants_dispatch_to_their_methods() {
        let expr = Expression::call(
            "f",
            vec![
                Expression::template(vec![Expression::string("a"), Expression::number(1)]),
                Expression::index(Expression::scope_traversal("xs", vec![]), Expression::number(0)),
                Expression::object(vec![ObjectItem::named("k", Expression::bool(true))]),
                Expression::tuple(vec![Expression::null()]),
                Expression::relative_traversal(
                    Expression::call("g", vec![]),
                    vec![TraversalStep::attr("id"), TraversalStep::index(2)],
                ),
            ],
        );

        assert_eq!(
            lower_expr(&Render, &expr),
            r#"f(tpl("a" 1),xs[0],{"k"=true},[null],(g()).id[2])"#
        );
    }

    #[test]
    fn test_every_other_shape_is_unrepresentable() {
        let shapes = vec![
            Expression::AnonymousFunction {
                parameters: vec!["x".into()],
                body: var("x"),
            },
            Expression::BinaryOp {
                operation: BinaryOperator::Add,
                left_operand: var("a"),
                right_operand: var("b"),
            },
            Expression::UnaryOp {
                operation: UnaryOperator::Negate,
                operand: var("a"),
            },
            Expression::Conditional {
                condition: var("c"),
                true_result: var("a"),
                false_result: var("b"),
            },
            Expression::For {
                key_variable: None,
                value_variable: "v".into(),
                collection: var("xs"),
                key: None,
                value: var("v"),
                condition: None,
                group: false,
            },
            Expression::Splat {
                source: var("xs"),
                each: var("id"),
            },
            Expression::Parentheses { expression: var("a") },
            Expression::TemplateJoin { tuple: var("parts") },
            Expression::Error {
                message: "unbound".into(),
            },
        ];

        for shape in shapes {
            let lowered = lower_expr(&Render, &shape);
            assert_eq!(lowered, format!("<{}>", shape.kind_name()));
        }
    }

    #[test]
    fn test_lower_nodes_skips_components_and_keeps_order() {
        let nodes: Vec<Node> = vec![
            ConfigVariable::new("region", ConfigType::String).into(),
            Component::new("net", "./network").into(),
            Resource::new("bucket", "aws:s3:Bucket").into(),
            LocalVariable::new("x", Expression::number(1)).into(),
            OutputVariable::new("out", Expression::null()).into(),
        ];

        let lowered: Vec<_> = lower_nodes(&Render, &nodes).into_iter().map(|(_, s)| s).collect();
        assert_eq!(
            lowered,
            vec!["config region string", "resource bucket", "x = 1", "output out"]
        );
    }

    #[test]
    fn test_lower_node_component_is_none() {
        let node: Node = Component::new("net", "./network").into();
        assert!(lower_node(&Render, &node).is_none());
    }
}
