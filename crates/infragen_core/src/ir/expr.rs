//! Expression tree.
//!
//! Expressions are the terms inside a declaration: literals, templates, collection constructors, calls and
//! traversals. Eight variants are part of the structured-document surface; the remaining variants are carried so the
//! graph stays faithful to what the binder produced, and every backend must decide explicitly what to do with them.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A bound expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum Expression {
    /// A scalar literal.
    Literal { value: Literal },
    /// String interpolation; parts are concatenated in order.
    Template { parts: Vec<Expression> },
    /// `collection[key]` with an arbitrary key expression.
    Index {
        collection: Box<Expression>,
        key: Box<Expression>,
    },
    /// `{ key = value, ... }`
    ObjectCons { items: Vec<ObjectItem> },
    /// `[a, b, c]`
    TupleCons { items: Vec<Expression> },
    /// `name(args...)`. The name is opaque at this layer.
    FunctionCall { name: String, args: Vec<Expression> },
    /// Attribute/index steps applied to the result of another expression.
    RelativeTraversal {
        source: Box<Expression>,
        traversal: Vec<TraversalStep>,
    },
    /// Attribute/index steps starting from a name in program scope.
    ScopeTraversal {
        root_name: String,
        traversal: Vec<TraversalStep>,
    },

    // Shapes with no structured-document form
    AnonymousFunction {
        parameters: Vec<String>,
        body: Box<Expression>,
    },
    BinaryOp {
        operation: BinaryOperator,
        left_operand: Box<Expression>,
        right_operand: Box<Expression>,
    },
    UnaryOp {
        operation: UnaryOperator,
        operand: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        true_result: Box<Expression>,
        false_result: Box<Expression>,
    },
    /// `[for k, v in coll : value if cond]` / `{for k, v in coll : key => value...}`
    For {
        key_variable: Option<String>,
        value_variable: String,
        collection: Box<Expression>,
        key: Option<Box<Expression>>,
        value: Box<Expression>,
        condition: Option<Box<Expression>>,
        #[serde(default)]
        group: bool,
    },
    /// `source[*].each`
    Splat {
        source: Box<Expression>,
        each: Box<Expression>,
    },
    Parentheses { expression: Box<Expression> },
    /// Template `for` directive output joined into a string.
    TemplateJoin { tuple: Box<Expression> },
    /// A term the binder could not bind; the binder has already reported it.
    Error { message: String },
}

impl Expression {
    pub fn literal(value: Literal) -> Self {
        Expression::Literal { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::literal(Literal::String(value.into()))
    }

    pub fn number(value: impl Into<NumberLiteral>) -> Self {
        Expression::literal(Literal::Number(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Expression::literal(Literal::Bool(value))
    }

    pub fn null() -> Self {
        Expression::literal(Literal::Null)
    }

    pub fn template(parts: Vec<Expression>) -> Self {
        Expression::Template { parts }
    }

    pub fn index(collection: Expression, key: Expression) -> Self {
        Expression::Index {
            collection: Box::new(collection),
            key: Box::new(key),
        }
    }

    pub fn object(items: Vec<ObjectItem>) -> Self {
        Expression::ObjectCons { items }
    }

    pub fn tuple(items: Vec<Expression>) -> Self {
        Expression::TupleCons { items }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    pub fn relative_traversal(source: Expression, traversal: Vec<TraversalStep>) -> Self {
        Expression::RelativeTraversal {
            source: Box::new(source),
            traversal,
        }
    }

    pub fn scope_traversal(root_name: impl Into<String>, traversal: Vec<TraversalStep>) -> Self {
        Expression::ScopeTraversal {
            root_name: root_name.into(),
            traversal,
        }
    }

    /// Short name of the variant, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Literal { .. } => "Literal",
            Expression::Template { .. } => "Template",
            Expression::Index { .. } => "Index",
            Expression::ObjectCons { .. } => "ObjectCons",
            Expression::TupleCons { .. } => "TupleCons",
            Expression::FunctionCall { .. } => "FunctionCall",
            Expression::RelativeTraversal { .. } => "RelativeTraversal",
            Expression::ScopeTraversal { .. } => "ScopeTraversal",
            Expression::AnonymousFunction { .. } => "AnonymousFunction",
            Expression::BinaryOp { .. } => "BinaryOp",
            Expression::UnaryOp { .. } => "UnaryOp",
            Expression::Conditional { .. } => "Conditional",
            Expression::For { .. } => "For",
            Expression::Splat { .. } => "Splat",
            Expression::Parentheses { .. } => "Parentheses",
            Expression::TemplateJoin { .. } => "TemplateJoin",
            Expression::Error { .. } => "Error",
        }
    }
}

impl From<Literal> for Expression {
    fn from(value: Literal) -> Self {
        Expression::literal(value)
    }
}

/// One `key = value` entry of an object constructor.
///
/// Keys are expressions because the source language allows computed keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectItem {
    pub key: Expression,
    pub value: Expression,
}

impl ObjectItem {
    pub fn new(key: Expression, value: Expression) -> Self {
        Self { key, value }
    }

    /// An item keyed by a literal string.
    pub fn named(key: impl Into<String>, value: Expression) -> Self {
        Self::new(Expression::string(key), value)
    }

    /// The key text, when the key is a literal string.
    pub fn literal_key(&self) -> Option<&str> {
        match &self.key {
            Expression::Literal {
                value: Literal::String(s),
            } => Some(s),
            _ => None,
        }
    }
}

/// Scalar literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Literal {
    Bool(bool),
    Number(NumberLiteral),
    String(String),
    Null,
}

/// One hop of a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TraversalStep {
    /// `.name`
    Attr { name: String },
    /// `[key]`; keys are integral by construction upstream.
    Index { key: NumberLiteral },
}

impl TraversalStep {
    pub fn attr(name: impl Into<String>) -> Self {
        TraversalStep::Attr { name: name.into() }
    }

    pub fn index(key: impl Into<NumberLiteral>) -> Self {
        TraversalStep::Index { key: key.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LogicalAnd,
    LogicalOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOperator {
    Negate,
    LogicalNot,
}

// ============================================================================
// Numbers
// ============================================================================

/// Arbitrary-precision number, kept as its decimal text.
///
/// The text is validated on construction (`-?digits(.digits)?([eE][+-]?digits)?`), so conversions never fail.
/// Conversions to machine types are deliberately lossy; see [`NumberLiteral::to_f64`] and
/// [`NumberLiteral::to_i64`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberLiteral(String);

impl NumberLiteral {
    /// Parse decimal text.
    pub fn parse(text: &str) -> Result<Self, ParseNumberError> {
        if is_decimal(text) {
            Ok(Self(text.to_string()))
        } else {
            Err(ParseNumberError { text: text.to_string() })
        }
    }

    /// Build from a float. Returns `None` for NaN and infinities, which have no decimal text.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() {
            // `Display` for f64 is the shortest text that parses back to the same value, without an exponent.
            Some(Self(format!("{}", value)))
        } else {
            None
        }
    }

    /// The decimal text as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The nearest binary64 value (round-half-to-even). Out-of-range magnitudes become ±infinity or ±0.
    pub fn to_f64(&self) -> f64 {
        self.0.parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Integer value for index keys.
    ///
    /// Exact when the text is an in-range integer; otherwise the binary64 value truncated toward zero, saturating at
    /// the `i64` bounds.
    pub fn to_i64(&self) -> i64 {
        match self.0.parse::<i64>() {
            Ok(i) => i,
            Err(_) => self.to_f64() as i64,
        }
    }
}

impl fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NumberLiteral {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for NumberLiteral {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for NumberLiteral {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for NumberLiteral {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

/// Error for number text that is not a plain decimal literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNumberError {
    pub text: String,
}

impl fmt::Display for ParseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid number literal `{}`", self.text)
    }
}

impl std::error::Error for ParseNumberError {}

fn is_decimal(text: &str) -> bool {
    fn digits(bytes: &[u8], mut i: usize) -> usize {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    }

    let bytes = text.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_end = digits(bytes, i);
    if int_end == i {
        return false;
    }
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits(bytes, i + 1);
        if frac_end == i + 1 {
            return false;
        }
        i = frac_end;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_end = digits(bytes, i);
        if exp_end == i {
            return false;
        }
        i = exp_end;
    }

    i == bytes.len()
}

impl Serialize for NumberLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NumberLiteral {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumberVisitor;

        impl Visitor<'_> for NumberVisitor {
            type Value = NumberLiteral;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a decimal number string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(NumberLiteral::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(NumberLiteral(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                NumberLiteral::from_f64(v).ok_or_else(|| E::custom(format!("non-finite number {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                NumberLiteral::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}
