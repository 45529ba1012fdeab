//! Expression lowering for the structured-document backend.
//!
//! One arm per representable variant; everything else becomes [`Document::Null`]. Output shapes:
//!
//! ```json
//! {"type": "LiteralValueExpression", "value": "my-bucket"}
//! {"type": "TemplateExpression", "parts": [...]}
//! {"type": "IndexExpression", "collection": {...}, "key": {...}}
//! {"type": "ObjectConsExpression", "properties": {"key": {...}}}
//! {"type": "TupleConsExpression", "items": [...]}
//! {"type": "FunctionCallExpression", "name": "fileAsset", "args": [...]}
//! {"type": "RelativeTraversalExpression", "source": {...}, "traversal": [...]}
//! {"type": "ScopeTraversalExpression", "rootName": "bucket", "traversal": [...]}
//! ```

use indexmap::IndexMap;

use infragen_core::ir::{Expression, Literal, ObjectItem, TraversalStep};
use infragen_core::lower::{ExprLowering, lower_expr};
use infragen_core::vocab::tags::TagId;

use super::JsonLowering;
use crate::backend::document::{Document, Record};

impl ExprLowering for JsonLowering {
    type Lowered = Document;

    fn literal(&self, value: &Literal) -> Document {
        let value = match value {
            Literal::Bool(b) => Document::Bool(*b),
            Literal::Number(n) => Document::Number(n.to_f64()),
            Literal::String(s) => Document::String(s.clone()),
            Literal::Null => Document::Null,
        };
        Record::tagged(TagId::LiteralValueExpression).field("value", value).into()
    }

    fn template(&self, parts: &[Expression]) -> Document {
        Record::tagged(TagId::TemplateExpression)
            .field("parts", self.lower_all(parts))
            .into()
    }

    fn index(&self, collection: &Expression, key: &Expression) -> Document {
        Record::tagged(TagId::IndexExpression)
            .field("collection", lower_expr(self, collection))
            .field("key", lower_expr(self, key))
            .into()
    }

    fn object_cons(&self, items: &[ObjectItem]) -> Document {
        // Computed keys have no static name; those entries are dropped.
        let mut properties = IndexMap::with_capacity(items.len());
        for item in items {
            if let Some(key) = item.literal_key() {
                properties.insert(key.to_string(), lower_expr(self, &item.value));
            }
        }
        Record::tagged(TagId::ObjectConsExpression)
            .field("properties", properties)
            .into()
    }

    fn tuple_cons(&self, items: &[Expression]) -> Document {
        Record::tagged(TagId::TupleConsExpression)
            .field("items", self.lower_all(items))
            .into()
    }

    fn function_call(&self, name: &str, args: &[Expression]) -> Document {
        Record::tagged(TagId::FunctionCallExpression)
            .field("name", name)
            .field("args", self.lower_all(args))
            .into()
    }

    fn relative_traversal(&self, source: &Expression, traversal: &[TraversalStep]) -> Document {
        Record::tagged(TagId::RelativeTraversalExpression)
            .field("source", lower_expr(self, source))
            .field("traversal", lower_traversal(traversal))
            .into()
    }

    fn scope_traversal(&self, root_name: &str, traversal: &[TraversalStep]) -> Document {
        Record::tagged(TagId::ScopeTraversalExpression)
            .field("rootName", root_name)
            .field("traversal", lower_traversal(traversal))
            .into()
    }

    fn unrepresentable(&self, _expr: &Expression) -> Document {
        Document::Null
    }
}

impl JsonLowering {
    fn lower_all(&self, exprs: &[Expression]) -> Document {
        exprs.iter().map(|e| lower_expr(self, e)).collect()
    }
}

fn lower_traversal(traversal: &[TraversalStep]) -> Document {
    traversal
        .iter()
        .map(|step| match step {
            TraversalStep::Attr { name } => {
                Document::from(Record::tagged(TagId::TraverseAttr).field("name", name.as_str()))
            }
            TraversalStep::Index { key } => {
                Document::from(Record::tagged(TagId::TraverseIndex).field("key", key.to_i64()))
            }
        })
        .collect()
}
