//! Document `"type"` tags.
//!
//! Tags fall into three groups: declaration tags (one per lowerable node kind), expression tags (one per
//! representable expression variant) and traversal-step tags.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.

use super::{Stability, VocabInfo};

/// Stable identifier for every document tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    // Declarations
    Resource,
    LocalVariable,
    OutputVariable,
    ConfigVariable,

    // Expressions
    LiteralValueExpression,
    TemplateExpression,
    IndexExpression,
    ObjectConsExpression,
    TupleConsExpression,
    FunctionCallExpression,
    RelativeTraversalExpression,
    ScopeTraversalExpression,

    // Traversal steps
    TraverseAttr,
    TraverseIndex,
}

/// Which part of a document a tag can appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagGroup {
    Declaration,
    Expression,
    TraversalStep,
}

/// Metadata for a document tag.
#[derive(Debug, Clone, Copy)]
pub struct TagInfo {
    pub info: VocabInfo<TagId>,
    pub group: TagGroup,
}

impl TagInfo {
    pub fn id(&self) -> TagId {
        self.info.id
    }

    pub fn canonical(&self) -> &'static str {
        self.info.canonical
    }
}

/// Registry of all document tags.
pub const TAGS: &[TagInfo] = &[
    tag(TagId::Resource, "Resource", TagGroup::Declaration, "A provider resource with its inputs."),
    tag(TagId::LocalVariable, "LocalVariable", TagGroup::Declaration, "A named intermediate value."),
    tag(TagId::OutputVariable, "OutputVariable", TagGroup::Declaration, "A stack output."),
    tag(
        TagId::ConfigVariable,
        "ConfigVariable",
        TagGroup::Declaration,
        "A configuration value read at deployment time.",
    ),
    tag(
        TagId::LiteralValueExpression,
        "LiteralValueExpression",
        TagGroup::Expression,
        "A boolean, number, string or null.",
    ),
    tag(
        TagId::TemplateExpression,
        "TemplateExpression",
        TagGroup::Expression,
        "String interpolation; `parts` are concatenated in order.",
    ),
    tag(
        TagId::IndexExpression,
        "IndexExpression",
        TagGroup::Expression,
        "`collection[key]` with an arbitrary key expression.",
    ),
    tag(
        TagId::ObjectConsExpression,
        "ObjectConsExpression",
        TagGroup::Expression,
        "An object constructor; only literal-string keys are kept.",
    ),
    tag(TagId::TupleConsExpression, "TupleConsExpression", TagGroup::Expression, "A tuple constructor."),
    tag(
        TagId::FunctionCallExpression,
        "FunctionCallExpression",
        TagGroup::Expression,
        "A call to a named function.",
    ),
    tag(
        TagId::RelativeTraversalExpression,
        "RelativeTraversalExpression",
        TagGroup::Expression,
        "Traversal steps applied to the result of `source`.",
    ),
    tag(
        TagId::ScopeTraversalExpression,
        "ScopeTraversalExpression",
        TagGroup::Expression,
        "Traversal steps starting from `rootName` in program scope.",
    ),
    tag(TagId::TraverseAttr, "TraverseAttr", TagGroup::TraversalStep, "Attribute access by `name`."),
    tag(TagId::TraverseIndex, "TraverseIndex", TagGroup::TraversalStep, "Index access by integer `key`."),
];

/// Resolve a spelling to a [`TagId`].
pub fn from_str(name: &str) -> Option<TagId> {
    TAGS.iter().find(|t| t.canonical() == name).map(TagInfo::id)
}

/// Return the canonical spelling for a tag.
pub fn as_str(id: TagId) -> &'static str {
    match info_for(id) {
        Some(info) => info.canonical(),
        None => "",
    }
}

/// Return the full metadata entry for a tag.
pub fn info_for(id: TagId) -> Option<&'static TagInfo> {
    TAGS.iter().find(|t| t.id() == id)
}

/// Tags belonging to one group, in registry order.
pub fn in_group(group: TagGroup) -> impl Iterator<Item = &'static TagInfo> {
    TAGS.iter().filter(move |t| t.group == group)
}

const fn tag(id: TagId, canonical: &'static str, group: TagGroup, description: &'static str) -> TagInfo {
    TagInfo {
        info: VocabInfo {
            id,
            canonical,
            description,
            stability: Stability::Experimental,
        },
        group,
    }
}
