//! Structured-document vocabulary.
//!
//! Every `"type"` tag a backend writes into a structured document is registered here, so tag strings are not
//! scattered across lowering code and tooling can list the format's surface.
//!
//! ## Notes
//! - Registries are pure: no IR types, no IO.
//! - The document format is experimental. Consumers must tolerate new tags; entries are never repurposed.
//!
//! ## Examples
//! ```rust
//! use infragen_core::vocab::tags::{self, TagId};
//!
//! assert_eq!(tags::as_str(TagId::ScopeTraversalExpression), "ScopeTraversalExpression");
//! assert_eq!(tags::from_str("TraverseAttr"), Some(TagId::TraverseAttr));
//! ```

pub mod tags;

/// Lifecycle status of a vocabulary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Experimental,
    Deprecated,
}

/// Shared metadata shape for registry entries.
///
/// ## Notes
/// - `description` is mandatory to keep generated docs consistent.
/// - The type is `Copy` so registries can live in `const` tables.
#[derive(Debug, Clone, Copy)]
pub struct VocabInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub description: &'static str,
    pub stability: Stability,
}
