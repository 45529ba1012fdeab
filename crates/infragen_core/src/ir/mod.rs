//! Bound program graph.
//!
//! The graph is what the binder hands to a backend: an ordered list of declaration [`Node`]s, the packages the
//! program depends on, and whatever diagnostics the binder already produced.
//!
//! ## Pipeline
//!
//! ```text
//! source → parser → binder → Program (this module) → backend lowering → generated files
//! ```
//!
//! ## Serialized form
//!
//! Every type here round-trips through serde so an upstream binder can dump a graph to JSON and the CLI can load
//! it. Sum types are internally tagged by `"kind"` and fields are camelCase:
//!
//! ```json
//! {
//!   "nodes": [
//!     {
//!       "kind": "Resource",
//!       "name": "bucket",
//!       "token": "aws:s3:Bucket",
//!       "inputs": [{ "name": "acl", "value": { "kind": "Literal", "value": { "string": "private" } } }]
//!     }
//!   ],
//!   "packages": [{ "name": "aws", "version": "6.0.0" }]
//! }
//! ```

mod expr;
mod node;

pub use expr::{
    BinaryOperator, Expression, Literal, NumberLiteral, ObjectItem, ParseNumberError, TraversalStep, UnaryOperator,
};
pub use node::{Attribute, Component, ConfigType, ConfigVariable, LocalVariable, Node, OutputVariable, Resource};

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;

/// A complete bound program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Top-level declarations, in declaration order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Packages referenced by the program, in the order the binder resolved them.
    #[serde(default)]
    pub packages: Vec<PackageRef>,
    /// Diagnostics produced upstream (binder/type-checker). May already contain errors.
    #[serde(default, skip_serializing_if = "Diagnostics::is_empty")]
    pub diagnostics: Diagnostics,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    pub fn with_node(mut self, node: impl Into<Node>) -> Self {
        self.nodes.push(node.into());
        self
    }

    /// Append a package reference.
    pub fn with_package(mut self, package: PackageRef) -> Self {
        self.packages.push(package);
        self
    }

    /// Attach the binder's diagnostics.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Look up a declaration by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name() == name)
    }
}

/// A package the program depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRef {
    pub name: String,
    /// Resolved version, if the binder pinned one.
    #[serde(default)]
    pub version: Option<String>,
}

impl PackageRef {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self {
            name: name.into(),
            version: version.map(str::to_string),
        }
    }
}
