//! Program graph IR and the lowering contract shared by every infragen backend.
//!
//! This crate is intentionally small. It contains:
//! - the bound program graph ([`ir`]): nodes, expressions, packages,
//! - the diagnostics model ([`diagnostics`]) threaded through assembly as a value,
//! - the exhaustive lowering contract ([`lower`]) that backends implement,
//! - the structured-document tag vocabulary ([`vocab`]).
//!
//! ## Notes
//!
//! - This is a "core" crate: **no IO**, no global state. Backends, emission and the CLI live in the `infragen`
//!   crate.
//! - The graph is produced upstream by a binder and is read-only here. Nothing in this crate validates names,
//!   types or schemas.

#![forbid(unsafe_code)]

pub mod diagnostics;
pub mod ir;
pub mod lower;
pub mod vocab;

pub use diagnostics::{Diagnosed, Diagnostic, Diagnostics, Severity};
pub use ir::{
    Attribute, Component, ConfigType, ConfigVariable, Expression, Literal, LocalVariable, Node, NumberLiteral,
    ObjectItem, OutputVariable, PackageRef, Program, Resource, TraversalStep,
};
pub use lower::{ExprLowering, NodeLowering, lower_expr, lower_node, lower_nodes};
