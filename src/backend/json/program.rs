//! Program assembly: the top-level `{"nodes": [...], "packages": [...]}` document.

use infragen_core::diagnostics::{Diagnosed, Diagnostic};
use infragen_core::ir::Program;
use infragen_core::lower::lower_nodes;

use super::JsonLowering;
use super::nodes::lower_package;
use crate::backend::document::{Document, Record};

/// Lower a whole program.
///
/// Declarations appear in the program's node order; components are skipped. Diagnostics attached to the program
/// are carried through, plus one warning per declaration holding a number JSON cannot represent (serializing such a
/// document fails).
#[tracing::instrument(skip_all, fields(node_count = program.nodes.len(), package_count = program.packages.len()))]
pub fn assemble(program: &Program) -> Diagnosed<Document> {
    let mut diagnostics = program.diagnostics.clone();

    let lowered = lower_nodes(&JsonLowering, &program.nodes);
    let skipped = program.nodes.len() - lowered.len();
    if skipped > 0 {
        tracing::debug!(skipped, "components have no document form; skipped");
    }

    let mut nodes = Vec::with_capacity(lowered.len());
    for (node, declaration) in lowered {
        if let Some(n) = declaration.first_non_finite() {
            diagnostics.push(
                Diagnostic::warning(format!("{} `{}` contains a non-finite number", node.kind_name(), node.name()))
                    .with_detail(format!("{n} cannot be written as JSON"))
                    .with_subject(node.name()),
            );
        }
        nodes.push(declaration);
    }

    let packages: Document = program.packages.iter().map(lower_package).collect();
    let document = Record::new()
        .field("nodes", nodes)
        .field("packages", packages)
        .into();

    Diagnosed::with_diagnostics(document, diagnostics)
}
