//! Structured-document (JSON) reference backend.
//!
//! Lowers every declaration of a [`Program`] into a self-describing JSON document and serializes it as a single
//! file. Node and expression shapes are documented in [`nodes`] and [`expr`]; program assembly lives in
//! [`program`].

mod expr;
mod nodes;
mod program;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use infragen_core::ir::Program;

use super::document::Document;
use super::errors::GenerationError;
use super::{Backend, Generated};
use crate::config::EmitConfig;

pub use program::assemble;

/// Stateless lowering of IR values into [`Document`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLowering;

/// The `json` generation target.
#[derive(Debug, Clone, Default)]
pub struct JsonBackend {
    config: EmitConfig,
}

impl JsonBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitConfig {
        &self.config
    }
}

impl Backend for JsonBackend {
    fn name(&self) -> &'static str {
        "json"
    }

    fn file_mode(&self) -> u32 {
        self.config.file_mode
    }

    #[tracing::instrument(skip_all, fields(backend = "json"))]
    fn generate_program(&self, program: &Program) -> Result<Generated, GenerationError> {
        // Upstream errors are returned exactly as received, before assembly adds its own warnings.
        if program.diagnostics.has_errors() {
            return Err(GenerationError::Diagnostics(program.diagnostics.clone()));
        }

        let (document, diagnostics) = assemble(program).into_parts();
        if diagnostics.has_errors() {
            return Err(GenerationError::Diagnostics(diagnostics));
        }
        // Warnings travel back in `Generated::diagnostics`; callers decide how to show them.
        tracing::debug!(warnings = diagnostics.warnings().count(), "assembled program");

        let bytes = serialize_document(&document, &self.config)?;
        tracing::debug!(bytes = bytes.len(), file = %self.config.file_name, "serialized program");

        let mut files = BTreeMap::new();
        files.insert(self.config.file_name.clone(), bytes);
        Ok(Generated { files, diagnostics })
    }
}

/// Pretty-print `document` with the configured indentation. No trailing newline is written.
pub fn serialize_document(document: &Document, config: &EmitConfig) -> Result<Vec<u8>, GenerationError> {
    let indent = config.indent();
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    document
        .serialize(&mut serializer)
        .map_err(|source| GenerationError::Serialize { source })?;
    Ok(out)
}
