//! Generation backends
//!
//! A backend turns a bound [`Program`] into a set of named artifacts, and can write them into a directory.
//!
//! ## Module Organization
//!
//! - `document.rs` - Insertion-ordered document tree and record builder
//! - `json/` - The structured-document (`json`) reference backend
//!   - `expr.rs` - Expression lowering
//!   - `nodes.rs` - Declaration and package lowering
//!   - `program.rs` - Program assembly and diagnostics
//! - `errors.rs` - `GenerationError`
//! - `project.rs` - Writing generated files to disk

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod document;
pub mod errors;
pub mod json;
pub mod project;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use infragen_core::diagnostics::Diagnostics;
use infragen_core::ir::Program;

use crate::config::{DEFAULT_FILE_MODE, EmitConfig};

pub use document::{Document, Record};
pub use errors::GenerationError;
pub use json::JsonBackend;
pub use project::ProjectWriter;

/// Logical file name to contents. Iteration order is deterministic.
pub type GeneratedFiles = BTreeMap<String, Vec<u8>>;

/// Successful generation: the artifacts plus any non-error diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub files: GeneratedFiles,
    pub diagnostics: Diagnostics,
}

/// Target names accepted by [`backend_for`].
pub const TARGETS: &[&str] = &["json"];

/// A generation target.
pub trait Backend: Send + Sync {
    /// Target name, as accepted by [`backend_for`].
    fn name(&self) -> &'static str;

    /// Produce artifacts in memory. Fails when the program carries error diagnostics or cannot be encoded.
    fn generate_program(&self, program: &Program) -> Result<Generated, GenerationError>;

    /// Permission bits for written files.
    fn file_mode(&self) -> u32 {
        DEFAULT_FILE_MODE
    }

    /// Generate, then write every artifact into `directory`, creating it if needed. Returns the non-error
    /// diagnostics.
    ///
    /// Nothing is written, and `directory` is not created, when generation fails. A failed write aborts; files
    /// already written stay.
    fn generate_project(&self, program: &Program, directory: &Path) -> Result<Diagnostics, GenerationError> {
        let Generated { files, diagnostics } = self.generate_program(program)?;
        fs::create_dir_all(directory).map_err(|source| GenerationError::Write {
            path: directory.to_path_buf(),
            source,
        })?;
        ProjectWriter::new(directory)
            .with_mode(self.file_mode())
            .write(&files)?;
        Ok(diagnostics)
    }
}

/// Resolve a target name to a backend configured with `config`.
pub fn backend_for(target: &str, config: EmitConfig) -> Option<Box<dyn Backend>> {
    match target {
        "json" => Some(Box::new(JsonBackend::with_config(config))),
        _ => None,
    }
}
