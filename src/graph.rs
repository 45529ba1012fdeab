//! Loading program graphs from their serialized JSON form.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use infragen_core::ir::Program;

/// Largest graph file accepted (100 MB).
pub const MAX_GRAPH_SIZE: u64 = 100 * 1024 * 1024;

#[derive(Debug, Error, Diagnostic)]
pub enum GraphLoadError {
    #[error("cannot read graph '{}': {source}", path.display())]
    #[diagnostic(code(infragen::graph::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("graph '{}' is too large ({size} bytes, max {max} bytes)", path.display())]
    #[diagnostic(code(infragen::graph::too_large))]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("invalid program graph: {source}")]
    #[diagnostic(
        code(infragen::graph::parse),
        help("graphs are JSON objects with `nodes`, `packages` and optional `diagnostics`")
    )]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse a graph file, rejecting files over [`MAX_GRAPH_SIZE`].
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_program(path: &Path) -> Result<Program, GraphLoadError> {
    let read_error = |source| GraphLoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(read_error)?;
    if metadata.len() > MAX_GRAPH_SIZE {
        return Err(GraphLoadError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_GRAPH_SIZE,
        });
    }

    let text = fs::read_to_string(path).map_err(read_error)?;
    let program = parse_program(&text)?;
    tracing::debug!(nodes = program.nodes.len(), packages = program.packages.len(), "loaded graph");
    Ok(program)
}

/// Parse a graph from JSON text.
pub fn parse_program(text: &str) -> Result<Program, GraphLoadError> {
    serde_json::from_str(text).map_err(|source| GraphLoadError::Parse { source })
}
