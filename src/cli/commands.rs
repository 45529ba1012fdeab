//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;

use crate::backend::json;
use crate::backend::{Backend, GenerationError, TARGETS, backend_for};
use crate::graph::load_program;
use infragen_core::diagnostics::Diagnostics;

use super::{CliError, CliResult, EmitArgs, ExitCode};

/// Root for output directories when none is given.
const DEFAULT_OUTPUT_ROOT: &str = "target/infragen";

// ============================================================================
// Shared helpers
// ============================================================================

fn resolve_backend(emit: &EmitArgs) -> CliResult<Box<dyn Backend>> {
    backend_for(&emit.target, emit.config()).ok_or_else(|| {
        CliError::usage(format!(
            "unknown target '{}' (available: {})",
            emit.target,
            TARGETS.join(", ")
        ))
    })
}

/// File stem used to name per-graph output directories.
fn graph_stem(graph: &Path) -> String {
    graph
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("program")
        .to_string()
}

/// Validate output directory path.
///
/// Rejects paths with `..` components. Absolute paths are allowed but logged.
pub(crate) fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    if out_dir.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(CliError::usage(format!(
            "Output directory '{}' contains path traversal (..)",
            out_dir.display()
        )));
    }

    if out_dir.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            out_dir.display()
        );
    }

    Ok(())
}

fn generation_error(graph: &Path, error: GenerationError) -> CliError {
    match error {
        GenerationError::Diagnostics(diagnostics) => {
            CliError::failure(format!("{}: generation aborted\n{}", graph.display(), diagnostics))
        }
        other => CliError::report(other),
    }
}

fn print_diagnostics(graph: &Path, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        eprintln!("{}: {}", graph.display(), diagnostic);
    }
}

/// Load, generate and write one graph into `out_dir`. The directory is created only once generation succeeds.
fn generate_into(backend: &dyn Backend, graph: &Path, out_dir: &Path) -> CliResult<Diagnostics> {
    let program = load_program(graph).map_err(CliError::report)?;
    backend
        .generate_project(&program, out_dir)
        .map_err(|e| generation_error(graph, e))
}

// ============================================================================
// Commands
// ============================================================================

/// Generate artifacts for one graph.
pub fn gen_file(graph: &Path, output_dir: Option<&Path>, emit: &EmitArgs) -> CliResult<ExitCode> {
    let backend = resolve_backend(emit)?;
    let out_dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_ROOT).join(graph_stem(graph)));
    validate_output_dir(&out_dir)?;

    let diagnostics = generate_into(backend.as_ref(), graph, &out_dir)?;
    print_diagnostics(graph, &diagnostics);
    println!("Generated {} into {}", graph.display(), out_dir.display());
    Ok(ExitCode::SUCCESS)
}

/// Lower a graph and report its diagnostics. Writes nothing.
pub fn check_file(graph: &Path) -> CliResult<ExitCode> {
    let program = load_program(graph).map_err(CliError::report)?;
    let assembled = json::assemble(&program);

    print_diagnostics(graph, &assembled.diagnostics);
    if assembled.has_errors() {
        let count = assembled.diagnostics.errors().count();
        return Err(CliError::failure(format!("{}: {} error(s)", graph.display(), count)));
    }

    let declarations = assembled
        .value
        .get("nodes")
        .and_then(|nodes| nodes.as_array())
        .map_or(0, <[_]>::len);
    println!("{}: ok ({} declarations)", graph.display(), declarations);
    Ok(ExitCode::SUCCESS)
}

/// Generate many graphs in parallel, each into `<out_dir>/<graph stem>`.
///
/// Every graph is attempted; failures are collected and reported together.
pub fn convert_files(graphs: &[PathBuf], out_dir: &Path, emit: &EmitArgs) -> CliResult<ExitCode> {
    let backend = resolve_backend(emit)?;
    validate_output_dir(out_dir)?;

    let mut seen: HashMap<String, &Path> = HashMap::new();
    for graph in graphs {
        let stem = graph_stem(graph);
        if let Some(previous) = seen.insert(stem.clone(), graph) {
            return Err(CliError::usage(format!(
                "'{}' and '{}' would both be written to '{}'",
                previous.display(),
                graph.display(),
                out_dir.join(&stem).display()
            )));
        }
    }

    let failures: Vec<String> = graphs
        .par_iter()
        .filter_map(|graph| {
            let target_dir = out_dir.join(graph_stem(graph));
            match generate_into(backend.as_ref(), graph, &target_dir) {
                Ok(diagnostics) => {
                    print_diagnostics(graph, &diagnostics);
                    tracing::info!(graph = %graph.display(), out = %target_dir.display(), "converted");
                    None
                }
                Err(e) => Some(e.message),
            }
        })
        .collect();

    let converted = graphs.len() - failures.len();
    println!("Converted {} of {} graphs into {}", converted, graphs.len(), out_dir.display());
    if failures.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(failures.join("\n")))
    }
}

/// Print the generated artifacts for a graph to stdout, honouring the target and indentation.
pub fn emit_json(graph: &Path, emit: &EmitArgs) -> CliResult<ExitCode> {
    let backend = resolve_backend(emit)?;
    let program = load_program(graph).map_err(CliError::report)?;
    let generated = backend
        .generate_program(&program)
        .map_err(|e| generation_error(graph, e))?;
    print_diagnostics(graph, &generated.diagnostics);

    let mut stdout = io::stdout().lock();
    for contents in generated.files.values() {
        stdout
            .write_all(contents)
            .and_then(|()| writeln!(stdout))
            .map_err(|e| CliError::failure(format!("Error writing output: {}", e)))?;
    }
    Ok(ExitCode::SUCCESS)
}
