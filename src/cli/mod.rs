//! CLI module for infragen
//!
//! ## Commands
//!
//! - `gen <graph> [output_dir]` - Generate artifacts for a program graph and write them
//! - `check <graph>` - Load and lower a graph, reporting diagnostics without writing anything
//! - `convert <graph>... --out-dir <dir>` - Generate many graphs in parallel
//! - `--emit-json <graph> [--target] [--indent]` - Print the structured document to stdout (debug)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::EmitConfig;
use crate::version::INFRAGEN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Invalid invocation (unknown target, bad output path).
    pub const USAGE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a usage error (exit code 2).
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::USAGE)
    }

    /// Render a library error through miette's graphical reporter.
    pub fn report<E>(error: E) -> Self
    where
        E: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(error)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Code generation for infrastructure program graphs
#[derive(Parser, Debug)]
#[command(name = "infragen")]
#[command(version = INFRAGEN_VERSION)]
#[command(about = "Code generation for infrastructure program graphs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print the structured document for a graph to stdout (debug)
    #[arg(long = "emit-json", value_name = "GRAPH")]
    pub emit_json_file: Option<PathBuf>,

    /// Generation target for --emit-json
    #[arg(long = "target", default_value = "json", value_name = "TARGET", requires = "emit_json_file")]
    pub emit_target: String,

    /// Spaces per indentation level for --emit-json
    #[arg(long = "indent", default_value_t = 2, value_name = "N", requires = "emit_json_file")]
    pub emit_indent: usize,
}

impl Cli {
    /// Emission options given alongside `--emit-json`.
    pub fn emit_args(&self) -> EmitArgs {
        EmitArgs {
            target: self.emit_target.clone(),
            indent: self.emit_indent,
        }
    }
}

/// Options shared by every generating command.
#[derive(clap::Args, Debug, Clone)]
pub struct EmitArgs {
    /// Generation target
    #[arg(long, default_value = "json", value_name = "TARGET")]
    pub target: String,
    /// Spaces per indentation level
    #[arg(long, default_value_t = 2, value_name = "N")]
    pub indent: usize,
}

impl EmitArgs {
    pub fn config(&self) -> EmitConfig {
        EmitConfig::new().with_indent_width(self.indent)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate artifacts for a program graph
    Gen {
        /// Program graph (JSON)
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,
        /// Output directory (default: target/infragen/<graph stem>)
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
        #[command(flatten)]
        emit: EmitArgs,
    },

    /// Lower a program graph and report diagnostics without writing files
    Check {
        /// Program graph (JSON)
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,
    },

    /// Generate many program graphs in parallel, one subdirectory each
    Convert {
        /// Program graphs (JSON)
        #[arg(value_name = "GRAPH", required = true)]
        graphs: Vec<PathBuf>,
        /// Directory receiving one subdirectory per graph
        #[arg(long = "out-dir", value_name = "DIR")]
        out_dir: PathBuf,
        #[command(flatten)]
        emit: EmitArgs,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if let Some(graph) = &cli.emit_json_file {
        return commands::emit_json(graph, &cli.emit_args());
    }

    match cli.command {
        Some(Command::Gen {
            graph,
            output_dir,
            emit,
        }) => commands::gen_file(&graph, output_dir.as_deref(), &emit),
        Some(Command::Check { graph }) => commands::check_file(&graph),
        Some(Command::Convert { graphs, out_dir, emit }) => commands::convert_files(&graphs, &out_dir, &emit),
        None => Err(CliError::usage("no command given; run `infragen --help` for usage")),
    }
}

// ============================================================================
// Tests
// ============================================================================
