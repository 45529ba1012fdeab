#![forbid(unsafe_code)]
//! infragen: lowering and code generation for infrastructure program graphs
//!
//! A bound [`Program`] (declarations, packages and binder diagnostics) is lowered through the target-independent
//! contract in [`infragen_core::lower`] by a [`Backend`]. The reference backend, [`JsonBackend`], turns the graph
//! into a single self-describing JSON document.
//!
//! ```
//! use infragen::{Backend, JsonBackend};
//! use infragen::ir::{ConfigType, ConfigVariable, Program};
//!
//! let program = Program::new().with_node(ConfigVariable::new("region", ConfigType::String));
//! let generated = JsonBackend::new().generate_program(&program).unwrap();
//! assert!(generated.files.contains_key("program.json"));
//! ```
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod cli;
pub mod config;
pub mod graph;
pub mod version;

pub use infragen_core::{diagnostics, ir, lower};

pub use backend::{Backend, Generated, GeneratedFiles, GenerationError, JsonBackend, backend_for};
pub use config::EmitConfig;
pub use graph::{GraphLoadError, load_program, parse_program};
pub use infragen_core::{Diagnosed, Diagnostic, Diagnostics, Program, Severity};
