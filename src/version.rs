//! infragen version information.
//!
//! A single constant so the CLI and anything stamping generated output agree on one value. Taken from Cargo
//! metadata at compile time.

/// The infragen version string (for example, `0.1.0-alpha.1`).
pub const INFRAGEN_VERSION: &str = env!("CARGO_PKG_VERSION");
