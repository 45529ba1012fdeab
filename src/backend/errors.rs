//! Errors raised while generating or writing artifacts.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use infragen_core::diagnostics::Diagnostics;

/// Fatal generation failure. Lowering itself never fails; only these stages do.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerationError {
    /// The program carried error diagnostics. All diagnostics are returned unmodified.
    #[error("{0}")]
    #[diagnostic(code(infragen::diagnostics), help("fix the reported problems in the program graph"))]
    Diagnostics(Diagnostics),

    #[error("failed to serialize program: {source}")]
    #[diagnostic(code(infragen::serialize))]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    #[diagnostic(code(infragen::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenerationError {
    /// Diagnostics that caused the failure, when it was caused by diagnostics.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            GenerationError::Diagnostics(diagnostics) => Some(diagnostics),
            GenerationError::Serialize { .. } | GenerationError::Write { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use infragen_core::diagnostics::Diagnostic;

    #[test]
    fn test_diagnostics_display_lists_everything() {
        let diagnostics = Diagnostics::from(vec![
            Diagnostic::error("unknown resource type").with_subject("bucket"),
            Diagnostic::warning("deprecated property"),
        ]);
        let err = GenerationError::Diagnostics(diagnostics);
        let text = err.to_string();
        assert!(text.contains("unknown resource type"), "{text}");
        assert!(text.contains("deprecated property"), "{text}");
        assert_eq!(err.diagnostics().map(Diagnostics::len), Some(2));
    }

    #[test]
    fn test_write_error_names_path() {
        let err = GenerationError::Write {
            path: PathBuf::from("out/program.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write 'out/program.json': denied");
        assert!(err.diagnostics().is_none());
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = GenerationError::Diagnostics(Diagnostics::new());
        let code = miette::Diagnostic::code(&err).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("infragen::diagnostics"));
    }
}
