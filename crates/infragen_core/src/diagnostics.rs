//! Diagnostics as values.
//!
//! The binder hands over a [`Diagnostics`] list with the program; lowering adds to it and the emission driver decides
//! whether the run failed. Instead of threading a mutable list through every call, results carry their diagnostics
//! alongside the value in a [`Diagnosed`] and are combined by the caller.
//!
//! ## Examples
//!
//! ```rust
//! use infragen_core::diagnostics::{Diagnosed, Diagnostic};
//!
//! let parts: Vec<Diagnosed<u32>> = vec![
//!     Diagnosed::new(1),
//!     Diagnosed::new(2).with(Diagnostic::warning("two is suspicious")),
//! ];
//! let total: Diagnosed<Vec<u32>> = parts.into_iter().collect();
//! assert_eq!(total.value, vec![1, 2]);
//! assert_eq!(total.diagnostics.len(), 1);
//! assert!(!total.has_errors());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single problem report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// One-line description.
    pub summary: String,
    /// Longer explanation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Name of the declaration the problem belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, summary: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: None,
            subject: None,
        }
    }

    pub fn error(summary: impl Into<String>) -> Self {
        Self::new(Severity::Error, summary)
    }

    pub fn warning(summary: impl Into<String>) -> Self {
        Self::new(Severity::Warning, summary)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(subject) = &self.subject {
            write!(f, " [{}]", subject)?;
        }
        write!(f, ": {}", self.summary)?;
        if let Some(detail) = &self.detail {
            write!(f, "; {}", detail)?;
        }
        Ok(())
    }
}

/// Ordered list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Whether any entry has error severity. Such a set fails the run.
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| !d.is_error())
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self(diagnostics)
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            write!(f, "{}", self.0[0])
        } else {
            writeln!(f, "{} diagnostics:", self.0.len())?;
            for (i, d) in self.0.iter().enumerate() {
                writeln!(f, "  {}: {}", i + 1, d)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for Diagnostics {}

/// A value together with the diagnostics produced while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosed<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Diagnosed<T> {
    /// A value with no diagnostics.
    pub fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn with_diagnostics(value: T, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }

    /// Attach one more diagnostic.
    pub fn with(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Diagnosed<U> {
        Diagnosed {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Chain a computation; diagnostics from both steps are kept, earlier ones first.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Diagnosed<U>) -> Diagnosed<U> {
        let mut next = f(self.value);
        let mut diagnostics = self.diagnostics;
        diagnostics.extend(next.diagnostics);
        next.diagnostics = diagnostics;
        next
    }

    /// Combine two results into a pair.
    pub fn zip<U>(self, other: Diagnosed<U>) -> Diagnosed<(T, U)> {
        let mut diagnostics = self.diagnostics;
        diagnostics.extend(other.diagnostics);
        Diagnosed {
            value: (self.value, other.value),
            diagnostics,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn into_parts(self) -> (T, Diagnostics) {
        (self.value, self.diagnostics)
    }
}

impl<T> FromIterator<Diagnosed<T>> for Diagnosed<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = Diagnosed<T>>>(iter: I) -> Self {
        let mut values = Vec::new();
        let mut diagnostics = Diagnostics::new();
        for item in iter {
            values.push(item.value);
            diagnostics.extend(item.diagnostics);
        }
        Diagnosed::with_diagnostics(values, diagnostics)
    }
}
