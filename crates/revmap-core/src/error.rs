//! Stage-level error taxonomy. Per-file/per-manifest failures
//! never construct one of these — they are absorbed as `Diagnostic`s
//! riding alongside a successful `Outcome`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid input for {stage}: {reason}")]
    InvalidInput { stage: &'static str, reason: String },

    #[error("{stage} cancelled")]
    Cancelled { stage: &'static str },

    #[error("internal invariant broken in {stage}: {context}")]
    Fatal { stage: &'static str, context: String },
}

/// A non-fatal, absorbed failure attached to the item that caused it
/// (a file, a manifest, a symbol). Reported as a side channel, never as
/// part of the return type's success/failure shape.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub path: std::path::PathBuf,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<std::path::PathBuf>, message: impl Into<String>) -> Self {
        Diagnostic { path: path.into(), message: message.into() }
    }
}

/// Wraps a stage's successful artifact together with the warnings absorbed
/// while producing it. `value` is always complete; `diagnostics` is purely
/// informational.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Outcome { value, diagnostics: Vec::new() }
    }

    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Outcome { value, diagnostics }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
