//! Violation reporting

use std::sync::Mutex;

use crate::error::LintError;

/// Receives each violation as soon as it is found
pub trait Reporter: Send + Sync {
    fn report(&self, error: &LintError);
}

/// Reporter that logs each violation to tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, error: &LintError) {
        tracing::error!(
            hash = %error.hash,
            pos = ?error.pos,
            cause = %error.cause,
            "commit message violation"
        );
    }
}

/// Reporter that drops everything
#[derive(Debug, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _error: &LintError) {}
}

/// Reporter that collects violations for later inspection
#[derive(Debug, Default)]
pub struct CollectingReporter {
    errors: Mutex<Vec<LintError>>,
}

impl CollectingReporter {
    /// Get all collected violations
    pub fn errors(&self) -> Vec<LintError> {
        self.errors
            .lock()
            .map(|errors| errors.clone())
            .unwrap_or_default()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, error: &LintError) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(error.clone());
        }
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, error: &LintError) {
        (**self).report(error);
    }
}
