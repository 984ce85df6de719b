//! Progress reporter seam.
//!
//! The pipeline announces each stage boundary through a [`Reporter`] so
//! that presentation (spinners, colors) stays outside the core. Calls are
//! synchronous and must not fail; a reporter that does its own I/O owns
//! the consequences.

use serde_json::Value;

use crate::error::Stage;

/// Receives stage-boundary notifications from a pipeline run.
pub trait Reporter {
    /// A stage is starting. `context` carries stage detail such as the
    /// page number when pagination is active.
    fn start(&mut self, stage: Stage, context: Option<&str>);

    /// A stage finished successfully.
    fn succeed(&mut self, stage: Stage, message: &str);

    /// A stage failed. `payload` is the decoded response body, present
    /// only for filter failures.
    fn fail(&mut self, stage: Stage, message: &str, payload: Option<&Value>);
}

/// A reporter that discards all notifications.
///
/// Useful for embedding the pipeline and for tests.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn start(&mut self, _stage: Stage, _context: Option<&str>) {}

    fn succeed(&mut self, _stage: Stage, _message: &str) {}

    fn fail(&mut self, _stage: Stage, _message: &str, _payload: Option<&Value>) {}
}
