//! Execution results: captured output plus failure state.

use std::fmt;

use crate::error::{Error, Result};

/// The outcome of running one unit or a whole pipeline.
///
/// Two access styles:
/// - [`ExecResult::text`] (and `Display`) for best-effort formatting use:
///   the successful stdout, or an empty string on failure, with the error
///   silently discarded. A documented trade-off, not an oversight.
/// - [`ExecResult::into_result`] / [`ExecResult::into_parts`] for
///   error-sensitive callers. On failure the error carries the failing
///   stage's stderr in its explicit `stderr` field; nothing is substituted
///   into the output slot.
#[derive(Debug)]
pub struct ExecResult {
    stdout: String,
    stderr: String,
    error: Option<Error>,
}

impl ExecResult {
    pub(crate) fn success(stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
            error: None,
        }
    }

    pub(crate) fn failure(error: Error, stderr: Vec<u8>) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
            error: Some(error),
        }
    }

    /// Best-effort output text: the captured stdout on success, `""` on
    /// failure. Any error is discarded.
    pub fn text(&self) -> &str {
        match self.error {
            None => &self.stdout,
            Some(_) => "",
        }
    }

    /// Owning form of [`ExecResult::text`].
    pub fn into_text(self) -> String {
        match self.error {
            None => self.stdout,
            Some(_) => String::new(),
        }
    }

    /// Captured stdout. Empty on failure.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Stderr accumulated from every stage that ran, in order, including a
    /// failing stage.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Full outcome as a `Result`: `Ok(stdout)`, or the failing stage's error
    /// (with its stderr in [`Error::stderr`]).
    pub fn into_result(self) -> Result<String> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.stdout),
        }
    }

    /// Full outcome as parts: `(stdout, accumulated stderr, error-or-none)`.
    pub fn into_parts(self) -> (String, String, Option<Error>) {
        (self.stdout, self.stderr, self.error)
    }
}

impl fmt::Display for ExecResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
