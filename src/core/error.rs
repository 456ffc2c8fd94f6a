//! Typed error contract for pipeline execution.
//!
//! Every failure mode of a pipeline stage (spawn failure, non-zero exit,
//! stage I/O failure) surfaces under the single `exec.failed` code and is
//! distinguished only by its text. The `validation.*` and `internal.*` codes
//! exist for the CLI layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ExecFailed,

    ValidationInvalidArgument,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ExecFailed => "exec.failed",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecFailedDetails {
    pub command: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    /// Standard error captured from the failing stage. Empty when the process
    /// never started or wrote nothing. This is the explicit home for the text
    /// that callers previously had to fish out of the output slot.
    pub stderr: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            stderr: String::new(),
            details,
            hints: Vec::new(),
        }
    }

    /// A pipeline stage failed: spawn error, non-zero exit, or stage I/O
    /// error. `stderr` is whatever the process wrote to its error stream.
    pub fn exec_failed(
        command: impl Into<String>,
        message: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        let stderr = stderr.into();
        let details = serde_json::to_value(ExecFailedDetails {
            command: command.into(),
            stderr: stderr.clone(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        let mut err = Self::new(ErrorCode::ExecFailed, message, details);
        err.stderr = stderr;
        err
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.clone(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::ValidationInvalidArgument, problem, details)
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.clone(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, error, details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.clone(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalJsonError, error, details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_use_dotted_names() {
        assert_eq!(ErrorCode::ExecFailed.as_str(), "exec.failed");
        assert_eq!(
            ErrorCode::ValidationInvalidArgument.as_str(),
            "validation.invalid_argument"
        );
        assert_eq!(ErrorCode::InternalIoError.as_str(), "internal.io_error");
    }

    #[test]
    fn exec_failed_keeps_stderr_explicit() {
        let err = Error::exec_failed("grep", "grep failed: boom", "boom\n");
        assert_eq!(err.code, ErrorCode::ExecFailed);
        assert_eq!(err.stderr, "boom\n");
        assert_eq!(err.details["command"], "grep");
        assert_eq!(err.details["stderr"], "boom\n");
    }

    #[test]
    fn display_shows_message() {
        let err = Error::exec_failed("wc", "wc failed with exit status: 1", "");
        assert_eq!(err.to_string(), "wc failed with exit status: 1");
    }

    #[test]
    fn with_hint_appends() {
        let err = Error::exec_failed("frobnicate", "Failed to run frobnicate", "")
            .with_hint("Check that 'frobnicate' is installed and on your PATH");
        assert_eq!(err.hints.len(), 1);
    }
}
