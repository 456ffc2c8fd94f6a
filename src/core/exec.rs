//! Runnable units: one fully configured external invocation, or a data
//! source standing in for one.
//!
//! Units are consumed by execution. Reuse happens by invoking the template
//! again, which materializes a fresh argument list each time.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{Error, Result};
use crate::result::ExecResult;

/// A fully resolved pipeline stage.
///
/// Most units spawn an external command; `dump` and `from_reader` units emit
/// the contents of a file or reader as their stdout instead, so existing data
/// can head a pipeline the same way a command would.
pub struct Exec {
    kind: ExecKind,
    input: Option<Input>,
}

enum ExecKind {
    Command { program: String, args: Vec<String> },
    Dump(PathBuf),
    Reader(Box<dyn Read + Send>),
}

enum Input {
    Text(Vec<u8>),
    Reader(Box<dyn Read + Send>),
}

/// Raw captured output of one stage. Bytes, not text: inter-stage transport
/// stays binary-safe and decoding happens once at the result boundary.
pub(crate) struct Capture {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Exec {
    pub(crate) fn command(program: &str, args: Vec<String>) -> Self {
        Self {
            kind: ExecKind::Command {
                program: program.to_string(),
                args,
            },
            input: None,
        }
    }

    /// A unit that emits the contents of `path` as its stdout.
    ///
    /// The file is read at execution time; a missing or unreadable file is an
    /// execution error, just like a missing program.
    pub fn dump(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: ExecKind::Dump(path.into()),
            input: None,
        }
    }

    /// A unit that emits everything `reader` yields as its stdout.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            kind: ExecKind::Reader(Box::new(reader)),
            input: None,
        }
    }

    /// Bind literal text as this unit's stdin.
    ///
    /// The binding applies when the unit runs standalone or heads a pipeline
    /// with no leading payload; once a pipeline is flowing, each stage reads
    /// the previous stage's output instead.
    pub fn input(mut self, text: &str) -> Self {
        self.input = Some(Input::Text(text.as_bytes().to_vec()));
        self
    }

    /// Bind a reader as this unit's stdin. Same precedence as [`Exec::input`].
    pub fn input_reader(mut self, reader: impl Read + Send + 'static) -> Self {
        self.input = Some(Input::Reader(Box::new(reader)));
        self
    }

    /// Execute this unit with no piped input (its bound input, if any, still
    /// applies) and capture the outcome.
    pub fn run(self) -> ExecResult {
        crate::pipe::line(Some(self), None)
    }

    /// Execute this unit feeding `input` as stdin, overriding any bound input.
    pub fn run_with(self, input: &str) -> ExecResult {
        crate::pipe::line(Some(self), Some(input.as_bytes().to_vec()))
    }

    /// Label used in error messages: the program name, or the source path.
    fn label(&self) -> String {
        match &self.kind {
            ExecKind::Command { program, .. } => program.clone(),
            ExecKind::Dump(path) => path.display().to_string(),
            ExecKind::Reader(_) => "<reader>".to_string(),
        }
    }

    /// Run one stage. `piped` is the carried-output buffer from the previous
    /// stage; when absent, the unit's own bound input feeds it instead.
    pub(crate) fn execute(self, piped: Option<Vec<u8>>) -> Result<Capture> {
        let label = self.label();
        let Exec { kind, input } = self;

        let feed = match piped {
            Some(bytes) => Some(bytes),
            None => match input {
                Some(Input::Text(bytes)) => Some(bytes),
                Some(Input::Reader(reader)) => Some(read_source(reader, &label)?),
                None => None,
            },
        };

        match kind {
            ExecKind::Command { program, args } => run_command(&program, &args, feed),
            ExecKind::Dump(path) => {
                let bytes = fs::read(&path).map_err(|e| {
                    Error::exec_failed(
                        path.display().to_string(),
                        format!("Failed to read {}: {}", path.display(), e),
                        String::new(),
                    )
                })?;
                Ok(Capture {
                    stdout: bytes,
                    stderr: Vec::new(),
                })
            }
            ExecKind::Reader(reader) => {
                let bytes = read_source(reader, &label)?;
                Ok(Capture {
                    stdout: bytes,
                    stderr: Vec::new(),
                })
            }
        }
    }
}

impl fmt::Debug for Exec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExecKind::Command { program, args } => f
                .debug_struct("Exec")
                .field("program", program)
                .field("args", args)
                .finish(),
            ExecKind::Dump(path) => f.debug_struct("Exec").field("dump", path).finish(),
            ExecKind::Reader(_) => f.debug_struct("Exec").field("reader", &"..").finish(),
        }
    }
}

fn read_source(mut reader: Box<dyn Read + Send>, label: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(|e| {
        Error::exec_failed(
            label,
            format!("Failed to read input for {}: {}", label, e),
            String::new(),
        )
    })?;
    Ok(buf)
}

fn run_command(program: &str, args: &[String], input: Option<Vec<u8>>) -> Result<Capture> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.stdin(match input {
        Some(_) => Stdio::piped(),
        None => Stdio::null(),
    });

    let mut child = cmd.spawn().map_err(|e| {
        let err = Error::exec_failed(
            program,
            format!("Failed to run {}: {}", program, e),
            String::new(),
        );
        if e.kind() == io::ErrorKind::NotFound {
            err.with_hint(format!(
                "Check that '{}' is installed and on your PATH",
                program
            ))
        } else {
            err
        }
    })?;

    // Feed stdin from its own thread while this one drains stdout/stderr;
    // a full stdin pipe buffer would otherwise deadlock against unread output.
    let writer = match (input, child.stdin.take()) {
        (Some(bytes), Some(mut stdin)) => {
            Some(thread::spawn(move || stdin.write_all(&bytes)))
        }
        _ => None,
    };

    let output = child.wait_with_output().map_err(|e| {
        Error::exec_failed(
            program,
            format!("Failed to read output from {}: {}", program, e),
            String::new(),
        )
    })?;

    // The writer must have finished before the stage counts as complete, so
    // join it unconditionally; a non-zero exit still takes precedence below.
    let feed_error = match writer.map(|handle| handle.join()) {
        None | Some(Ok(Ok(()))) => None,
        Some(Ok(Err(e))) => Some(format!("Failed to write input to {}: {}", program, e)),
        Some(Err(_)) => Some(format!("Input writer for {} panicked", program)),
    };

    let stderr_text = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        let message = if stderr_text.trim().is_empty() {
            format!("{} failed with {}", program, output.status)
        } else {
            format!("{} failed: {}", program, stderr_text.trim())
        };
        return Err(Error::exec_failed(program, message, stderr_text));
    }

    // A feed that could not be fully written is a stage failure even when the
    // process itself exited cleanly.
    if let Some(message) = feed_error {
        return Err(Error::exec_failed(program, message, stderr_text));
    }

    Ok(Capture {
        stdout: output.stdout,
        stderr: output.stderr,
    })
}
