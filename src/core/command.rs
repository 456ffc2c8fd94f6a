//! Reusable command templates.
//!
//! A `Cmd` holds a program name plus preset arguments, fixed once built.
//! Invoking the template appends call-time arguments and yields a fresh
//! `Exec` with its own argument list, so nothing accumulates across calls
//! and units never share state.

use crate::exec::Exec;

/// A reusable, partially-bound command: program name plus preset arguments.
///
/// Nothing is validated or spawned at construction time; a missing program
/// surfaces as an execution error when the unit actually runs.
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    preset: Vec<String>,
}

impl Cmd {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            preset: Vec::new(),
        }
    }

    /// Append one preset argument.
    pub fn arg(mut self, arg: &str) -> Self {
        self.preset.push(arg.to_string());
        self
    }

    /// Append preset arguments in order.
    pub fn args(mut self, args: &[&str]) -> Self {
        self.preset.extend(args.iter().map(|a| a.to_string()));
        self
    }

    /// Produce a runnable unit whose argument list is the preset arguments
    /// followed by `args`, in that order. Each call builds an independent
    /// copy; the template itself never changes.
    pub fn invoke(&self, args: &[&str]) -> Exec {
        let mut full = self.preset.clone();
        full.extend(args.iter().map(|a| a.to_string()));
        Exec::command(&self.program, full)
    }

    /// One-shot standalone run: invoke, execute with no input, and return the
    /// best-effort output text (errors discarded). For pipelines or
    /// error-sensitive callers, use [`Cmd::invoke`] and inspect the result.
    pub fn text(&self, args: &[&str]) -> String {
        self.invoke(args).run().into_text()
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn preset_args(&self) -> &[String] {
        &self.preset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_args_are_frozen_at_build_time() {
        let grep = Cmd::new("grep").args(&["-o", "Hi"]);
        assert_eq!(grep.program(), "grep");
        assert_eq!(grep.preset_args(), ["-o", "Hi"]);

        // Invoking must not grow the template.
        let _ = grep.invoke(&["--color=never"]);
        let _ = grep.invoke(&["extra"]);
        assert_eq!(grep.preset_args(), ["-o", "Hi"]);
    }

    #[test]
    fn invocations_do_not_accumulate_arguments() {
        let echo = Cmd::new("echo").arg("-n");

        let first = echo.invoke(&["a"]).run();
        let second = echo.invoke(&["b"]).run();

        assert_eq!(first.text(), "a");
        assert_eq!(second.text(), "b");
    }

    #[test]
    fn text_runs_standalone() {
        let echo = Cmd::new("echo");
        assert_eq!(echo.text(&["hello"]), "hello\n");
    }

    #[test]
    fn text_swallows_failure() {
        assert_eq!(Cmd::new("false").text(&[]), "");
    }
}
