//! `shpipe run` - execute a pipeline of commands.

use clap::Args;
use serde::Serialize;

use shpipe::args::split_command;
use shpipe::{log_status, pipe, pipe_with, Cmd, Exec};

use crate::commands::CmdResult;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Pipeline stages, one command string each, run left to right
    #[arg(value_name = "COMMAND")]
    pub stages: Vec<String>,

    /// Literal text fed to the first stage
    #[arg(long, value_name = "TEXT", conflicts_with = "input_file")]
    pub input: Option<String>,

    /// File whose contents feed the first stage
    #[arg(long, value_name = "PATH")]
    pub input_file: Option<String>,

    /// Print raw stdout instead of the JSON envelope
    #[arg(long)]
    pub raw: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

pub fn execute(args: &RunArgs) -> CmdResult<RunOutput> {
    let mut units: Vec<Exec> = Vec::new();

    if let Some(path) = &args.input_file {
        let expanded = shellexpand::tilde(path).to_string();
        log_status!("run", "Reading input from {}", expanded);
        units.push(Exec::dump(expanded));
    }

    for stage in &args.stages {
        let words = split_command(stage)?;
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        units.push(Cmd::new(refs[0]).invoke(&refs[1..]));
    }

    let result = match &args.input {
        Some(text) => pipe_with(text, units),
        None => pipe(units),
    };

    let (stdout, stderr, error) = result.into_parts();
    if let Some(err) = error {
        return Err(err);
    }

    Ok((RunOutput { stdout, stderr }, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(stages: &[&str]) -> RunArgs {
        RunArgs {
            stages: stages.iter().map(|s| s.to_string()).collect(),
            input: None,
            input_file: None,
            raw: false,
        }
    }

    #[test]
    fn no_stages_is_an_empty_pipeline() {
        let (out, code) = execute(&run_args(&[])).unwrap();
        assert_eq!(out.stdout, "");
        assert_eq!(code, 0);
    }

    #[test]
    fn stages_are_chained_in_order() {
        let mut args = run_args(&["grep -o Hi", "wc -w"]);
        args.input = Some("Hi there!!".to_string());
        let (out, _) = execute(&args).unwrap();
        assert_eq!(out.stdout.trim(), "1");
    }

    #[test]
    fn blank_stage_is_rejected() {
        let err = execute(&run_args(&["echo hi", "  "])).unwrap_err();
        assert_eq!(err.code, shpipe::ErrorCode::ValidationInvalidArgument);
    }

    #[test]
    fn failing_stage_propagates() {
        let err = execute(&run_args(&["false"])).unwrap_err();
        assert_eq!(err.code, shpipe::ErrorCode::ExecFailed);
    }
}
