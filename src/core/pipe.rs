//! Sequential pipeline execution with first-failure short-circuit.

use crate::exec::Exec;
use crate::result::ExecResult;

/// Run `units` in order, feeding each unit's captured stdout to the next
/// unit's stdin. The first unit reads its own bound input, if any.
///
/// Stops at the first failing unit; later units never run, and the returned
/// error carries that unit's stderr. An empty pipeline yields empty output
/// and no error.
pub fn pipe<I>(units: I) -> ExecResult
where
    I: IntoIterator<Item = Exec>,
{
    line(units, None)
}

/// Like [`pipe`], but feeds `input` to the first unit as stdin.
pub fn pipe_with<I>(input: &str, units: I) -> ExecResult
where
    I: IntoIterator<Item = Exec>,
{
    line(units, Some(input.as_bytes().to_vec()))
}

/// Carried-buffer executor behind [`pipe`], [`pipe_with`], and the
/// single-unit run methods. The buffer is exclusively owned here for the
/// duration of the call; stages are strictly sequential.
pub(crate) fn line<I>(units: I, initial: Option<Vec<u8>>) -> ExecResult
where
    I: IntoIterator<Item = Exec>,
{
    let mut carried = initial;
    let mut stderr_all: Vec<u8> = Vec::new();

    for unit in units {
        match unit.execute(carried.take()) {
            Ok(capture) => {
                stderr_all.extend_from_slice(&capture.stderr);
                carried = Some(capture.stdout);
            }
            Err(err) => {
                stderr_all.extend_from_slice(err.stderr.as_bytes());
                return ExecResult::failure(err, stderr_all);
            }
        }
    }

    ExecResult::success(carried.unwrap_or_default(), stderr_all)
}
