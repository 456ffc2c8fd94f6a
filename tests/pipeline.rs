use std::fs;
use std::io;

use shpipe::{pipe, pipe_with, Cmd, Exec};

#[test]
fn single_unit_returns_exact_stdout() {
    let result = Cmd::new("echo").args(&["-n"]).invoke(&["Hi"]).run();
    assert!(result.is_success());
    assert_eq!(result.text(), "Hi");
}

#[test]
fn identity_stages_preserve_input() {
    let input = "line one\nline two\n";
    let cat = Cmd::new("cat");
    let result = pipe_with(
        input,
        [cat.invoke(&[]), cat.invoke(&[]), cat.invoke(&[])],
    );
    assert!(result.is_success());
    assert_eq!(result.text(), input);
}

#[test]
fn echo_grep_wc_counts_one_word() {
    let echo = Cmd::new("echo");
    let grep = Cmd::new("grep");
    let wc = Cmd::new("wc");

    let result = pipe([
        echo.invoke(&["Hi there!!"]),
        grep.invoke(&["-o", "Hi"]),
        wc.invoke(&["-w"]),
    ]);

    assert!(result.is_success());
    assert_eq!(result.text().trim(), "1");
}

#[test]
fn pipeline_short_circuits_on_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("third-stage-ran");
    let sh = Cmd::new("sh");

    let result = pipe([
        sh.invoke(&["-c", "echo started"]),
        sh.invoke(&["-c", "echo boom >&2; exit 3"]),
        sh.invoke(&["-c", &format!("touch {}", marker.display())]),
    ]);

    let err = result.error().expect("second stage must fail");
    assert_eq!(err.stderr, "boom\n");
    assert!(
        !marker.exists(),
        "third stage ran despite an earlier failure"
    );
}

#[test]
fn empty_pipeline_is_a_successful_noop() {
    let result = pipe(Vec::new());
    assert!(result.is_success());
    assert_eq!(result.text(), "");
}

#[test]
fn dump_through_filter_returns_matching_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "keep this\ndrop that\nkeep me too\n").unwrap();

    let result = pipe([Exec::dump(&path), Cmd::new("grep").invoke(&["keep"])]);

    assert!(result.is_success());
    assert_eq!(result.text(), "keep this\nkeep me too\n");
}

#[test]
fn reader_source_feeds_pipeline() {
    let reader = io::Cursor::new("alpha\nbeta\nalpha again\n");
    let result = pipe([
        Exec::from_reader(reader),
        Cmd::new("grep").invoke(&["alpha"]),
    ]);
    assert_eq!(result.text(), "alpha\nalpha again\n");
}

#[test]
fn text_accessor_discards_failure() {
    let result = Cmd::new("sh")
        .invoke(&["-c", "echo unwanted >&2; exit 1"])
        .run();
    assert_eq!(result.text(), "");
    assert_eq!(result.into_text(), "");
}

#[test]
fn failure_error_carries_failing_stage_stderr() {
    let result = pipe([
        Cmd::new("echo").invoke(&["fine"]),
        Cmd::new("sh").invoke(&["-c", "echo oops >&2; exit 1"]),
    ]);

    let (stdout, stderr, error) = result.into_parts();
    assert_eq!(stdout, "");
    assert_eq!(stderr, "oops\n");
    let err = error.expect("pipeline failed");
    assert_eq!(err.stderr, "oops\n");
    assert_eq!(err.code, shpipe::ErrorCode::ExecFailed);
}

#[test]
fn run_with_feeds_explicit_input() {
    let result = Cmd::new("tr")
        .invoke(&["a-z", "A-Z"])
        .run_with("quiet text");
    assert_eq!(result.text(), "QUIET TEXT");
}

#[test]
fn display_interpolates_output() {
    let result = Cmd::new("echo").invoke(&["-n", "inline"]).run();
    assert_eq!(format!("result: {}", result), "result: inline");
}

#[test]
fn display_of_failure_is_empty() {
    let result = Cmd::new("false").invoke(&[]).run();
    assert_eq!(format!("{}", result), "");
}

#[test]
fn into_result_surfaces_the_error() {
    let err = Cmd::new("sh")
        .invoke(&["-c", "echo nope >&2; exit 7"])
        .run()
        .into_result()
        .unwrap_err();
    assert_eq!(err.stderr, "nope\n");

    let ok = Cmd::new("echo")
        .invoke(&["-n", "fine"])
        .run()
        .into_result()
        .unwrap();
    assert_eq!(ok, "fine");
}

#[test]
fn large_payload_crosses_stage_boundary_without_deadlock() {
    // Bigger than any OS pipe buffer, so the writer thread must overlap the
    // reader for the stage to finish.
    let payload = "x".repeat(1 << 20);
    let result = pipe_with(&payload, [Cmd::new("cat").invoke(&[]), Cmd::new("wc").invoke(&["-c"])]);
    assert!(result.is_success());
    assert_eq!(result.text().trim(), (1 << 20).to_string());
}
