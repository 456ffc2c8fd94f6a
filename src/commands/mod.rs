//! Binary-side command handlers.
//!
//! Each handler returns its serializable payload plus the process exit code;
//! `main` decides how to render it (JSON envelope or raw).

pub type CmdResult<T> = shpipe::Result<(T, i32)>;

pub mod run;
