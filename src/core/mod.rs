// Public modules
pub mod command;
pub mod error;
pub mod exec;
pub mod pipe;
pub mod result;

// Re-export common types for convenience
pub use command::Cmd;
pub use error::{Error, ErrorCode, Result};
pub use exec::Exec;
pub use pipe::{pipe, pipe_with};
pub use result::ExecResult;
